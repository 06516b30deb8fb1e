//! Telemetry opt-out gate.
//!
//! Telemetry is opt-out, never opt-in: absence of every disable signal
//! means enabled. Three signals are honored, first match wins:
//!
//! 1. the `--no-telemetry` CLI flag
//! 2. the `AI_PATCH_TELEMETRY` environment variable set to a falsy token
//! 3. `telemetry_enabled = false` in the saved configuration

/// Environment variable consulted for the opt-out.
pub const TELEMETRY_ENV: &str = "AI_PATCH_TELEMETRY";

/// Decides whether telemetry is enabled for this invocation.
///
/// `config_telemetry_enabled` is the persisted setting; only an explicit
/// `Some(false)` disables — `None` (never set) keeps the default-on
/// posture.
pub fn is_enabled(no_telemetry_flag: bool, config_telemetry_enabled: Option<bool>) -> bool {
    is_enabled_with_env(
        no_telemetry_flag,
        std::env::var(TELEMETRY_ENV).ok().as_deref(),
        config_telemetry_enabled,
    )
}

/// Gate logic with the environment value injected, for testability.
pub fn is_enabled_with_env(
    no_telemetry_flag: bool,
    env_value: Option<&str>,
    config_telemetry_enabled: Option<bool>,
) -> bool {
    if no_telemetry_flag {
        return false;
    }

    if let Some(value) = env_value {
        if is_falsy(value) {
            return false;
        }
    }

    if config_telemetry_enabled == Some(false) {
        return false;
    }

    true
}

/// Recognized opt-out tokens: `"0"` and case-insensitive `"false"`.
fn is_falsy(value: &str) -> bool {
    value == "0" || value.eq_ignore_ascii_case("false")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins_over_everything() {
        assert!(!is_enabled_with_env(true, None, None));
        assert!(!is_enabled_with_env(true, Some("1"), Some(true)));
    }

    #[test]
    fn test_env_falsy_tokens_disable() {
        assert!(!is_enabled_with_env(false, Some("0"), None));
        assert!(!is_enabled_with_env(false, Some("false"), None));
        assert!(!is_enabled_with_env(false, Some("False"), None));
        assert!(!is_enabled_with_env(false, Some("FALSE"), None));
    }

    #[test]
    fn test_unrecognized_env_values_ignored() {
        assert!(is_enabled_with_env(false, Some("1"), None));
        assert!(is_enabled_with_env(false, Some("no"), None));
        assert!(is_enabled_with_env(false, Some(""), None));
    }

    #[test]
    fn test_config_disable_is_explicit() {
        assert!(!is_enabled_with_env(false, None, Some(false)));
        assert!(is_enabled_with_env(false, None, Some(true)));
        assert!(is_enabled_with_env(false, None, None));
    }
}
