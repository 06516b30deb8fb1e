//! Environment-based configuration resolution.
//!
//! Builds the read-only [`ProviderConfig`] a run operates on. Resolution
//! happens once per invocation; nothing here is persisted.

use aipatch_core::{ProviderConfig, ProviderKind};
use tracing::debug;

/// Shared model override, applies to every provider family.
const MODEL_ENV: &str = "MODEL";

/// Gateway proxy overrides for OpenAI-compatible endpoints, in evaluation
/// order. A later variable overrides an earlier one when both are set.
const GATEWAY_URL_ENVS: &[&str] = &["LITELLM_PROXY_URL", "PORTKEY_BASE_URL", "HELICONE_BASE_URL"];

/// Resolves configuration for a provider family from the environment.
pub fn resolve(provider: ProviderKind) -> ProviderConfig {
    resolve_with(provider, |name| std::env::var(name).ok())
}

/// Resolution with an injected variable lookup, for testability.
pub fn resolve_with(
    provider: ProviderKind,
    lookup: impl Fn(&str) -> Option<String>,
) -> ProviderConfig {
    let mut base_url = lookup(provider.base_url_env())
        .or_else(|| provider.default_base_url().map(ToString::to_string))
        .unwrap_or_default();
    let api_key = lookup(provider.api_key_env()).unwrap_or_default();
    let model = lookup(MODEL_ENV).unwrap_or_else(|| provider.default_model().to_string());

    // Common gateways front OpenAI-compatible endpoints; honor their URL
    // variables when the user has not pointed the base URL anywhere else.
    if provider == ProviderKind::OpenAiCompatible
        && (base_url.is_empty() || Some(base_url.as_str()) == provider.default_base_url())
    {
        for gateway_env in GATEWAY_URL_ENVS {
            if let Some(url) = lookup(gateway_env) {
                debug!(gateway = gateway_env, "Using gateway base URL");
                base_url = url;
            }
        }
    }

    ProviderConfig::new(base_url, api_key, provider, Some(model))
}

// ============================================================================
// Tests
// ============================================================================
