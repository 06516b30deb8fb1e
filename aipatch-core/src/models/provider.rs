//! Provider-related types.
//!
//! This module contains types describing the API endpoint being diagnosed:
//! - [`ProviderKind`] - Enum of supported provider API families
//! - [`ProviderConfig`] - Resolved endpoint configuration for one run

use serde::{Deserialize, Serialize};

/// Path of the synthetic chat-completion request used by checks.
const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

// ============================================================================
// Provider Kind
// ============================================================================

/// Supported provider API families.
///
/// ai-patch probes chat-completion endpoints; these variants describe which
/// wire dialect and environment variables apply, not individual vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProviderKind {
    /// OpenAI or any OpenAI-compatible endpoint (gateways included).
    #[default]
    #[serde(rename = "openai-compatible")]
    OpenAiCompatible,
    /// Anthropic Claude.
    #[serde(rename = "anthropic")]
    Anthropic,
    /// Google Gemini.
    #[serde(rename = "gemini")]
    Gemini,
    /// Anything else; treated as OpenAI-compatible with no default endpoint.
    #[serde(rename = "other")]
    Other,
}

impl ProviderKind {
    /// Returns the display name for this provider family.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::OpenAiCompatible => "OpenAI-compatible",
            Self::Anthropic => "Anthropic",
            Self::Gemini => "Gemini",
            Self::Other => "Other",
        }
    }

    /// Returns the CLI name for this provider family (lowercase, stable).
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::OpenAiCompatible => "openai-compatible",
            Self::Anthropic => "anthropic",
            Self::Gemini => "gemini",
            Self::Other => "other",
        }
    }

    /// Returns all provider families.
    pub fn all() -> &'static [ProviderKind] {
        &[
            Self::OpenAiCompatible,
            Self::Anthropic,
            Self::Gemini,
            Self::Other,
        ]
    }

    /// Looks up a provider family by CLI name or alias.
    pub fn from_cli_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "openai-compatible" | "openai" => Some(Self::OpenAiCompatible),
            "anthropic" | "claude" => Some(Self::Anthropic),
            "gemini" | "google" => Some(Self::Gemini),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Environment variable holding the base URL for this family.
    pub fn base_url_env(&self) -> &'static str {
        match self {
            Self::OpenAiCompatible | Self::Other => "OPENAI_BASE_URL",
            Self::Anthropic => "ANTHROPIC_BASE_URL",
            Self::Gemini => "GEMINI_BASE_URL",
        }
    }

    /// Environment variable holding the API key for this family.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Self::OpenAiCompatible | Self::Other => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
        }
    }

    /// Default base URL when the environment does not override it.
    ///
    /// [`ProviderKind::Other`] has no default; its configuration must come
    /// entirely from the environment.
    pub fn default_base_url(&self) -> Option<&'static str> {
        match self {
            Self::OpenAiCompatible => Some("https://api.openai.com"),
            Self::Anthropic => Some("https://api.anthropic.com"),
            Self::Gemini => Some("https://generativelanguage.googleapis.com"),
            Self::Other => None,
        }
    }

    /// Default model used for synthetic requests when `MODEL` is not set.
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAiCompatible | Self::Other => "gpt-3.5-turbo",
            Self::Anthropic => "claude-3-5-sonnet-20241022",
            Self::Gemini => "gemini-pro",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.cli_name())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_cli_name(s).ok_or_else(|| crate::error::CoreError::UnknownProvider(s.to_string()))
    }
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Resolved endpoint configuration for one diagnostic run.
///
/// Constructed once from the environment (see `aipatch-store`) and read-only
/// afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the endpoint under test.
    pub base_url: String,
    /// API key sent as a bearer token. Never serialized.
    #[serde(skip_serializing, default)]
    pub api_key: String,
    /// Which provider family the endpoint speaks.
    pub provider: ProviderKind,
    /// Model used for synthetic requests, if resolved.
    pub model: Option<String>,
}

impl ProviderConfig {
    /// Creates a new configuration.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        provider: ProviderKind,
        model: Option<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            provider,
            model,
        }
    }

    /// Returns true when both the base URL and the API key are present.
    pub fn is_valid(&self) -> bool {
        !self.base_url.is_empty() && !self.api_key.is_empty()
    }

    /// Names the environment variables that are missing for a valid config.
    pub fn missing_vars(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.base_url.is_empty() {
            missing.push(self.provider.base_url_env());
        }
        if self.api_key.is_empty() {
            missing.push(self.provider.api_key_env());
        }
        missing
    }

    /// URL of the chat-completions endpoint, trailing slashes stripped.
    pub fn chat_completions_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            CHAT_COMPLETIONS_PATH
        )
    }

    /// Model for synthetic requests, falling back to the family default.
    pub fn model_or_default(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_name_round_trip() {
        for kind in ProviderKind::all() {
            assert_eq!(ProviderKind::from_cli_name(kind.cli_name()), Some(*kind));
        }
    }

    #[test]
    fn test_from_cli_name_aliases() {
        assert_eq!(
            ProviderKind::from_cli_name("openai"),
            Some(ProviderKind::OpenAiCompatible)
        );
        assert_eq!(
            ProviderKind::from_cli_name("CLAUDE"),
            Some(ProviderKind::Anthropic)
        );
        assert_eq!(ProviderKind::from_cli_name("nope"), None);
    }

    #[test]
    fn test_serde_rename() {
        let json = serde_json::to_string(&ProviderKind::OpenAiCompatible).unwrap();
        assert_eq!(json, "\"openai-compatible\"");
    }

    #[test]
    fn test_chat_completions_url_strips_trailing_slash() {
        let config = ProviderConfig::new(
            "https://api.openai.com/",
            "sk-test",
            ProviderKind::OpenAiCompatible,
            None,
        );
        assert_eq!(
            config.chat_completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_validity_and_missing_vars() {
        let config = ProviderConfig::new("", "", ProviderKind::Anthropic, None);
        assert!(!config.is_valid());
        assert_eq!(
            config.missing_vars(),
            vec!["ANTHROPIC_BASE_URL", "ANTHROPIC_API_KEY"]
        );

        let config = ProviderConfig::new(
            "https://api.anthropic.com",
            "sk-ant",
            ProviderKind::Anthropic,
            None,
        );
        assert!(config.is_valid());
        assert!(config.missing_vars().is_empty());
    }

    #[test]
    fn test_api_key_never_serialized() {
        let config = ProviderConfig::new(
            "https://api.openai.com",
            "sk-secret",
            ProviderKind::OpenAiCompatible,
            Some("gpt-4o".to_string()),
        );
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
        assert!(!json.contains("api_key"));
    }

    #[test]
    fn test_model_or_default() {
        let config = ProviderConfig::new("u", "k", ProviderKind::Gemini, None);
        assert_eq!(config.model_or_default(), "gemini-pro");

        let config = ProviderConfig::new(
            "u",
            "k",
            ProviderKind::Gemini,
            Some("gemini-1.5-pro".to_string()),
        );
        assert_eq!(config.model_or_default(), "gemini-1.5-pro");
    }
}
