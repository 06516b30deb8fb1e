//! The four wedge checks.
//!
//! Each check maps to one [`crate::check::CheckTarget`] and produces a
//! [`aipatch_core::CheckReport`]. They share the synthetic-request shape
//! (one small chat completion) but differ in what they measure.

mod cost;
mod retries;
mod streaming;
mod trace;

pub use cost::CostCheck;
pub use retries::RetriesCheck;
pub use streaming::StreamingCheck;
pub use trace::TraceCheck;

use serde_json::json;

use aipatch_core::ProviderConfig;

/// Builds the minimal synthetic chat-completion body shared by checks.
pub(crate) fn synthetic_body(
    config: &ProviderConfig,
    content: &str,
    max_tokens: u32,
    stream: bool,
) -> serde_json::Value {
    let mut body = json!({
        "model": config.model_or_default(),
        "messages": [{"role": "user", "content": content}],
        "max_tokens": max_tokens,
    });
    if stream {
        body["stream"] = json!(true);
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use aipatch_core::ProviderKind;

    #[test]
    fn test_synthetic_body_shape() {
        let config = ProviderConfig::new("u", "k", ProviderKind::OpenAiCompatible, None);
        let body = synthetic_body(&config, "Test", 10, false);

        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Test");
        assert_eq!(body["max_tokens"], 10);
        assert!(body.get("stream").is_none());

        let body = synthetic_body(&config, "Say hello", 50, true);
        assert_eq!(body["stream"], true);
    }
}
