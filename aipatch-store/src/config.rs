//! Saved configuration.
//!
//! A small JSON file holding the settings that must survive between runs:
//! the telemetry opt-out and the install id. Everything endpoint-related
//! comes from the environment on every invocation (see [`crate::detect`]).

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::StoreError;
use crate::persistence::{default_config_path, load_json_or_default, save_json};

// ============================================================================
// Saved Config
// ============================================================================

/// Persisted CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SavedConfig {
    /// Telemetry opt-out. `None` means never set, which keeps the
    /// default-on posture; only an explicit `false` disables.
    pub telemetry_enabled: Option<bool>,

    /// Random install identifier, generated once on first use. Used only
    /// to deduplicate telemetry events, never tied to personal identity.
    pub install_id: Option<String>,
}

impl SavedConfig {
    /// Loads the configuration from the default path, falling back to
    /// defaults when the file is missing or unreadable.
    pub async fn load() -> Self {
        Self::load_from(&default_config_path()).await
    }

    /// Loads the configuration from a specific path.
    pub async fn load_from(path: &Path) -> Self {
        let config: Self = load_json_or_default(path).await;
        debug!(path = %path.display(), "Loaded saved config");
        config
    }

    /// Saves the configuration to the default path.
    pub async fn save(&self) -> Result<(), StoreError> {
        self.save_to(&default_config_path()).await
    }

    /// Saves the configuration to a specific path.
    pub async fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        save_json(path, self).await?;
        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }
}

// ============================================================================
// Install Id
// ============================================================================

/// Returns the persisted install id, generating and saving one on first
/// use.
///
/// The id is a random UUID v4. Generation happens exactly once per
/// installation; later runs reuse the stored value.
pub async fn get_or_create_install_id(path: &Path) -> Result<String, StoreError> {
    let mut config = SavedConfig::load_from(path).await;

    if let Some(id) = &config.install_id {
        return Ok(id.clone());
    }

    let id = Uuid::new_v4().to_string();
    debug!("Generated new install id");

    config.install_id = Some(id.clone());
    config.save_to(path).await?;

    Ok(id)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_defaults_when_file_missing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");

        let config = SavedConfig::load_from(&path).await;
        assert_eq!(config.telemetry_enabled, None);
        assert_eq!(config.install_id, None);
    }

    #[tokio::test]
    async fn test_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");

        let config = SavedConfig {
            telemetry_enabled: Some(false),
            install_id: Some("abc".to_string()),
        };
        config.save_to(&path).await.unwrap();

        let loaded = SavedConfig::load_from(&path).await;
        assert_eq!(loaded.telemetry_enabled, Some(false));
        assert_eq!(loaded.install_id.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_install_id_generated_once() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");

        let first = get_or_create_install_id(&path).await.unwrap();
        let second = get_or_create_install_id(&path).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 36, "expected a UUID");
    }

    #[tokio::test]
    async fn test_install_id_does_not_clobber_settings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");

        let config = SavedConfig {
            telemetry_enabled: Some(false),
            install_id: None,
        };
        config.save_to(&path).await.unwrap();

        get_or_create_install_id(&path).await.unwrap();

        let loaded = SavedConfig::load_from(&path).await;
        assert_eq!(loaded.telemetry_enabled, Some(false));
        assert!(loaded.install_id.is_some());
    }

    #[tokio::test]
    async fn test_unknown_fields_ignored() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");

        tokio::fs::write(&path, r#"{"telemetry_enabled": true, "future": 1}"#)
            .await
            .unwrap();

        let loaded = SavedConfig::load_from(&path).await;
        assert_eq!(loaded.telemetry_enabled, Some(true));
    }
}
