use super::settings_models::ArenaSettings;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Where the host keeps the plugin's settings blob.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Stored settings, or `None` when nothing has been saved yet.
    async fn load(&self) -> Result<Option<ArenaSettings>, SettingsError>;
    async fn save(&self, settings: &ArenaSettings) -> Result<(), SettingsError>;
}
