use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::core::settings::{ArenaSettings, SettingsError, SettingsStore};

/// Simple JSON file store for the plugin settings.
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl SettingsStore for JsonSettingsStore {
    async fn load(&self) -> Result<Option<ArenaSettings>, SettingsError> {
        if !fs::try_exists(&self.path).await? {
            return Ok(None);
        }

        let text = fs::read_to_string(&self.path).await?;
        if text.trim().is_empty() {
            return Ok(None);
        }

        let settings: ArenaSettings = serde_json::from_str(&text)?;
        Ok(Some(settings))
    }

    async fn save(&self, settings: &ArenaSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let text = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, text).await?;
        Ok(())
    }
}
