use super::settings_models::{ArenaSettings, DEFAULT_TARGET_DIRECTORY};
use super::settings_store::{SettingsError, SettingsStore};

/// Owns the settings record for the lifetime of the plugin and persists every change.
pub struct SettingsService<S: SettingsStore> {
    store: S,
    stored: ArenaSettings,
    token_override: Option<String>,
    active: ArenaSettings,
}

impl<S: SettingsStore> SettingsService<S> {
    /// Load stored settings merged over the defaults.
    pub async fn load(store: S) -> Result<Self, SettingsError> {
        let stored = store.load().await?.unwrap_or_default();
        Ok(Self {
            store,
            active: stored.clone(),
            stored,
            token_override: None,
        })
    }

    /// Settings in effect, including a session token override.
    pub fn settings(&self) -> &ArenaSettings {
        &self.active
    }

    /// Use `token` for this session without writing it to the store.
    pub fn override_token(&mut self, token: String) {
        self.token_override = normalize_token(Some(token));
        self.refresh();
    }

    /// Store a pasted token. A blank value clears it.
    pub async fn set_token(&mut self, token: &str) -> Result<(), SettingsError> {
        self.stored.access_token = normalize_token(Some(token.to_string()));
        self.token_override = None;
        self.persist().await
    }

    pub async fn logout(&mut self) -> Result<(), SettingsError> {
        self.stored.access_token = None;
        self.token_override = None;
        self.persist().await
    }

    /// Change the import directory. A blank value restores the default.
    pub async fn set_target_directory(&mut self, dir: &str) -> Result<(), SettingsError> {
        let dir = dir.trim().trim_matches('/');
        self.stored.target_directory = if dir.is_empty() {
            DEFAULT_TARGET_DIRECTORY.to_string()
        } else {
            dir.to_string()
        };
        self.persist().await
    }

    async fn persist(&mut self) -> Result<(), SettingsError> {
        self.refresh();
        self.store.save(&self.stored).await
    }

    fn refresh(&mut self) {
        self.active = self.stored.clone();
        if let Some(token) = &self.token_override {
            self.active.access_token = Some(token.clone());
        }
    }
}

fn normalize_token(token: Option<String>) -> Option<String> {
    token
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Store that keeps the last saved record in memory.
    #[derive(Default)]
    struct MockSettingsStore {
        saved: Mutex<Option<ArenaSettings>>,
        saves: Mutex<u32>,
    }

    #[async_trait]
    impl SettingsStore for MockSettingsStore {
        async fn load(&self) -> Result<Option<ArenaSettings>, SettingsError> {
            Ok(self.saved.lock().unwrap().clone())
        }

        async fn save(&self, settings: &ArenaSettings) -> Result<(), SettingsError> {
            *self.saved.lock().unwrap() = Some(settings.clone());
            *self.saves.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_load_without_stored_settings_uses_defaults() {
        let service = SettingsService::load(MockSettingsStore::default())
            .await
            .unwrap();
        assert_eq!(service.settings(), &ArenaSettings::default());
    }

    #[tokio::test]
    async fn test_every_change_is_persisted() {
        let mut service = SettingsService::load(MockSettingsStore::default())
            .await
            .unwrap();

        service.set_token("  secret  ").await.unwrap();
        assert_eq!(service.settings().access_token.as_deref(), Some("secret"));

        service.set_target_directory("imports/are.na/").await.unwrap();
        assert_eq!(service.settings().target_directory, "imports/are.na");

        service.logout().await.unwrap();
        assert_eq!(service.settings().access_token, None);

        assert_eq!(*service.store.saves.lock().unwrap(), 3);
        assert_eq!(
            service.store.saved.lock().unwrap().clone(),
            Some(service.settings().clone())
        );
    }

    #[tokio::test]
    async fn test_blank_token_clears_token() {
        let mut service = SettingsService::load(MockSettingsStore::default())
            .await
            .unwrap();
        service.set_token("abc").await.unwrap();
        service.set_token("").await.unwrap();
        assert_eq!(service.settings().access_token, None);
    }

    #[tokio::test]
    async fn test_blank_target_directory_restores_default() {
        let mut service = SettingsService::load(MockSettingsStore::default())
            .await
            .unwrap();
        service.set_target_directory("inbox").await.unwrap();

        service.set_target_directory("  / ").await.unwrap();

        assert_eq!(service.settings().target_directory, DEFAULT_TARGET_DIRECTORY);
        let saved = service.store.saved.lock().unwrap().clone().unwrap();
        assert_eq!(saved.target_directory, DEFAULT_TARGET_DIRECTORY);
    }

    #[tokio::test]
    async fn test_override_token_is_not_saved() {
        let mut service = SettingsService::load(MockSettingsStore::default())
            .await
            .unwrap();
        service.override_token("from-env".to_string());
        assert_eq!(service.settings().token(), Some("from-env"));
        assert!(service.store.saved.lock().unwrap().is_none());

        service.set_target_directory("elsewhere").await.unwrap();
        assert_eq!(service.settings().token(), Some("from-env"));
        let saved = service.store.saved.lock().unwrap().clone().unwrap();
        assert_eq!(saved.access_token, None);
        assert_eq!(saved.target_directory, "elsewhere");
    }
}
