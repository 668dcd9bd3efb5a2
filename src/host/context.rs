use crate::core::blocks::{ArenaClient, ArenaError, BlockImporter};
use crate::core::settings::{ArenaSettings, SettingsService, SettingsStore};
use crate::core::vault::{FileStore, StoreError};

/// Builds a client for the given token. Called again whenever the token changes.
pub type ClientFactory<C> = Box<dyn Fn(Option<String>) -> Result<C, ArenaError> + Send + Sync>;

/// Everything a command needs: the settings record and the importer built from it.
pub struct PluginContext<C, F, S>
where
    C: ArenaClient,
    F: FileStore,
    S: SettingsStore,
{
    pub settings: SettingsService<S>,
    pub importer: BlockImporter<C, F>,
    make_client: ClientFactory<C>,
}

impl<C, F, S> PluginContext<C, F, S>
where
    C: ArenaClient,
    F: FileStore,
    S: SettingsStore,
{
    pub fn new(
        settings: SettingsService<S>,
        store: F,
        make_client: ClientFactory<C>,
    ) -> Result<Self, ArenaError> {
        let client = make_client(settings.settings().token().map(str::to_string))?;
        Ok(Self {
            settings,
            importer: BlockImporter::new(client, store),
            make_client,
        })
    }

    pub fn settings(&self) -> &ArenaSettings {
        self.settings.settings()
    }

    /// Rebuild the Are.na client from the current token.
    pub fn init_client(&mut self) -> Result<(), ArenaError> {
        let token = self.settings().token().map(str::to_string);
        let client = (self.make_client)(token)?;
        self.importer.set_client(client);
        tracing::debug!(has_token = self.settings().has_token(), "Are.na client initialized");
        Ok(())
    }

    /// Startup work once the vault is available: make sure the import directory exists.
    pub async fn on_layout_ready(&self) -> Result<(), StoreError> {
        self.importer.ensure_directory(self.settings()).await
    }
}
