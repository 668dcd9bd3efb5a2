use async_trait::async_trait;
use thiserror::Error;

use super::block_models::{Block, BlockId, BlockKind, ImagePayload};
use crate::core::settings::ArenaSettings;
use crate::core::vault::{
    upsert_binary, upsert_text, vault_path, FileStore, StoreError, Upserted, VaultFile,
};
use crate::core::workspace::NotificationSink;

pub const NOTICE_TOKEN_REQUIRED: &str =
    "Following Are.na block requires a personal access token. Please enter one in the settings.";
pub const NOTICE_TOKEN_INVALID: &str = "Invalid Are.na token, please make sure it's correct.";
pub const NOTICE_UNSUPPORTED: &str = "Could not create file";
pub const NOTICE_SAVE_FAILED: &str = "Error saving block";

/// Errors raised while talking to Are.na.
#[derive(Debug, Error)]
pub enum ArenaError {
    /// HTTP 401: the token is missing or was rejected.
    #[error("Are.na rejected the request as unauthorized")]
    Unauthorized,
    #[error("Are.na returned {status} for {url}")]
    Http { status: u16, url: String },
    #[error("Are.na API error: {0}")]
    Api(String),
}

/// The calls the importer needs from the Are.na API.
#[async_trait]
pub trait ArenaClient: Send + Sync {
    async fn fetch_block(&self, id: &BlockId) -> Result<Block, ArenaError>;

    /// Raw bytes of an image or attachment URL referenced by a block.
    async fn download(&self, url: &str) -> Result<Vec<u8>, ArenaError>;
}

// Lets the host swap clients at runtime when the token changes.
#[async_trait]
impl ArenaClient for Box<dyn ArenaClient> {
    async fn fetch_block(&self, id: &BlockId) -> Result<Block, ArenaError> {
        (**self).fetch_block(id).await
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ArenaError> {
        (**self).download(url).await
    }
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Block {0} requires a personal access token")]
    MissingToken(BlockId),
    #[error("The configured Are.na token was rejected")]
    InvalidToken,
    #[error("Block {id} of class {class:?} cannot be saved")]
    UnsupportedBlock { id: BlockId, class: String },
    #[error(transparent)]
    Remote(#[from] ArenaError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ImportError {
    /// Message shown to the user for this failure.
    pub fn notice(&self) -> &'static str {
        match self {
            ImportError::MissingToken(_) => NOTICE_TOKEN_REQUIRED,
            ImportError::InvalidToken => NOTICE_TOKEN_INVALID,
            ImportError::UnsupportedBlock { .. } => NOTICE_UNSUPPORTED,
            ImportError::Remote(_) | ImportError::Store(_) => NOTICE_SAVE_FAILED,
        }
    }
}

/// Fetches blocks and writes them into the vault.
///
/// Every block id maps to one primary file in the target directory:
/// `<id>.md` for text, embeds and links, `<id>.<ext>` for images and
/// attachments. A Link block may also write its preview image next to it.
pub struct BlockImporter<C: ArenaClient, F: FileStore> {
    client: C,
    store: F,
}

impl<C, F> BlockImporter<C, F>
where
    C: ArenaClient,
    F: FileStore,
{
    pub fn new(client: C, store: F) -> Self {
        Self { client, store }
    }

    /// Replace the client, e.g. after the token changed.
    pub fn set_client(&mut self, client: C) {
        self.client = client;
    }

    pub fn store(&self) -> &F {
        &self.store
    }

    /// Create the import directory if it does not exist yet.
    pub async fn ensure_directory(&self, settings: &ArenaSettings) -> Result<(), StoreError> {
        let dir = settings.target_directory.trim_matches('/');
        if dir.is_empty() || self.store.folder_exists(dir).await? {
            return Ok(());
        }

        tracing::info!(dir, "Creating Are.na import directory");
        self.store.create_folder(dir).await
    }

    /// Fetch a block and write it to the vault. Returns the primary file.
    pub async fn import_block(
        &self,
        settings: &ArenaSettings,
        id: &BlockId,
    ) -> Result<VaultFile, ImportError> {
        let block = self.client.fetch_block(id).await.map_err(|err| match err {
            ArenaError::Unauthorized if settings.has_token() => ImportError::InvalidToken,
            ArenaError::Unauthorized => ImportError::MissingToken(id.clone()),
            other => ImportError::Remote(other),
        })?;

        self.ensure_directory(settings).await?;
        let dir = settings.target_directory.as_str();
        let Block {
            id: block_id,
            title,
            kind,
        } = block;

        let written = match kind {
            BlockKind::Image(image) => self.save_image(dir, &block_id, &image).await?,
            BlockKind::Embed(embed) => {
                let path = vault_path(dir, &format!("{}.md", block_id));
                upsert_text(&self.store, &path, &embed_document(&embed.html)).await?
            }
            BlockKind::Text { content } => {
                let path = vault_path(dir, &format!("{}.md", block_id));
                upsert_text(&self.store, &path, &content).await?
            }
            BlockKind::Link { source_url, image } => {
                let image_file = match image {
                    Some(image) => Some(self.save_image(dir, &block_id, &image).await?.file),
                    None => None,
                };
                let body = link_markdown(
                    image_file.as_ref().map(|file| file.name.as_str()),
                    source_url.as_deref(),
                );
                let path = vault_path(dir, &format!("{}.md", block_id));
                upsert_text(&self.store, &path, &body).await?
            }
            BlockKind::Attachment(attachment) => {
                let bytes = self.client.download(&attachment.url).await?;
                let path = vault_path(dir, &format!("{}.{}", block_id, attachment.extension));
                upsert_binary(&self.store, &path, &bytes).await?
            }
            BlockKind::Unsupported { class } => {
                return Err(ImportError::UnsupportedBlock { id: block_id, class });
            }
        };

        tracing::info!(
            block_id = %block_id,
            title = title.as_deref().unwrap_or_default(),
            path = %written.file.path,
            outcome = ?written.outcome,
            "Saved Are.na block"
        );
        Ok(written.file)
    }

    /// Import a block for the UI: failures become a notice and `None`.
    pub async fn save_block(
        &self,
        settings: &ArenaSettings,
        id: &BlockId,
        notices: &dyn NotificationSink,
    ) -> Option<VaultFile> {
        match self.import_block(settings, id).await {
            Ok(file) => Some(file),
            Err(err) => {
                match &err {
                    ImportError::Remote(_) | ImportError::Store(_) => {
                        tracing::error!(block_id = %id, error = %err, "Error saving block");
                    }
                    _ => tracing::warn!(block_id = %id, error = %err, "Block was not saved"),
                }
                notices.notice(err.notice());
                None
            }
        }
    }

    async fn save_image(
        &self,
        dir: &str,
        id: &BlockId,
        image: &ImagePayload,
    ) -> Result<Upserted, ImportError> {
        let bytes = self.client.download(&image.url).await?;
        let path = vault_path(dir, &format!("{}.{}", id, image.extension()));
        Ok(upsert_binary(&self.store, &path, &bytes).await?)
    }
}

/// Minimal HTML document around an embed fragment.
fn embed_document(html: &str) -> String {
    format!("<html>\n{}\n</html>", html)
}

/// Image embed wrapped in a link to the block's source.
fn link_markdown(image_name: Option<&str>, source_url: Option<&str>) -> String {
    format!(
        "[![[{}]]]({})",
        image_name.unwrap_or_default(),
        source_url.unwrap_or_default()
    )
}
