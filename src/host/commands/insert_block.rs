// The "Insert Are.na block" commands.
//
// 1. Ask for a URL
// 2. Let the importer fetch and save the block
// 3. Put the result where the user is: the note being edited or the canvas
//
// All import failures have already been shown as notices by the importer.

use anyhow::{bail, Context as _, Result};
use tokio::io::AsyncBufRead;

use super::{CommandId, CommandRegistry};
use crate::core::blocks::{parse_block_url, ArenaClient};
use crate::core::settings::SettingsStore;
use crate::core::vault::{FileStore, VaultFile};
use crate::core::workspace::NotificationSink;
use crate::host::context::PluginContext;
use crate::host::modal::InsertBlockModal;
use crate::host::workspace::{embed_link, ActiveView};

pub const NOTICE_INVALID_URL: &str = "Invalid Are.na url";

/// Run whichever insert command is available in `view`.
///
/// Returns the imported file, or `None` when the prompt was cancelled or the
/// import failed.
pub async fn insert_block<C, F, S, R>(
    ctx: &PluginContext<C, F, S>,
    registry: &dyn CommandRegistry,
    view: &ActiveView,
    url: Option<String>,
    input: R,
    notices: &dyn NotificationSink,
) -> Result<Option<VaultFile>>
where
    C: ArenaClient,
    F: FileStore,
    S: SettingsStore,
    R: AsyncBufRead + Unpin,
{
    let Some(command) = registry.available(view).into_iter().next() else {
        bail!("No Are.na command is available in the current view");
    };
    tracing::debug!(command = command.id.as_str(), "Running command");

    let Some(url) = InsertBlockModal::default()
        .open(url, input)
        .await
        .context("Failed to read the block URL")?
    else {
        return Ok(None);
    };

    let Some(id) = parse_block_url(&url) else {
        notices.notice(NOTICE_INVALID_URL);
        return Ok(None);
    };

    let Some(file) = ctx.importer.save_block(ctx.settings(), &id, notices).await else {
        return Ok(None);
    };

    match (command.id, view) {
        (CommandId::InsertBlockEditor, ActiveView::Editor(editor)) => {
            editor
                .replace_selection(ctx.importer.store(), &embed_link(&file))
                .await
                .with_context(|| format!("Failed to insert link into {}", editor.file().path))?;
        }
        (CommandId::InsertBlock, ActiveView::Canvas(canvas)) => {
            canvas
                .create_file_node(canvas.pointer(), canvas.default_file_node_size(), &file)
                .await
                .context("Failed to place the block on the canvas")?;
        }
        _ => {}
    }

    Ok(Some(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::blocks::{ArenaError, Block, BlockId, BlockKind};
    use crate::core::settings::{ArenaSettings, SettingsError, SettingsService};
    use crate::core::workspace::notice_sink::test_support::RecordingSink;
    use crate::core::workspace::{CanvasError, CanvasPoint, CanvasSize, CanvasView};
    use crate::host::commands::{register_commands, CommandCatalog};
    use crate::host::context::ClientFactory;
    use crate::host::workspace::NoteEditor;
    use crate::infra::vault::MemoryVault;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct TextClient;

    #[async_trait]
    impl ArenaClient for TextClient {
        async fn fetch_block(&self, id: &BlockId) -> Result<Block, ArenaError> {
            Ok(Block {
                id: id.clone(),
                title: None,
                kind: BlockKind::Text {
                    content: format!("block {}", id),
                },
            })
        }

        async fn download(&self, url: &str) -> Result<Vec<u8>, ArenaError> {
            Err(ArenaError::Api(format!("unexpected download of {}", url)))
        }
    }

    struct NoSettings;

    #[async_trait]
    impl SettingsStore for NoSettings {
        async fn load(&self) -> Result<Option<ArenaSettings>, SettingsError> {
            Ok(None)
        }

        async fn save(&self, _settings: &ArenaSettings) -> Result<(), SettingsError> {
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct RecordingCanvas {
        nodes: Arc<Mutex<Vec<(CanvasPoint, String)>>>,
    }

    #[async_trait]
    impl CanvasView for RecordingCanvas {
        fn pointer(&self) -> CanvasPoint {
            CanvasPoint { x: 5.0, y: 6.0 }
        }

        fn default_file_node_size(&self) -> CanvasSize {
            CanvasSize {
                width: 400.0,
                height: 400.0,
            }
        }

        async fn create_file_node(
            &self,
            pos: CanvasPoint,
            _size: CanvasSize,
            file: &VaultFile,
        ) -> Result<String, CanvasError> {
            self.nodes.lock().unwrap().push((pos, file.path.clone()));
            Ok("node".to_string())
        }
    }

    async fn context() -> PluginContext<TextClient, MemoryVault, NoSettings> {
        let settings = SettingsService::load(NoSettings).await.unwrap();
        let make_client: ClientFactory<TextClient> = Box::new(|_token| Ok(TextClient));
        PluginContext::new(settings, MemoryVault::new(), make_client).unwrap()
    }

    fn registry() -> CommandCatalog {
        let mut catalog = CommandCatalog::default();
        register_commands(&mut catalog);
        catalog
    }

    #[tokio::test]
    async fn test_editor_command_inserts_embed_link() {
        let ctx = context().await;
        ctx.importer.store().insert_text("daily.md", "notes");
        let view = ActiveView::Editor(NoteEditor::new("daily.md"));
        let notices = RecordingSink::default();

        let file = insert_block(
            &ctx,
            &registry(),
            &view,
            Some("https://www.are.na/block/42".to_string()),
            &b""[..],
            &notices,
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(file.path, "are.na/42.md");
        assert_eq!(
            ctx.importer.store().text("daily.md").as_deref(),
            Some("notes\n![[42.md]]")
        );
        assert!(notices.messages().is_empty());
    }

    #[tokio::test]
    async fn test_standalone_command_places_file_on_canvas() {
        let ctx = context().await;
        let canvas = RecordingCanvas::default();
        let view = ActiveView::Canvas(Box::new(canvas.clone()));

        insert_block(
            &ctx,
            &registry(),
            &view,
            None,
            &b"https://are.na/block/7\n"[..],
            &RecordingSink::default(),
        )
        .await
        .unwrap();

        let nodes = canvas.nodes.lock().unwrap().clone();
        assert_eq!(nodes, vec![(CanvasPoint { x: 5.0, y: 6.0 }, "are.na/7.md".to_string())]);
    }

    #[tokio::test]
    async fn test_invalid_url_shows_notice() {
        let ctx = context().await;
        let notices = RecordingSink::default();

        let result = insert_block(
            &ctx,
            &registry(),
            &ActiveView::Empty,
            Some("https://are.na/someone/channel".to_string()),
            &b""[..],
            &notices,
        )
        .await
        .unwrap();

        assert!(result.is_none());
        assert_eq!(notices.messages(), vec![NOTICE_INVALID_URL.to_string()]);
        assert_eq!(ctx.importer.store().file_count(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_prompt_does_nothing() {
        let ctx = context().await;
        let result = insert_block(
            &ctx,
            &registry(),
            &ActiveView::Empty,
            None,
            &b"\n"[..],
            &RecordingSink::default(),
        )
        .await
        .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_no_available_command_is_an_error() {
        let ctx = context().await;
        let result = insert_block(
            &ctx,
            &CommandCatalog::default(),
            &ActiveView::Empty,
            Some("https://are.na/block/1".to_string()),
            &b""[..],
            &RecordingSink::default(),
        )
        .await;
        assert!(result.is_err());
    }
}
