use crate::core::vault::{FileStore, StoreError, VaultFile};
use crate::core::workspace::CanvasView;

/// A note open for editing. The terminal has no cursor, so the cursor sits
/// at the end of the note.
pub struct NoteEditor {
    file: VaultFile,
}

impl NoteEditor {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            file: VaultFile::new(path),
        }
    }

    pub fn file(&self) -> &VaultFile {
        &self.file
    }

    /// Insert `text` at the cursor, creating the note when it does not exist yet.
    pub async fn replace_selection<F>(&self, store: &F, text: &str) -> Result<(), StoreError>
    where
        F: FileStore + ?Sized,
    {
        let Some(file) = store.get_file(&self.file.path).await? else {
            store.create(&self.file.path, text).await?;
            return Ok(());
        };

        let mut body = store.read(&file).await?;
        if !body.is_empty() && !body.ends_with('\n') {
            body.push('\n');
        }
        body.push_str(text);
        store.modify(&file, &body).await
    }
}

/// What the user is looking at when a command runs.
pub enum ActiveView {
    Empty,
    Editor(NoteEditor),
    Canvas(Box<dyn CanvasView>),
}

impl ActiveView {
    pub fn has_editor(&self) -> bool {
        matches!(self, ActiveView::Editor(_))
    }
}

/// Markdown embed reference for a vault file.
pub fn embed_link(file: &VaultFile) -> String {
    format!("![[{}]]", file.name)
}
