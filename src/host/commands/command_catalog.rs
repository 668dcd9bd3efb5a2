// Host commands.
// Each action gets its own file; this one holds the registry they are listed in.

pub mod insert_block;

pub mod open_block;

pub mod settings_panel;

use crate::host::workspace::ActiveView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandId {
    InsertBlock,
    InsertBlockEditor,
}

impl CommandId {
    pub fn as_str(self) -> &'static str {
        match self {
            CommandId::InsertBlock => "insert-arena-block",
            CommandId::InsertBlockEditor => "insert-arena-block-editor",
        }
    }
}

/// When a command may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// Only while no editor is focused (e.g. on a canvas).
    WithoutEditor,
    /// Only while an editor is focused.
    WithEditor,
}

#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub id: CommandId,
    pub name: &'static str,
    pub availability: Availability,
}

impl CommandSpec {
    /// Whether the command can run in the current view.
    pub fn check(&self, view: &ActiveView) -> bool {
        match self.availability {
            Availability::WithoutEditor => !view.has_editor(),
            Availability::WithEditor => view.has_editor(),
        }
    }
}

/// The host's command palette.
pub trait CommandRegistry {
    fn add_command(&mut self, command: CommandSpec);
    fn commands(&self) -> &[CommandSpec];

    fn available(&self, view: &ActiveView) -> Vec<&CommandSpec> {
        self.commands().iter().filter(|c| c.check(view)).collect()
    }
}

#[derive(Default)]
pub struct CommandCatalog {
    commands: Vec<CommandSpec>,
}

impl CommandRegistry for CommandCatalog {
    fn add_command(&mut self, command: CommandSpec) {
        self.commands.push(command);
    }

    fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }
}

/// Register the plugin's commands. Both open the URL prompt; they differ in
/// where the imported file ends up.
pub fn register_commands(registry: &mut dyn CommandRegistry) {
    registry.add_command(CommandSpec {
        id: CommandId::InsertBlock,
        name: "Insert Are.na block",
        availability: Availability::WithoutEditor,
    });
    registry.add_command(CommandSpec {
        id: CommandId::InsertBlockEditor,
        name: "Insert Are.na block (editor)",
        availability: Availability::WithEditor,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::workspace::NoteEditor;

    fn catalog() -> CommandCatalog {
        let mut catalog = CommandCatalog::default();
        register_commands(&mut catalog);
        catalog
    }

    #[test]
    fn test_registers_both_commands() {
        let ids: Vec<&str> = catalog().commands().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["insert-arena-block", "insert-arena-block-editor"]);
    }

    #[test]
    fn test_editor_view_only_offers_editor_command() {
        let catalog = catalog();
        let view = ActiveView::Editor(NoteEditor::new("note.md"));
        let available = catalog.available(&view);
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, CommandId::InsertBlockEditor);
    }

    #[test]
    fn test_empty_view_only_offers_standalone_command() {
        let catalog = catalog();
        let available = catalog.available(&ActiveView::Empty);
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, CommandId::InsertBlock);
    }
}
