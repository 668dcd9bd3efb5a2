// Host layer - the command line stand-in for the note-taking app: commands,
// the URL prompt, the active view and the settings panel.

#[path = "cli.rs"]
pub mod cli;

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "context.rs"]
pub mod context;

#[path = "modal.rs"]
pub mod modal;

#[path = "notices.rs"]
pub mod notices;

#[path = "workspace.rs"]
pub mod workspace;

pub use context::{ClientFactory, PluginContext};
