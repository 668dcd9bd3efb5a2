use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "arena-importer",
    about = "Import Are.na blocks into a notes vault",
    version
)]
pub struct Cli {
    /// Vault directory (default: $ARENA_VAULT or the current directory)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import a block; prompts for the URL when it is not given
    Insert {
        /// Block URL, e.g. https://www.are.na/block/123
        url: Option<String>,
        /// Note (vault path) to insert an embed link into
        #[arg(long, conflicts_with = "canvas")]
        into: Option<String>,
        /// Canvas file (vault path) to place the imported file on
        #[arg(long)]
        canvas: Option<String>,
        /// Pointer x position on the canvas
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        x: f64,
        /// Pointer y position on the canvas
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        y: f64,
        /// Fetch the block but keep the result in memory and list it
        #[arg(long, conflicts_with = "canvas")]
        dry_run: bool,
    },

    /// Open the Are.na page of an imported file
    Open {
        /// Vault path of the imported file, e.g. are.na/123.png
        file: String,
    },

    /// Show or change the plugin settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// List the plugin commands
    Commands,
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Print the current settings
    Show,
    /// Store a personal access token (an empty value clears it)
    SetToken { token: String },
    /// Forget the stored token
    Logout,
    /// Change the directory blocks are imported into
    SetDir { dir: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_insert_into_note() {
        let cli = Cli::try_parse_from([
            "arena-importer",
            "insert",
            "https://are.na/block/1",
            "--into",
            "daily.md",
        ])
        .unwrap();

        match cli.command {
            Command::Insert { url, into, canvas, .. } => {
                assert_eq!(url.as_deref(), Some("https://are.na/block/1"));
                assert_eq!(into.as_deref(), Some("daily.md"));
                assert!(canvas.is_none());
            }
            _ => panic!("expected insert"),
        }
    }

    #[test]
    fn test_into_and_canvas_conflict() {
        let result = Cli::try_parse_from([
            "arena-importer",
            "insert",
            "--into",
            "a.md",
            "--canvas",
            "b.canvas",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_canvas_position() {
        let cli = Cli::try_parse_from([
            "arena-importer",
            "insert",
            "--canvas",
            "board.canvas",
            "--x",
            "-120",
            "--y",
            "40.5",
        ])
        .unwrap();

        match cli.command {
            Command::Insert { x, y, .. } => {
                assert_eq!(x, -120.0);
                assert_eq!(y, 40.5);
            }
            _ => panic!("expected insert"),
        }
    }
}
