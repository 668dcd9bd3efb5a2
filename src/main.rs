// This is the entry point of the Are.na importer.
//
// **Architecture Overview:**
// - `core/` = Import logic and capability traits (host-agnostic)
// - `infra/` = Implementations of core traits (Are.na API, vault on disk, settings file)
// - `host/` = Command line host (commands, prompt, settings panel)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Dispatch the requested command

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with several mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "host/host_layer.rs"]
mod host;
#[path = "infra/infra_layer.rs"]
mod infra;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::core::blocks::ArenaClient;
use crate::core::settings::{SettingsService, SettingsStore};
use crate::core::vault::{FileStore, VaultFile};
use crate::core::workspace::CanvasPoint;
use crate::host::cli::{Cli, Command, SettingsCommand};
use crate::host::commands::insert_block::insert_block;
use crate::host::commands::{open_block, register_commands, settings_panel};
use crate::host::commands::{CommandCatalog, CommandRegistry};
use crate::host::notices::ConsoleNotices;
use crate::host::workspace::{ActiveView, NoteEditor};
use crate::host::{ClientFactory, PluginContext};
use crate::infra::arena::{ArenaApiClient, DEFAULT_API_URL};
use crate::infra::canvas::JsonCanvas;
use crate::infra::settings::JsonSettingsStore;
use crate::infra::vault::{LocalVault, MemoryVault};

/// Plugin data file inside the vault, where the host keeps plugin settings.
const SETTINGS_FILE: &str = ".obsidian/plugins/arena/data.json";

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout only carries command output
    tracing_subscriber::fmt()
        .with_env_filter(load_env(None))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let vault_root = cli
        .vault
        .or_else(|| std::env::var_os("ARENA_VAULT").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    let settings_path = std::env::var_os("ARENA_SETTINGS_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| vault_root.join(SETTINGS_FILE));
    let api_url = std::env::var("ARENA_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================

    let mut settings = SettingsService::load(JsonSettingsStore::new(&settings_path))
        .await
        .with_context(|| format!("Failed to load settings from {}", settings_path.display()))?;

    // A token in the environment wins for this run but is never written back
    if let Ok(token) = std::env::var("ARENA_TOKEN") {
        settings.override_token(token);
    }

    let make_client: ClientFactory<ArenaApiClient> =
        Box::new(move |token| Ok(ArenaApiClient::new(token)?.with_base_url(api_url.as_str())));

    let mut registry = CommandCatalog::default();
    register_commands(&mut registry);

    let vault = LocalVault::new(&vault_root);
    tracing::debug!(
        vault = %vault.root().display(),
        settings = %settings_path.display(),
        "Loaded configuration"
    );

    match cli.command {
        Command::Insert {
            url,
            into,
            canvas,
            x,
            y,
            dry_run,
        } => {
            let view = match (into, canvas) {
                (Some(note), _) => ActiveView::Editor(NoteEditor::new(note)),
                (None, Some(canvas)) => {
                    let path = vault.resolve(&canvas)?;
                    ActiveView::Canvas(Box::new(JsonCanvas::new(path, CanvasPoint { x, y })))
                }
                (None, None) => ActiveView::Empty,
            };

            if dry_run {
                let ctx = PluginContext::new(settings, MemoryVault::new(), make_client)?;
                run_insert(&ctx, &registry, &view, url).await?;
                for (path, size) in ctx.importer.store().listing() {
                    println!("would write {} ({} bytes)", path, size);
                }
            } else {
                let ctx = PluginContext::new(settings, vault, make_client)?;
                ctx.on_layout_ready()
                    .await
                    .context("Failed to create the import directory")?;
                if let Some(file) = run_insert(&ctx, &registry, &view, url).await? {
                    println!("{}", file.path);
                }
            }
        }
        Command::Open { file } => {
            let file = VaultFile::new(file);
            let url = open_block::open_in_arena(&file, settings.settings(), |url| {
                open::that(url)
            })?;
            println!("{}", url);
        }
        Command::Settings(command) => {
            let mut ctx = PluginContext::new(settings, vault, make_client)?;
            match command {
                SettingsCommand::Show => {
                    println!("{}", settings_panel::describe(ctx.settings()));
                    println!();
                    println!("{}", settings_panel::token_settings_message());
                }
                SettingsCommand::SetToken { token } => {
                    settings_panel::set_token(&mut ctx, &token).await?;
                    println!("Saved token.");
                }
                SettingsCommand::Logout => {
                    settings_panel::logout(&mut ctx).await?;
                    println!("Cleared token.");
                }
                SettingsCommand::SetDir { dir } => {
                    settings_panel::set_target_directory(&mut ctx, &dir).await?;
                    println!("Importing into {}", ctx.settings().target_directory);
                }
            }
        }
        Command::Commands => {
            for command in registry.commands() {
                println!("{:<28} {}", command.id.as_str(), command.name);
            }
            println!("{:<28} {}", "file-menu", open_block::MENU_TITLE);
        }
    }

    Ok(())
}

/// Load environment variables from a .env file (if it exists), then build the
/// log filter so `RUST_LOG` may come from that file too.
fn load_env(dotenv_file: Option<&Path>) -> EnvFilter {
    if let Some(path) = dotenv_file {
        dotenv::from_path(path).ok();
    } else {
        dotenv::dotenv().ok();
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

async fn run_insert<C, F, S>(
    ctx: &PluginContext<C, F, S>,
    registry: &CommandCatalog,
    view: &ActiveView,
    url: Option<String>,
) -> Result<Option<VaultFile>>
where
    C: ArenaClient,
    F: FileStore,
    S: SettingsStore,
{
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    insert_block(ctx, registry, view, url, stdin, &ConsoleNotices).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_log_filter_reads_dotenv_file() {
        // A variable already in the environment wins over the file.
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "RUST_LOG=arena_importer=trace\n").unwrap();

        let filter = load_env(Some(&path));

        assert_eq!(filter.to_string(), "arena_importer=trace");
    }
}
