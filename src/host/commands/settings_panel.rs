// Settings panel: the access token and the import directory.
// Every change is persisted right away and the Are.na client is rebuilt.

use anyhow::{Context as _, Result};

use crate::core::blocks::ArenaClient;
use crate::core::settings::{ArenaSettings, SettingsStore};
use crate::core::vault::FileStore;
use crate::host::context::PluginContext;

pub const TOKEN_SETTING_NAME: &str = "Are.na Personal Access Token (optional)";
pub const TOKEN_APPLICATIONS_URL: &str = "https://dev.are.na/oauth/applications";
pub const TOKEN_GUIDE_URL: &str =
    "https://github.com/0xroko/obsidian-arena-plugin#create-your-are.na-personal-access-token";

/// Help text shown next to the token field.
pub fn token_settings_message() -> String {
    format!(
        "Visit the Are.na API ({}) to get your personal access token.\n\
         You will have to create a new application and copy the `Personal Access Token`.\n\
         For a detailed guide, check out the instructions on creating your \
         Personal Access Token ({}).",
        TOKEN_APPLICATIONS_URL, TOKEN_GUIDE_URL
    )
}

/// Human readable summary of the settings. The token is masked.
pub fn describe(settings: &ArenaSettings) -> String {
    let token = match settings.token() {
        Some(token) => mask_token(token),
        None => "(not set)".to_string(),
    };
    format!(
        "{}: {}\nImport directory: {}",
        TOKEN_SETTING_NAME, token, settings.target_directory
    )
}

fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}

pub async fn set_token<C, F, S>(ctx: &mut PluginContext<C, F, S>, value: &str) -> Result<()>
where
    C: ArenaClient,
    F: FileStore,
    S: SettingsStore,
{
    ctx.settings
        .set_token(value)
        .await
        .context("Failed to save the Are.na token")?;
    ctx.init_client().context("Failed to rebuild the Are.na client")?;
    Ok(())
}

pub async fn logout<C, F, S>(ctx: &mut PluginContext<C, F, S>) -> Result<()>
where
    C: ArenaClient,
    F: FileStore,
    S: SettingsStore,
{
    ctx.settings
        .logout()
        .await
        .context("Failed to clear the Are.na token")?;
    ctx.init_client().context("Failed to rebuild the Are.na client")?;
    Ok(())
}

/// Change the import directory and create it in the vault.
pub async fn set_target_directory<C, F, S>(
    ctx: &mut PluginContext<C, F, S>,
    dir: &str,
) -> Result<()>
where
    C: ArenaClient,
    F: FileStore,
    S: SettingsStore,
{
    ctx.settings
        .set_target_directory(dir)
        .await
        .context("Failed to save the import directory")?;
    ctx.on_layout_ready()
        .await
        .context("Failed to create the import directory")?;
    Ok(())
}
