// File context menu entry that opens an imported file's block on are.na.

use anyhow::{anyhow, Context as _, Result};

use crate::core::blocks::{block_id_from_file_name, block_page_url};
use crate::core::settings::ArenaSettings;
use crate::core::vault::VaultFile;

pub const MENU_TITLE: &str = "Open in Are.na";

/// The entry is only offered for files inside the import directory.
pub fn menu_applies(file: &VaultFile, settings: &ArenaSettings) -> bool {
    let dir_name = settings
        .target_directory
        .trim_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();

    match file.parent_name() {
        Some(parent) if !dir_name.is_empty() => parent.contains(dir_name),
        _ => false,
    }
}

/// Page of the block a file was imported from, derived from its base name.
pub fn block_page_for(file: &VaultFile) -> Option<String> {
    block_id_from_file_name(&file.name).map(|id| block_page_url(&id))
}

/// Open the block page with `opener` and return the URL that was opened.
pub fn open_in_arena<O>(file: &VaultFile, settings: &ArenaSettings, opener: O) -> Result<String>
where
    O: FnOnce(&str) -> std::io::Result<()>,
{
    if !menu_applies(file, settings) {
        return Err(anyhow!(
            "{} is not inside the Are.na directory `{}`",
            file.path,
            settings.target_directory
        ));
    }

    let url = block_page_for(file)
        .ok_or_else(|| anyhow!("{} is not named after an Are.na block", file.name))?;
    opener(&url).with_context(|| format!("Failed to open {}", url))?;
    tracing::info!(file = %file.path, url = %url, "Opened block in browser");
    Ok(url)
}
