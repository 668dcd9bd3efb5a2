use serde::{Deserialize, Serialize};

pub const DEFAULT_TARGET_DIRECTORY: &str = "are.na";

/// Persisted plugin settings.
///
/// Keys missing from the stored blob fall back to [`ArenaSettings::default`].
/// The `arenaToken` / `arenaDir` keys written by older releases are still read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    #[serde(rename = "accessToken", alias = "arenaToken")]
    pub access_token: Option<String>,
    #[serde(rename = "targetDirectory", alias = "arenaDir")]
    pub target_directory: String,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            access_token: None,
            target_directory: DEFAULT_TARGET_DIRECTORY.to_string(),
        }
    }
}

impl ArenaSettings {
    /// Whether a non-blank token is configured.
    pub fn has_token(&self) -> bool {
        self.access_token
            .as_deref()
            .is_some_and(|token| !token.trim().is_empty())
    }

    /// The token to send, ignoring blank values.
    pub fn token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}
