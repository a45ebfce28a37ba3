use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::emoji_index::extract::{DEFAULT_EXCLUDED, DEFAULT_SKIN_TONE_MARKER};
use crate::emoji_index::report::DEFAULT_IGNORED_USERS;
use crate::emoji_index::{EmojiExtractor, EmojiIndex};
use crate::{AppError, Result};

pub const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub emoji: EmojiSettings,
    #[serde(default)]
    pub users: UserSettings,
    #[serde(default)]
    pub slack: SlackSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmojiSettings {
    /// Tokens that match `:name:` but are never emoji
    #[serde(default = "default_excluded")]
    pub excluded: Vec<String>,
    #[serde(default = "default_skin_tone_marker", rename = "skin-tone-marker")]
    pub skin_tone_marker: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Display names of service accounts left out of the report
    #[serde(default = "default_ignored")]
    pub ignored: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlackSettings {
    /// Messages fetched per channel; Slack's own default when unset
    #[serde(default, rename = "message-limit")]
    pub message_limit: Option<u16>,
    /// Channel histories fetched at the same time
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_excluded() -> Vec<String> {
    DEFAULT_EXCLUDED.iter().map(|s| s.to_string()).collect()
}

fn default_skin_tone_marker() -> String {
    DEFAULT_SKIN_TONE_MARKER.to_string()
}

fn default_ignored() -> Vec<String> {
    DEFAULT_IGNORED_USERS.iter().map(|s| s.to_string()).collect()
}

fn default_concurrency() -> usize {
    4
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for EmojiSettings {
    fn default() -> Self {
        Self {
            excluded: default_excluded(),
            skin_tone_marker: default_skin_tone_marker(),
        }
    }
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            ignored: default_ignored(),
        }
    }
}

impl Default for SlackSettings {
    fn default() -> Self {
        Self {
            message_limit: None,
            concurrency: default_concurrency(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Settings {
    /// Load `settings.toml` from the working directory, or defaults if it is missing.
    pub fn load() -> Result<Self> {
        let path = Path::new(SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Load the given file, or `settings.toml` when `path` is `None`.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| AppError::ReadFile {
            path: path.display().to_string(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| AppError::TomlParse(e.to_string()))
    }

    pub fn emoji_index(&self) -> EmojiIndex {
        EmojiIndex::new(
            EmojiExtractor::new(
                self.emoji.excluded.iter().cloned(),
                self.emoji.skin_tone_marker.clone(),
            ),
            self.users.ignored.clone(),
        )
    }

    /// At least one fetch in flight, whatever the file says.
    pub fn concurrency(&self) -> usize {
        self.slack.concurrency.max(1)
    }
}
