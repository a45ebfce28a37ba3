//! Offline input for reports.
//!
//! A snapshot directory holds `users.json` (Slack user objects) and
//! `conversations.json` (`{channel_id, channel_name, messages}` per channel),
//! as written by `export-snapshot`.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::emoji_index::{EmojiIndex, RawMessage, RawUser, Report};
use crate::{AppError, Result};

pub const USERS_FILE: &str = "users.json";
pub const CONVERSATIONS_FILE: &str = "conversations.json";

/// The messages of one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMessages {
    pub id: String,
    pub name: String,
    pub messages: Vec<RawMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub users: Vec<RawUser>,
    pub channels: Vec<ChannelMessages>,
}

impl Snapshot {
    pub fn message_count(&self) -> usize {
        self.channels.iter().map(|c| c.messages.len()).sum()
    }

    pub fn report(&self, index: &EmojiIndex) -> Report {
        index.report_from_channels(
            &self.users,
            self.channels.iter().map(|c| c.messages.as_slice()),
        )
    }
}

fn read_json_array(path: &Path) -> Result<Vec<serde_json::Value>> {
    let file = File::open(path).map_err(|e| AppError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| AppError::JsonParse(format!("{}: {}", path.display(), e)))
}

pub(crate) fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let file = File::create(path).map_err(|e| AppError::WriteFile {
        path: path.display().to_string(),
        source: e,
    })?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, data).map_err(|e| AppError::JsonSerialize(e.to_string()))?;
    Ok(())
}

/// Read the users of a snapshot, dropping entries without an id or a name.
pub fn load_users(path: &Path) -> Result<Vec<RawUser>> {
    let users: Vec<RawUser> = read_json_array(path)?
        .iter()
        .filter_map(RawUser::from_slack_json)
        .collect();
    if users.is_empty() {
        return Err(AppError::EmptyDirectory("users"));
    }
    Ok(users)
}

pub fn load_conversations(path: &Path) -> Result<Vec<ChannelMessages>> {
    let channels = read_json_array(path)?
        .into_iter()
        .filter_map(|conversation| {
            let id = conversation.get("channel_id")?.as_str()?.to_string();
            let name = conversation
                .get("channel_name")
                .and_then(|n| n.as_str())
                .unwrap_or("unknown")
                .to_string();
            let messages = conversation
                .get("messages")?
                .as_array()?
                .iter()
                .map(RawMessage::from_slack_json)
                .collect();
            Some(ChannelMessages { id, name, messages })
        })
        .collect();
    Ok(channels)
}

pub fn load_snapshot(dir: &Path) -> Result<Snapshot> {
    let users = load_users(&dir.join(USERS_FILE))?;
    let channels = load_conversations(&dir.join(CONVERSATIONS_FILE))?;

    let snapshot = Snapshot { users, channels };
    debug!(
        users = snapshot.users.len(),
        channels = snapshot.channels.len(),
        messages = snapshot.message_count(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

/// Build a report from the snapshot stored in `dir`.
pub fn report_from_snapshot(dir: &Path, index: &EmojiIndex) -> Result<Report> {
    let snapshot = load_snapshot(dir)?;
    let report = snapshot.report(index);
    info!(
        dir = %dir.display(),
        users = report.per_user.len(),
        "report ready"
    );
    Ok(report)
}
