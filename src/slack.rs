use std::path::Path;

use chrono::NaiveDate;
use futures::{StreamExt, TryStreamExt, stream};
use serde::Serialize;
use slack_morphism::prelude::*;
use tracing::{debug, info, warn};

use crate::emoji_index::{RawChannel, RawMessage, RawUser, Report, UserTallies};
use crate::settings::Settings;
use crate::snapshot::{CONVERSATIONS_FILE, USERS_FILE, write_json};
use crate::{AppError, Result};

type Session<'a> = SlackClientSession<'a, SlackClientHyperHttpsConnector>;

/// Counts reported after writing a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotSummary {
    pub users: usize,
    pub channels: usize,
    pub messages: usize,
}

#[derive(Serialize)]
struct ConversationExport {
    channel_id: String,
    channel_name: String,
    messages: Vec<SlackHistoryMessage>,
}

fn open_client() -> Result<SlackHyperClient> {
    let connector =
        SlackClientHyperConnector::new().map_err(|e| AppError::SlackApi(e.to_string()))?;
    Ok(SlackClient::new(connector))
}

fn api_token(token: &str) -> SlackApiToken {
    SlackApiToken::new(SlackApiTokenValue(token.to_string()))
}

fn next_cursor(metadata: Option<SlackResponseMetadata>) -> Option<SlackCursorId> {
    metadata
        .and_then(|meta| meta.next_cursor)
        .filter(|cursor| !cursor.0.is_empty())
}

fn date_to_slack_ts(date: NaiveDate) -> SlackTs {
    let timestamp = date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
    SlackTs(format!("{}.000000", timestamp))
}

fn raw_channel(channel: &SlackChannelInfo) -> RawChannel {
    RawChannel {
        id: channel.id.0.clone(),
        name: channel.name.clone().unwrap_or_else(|| "unknown".to_string()),
        is_member: channel.flags.is_member.unwrap_or(false),
    }
}

fn raw_message(message: &SlackHistoryMessage) -> RawMessage {
    RawMessage {
        user: message.sender.user.as_ref().map(|user| user.0.clone()),
        text: message.content.text.clone(),
    }
}

/// Validate Slack users through the same JSON boundary snapshots use.
fn raw_users(users: &[SlackUser]) -> Result<Vec<RawUser>> {
    let mut raw = Vec::with_capacity(users.len());
    for user in users {
        let value = serde_json::to_value(user).map_err(|e| AppError::JsonSerialize(e.to_string()))?;
        match RawUser::from_slack_json(&value) {
            Some(user) => raw.push(user),
            None => debug!(id = %user.id.0, "skipping user without a usable name"),
        }
    }
    Ok(raw)
}

/// List every non-archived public and private channel the token can see.
async fn fetch_channels(session: &Session<'_>) -> Result<Vec<RawChannel>> {
    let mut channels = Vec::new();
    let mut cursor: Option<SlackCursorId> = None;

    loop {
        let request = SlackApiConversationsListRequest::new()
            .with_limit(200)
            .with_exclude_archived(true)
            .with_types(vec![
                SlackConversationType::Public,
                SlackConversationType::Private,
            ])
            .opt_cursor(cursor);

        let response = session
            .conversations_list(&request)
            .await
            .map_err(|e| AppError::SlackApi(e.to_string()))?;

        channels.extend(response.channels.iter().map(raw_channel));

        cursor = next_cursor(response.response_metadata);
        if cursor.is_none() {
            break;
        }
    }

    Ok(channels)
}

/// Channels the token's user belongs to.
///
/// Fails with [`AppError::EmptyDirectory`] when Slack lists no channels at all,
/// which usually means the token is wrong.
async fn fetch_member_channels(session: &Session<'_>) -> Result<Vec<RawChannel>> {
    let channels = fetch_channels(session).await?;
    if channels.is_empty() {
        return Err(AppError::EmptyDirectory("channels"));
    }

    let total = channels.len();
    let members: Vec<RawChannel> = channels.into_iter().filter(|c| c.is_member).collect();
    info!(total, member = members.len(), "listed channels");
    if members.is_empty() {
        warn!("the token's user is not a member of any channel");
    }

    Ok(members)
}

/// One page of history, newest first, optionally starting at `oldest`.
async fn fetch_channel_messages(
    session: &Session<'_>,
    channel: &RawChannel,
    limit: Option<u16>,
    oldest: Option<NaiveDate>,
) -> Result<Vec<SlackHistoryMessage>> {
    let request = SlackApiConversationsHistoryRequest::new()
        .with_channel(SlackChannelId(channel.id.clone()))
        .opt_limit(limit)
        .opt_oldest(oldest.map(date_to_slack_ts));

    let response = session
        .conversations_history(&request)
        .await
        .map_err(|e| AppError::SlackApi(format!("#{}: {}", channel.name, e)))?;

    debug!(channel = %channel.name, messages = response.messages.len(), "fetched history");
    Ok(response.messages)
}

async fn fetch_users(session: &Session<'_>) -> Result<Vec<SlackUser>> {
    let mut users = Vec::new();
    let mut cursor: Option<SlackCursorId> = None;

    loop {
        let request = SlackApiUsersListRequest::new()
            .with_limit(200)
            .opt_cursor(cursor);

        let response = session
            .users_list(&request)
            .await
            .map_err(|e| AppError::SlackApi(e.to_string()))?;

        users.extend(response.members);

        cursor = next_cursor(response.response_metadata);
        if cursor.is_none() {
            break;
        }
    }

    if users.is_empty() {
        return Err(AppError::EmptyDirectory("users"));
    }
    info!(count = users.len(), "listed users");
    Ok(users)
}

/// Build the emoji report from the live workspace.
///
/// Channel histories are fetched `settings.slack.concurrency` at a time and
/// their tallies merged in channel order.
pub async fn fetch_report(
    token: &str,
    settings: &Settings,
    since: Option<NaiveDate>,
) -> Result<Report> {
    let client = open_client()?;
    let token = api_token(token);
    let session = client.open_session(&token);

    let users = raw_users(&fetch_users(&session).await?)?;
    let channels = fetch_member_channels(&session).await?;

    let index = settings.emoji_index();
    let limit = settings.slack.message_limit;

    let tallies = stream::iter(channels.iter().cloned())
        .map(|channel| {
            let session = &session;
            let index = &index;
            async move {
                let messages = fetch_channel_messages(session, &channel, limit, since).await?;
                let messages: Vec<RawMessage> = messages.iter().map(raw_message).collect();
                Ok::<_, AppError>(index.tally_channel(&messages))
            }
        })
        .buffered(settings.concurrency())
        .try_fold(UserTallies::new(), |acc, tally| async move {
            Ok(acc.merge(tally))
        })
        .await?;

    let report = index.report(&users, &tallies);
    info!(
        channels = channels.len(),
        users = report.per_user.len(),
        "report ready"
    );
    Ok(report)
}

/// Write `users.json` and `conversations.json` for the member channels into `dir`.
pub async fn export_snapshot(
    token: &str,
    dir: &Path,
    settings: &Settings,
    since: Option<NaiveDate>,
) -> Result<SnapshotSummary> {
    let client = open_client()?;
    let token = api_token(token);
    let session = client.open_session(&token);

    let users = fetch_users(&session).await?;
    let channels = fetch_member_channels(&session).await?;
    let limit = settings.slack.message_limit;

    let conversations: Vec<ConversationExport> = stream::iter(channels.iter().cloned())
        .map(|channel| {
            let session = &session;
            async move {
                let messages = fetch_channel_messages(session, &channel, limit, since).await?;
                Ok::<_, AppError>(ConversationExport {
                    channel_id: channel.id,
                    channel_name: channel.name,
                    messages,
                })
            }
        })
        .buffered(settings.concurrency())
        .try_collect()
        .await?;

    std::fs::create_dir_all(dir).map_err(|e| AppError::WriteFile {
        path: dir.display().to_string(),
        source: e,
    })?;
    write_json(&dir.join(USERS_FILE), &users)?;
    write_json(&dir.join(CONVERSATIONS_FILE), &conversations)?;

    let summary = SnapshotSummary {
        users: users.len(),
        channels: conversations.len(),
        messages: conversations.iter().map(|c| c.messages.len()).sum(),
    };
    info!(?summary, dir = %dir.display(), "snapshot written");
    Ok(summary)
}
