use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::emoji_index::Report;
use crate::error::{AppError, Result};
use crate::render::{OutputFormat, render};
use crate::settings::Settings;
use crate::{load_token, parse_date, slack, snapshot};

/// Where report input comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSource {
    /// The live workspace, read with `SLACK_TOKEN`
    Slack,
    /// A directory written by `export-snapshot`
    Snapshot(PathBuf),
}

impl ReportSource {
    pub fn from_snapshot_arg(snapshot: Option<PathBuf>) -> Self {
        match snapshot {
            Some(dir) => Self::Snapshot(dir),
            None => Self::Slack,
        }
    }
}

/// Compute a fresh report from `source`.
pub async fn generate_report(
    source: &ReportSource,
    settings: &Settings,
    since: Option<chrono::NaiveDate>,
) -> Result<Report> {
    match source {
        ReportSource::Slack => {
            let token = load_token()?;
            slack::fetch_report(&token, settings, since).await
        }
        ReportSource::Snapshot(dir) => {
            if since.is_some() {
                warn!("--since only applies when fetching from Slack, ignoring it for the snapshot");
            }
            snapshot::report_from_snapshot(dir, &settings.emoji_index())
        }
    }
}

pub async fn run_report(
    config: Option<&Path>,
    format: &str,
    output: Option<&str>,
    snapshot: Option<PathBuf>,
    since: Option<String>,
) -> Result<()> {
    let settings = Settings::load_from(config)?;
    let format: OutputFormat = format.parse()?;
    let since = since.as_deref().map(parse_date).transpose()?;
    let source = ReportSource::from_snapshot_arg(snapshot);

    let report = generate_report(&source, &settings, since).await?;
    let rendered = render(&report, format)?;

    match output {
        Some(path) => {
            fs::write(path, rendered).map_err(|e| AppError::WriteFile {
                path: path.to_string(),
                source: e,
            })?;
            info!(
                users = report.per_user.len(),
                path, "report written"
            );
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

pub async fn run_export_snapshot(
    config: Option<&Path>,
    output: &Path,
    since: Option<String>,
) -> Result<()> {
    let settings = Settings::load_from(config)?;
    let since = since.as_deref().map(parse_date).transpose()?;
    let token = load_token()?;

    let summary = slack::export_snapshot(&token, output, &settings, since).await?;

    println!(
        "Snapshot written to {}: {} users, {} channels, {} messages.",
        output.display(),
        summary.users,
        summary.channels,
        summary.messages
    );
    Ok(())
}
