//! Report service behind the `slack-emoji-server` binary.
//!
//! Kept apart from the HTTP handlers so the request logic can be tested
//! without a server. Every call recomputes the report; nothing is cached
//! between requests.

use std::path::PathBuf;

use crate::commands::{ReportSource, generate_report};
use crate::emoji_index::Report;
use crate::settings::Settings;
use crate::{AppError, Result};

/// Failure classes the HTTP layer maps to status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Slack (or the snapshot standing in for it) could not provide data
    Upstream,
    /// Local configuration (including a missing token) or I/O problem
    Internal,
}

impl FailureKind {
    pub fn of(err: &AppError) -> Self {
        match err {
            AppError::SlackApi(_) | AppError::EmptyDirectory(_) => Self::Upstream,
            _ => Self::Internal,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportService {
    source: ReportSource,
    settings: Settings,
}

impl ReportService {
    pub fn new(source: ReportSource, settings: Settings) -> Self {
        Self { source, settings }
    }

    pub fn from_snapshot_dir(dir: Option<PathBuf>, settings: Settings) -> Self {
        Self::new(ReportSource::from_snapshot_arg(dir), settings)
    }

    pub fn source(&self) -> &ReportSource {
        &self.source
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// `host:port` from the `[server]` settings.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.settings.server.host, self.settings.server.port)
    }

    pub async fn report(&self) -> Result<Report> {
        generate_report(&self.source, &self.settings, None).await
    }
}
