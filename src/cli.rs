use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "slack-emoji-index")]
#[command(about = "Who uses which emoji in a Slack workspace")]
pub struct Cli {
    /// Log debug details (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file, defaults to ./settings.toml when present
    #[arg(short, long, global = true, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the per-user emoji report
    Report {
        /// Output format: markdown, html or json
        #[arg(short, long, default_value = "markdown")]
        format: String,

        /// Output file path, stdout when omitted
        #[arg(short, long)]
        output: Option<String>,

        /// Read users and conversations from a snapshot directory instead of Slack
        #[arg(short, long, value_name = "DIR")]
        snapshot: Option<PathBuf>,

        /// Only count messages from this date on (YYYY-MM-DD)
        #[arg(long)]
        since: Option<String>,
    },

    /// Save users and member-channel histories for offline reports
    ExportSnapshot {
        /// Output directory
        #[arg(short, long, default_value = "snapshot")]
        output: PathBuf,

        /// Only export messages from this date on (YYYY-MM-DD)
        #[arg(long)]
        since: Option<String>,
    },
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
    fn test_parse_report_defaults() {
        let cli = Cli::try_parse_from(["slack-emoji-index", "report"]).unwrap();

        assert!(!cli.verbose);
        assert!(cli.config.is_none());
        match cli.command {
            Commands::Report {
                format,
                output,
                snapshot,
                since,
            } => {
                assert_eq!(format, "markdown");
                assert!(output.is_none());
                assert!(snapshot.is_none());
                assert!(since.is_none());
            }
            Commands::ExportSnapshot { .. } => panic!("expected report"),
        }
    }

    #[test]
    fn test_parse_report_from_snapshot() {
        let cli = Cli::try_parse_from([
            "slack-emoji-index",
            "report",
            "--format",
            "html",
            "--snapshot",
            "snap",
            "-o",
            "index.html",
            "--config",
            "custom.toml",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        match cli.command {
            Commands::Report {
                format,
                output,
                snapshot,
                ..
            } => {
                assert_eq!(format, "html");
                assert_eq!(output.as_deref(), Some("index.html"));
                assert_eq!(snapshot, Some(PathBuf::from("snap")));
            }
            Commands::ExportSnapshot { .. } => panic!("expected report"),
        }
    }

    #[test]
    fn test_parse_export_snapshot() {
        let cli = Cli::try_parse_from([
            "slack-emoji-index",
            "-v",
            "export-snapshot",
            "--since",
            "2024-01-01",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::ExportSnapshot { output, since } => {
                assert_eq!(output, PathBuf::from("snapshot"));
                assert_eq!(since.as_deref(), Some("2024-01-01"));
            }
            Commands::Report { .. } => panic!("expected export-snapshot"),
        }
    }
}
