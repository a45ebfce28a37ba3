pub mod cli;
pub mod commands;
pub mod emoji_index;
pub mod error;
pub mod logging;
pub mod render;
pub mod report_server;
pub mod settings;
pub mod slack;
pub mod snapshot;

pub use cli::{Cli, Commands};
pub use commands::{run_export_snapshot, run_report};
pub use emoji_index::{EmojiIndex, Report};
pub use error::{AppError, Result};
pub use render::OutputFormat;
pub use settings::Settings;

use chrono::NaiveDate;

pub fn load_token() -> Result<String> {
    std::env::var("SLACK_TOKEN").map_err(|_| AppError::MissingToken)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// Select the rustls crypto provider used by the Slack client's HTTPS connector.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(matches!(
            parse_date("15/01/2024"),
            Err(AppError::InvalidDate(s)) if s == "15/01/2024"
        ));
    }

    #[test]
    fn test_install_crypto_provider_twice() {
        install_crypto_provider();
        install_crypto_provider();
    }
}
