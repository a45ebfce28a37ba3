use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("SLACK_TOKEN environment variable not set")]
    MissingToken,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid date format: {0}")]
    InvalidDate(String),

    #[error("Slack API error: {0}")]
    SlackApi(String),

    #[error("Slack returned no {0}, check the token and its scopes")]
    EmptyDirectory(&'static str),

    #[error("failed to read file at {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write file at {path}: {source}")]
    WriteFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("JSON serialization error: {0}")]
    JsonSerialize(String),

    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("invalid output format: {0}")]
    InvalidFormat(String),

    #[error("markdown conversion error: {0}")]
    MarkdownConvert(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_missing_token_display() {
        let err = AppError::MissingToken;
        assert_eq!(err.to_string(), "SLACK_TOKEN environment variable not set");
    }

    #[test]
    fn test_io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: AppError = io_err.into();
        assert!(matches!(err, AppError::Io(_)));
        assert!(err.to_string().starts_with("IO error:"));
    }

    #[test]
    fn test_invalid_date_display() {
        let err = AppError::InvalidDate("not-a-date".to_string());
        assert_eq!(err.to_string(), "invalid date format: not-a-date");
    }

    #[test]
    fn test_slack_api_display() {
        let err = AppError::SlackApi("invalid_auth".to_string());
        assert_eq!(err.to_string(), "Slack API error: invalid_auth");
    }

    #[test]
    fn test_empty_directory_display() {
        let err = AppError::EmptyDirectory("users");
        assert_eq!(
            err.to_string(),
            "Slack returned no users, check the token and its scopes"
        );
    }

    #[test]
    fn test_read_file_display_and_source() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err = AppError::ReadFile {
            path: "/path/to/users.json".to_string(),
            source: io_err,
        };
        assert!(err.to_string().contains("/path/to/users.json"));
        assert!(err.to_string().contains("failed to read file"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_write_file_display_and_source() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
        let err = AppError::WriteFile {
            path: "/path/to/report.html".to_string(),
            source: io_err,
        };
        assert!(err.to_string().contains("/path/to/report.html"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_invalid_format_display() {
        let err = AppError::InvalidFormat("yaml".to_string());
        assert_eq!(err.to_string(), "invalid output format: yaml");
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AppError>();
    }
}
