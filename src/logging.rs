//! Tracing setup shared by the binaries.
//!
//! Logs go to stderr so report output on stdout stays clean.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks between debug and info
/// for this crate. Calling it twice is a no-op.
pub fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}

fn default_directive(level: Level) -> String {
    let level = level.as_str().to_lowercase();
    format!("warn,slack_emoji_index={level},slack_emoji_server={level},tower_http={level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(
            default_directive(Level::INFO),
            "warn,slack_emoji_index=info,slack_emoji_server=info,tower_http=info"
        );
        assert!(default_directive(Level::DEBUG).contains("slack_emoji_index=debug"));
    }

    #[test]
    fn test_init_tracing_twice_does_not_panic() {
        init_tracing(false);
        init_tracing(true);
    }
}
