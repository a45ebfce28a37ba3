use clap::Parser;
use slack_emoji_index::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    slack_emoji_index::logging::init_tracing(cli.verbose);
    slack_emoji_index::install_crypto_provider();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Report {
            format,
            output,
            snapshot,
            since,
        } => {
            slack_emoji_index::run_report(config, &format, output.as_deref(), snapshot, since).await
        }
        Commands::ExportSnapshot { output, since } => {
            slack_emoji_index::run_export_snapshot(config, &output, since).await
        }
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
