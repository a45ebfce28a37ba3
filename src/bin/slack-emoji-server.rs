//! Slack Emoji Server - HTTP server for the emoji usage report
//!
//! Serves the per-user emoji report as an HTML page and as JSON. The report
//! is rebuilt from Slack (or from a snapshot directory) on every request.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use slack_emoji_index::report_server::{FailureKind, ReportService};
use slack_emoji_index::{AppError, Settings, logging, render};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Slack Emoji Server - HTTP server for the emoji usage report
#[derive(Parser)]
#[command(name = "slack-emoji-server")]
#[command(about = "HTTP server for the Slack emoji usage report")]
#[command(version)]
struct Cli {
    /// Log debug details (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Settings file (TOML), defaults to ./settings.toml when present
        #[arg(short, long, value_name = "CONFIG_FILE")]
        config: Option<PathBuf>,

        /// Serve reports from a snapshot directory instead of Slack
        #[arg(short, long, value_name = "DIR")]
        snapshot: Option<PathBuf>,
    },
}

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    service: Arc<ReportService>,
}

/// Error response
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl ErrorResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

fn error_response(err: AppError) -> Response {
    error!("report failed: {}", err);
    let status = match FailureKind::of(&err) {
        FailureKind::Upstream => StatusCode::BAD_GATEWAY,
        FailureKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse::new(err.to_string()))).into_response()
}

/// Handler for GET /
async fn get_index(State(state): State<AppState>) -> Response {
    let report = match state.service.report().await {
        Ok(report) => report,
        Err(e) => return error_response(e),
    };
    match render::render_html(&report) {
        Ok(html) => Html(html).into_response(),
        Err(e) => error_response(e),
    }
}

/// Handler for GET /report.json
async fn get_report_json(State(state): State<AppState>) -> Response {
    match state.service.report().await {
        Ok(report) => Json(report).into_response(),
        Err(e) => error_response(e),
    }
}

/// Build the router with all report endpoints
fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(get_index))
        .route("/report.json", get(get_report_json))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);
    slack_emoji_index::install_crypto_provider();

    match cli.command {
        Commands::Serve { config, snapshot } => {
            if let Err(e) = run_server(config, snapshot).await {
                error!("{}", e);
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

async fn run_server(
    config: Option<PathBuf>,
    snapshot: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load_from(config.as_deref())?;
    let service = ReportService::from_snapshot_dir(snapshot.clone(), settings);
    let addr: SocketAddr = service.bind_address().parse()?;

    let state = AppState {
        service: Arc::new(service),
    };
    let app = build_router(state);

    info!(%addr, "starting Slack Emoji Server");
    match snapshot {
        Some(dir) => info!(dir = %dir.display(), "serving reports from snapshot"),
        None => info!("serving reports from the live workspace"),
    }
    info!("endpoints: GET / (HTML report), GET /report.json");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
