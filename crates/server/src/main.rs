//! Emojibot - announces new custom emoji in a Slack channel.
//!
//! Listens for Slack Events API webhooks, verifies each request's
//! signature, and posts a "New emoji" message with an image preview when
//! an emoji is added to the workspace.
//!
//! # Usage
//!
//! ```bash
//! # Standalone HTTP listener
//! emojibot --mode http --listen-addr 127.0.0.1:1234
//!
//! # AWS Lambda behind an HTTP trigger (the default)
//! emojibot
//! ```
//!
//! # Configuration
//!
//! `SLACK_SIGNING_SECRET`, `SLACK_TOKEN`, and `SLACK_CHANNEL_ID` are
//! required, from the environment or from SSM under `SSM_PATH`. Missing
//! secrets abort startup.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use axum::Router;
use clap::{Parser, ValueEnum};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use emojibot_server::config::Config;
use emojibot_server::routes;
use emojibot_server::secrets::SecretStore;
use emojibot_server::state::AppState;

#[derive(Parser)]
#[command(name = "emojibot")]
#[command(version, about = "Posts new custom emoji to a Slack channel")]
struct Cli {
    /// Execution mode
    #[arg(long, value_enum, default_value = "lambda")]
    mode: Mode,

    /// Host/port to listen on (http mode only)
    #[arg(long, default_value = "127.0.0.1:1234")]
    listen_addr: SocketAddr,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Standalone HTTP listener
    Http,
    /// AWS Lambda HTTP trigger adapter
    Lambda,
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_tracing(cli.mode);

    // Resolve secrets once; a miss here is fatal before we listen.
    let secrets = SecretStore::from_env().await;
    let config = match Config::load(&secrets).await {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            std::process::exit(1);
        }
    };

    let state = AppState::new(&config);

    let app = routes::router()
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .with_state(state);

    match cli.mode {
        Mode::Http => serve_http(app, cli.listen_addr).await,
        Mode::Lambda => serve_lambda(app).await,
    }
}

/// Initialize tracing with `EnvFilter`.
///
/// Defaults to info level for our crates if `RUST_LOG` is not set. Lambda
/// mode logs JSON for CloudWatch parsing; http mode logs text.
fn init_tracing(mode: Mode) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "emojibot_server=info,tower_http=debug".into());

    let is_lambda = matches!(mode, Mode::Lambda);
    let json_layer = is_lambda.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!is_lambda).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

/// Run as a standalone listener bound to an address.
async fn serve_http(app: Router, addr: SocketAddr) {
    tracing::info!("emojibot listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Run behind the Lambda HTTP trigger adapter.
async fn serve_lambda(app: Router) {
    tracing::info!("emojibot starting in lambda mode");

    lambda_http::run(app).await.expect("Lambda runtime error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
