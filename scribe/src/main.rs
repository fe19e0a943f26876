use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scribe::api::{create_router, AppState};
use scribe::config::Config;
use scribe::ocr::LANGUAGES;
use scribe::storage::UploadStore;

#[derive(Parser)]
#[command(name = "scribe")]
#[command(about = "HTTP front end for Tesseract OCR")]
struct Args {
    /// Address to bind, overrides SCRIBE_HOST
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overrides PORT
    #[arg(long)]
    port: Option<u16>,

    /// Directory for temporary uploads, overrides UPLOAD_DIR
    #[arg(long)]
    upload_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scribe=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(upload_dir) = args.upload_dir {
        config.storage.upload_dir = upload_dir;
    }

    let store = UploadStore::init(&config.storage.upload_dir).await?;

    let state = AppState::new(config.clone(), store);

    tracing::info!(
        "Using OCR engine: {} (languages {})...",
        state.engine.binary(),
        LANGUAGES
    );
    if !state.engine.is_available().await {
        tracing::warn!(
            "OCR engine '{}' is not runnable - uploads will fail until it is installed",
            state.engine.binary()
        );
    }

    let app = create_router(state);

    let addr = config.bind_addr();
    tracing::info!("Scribe starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining in-flight requests...");
}
