use anyhow::Result;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use agents_ui_proxy::config::Config;
use agents_ui_proxy::routes;
use agents_ui_proxy::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("agents_ui_proxy=debug,tower_http=debug")),
        )
        .init();

    let config = Config::resolve()?;
    info!("Agents service: {}", config.agents_url);
    info!(
        "Serving UI from {} (upstream timeout {}s)",
        config.static_dir.display(),
        config.upstream_timeout_secs
    );

    let index = config.index_path();
    if !index.is_file() {
        warn!("UI entry document {} not found; GET / will return 404", index.display());
    }

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Starting server on {}", listener.local_addr()?);

    let app = routes::app(AppState::new(config)?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}
