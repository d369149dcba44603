use bookshop_metrics::build_router;
use bookshop_metrics::config::ServerConfig;
use bookshop_metrics::services::catalog::{Catalog, HttpBookCatalog};
use bookshop_metrics::services::metrics::MetricsService;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookshop_metrics=info,tower_http=info".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let client = reqwest::Client::builder().build()?;
    let mut catalog = HttpBookCatalog::new(client, &config.books_api_url);
    if let Some(timeout) = config.upstream_timeout {
        catalog = catalog.with_timeout(timeout);
    }
    info!("Reading books from {}", catalog.url());

    let catalog: Catalog = Arc::new(catalog);
    let app = build_router(MetricsService::new(catalog));

    let addr = config.addr();
    info!("Bookshop metrics service starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
