pub mod api;
pub mod backend;
pub mod color;
pub mod config;
pub mod dashboard;
pub mod merge;
pub mod metrics;
pub mod models;
pub mod render;
pub mod stats;
pub mod view;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::backend::HttpBackend;
use crate::config::DashboardConfig;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Start the dashboard and serve until Ctrl-C.
pub async fn run() -> Result<(), String> {
    init_tracing();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = DashboardConfig::from_env().map_err(|e| e.to_string())?;
    tracing::info!(
        backend = %config.backend_url,
        boundaries = %config.boundaries_path.display(),
        timeout_secs = config.request_timeout.as_secs(),
        "Configuration loaded"
    );

    let backend = HttpBackend::new(&config)
        .map_err(|e| format!("Cannot build HTTP client: {e}"))?;

    let mut server = api::start_dashboard_server(Arc::new(backend), config).await?;
    tracing::info!(addr = %server.session.server_addr, "Dashboard ready");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for shutdown signal: {e}");
    }

    server.shutdown();
    server.stopped().await
}
