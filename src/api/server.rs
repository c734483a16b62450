//! Dashboard server lifecycle: bind, spawn, and stop the axum server.
//!
//! bind → spawn background task → return handle with shutdown channel.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::api::router::dashboard_router;
use crate::backend::Backend;
use crate::config::DashboardConfig;

/// Metadata for a running dashboard server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSession {
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

/// Handle to a running dashboard server.
pub struct DashboardServer {
    pub session: DashboardSession,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl DashboardServer {
    /// Ask the server to stop; in-flight requests are allowed to finish.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Dashboard server shutdown signal sent");
        }
    }

    /// Wait for the server task to exit.
    pub async fn stopped(mut self) -> Result<(), String> {
        match self.task.take() {
            Some(task) => task
                .await
                .map_err(|e| format!("Dashboard server task failed: {e}")),
            None => Ok(()),
        }
    }
}

/// Bind `config.bind_addr` and serve the dashboard in a background task.
pub async fn start_dashboard_server(
    backend: Arc<dyn Backend>,
    config: DashboardConfig,
) -> Result<DashboardServer, String> {
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|e| format!("Failed to bind dashboard server on {}: {e}", config.bind_addr))?;

    let addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    let app = dashboard_router(backend, config);

    let session = DashboardSession {
        server_addr: addr.to_string(),
        port: addr.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Dashboard server received shutdown signal");
        };

        tracing::info!(%addr, "Dashboard server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Dashboard server error: {e}");
        }

        tracing::info!("Dashboard server stopped");
    });

    Ok(DashboardServer {
        session,
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    use crate::backend::{Resource, StaticBackend};
    use serde_json::json;

    fn ephemeral_config() -> DashboardConfig {
        DashboardConfig {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            ..DashboardConfig::default()
        }
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let backend = StaticBackend::new().with_json(
            Resource::Apl,
            json!([{ "codgeo": "01", "libgeo": "Ain", "an": 2023, "apl_mg_hmep": 2.5 }]),
        );
        let mut server = start_dashboard_server(Arc::new(backend), ephemeral_config())
            .await
            .expect("server should start");

        assert!(server.session.port > 0);
        assert!(!server.session.started_at.is_empty());

        let base = format!("http://127.0.0.1:{}", server.session.port);
        let health = reqwest::get(format!("{base}/health")).await.unwrap();
        assert!(health.status().is_success());
        assert_eq!(health.headers()["cache-control"], "no-store");

        let page = reqwest::get(format!("{base}/apl")).await.unwrap();
        assert!(page.status().is_success());
        assert!(page.text().await.unwrap().contains("Ain"));

        server.shutdown();
        server.stopped().await.unwrap();
    }

    #[tokio::test]
    async fn session_address_round_trips() {
        let mut server = start_dashboard_server(Arc::new(StaticBackend::new()), ephemeral_config())
            .await
            .unwrap();
        let addr: SocketAddr = server.session.server_addr.parse().unwrap();
        assert_eq!(addr.port(), server.session.port);
        assert!(addr.ip().is_loopback());
        server.shutdown();
    }

    #[tokio::test]
    async fn bind_conflict_is_reported() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = DashboardConfig {
            bind_addr: taken.local_addr().unwrap(),
            ..DashboardConfig::default()
        };
        let err = start_dashboard_server(Arc::new(StaticBackend::new()), config)
            .await
            .err()
            .unwrap();
        assert!(err.contains("Failed to bind dashboard server"));
    }
}
