//! Fetch layer for the REST backend.
//!
//! One GET per resource, JSON array expected, single attempt: no retry and no
//! backoff. `Backend` is the seam between the views and the network so views
//! can be exercised against canned payloads (`StaticBackend`).

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use futures_util::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::config::DashboardConfig;
use crate::models::geo::FeatureCollection;

/// Every dataset a view may need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Apl,
    Passages,
    Doctors,
    DepartmentStats,
    ActiveRetirees,
    Over55,
    /// GeoJSON department outlines (static file, not a REST endpoint).
    Boundaries,
}

impl Resource {
    /// Path relative to the backend base URL; `None` for resources read from disk.
    pub fn path(&self) -> Option<&'static str> {
        match self {
            Resource::Apl => Some("/api/apl-dep"),
            Resource::Passages => Some("/api/passages"),
            Resource::Doctors => Some("/api/medecins_dep"),
            Resource::DepartmentStats => Some("/api/test-db"),
            Resource::ActiveRetirees => Some("/api/medecins-retraites-actifs"),
            Resource::Over55 => Some("/api/part-medecins-sup-55"),
            Resource::Boundaries => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Apl => "apl",
            Resource::Passages => "passages",
            Resource::Doctors => "doctors",
            Resource::DepartmentStats => "department_stats",
            Resource::ActiveRetirees => "active_retirees",
            Resource::Over55 => "over_55",
            Resource::Boundaries => "boundaries",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Backend unreachable for {resource}: {detail}")]
    Network { resource: Resource, detail: String },

    #[error("Request for {resource} timed out")]
    Timeout { resource: Resource },

    #[error("Backend returned status {status} for {resource}")]
    Status { resource: Resource, status: u16 },

    #[error("Malformed payload for {resource}: {detail}")]
    Parse { resource: Resource, detail: String },

    #[error("Cannot read {resource}: {source}")]
    Io {
        resource: Resource,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub fn resource(&self) -> Resource {
        match self {
            FetchError::Network { resource, .. }
            | FetchError::Timeout { resource }
            | FetchError::Status { resource, .. }
            | FetchError::Parse { resource, .. }
            | FetchError::Io { resource, .. } => *resource,
        }
    }

    /// Short machine label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network { .. } => "network",
            FetchError::Timeout { .. } => "timeout",
            FetchError::Status { .. } => "status",
            FetchError::Parse { .. } => "parse",
            FetchError::Io { .. } => "io",
        }
    }
}

/// Source of raw JSON payloads.
pub trait Backend: Send + Sync {
    fn fetch(&self, resource: Resource) -> BoxFuture<'_, Result<Value, FetchError>>;
}

/// Fetch `resource` and decode it as an array of `T`.
pub async fn fetch_records<T>(backend: &dyn Backend, resource: Resource) -> Result<Vec<T>, FetchError>
where
    T: DeserializeOwned,
{
    tracing::debug!(%resource, "Fetching resource");
    let payload = backend.fetch(resource).await.inspect_err(|e| {
        tracing::warn!(%resource, kind = e.kind(), error = %e, "Fetch failed");
    })?;
    decode_records(resource, payload)
}

/// Fetch and decode the department boundaries.
pub async fn fetch_boundaries(backend: &dyn Backend) -> Result<FeatureCollection, FetchError> {
    let resource = Resource::Boundaries;
    let payload = backend.fetch(resource).await.inspect_err(|e| {
        tracing::warn!(%resource, kind = e.kind(), error = %e, "Boundary load failed");
    })?;
    serde_json::from_value(payload).map_err(|e| FetchError::Parse {
        resource,
        detail: e.to_string(),
    })
}

/// Decode a payload that must be a JSON array.
pub fn decode_records<T>(resource: Resource, payload: Value) -> Result<Vec<T>, FetchError>
where
    T: DeserializeOwned,
{
    if !payload.is_array() {
        return Err(FetchError::Parse {
            resource,
            detail: format!("expected a JSON array, got {}", json_kind(&payload)),
        });
    }
    serde_json::from_value(payload).map_err(|e| FetchError::Parse {
        resource,
        detail: e.to_string(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ═══════════════════════════════════════════════════════════
// HTTP backend
// ═══════════════════════════════════════════════════════════

/// reqwest-backed client for the REST backend.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
    boundaries_path: PathBuf,
    timeout: Duration,
}

impl HttpBackend {
    pub fn new(config: &DashboardConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            client,
            boundaries_path: config.boundaries_path.clone(),
            timeout: config.request_timeout,
        })
    }

    async fn get_json(&self, resource: Resource, path: &str) -> Result<Value, FetchError> {
        let url = format!("{}{path}", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify(resource, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                resource,
                status: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout { resource }
            } else {
                FetchError::Parse {
                    resource,
                    detail: e.to_string(),
                }
            }
        })
    }

    async fn read_boundaries(&self) -> Result<Value, FetchError> {
        let resource = Resource::Boundaries;
        let text = tokio::fs::read_to_string(&self.boundaries_path)
            .await
            .map_err(|source| FetchError::Io { resource, source })?;
        serde_json::from_str(&text).map_err(|e| FetchError::Parse {
            resource,
            detail: e.to_string(),
        })
    }

    fn classify(&self, resource: Resource, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            tracing::debug!(%resource, timeout_secs = self.timeout.as_secs(), "Backend timeout");
            FetchError::Timeout { resource }
        } else {
            FetchError::Network {
                resource,
                detail: err.to_string(),
            }
        }
    }
}

impl Backend for HttpBackend {
    fn fetch(&self, resource: Resource) -> BoxFuture<'_, Result<Value, FetchError>> {
        Box::pin(async move {
            match resource.path() {
                Some(path) => self.get_json(resource, path).await,
                None => self.read_boundaries().await,
            }
        })
    }
}

// ═══════════════════════════════════════════════════════════
// Canned backend
// ═══════════════════════════════════════════════════════════

enum Canned {
    Json(Value),
    Status(u16),
    Unreachable,
}

/// In-memory backend returning configured payloads or failures.
/// Resources without an entry answer with HTTP 404.
#[derive(Default)]
pub struct StaticBackend {
    responses: HashMap<Resource, Canned>,
}

impl StaticBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, resource: Resource, payload: Value) -> Self {
        self.responses.insert(resource, Canned::Json(payload));
        self
    }

    pub fn with_status(mut self, resource: Resource, status: u16) -> Self {
        self.responses.insert(resource, Canned::Status(status));
        self
    }

    pub fn unreachable(mut self, resource: Resource) -> Self {
        self.responses.insert(resource, Canned::Unreachable);
        self
    }
}

impl Backend for StaticBackend {
    fn fetch(&self, resource: Resource) -> BoxFuture<'_, Result<Value, FetchError>> {
        let outcome = match self.responses.get(&resource) {
            Some(Canned::Json(value)) => Ok(value.clone()),
            Some(Canned::Status(status)) => Err(FetchError::Status {
                resource,
                status: *status,
            }),
            Some(Canned::Unreachable) => Err(FetchError::Network {
                resource,
                detail: "connection refused".into(),
            }),
            None => Err(FetchError::Status {
                resource,
                status: 404,
            }),
        };
        Box::pin(async move { outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AplRecord, DepartmentStats, DoctorsRecord, PassagesRecord};
    use axum::http::StatusCode;
    use axum::response::Html;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    /// Serve `app` on an ephemeral loopback port and return its base URL.
    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn http_backend(backend_url: String) -> HttpBackend {
        HttpBackend::new(&DashboardConfig {
            backend_url,
            ..DashboardConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn resource_paths_match_backend_routes() {
        assert_eq!(Resource::Apl.path(), Some("/api/apl-dep"));
        assert_eq!(Resource::Passages.path(), Some("/api/passages"));
        assert_eq!(Resource::Doctors.path(), Some("/api/medecins_dep"));
        assert_eq!(Resource::DepartmentStats.path(), Some("/api/test-db"));
        assert_eq!(Resource::ActiveRetirees.path(), Some("/api/medecins-retraites-actifs"));
        assert_eq!(Resource::Over55.path(), Some("/api/part-medecins-sup-55"));
        assert_eq!(Resource::Boundaries.path(), None);
    }

    #[test]
    fn decode_rejects_non_array_payload() {
        let err = decode_records::<AplRecord>(Resource::Apl, json!({ "detail": "oops" }))
            .unwrap_err();
        assert!(matches!(err, FetchError::Parse { resource: Resource::Apl, .. }));
        assert!(err.to_string().contains("an object"));
    }

    #[tokio::test]
    async fn static_backend_serves_records() {
        let backend = StaticBackend::new().with_json(
            Resource::Apl,
            json!([{ "codgeo": "01", "libgeo": "Ain", "an": "2023", "apl_mg_hmep": 3.1 }]),
        );
        let rows: Vec<AplRecord> = fetch_records(&backend, Resource::Apl).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].apl, Some(3.1));
    }

    #[tokio::test]
    async fn static_backend_reports_status_failure() {
        let backend = StaticBackend::new().with_status(Resource::Passages, 500);
        let err = fetch_records::<AplRecord>(&backend, Resource::Passages)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500, .. }));
        assert_eq!(err.kind(), "status");
        assert_eq!(err.resource(), Resource::Passages);
    }

    #[tokio::test]
    async fn unconfigured_resource_is_not_found() {
        let backend = StaticBackend::new();
        let err = fetch_records::<AplRecord>(&backend, Resource::Over55)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn unreachable_backend_is_network_error() {
        let backend = StaticBackend::new().unreachable(Resource::Doctors);
        let err = fetch_records::<AplRecord>(&backend, Resource::Doctors)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "network");
    }

    #[tokio::test]
    async fn http_backend_reports_connection_failure() {
        // Bind then drop a listener to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = DashboardConfig {
            backend_url: format!("http://127.0.0.1:{port}"),
            request_timeout: Duration::from_secs(2),
            ..DashboardConfig::default()
        };
        let backend = HttpBackend::new(&config).unwrap();
        let err = fetch_records::<AplRecord>(&backend, Resource::Apl)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FetchError::Network { .. } | FetchError::Timeout { .. }
        ));
    }

    #[tokio::test]
    async fn http_backend_reads_boundaries_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("departements.geojson");
        std::fs::write(
            &path,
            r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{"code":"75","nom":"Paris"},"geometry":{"type":"Polygon","coordinates":[[[2.2,48.8],[2.4,48.8],[2.4,48.9],[2.2,48.8]]]}}]}"#,
        )
        .unwrap();

        let config = DashboardConfig {
            boundaries_path: path,
            ..DashboardConfig::default()
        };
        let backend = HttpBackend::new(&config).unwrap();
        let collection = fetch_boundaries(&backend).await.unwrap();
        assert_eq!(collection.features.len(), 1);
        assert_eq!(collection.features[0].properties.nom.as_deref(), Some("Paris"));
    }

    #[tokio::test]
    async fn missing_boundary_file_is_io_error() {
        let config = DashboardConfig {
            boundaries_path: PathBuf::from("/nonexistent/departements.geojson"),
            ..DashboardConfig::default()
        };
        let backend = HttpBackend::new(&config).unwrap();
        let err = fetch_boundaries(&backend).await.unwrap_err();
        assert_eq!(err.kind(), "io");
    }

    #[tokio::test]
    async fn http_backend_maps_status_and_payload_failures() {
        let app = Router::new()
            .route("/api/apl-dep", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .route(
                "/api/passages",
                get(|| async { Html("<html><body>Maintenance</body></html>") }),
            )
            .route("/api/medecins_dep", get(|| async { Json(json!({ "a": 1 })) }))
            .route(
                "/api/test-db",
                get(|| async { Json(json!([{ "id": 1, "departement": "Ain", "effectif": 400 }])) }),
            );
        let backend = http_backend(serve(app).await);

        let err = fetch_records::<AplRecord>(&backend, Resource::Apl)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FetchError::Status { resource: Resource::Apl, status: 500 }
        ));

        let err = fetch_records::<PassagesRecord>(&backend, Resource::Passages)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Parse { resource: Resource::Passages, .. }));

        let err = fetch_records::<DoctorsRecord>(&backend, Resource::Doctors)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Parse { resource: Resource::Doctors, .. }));
        assert!(err.to_string().contains("an object"));

        let err = fetch_records::<AplRecord>(&backend, Resource::Over55)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));

        let rows = fetch_records::<DepartmentStats>(&backend, Resource::DepartmentStats)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].doctor_count, Some(400));
    }

    #[tokio::test]
    async fn pressure_view_loads_over_http() {
        let app = Router::new()
            .route(
                "/api/passages",
                get(|| async {
                    Json(json!([
                        { "dep": "75", "libelle_dep": "Paris", "moyenne_journaliere_passages": 120.5 },
                        { "dep": "1", "libelle_dep": "Ain", "moyenne_journaliere_passages": 20.0 }
                    ]))
                }),
            )
            .route(
                "/api/medecins_dep",
                get(|| async {
                    Json(json!([
                        { "id": "75", "departement": "Paris", "effectif": 40 },
                        { "id": "01", "departement": "Ain", "effectif": 20 }
                    ]))
                }),
            );
        let backend = http_backend(serve(app).await);

        let grid = crate::dashboard::load_pressure(&backend).await.unwrap();
        let paris = grid
            .find(&crate::models::DepartmentCode::canonical("75"))
            .unwrap();
        assert!((paris.item.ratio.unwrap() - 3.0125).abs() < 1e-12);
        assert_eq!(crate::render::fixed(paris.item.ratio, 3), "3.013");
        let ain = grid
            .find(&crate::models::DepartmentCode::canonical("01"))
            .unwrap();
        assert_eq!(ain.item.ratio, Some(1.0));
    }

    #[tokio::test]
    async fn pressure_view_fails_when_one_endpoint_errors() {
        let app = Router::new()
            .route(
                "/api/passages",
                get(|| async {
                    Json(json!([
                        { "dep": "75", "libelle_dep": "Paris", "moyenne_journaliere_passages": 120.5 }
                    ]))
                }),
            )
            .route("/api/medecins_dep", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
        let backend = http_backend(serve(app).await);

        let err = crate::dashboard::load_pressure(&backend).await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Status { resource: Resource::Doctors, status: 500 }
        ));
    }
}
