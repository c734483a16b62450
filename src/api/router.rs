//! Dashboard router.
//!
//! HTML pages at the root, JSON under `/data`, liveness at `/health`.
//! Every response carries `Cache-Control: no-store`: data is fetched fresh
//! on each request and must not be replayed from a cache.

use std::sync::Arc;

use axum::http::{header, HeaderValue, Uri};
use axum::routing::get;
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints::{data, health, pages};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::backend::Backend;
use crate::config::DashboardConfig;

/// Build the dashboard router over `backend`.
pub fn dashboard_router(backend: Arc<dyn Backend>, config: DashboardConfig) -> Router {
    build_router(ApiContext::new(backend, config))
}

fn build_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let html = Router::new()
        .route("/", get(pages::home))
        .route("/propos", get(pages::about))
        .route("/guide", get(pages::guide))
        .route("/apl", get(pages::apl_table))
        .route("/apl/:code", get(pages::apl_detail))
        .route("/carte", get(pages::pressure_grid))
        .route("/carte/:code", get(pages::pressure_detail))
        .route("/zones-risque", get(pages::risk_board))
        .route("/zones-risque/:code", get(pages::risk_detail))
        .route("/statistiques", get(pages::national_stats))
        .route("/map", get(pages::apl_map));

    let json = Router::new()
        .route("/apl", get(data::apl))
        .route("/carte", get(data::pressure))
        .route("/zones-risque", get(data::risk))
        .route("/statistiques", get(data::stats));

    Router::new()
        .merge(html)
        .nest("/data", json)
        .route("/health", get(health::check))
        .fallback(fallback)
        .with_state(ctx)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

async fn fallback(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::backend::{Resource, StaticBackend};
    use crate::view::GENERIC_ERROR_MESSAGE;

    fn backend() -> StaticBackend {
        StaticBackend::new()
            .with_json(
                Resource::Apl,
                json!([
                    { "codgeo": "01", "libgeo": "Ain", "an": 2023, "apl_mg_hmep": 3.0 },
                    { "codgeo": "75", "libgeo": "Paris", "an": 2023, "apl_mg_hmep": 5.0 },
                    { "codgeo": "23", "libgeo": "Creuse", "an": 2023, "apl_mg_hmep": 1.0 }
                ]),
            )
            .with_json(
                Resource::Passages,
                json!([
                    { "dep": "75", "libelle_dep": "Paris", "moyenne_journaliere_passages": 120.5 },
                    { "dep": "1", "libelle_dep": "Ain", "moyenne_journaliere_passages": 20.0 }
                ]),
            )
            .with_json(
                Resource::Doctors,
                json!([
                    { "id": "75", "departement": "Paris", "effectif": 40 },
                    { "id": "01", "departement": "Ain", "effectif": 20 },
                    { "id": "23", "departement": "Creuse", "effectif": 100 }
                ]),
            )
            .with_json(
                Resource::ActiveRetirees,
                json!([
                    { "code": "01", "dept": "Ain", "nbr": 2 },
                    { "code": "23", "dept": "Creuse", "nbr": 20 }
                ]),
            )
            .with_json(
                Resource::Over55,
                json!([
                    { "code": "01", "departement": "Ain", "omnipraticiens": 3, "specialistes": 1 },
                    { "code": "23", "departement": "Creuse", "omnipraticiens": 30, "specialistes": 20 }
                ]),
            )
            .with_json(
                Resource::DepartmentStats,
                json!([
                    { "id": 1, "departement": "Ain", "effectif": 400, "densite_ensemble": 200.0 },
                    { "id": 75, "departement": "Paris", "effectif": 1600, "densite_ensemble": 600.0 },
                    { "id": 100, "departement": "France métropolitaine", "effectif": 90000 }
                ]),
            )
            .with_json(
                Resource::Boundaries,
                json!({
                    "type": "FeatureCollection",
                    "features": [{
                        "type": "Feature",
                        "properties": { "code": "01", "nom": "Ain" },
                        "geometry": { "type": "Polygon", "coordinates": [[[5.0, 46.0], [6.0, 46.0], [6.0, 46.5], [5.0, 46.0]]] }
                    }]
                }),
            )
    }

    fn router(backend: StaticBackend) -> Router {
        dashboard_router(Arc::new(backend), DashboardConfig::default())
    }

    async fn get_response(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(resp: Response) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let resp = get_response(router(StaticBackend::new()), "/health").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], crate::config::APP_VERSION);
    }

    #[tokio::test]
    async fn every_response_is_uncached() {
        for uri in ["/", "/health", "/apl", "/data/apl", "/nowhere"] {
            let resp = get_response(router(backend()), uri).await;
            assert_eq!(
                resp.headers().get(header::CACHE_CONTROL).unwrap(),
                "no-store",
                "missing on {uri}"
            );
        }
    }

    #[tokio::test]
    async fn static_pages_render() {
        for (uri, needle) in [
            ("/", "Déserts Médicaux en France"),
            ("/propos", "Déserts Médicaux en France"),
            ("/guide", "Guide pratique pour les soignants"),
        ] {
            let resp = get_response(router(StaticBackend::new()), uri).await;
            assert_eq!(resp.status(), StatusCode::OK);
            assert!(body_text(resp).await.contains(needle), "{uri}");
        }
    }

    #[tokio::test]
    async fn apl_page_sorts_on_query() {
        let resp = get_response(router(backend()), "/apl?sort=desc").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_text(resp).await;
        let paris = html.find(">Paris<").unwrap();
        let ain = html.find(">Ain<").unwrap();
        let creuse = html.find(">Creuse<").unwrap();
        assert!(paris < ain && ain < creuse);
    }

    #[tokio::test]
    async fn apl_detail_normalises_code() {
        let resp = get_response(router(backend()), "/apl/1").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("<dt>Code :</dt><dd>01</dd>"));
    }

    #[tokio::test]
    async fn unknown_department_is_404_page() {
        let resp = get_response(router(backend()), "/apl/99").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(body_text(resp).await.contains("Aucune donnée pour le département"));

        let resp = get_response(router(backend()), "/zones-risque/75").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn pressure_page_shows_ratios() {
        let resp = get_response(router(backend()), "/carte").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_text(resp).await;
        assert!(html.contains("Ratio: 3.013"));
        assert!(html.contains("Ratio: 1.000"));
    }

    #[tokio::test]
    async fn one_failing_endpoint_fails_the_whole_view() {
        let app = router(backend().with_status(Resource::Doctors, 500));

        let resp = get_response(app.clone(), "/carte").await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let html = body_text(resp).await;
        assert!(html.contains(GENERIC_ERROR_MESSAGE));
        assert!(!html.contains("Ratio:"));

        let resp = get_response(app.clone(), "/zones-risque").await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        assert!(!body_text(resp).await.contains("Retraités actifs :"));

        let resp = get_response(app, "/data/carte").await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(resp).await;
        assert_eq!(json["error"]["code"], "UPSTREAM_UNAVAILABLE");
        assert!(json.get("cells").is_none());
    }

    #[tokio::test]
    async fn unreachable_backend_is_502() {
        let app = router(StaticBackend::new().unreachable(Resource::Apl));
        let resp = get_response(app.clone(), "/apl").await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let resp = get_response(app, "/map").await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn malformed_payload_is_502() {
        let app = router(backend().with_json(Resource::DepartmentStats, json!({ "rows": [] })));
        let resp = get_response(app, "/statistiques").await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        assert!(body_text(resp).await.contains(GENERIC_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn stats_page_toggles_table() {
        let resp = get_response(router(backend()), "/statistiques?vue=tableau").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_text(resp).await;
        assert!(html.contains("Données détaillées par département"));
        assert!(!html.contains("France métropolitaine"));
    }

    #[tokio::test]
    async fn map_page_draws_regions() {
        let resp = get_response(router(backend()), "/map").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_text(resp).await;
        assert!(html.contains("<svg"));
        assert!(html.contains(r#"fill="rgb(255,200,100)""#));
    }

    #[tokio::test]
    async fn json_views_expose_derived_fields() {
        let json = body_json(get_response(router(backend()), "/data/carte").await).await;
        assert_eq!(json["cells"][0]["code"], "75");
        assert_eq!(json["cells"][0]["ratio"], 3.0125);
        assert!(json["cells"][0]["color"].as_str().unwrap().starts_with("rgb("));

        let json = body_json(get_response(router(backend()), "/data/zones-risque").await).await;
        assert_eq!(json["cards"][0]["code"], "23");
        assert_eq!(json["cards"][0]["rank"], 1);
        assert_eq!(json["cards"][0]["tier"], "high");

        let json = body_json(get_response(router(backend()), "/data/apl?sort=asc").await).await;
        assert_eq!(json["rows"][0]["code"], "23");
        assert_eq!(json["range"]["max"], 5.0);

        let json = body_json(get_response(router(backend()), "/data/statistiques").await).await;
        assert_eq!(json["total_doctors"], 2000);
        assert_eq!(json["bars"][0]["label"], "Paris");
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let resp = get_response(router(backend()), "/nowhere").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["error"]["code"], "NOT_FOUND");
    }
}
