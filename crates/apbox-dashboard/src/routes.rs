//! Route configuration for the dashboard API.

use std::sync::Arc;

use axum::routing::{get, post, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{compile, get_catalog, get_sales, health_check};
use crate::state::DashboardState;

/// Create the dashboard API router.
pub fn create_router(state: Arc<DashboardState>) -> Router {
    let cors = build_cors_layer(state.config());

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/compile", post(compile))
        .route("/catalog/{network}", get(get_catalog))
        .route("/sales", get(get_sales));

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &crate::config::DashboardConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn make_test_state() -> Arc<DashboardState> {
        Arc::new(DashboardState::new(DashboardConfig::default()).unwrap())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_router(make_test_state());

        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_catalog_endpoint() {
        let app = create_router(make_test_state());

        let request = Request::builder()
            .uri("/api/catalog/devnet")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["network"], "devnet");
        assert!(!json["coins"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_catalog_search_no_match() {
        let app = create_router(make_test_state());

        let request = Request::builder()
            .uri("/api/catalog/mainnet?search=zzzz-no-such-coin")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert!(json["coins"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_catalog_unknown_network() {
        let app = create_router(make_test_state());

        let request = Request::builder()
            .uri("/api/catalog/testnet")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_compile_not_configured() {
        let app = create_router(make_test_state());

        let request = Request::builder()
            .method("POST")
            .uri("/api/compile")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"symbol":"BTC","name":"Bitcoin","decimal":6,"monitor":true}"#,
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "not_configured");
    }

    #[tokio::test]
    async fn test_compile_rejects_get() {
        let app = create_router(make_test_state());

        let request = Request::builder()
            .uri("/api/compile")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = create_router(make_test_state());

        let request = Request::builder()
            .uri("/api/unknown")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
