//! HTTP request handlers for the dashboard API.

use std::sync::Arc;

use apbox_client::panels::fetch_sales;
use apbox_core::{CoinCreationRequest, Network};
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::{DashboardError, DashboardResult};
use crate::state::DashboardState;
use crate::types::{CatalogQuery, CatalogResponse, HealthResponse, SalesResponse};

const DEFAULT_UPSTREAM_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Handle GET /api/health - health check endpoint.
pub async fn health_check(State(state): State<Arc<DashboardState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs: state.uptime_secs(),
        compile_configured: state.config().compile_api.is_some(),
    })
}

/// Handle POST /api/compile - forward a coin creation request upstream.
///
/// The request body is validated and then forwarded byte-for-byte as
/// `application/json`. The upstream status, content type and body are
/// relayed unchanged.
pub async fn compile(
    State(state): State<Arc<DashboardState>>,
    body: Bytes,
) -> DashboardResult<Response> {
    let request: CoinCreationRequest = serde_json::from_slice(&body)
        .map_err(|e| DashboardError::InvalidRequest(e.to_string()))?;
    request
        .validate()
        .map_err(|e| DashboardError::InvalidRequest(e.to_string()))?;

    let upstream = state
        .config()
        .compile_api
        .as_deref()
        .ok_or(DashboardError::UpstreamNotConfigured)?;

    info!(symbol = %request.symbol, name = %request.name, upstream, "forwarding compile request");

    let response = state
        .http()
        .post(upstream)
        .header(header::CONTENT_TYPE.as_str(), "application/json")
        .body(body.to_vec())
        .send()
        .await
        .map_err(|e| {
            warn!(upstream, error = %e, "compile service unreachable");
            DashboardError::Upstream(e.to_string())
        })?;

    let status = StatusCode::from_u16(response.status().as_u16())
        .map_err(|e| DashboardError::Internal(e.to_string()))?;
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE.as_str())
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_UPSTREAM_CONTENT_TYPE)
        .to_string();
    let payload = response.bytes().await.map_err(|e| {
        warn!(upstream, error = %e, "compile service response interrupted");
        DashboardError::Upstream(e.to_string())
    })?;

    debug!(status = status.as_u16(), bytes = payload.len(), "relaying compile response");
    Ok((status, [(header::CONTENT_TYPE, content_type)], payload.to_vec()).into_response())
}

/// Handle GET /api/catalog/{network} - list registrable coins.
pub async fn get_catalog(
    State(state): State<Arc<DashboardState>>,
    Path(network): Path<String>,
    Query(query): Query<CatalogQuery>,
) -> DashboardResult<Json<CatalogResponse>> {
    let network = Network::from_slug(&network)
        .ok_or_else(|| DashboardError::InvalidRequest(format!("unknown network: {network}")))?;
    let search = query.search.unwrap_or_default();

    let coins = state
        .catalogs()
        .get(network)
        .filter(&search)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(CatalogResponse { network, coins }))
}

/// Handle GET /api/sales - latest Topaz sales from mainnet.
pub async fn get_sales(
    State(state): State<Arc<DashboardState>>,
) -> DashboardResult<Json<SalesResponse>> {
    let sales = fetch_sales(state.nodes().mainnet()).await.map_err(|e| {
        warn!(error = %e, "sale history fetch failed");
        DashboardError::from(e)
    })?;

    let fetched_at = Utc::now();
    let now_micros = u64::try_from(fetched_at.timestamp_micros()).unwrap_or(0);

    Ok(Json(SalesResponse {
        fetched_at,
        sales: sales.iter().map(|s| s.to_row(now_micros)).collect(),
    }))
}
