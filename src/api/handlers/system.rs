//! System endpoints: health check and resource catalog.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::ResourceInfo;
use crate::app_state::AppState;
use crate::domain::ResourceKind;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"healthy"` while the process serves requests.
    pub status: String,
    /// Current time, RFC 3339.
    pub timestamp: String,
    /// Crate version.
    pub version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// `GET /config/resources` — Resource catalog.
#[utoipa::path(
    get,
    path = "/config/resources",
    tag = "System",
    summary = "List resources",
    description = "Returns every resource the console manages with its title, dashboard flag, and form lookups.",
    responses(
        (status = 200, description = "Resource catalog", body = Vec<ResourceInfo>),
    )
)]
pub async fn resources_handler() -> impl IntoResponse {
    let catalog: Vec<ResourceInfo> = ResourceKind::ALL
        .into_iter()
        .map(ResourceInfo::from)
        .collect();
    (StatusCode::OK, Json(catalog))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/resources", get(resources_handler))
}
