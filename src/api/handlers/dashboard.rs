//! Dashboard and session gate handlers.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{DashboardResponse, SessionQuery};
use crate::api::extract::session_from_headers;
use crate::app_state::AppState;
use crate::domain::{Access, Session};
use crate::error::{ConsoleError, ErrorResponse};

/// `GET /dashboard` — Record counts per resource.
///
/// # Errors
///
/// Returns [`ConsoleError::Unauthorized`] for a missing or expired session.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    summary = "Dashboard counts",
    description = "Counts the patients, doctors, appointments, departments, rooms, medicines, bills and payments. A count the hospital API fails to return is reported as 0.",
    responses(
        (status = 200, description = "Dashboard cards", body = DashboardResponse),
        (status = 401, description = "Missing or expired session", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, ConsoleError> {
    let counts = state.console.dashboard(&session).await?;
    Ok(Json(DashboardResponse { counts }))
}

/// `GET /session?area=` — Whether the UI may render an area.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    tag = "Dashboard",
    summary = "Gate a route",
    description = "Admin pages need a valid session and redirect to the login page otherwise. Login and registration redirect signed-in users to the dashboard.",
    params(SessionQuery),
    responses(
        (status = 200, description = "Gate decision", body = Access),
    )
)]
pub async fn session_gate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SessionQuery>,
) -> impl IntoResponse {
    let session = session_from_headers(&headers);
    Json(state.console.gate(query.area, session.as_ref()))
}

/// Dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/session", get(session_gate))
}
