//! REST endpoint handlers organized by concern.

pub mod auth;
pub mod dashboard;
pub mod resources;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all console routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::routes())
        .merge(dashboard::routes())
        .merge(resources::routes())
}
