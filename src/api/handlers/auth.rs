//! Login and registration handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::client::{AuthToken, Credentials};
use crate::error::{ConsoleError, ErrorResponse};
use crate::service::Registration;

/// `POST /auth/login` — Exchange credentials for a token.
///
/// # Errors
///
/// Returns [`ConsoleError::Unauthorized`] when the hospital API rejects
/// the credentials.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    summary = "Sign in",
    description = "Forwards the credentials to the hospital API and returns the issued bearer token.",
    request_body = Credentials,
    responses(
        (status = 200, description = "Signed in", body = AuthToken),
        (status = 400, description = "Missing email or password", body = ErrorResponse),
        (status = 401, description = "Login failed", body = ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<impl IntoResponse, ConsoleError> {
    let token = state.console.login(&credentials).await?;
    Ok(Json(token))
}

/// `POST /auth/register` — Create an administrator account.
///
/// # Errors
///
/// Returns [`ConsoleError::InvalidRequest`] when the passwords differ or
/// are too short.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Auth",
    summary = "Register",
    description = "Checks that both passwords match and are at least 8 characters, then forwards the account to the hospital API.",
    request_body = Registration,
    responses(
        (status = 201, description = "Account created", body = AuthToken),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Registration failed", body = ErrorResponse),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<Registration>,
) -> Result<impl IntoResponse, ConsoleError> {
    let token = state.console.register(form).await?;
    Ok((StatusCode::CREATED, Json(token)))
}

/// Auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
}
