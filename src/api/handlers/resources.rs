//! Resource screen handlers: list, form, create, update, delete.
//!
//! Every resource shares these routes; `{kind}` is the resource slug.
//! The create form lives under `/forms/{kind}` so that any string, `form`
//! included, is a valid record id under `/resources/{kind}/{id}`.
//! Mutations accept the screen's `page`/`limit` query so the refreshed
//! screen stays where the user was.

use axum::extract::{Path, Query, RawQuery, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use crate::api::dto::ScreenQuery;
use crate::app_state::AppState;
use crate::domain::{ResourceKind, Session};
use crate::error::{ConsoleError, ErrorResponse};
use crate::service::{FormView, MutationOutcome, ScreenView};

/// `GET /resources/{kind}` — One page of a resource.
///
/// # Errors
///
/// Returns [`ConsoleError`] on an unknown resource, invalid session, or
/// hospital API failure.
#[utoipa::path(
    get,
    path = "/api/v1/resources/{kind}",
    tag = "Resources",
    summary = "Load a resource screen",
    description = "Fetches the requested page from the hospital API and returns the records together with the rendered pagination bar. Pagination links keep any other query parameters.",
    params(
        ("kind" = ResourceKind, Path, description = "Resource slug"),
        ScreenQuery,
    ),
    responses(
        (status = 200, description = "Screen view", body = ScreenView),
        (status = 400, description = "Unknown resource", body = ErrorResponse),
        (status = 401, description = "Missing or expired session", body = ErrorResponse),
        (status = 502, description = "Hospital API failure", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_records(
    State(state): State<AppState>,
    session: Session,
    Path(kind): Path<String>,
    Query(query): Query<ScreenQuery>,
    RawQuery(raw): RawQuery,
) -> Result<impl IntoResponse, ConsoleError> {
    let kind: ResourceKind = kind.parse()?;
    let screen = state
        .console
        .load_screen(kind, query.target(), raw.as_deref().unwrap_or_default(), &session)
        .await?;
    Ok(Json(screen))
}

/// `GET /forms/{kind}` — Empty create form with lookups.
///
/// # Errors
///
/// Returns [`ConsoleError`] on an unknown resource or invalid session.
#[utoipa::path(
    get,
    path = "/api/v1/forms/{kind}",
    tag = "Resources",
    summary = "Open the create form",
    description = "Returns the dropdown options the create dialog needs.",
    params(("kind" = ResourceKind, Path, description = "Resource slug")),
    responses(
        (status = 200, description = "Form view", body = FormView),
        (status = 400, description = "Unknown resource", body = ErrorResponse),
        (status = 401, description = "Missing or expired session", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn new_form(
    State(state): State<AppState>,
    session: Session,
    Path(kind): Path<String>,
) -> Result<impl IntoResponse, ConsoleError> {
    let kind: ResourceKind = kind.parse()?;
    let form = state.console.load_form(kind, None, &session).await?;
    Ok(Json(form))
}

/// `GET /resources/{kind}/{id}` — Edit form for one record.
///
/// # Errors
///
/// Returns [`ConsoleError::NotFound`] if the record does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/resources/{kind}/{id}",
    tag = "Resources",
    summary = "Open the edit form",
    description = "Returns the current record and the dropdown options the edit dialog needs.",
    params(
        ("kind" = ResourceKind, Path, description = "Resource slug"),
        ("id" = String, Path, description = "Record id"),
    ),
    responses(
        (status = 200, description = "Form view", body = FormView),
        (status = 401, description = "Missing or expired session", body = ErrorResponse),
        (status = 404, description = "Record not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn edit_form(
    State(state): State<AppState>,
    session: Session,
    Path((kind, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ConsoleError> {
    let kind: ResourceKind = kind.parse()?;
    let form = state.console.load_form(kind, Some(&id), &session).await?;
    Ok(Json(form))
}

/// `POST /resources/{kind}` — Create a record.
///
/// # Errors
///
/// Returns [`ConsoleError`] if the body is not an object or the hospital
/// API rejects it.
#[utoipa::path(
    post,
    path = "/api/v1/resources/{kind}",
    tag = "Resources",
    summary = "Create a record",
    description = "Posts the form to the hospital API, then returns its message and the refreshed screen.",
    params(
        ("kind" = ResourceKind, Path, description = "Resource slug"),
        ScreenQuery,
    ),
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "Record created", body = MutationOutcome),
        (status = 400, description = "Invalid body or rejected by the hospital API", body = ErrorResponse),
        (status = 401, description = "Missing or expired session", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_record(
    State(state): State<AppState>,
    session: Session,
    Path(kind): Path<String>,
    Query(query): Query<ScreenQuery>,
    RawQuery(raw): RawQuery,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ConsoleError> {
    let kind: ResourceKind = kind.parse()?;
    let outcome = state
        .console
        .submit(
            kind,
            None,
            &body,
            query.target(),
            raw.as_deref().unwrap_or_default(),
            &session,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// `PUT /resources/{kind}/{id}` — Update a record.
///
/// # Errors
///
/// Returns [`ConsoleError`] if the body is not an object or the hospital
/// API rejects it.
#[utoipa::path(
    put,
    path = "/api/v1/resources/{kind}/{id}",
    tag = "Resources",
    summary = "Update a record",
    description = "Puts the form to the hospital API, then returns its message and the refreshed screen.",
    params(
        ("kind" = ResourceKind, Path, description = "Resource slug"),
        ("id" = String, Path, description = "Record id"),
        ScreenQuery,
    ),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Record updated", body = MutationOutcome),
        (status = 401, description = "Missing or expired session", body = ErrorResponse),
        (status = 404, description = "Record not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_record(
    State(state): State<AppState>,
    session: Session,
    Path((kind, id)): Path<(String, String)>,
    Query(query): Query<ScreenQuery>,
    RawQuery(raw): RawQuery,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ConsoleError> {
    let kind: ResourceKind = kind.parse()?;
    let outcome = state
        .console
        .submit(
            kind,
            Some(&id),
            &body,
            query.target(),
            raw.as_deref().unwrap_or_default(),
            &session,
        )
        .await?;
    Ok(Json(outcome))
}

/// `DELETE /resources/{kind}/{id}` — Delete a record.
///
/// # Errors
///
/// Returns [`ConsoleError`] if the hospital API rejects the deletion.
#[utoipa::path(
    delete,
    path = "/api/v1/resources/{kind}/{id}",
    tag = "Resources",
    summary = "Delete a record",
    description = "Deletes the record on the hospital API, then returns its message and the refreshed screen.",
    params(
        ("kind" = ResourceKind, Path, description = "Resource slug"),
        ("id" = String, Path, description = "Record id"),
        ScreenQuery,
    ),
    responses(
        (status = 200, description = "Record deleted", body = MutationOutcome),
        (status = 401, description = "Missing or expired session", body = ErrorResponse),
        (status = 404, description = "Record not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_record(
    State(state): State<AppState>,
    session: Session,
    Path((kind, id)): Path<(String, String)>,
    Query(query): Query<ScreenQuery>,
    RawQuery(raw): RawQuery,
) -> Result<impl IntoResponse, ConsoleError> {
    let kind: ResourceKind = kind.parse()?;
    let outcome = state
        .console
        .delete(
            kind,
            &id,
            query.target(),
            raw.as_deref().unwrap_or_default(),
            &session,
        )
        .await?;
    Ok(Json(outcome))
}

/// Resource routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/resources/{kind}", get(list_records).post(create_record))
        .route("/forms/{kind}", get(new_form))
        .route(
            "/resources/{kind}/{id}",
            get(edit_form).put(update_record).delete(delete_record),
        )
}
