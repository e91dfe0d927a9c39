//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Console endpoints are mounted under `/api/v1`; health and the resource
//! catalog sit at the root.

pub mod dto;
pub mod extract;
pub mod handlers;

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::app_state::AppState;

/// Registers the bearer scheme referenced by protected endpoints.
#[derive(Debug)]
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token issued by the hospital API"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI document for the console gateway.
#[derive(Debug, OpenApi)]
#[openapi(
    paths(
        handlers::system::health_handler,
        handlers::system::resources_handler,
        handlers::auth::login,
        handlers::auth::register,
        handlers::dashboard::dashboard,
        handlers::dashboard::session_gate,
        handlers::resources::list_records,
        handlers::resources::new_form,
        handlers::resources::edit_form,
        handlers::resources::create_record,
        handlers::resources::update_record,
        handlers::resources::delete_record,
    ),
    components(schemas(crate::error::ErrorResponse, crate::error::ErrorBody)),
    modifiers(&SecurityAddon),
    tags(
        (name = "System", description = "Health and resource catalog"),
        (name = "Auth", description = "Administrator sign-in and registration"),
        (name = "Dashboard", description = "Dashboard counts and route gating"),
        (name = "Resources", description = "Paginated screens and record mutations for every hospital resource"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use axum::body::{Body, to_bytes};
    use axum::extract::Query;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Json;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::config::ConsoleConfig;
    use crate::domain::PageDescriptor;

    fn app_with(api_url: String) -> Router {
        let config = ConsoleConfig {
            hospital_api_url: api_url,
            ..ConsoleConfig::default()
        };
        let Ok(state) = AppState::from_config(&config) else {
            panic!("state build failed");
        };
        build_router().with_state(state)
    }

    fn app() -> Router {
        app_with("http://127.0.0.1:9".to_string())
    }

    async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap_or_else(|e| match e {});
        let status = response.status();
        let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body read failed");
        };
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let Ok(request) = builder.body(Body::empty()) else {
            panic!("request build failed");
        };
        request
    }

    #[tokio::test]
    async fn health_reports_version() {
        let (status, body) = call(app(), get_request("/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn catalog_lists_every_resource() {
        let (status, body) = call(app(), get_request("/config/resources", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(11));
    }

    #[tokio::test]
    async fn unknown_resource_is_bad_request() {
        let (status, body) = call(app(), get_request("/api/v1/resources/wards", Some("tok"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 1002);
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let (status, body) = call(app(), get_request("/api/v1/resources/patients", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], 2001);
    }

    #[tokio::test]
    async fn session_gate_redirects_both_ways() {
        let (_, admin) = call(app(), get_request("/api/v1/session?area=admin", None)).await;
        assert_eq!(admin, json!({"decision": "redirect", "to": "/auth/login"}));

        let (_, guest) =
            call(app(), get_request("/api/v1/session?area=guest", Some("tok"))).await;
        assert_eq!(guest, json!({"decision": "redirect", "to": "/admin/dashboard"}));

        let (_, allowed) =
            call(app(), get_request("/api/v1/session?area=admin", Some("tok"))).await;
        assert_eq!(allowed, json!({"decision": "allow"}));
    }

    #[tokio::test]
    async fn register_rejects_mismatched_passwords() {
        let body = json!({
            "name": "Ada", "username": "ada", "email": "ada@example.com",
            "password": "password1", "confirmPassword": "password2"
        });
        let Ok(request) = Request::builder()
            .method("POST")
            .uri("/api/v1/auth/register")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
        else {
            panic!("request build failed");
        };
        let (status, body) = call(app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "invalid request: Passwords do not match");
    }

    #[tokio::test]
    async fn unreachable_api_is_bad_gateway() {
        let (status, body) =
            call(app(), get_request("/api/v1/resources/rooms", Some("tok"))).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], 3002);
    }

    #[tokio::test]
    async fn screen_keeps_foreign_query_params() {
        let upstream = Router::new().route(
            "/api/patients",
            get(|Query(q): Query<HashMap<String, u32>>| async move {
                let page = q.get("page").copied().unwrap_or(1);
                let limit = q.get("limit").copied().unwrap_or(10);
                let mut data =
                    serde_json::to_value(PageDescriptor::derive(page, limit, 200))
                        .unwrap_or_default();
                data["data"] = json!([{"id": "p1"}]);
                Json(json!({ "data": data }))
            }),
        );
        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("bind failed");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("no local addr");
        };
        tokio::spawn(async move {
            let _ = axum::serve(listener, upstream).await;
        });

        let (status, body) = call(
            app_with(format!("http://{addr}")),
            get_request("/api/v1/resources/patients?ward=a&page=7&limit=10", Some("tok")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resource"], "patients");
        let pagination = &body["pagination"];
        assert_eq!(pagination["summary"], "Showing 61 to 70 of 200 entries");
        assert_eq!(pagination["window"], json!([5, 6, 7, 8, 9]));
        let next = pagination["controls"]
            .as_array()
            .and_then(|controls| controls.last())
            .cloned()
            .unwrap_or_default();
        assert_eq!(next["link"]["query"], "ward=a&page=8&limit=10");
    }

    #[tokio::test]
    async fn create_form_has_its_own_path() {
        let (status, body) = call(app(), get_request("/api/v1/forms/settings", Some("tok"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resource"], "settings");
        assert_eq!(body["id"], Value::Null);
    }

    #[tokio::test]
    async fn record_named_form_reaches_edit_form() {
        // Settings has no lookups, so only the record fetch touches the
        // unreachable upstream.
        let (status, body) =
            call(app(), get_request("/api/v1/resources/settings/form", Some("tok"))).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], 3002);
    }

    #[test]
    fn openapi_documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/config/resources",
            "/api/v1/session",
            "/api/v1/forms/{kind}",
            "/api/v1/resources/{kind}",
            "/api/v1/resources/{kind}/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path}");
        }
    }
}
