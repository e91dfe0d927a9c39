//! `reqwest` implementation of [`HospitalApi`].

use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde_json::Value;

use super::HospitalApi;
use super::wire::{AuthToken, Credentials, ListPayload, NewAccount, body_message};
use crate::config::ConsoleConfig;
use crate::domain::{PageTarget, RecordPage, ResourceKind, Session};
use crate::error::ConsoleError;

/// HTTP client for the hospital REST API.
///
/// Cheap to clone: the underlying `reqwest::Client` shares its
/// connection pool.
#[derive(Debug, Clone)]
pub struct HospitalApiClient {
    http: reqwest::Client,
    base_url: Url,
    lookup_limit: u32,
}

impl HospitalApiClient {
    /// Builds a client from the console configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Internal`] if the HTTP client cannot be
    /// constructed (e.g. TLS backend initialization fails) or the base URL
    /// is not an absolute `http(s)` URL.
    pub fn new(config: &ConsoleConfig) -> Result<Self, ConsoleError> {
        let base_url = Url::parse(config.hospital_api_url.trim_end_matches('/'))
            .map_err(|e| ConsoleError::Internal(format!("hospital api url: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ConsoleError::Internal(format!(
                "hospital api url cannot be a base: {base_url}"
            )));
        }
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| ConsoleError::Internal(format!("http client: {e}")))?;
        Ok(Self {
            http,
            base_url,
            lookup_limit: config.lookup_limit,
        })
    }

    /// Base URL of the hospital API.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Builds `<base>/api/<segments...>`. Each segment is percent-encoded
    /// on its own, so `/`, `?` and `#` inside an id stay inside it.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ConsoleError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ConsoleError::Internal(format!("hospital api url cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
        session: Option<&Session>,
    ) -> Result<RequestBuilder, ConsoleError> {
        let builder = self.http.request(method, self.endpoint(segments)?);
        Ok(match session {
            Some(session) => builder.bearer_auth(session.token()),
            None => builder,
        })
    }

    /// Request for a single record. Ids that would collapse into another
    /// path (`""`, `.`, `..`) are rejected.
    fn record_request(
        &self,
        method: Method,
        kind: ResourceKind,
        id: &str,
        session: &Session,
    ) -> Result<RequestBuilder, ConsoleError> {
        if matches!(id, "" | "." | "..") {
            return Err(ConsoleError::InvalidRequest(format!("invalid record id: {id:?}")));
        }
        self.request(method, &[kind.slug(), id], Some(session))
    }

    /// Sends a request and returns the parsed body of a 2xx response.
    ///
    /// Error statuses become [`ConsoleError`]s carrying the body's
    /// `message`, or `fallback` when there is none.
    async fn send(&self, request: RequestBuilder, fallback: &str) -> Result<Value, ConsoleError> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(body) => body,
                Err(_) if !status.is_success() => Value::String(text),
                Err(e) => {
                    return Err(ConsoleError::Transport(format!(
                        "unreadable response body: {e}"
                    )));
                }
            }
        };

        if status.is_success() {
            return Ok(body);
        }

        let message = body_message(&body)
            .or_else(|| body.as_str().map(str::to_string))
            .unwrap_or_else(|| fallback.to_string());
        tracing::debug!(status = status.as_u16(), %message, "hospital api rejected request");
        Err(match status {
            StatusCode::UNAUTHORIZED => ConsoleError::Unauthorized(message),
            StatusCode::NOT_FOUND => ConsoleError::NotFound(message),
            _ => ConsoleError::Upstream {
                status: status.as_u16(),
                message,
            },
        })
    }

    async fn fetch_page(
        &self,
        kind: ResourceKind,
        page: Option<u32>,
        limit: u32,
        session: &Session,
    ) -> Result<RecordPage, ConsoleError> {
        let mut request = self.request(Method::GET, &[kind.slug()], Some(session))?;
        if let Some(page) = page {
            request = request.query(&[("page", page)]);
        }
        let request = request.query(&[("limit", limit)]);
        let body = self.send(request, "Failed to load records").await?;

        // A body without `data` is an empty result, not an error.
        let page: RecordPage = match body.get("data") {
            None | Some(Value::Null) => RecordPage::default(),
            Some(data) => serde_json::from_value::<ListPayload>(data.clone())
                .map_err(|e| ConsoleError::Transport(format!("malformed list payload: {e}")))?
                .into(),
        };
        Ok(page)
    }

    async fn authenticate(
        &self,
        segments: &[&str],
        payload: &impl serde::Serialize,
        fallback: &str,
    ) -> Result<AuthToken, ConsoleError> {
        let request = self.request(Method::POST, segments, None)?.json(payload);
        // Rejected credentials come back as 4xx; 5xx stays an upstream failure.
        let body = match self.send(request, fallback).await {
            Ok(body) => body,
            Err(ConsoleError::Upstream { status, message }) if (400..500).contains(&status) => {
                return Err(ConsoleError::Unauthorized(message));
            }
            Err(e) => return Err(e),
        };
        match body.get("token").and_then(Value::as_str) {
            Some(token) if !token.is_empty() => Ok(AuthToken {
                token: token.to_string(),
            }),
            _ => Err(ConsoleError::Unauthorized(
                body_message(&body).unwrap_or_else(|| fallback.to_string()),
            )),
        }
    }
}

impl HospitalApi for HospitalApiClient {
    async fn list(
        &self,
        kind: ResourceKind,
        target: PageTarget,
        session: &Session,
    ) -> Result<RecordPage, ConsoleError> {
        tracing::debug!(resource = %kind, page = target.page, limit = target.limit, "listing");
        self.fetch_page(kind, Some(target.page), target.limit, session)
            .await
    }

    async fn lookup(&self, kind: ResourceKind, session: &Session) -> Result<Vec<Value>, ConsoleError> {
        let page = self
            .fetch_page(kind, None, self.lookup_limit, session)
            .await?;
        Ok(page.records)
    }

    async fn count(&self, kind: ResourceKind, session: &Session) -> Result<u64, ConsoleError> {
        let page = self.fetch_page(kind, None, 1, session).await?;
        Ok(page.descriptor.total)
    }

    async fn get(
        &self,
        kind: ResourceKind,
        id: &str,
        session: &Session,
    ) -> Result<Value, ConsoleError> {
        let request = self.record_request(Method::GET, kind, id, session)?;
        let body = self.send(request, "Failed to load record").await?;
        [kind.detail_key(), "data"]
            .iter()
            .find_map(|key| body.get(key).filter(|v| !v.is_null()))
            .cloned()
            .ok_or_else(|| ConsoleError::NotFound(format!("{} {id}", kind.detail_key())))
    }

    async fn create(
        &self,
        kind: ResourceKind,
        body: &Value,
        session: &Session,
    ) -> Result<String, ConsoleError> {
        let request = self
            .request(Method::POST, &[kind.slug()], Some(session))?
            .json(body);
        let reply = self.send(request, "Failed").await?;
        tracing::info!(resource = %kind, "record created");
        Ok(body_message(&reply).unwrap_or_else(|| "Success".to_string()))
    }

    async fn update(
        &self,
        kind: ResourceKind,
        id: &str,
        body: &Value,
        session: &Session,
    ) -> Result<String, ConsoleError> {
        let request = self
            .record_request(Method::PUT, kind, id, session)?
            .json(body);
        let reply = self.send(request, "Failed").await?;
        tracing::info!(resource = %kind, id, "record updated");
        Ok(body_message(&reply).unwrap_or_else(|| "Success".to_string()))
    }

    async fn delete(
        &self,
        kind: ResourceKind,
        id: &str,
        session: &Session,
    ) -> Result<String, ConsoleError> {
        let request = self.record_request(Method::DELETE, kind, id, session)?;
        let reply = self.send(request, "Delete failed").await?;
        tracing::info!(resource = %kind, id, "record deleted");
        Ok(body_message(&reply).unwrap_or_else(|| "Deleted successfully".to_string()))
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthToken, ConsoleError> {
        self.authenticate(&["auth", "login"], credentials, "Login failed")
            .await
    }

    async fn register(&self, account: &NewAccount) -> Result<AuthToken, ConsoleError> {
        self.authenticate(&["auth", "register"], account, "Registration failed")
            .await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use axum::extract::{Path, Query};
    use axum::http::{HeaderMap, Uri};
    use axum::routing::{delete, get, post};
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use crate::domain::PageDescriptor;

    async fn spawn_stub(router: Router) -> HospitalApiClient {
        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("bind failed");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("no local addr");
        };
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        let config = ConsoleConfig {
            hospital_api_url: format!("http://{addr}/"),
            ..ConsoleConfig::default()
        };
        let Ok(client) = HospitalApiClient::new(&config) else {
            panic!("client build failed");
        };
        client
    }

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "Bearer tok")
    }

    fn stub_router() -> Router {
        Router::new()
            .route(
                "/api/bills",
                get(
                    |headers: HeaderMap, Query(q): Query<HashMap<String, u32>>| async move {
                        if !authorized(&headers) {
                            return (
                                axum::http::StatusCode::UNAUTHORIZED,
                                Json(json!({"message": "Invalid token"})),
                            );
                        }
                        let page = q.get("page").copied().unwrap_or(1);
                        let limit = q.get("limit").copied().unwrap_or(10);
                        let descriptor = PageDescriptor::derive(page, limit, 42);
                        let mut data = serde_json::to_value(descriptor).unwrap_or_default();
                        data["data"] = json!([{"id": "b1", "totalAmount": 120}]);
                        (axum::http::StatusCode::OK, Json(json!({ "data": data })))
                    },
                )
                .post(|| async {
                    (
                        axum::http::StatusCode::CREATED,
                        Json(json!({"success": "Bill created"})),
                    )
                }),
            )
            .route(
                "/api/bills/{id}",
                get(|Path(id): Path<String>| async move {
                    if id == "b1" {
                        (
                            axum::http::StatusCode::OK,
                            Json(json!({"bill": {"id": "b1", "status": "unpaid"}})),
                        )
                    } else {
                        (
                            axum::http::StatusCode::NOT_FOUND,
                            Json(json!({"message": "Bill not found"})),
                        )
                    }
                })
                .put(|| async { Json(json!({"message": "Bill updated"})) })
                .delete(|| async { Json(json!({})) }),
            )
            .route("/api/rooms", get(|| async { Json(json!({"ok": true})) }))
            .route(
                "/api/medicines",
                get(|| async { (axum::http::StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
            )
            .route(
                "/api/auth/login",
                post(|Json(body): Json<Value>| async move {
                    if body["password"] == "secret" {
                        (axum::http::StatusCode::OK, Json(json!({"token": "tok"})))
                    } else {
                        (
                            axum::http::StatusCode::BAD_REQUEST,
                            Json(json!({"message": "Invalid credentials"})),
                        )
                    }
                }),
            )
    }

    fn session() -> Session {
        Session::new("tok")
    }

    #[tokio::test]
    async fn list_parses_envelope_and_sends_query() {
        let client = spawn_stub(stub_router()).await;
        let result = client
            .list(ResourceKind::Bills, PageTarget { page: 3, limit: 10 }, &session())
            .await;
        let Ok(page) = result else {
            panic!("list failed: {result:?}");
        };
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.descriptor.page, 3);
        assert_eq!(page.descriptor.total_pages, 5);
    }

    #[tokio::test]
    async fn list_without_token_is_unauthorized() {
        let client = spawn_stub(stub_router()).await;
        let result = client
            .list(ResourceKind::Bills, PageTarget::default(), &Session::new("bad"))
            .await;
        assert!(matches!(result, Err(ConsoleError::Unauthorized(m)) if m == "Invalid token"));
    }

    #[tokio::test]
    async fn missing_data_is_an_empty_page() {
        let client = spawn_stub(stub_router()).await;
        let result = client
            .list(ResourceKind::Rooms, PageTarget::default(), &session())
            .await;
        let Ok(page) = result else {
            panic!("list failed: {result:?}");
        };
        assert!(page.records.is_empty());
        assert_eq!(page.descriptor, PageDescriptor::default());
    }

    #[tokio::test]
    async fn non_json_error_body_becomes_message() {
        let client = spawn_stub(stub_router()).await;
        let result = client.count(ResourceKind::Medicines, &session()).await;
        assert!(matches!(
            result,
            Err(ConsoleError::Upstream { status: 503, message }) if message == "maintenance"
        ));
    }

    #[tokio::test]
    async fn count_reads_total() {
        let client = spawn_stub(stub_router()).await;
        let result = client.count(ResourceKind::Bills, &session()).await;
        assert_eq!(result.ok(), Some(42));
    }

    #[tokio::test]
    async fn get_reads_singular_key() {
        let client = spawn_stub(stub_router()).await;
        let result = client.get(ResourceKind::Bills, "b1", &session()).await;
        assert_eq!(result.ok(), Some(json!({"id": "b1", "status": "unpaid"})));

        let missing = client.get(ResourceKind::Bills, "zz", &session()).await;
        assert!(matches!(missing, Err(ConsoleError::NotFound(m)) if m == "Bill not found"));
    }

    #[tokio::test]
    async fn mutations_return_api_messages() {
        let client = spawn_stub(stub_router()).await;
        let body = json!({"patient": "p1", "totalAmount": 10});
        assert_eq!(
            client.create(ResourceKind::Bills, &body, &session()).await.ok(),
            Some("Bill created".to_string())
        );
        assert_eq!(
            client
                .update(ResourceKind::Bills, "b1", &body, &session())
                .await
                .ok(),
            Some("Bill updated".to_string())
        );
        assert_eq!(
            client.delete(ResourceKind::Bills, "b1", &session()).await.ok(),
            Some("Deleted successfully".to_string())
        );
    }

    #[tokio::test]
    async fn login_returns_token_or_message() {
        let client = spawn_stub(stub_router()).await;
        let ok = client
            .login(&Credentials {
                email: "admin@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await;
        assert_eq!(ok.ok().map(|t| t.token), Some("tok".to_string()));

        let rejected = client
            .login(&Credentials {
                email: "admin@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await;
        assert!(
            matches!(rejected, Err(ConsoleError::Unauthorized(m)) if m == "Invalid credentials")
        );
    }

    #[tokio::test]
    async fn record_ids_stay_inside_their_resource() {
        let hits: Arc<Mutex<Vec<String>>> = Arc::default();
        let recorded = Arc::clone(&hits);
        let router = Router::new()
            .route(
                "/api/bills/{id}",
                delete(move |uri: Uri, Path(id): Path<String>| {
                    let recorded = Arc::clone(&recorded);
                    async move {
                        if let Ok(mut hits) = recorded.lock() {
                            hits.push(format!("{} {id}", uri.path()));
                        }
                        Json(json!({"success": "Bill deleted"}))
                    }
                }),
            )
            .route(
                "/api/patients/{id}",
                delete(|| async { Json(json!({"success": "Patient deleted"})) }),
            );
        let client = spawn_stub(router).await;

        let result = client
            .delete(ResourceKind::Bills, "../patients/p1?x#y", &session())
            .await;
        assert_eq!(result.ok(), Some("Bill deleted".to_string()));
        let hits = hits.lock().map(|h| h.clone()).unwrap_or_default();
        assert_eq!(
            hits,
            vec!["/api/bills/..%2Fpatients%2Fp1%3Fx%23y ../patients/p1?x#y"]
        );
    }

    #[tokio::test]
    async fn dot_segment_ids_are_rejected() {
        let client = spawn_stub(stub_router()).await;
        for id in ["", ".", ".."] {
            let result = client.delete(ResourceKind::Bills, id, &session()).await;
            assert!(
                matches!(result, Err(ConsoleError::InvalidRequest(_))),
                "{id:?}: {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn login_during_outage_is_not_unauthorized() {
        let router = Router::new().route(
            "/api/auth/login",
            post(|| async {
                (
                    axum::http::StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({"message": "db down"})),
                )
            }),
        );
        let client = spawn_stub(router).await;
        let result = client
            .login(&Credentials {
                email: "admin@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await;
        let Err(err) = result else {
            panic!("login should fail: {result:?}");
        };
        assert!(
            matches!(&err, ConsoleError::Upstream { status: 503, message } if message == "db down"),
            "{err:?}"
        );
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn base_url_path_prefix_is_kept() {
        let config = ConsoleConfig {
            hospital_api_url: "http://hospital.local/v2/".to_string(),
            ..ConsoleConfig::default()
        };
        let Ok(client) = HospitalApiClient::new(&config) else {
            panic!("client build failed");
        };
        let url = client.endpoint(&["bills", "a/b"]);
        assert_eq!(
            url.map(|u| u.to_string()).ok(),
            Some("http://hospital.local/v2/api/bills/a%2Fb".to_string())
        );
    }

    #[test]
    fn relative_base_url_is_rejected() {
        let config = ConsoleConfig {
            hospital_api_url: "hospital.local".to_string(),
            ..ConsoleConfig::default()
        };
        assert!(matches!(
            HospitalApiClient::new(&config),
            Err(ConsoleError::Internal(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_api_is_a_transport_error() {
        let config = ConsoleConfig {
            hospital_api_url: "http://127.0.0.1:9".to_string(),
            connect_timeout_secs: 1,
            request_timeout_secs: 2,
            ..ConsoleConfig::default()
        };
        let Ok(client) = HospitalApiClient::new(&config) else {
            panic!("client build failed");
        };
        let result = client.count(ResourceKind::Bills, &session()).await;
        assert!(matches!(result, Err(ConsoleError::Transport(_))));
    }
}
