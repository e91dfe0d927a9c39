//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::domain::Session;
use crate::error::ConsoleError;

/// Reads the bearer session from request headers, if any.
#[must_use]
pub fn session_from_headers(headers: &HeaderMap) -> Option<Session> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(Session::from_authorization)
}

/// Requires an `Authorization: Bearer <token>` header.
///
/// Only presence is checked here; expiry is checked by the service.
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = ConsoleError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_from_headers(&parts.headers)
            .ok_or_else(|| ConsoleError::Unauthorized("missing bearer token".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_bearer_header() {
        let mut headers = HeaderMap::new();
        assert!(session_from_headers(&headers).is_none());

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(
            session_from_headers(&headers).map(|s| s.token().to_string()),
            Some("abc".to_string())
        );

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(session_from_headers(&headers).is_none());
    }
}
