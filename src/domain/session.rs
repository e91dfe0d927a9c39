//! Session object and guest/admin route gating.
//!
//! A [`Session`] is built once per request from the bearer token and passed
//! explicitly to everything that talks to the hospital API. Validity is a
//! local check: the token must be present and, when it is a JWT carrying
//! an `exp` claim, not yet expired. The hospital API stays the authority
//! on whether the token is actually accepted.

use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Path the admin area redirects to when the session is invalid.
pub const LOGIN_PATH: &str = "/auth/login";

/// Path the guest area redirects to when the session is valid.
pub const DASHBOARD_PATH: &str = "/admin/dashboard";

/// Bearer token of the signed-in administrator.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

/// The subset of JWT claims the console inspects.
#[derive(Debug, Deserialize)]
struct Claims {
    exp: Option<i64>,
}

impl Session {
    /// Wraps a raw token. Surrounding whitespace is trimmed.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        let token: String = token.into();
        Self {
            token: token.trim().to_string(),
        }
    }

    /// Extracts the token from an `Authorization: Bearer <token>` value.
    #[must_use]
    pub fn from_authorization(header: &str) -> Option<Self> {
        let (scheme, token) = header.trim().split_once(' ')?;
        scheme
            .eq_ignore_ascii_case("bearer")
            .then(|| Self::new(token))
    }

    /// Raw token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Expiry from the token's `exp` claim, when it is a decodable JWT.
    ///
    /// The signature is not checked: the console cannot verify it and the
    /// hospital API does on every request.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let data = decode::<Claims>(&self.token, &DecodingKey::from_secret(&[]), &validation).ok()?;
        DateTime::from_timestamp(data.claims.exp?, 0)
    }

    /// Whether the token is present and not expired at `now`.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        if self.token.is_empty() {
            return false;
        }
        self.expires_at().is_none_or(|exp| exp > now)
    }

    /// Whether the token is present and not expired.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Which half of the console a route belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Area {
    /// Login and registration pages.
    Guest,
    /// Authenticated admin pages.
    Admin,
}

/// Outcome of gating a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Access {
    /// Render the requested page.
    Allow,
    /// Navigate elsewhere instead.
    Redirect {
        /// Destination path.
        to: String,
    },
}

/// Decides whether `area` may be shown for `session`.
///
/// Admin pages need a valid session; guest pages bounce signed-in users to
/// the dashboard.
#[must_use]
pub fn gate(area: Area, session: Option<&Session>, now: DateTime<Utc>) -> Access {
    let valid = session.is_some_and(|s| s.is_valid_at(now));
    match (area, valid) {
        (Area::Admin, false) => Access::Redirect {
            to: LOGIN_PATH.to_string(),
        },
        (Area::Guest, true) => Access::Redirect {
            to: DASHBOARD_PATH.to_string(),
        },
        _ => Access::Allow,
    }
}
