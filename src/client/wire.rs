//! Wire types exchanged with the hospital REST API.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{PageDescriptor, RecordPage};

/// Inner object of a list response: the records plus pagination fields
/// side by side (`{"data": [...], "page": 1, "limit": 10, ...}`).
#[derive(Debug, Default, Deserialize)]
pub struct ListPayload {
    /// Records on the page.
    #[serde(default)]
    pub data: Vec<Value>,
    /// Pagination fields.
    #[serde(flatten)]
    pub descriptor: PageDescriptor,
}

impl From<ListPayload> for RecordPage {
    fn from(payload: ListPayload) -> Self {
        Self {
            records: payload.data,
            descriptor: payload.descriptor,
        }
    }
}

/// Login form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Registration payload as the hospital API expects it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewAccount {
    /// Display name.
    pub name: String,
    /// Login name.
    pub username: String,
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Token issued by a successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuthToken {
    /// Bearer token for subsequent requests.
    pub token: String,
}

/// Reads the user-facing message of a response body.
///
/// Mutations report success under `success` and failures under `message`.
#[must_use]
pub fn body_message(body: &Value) -> Option<String> {
    ["success", "message"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_payload_reads_records_and_descriptor() {
        let raw = json!({
            "data": [{"id": "1"}, {"id": "2"}],
            "page": 2, "limit": 2, "total": 5, "totalPages": 3,
            "hasNextPage": true, "hasPrevPage": true, "nextPage": 3, "prevPage": 1
        });
        let Ok(payload) = serde_json::from_value::<ListPayload>(raw) else {
            panic!("payload should parse");
        };
        let page = RecordPage::from(payload);
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.descriptor, PageDescriptor::derive(2, 2, 5));
    }

    #[test]
    fn list_payload_tolerates_missing_fields() {
        let Ok(payload) = serde_json::from_value::<ListPayload>(json!({})) else {
            panic!("payload should parse");
        };
        assert!(payload.data.is_empty());
        assert_eq!(payload.descriptor, PageDescriptor::default());
    }

    #[test]
    fn body_message_prefers_success() {
        assert_eq!(
            body_message(&json!({"success": "Saved", "message": "ignored"})),
            Some("Saved".to_string())
        );
        assert_eq!(
            body_message(&json!({"message": "Email taken"})),
            Some("Email taken".to_string())
        );
        assert_eq!(body_message(&json!({"success": true})), None);
    }
}
