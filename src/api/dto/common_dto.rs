//! Shared DTO types used across multiple endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::PageTarget;

/// Pagination query parameters for screen endpoints.
///
/// Absent values default to page 1 and 10 rows; an unsupported `limit`
/// falls back to 10.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScreenQuery {
    /// Page number (1-indexed). Defaults to 1.
    pub page: Option<u32>,
    /// Rows per page: 10, 25, 50 or 100. Defaults to 10.
    pub limit: Option<u32>,
}

impl ScreenQuery {
    /// Resolves the query to a concrete navigation target.
    #[must_use]
    pub fn target(self) -> PageTarget {
        PageTarget::from_params(self.page, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_targets_first_page() {
        assert_eq!(ScreenQuery::default().target(), PageTarget::default());
    }

    #[test]
    fn unsupported_limit_falls_back() {
        let query = ScreenQuery {
            page: Some(3),
            limit: Some(7),
        };
        assert_eq!(query.target(), PageTarget { page: 3, limit: 10 });
    }
}
