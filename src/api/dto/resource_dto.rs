//! Resource catalog, dashboard, and session DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Area, ResourceKind};
use crate::service::ResourceCount;

/// Catalog entry for `GET /config/resources`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResourceInfo {
    /// Resource identifier.
    pub resource: ResourceKind,
    /// Screen title.
    pub title: String,
    /// Key the hospital API uses for a single record.
    pub detail_key: String,
    /// Whether the resource has a dashboard card.
    pub on_dashboard: bool,
    /// Collections loaded for the form's dropdowns.
    pub lookups: Vec<ResourceKind>,
}

impl From<ResourceKind> for ResourceInfo {
    fn from(kind: ResourceKind) -> Self {
        Self {
            resource: kind,
            title: kind.title().to_string(),
            detail_key: kind.detail_key().to_string(),
            on_dashboard: kind.on_dashboard(),
            lookups: kind.lookups().to_vec(),
        }
    }
}

/// Response body for `GET /dashboard`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardResponse {
    /// One card per dashboard resource.
    pub counts: Vec<ResourceCount>,
}

/// Query for `GET /session`.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SessionQuery {
    /// Area the UI is about to render.
    pub area: Area,
}
