//! Catalog of the admin resources managed through the console.
//!
//! Each [`ResourceKind`] knows its REST collection slug on the hospital
//! API, the JSON key the API uses for a single record, and which other
//! collections its form needs as dropdown lookups.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ConsoleError;

/// An admin resource with its own list screen and form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Hospital branches.
    Hospitals,
    /// Hospital departments.
    Departments,
    /// Doctors.
    Doctors,
    /// Patients.
    Patients,
    /// Patient appointments.
    Appointments,
    /// Patient bills.
    Bills,
    /// Payments against bills.
    Payments,
    /// Prescriptions.
    Prescriptions,
    /// Wards and rooms.
    Rooms,
    /// Medicine inventory.
    Medicines,
    /// Key/value system settings.
    Settings,
}

impl ResourceKind {
    /// Every resource, in sidebar order.
    pub const ALL: [Self; 11] = [
        Self::Hospitals,
        Self::Departments,
        Self::Doctors,
        Self::Patients,
        Self::Appointments,
        Self::Bills,
        Self::Payments,
        Self::Prescriptions,
        Self::Rooms,
        Self::Medicines,
        Self::Settings,
    ];

    /// Resources counted on the dashboard, in card order.
    pub const DASHBOARD: [Self; 8] = [
        Self::Patients,
        Self::Doctors,
        Self::Appointments,
        Self::Departments,
        Self::Rooms,
        Self::Medicines,
        Self::Bills,
        Self::Payments,
    ];

    /// Collection slug, as in `/api/<slug>`.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Hospitals => "hospitals",
            Self::Departments => "departments",
            Self::Doctors => "doctors",
            Self::Patients => "patients",
            Self::Appointments => "appointments",
            Self::Bills => "bills",
            Self::Payments => "payments",
            Self::Prescriptions => "prescriptions",
            Self::Rooms => "rooms",
            Self::Medicines => "medicines",
            Self::Settings => "settings",
        }
    }

    /// Key under which the API returns a single record (`{"bill": {...}}`).
    #[must_use]
    pub const fn detail_key(self) -> &'static str {
        match self {
            Self::Hospitals => "hospital",
            Self::Departments => "department",
            Self::Doctors => "doctor",
            Self::Patients => "patient",
            Self::Appointments => "appointment",
            Self::Bills => "bill",
            Self::Payments => "payment",
            Self::Prescriptions => "prescription",
            Self::Rooms => "room",
            Self::Medicines => "medicine",
            Self::Settings => "setting",
        }
    }

    /// Screen title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Hospitals => "Hospitals",
            Self::Departments => "Departments",
            Self::Doctors => "Doctors",
            Self::Patients => "Patients",
            Self::Appointments => "Appointments",
            Self::Bills => "Bills",
            Self::Payments => "Payments",
            Self::Prescriptions => "Prescriptions",
            Self::Rooms => "Rooms",
            Self::Medicines => "Medicines",
            Self::Settings => "Settings",
        }
    }

    /// Collections whose records populate this resource's form dropdowns.
    #[must_use]
    pub const fn lookups(self) -> &'static [Self] {
        match self {
            Self::Doctors | Self::Rooms => &[Self::Departments],
            Self::Patients => &[Self::Departments, Self::Doctors],
            Self::Appointments => &[Self::Patients, Self::Doctors, Self::Departments],
            Self::Bills => &[Self::Patients, Self::Appointments],
            Self::Payments => &[Self::Bills],
            Self::Prescriptions => &[
                Self::Appointments,
                Self::Doctors,
                Self::Patients,
                Self::Medicines,
            ],
            Self::Hospitals | Self::Departments | Self::Medicines | Self::Settings => &[],
        }
    }

    /// Whether the dashboard shows a count for this resource.
    #[must_use]
    pub fn on_dashboard(self) -> bool {
        Self::DASHBOARD.contains(&self)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ResourceKind {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| ConsoleError::InvalidResource(s.to_string()))
    }
}

/// Returns the identifier of an API record: `id`, falling back to `_id`.
#[must_use]
pub fn record_id(record: &serde_json::Value) -> Option<String> {
    ["id", "_id"].iter().find_map(|key| match record.get(key)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn slug_round_trips_through_from_str() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.slug().parse::<ResourceKind>().ok(), Some(kind));
        }
    }

    #[test]
    fn unknown_slug_is_rejected() {
        let result = "wards".parse::<ResourceKind>();
        assert!(matches!(result, Err(ConsoleError::InvalidResource(s)) if s == "wards"));
    }

    #[test]
    fn dashboard_excludes_admin_only_resources() {
        assert!(ResourceKind::Patients.on_dashboard());
        assert!(!ResourceKind::Settings.on_dashboard());
        assert!(!ResourceKind::Hospitals.on_dashboard());
        assert!(!ResourceKind::Prescriptions.on_dashboard());
    }

    #[test]
    fn lookups_never_reference_self() {
        for kind in ResourceKind::ALL {
            assert!(!kind.lookups().contains(&kind), "{kind}");
        }
    }

    #[test]
    fn bill_form_needs_patients_and_appointments() {
        assert_eq!(
            ResourceKind::Bills.lookups(),
            &[ResourceKind::Patients, ResourceKind::Appointments]
        );
        assert_eq!(ResourceKind::Bills.detail_key(), "bill");
    }

    #[test]
    fn record_id_prefers_id_over_mongo_id() {
        assert_eq!(
            record_id(&json!({"id": "a1", "_id": "b2"})),
            Some("a1".to_string())
        );
        assert_eq!(record_id(&json!({"_id": "b2"})), Some("b2".to_string()));
        assert_eq!(record_id(&json!({"id": 7})), Some("7".to_string()));
        assert_eq!(record_id(&json!({"name": "x"})), None);
    }
}
