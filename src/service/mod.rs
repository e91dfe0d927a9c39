//! Service layer: business logic orchestration.
//!
//! [`ConsoleService`] drives every admin screen: it loads pages through
//! the [`crate::client::HospitalApi`], renders pagination, and refetches
//! after mutations.

pub mod console_service;

pub use console_service::{
    ConsoleService, FormView, MutationOutcome, Registration, ResourceCount, ScreenView,
};
