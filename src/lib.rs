//! # hospital-console
//!
//! Backend for the hospital management admin console.
//!
//! The console sits between the admin UI and the hospital REST API. Every
//! resource screen (patients, doctors, bills, ...) is the same paginated
//! list with a create/edit dialog; this crate serves those screens as
//! JSON, including a fully rendered pagination bar, and forwards
//! mutations and sign-in to the hospital API.
//!
//! ## Architecture
//!
//! ```text
//! Admin UI (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── ConsoleService (service/)
//!     │
//!     ├── Pagination controller, resource catalog,
//!     │   list state, session gate (domain/)
//!     │
//!     └── HospitalApiClient (client/) ──► hospital REST API
//! ```

pub mod api;
pub mod app_state;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
