//! Data Transfer Objects for REST request/response serialization.
//!
//! Screen, form, and auth bodies are the service types themselves; this
//! module only holds the shapes specific to the HTTP surface.

pub mod common_dto;
pub mod resource_dto;

pub use common_dto::*;
pub use resource_dto::*;
