//! Domain layer: pagination controller, resource catalog, list state, and
//! session gating.
//!
//! Everything here is synchronous and free of I/O. The pagination
//! controller is the core: it turns a [`PageDescriptor`] into a rendered
//! [`PaginationView`] and resolves navigation into a [`PageTarget`].

pub mod list_state;
pub mod pagination;
pub mod resource;
pub mod session;

pub use list_state::{ListState, RecordPage};
pub use pagination::{
    NavigationEvent, PageControl, PageDescriptor, PageLimit, PageLink, PageTarget, PageWindow,
    PaginationView, RecordRange,
};
pub use resource::ResourceKind;
pub use session::{Access, Area, Session};
