//! Per-screen list state.

use serde_json::Value;

use super::pagination::{PageDescriptor, PaginationView};

/// One page of records as returned by the hospital API.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPage {
    /// Records on this page.
    pub records: Vec<Value>,
    /// Pagination metadata for this page.
    pub descriptor: PageDescriptor,
}

/// The records and descriptor currently displayed by a screen.
///
/// A fetch replaces both at once through [`ListState::replace`]; the
/// descriptor is never edited in place.
#[derive(Debug, Clone, Default)]
pub struct ListState {
    page: RecordPage,
    generation: u64,
}

impl ListState {
    /// Creates an empty state (nothing loaded yet).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps in a freshly fetched page.
    pub fn replace(&mut self, page: RecordPage) {
        self.page = page;
        self.generation = self.generation.saturating_add(1);
        tracing::debug!(
            generation = self.generation,
            records = self.page.records.len(),
            total = self.page.descriptor.total,
            "list state replaced"
        );
    }

    /// Records currently displayed.
    #[must_use]
    pub fn records(&self) -> &[Value] {
        &self.page.records
    }

    /// Descriptor of the displayed page.
    #[must_use]
    pub const fn descriptor(&self) -> &PageDescriptor {
        &self.page.descriptor
    }

    /// Number of fetches applied so far.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Renders the pagination bar for the displayed page.
    #[must_use]
    pub fn view(&self, base_query: &str) -> Option<PaginationView> {
        PaginationView::render(&self.page.descriptor, base_query)
    }

    /// Consumes the state, yielding the displayed page.
    #[must_use]
    pub fn into_page(self) -> RecordPage {
        self.page
    }
}
