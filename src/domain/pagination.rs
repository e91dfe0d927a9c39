//! Pagination controller: page windows, record ranges, and navigation.
//!
//! A [`PageDescriptor`] arrives with every list fetch from the hospital
//! API. The controller only reads it: it derives the window of page
//! buttons to show, the "Showing X to Y of Z" summary, and resolves
//! navigation intents into a [`PageTarget`] that the caller turns into a
//! refetch. Nothing here performs I/O.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum number of numbered page buttons, excluding shortcuts.
pub const MAX_WINDOW: u32 = 5;

/// Default page size when none (or an unsupported one) is requested.
pub const DEFAULT_LIMIT: PageLimit = PageLimit::Ten;

/// Page sizes offered by the size selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageLimit {
    /// 10 rows per page.
    Ten,
    /// 25 rows per page.
    TwentyFive,
    /// 50 rows per page.
    Fifty,
    /// 100 rows per page.
    Hundred,
}

impl PageLimit {
    /// Every selectable size, in display order.
    pub const ALL: [Self; 4] = [Self::Ten, Self::TwentyFive, Self::Fifty, Self::Hundred];

    /// Returns the number of rows per page.
    #[must_use]
    pub const fn get(self) -> u32 {
        match self {
            Self::Ten => 10,
            Self::TwentyFive => 25,
            Self::Fifty => 50,
            Self::Hundred => 100,
        }
    }

    /// Maps a raw number onto a selectable size.
    #[must_use]
    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            10 => Some(Self::Ten),
            25 => Some(Self::TwentyFive),
            50 => Some(Self::Fifty),
            100 => Some(Self::Hundred),
            _ => None,
        }
    }
}

impl Default for PageLimit {
    fn default() -> Self {
        DEFAULT_LIMIT
    }
}

impl TryFrom<u32> for PageLimit {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_u32(value).ok_or_else(|| format!("unsupported page size: {value}"))
    }
}

impl From<PageLimit> for u32 {
    fn from(limit: PageLimit) -> Self {
        limit.get()
    }
}

impl fmt::Display for PageLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Pagination metadata returned alongside a list query.
///
/// Field names follow the hospital API envelope (camelCase). Every field
/// is optional on the wire and falls back to the [`Default`] values, so an
/// absent or partial envelope yields the "nothing loaded" descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PageDescriptor {
    /// Current page, 1-indexed.
    pub page: u32,
    /// Rows per page.
    pub limit: u32,
    /// Total matching records.
    pub total: u64,
    /// `ceil(total / limit)`, or 0 when there are no records.
    pub total_pages: u32,
    /// Whether a page after `page` exists.
    pub has_next_page: bool,
    /// Whether a page before `page` exists.
    pub has_prev_page: bool,
    /// `page + 1` when `has_next_page`.
    pub next_page: Option<u32>,
    /// `page - 1` when `has_prev_page`.
    pub prev_page: Option<u32>,
}

impl Default for PageDescriptor {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT.get(),
            total: 0,
            total_pages: 0,
            has_next_page: false,
            has_prev_page: false,
            next_page: None,
            prev_page: None,
        }
    }
}

impl PageDescriptor {
    /// Builds a descriptor from `(page, limit, total)`, deriving the page
    /// count and the next/previous links.
    ///
    /// A zero `limit` is treated as 1 so the page count stays defined.
    #[must_use]
    pub fn derive(page: u32, limit: u32, total: u64) -> Self {
        let per_page = u64::from(limit.max(1));
        let total_pages = if total == 0 {
            0
        } else {
            u32::try_from(total.div_ceil(per_page)).unwrap_or(u32::MAX)
        };
        let has_next_page = page < total_pages;
        let has_prev_page = page > 1 && total_pages > 0;

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next_page,
            has_prev_page,
            next_page: has_next_page.then(|| page.saturating_add(1)),
            prev_page: has_prev_page.then(|| page.saturating_sub(1).min(total_pages)),
        }
    }

    /// Returns `true` when no page controls should be rendered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_pages == 0
    }

    /// Computes the window of numbered page buttons.
    #[must_use]
    pub fn window(&self) -> PageWindow {
        PageWindow::compute(self.page, self.total_pages)
    }

    /// Returns the 1-indexed range of records shown on the current page.
    #[must_use]
    pub fn record_range(&self) -> RecordRange {
        let page = u64::from(self.page);
        let limit = u64::from(self.limit);
        let start = if self.total == 0 {
            0
        } else {
            page.saturating_sub(1).saturating_mul(limit).saturating_add(1)
        };
        let end = page.saturating_mul(limit).min(self.total);
        RecordRange {
            start,
            end,
            total: self.total,
        }
    }

    /// Target for jumping to page `n`, or `None` when `n` is out of range.
    #[must_use]
    pub fn go_to_page(&self, n: u32) -> Option<PageTarget> {
        (1..=self.total_pages).contains(&n).then(|| PageTarget {
            page: n,
            limit: self.limit,
        })
    }

    /// Target for the following page, when one exists.
    #[must_use]
    pub fn go_to_next(&self) -> Option<PageTarget> {
        if !self.has_next_page {
            return None;
        }
        self.next_page.map(|page| PageTarget {
            page,
            limit: self.limit,
        })
    }

    /// Target for the preceding page, when one exists.
    #[must_use]
    pub fn go_to_prev(&self) -> Option<PageTarget> {
        if !self.has_prev_page {
            return None;
        }
        self.prev_page.map(|page| PageTarget {
            page,
            limit: self.limit,
        })
    }

    /// Target for a new page size. Always restarts at page 1.
    #[must_use]
    pub const fn set_limit(&self, limit: PageLimit) -> PageTarget {
        PageTarget {
            page: 1,
            limit: limit.get(),
        }
    }
}

/// Contiguous run of page numbers rendered as buttons, plus the
/// shortcut/ellipsis decisions around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pages: Vec<u32>,
    total_pages: u32,
}

impl PageWindow {
    /// Centers a window of at most [`MAX_WINDOW`] pages on `page`.
    #[must_use]
    pub fn compute(page: u32, total_pages: u32) -> Self {
        if total_pages <= MAX_WINDOW {
            return Self {
                pages: (1..=total_pages).collect(),
                total_pages,
            };
        }

        let span = MAX_WINDOW - 1;
        let mut start = page.saturating_sub(MAX_WINDOW / 2).max(1);
        let end = total_pages.min(start.saturating_add(span));
        if end.saturating_sub(start) < span {
            start = end.saturating_sub(span).max(1);
        }

        Self {
            pages: (start..=end).collect(),
            total_pages,
        }
    }

    /// Page numbers in the window, ascending.
    #[must_use]
    pub fn pages(&self) -> &[u32] {
        &self.pages
    }

    /// Whether a "page 1" shortcut precedes the window.
    #[must_use]
    pub fn has_first_shortcut(&self) -> bool {
        self.pages.first().is_some_and(|&first| first > 1)
    }

    /// Whether an ellipsis separates the first shortcut from the window.
    #[must_use]
    pub fn has_leading_ellipsis(&self) -> bool {
        self.pages.first().is_some_and(|&first| first > 2)
    }

    /// Whether a last-page shortcut follows the window.
    #[must_use]
    pub fn has_last_shortcut(&self) -> bool {
        self.pages
            .last()
            .is_some_and(|&last| last < self.total_pages)
    }

    /// Whether an ellipsis separates the window from the last shortcut.
    #[must_use]
    pub fn has_trailing_ellipsis(&self) -> bool {
        self.pages
            .last()
            .is_some_and(|&last| last < self.total_pages.saturating_sub(1))
    }
}

/// First/last record numbers displayed on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct RecordRange {
    /// First record on the page (0 when there are no records).
    pub start: u64,
    /// Last record on the page.
    pub end: u64,
    /// Total matching records.
    pub total: u64,
}

impl fmt::Display for RecordRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Showing {} to {} of {} entries",
            self.start, self.end, self.total
        )
    }
}

/// The `(page, limit)` pair a navigation resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageTarget {
    /// Target page, 1-indexed.
    pub page: u32,
    /// Target rows per page.
    pub limit: u32,
}

impl Default for PageTarget {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT.get(),
        }
    }
}

impl PageTarget {
    /// Normalizes raw query parameters: a missing or zero page becomes 1,
    /// a missing or unsupported limit becomes [`DEFAULT_LIMIT`].
    #[must_use]
    pub fn from_params(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.filter(|&p| p > 0).unwrap_or(1),
            limit: limit
                .and_then(PageLimit::from_u32)
                .unwrap_or_default()
                .get(),
        }
    }

    /// Canonical query string: `page=<page>&limit=<limit>`.
    #[must_use]
    pub fn to_query(&self) -> String {
        format!("page={}&limit={}", self.page, self.limit)
    }

    /// Writes `page` and `limit` into an existing query string.
    ///
    /// Existing `page`/`limit` pairs are replaced at their first position
    /// and later duplicates dropped; all other pairs keep their order.
    /// Missing keys are appended, `page` first.
    #[must_use]
    pub fn merge_into(&self, query: &str) -> String {
        let page = format!("page={}", self.page);
        let limit = format!("limit={}", self.limit);
        let mut page_written = false;
        let mut limit_written = false;
        let mut pairs: Vec<String> = Vec::new();

        for pair in query.trim_start_matches('?').split('&') {
            if pair.is_empty() {
                continue;
            }
            let key = pair.split_once('=').map_or(pair, |(k, _)| k);
            match key {
                "page" => {
                    if !page_written {
                        pairs.push(page.clone());
                        page_written = true;
                    }
                }
                "limit" => {
                    if !limit_written {
                        pairs.push(limit.clone());
                        limit_written = true;
                    }
                }
                _ => pairs.push(pair.to_string()),
            }
        }
        if !page_written {
            pairs.push(page);
        }
        if !limit_written {
            pairs.push(limit);
        }
        pairs.join("&")
    }
}

/// Navigation events a screen emits upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum NavigationEvent {
    /// Jump to a page at the current size.
    PageChange(u32),
    /// Switch page size; resets to page 1.
    LimitChange(PageLimit),
}

impl NavigationEvent {
    /// Resolves the event against the current descriptor.
    ///
    /// Out-of-range page changes resolve to `None`.
    #[must_use]
    pub fn resolve(self, descriptor: &PageDescriptor) -> Option<PageTarget> {
        match self {
            Self::PageChange(page) => descriptor.go_to_page(page),
            Self::LimitChange(limit) => Some(descriptor.set_limit(limit)),
        }
    }
}

/// A navigation target together with the query string that selects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageLink {
    /// Target page.
    pub page: u32,
    /// Target rows per page.
    pub limit: u32,
    /// Query string for the target, merged with the caller's query.
    pub query: String,
}

impl PageLink {
    fn new(target: PageTarget, base_query: &str) -> Self {
        Self {
            page: target.page,
            limit: target.limit,
            query: target.merge_into(base_query),
        }
    }
}

/// One element of the rendered control strip, left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageControl {
    /// Previous button; `link` is absent when disabled.
    Previous {
        /// Navigation link, if enabled.
        link: Option<PageLink>,
    },
    /// Shortcut to page 1.
    First {
        /// Navigation link.
        link: PageLink,
    },
    /// Non-clickable gap marker.
    Ellipsis,
    /// Numbered page button.
    Page {
        /// Page number.
        number: u32,
        /// Whether this is the current page.
        active: bool,
        /// Navigation link.
        link: PageLink,
    },
    /// Shortcut to the last page.
    Last {
        /// Navigation link.
        link: PageLink,
    },
    /// Next button; `link` is absent when disabled.
    Next {
        /// Navigation link, if enabled.
        link: Option<PageLink>,
    },
}

/// Entry in the page-size selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LimitOption {
    /// Rows per page.
    pub limit: u32,
    /// Whether this is the current size.
    pub selected: bool,
    /// Navigation link (always page 1).
    pub link: PageLink,
}

/// Everything the UI needs to draw the pagination bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaginationView {
    /// Current page.
    pub page: u32,
    /// Rows per page.
    pub limit: u32,
    /// Total matching records.
    pub total: u64,
    /// Total pages.
    pub total_pages: u32,
    /// Record range on this page.
    pub range: RecordRange,
    /// `"Showing X to Y of Z entries"`.
    pub summary: String,
    /// `"Page P of N"`.
    pub page_summary: String,
    /// Numbered pages in the window.
    pub window: Vec<u32>,
    /// Ordered control strip.
    pub controls: Vec<PageControl>,
    /// Page-size selector entries.
    pub limit_options: Vec<LimitOption>,
}

impl PaginationView {
    /// Renders the pagination bar for `descriptor`.
    ///
    /// Returns `None` when there are no pages: the bar is not shown at all.
    /// `base_query` is the query string of the current screen; every link
    /// preserves its non-pagination parameters.
    #[must_use]
    pub fn render(descriptor: &PageDescriptor, base_query: &str) -> Option<Self> {
        if descriptor.is_empty() {
            return None;
        }

        let window = descriptor.window();
        let link = |target: PageTarget| PageLink::new(target, base_query);
        let jump = |page: u32| {
            link(PageTarget {
                page,
                limit: descriptor.limit,
            })
        };

        let mut controls = Vec::with_capacity(window.pages().len() + 6);
        controls.push(PageControl::Previous {
            link: descriptor.go_to_prev().map(&link),
        });
        if window.has_first_shortcut() {
            controls.push(PageControl::First { link: jump(1) });
            if window.has_leading_ellipsis() {
                controls.push(PageControl::Ellipsis);
            }
        }
        controls.extend(window.pages().iter().map(|&number| PageControl::Page {
            number,
            active: number == descriptor.page,
            link: jump(number),
        }));
        if window.has_last_shortcut() {
            if window.has_trailing_ellipsis() {
                controls.push(PageControl::Ellipsis);
            }
            controls.push(PageControl::Last {
                link: jump(descriptor.total_pages),
            });
        }
        controls.push(PageControl::Next {
            link: descriptor.go_to_next().map(&link),
        });

        let limit_options = PageLimit::ALL
            .iter()
            .map(|&size| LimitOption {
                limit: size.get(),
                selected: size.get() == descriptor.limit,
                link: link(descriptor.set_limit(size)),
            })
            .collect();

        let range = descriptor.record_range();
        Some(Self {
            page: descriptor.page,
            limit: descriptor.limit,
            total: descriptor.total,
            total_pages: descriptor.total_pages,
            summary: range.to_string(),
            page_summary: format!("Page {} of {}", descriptor.page, descriptor.total_pages),
            range,
            window: window.pages().to_vec(),
            controls,
            limit_options,
        })
    }
}
