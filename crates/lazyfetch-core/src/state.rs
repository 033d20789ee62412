// ── Fetch state ──

use chrono::{DateTime, Utc};

use crate::page::Pagination;

/// Snapshot of one fetcher instance's state.
///
/// Owned exclusively by its fetcher; consumers observe it through
/// `snapshot()` clones or a `watch` subscription.
#[derive(Debug, Clone)]
pub struct FetchState<T> {
    /// Current materialized value; seeded from the configured initial data.
    pub data: T,
    /// True exactly while a request is in flight.
    pub is_loading: bool,
    /// True once at least one successful response has been merged.
    /// Cleared only by explicit caller action, never by later fetches.
    pub has_loaded: bool,
    /// Paginated only: true iff the last response indicated a further page.
    pub has_more: bool,
    /// Last-seen server pagination envelope.
    pub pagination: Pagination,
    /// Wall-clock time of the last successful merge.
    pub fetched_at: Option<DateTime<Utc>>,
}

impl<T> FetchState<T> {
    pub fn new(initial: T) -> Self {
        Self {
            data: initial,
            is_loading: false,
            has_loaded: false,
            has_more: false,
            pagination: Pagination::default(),
            fetched_at: None,
        }
    }
}
