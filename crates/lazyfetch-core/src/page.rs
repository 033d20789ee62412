// ── Server pagination envelope ──

use serde::{Deserialize, Serialize};

/// Pagination envelope returned alongside paginated payloads.
///
/// The engine inspects only `next` (whether a further page exists);
/// every other field passes through untouched so callers can compute
/// page counts and ranges for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub count: i64,
    pub page: i64,
    pub limit: i64,
    /// Next page token; `None` means no further pages.
    pub next: Option<i64>,
    pub prev: Option<i64>,
    pub from: i64,
    pub to: i64,
    /// Items in the current page. `in` is a Rust keyword, hence the rename.
    #[serde(rename = "in")]
    pub in_page: i64,
    pub last: i64,
    pub offset: i64,
    pub outset: i64,
    pub overflow: i64,
}

impl Pagination {
    /// Whether the server indicated a further page exists.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}
