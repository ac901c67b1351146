//! Backend list envelope.

use serde::{Deserialize, Serialize};

/// One page of records as returned by the bakery API's page-number
/// pagination: `{"count": 42, "next": ..., "previous": ..., "results": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPage<T> {
    /// Records on this page.
    #[serde(rename = "results", default = "Vec::new")]
    pub items: Vec<T>,
    /// Total records across all pages.
    #[serde(rename = "count", default)]
    pub total_count: u64,
}

impl<T> ListPage<T> {
    /// An empty page (used when the backend is unavailable).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }

    /// Transform every record, keeping the total.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListPage<U> {
        ListPage {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
        }
    }
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self::empty()
    }
}
