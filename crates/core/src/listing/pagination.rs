//! Page arithmetic for paged listings.
//!
//! Pages are 1-based everywhere a human or a URL sees them (`?page=3`).
//! Page-change events are 0-based indices; [`PageChange`] is the only place
//! the two meet.

use serde::{Deserialize, Serialize};

/// Current position within a paged listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    current_page: u64,
    items_per_page: u64,
    total_items: u64,
}

impl PaginationState {
    /// Create a pagination state.
    ///
    /// `current_page` is 1-based; `0` is treated as the first page. An
    /// `items_per_page` of `0` yields zero pages.
    #[must_use]
    pub const fn new(current_page: u64, items_per_page: u64, total_items: u64) -> Self {
        Self {
            current_page: if current_page == 0 { 1 } else { current_page },
            items_per_page,
            total_items,
        }
    }

    /// Create a pagination state from untrusted signed values.
    ///
    /// Negative counts clamp to zero, which produces zero pages.
    #[must_use]
    pub fn from_signed(current_page: i64, items_per_page: i64, total_items: i64) -> Self {
        let clamp = |v: i64| u64::try_from(v).unwrap_or(0);
        Self::new(clamp(current_page), clamp(items_per_page), clamp(total_items))
    }

    #[must_use]
    pub const fn current_page(&self) -> u64 {
        self.current_page
    }

    #[must_use]
    pub const fn items_per_page(&self) -> u64 {
        self.items_per_page
    }

    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// `ceil(total_items / items_per_page)`, or `0` when the page size is `0`.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        if self.items_per_page == 0 {
            0
        } else {
            self.total_items.div_ceil(self.items_per_page)
        }
    }

    /// Controls are shown only when the items do not fit on one page.
    #[must_use]
    pub const fn should_paginate(&self) -> bool {
        self.items_per_page > 0 && self.total_items > self.items_per_page
    }

    /// 0-based index of the active page.
    #[must_use]
    pub const fn active_index(&self) -> u64 {
        self.current_page - 1
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Number of items before the current page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.active_index().saturating_mul(self.items_per_page)
    }

    /// 1-based inclusive range of items shown on the current page.
    ///
    /// Returns `None` when the current page is empty.
    #[must_use]
    pub fn visible_range(&self) -> Option<(u64, u64)> {
        let start = self.offset().saturating_add(1);
        let end = self
            .current_page
            .saturating_mul(self.items_per_page)
            .min(self.total_items);
        (self.items_per_page > 0 && start <= end).then_some((start, end))
    }

    /// The page slice of a fully loaded list.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let len = usize::try_from(self.items_per_page).unwrap_or(usize::MAX);
        let end = start.saturating_add(len).min(items.len());
        items.get(start..end).unwrap_or(&[])
    }

    /// Apply a page-change event.
    #[must_use]
    pub const fn apply(self, change: PageChange) -> Self {
        Self::new(change.page(), self.items_per_page, self.total_items)
    }
}

/// A page-change event carrying a 0-based page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageChange {
    index: u64,
}

impl PageChange {
    /// Event for the 0-based page `index`.
    #[must_use]
    pub const fn from_index(index: u64) -> Self {
        Self { index }
    }

    /// Event for the 1-based page number `page` (`0` is the first page).
    #[must_use]
    pub const fn from_page(page: u64) -> Self {
        Self {
            index: page.saturating_sub(1),
        }
    }

    #[must_use]
    pub const fn index(self) -> u64 {
        self.index
    }

    /// The 1-based page number used in URLs.
    #[must_use]
    pub const fn page(self) -> u64 {
        self.index.saturating_add(1)
    }
}

/// Abbreviate large counts for summaries: `999` stays `999`, `1500` becomes `1.5K`.
#[must_use]
pub fn compact_count(count: u64) -> String {
    if count > 999 {
        let tenths = (count + 50) / 100;
        format!("{}.{}K", tenths / 10, tenths % 10)
    } else {
        count.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_ceiling() {
        assert_eq!(PaginationState::new(1, 10, 0).total_pages(), 0);
        assert_eq!(PaginationState::new(1, 10, 10).total_pages(), 1);
        assert_eq!(PaginationState::new(1, 10, 11).total_pages(), 2);
        assert_eq!(PaginationState::new(1, 10, 95).total_pages(), 10);
    }

    #[test]
    fn fits_on_one_page_means_no_controls() {
        for total in 0..=10 {
            assert!(!PaginationState::new(1, 10, total).should_paginate());
        }
        assert!(PaginationState::new(1, 10, 11).should_paginate());
    }

    #[test]
    fn zero_page_size_yields_zero_pages() {
        let state = PaginationState::new(1, 0, 25);
        assert_eq!(state.total_pages(), 0);
        assert!(!state.should_paginate());
        assert_eq!(state.visible_range(), None);
    }

    #[test]
    fn negative_inputs_clamp_to_zero_pages() {
        let state = PaginationState::from_signed(-3, -10, -5);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.total_pages(), 0);
        assert!(!state.should_paginate());

        let state = PaginationState::from_signed(1, 10, -5);
        assert_eq!(state.total_items(), 0);
    }

    #[test]
    fn page_zero_is_first_page() {
        let state = PaginationState::new(0, 10, 30);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.active_index(), 0);
        assert!(!state.has_previous());
        assert!(state.has_next());
    }

    #[test]
    fn last_page_has_no_next() {
        let state = PaginationState::new(3, 10, 30);
        assert!(state.has_previous());
        assert!(!state.has_next());
    }

    #[test]
    fn visible_range_clips_to_total() {
        assert_eq!(PaginationState::new(1, 10, 25).visible_range(), Some((1, 10)));
        assert_eq!(PaginationState::new(3, 10, 25).visible_range(), Some((21, 25)));
        assert_eq!(PaginationState::new(4, 10, 25).visible_range(), None);
    }

    #[test]
    fn slice_returns_current_page() {
        let items: Vec<u32> = (1..=25).collect();
        assert_eq!(PaginationState::new(1, 10, 25).slice(&items), &items[..10]);
        assert_eq!(PaginationState::new(3, 10, 25).slice(&items), &[21, 22, 23, 24, 25]);
        assert!(PaginationState::new(9, 10, 25).slice(&items).is_empty());
    }

    #[test]
    fn page_change_converts_between_bases() {
        let change = PageChange::from_index(2);
        assert_eq!(change.page(), 3);
        assert_eq!(PageChange::from_page(3), change);
        assert_eq!(PageChange::from_page(0).index(), 0);

        let state = PaginationState::new(1, 10, 50).apply(change);
        assert_eq!(state.current_page(), 3);
        assert_eq!(state.active_index(), 2);
    }

    #[test]
    fn compact_count_abbreviates_thousands() {
        assert_eq!(compact_count(0), "0");
        assert_eq!(compact_count(999), "999");
        assert_eq!(compact_count(1000), "1.0K");
        assert_eq!(compact_count(1540), "1.5K");
        assert_eq!(compact_count(12_960), "13.0K");
    }
}
