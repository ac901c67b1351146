//! Page controls.

use askama::Template;
use bakehouse_core::{PageChange, PaginationState, compact_count};

use crate::PageLinks;

/// One numbered page indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageIndicator {
    /// 1-based page number shown to the user.
    pub number: u64,
    pub href: String,
    pub active: bool,
}

/// Previous/next controls, one indicator per page, and a range summary.
///
/// Renders nothing when every item fits on one page.
#[derive(Debug, Clone, PartialEq, Eq, Template)]
#[template(path = "components/pagination.html")]
pub struct Pagination {
    visible: bool,
    summary: String,
    previous_href: String,
    next_href: String,
    pages: Vec<PageIndicator>,
}

impl Pagination {
    #[must_use]
    pub fn new(state: PaginationState, links: &PageLinks) -> Self {
        if !state.should_paginate() {
            return Self {
                visible: false,
                summary: String::new(),
                previous_href: String::new(),
                next_href: String::new(),
                pages: Vec::new(),
            };
        }

        let active = state.active_index();
        let pages = (0..state.total_pages())
            .map(|index| {
                let change = PageChange::from_index(index);
                PageIndicator {
                    number: change.page(),
                    href: links.href(change),
                    active: index == active,
                }
            })
            .collect();

        // Past the end, "previous" goes back to the last real page.
        let previous_href = if active >= state.total_pages() {
            links.href(PageChange::from_index(state.total_pages() - 1))
        } else if state.has_previous() {
            links.href(PageChange::from_index(active - 1))
        } else {
            String::new()
        };
        let next_href = if state.has_next() {
            links.href(PageChange::from_index(active + 1))
        } else {
            String::new()
        };

        Self {
            visible: true,
            summary: summary(state),
            previous_href,
            next_href,
            pages,
        }
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn pages(&self) -> &[PageIndicator] {
        &self.pages
    }

    /// 0-based index of the active indicator.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.pages.iter().position(|p| p.active)
    }

    #[must_use]
    pub fn previous_href(&self) -> Option<&str> {
        (!self.previous_href.is_empty()).then_some(self.previous_href.as_str())
    }

    #[must_use]
    pub fn next_href(&self) -> Option<&str> {
        (!self.next_href.is_empty()).then_some(self.next_href.as_str())
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        crate::render_or_log(self, "pagination")
    }
}

fn summary(state: PaginationState) -> String {
    let total = compact_count(state.total_items());
    match state.visible_range() {
        Some((start, end)) => format!("Showing data {start} to {end} of {total} entries"),
        None => format!("Showing data 0 to 0 of {total} entries"),
    }
}
