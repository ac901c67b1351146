//! Bakehouse Components - server-rendered listing widgets.
//!
//! Every component is a controlled view: the page handler owns all state
//! (selection, current page) and passes it in; interactions come back as
//! links built from caller-supplied targets.
//!
//! - [`Checkbox`] - stateless selection toggle
//! - [`ListHeadings`] - table header row from a [`ColumnSpec`](bakehouse_core::ColumnSpec)
//! - [`TableComponent`] - headings plus caller-rendered rows
//! - [`Pagination`] - page controls and range summary
//!
//! Components render to HTML strings that page templates embed with `|safe`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkbox;
pub mod headings;
pub mod links;
pub mod pagination;
pub mod table;

pub use checkbox::Checkbox;
pub use headings::{HeadingCell, ListHeadings};
pub use links::PageLinks;
pub use pagination::{PageIndicator, Pagination};
pub use table::TableComponent;

use askama::Template;

/// Render a component, logging and returning empty markup on failure.
pub(crate) fn render_or_log<T: Template>(template: &T, component: &'static str) -> String {
    template.render().unwrap_or_else(|e| {
        tracing::error!(component, error = %e, "Component render error");
        String::new()
    })
}
