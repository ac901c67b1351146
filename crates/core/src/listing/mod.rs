//! Listing model shared by every paged table.
//!
//! - [`column`] - header columns and styling variants
//! - [`pagination`] - page arithmetic and page-change events
//! - [`selection`] - selected row ids
//! - [`page`] - backend list envelope

pub mod column;
pub mod page;
pub mod pagination;
pub mod selection;

pub use column::{Column, ColumnSpec, HeadingVariant, SELECTION_MARKER};
pub use page::ListPage;
pub use pagination::{PageChange, PaginationState, compact_count};
pub use selection::RowSelection;
