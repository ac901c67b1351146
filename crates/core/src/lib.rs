//! Bakehouse Core - shared types library.
//!
//! This crate provides the types used by every Bakehouse component:
//! - `storefront` - public bakery shop
//! - `admin` - internal administration panel
//! - `components` - table, pagination and checkbox rendering
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no templates. Everything here is decided from its inputs alone.
//!
//! # Modules
//!
//! - [`types`] - record IDs, prices, statuses, login credentials
//! - [`listing`] - columns, pagination, row selection, backend page envelope
//! - [`guard`] - route classification and navigation guard decisions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod guard;
pub mod listing;
pub mod types;

pub use guard::{GuardDecision, RouteClass, RouteTable, token_present};
pub use listing::{
    Column, ColumnSpec, HeadingVariant, ListPage, PageChange, PaginationState, RowSelection,
    compact_count,
};
pub use types::*;
