//! Table shell.

use askama::Template;
use bakehouse_core::{ColumnSpec, HeadingVariant};

use crate::{Checkbox, ListHeadings};

/// A `<table>` with a [`ListHeadings`] header and caller-rendered body rows.
///
/// Rows are inserted verbatim; the caller is responsible for escaping
/// anything it interpolates into them.
#[derive(Debug, Clone, PartialEq, Eq, Template)]
#[template(path = "components/table.html")]
pub struct TableComponent {
    headings_html: String,
    rows_html: String,
    column_count: usize,
    empty_message: String,
}

impl TableComponent {
    #[must_use]
    pub fn new(headings: &ListHeadings, rows_html: impl Into<String>) -> Self {
        Self {
            headings_html: headings.to_html(),
            rows_html: rows_html.into(),
            column_count: headings.column_count(),
            empty_message: String::new(),
        }
    }

    /// Build headings and table in one step.
    #[must_use]
    pub fn build(
        columns: &ColumnSpec,
        select_all: &Checkbox,
        variant: HeadingVariant,
        rows_html: impl Into<String>,
    ) -> Self {
        Self::new(&ListHeadings::new(columns, select_all, variant), rows_html)
    }

    /// Row shown across all columns when there are no rows.
    #[must_use]
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        crate::render_or_log(self, "table")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_inserted_verbatim_after_headings() {
        let columns = ColumnSpec::from_identifiers(["Order", "Status"]);
        let rows = r#"<tr data-id="7"><td>#7</td><td><b>Delivered</b></td></tr>"#;
        let html = TableComponent::build(
            &columns,
            &Checkbox::disabled(false),
            HeadingVariant::Default,
            rows,
        )
        .to_html();

        assert!(html.contains(rows));
        let head = html.find("<thead>").unwrap_or(usize::MAX);
        let body = html.find("<tbody>").unwrap_or(0);
        assert!(head < body);
        assert!(html.contains(">Order<"));
    }

    #[test]
    fn empty_rows_show_message_across_columns() {
        let columns = ColumnSpec::from_identifiers(["checkbox", "Name", "Price"]);
        let html = TableComponent::new(&ListHeadings::plain(&columns, HeadingVariant::Default), "")
            .with_empty_message("No products found")
            .to_html();
        assert!(html.contains(r#"<td colspan="3">No products found</td>"#));
    }

    #[test]
    fn empty_rows_without_message_leave_body_empty() {
        let columns = ColumnSpec::from_identifiers(["Name"]);
        let html = TableComponent::new(&ListHeadings::plain(&columns, HeadingVariant::Default), "")
            .to_html();
        assert!(!html.contains("<td"));
    }
}
