//! Table header row.

use askama::Template;
use bakehouse_core::{Column, ColumnSpec, HeadingVariant};

use crate::Checkbox;

const CELL_CLASS: &str = "heading-cell";
const LEFT_CLASS: &str = "text-left";
const SELECTION_CLASS: &str = "heading-cell-selection";

/// One rendered header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingCell {
    /// CSS classes for the `<th>`.
    pub class: String,
    /// Whether `content` is checkbox markup rather than plain text.
    pub is_selection: bool,
    /// Header text, or pre-rendered checkbox markup for the selection column.
    pub content: String,
}

impl HeadingCell {
    fn new(column: &Column, variant: HeadingVariant, select_all: &Checkbox) -> Self {
        let mut class = String::from(CELL_CLASS);
        if column.is_selection() {
            class.push(' ');
            class.push_str(SELECTION_CLASS);
        }
        if variant.aligns_left(column) {
            class.push(' ');
            class.push_str(LEFT_CLASS);
        }

        match column {
            Column::Selection => Self {
                class,
                is_selection: true,
                content: select_all.to_html(),
            },
            Column::Label(text) => Self {
                class,
                is_selection: false,
                content: text.clone(),
            },
        }
    }

    /// Whether this cell carries the left-alignment class.
    #[must_use]
    pub fn is_left_aligned(&self) -> bool {
        self.class.split(' ').any(|c| c == LEFT_CLASS)
    }
}

/// Header row built from a column spec.
///
/// Selection columns render `select_all`, so its checked state is whatever
/// the page computed from its own selection.
#[derive(Debug, Clone, PartialEq, Eq, Template)]
#[template(path = "components/list_headings.html")]
pub struct ListHeadings {
    cells: Vec<HeadingCell>,
}

impl ListHeadings {
    #[must_use]
    pub fn new(columns: &ColumnSpec, select_all: &Checkbox, variant: HeadingVariant) -> Self {
        Self {
            cells: columns
                .iter()
                .map(|column| HeadingCell::new(column, variant, select_all))
                .collect(),
        }
    }

    /// Header row without a selection checkbox. Selection columns still get
    /// a cell, holding a disabled checkbox.
    #[must_use]
    pub fn plain(columns: &ColumnSpec, variant: HeadingVariant) -> Self {
        Self::new(columns, &Checkbox::disabled(false), variant)
    }

    #[must_use]
    pub fn cells(&self) -> &[HeadingCell] {
        &self.cells
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        crate::render_or_log(self, "list_headings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_columns() -> ColumnSpec {
        ColumnSpec::from_identifiers(["checkbox", "Name", "Status", "Action"])
    }

    #[test]
    fn one_cell_per_column() {
        let headings = ListHeadings::plain(&product_columns(), HeadingVariant::Default);
        assert_eq!(headings.column_count(), 4);
        assert_eq!(headings.to_html().matches("<th").count(), 4);
    }

    #[test]
    fn selection_column_renders_checkbox_bound_to_checked() {
        let select_all = Checkbox::new(true, "/products/select-all");
        let headings = ListHeadings::new(&product_columns(), &select_all, HeadingVariant::Default);

        let first = &headings.cells()[0];
        assert!(first.is_selection);
        assert!(first.content.contains(r#"aria-checked="true""#));
        assert!(!headings.cells()[1].is_selection);

        let html = headings.to_html();
        assert_eq!(html.matches(r#"role="checkbox""#).count(), 1);
        assert!(!html.contains(">checkbox<"));
    }

    #[test]
    fn label_named_checkbox_stays_text() {
        let columns = ColumnSpec::new(vec![Column::label("checkbox")]);
        let headings = ListHeadings::plain(&columns, HeadingVariant::Default);
        assert!(!headings.cells()[0].is_selection);
        assert_eq!(headings.cells()[0].content, "checkbox");
    }

    #[test]
    fn products_listing_left_aligns_every_cell() {
        let headings = ListHeadings::plain(&product_columns(), HeadingVariant::ProductsListing);
        assert!(headings.cells().iter().all(HeadingCell::is_left_aligned));
    }

    #[test]
    fn orders_management_left_aligns_action_only() {
        let headings = ListHeadings::plain(&product_columns(), HeadingVariant::OrdersManagement);
        let aligned: Vec<bool> = headings.cells().iter().map(HeadingCell::is_left_aligned).collect();
        assert_eq!(aligned, vec![false, false, false, true]);
    }

    #[test]
    fn default_variant_aligns_nothing() {
        let headings = ListHeadings::plain(&product_columns(), HeadingVariant::Default);
        assert!(!headings.to_html().contains(LEFT_CLASS));
    }

    #[test]
    fn empty_label_renders_empty_cell() {
        let columns = ColumnSpec::new(vec![Column::label("")]);
        let html = ListHeadings::plain(&columns, HeadingVariant::Default).to_html();
        assert_eq!(html.matches("<th").count(), 1);
        assert!(html.contains(r#"class="heading-cell"></th>"#));
    }
}
