//! Declarative table column specification.

use serde::{Deserialize, Serialize};

/// Identifier that older column lists use to request a selection column.
///
/// Only [`Column::parse`] interprets it. A column built with
/// [`Column::label`] is always a text column, even if its label is `"checkbox"`.
pub const SELECTION_MARKER: &str = "checkbox";

/// A single header column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Column {
    /// Select-all checkbox column.
    Selection,
    /// Plain text header.
    Label(String),
}

impl Column {
    /// A text header.
    #[must_use]
    pub fn label(text: impl Into<String>) -> Self {
        Self::Label(text.into())
    }

    /// Interpret a legacy string identifier, mapping [`SELECTION_MARKER`] to
    /// [`Column::Selection`].
    #[must_use]
    pub fn parse(identifier: &str) -> Self {
        if identifier == SELECTION_MARKER {
            Self::Selection
        } else {
            Self::Label(identifier.to_owned())
        }
    }

    #[must_use]
    pub const fn is_selection(&self) -> bool {
        matches!(self, Self::Selection)
    }

    /// Header text, or `None` for the selection column.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Selection => None,
            Self::Label(text) => Some(text),
        }
    }
}

/// Ordered list of header columns for one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSpec(Vec<Column>);

impl ColumnSpec {
    #[must_use]
    pub const fn new(columns: Vec<Column>) -> Self {
        Self(columns)
    }

    /// Build a spec from legacy string identifiers (see [`Column::parse`]).
    pub fn from_identifiers<'a>(identifiers: impl IntoIterator<Item = &'a str>) -> Self {
        Self(identifiers.into_iter().map(Column::parse).collect())
    }

    /// Append a column.
    #[must_use]
    pub fn with(mut self, column: Column) -> Self {
        self.0.push(column);
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any column renders the select-all checkbox.
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.0.iter().any(Column::is_selection)
    }
}

impl<'a> IntoIterator for &'a ColumnSpec {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Header styling chosen by the page that owns the table.
///
/// Pages pass this explicitly; the heading component never inspects the
/// request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingVariant {
    /// No extra alignment.
    #[default]
    Default,
    /// Product listing: every header cell is left-aligned.
    ProductsListing,
    /// Order management: only the `"Action"` header is left-aligned.
    OrdersManagement,
}

impl HeadingVariant {
    /// Text of the header that [`HeadingVariant::OrdersManagement`] left-aligns.
    pub const ACTION_LABEL: &'static str = "Action";

    /// Whether `column` gets left-alignment under this variant.
    #[must_use]
    pub fn aligns_left(self, column: &Column) -> bool {
        match self {
            Self::Default => false,
            Self::ProductsListing => true,
            Self::OrdersManagement => column.text() == Some(Self::ACTION_LABEL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_becomes_selection_column() {
        let spec = ColumnSpec::from_identifiers(["checkbox", "Name", "Action"]);
        let kinds: Vec<bool> = spec.iter().map(Column::is_selection).collect();
        assert_eq!(kinds, vec![true, false, false]);
        assert!(spec.has_selection());
    }

    #[test]
    fn explicit_label_named_checkbox_stays_text() {
        let column = Column::label(SELECTION_MARKER);
        assert!(!column.is_selection());
        assert_eq!(column.text(), Some("checkbox"));
    }

    #[test]
    fn products_variant_aligns_every_column() {
        let variant = HeadingVariant::ProductsListing;
        assert!(variant.aligns_left(&Column::Selection));
        assert!(variant.aligns_left(&Column::label("Name")));
    }

    #[test]
    fn orders_variant_aligns_only_action() {
        let variant = HeadingVariant::OrdersManagement;
        assert!(variant.aligns_left(&Column::label("Action")));
        assert!(!variant.aligns_left(&Column::label("Name")));
        assert!(!variant.aligns_left(&Column::Selection));
    }

    #[test]
    fn default_variant_aligns_nothing() {
        assert!(!HeadingVariant::Default.aligns_left(&Column::label("Action")));
    }
}
