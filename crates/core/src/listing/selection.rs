//! Row selection owned by the page handler.

use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;

/// Set of selected row ids.
///
/// The owning page mutates this in response to user actions; header and row
/// checkboxes only ever read it. Between requests the set travels as a
/// comma-separated query value (see [`RowSelection::to_param`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSelection<Id: Ord> {
    ids: BTreeSet<Id>,
}

impl<Id: Ord> Default for RowSelection<Id> {
    fn default() -> Self {
        Self {
            ids: BTreeSet::new(),
        }
    }
}

impl<Id: Ord + Copy> RowSelection<Id> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one row. Returns whether the row is selected afterwards.
    pub fn toggle(&mut self, id: Id) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Replace the selection with exactly `ids`.
    pub fn select_all(&mut self, ids: impl IntoIterator<Item = Id>) {
        self.ids = ids.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Select-all checkbox behavior: clear when every visible row is already
    /// selected, otherwise select exactly the visible rows.
    pub fn toggle_all(&mut self, visible: &[Id]) {
        if self.all_selected(visible) {
            self.clear();
        } else {
            self.select_all(visible.iter().copied());
        }
    }

    #[must_use]
    pub fn contains(&self, id: Id) -> bool {
        self.ids.contains(&id)
    }

    /// Whether every id in `visible` is selected. An empty page is never
    /// "all selected".
    #[must_use]
    pub fn all_selected(&self, visible: &[Id]) -> bool {
        !visible.is_empty() && visible.iter().all(|id| self.ids.contains(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Id> + '_ {
        self.ids.iter().copied()
    }
}

impl<Id: Ord + Copy + Display + FromStr> RowSelection<Id> {
    /// Parse a comma-separated id list; unparsable entries are skipped.
    #[must_use]
    pub fn from_param(param: &str) -> Self {
        Self {
            ids: param
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .filter_map(|s| s.trim().parse().ok())
                .collect(),
        }
    }

    /// Comma-separated id list in ascending order.
    #[must_use]
    pub fn to_param(&self) -> String {
        self.ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl<Id: Ord> FromIterator<Id> for RowSelection<Id> {
    fn from_iter<I: IntoIterator<Item = Id>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProductId;

    fn ids(raw: &[i64]) -> Vec<ProductId> {
        raw.iter().copied().map(ProductId::new).collect()
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = RowSelection::new();
        assert!(selection.toggle(ProductId::new(4)));
        assert!(selection.contains(ProductId::new(4)));
        assert!(!selection.toggle(ProductId::new(4)));
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_all_selects_then_clears() {
        let visible = ids(&[1, 2, 3]);
        let mut selection: RowSelection<ProductId> = std::iter::once(ProductId::new(2)).collect();

        selection.toggle_all(&visible);
        assert!(selection.all_selected(&visible));
        assert_eq!(selection.len(), 3);

        selection.toggle_all(&visible);
        assert!(selection.is_empty());
    }

    #[test]
    fn empty_page_is_never_all_selected() {
        let selection: RowSelection<ProductId> = RowSelection::new();
        assert!(!selection.all_selected(&[]));
    }

    #[test]
    fn param_round_trip_skips_garbage() {
        let selection: RowSelection<ProductId> = RowSelection::from_param("3, 1,,x,2");
        assert_eq!(selection.to_param(), "1,2,3");
        assert!(RowSelection::<ProductId>::from_param("").is_empty());
    }
}
