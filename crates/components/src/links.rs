//! Page link construction.

use bakehouse_core::PageChange;
use url::form_urlencoded;

/// Builds `?page=N` links for a listing, carrying extra query parameters
/// (filters, the current selection) across page changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    path: String,
    params: Vec<(String, String)>,
}

impl PageLinks {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// Carry `key=value` on every link. Empty values are skipped.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.params.push((key.into(), value));
        }
        self
    }

    /// Link for a page-change event; the 0-based index becomes a 1-based
    /// `page` parameter here.
    #[must_use]
    pub fn href(&self, change: PageChange) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("page", &change.page().to_string());
        for (key, value) in &self.params {
            query.append_pair(key, value);
        }
        format!("{}?{}", self.path, query.finish())
    }

    /// Link to the 1-based `page`.
    #[must_use]
    pub fn page(&self, page: u64) -> String {
        self.href(PageChange::from_page(page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_based_event_becomes_one_based_query() {
        let links = PageLinks::new("/products");
        assert_eq!(links.href(PageChange::from_index(0)), "/products?page=1");
        assert_eq!(links.href(PageChange::from_index(4)), "/products?page=5");
    }

    #[test]
    fn carries_extra_params() {
        let links = PageLinks::new("/products")
            .with_param("selected", "1,2")
            .with_param("q", "");
        assert_eq!(links.page(2), "/products?page=2&selected=1%2C2");
    }
}
