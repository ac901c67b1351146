//! Stateless checkbox.

use askama::Template;

/// A checkbox whose state is owned entirely by the caller.
///
/// Clicking follows `href`, which the caller points at whatever action
/// toggles its selection state. The control never flips itself.
#[derive(Debug, Clone, PartialEq, Eq, Template)]
#[template(path = "components/checkbox.html")]
pub struct Checkbox {
    checked: bool,
    disabled: bool,
    href: String,
    label: String,
}

impl Checkbox {
    /// An enabled checkbox that follows `href` when clicked.
    #[must_use]
    pub fn new(checked: bool, href: impl Into<String>) -> Self {
        let href = href.into();
        Self {
            checked,
            disabled: href.is_empty(),
            href,
            label: "Select".to_string(),
        }
    }

    /// A checkbox that shows `checked` but cannot be clicked.
    #[must_use]
    pub fn disabled(checked: bool) -> Self {
        Self {
            checked,
            disabled: true,
            href: String::new(),
            label: "Select".to_string(),
        }
    }

    /// Accessible label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub const fn is_checked(&self) -> bool {
        self.checked
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub fn href(&self) -> &str {
        &self.href
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        crate::render_or_log(self, "checkbox")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflects_checked_state() {
        let html = Checkbox::new(true, "/products/select?id=3").to_html();
        assert!(html.contains("is-checked"));
        assert!(html.contains(r#"aria-checked="true""#));
        assert!(html.contains(r#"href="/products/select?id=3""#));

        let html = Checkbox::new(false, "/products/select?id=3").to_html();
        assert!(!html.contains("is-checked"));
        assert!(html.contains(r#"aria-checked="false""#));
    }

    #[test]
    fn disabled_has_no_link() {
        let html = Checkbox::disabled(true).to_html();
        assert!(html.starts_with("<span"));
        assert!(!html.contains("href"));
        assert!(html.contains(r#"aria-disabled="true""#));
    }

    #[test]
    fn missing_target_means_disabled() {
        assert!(Checkbox::new(false, "").is_disabled());
    }

    #[test]
    fn label_is_escaped() {
        let html = Checkbox::new(false, "/x").with_label("Select <all>").to_html();
        assert!(!html.contains("<all>"));
        assert!(html.contains("Select &#60;all&#62;"));
    }
}
