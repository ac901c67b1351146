//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year, for the footer.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Human label for a staff role cookie value (`stock_manager` -> `Stock manager`).
///
/// Usage in templates: `{{ role|role_label }}`
#[askama::filter_fn]
pub fn role_label(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(humanize(&value.to_string()))
}

fn humanize(raw: &str) -> String {
    let spaced = raw.replace('_', " ");
    let mut chars = spaced.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanizes_roles() {
        assert_eq!(humanize("stock_manager"), "Stock manager");
        assert_eq!(humanize("admin"), "Admin");
        assert_eq!(humanize(""), "");
    }
}
