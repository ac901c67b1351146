//! Navigation guard decisions.
//!
//! A [`RouteTable`] classifies request paths and decides, from the path and
//! whether a session token is present, if a navigation may proceed. The table
//! holds no per-request state, so the same input always yields the same
//! decision.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Access class of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteClass {
    /// Requires a session token.
    Private,
    /// Meant for signed-out visitors (login, sign-up).
    Public,
    /// Open to everyone.
    Shared,
}

/// Outcome of evaluating one navigation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GuardDecision {
    /// Serve the requested page unchanged.
    Allow,
    /// Send the client to this path instead.
    Redirect(String),
}

impl GuardDecision {
    #[must_use]
    pub const fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Redirect target, if any.
    #[must_use]
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Allow => None,
            Self::Redirect(target) => Some(target),
        }
    }
}

/// Static path classification plus the list of paths the guard intercepts.
#[derive(Debug, Clone)]
pub struct RouteTable {
    login_path: String,
    classes: HashMap<String, RouteClass>,
    matcher: Option<HashSet<String>>,
}

impl RouteTable {
    /// Empty table redirecting to `login_path`. Without a matcher every path
    /// is intercepted.
    #[must_use]
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            classes: HashMap::new(),
            matcher: None,
        }
    }

    /// Classify `paths`. A path keeps only its most recent class.
    #[must_use]
    pub fn classify_as<'a>(
        mut self,
        class: RouteClass,
        paths: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        for path in paths {
            self.classes.insert(path.to_owned(), class);
        }
        self
    }

    #[must_use]
    pub fn private<'a>(self, paths: impl IntoIterator<Item = &'a str>) -> Self {
        self.classify_as(RouteClass::Private, paths)
    }

    #[must_use]
    pub fn public<'a>(self, paths: impl IntoIterator<Item = &'a str>) -> Self {
        self.classify_as(RouteClass::Public, paths)
    }

    #[must_use]
    pub fn shared<'a>(self, paths: impl IntoIterator<Item = &'a str>) -> Self {
        self.classify_as(RouteClass::Shared, paths)
    }

    /// Restrict interception to exactly these paths. Everything else bypasses
    /// the guard.
    #[must_use]
    pub fn intercept<'a>(mut self, paths: impl IntoIterator<Item = &'a str>) -> Self {
        self.matcher = Some(paths.into_iter().map(str::to_owned).collect());
        self
    }

    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Class of `path`, or `None` if unclassified. Matching is exact.
    #[must_use]
    pub fn classify(&self, path: &str) -> Option<RouteClass> {
        self.classes.get(path).copied()
    }

    /// Whether the guard runs for `path` at all.
    #[must_use]
    pub fn intercepts(&self, path: &str) -> bool {
        self.matcher.as_ref().is_none_or(|m| m.contains(path))
    }

    /// Decide a navigation.
    ///
    /// Only an intercepted private path without a token is redirected (to the
    /// login path). Public, shared and unclassified paths always pass.
    #[must_use]
    pub fn evaluate(&self, path: &str, has_token: bool) -> GuardDecision {
        if !self.intercepts(path) {
            return GuardDecision::Allow;
        }
        match self.classify(path) {
            Some(RouteClass::Private) if !has_token => {
                GuardDecision::Redirect(self.login_path.clone())
            }
            _ => GuardDecision::Allow,
        }
    }
}

/// Whether a raw token cookie value counts as a session token.
///
/// A missing cookie and an empty value (left behind by logout) both count as
/// absent.
#[must_use]
pub fn token_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::new("/login")
            .private(["/dashboard", "/profile"])
            .public(["/login"])
            .shared(["/blog", "/"])
            .intercept(["/dashboard", "/profile", "/login", "/blog", "/"])
    }

    #[test]
    fn private_without_token_redirects_to_login() {
        let decision = table().evaluate("/dashboard", false);
        assert_eq!(decision, GuardDecision::Redirect("/login".to_string()));
        assert_eq!(decision.redirect_target(), Some("/login"));
    }

    #[test]
    fn private_with_token_passes() {
        assert!(table().evaluate("/dashboard", true).is_allow());
    }

    #[test]
    fn shared_always_passes() {
        let table = table();
        assert!(table.evaluate("/blog", false).is_allow());
        assert!(table.evaluate("/blog", true).is_allow());
    }

    #[test]
    fn public_passes_with_or_without_token() {
        let table = table();
        assert!(table.evaluate("/login", false).is_allow());
        assert!(table.evaluate("/login", true).is_allow());
    }

    #[test]
    fn unclassified_passes() {
        assert!(table().evaluate("/cart", false).is_allow());
    }

    #[test]
    fn private_path_outside_matcher_bypasses_guard() {
        let table = table().private(["/billing"]);
        assert_eq!(table.classify("/billing"), Some(RouteClass::Private));
        assert!(table.evaluate("/billing", false).is_allow());
    }

    #[test]
    fn without_matcher_every_path_is_intercepted() {
        let table = RouteTable::new("/login").private(["/orders"]);
        assert!(table.intercepts("/anything"));
        assert!(!table.evaluate("/orders", false).is_allow());
    }

    #[test]
    fn matching_is_exact() {
        let table = table();
        assert!(table.evaluate("/dashboard/", false).is_allow());
        assert!(table.evaluate("/dashboard/stats", false).is_allow());
    }

    #[test]
    fn reclassifying_moves_path() {
        let table = table().shared(["/profile"]);
        assert_eq!(table.classify("/profile"), Some(RouteClass::Shared));
    }

    #[test]
    fn repeated_evaluation_is_stable() {
        let table = table();
        for (path, token) in [("/dashboard", false), ("/dashboard", true), ("/blog", false)] {
            assert_eq!(table.evaluate(path, token), table.evaluate(path, token));
        }
    }

    #[test]
    fn empty_token_counts_as_absent() {
        assert!(!token_present(None));
        assert!(!token_present(Some("")));
        assert!(!token_present(Some("  ")));
        assert!(token_present(Some("eyJhbGciOi")));
    }
}
