//! Route Filter Service
//!
//! Pure domain logic for computing the visible subset of a snapshot.
//! Two independent substring predicates, both must hold.

use crate::domain::entities::Route;

/// Group and keyword filters as typed by the operator.
///
/// Values are stored raw; trimming and case folding happen at match time
/// so the input fields can echo exactly what was entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteFilter {
    pub group: String,
    pub keyword: String,
}

impl RouteFilter {
    pub fn new(group: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            keyword: keyword.into(),
        }
    }

    /// True when neither predicate restricts anything.
    pub fn is_empty(&self) -> bool {
        self.group.trim().is_empty() && self.keyword.trim().is_empty()
    }

    /// Whether a single route passes both predicates.
    pub fn matches(&self, route: &Route) -> bool {
        let group = self.group.trim().to_lowercase();
        let keyword = self.keyword.trim().to_lowercase();
        Self::matches_normalized(route, &group, &keyword)
    }

    /// Return the routes that pass, preserving snapshot order.
    pub fn apply(&self, routes: &[Route]) -> Vec<Route> {
        let group = self.group.trim().to_lowercase();
        let keyword = self.keyword.trim().to_lowercase();

        routes
            .iter()
            .filter(|route| Self::matches_normalized(route, &group, &keyword))
            .cloned()
            .collect()
    }

    fn matches_normalized(route: &Route, group: &str, keyword: &str) -> bool {
        let group_ok = group.is_empty()
            || route
                .group
                .as_deref()
                .unwrap_or_default()
                .to_lowercase()
                .contains(group);

        let keyword_ok = keyword.is_empty()
            || route
                .path
                .as_deref()
                .unwrap_or_default()
                .to_lowercase()
                .contains(keyword);

        group_ok && keyword_ok
    }
}
