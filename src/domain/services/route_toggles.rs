//! Route Toggles
//!
//! Builds the partial-update bodies for the two row actions. The method
//! toggle is a strict two-state cycle between `["GET"]` and `["POST"]`,
//! not a general method editor.

use crate::domain::entities::{Route, RoutePatch};

/// Flip between `["GET"]` and `["POST"]` based on whether GET is present.
pub fn toggle_methods(route: &Route) -> RoutePatch {
    let next = if route.allows_get() { "POST" } else { "GET" };
    RoutePatch {
        methods: Some(vec![next.to_string()]),
        ..Default::default()
    }
}

/// Negate `enabled`, absent counting as `true`.
pub fn toggle_enabled(route: &Route) -> RoutePatch {
    RoutePatch {
        enabled: Some(!route.is_enabled()),
        ..Default::default()
    }
}
