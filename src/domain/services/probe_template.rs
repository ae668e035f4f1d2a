//! Probe Path Templating
//!
//! Turns a route pattern into a concrete path that can be fired at the
//! gateway. This is a cosmetic substitution for test purposes only; real
//! matching happens server-side.

use crate::domain::entities::Route;

/// Literal substituted for wildcards and the `{id}` placeholder.
pub const PROBE_SEGMENT: &str = "1001";

/// Path used when the route carries no pattern at all.
pub const FALLBACK_PROBE_PATH: &str = "/api/test";

/// Derive a probe path from a route.
///
/// Only the first wildcard is replaced: `**` wins over `*`, and other
/// wildcards are left as-is. Every `{id}` is replaced. The result always
/// starts with `/`.
pub fn probe_path(route: &Route) -> String {
    let pattern = match route.path.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => FALLBACK_PROBE_PATH,
    };

    let substituted = if pattern.contains("**") {
        pattern.replacen("**", PROBE_SEGMENT, 1)
    } else if pattern.contains('*') {
        pattern.replacen('*', PROBE_SEGMENT, 1)
    } else {
        pattern.to_string()
    };

    let substituted = substituted.replace("{id}", PROBE_SEGMENT);

    if substituted.starts_with('/') {
        substituted
    } else {
        format!("/{}", substituted)
    }
}
