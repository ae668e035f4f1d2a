//! Text View
//!
//! Renders a `ConsoleState` as plain text. No logic lives here beyond
//! layout; everything shown is derived from the state.

use crate::application::{ConsoleState, MetricsPanel, TestResult};
use crate::domain::entities::Route;
use std::fmt::Write;

/// Render the whole console.
pub fn render(state: &ConsoleState) -> String {
    let mut out = String::new();

    let version = state.version_label().unwrap_or("loading");
    let _ = writeln!(out, "== route console == version: {}", version);

    if let Some(error) = &state.error {
        let _ = writeln!(out, "!! {}", error);
    }

    render_routes(&mut out, state);
    render_metrics(&mut out, state);
    render_test(&mut out, state);

    out
}

fn render_routes(out: &mut String, state: &ConsoleState) {
    let filters = &state.filters;
    if !filters.is_empty() {
        let _ = writeln!(
            out,
            "filters: group={:?} keyword={:?}",
            filters.group.trim(),
            filters.keyword.trim()
        );
    }

    let routes = state.visible_routes();
    if routes.is_empty() {
        let _ = writeln!(out, "routes: (none)");
        return;
    }

    let _ = writeln!(out, "routes:");
    for route in &routes {
        let _ = writeln!(out, "  {}", route_line(route));
    }
}

/// One row of the route table.
pub fn route_line(route: &Route) -> String {
    let mut line = format!(
        "[{}] {} {} -> {}",
        route.id_or_empty(),
        route.path.as_deref().unwrap_or("-"),
        route.method_label(),
        route.target.as_deref().unwrap_or("-"),
    );

    if let Some(group) = route.group.as_deref().filter(|g| !g.is_empty()) {
        let _ = write!(line, " group={}", group);
    }
    if let Some(strip) = route.strip_prefix.filter(|n| *n > 0) {
        let _ = write!(line, " strip={}", strip);
    }
    if let Some(rewrite) = route.rewrite.as_deref().filter(|r| !r.is_empty()) {
        let _ = write!(line, " rewrite={}", rewrite);
    }
    if let Some(auth) = route.auth_type.as_deref().filter(|a| !a.is_empty()) {
        let _ = write!(line, " auth={}", auth);
    }
    match route.rate_limit_qps {
        Some(qps) if qps > 0.0 => {
            let _ = write!(line, " qps={}", qps);
        }
        _ => {}
    }
    let _ = write!(
        line,
        " timeout={}ms {}",
        route.effective_timeout_ms(),
        if route.is_enabled() { "enabled" } else { "disabled" }
    );

    line
}

fn render_metrics(out: &mut String, state: &ConsoleState) {
    match &state.metrics {
        MetricsPanel::NotLoaded => {}
        MetricsPanel::Failed(message) => {
            let _ = writeln!(out, "metrics: {}", message);
        }
        MetricsPanel::Loaded(_) => {
            let rows = state.visible_metrics();
            if rows.is_empty() {
                let _ = writeln!(out, "metrics: (none)");
                return;
            }
            let _ = writeln!(out, "metrics:");
            for (route, metric) in rows {
                let _ = writeln!(
                    out,
                    "  {} hits={} last={}",
                    route.path.as_deref().unwrap_or(&metric.route_id),
                    metric.hits,
                    metric.last_hit.as_deref().unwrap_or("-")
                );
            }
        }
    }
}

fn render_test(out: &mut String, state: &ConsoleState) {
    let test = &state.test;
    if test.path.is_empty() && test.result.is_none() && !test.in_flight {
        return;
    }

    let _ = writeln!(
        out,
        "test: GET {} key={}",
        if test.path.is_empty() { "-" } else { test.path.as_str() },
        if test.api_key.is_empty() { "-" } else { test.api_key.as_str() }
    );

    if test.in_flight {
        let _ = writeln!(out, "  sending...");
    }
    match &test.result {
        Some(TestResult::Response(response)) => {
            let _ = writeln!(out, "  HTTP {}", response.status);
            if !response.body.is_empty() {
                let _ = writeln!(out, "{}", response.body);
            }
        }
        Some(TestResult::Failed(message)) => {
            let _ = writeln!(out, "  error: {}", message);
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ConsoleEvent;
    use crate::domain::entities::{Metric, Snapshot};
    use crate::domain::ports::ProbeResponse;
    use crate::domain::services::RouteFilter;

    fn state_with_routes() -> ConsoleState {
        let mut state = ConsoleState::default();
        state.apply(ConsoleEvent::SnapshotLoaded(Snapshot {
            version: None,
            routes: vec![
                Route {
                    id: Some("r1".to_string()),
                    path: Some("/api/account/*".to_string()),
                    methods: Some(vec!["GET".to_string()]),
                    target: Some("http://accounts:9000".to_string()),
                    group: Some("accounts".to_string()),
                    ..Default::default()
                },
                Route {
                    id: Some("r2".to_string()),
                    path: Some("/api/billing".to_string()),
                    enabled: Some(false),
                    timeout_ms: Some(500),
                    ..Default::default()
                },
            ],
        }));
        state
    }

    #[test]
    fn test_render_before_first_load() {
        let out = render(&ConsoleState::default());
        assert!(out.contains("version: loading"));
        assert!(out.contains("routes: (none)"));
    }

    #[test]
    fn test_render_routes() {
        let out = render(&state_with_routes());
        assert!(out.contains("version: unpublished"));
        assert!(out.contains("[r1] /api/account/* GET -> http://accounts:9000 group=accounts"));
        assert!(out.contains("timeout=3000ms enabled"));
        assert!(out.contains("[r2] /api/billing ALL -> -"));
        assert!(out.contains("timeout=500ms disabled"));
    }

    #[test]
    fn test_render_error_region() {
        let mut state = state_with_routes();
        state.apply(ConsoleEvent::Failed("load failed".to_string()));
        let out = render(&state);
        assert!(out.contains("!! load failed"));
        assert!(out.contains("[r1]"));
    }

    #[test]
    fn test_render_filtered() {
        let mut state = state_with_routes();
        state.apply(ConsoleEvent::FiltersChanged(RouteFilter::new("", "billing")));
        let out = render(&state);
        assert!(out.contains("keyword=\"billing\""));
        assert!(!out.contains("[r1]"));
        assert!(out.contains("[r2]"));
    }

    #[test]
    fn test_render_metrics() {
        let mut state = state_with_routes();
        state.apply(ConsoleEvent::MetricsLoaded(vec![Metric {
            route_id: "r1".to_string(),
            hits: 12,
            last_hit: Some("2024-05-01T10:00:00Z".to_string()),
        }]));
        let out = render(&state);
        assert!(out.contains("/api/account/* hits=12 last=2024-05-01T10:00:00Z"));
        assert!(!out.contains("/api/billing hits"));
    }

    #[test]
    fn test_render_metrics_failure() {
        let mut state = state_with_routes();
        state.apply(ConsoleEvent::MetricsFailed("metrics load failed".to_string()));
        assert!(render(&state).contains("metrics: metrics load failed"));
    }

    #[test]
    fn test_render_probe_result_verbatim() {
        let mut state = ConsoleState::default();
        state.apply(ConsoleEvent::TestSeeded {
            path: "/api/account/1001".to_string(),
            api_key: Some("k1".to_string()),
        });
        state.apply(ConsoleEvent::TestCompleted(ProbeResponse {
            status: 404,
            body: "{\"error\":\"no route\"}".to_string(),
        }));
        let out = render(&state);
        assert!(out.contains("test: GET /api/account/1001 key=k1"));
        assert!(out.contains("HTTP 404"));
        assert!(out.contains("{\"error\":\"no route\"}"));
    }

    #[test]
    fn test_route_line_optional_fields() {
        let route = Route {
            id: Some("r3".to_string()),
            path: Some("/p".to_string()),
            strip_prefix: Some(1),
            rewrite: Some("/q".to_string()),
            auth_type: Some("API_KEY".to_string()),
            rate_limit_qps: Some(10.0),
            ..Default::default()
        };
        let line = route_line(&route);
        assert!(line.contains("strip=1"));
        assert!(line.contains("rewrite=/q"));
        assert!(line.contains("auth=API_KEY"));
        assert!(line.contains("qps=10"));
    }
}
