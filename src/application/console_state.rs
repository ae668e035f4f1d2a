//! Console State
//!
//! Typed view model for the console. Every change goes through
//! `ConsoleState::apply`, a pure reducer, so the presentation layer only
//! has to render whatever state it is handed.

use super::route_form::RouteForm;
use crate::domain::entities::{Metric, Route, Snapshot};
use crate::domain::ports::ProbeResponse;
use crate::domain::services::RouteFilter;

/// State of the metrics panel, independent of the route list.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MetricsPanel {
    #[default]
    NotLoaded,
    Loaded(Vec<Metric>),
    Failed(String),
}

/// Outcome of the last probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    Response(ProbeResponse),
    Failed(String),
}

/// Test panel inputs and result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestState {
    pub path: String,
    pub api_key: String,
    pub in_flight: bool,
    pub result: Option<TestResult>,
}

/// Everything the console shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsoleState {
    /// Last successfully applied snapshot; `None` before the first load
    pub snapshot: Option<Snapshot>,
    pub metrics: MetricsPanel,
    pub filters: RouteFilter,
    pub form: RouteForm,
    pub test: TestState,
    /// Admin API error region
    pub error: Option<String>,
}

/// State transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleEvent {
    /// A new admin attempt started; clears the error region.
    AttemptStarted,
    SnapshotLoaded(Snapshot),
    MetricsLoaded(Vec<Metric>),
    MetricsFailed(String),
    /// An admin call failed with a message for the error region.
    Failed(String),
    FiltersChanged(RouteFilter),
    FormEdited(RouteForm),
    FormReset,
    TestSeeded {
        path: String,
        api_key: Option<String>,
    },
    TestPathEdited(String),
    TestKeyEdited(String),
    TestStarted,
    TestCompleted(ProbeResponse),
    TestFailed(String),
}

impl ConsoleState {
    /// Apply one event.
    pub fn apply(&mut self, event: ConsoleEvent) {
        match event {
            ConsoleEvent::AttemptStarted => self.error = None,
            ConsoleEvent::SnapshotLoaded(snapshot) => {
                self.snapshot = Some(snapshot);
                self.metrics = MetricsPanel::NotLoaded;
            }
            ConsoleEvent::MetricsLoaded(metrics) => self.metrics = MetricsPanel::Loaded(metrics),
            ConsoleEvent::MetricsFailed(message) => self.metrics = MetricsPanel::Failed(message),
            ConsoleEvent::Failed(message) => self.error = Some(message),
            ConsoleEvent::FiltersChanged(filters) => self.filters = filters,
            ConsoleEvent::FormEdited(form) => self.form = form,
            ConsoleEvent::FormReset => self.form = RouteForm::default(),
            ConsoleEvent::TestSeeded { path, api_key } => {
                self.test.path = path;
                if let Some(key) = api_key {
                    self.test.api_key = key;
                }
            }
            ConsoleEvent::TestPathEdited(path) => self.test.path = path,
            ConsoleEvent::TestKeyEdited(key) => self.test.api_key = key,
            ConsoleEvent::TestStarted => {
                self.test.in_flight = true;
                self.test.result = None;
            }
            ConsoleEvent::TestCompleted(response) => {
                self.test.in_flight = false;
                self.test.result = Some(TestResult::Response(response));
            }
            ConsoleEvent::TestFailed(message) => {
                self.test.in_flight = false;
                self.test.result = Some(TestResult::Failed(message));
            }
        }
    }

    /// Version label, `None` until a snapshot has been applied.
    pub fn version_label(&self) -> Option<&str> {
        self.snapshot.as_ref().map(Snapshot::version_label)
    }

    /// Routes passing the current filters, in snapshot order.
    pub fn visible_routes(&self) -> Vec<Route> {
        self.snapshot
            .as_ref()
            .map(|s| self.filters.apply(&s.routes))
            .unwrap_or_default()
    }

    /// Metrics joined to visible routes by id. Routes without a metric
    /// are skipped.
    pub fn visible_metrics(&self) -> Vec<(&Route, &Metric)> {
        let (Some(snapshot), MetricsPanel::Loaded(metrics)) = (&self.snapshot, &self.metrics)
        else {
            return Vec::new();
        };

        snapshot
            .routes
            .iter()
            .filter(|route| self.filters.matches(route))
            .filter_map(|route| {
                let id = route.id.as_deref()?;
                metrics
                    .iter()
                    .find(|m| m.route_id == id)
                    .map(|metric| (route, metric))
            })
            .collect()
    }

    /// Look up a route in the applied snapshot.
    pub fn find_route(&self, id: &str) -> Option<&Route> {
        self.snapshot.as_ref().and_then(|s| s.find(id))
    }
}
