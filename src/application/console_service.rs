//! Console Service - Main application use case
//!
//! Orchestrates the console: loads snapshots, runs mutations, composes
//! filters and drives the test-request simulator. State is published on a
//! watch channel for the presentation layer to render.

use super::console_state::{ConsoleEvent, ConsoleState};
use super::route_form::{FormError, FormField};
use crate::domain::entities::{Route, RoutePatch};
use crate::domain::ports::{ProbeClient, ProbeError, RouteAdmin, GENERIC_FAILURE};
use crate::domain::services::{probe_path, toggle_enabled, toggle_methods, RouteFilter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

pub const LOAD_FAILED: &str = "load failed";
pub const SAVE_FAILED: &str = "save failed";
pub const UPDATE_FAILED: &str = "update failed";
pub const DELETE_FAILED: &str = "delete failed";
pub const METRICS_FAILED: &str = "metrics load failed";

/// What happened to a load once its responses came back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Snapshot was applied to the view.
    Applied,
    /// A newer load was issued meanwhile; the response was dropped.
    Stale,
    /// Snapshot fetch failed; previous view kept, error shown.
    Failed,
}

/// Console service - main application use case.
///
/// Loads are not cancelled or queued. Each load takes a sequence number
/// and its responses are only applied if no newer load has been issued
/// since, so a slow response can never overwrite a fresher one.
pub struct ConsoleService {
    admin: Arc<dyn RouteAdmin>,
    probe: Arc<dyn ProbeClient>,
    state: watch::Sender<ConsoleState>,
    load_seq: AtomicU64,
}

impl ConsoleService {
    /// Create a new console service with an empty view.
    pub fn new(admin: Arc<dyn RouteAdmin>, probe: Arc<dyn ProbeClient>) -> Self {
        Self::with_state(admin, probe, ConsoleState::default())
    }

    /// Create a console service starting from a prepared view.
    pub fn with_state(
        admin: Arc<dyn RouteAdmin>,
        probe: Arc<dyn ProbeClient>,
        initial: ConsoleState,
    ) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            admin,
            probe,
            state,
            load_seq: AtomicU64::new(0),
        }
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ConsoleState> {
        self.state.subscribe()
    }

    /// Copy of the current state.
    pub fn state(&self) -> ConsoleState {
        self.state.borrow().clone()
    }

    fn dispatch(&self, event: ConsoleEvent) {
        self.state.send_modify(|state| state.apply(event));
    }

    fn is_latest(&self, seq: u64) -> bool {
        self.load_seq.load(Ordering::SeqCst) == seq
    }

    // ===== Snapshot Loader =====

    /// Fetch the snapshot, then metrics, and apply them if still current.
    pub async fn load(&self) -> LoadOutcome {
        let seq = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.dispatch(ConsoleEvent::AttemptStarted);

        let snapshot = match self.admin.fetch_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                if !self.is_latest(seq) {
                    tracing::debug!("dropping stale load failure seq={}: {}", seq, e);
                    return LoadOutcome::Stale;
                }
                tracing::warn!("snapshot load failed seq={}: {:?}", seq, e);
                self.dispatch(ConsoleEvent::Failed(e.user_message(LOAD_FAILED)));
                return LoadOutcome::Failed;
            }
        };

        if !self.is_latest(seq) {
            tracing::debug!("dropping stale snapshot seq={}", seq);
            return LoadOutcome::Stale;
        }

        tracing::info!(
            "snapshot loaded seq={} version={} routes={}",
            seq,
            snapshot.version_label(),
            snapshot.routes.len()
        );
        self.dispatch(ConsoleEvent::SnapshotLoaded(snapshot));

        match self.admin.fetch_metrics().await {
            Ok(metrics) if self.is_latest(seq) => {
                self.dispatch(ConsoleEvent::MetricsLoaded(metrics));
            }
            Err(e) if self.is_latest(seq) => {
                tracing::warn!("metrics load failed seq={}: {:?}", seq, e);
                self.dispatch(ConsoleEvent::MetricsFailed(e.user_message(METRICS_FAILED)));
            }
            _ => tracing::debug!("dropping stale metrics seq={}", seq),
        }

        LoadOutcome::Applied
    }

    // ===== Filters =====

    /// Replace the filters and reload.
    pub async fn set_filters(&self, filters: RouteFilter) -> LoadOutcome {
        self.dispatch(ConsoleEvent::FiltersChanged(filters));
        self.load().await
    }

    // ===== Route Mutations =====

    /// Edit one input of the create form.
    pub fn set_form_field(&self, field: FormField, value: &str) -> Result<(), FormError> {
        let mut form = self.state.borrow().form.clone();
        form.set(field, value)?;
        self.dispatch(ConsoleEvent::FormEdited(form));
        Ok(())
    }

    /// Submit the create form. On success the form is reset and the view
    /// reloaded.
    pub async fn create_route(&self) -> bool {
        self.dispatch(ConsoleEvent::AttemptStarted);

        let payload = self.state.borrow().form.to_route();
        let route = match payload {
            Ok(route) => route,
            Err(e) => {
                self.dispatch(ConsoleEvent::Failed(format!("{}: {}", SAVE_FAILED, e)));
                return false;
            }
        };

        match self.admin.create_route(&route).await {
            Ok(()) => {
                self.dispatch(ConsoleEvent::FormReset);
                self.load().await;
                true
            }
            Err(e) => {
                tracing::warn!("route create failed: {:?}", e);
                self.dispatch(ConsoleEvent::Failed(e.user_message(SAVE_FAILED)));
                false
            }
        }
    }

    /// Flip the route between `["GET"]` and `["POST"]`.
    pub async fn toggle_method(&self, route: &Route) -> bool {
        self.dispatch(ConsoleEvent::AttemptStarted);
        self.update(route, toggle_methods(route)).await
    }

    /// Flip the route's enabled flag.
    pub async fn toggle_enabled(&self, route: &Route) -> bool {
        self.dispatch(ConsoleEvent::AttemptStarted);
        self.update(route, toggle_enabled(route)).await
    }

    async fn update(&self, route: &Route, patch: RoutePatch) -> bool {
        let Some(id) = route.id.as_deref() else {
            self.dispatch(ConsoleEvent::Failed(format!(
                "{}: route has no id",
                UPDATE_FAILED
            )));
            return false;
        };

        match self.admin.update_route(id, &patch).await {
            Ok(()) => {
                tracing::info!("route updated id={} patch={:?}", id, patch);
                self.load().await;
                true
            }
            Err(e) => {
                tracing::warn!("route update failed id={}: {:?}", id, e);
                self.dispatch(ConsoleEvent::Failed(e.user_message(UPDATE_FAILED)));
                false
            }
        }
    }

    /// Delete a route by id and reload.
    pub async fn delete_route(&self, route: &Route) -> bool {
        self.dispatch(ConsoleEvent::AttemptStarted);

        let Some(id) = route.id.as_deref() else {
            self.dispatch(ConsoleEvent::Failed(format!(
                "{}: route has no id",
                DELETE_FAILED
            )));
            return false;
        };

        match self.admin.delete_route(id).await {
            Ok(()) => {
                tracing::info!("route deleted id={}", id);
                self.load().await;
                true
            }
            Err(e) => {
                tracing::warn!("route delete failed id={}: {:?}", id, e);
                self.dispatch(ConsoleEvent::Failed(e.user_message(DELETE_FAILED)));
                false
            }
        }
    }

    // ===== Test-Request Simulator =====

    /// Seed the test panel from a route. Never touches the network.
    pub fn prefill_test(&self, route: &Route) {
        let api_key = route.api_key.clone().filter(|k| !k.is_empty());
        self.dispatch(ConsoleEvent::TestSeeded {
            path: probe_path(route),
            api_key,
        });
    }

    /// Hand-edit the probe path.
    pub fn edit_test_path(&self, path: &str) {
        self.dispatch(ConsoleEvent::TestPathEdited(path.to_string()));
    }

    /// Hand-edit the probe credential.
    pub fn edit_test_key(&self, api_key: &str) {
        self.dispatch(ConsoleEvent::TestKeyEdited(api_key.to_string()));
    }

    /// Fire the probe with the current test panel inputs.
    pub async fn send_test_request(&self) -> bool {
        let (path, api_key) = {
            let state = self.state.borrow();
            (state.test.path.clone(), state.test.api_key.clone())
        };
        self.dispatch(ConsoleEvent::TestStarted);

        match self.probe.send(&path, &api_key).await {
            Ok(response) => {
                self.dispatch(ConsoleEvent::TestCompleted(response));
                true
            }
            Err(e) => {
                tracing::warn!("probe {} failed: {:?}", path, e);
                self.dispatch(ConsoleEvent::TestFailed(probe_message(&e)));
                false
            }
        }
    }
}

fn probe_message(error: &ProbeError) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        GENERIC_FAILURE.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::console_state::{MetricsPanel, TestResult};
    use crate::domain::entities::{Metric, Snapshot};
    use crate::domain::ports::{ProbeResponse, TransportError};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::sync::oneshot;
    use tracing_test::traced_test;

    type SnapshotReply = oneshot::Receiver<Result<Snapshot, TransportError>>;

    /// In-memory admin service recording every call.
    #[derive(Default)]
    struct FakeAdmin {
        snapshots: Mutex<VecDeque<Result<Snapshot, TransportError>>>,
        gated: Mutex<VecDeque<SnapshotReply>>,
        metrics: Mutex<Option<Result<Vec<Metric>, TransportError>>>,
        mutation_result: Mutex<Option<TransportError>>,
        calls: Mutex<Vec<String>>,
        patches: Mutex<Vec<(String, RoutePatch)>>,
        created: Mutex<Vec<Route>>,
    }

    impl FakeAdmin {
        fn with_snapshot(snapshot: Snapshot) -> Self {
            let admin = Self::default();
            admin.push_snapshot(Ok(snapshot));
            admin
        }

        fn push_snapshot(&self, reply: Result<Snapshot, TransportError>) {
            self.snapshots.lock().unwrap().push_back(reply);
        }

        fn fail_mutations(&self, error: TransportError) {
            *self.mutation_result.lock().unwrap() = Some(error);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn mutation(&self) -> Result<(), TransportError> {
            match self.mutation_result.lock().unwrap().clone() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl RouteAdmin for FakeAdmin {
        async fn fetch_snapshot(&self) -> Result<Snapshot, TransportError> {
            self.calls.lock().unwrap().push("snapshot".to_string());
            let gate = self.gated.lock().unwrap().pop_front();
            if let Some(gate) = gate {
                return gate.await.expect("gate dropped");
            }
            let next = self.snapshots.lock().unwrap().pop_front();
            next.unwrap_or_else(|| Ok(Snapshot::default()))
        }

        async fn fetch_metrics(&self) -> Result<Vec<Metric>, TransportError> {
            self.calls.lock().unwrap().push("metrics".to_string());
            self.metrics
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn create_route(&self, route: &Route) -> Result<(), TransportError> {
            self.calls.lock().unwrap().push("create".to_string());
            self.mutation()?;
            self.created.lock().unwrap().push(route.clone());
            Ok(())
        }

        async fn update_route(&self, id: &str, patch: &RoutePatch) -> Result<(), TransportError> {
            self.calls.lock().unwrap().push(format!("update {}", id));
            self.mutation()?;
            self.patches
                .lock()
                .unwrap()
                .push((id.to_string(), patch.clone()));
            Ok(())
        }

        async fn delete_route(&self, id: &str) -> Result<(), TransportError> {
            self.calls.lock().unwrap().push(format!("delete {}", id));
            self.mutation()
        }
    }

    /// Probe client returning a canned reply and recording the inputs.
    struct FakeProbe {
        reply: Result<ProbeResponse, ProbeError>,
        sent: Mutex<Vec<(String, String)>>,
    }

    impl FakeProbe {
        fn ok(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(ProbeResponse {
                    status,
                    body: body.to_string(),
                }),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: ProbeError) -> Self {
            Self {
                reply: Err(error),
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ProbeClient for FakeProbe {
        async fn send(&self, path: &str, api_key: &str) -> Result<ProbeResponse, ProbeError> {
            self.sent
                .lock()
                .unwrap()
                .push((path.to_string(), api_key.to_string()));
            self.reply.clone()
        }
    }

    fn route(id: &str, path: &str) -> Route {
        Route {
            id: Some(id.to_string()),
            path: Some(path.to_string()),
            ..Default::default()
        }
    }

    fn snapshot(version: &str, routes: Vec<Route>) -> Snapshot {
        Snapshot {
            version: Some(version.to_string()),
            routes,
        }
    }

    fn service(admin: Arc<FakeAdmin>) -> ConsoleService {
        ConsoleService::new(admin, Arc::new(FakeProbe::ok(200, "ok")))
    }

    // ===== Snapshot Loader Tests =====

    #[tokio::test]
    async fn test_load_applies_snapshot_and_metrics() {
        let admin = Arc::new(FakeAdmin::with_snapshot(snapshot(
            "v1",
            vec![route("r1", "/a")],
        )));
        *admin.metrics.lock().unwrap() = Some(Ok(vec![Metric {
            route_id: "r1".to_string(),
            hits: 4,
            last_hit: Some("2024-01-01T00:00:00Z".to_string()),
        }]));
        let svc = service(admin.clone());

        assert_eq!(svc.load().await, LoadOutcome::Applied);

        let state = svc.state();
        assert_eq!(state.version_label(), Some("v1"));
        assert_eq!(state.visible_routes().len(), 1);
        assert_eq!(state.visible_metrics().len(), 1);
        assert_eq!(admin.calls(), vec!["snapshot", "metrics"]);
    }

    #[tokio::test]
    async fn test_load_failure_keeps_previous_routes() {
        let admin = Arc::new(FakeAdmin::with_snapshot(snapshot(
            "v1",
            vec![route("r1", "/a")],
        )));
        let svc = service(admin.clone());
        svc.load().await;

        admin.push_snapshot(Err(TransportError::Unstructured { status: 500 }));
        assert_eq!(svc.load().await, LoadOutcome::Failed);

        let state = svc.state();
        assert_eq!(state.version_label(), Some("v1"));
        assert_eq!(state.visible_routes().len(), 1);
        assert_eq!(state.error.as_deref(), Some("load failed"));
        // metrics are not fetched after a failed snapshot
        assert_eq!(admin.calls(), vec!["snapshot", "metrics", "snapshot"]);
    }

    #[tokio::test]
    async fn test_load_failure_shows_server_message() {
        let admin = Arc::new(FakeAdmin::default());
        admin.push_snapshot(Err(TransportError::Api {
            status: 503,
            message: "store offline".to_string(),
        }));
        let svc = service(admin);

        svc.load().await;
        assert_eq!(svc.state().error.as_deref(), Some("store offline"));
    }

    #[tokio::test]
    async fn test_metrics_failure_is_non_fatal() {
        let admin = Arc::new(FakeAdmin::with_snapshot(snapshot(
            "v2",
            vec![route("r1", "/a")],
        )));
        *admin.metrics.lock().unwrap() = Some(Err(TransportError::Network("reset".to_string())));
        let svc = service(admin);

        assert_eq!(svc.load().await, LoadOutcome::Applied);
        let state = svc.state();
        assert!(state.error.is_none());
        assert_eq!(state.visible_routes().len(), 1);
        assert_eq!(
            state.metrics,
            MetricsPanel::Failed("metrics load failed".to_string())
        );
    }

    #[tokio::test]
    async fn test_new_attempt_clears_error() {
        let admin = Arc::new(FakeAdmin::default());
        admin.push_snapshot(Err(TransportError::Unstructured { status: 500 }));
        let svc = service(admin);

        svc.load().await;
        assert!(svc.state().error.is_some());
        svc.load().await;
        assert!(svc.state().error.is_none());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_stale_load_is_dropped() {
        let admin = Arc::new(FakeAdmin::default());
        let (slow_tx, slow_rx) = oneshot::channel();
        let (fast_tx, fast_rx) = oneshot::channel();
        admin.gated.lock().unwrap().push_back(slow_rx);
        admin.gated.lock().unwrap().push_back(fast_rx);
        let svc = service(admin);

        let first = svc.load();
        let second = svc.load();
        let release = async {
            tokio::task::yield_now().await;
            fast_tx
                .send(Ok(snapshot("fresh", vec![route("r2", "/new")])))
                .unwrap();
            tokio::task::yield_now().await;
            slow_tx
                .send(Ok(snapshot("stale", vec![route("r1", "/old")])))
                .unwrap();
        };

        let (first, second, _) = futures::join!(first, second, release);

        assert_eq!(first, LoadOutcome::Stale);
        assert_eq!(second, LoadOutcome::Applied);
        assert_eq!(svc.state().version_label(), Some("fresh"));
        assert!(logs_contain("dropping stale snapshot"));
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let admin = Arc::new(FakeAdmin::with_snapshot(snapshot("v1", vec![])));
        let svc = service(admin);
        let mut rx = svc.subscribe();

        svc.load().await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().version_label(), Some("v1"));
    }

    // ===== Filter Tests =====

    #[tokio::test]
    async fn test_set_filters_reloads_and_filters() {
        let admin = Arc::new(FakeAdmin::default());
        admin.push_snapshot(Ok(snapshot(
            "v1",
            vec![route("r1", "/api/account/*"), route("r2", "/api/billing")],
        )));
        let svc = service(admin.clone());

        svc.set_filters(RouteFilter::new("", "account")).await;
        let visible = svc.state().visible_routes();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id_or_empty(), "r1");
        assert_eq!(admin.calls(), vec!["snapshot", "metrics"]);
    }

    // ===== Mutation Tests =====

    #[tokio::test]
    async fn test_create_route_resets_form_and_reloads() {
        let admin = Arc::new(FakeAdmin::default());
        let svc = service(admin.clone());
        svc.set_form_field(FormField::Path, "/api/orders/**").unwrap();
        svc.set_form_field(FormField::Target, "http://orders:9000").unwrap();
        svc.set_form_field(FormField::Methods, "POST").unwrap();
        svc.set_form_field(FormField::TimeoutMs, "").unwrap();

        assert!(svc.create_route().await);

        let created = admin.created.lock().unwrap().clone();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].path.as_deref(), Some("/api/orders/**"));
        assert_eq!(created[0].methods, Some(vec!["POST".to_string()]));
        assert_eq!(created[0].timeout_ms, Some(0));

        let state = svc.state();
        assert_eq!(state.form.methods, "GET");
        assert_eq!(state.form.timeout_ms, "3000");
        assert!(state.form.path.is_empty());
        assert_eq!(admin.calls(), vec!["create", "snapshot", "metrics"]);
    }

    #[tokio::test]
    async fn test_create_route_invalid_form_never_calls_service() {
        let admin = Arc::new(FakeAdmin::default());
        let svc = service(admin.clone());
        svc.set_form_field(FormField::StripPrefix, "two").unwrap();

        assert!(!svc.create_route().await);
        let error = svc.state().error.unwrap();
        assert!(error.starts_with("save failed: stripPrefix"));
        assert!(admin.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_route_failure_keeps_form() {
        let admin = Arc::new(FakeAdmin::default());
        admin.fail_mutations(TransportError::Api {
            status: 400,
            message: "path and target are required".to_string(),
        });
        let svc = service(admin.clone());
        svc.set_form_field(FormField::Group, "ops").unwrap();

        assert!(!svc.create_route().await);
        let state = svc.state();
        assert_eq!(
            state.error.as_deref(),
            Some("path and target are required")
        );
        assert_eq!(state.form.group, "ops");
        assert_eq!(admin.calls(), vec!["create"]);
    }

    #[tokio::test]
    async fn test_toggle_method_sends_patch_and_reloads() {
        let admin = Arc::new(FakeAdmin::default());
        let svc = service(admin.clone());
        let mut r = route("r1", "/a");
        r.methods = Some(vec!["POST".to_string(), "GET".to_string()]);

        assert!(svc.toggle_method(&r).await);

        let patches = admin.patches.lock().unwrap().clone();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].0, "r1");
        assert_eq!(patches[0].1.methods, Some(vec!["POST".to_string()]));
        assert!(patches[0].1.enabled.is_none());
        assert_eq!(admin.calls(), vec!["update r1", "snapshot", "metrics"]);
    }

    #[tokio::test]
    async fn test_toggle_enabled_from_absent() {
        let admin = Arc::new(FakeAdmin::default());
        let svc = service(admin.clone());

        assert!(svc.toggle_enabled(&route("r1", "/a")).await);
        let patches = admin.patches.lock().unwrap().clone();
        assert_eq!(patches[0].1.enabled, Some(false));
        assert!(patches[0].1.methods.is_none());
    }

    #[tokio::test]
    async fn test_update_failure_uses_fallback() {
        let admin = Arc::new(FakeAdmin::default());
        admin.fail_mutations(TransportError::Unstructured { status: 500 });
        let svc = service(admin.clone());

        assert!(!svc.toggle_enabled(&route("r1", "/a")).await);
        assert_eq!(svc.state().error.as_deref(), Some("update failed"));
        assert_eq!(admin.calls(), vec!["update r1"]);
    }

    #[tokio::test]
    async fn test_update_without_id_is_rejected() {
        let admin = Arc::new(FakeAdmin::default());
        let svc = service(admin.clone());

        assert!(!svc.toggle_method(&Route::default()).await);
        assert!(svc.state().error.unwrap().starts_with("update failed"));
        assert!(admin.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_route_reloads() {
        let admin = Arc::new(FakeAdmin::default());
        let svc = service(admin.clone());

        assert!(svc.delete_route(&route("r1", "/a")).await);
        assert_eq!(admin.calls(), vec!["delete r1", "snapshot", "metrics"]);
    }

    #[tokio::test]
    async fn test_delete_failure_uses_fallback() {
        let admin = Arc::new(FakeAdmin::default());
        admin.fail_mutations(TransportError::Network("refused".to_string()));
        let svc = service(admin);

        assert!(!svc.delete_route(&route("r1", "/a")).await);
        assert_eq!(svc.state().error.as_deref(), Some("delete failed"));
    }

    // ===== Test-Request Simulator Tests =====

    #[tokio::test]
    async fn test_prefill_then_send() {
        let admin = Arc::new(FakeAdmin::default());
        let probe = Arc::new(FakeProbe::ok(201, "{\"raw\":true}"));
        let svc = ConsoleService::new(admin.clone(), probe.clone());
        let mut r = route("r1", "/api/account/*");
        r.api_key = Some("k1".to_string());

        svc.prefill_test(&r);
        let state = svc.state();
        assert_eq!(state.test.path, "/api/account/1001");
        assert_eq!(state.test.api_key, "k1");
        assert!(admin.calls().is_empty());

        assert!(svc.send_test_request().await);
        assert_eq!(
            probe.sent.lock().unwrap().clone(),
            vec![("/api/account/1001".to_string(), "k1".to_string())]
        );
        assert_eq!(
            svc.state().test.result,
            Some(TestResult::Response(ProbeResponse {
                status: 201,
                body: "{\"raw\":true}".to_string()
            }))
        );
    }

    #[tokio::test]
    async fn test_hand_edits_are_used() {
        let probe = Arc::new(FakeProbe::ok(200, ""));
        let svc = ConsoleService::new(Arc::new(FakeAdmin::default()), probe.clone());

        svc.prefill_test(&route("r1", "/x/*"));
        svc.edit_test_path("/x/42");
        svc.edit_test_key("override");
        svc.send_test_request().await;

        assert_eq!(
            probe.sent.lock().unwrap().clone(),
            vec![("/x/42".to_string(), "override".to_string())]
        );
    }

    #[tokio::test]
    async fn test_probe_failure_stays_in_test_panel() {
        let probe = Arc::new(FakeProbe::failing(ProbeError::Network(
            "connection refused".to_string(),
        )));
        let svc = ConsoleService::new(Arc::new(FakeAdmin::default()), probe);

        assert!(!svc.send_test_request().await);
        let state = svc.state();
        assert!(state.error.is_none());
        assert_eq!(
            state.test.result,
            Some(TestResult::Failed("connection refused".to_string()))
        );
    }

    #[tokio::test]
    async fn test_probe_failure_without_message_uses_fallback() {
        let probe = Arc::new(FakeProbe::failing(ProbeError::Network(String::new())));
        let svc = ConsoleService::new(Arc::new(FakeAdmin::default()), probe);

        svc.send_test_request().await;
        assert_eq!(
            svc.state().test.result,
            Some(TestResult::Failed("request failed".to_string()))
        );
    }
}
