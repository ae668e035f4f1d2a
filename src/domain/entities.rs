//! Domain Entities - Core business objects
//!
//! These entities mirror what the route-configuration service publishes.
//! They are rebuilt from scratch on every load and never patched in place.

use serde::{Deserialize, Deserializer, Serialize};

/// Timeout shown for routes that carry no (or a zero) timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;

/// Label shown when a snapshot has not been published yet.
pub const UNPUBLISHED_VERSION: &str = "unpublished";

/// A gateway forwarding rule as known to the console.
///
/// Every field is optional on the wire: the service is authoritative and
/// the console only needs to round-trip what it was given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Server-assigned identifier, absent until first persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Free-text label used for organization and filtering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Route pattern, may contain `*`, `**` and `{name}` tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// HTTP verbs; empty or absent means all methods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methods: Option<Vec<String>>,
    /// Upstream URL or address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Leading path segments removed before forwarding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip_prefix: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewrite: Option<String>,
    /// Credential scheme name; absent means no auth enforcement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Requests per second, 0 = unlimited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_qps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Route {
    /// Whether the route is enabled. Absent counts as enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    /// Timeout as presented to the operator.
    pub fn effective_timeout_ms(&self) -> u64 {
        match self.timeout_ms {
            Some(ms) if ms > 0 => ms,
            _ => DEFAULT_TIMEOUT_MS,
        }
    }

    /// Whether `GET` is among the configured methods.
    pub fn allows_get(&self) -> bool {
        self.methods
            .as_ref()
            .map(|m| m.iter().any(|item| item == "GET"))
            .unwrap_or(false)
    }

    /// Comma-joined method list, `ALL` when unrestricted.
    pub fn method_label(&self) -> String {
        match &self.methods {
            Some(methods) if !methods.is_empty() => methods.join(", "),
            _ => "ALL".to_string(),
        }
    }

    pub fn id_or_empty(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

/// One consistent read of the full route set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub routes: Vec<Route>,
}

/// Missing and `null` route lists both decode as empty.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Route>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Route>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Snapshot {
    /// Version tag, or the "unpublished" indicator.
    pub fn version_label(&self) -> &str {
        match self.version.as_deref() {
            Some(v) if !v.is_empty() => v,
            _ => UNPUBLISHED_VERSION,
        }
    }

    /// Find a route by its server-assigned id.
    pub fn find(&self, id: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.id.as_deref() == Some(id))
    }
}

/// Hit counter for one route, fetched independently of the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub route_id: String,
    #[serde(default)]
    pub hits: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_hit: Option<String>,
}

/// Partial update body for `PUT /admin/routes/{id}`.
///
/// Only the fields that are set get serialized; the service merges the
/// rest from its stored copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub methods: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}
