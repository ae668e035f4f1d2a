//! Route Admin Port
//!
//! Defines the interface to the remote route-configuration service.
//! Implementations may talk HTTP or serve canned data in tests.

use crate::domain::entities::{Metric, Route, RoutePatch, Snapshot};
use async_trait::async_trait;

/// Generic message for a failed call without a server-supplied reason.
pub const GENERIC_FAILURE: &str = "request failed";

/// Failure of an admin API call.
///
/// Distinguishes where the failure came from so callers can choose
/// between the server's own message and their localized fallback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx with a JSON body carrying an `error` string.
    #[error("{message}")]
    Api { status: u16, message: String },
    /// Non-2xx whose body was not JSON or had no `error` field.
    #[error("request failed")]
    Unstructured { status: u16 },
    /// 2xx whose body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("invalid url {0}")]
    InvalidUrl(String),
    #[error("invalid header {0}")]
    InvalidHeader(String),
}

impl TransportError {
    /// Message to show the operator: the server's reason when it gave
    /// one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// HTTP status, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Unstructured { status } => Some(*status),
            _ => None,
        }
    }
}

/// Client for the route-configuration service.
///
/// This is an outbound port. The console never caches what it gets back:
/// every mutation is followed by a fresh `fetch_snapshot`.
#[async_trait]
pub trait RouteAdmin: Send + Sync {
    /// `GET /admin/routes`
    async fn fetch_snapshot(&self) -> Result<Snapshot, TransportError>;

    /// `GET /admin/routes/metrics`
    async fn fetch_metrics(&self) -> Result<Vec<Metric>, TransportError>;

    /// `POST /admin/routes` with a full payload (no id).
    /// Whatever the service echoes back is not interpreted.
    async fn create_route(&self, route: &Route) -> Result<(), TransportError>;

    /// `PUT /admin/routes/{id}` with only the changed fields.
    async fn update_route(&self, id: &str, patch: &RoutePatch) -> Result<(), TransportError>;

    /// `DELETE /admin/routes/{id}`
    async fn delete_route(&self, id: &str) -> Result<(), TransportError>;
}
