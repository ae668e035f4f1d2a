//! Probe Client Port
//!
//! Defines the interface for firing a diagnostic request through the
//! gateway's data plane.

use async_trait::async_trait;

/// Raw outcome of a probe. The body is never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub body: String,
}

/// Failure of a probe request.
///
/// Kept apart from admin API errors so the two never share a display.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("invalid probe url: {0}")]
    InvalidUrl(String),
    #[error("{0}")]
    Network(String),
}

/// Sender of probe requests against the gateway itself.
#[async_trait]
pub trait ProbeClient: Send + Sync {
    /// Issue `GET <path>` with `X-API-Key: <api_key>`.
    async fn send(&self, path: &str, api_key: &str) -> Result<ProbeResponse, ProbeError>;
}
