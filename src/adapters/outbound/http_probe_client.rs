//! HTTP Probe Client
//!
//! Fires diagnostic requests through the gateway's data plane. The
//! response body is read as raw text and never parsed.

use super::http_transport::{HttpTransport, RequestOptions};
use crate::domain::ports::{ProbeClient, ProbeError, ProbeResponse, TransportError};
use async_trait::async_trait;

/// Header carrying the route credential on probe requests.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Probe client bound to the gateway origin.
#[derive(Debug, Clone)]
pub struct HttpProbeClient {
    transport: HttpTransport,
}

impl HttpProbeClient {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl ProbeClient for HttpProbeClient {
    async fn send(&self, path: &str, api_key: &str) -> Result<ProbeResponse, ProbeError> {
        let options = RequestOptions::get().with_header(API_KEY_HEADER, api_key);

        let response = self
            .transport
            .execute(path, &options)
            .await
            .map_err(|e| match e {
                TransportError::InvalidUrl(msg) => ProbeError::InvalidUrl(msg),
                TransportError::Network(msg) => ProbeError::Network(msg),
                other => ProbeError::Network(other.to_string()),
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ProbeError::Network(e.to_string()))?;

        tracing::info!("probe GET {} -> {}", path, status);
        Ok(ProbeResponse { status, body })
    }
}
