//! HTTP Transport
//!
//! Single chokepoint for every network call the console makes. Applies
//! the default JSON content type, merges caller headers over it and maps
//! HTTP outcomes onto `TransportError`.

use crate::domain::ports::TransportError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Error body shape used by the route-configuration service.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Options for a single request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<serde_json::Value>,
    /// Extra headers, applied over the defaults
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Default::default()
        }
    }

    pub fn put(body: serde_json::Value) -> Self {
        Self {
            method: Method::PUT,
            body: Some(body),
            ..Default::default()
        }
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Default::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Thin wrapper around `reqwest::Client` bound to a base origin.
///
/// No retries and no timeouts beyond what the client defaults to:
/// failures surface immediately.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a transport for the given origin (e.g. `http://127.0.0.1:8080`).
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a transport sharing an existing client.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("invalid base url {}: {}", base_url, e))?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a target against the base origin.
    ///
    /// Absolute `http(s)://` URLs are used as-is; anything else is joined
    /// onto the base.
    pub fn resolve(&self, target: &str) -> Result<Url, TransportError> {
        let resolved = if target.starts_with("http://") || target.starts_with("https://") {
            Url::parse(target)
        } else {
            self.base_url.join(target)
        };
        resolved.map_err(|e| TransportError::InvalidUrl(format!("{}: {}", target, e)))
    }

    /// Send a request and hand back the raw response, whatever its status.
    pub async fn execute(
        &self,
        target: &str,
        options: &RequestOptions,
    ) -> Result<Response, TransportError> {
        let url = self.resolve(target)?;
        let headers = Self::merge_headers(&options.headers)?;

        let mut builder = self
            .client
            .request(options.method.clone(), url.clone())
            .headers(headers);
        if let Some(body) = &options.body {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await.map_err(|e| {
            tracing::debug!("{} {} failed: {}", options.method, url, e);
            TransportError::Network(e.to_string())
        })?;

        tracing::debug!("{} {} -> {}", options.method, url, response.status());
        Ok(response)
    }

    /// Send a request and decode the JSON body.
    ///
    /// Returns `Ok(None)` for 204 without touching the body.
    pub async fn request<T: DeserializeOwned>(
        &self,
        target: &str,
        options: &RequestOptions,
    ) -> Result<Option<T>, TransportError> {
        let response = self.execute(target, options).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(Self::error_from_body(status.as_u16(), &body));
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| TransportError::Decode(e.to_string()))
    }

    /// Build headers: JSON content type first, caller headers on top.
    fn merge_headers(extra: &[(String, String)]) -> Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in extra {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TransportError::InvalidHeader(format!("{}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| TransportError::InvalidHeader(format!("{}: {}", name, e)))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    /// Map a non-2xx body onto the structured or unstructured variant.
    fn error_from_body(status: u16, body: &[u8]) -> TransportError {
        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(ErrorBody {
                error: Some(message),
            }) if !message.is_empty() => TransportError::Api { status, message },
            _ => TransportError::Unstructured { status },
        }
    }
}
