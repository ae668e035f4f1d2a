//! HTTP Route Admin
//!
//! Implements RouteAdmin against the route-configuration service's
//! `/admin/routes` endpoints.

use super::http_transport::{HttpTransport, RequestOptions};
use crate::domain::entities::{Metric, Route, RoutePatch, Snapshot};
use crate::domain::ports::{RouteAdmin, TransportError};
use async_trait::async_trait;
use serde::Serialize;

const ROUTES_PATH: &str = "/admin/routes";
const METRICS_PATH: &str = "/admin/routes/metrics";

/// Admin API client over `HttpTransport`.
#[derive(Debug, Clone)]
pub struct HttpRouteAdmin {
    transport: HttpTransport,
}

impl HttpRouteAdmin {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// Absolute URL of one route; the id is encoded as a single segment.
    fn route_url(&self, id: &str) -> Result<String, TransportError> {
        let mut url = self.transport.resolve(ROUTES_PATH)?;
        let base = url.to_string();
        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidUrl(format!("{} cannot take a route id", base)))?
            .push(id);
        Ok(url.to_string())
    }

    fn json_body<T: Serialize>(value: &T) -> Result<serde_json::Value, TransportError> {
        serde_json::to_value(value).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RouteAdmin for HttpRouteAdmin {
    async fn fetch_snapshot(&self) -> Result<Snapshot, TransportError> {
        let snapshot: Option<Snapshot> = self
            .transport
            .request(ROUTES_PATH, &RequestOptions::get())
            .await?;
        Ok(snapshot.unwrap_or_default())
    }

    async fn fetch_metrics(&self) -> Result<Vec<Metric>, TransportError> {
        let metrics: Option<Vec<Metric>> = self
            .transport
            .request(METRICS_PATH, &RequestOptions::get())
            .await?;
        Ok(metrics.unwrap_or_default())
    }

    async fn create_route(&self, route: &Route) -> Result<(), TransportError> {
        // the service assigns ids; never send one on create
        let payload = Route {
            id: None,
            ..route.clone()
        };
        let body = Self::json_body(&payload)?;
        let created: Option<serde_json::Value> = self
            .transport
            .request(ROUTES_PATH, &RequestOptions::post(body))
            .await?;

        let id = created
            .as_ref()
            .and_then(|value| value.get("id"))
            .map(|id| match id {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            });
        tracing::info!("route created id={}", id.as_deref().unwrap_or("?"));
        Ok(())
    }

    async fn update_route(&self, id: &str, patch: &RoutePatch) -> Result<(), TransportError> {
        let body = Self::json_body(patch)?;
        let _: Option<serde_json::Value> = self
            .transport
            .request(&self.route_url(id)?, &RequestOptions::put(body))
            .await?;
        Ok(())
    }

    async fn delete_route(&self, id: &str) -> Result<(), TransportError> {
        let _: Option<serde_json::Value> = self
            .transport
            .request(&self.route_url(id)?, &RequestOptions::delete())
            .await?;
        Ok(())
    }
}
