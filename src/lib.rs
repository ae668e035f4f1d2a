//! Route Console Library
//!
//! Administration console for a reverse-proxy gateway's routing table:
//! snapshot loading, route mutations, filtering and request probing.
//! Exposed as a library for integration tests and embedding.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use adapters::outbound::{HttpProbeClient, HttpRouteAdmin, HttpTransport};
pub use application::{ConsoleService, ConsoleState, LoadOutcome};
pub use config::load_config;
pub use domain::entities::{Metric, Route, RoutePatch, Snapshot};
pub use domain::ports::{ProbeClient, ProbeError, ProbeResponse, RouteAdmin, TransportError};
pub use domain::services::{probe_path, RouteFilter};
