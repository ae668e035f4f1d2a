mod probe_client;
mod route_admin;

pub use probe_client::{ProbeClient, ProbeError, ProbeResponse};
pub use route_admin::{RouteAdmin, TransportError, GENERIC_FAILURE};
