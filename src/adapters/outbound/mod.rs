mod http_probe_client;
mod http_route_admin;
mod http_transport;

pub use http_probe_client::{HttpProbeClient, API_KEY_HEADER};
pub use http_route_admin::HttpRouteAdmin;
pub use http_transport::{HttpTransport, RequestOptions};
