pub mod probe_template;
pub mod route_filter;
pub mod route_toggles;

pub use probe_template::probe_path;
pub use route_filter::RouteFilter;
pub use route_toggles::{toggle_enabled, toggle_methods};
