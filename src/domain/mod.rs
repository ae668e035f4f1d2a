//! Domain Layer
//!
//! Entities, pure services and the ports the application talks through.

pub mod entities;
pub mod ports;
pub mod services;

pub use entities::{Metric, Route, RoutePatch, Snapshot};
pub use services::RouteFilter;
