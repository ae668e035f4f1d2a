//! Adapters Layer
//!
//! Inbound: the terminal front-end. Outbound: HTTP clients for the admin
//! service and the gateway data plane.

pub mod inbound;
pub mod outbound;
