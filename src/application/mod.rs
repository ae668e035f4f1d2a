//! Application Layer
//!
//! Use cases and the view model they publish.

mod console_service;
mod console_state;
mod route_form;

pub use console_service::{
    ConsoleService, LoadOutcome, DELETE_FAILED, LOAD_FAILED, METRICS_FAILED, SAVE_FAILED,
    UPDATE_FAILED,
};
pub use console_state::{ConsoleEvent, ConsoleState, MetricsPanel, TestResult, TestState};
pub use route_form::{FormError, FormField, RouteForm};
