//! State Management
//!
//! Reactive widget state and the runtime that drives the dashboard reducer.

pub mod console;
pub mod runtime;
pub mod view;

pub use runtime::{DashboardRuntime, POLL_INTERVAL_MS};
pub use view::SignalView;
