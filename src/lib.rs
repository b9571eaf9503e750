//! # Traffic Dashboard
//!
//! Live client for a traffic-camera analytics backend. It polls traffic
//! snapshots, renders density, signal and video widgets, and forwards control
//! actions (signal timing, video upload/delete, source switch).
//!
//! ## Modules
//!
//! Runtime-agnostic core (also builds for `wasm32`):
//!
//! - [`model`]: wire DTOs and domain values
//! - [`presenter`]: display mapping (bar width, light, badge, notices)
//! - [`state`]: session state (cluster level, error streak)
//! - [`view`]: the [`DashboardView`] binding trait
//! - [`dashboard`]: the [`Dashboard`] reducer
//! - [`report`]: error sinks
//!
//! Native runtime (`native` feature, on by default):
//!
//! - `client`: reqwest implementation of the `TrafficApi` trait
//! - `controller`: tokio orchestration and the polling monitor
//! - `config`: TOML + environment configuration
//! - `terminal`: a terminal `DashboardView`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use traffic_dashboard::{
//!     Controller, Dashboard, DashboardSettings, HttpClient, ServerConfig, TerminalView,
//!     TracingSink,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = HttpClient::new(&ServerConfig::default())?;
//!     let settings = DashboardSettings::default();
//!     let dashboard = Dashboard::new(TerminalView::new(), TracingSink, settings);
//!     let period = std::time::Duration::from_millis(500);
//!     let controller = Arc::new(Controller::new(api, dashboard, period));
//!
//!     controller.start_monitoring();
//!     controller.configure_signal().await;
//!     Ok(())
//! }
//! ```

pub mod dashboard;
pub mod error;
pub mod model;
pub mod presenter;
pub mod report;
pub mod state;
pub mod view;

#[cfg(feature = "native")]
pub mod client;
#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod controller;
#[cfg(feature = "native")]
pub mod terminal;

// Re-export top-level types for convenience
pub use dashboard::{Dashboard, DashboardSettings, Deferred, UploadPolicy};
pub use error::{ClientError, ClientResult};
pub use model::{
    ActionResponse, ClusterLevel, GraphResponse, SignalTiming, SnapshotResponse, SourceStatus,
    TrafficReading, VideoSource,
};
pub use presenter::{
    Badge, DensityBar, GraphPanel, Light, MetricsDisplay, Notice, NoticeKind, SignalButton,
    SignalDisplay, TimingDisplay,
};
pub use report::{Action, ErrorSink, MemorySink, TracingSink};
pub use state::ClientState;
pub use view::DashboardView;

#[cfg(feature = "native")]
pub use client::{HttpClient, TrafficApi};
#[cfg(feature = "native")]
pub use config::{Config, ConfigError, LoggingConfig, ServerConfig};
#[cfg(feature = "native")]
pub use controller::Controller;
#[cfg(feature = "native")]
pub use terminal::TerminalView;
