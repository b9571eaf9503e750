//! UI Components
//!
//! One component per dashboard widget. Element ids match the backend's
//! page markup, so existing styles and scripts keep working.

pub mod graph_modal;
pub mod metrics;
pub mod notice;
pub mod signal_card;
pub mod signal_lights;
pub mod source_controls;
pub mod status_badge;
pub mod video_panel;

pub use graph_modal::GraphModal;
pub use metrics::{MetricsPanel, SummaryBox};
pub use notice::NoticeBanner;
pub use signal_card::SignalCard;
pub use signal_lights::SignalLights;
pub use source_controls::SourceControls;
pub use status_badge::StatusBadge;
pub use video_panel::VideoPanel;
