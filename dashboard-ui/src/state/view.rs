//! Reactive View
//!
//! [`SignalView`] renders dashboard updates into Leptos signals. Components
//! read the signals; the reducer only ever writes them.

use chrono::{DateTime, Local};
use leptos::*;

use traffic_dashboard::presenter::{
    Badge, DensityBar, GraphPanel, MetricsDisplay, Notice, SignalButton, SignalDisplay,
    TimingDisplay,
};
use traffic_dashboard::{DashboardView, SignalTiming};

/// Widget state for the whole page
#[derive(Clone, Copy)]
pub struct SignalView {
    pub badge: RwSignal<Badge>,
    pub metrics: RwSignal<Option<MetricsDisplay>>,
    pub density_bar: RwSignal<Option<DensityBar>>,
    pub signal: RwSignal<Option<SignalDisplay>>,
    pub summary: RwSignal<String>,
    /// Last frame received; kept while the placeholder is up
    pub frame: RwSignal<Option<String>>,
    pub preview_visible: RwSignal<bool>,
    pub source_label: RwSignal<String>,
    pub notice: RwSignal<Option<Notice>>,
    pub timing: RwSignal<Option<TimingDisplay>>,
    pub signal_button: RwSignal<SignalButton>,
    pub graph_open: RwSignal<bool>,
    pub graph: RwSignal<GraphPanel>,
    pub last_update: RwSignal<Option<DateTime<Local>>>,
}

impl SignalView {
    pub fn new() -> Self {
        Self {
            badge: create_rw_signal(Badge::Connecting),
            metrics: create_rw_signal(None),
            density_bar: create_rw_signal(None),
            signal: create_rw_signal(None),
            summary: create_rw_signal(String::new()),
            frame: create_rw_signal(None),
            preview_visible: create_rw_signal(false),
            source_label: create_rw_signal("None".to_string()),
            notice: create_rw_signal(None),
            timing: create_rw_signal(None),
            signal_button: create_rw_signal(SignalButton::Idle),
            graph_open: create_rw_signal(false),
            graph: create_rw_signal(GraphPanel::Loading),
            last_update: create_rw_signal(None),
        }
    }

    pub fn close_graph(&self) {
        self.graph_open.set(false);
    }
}

impl DashboardView for SignalView {
    fn set_badge(&self, badge: Badge) {
        self.badge.set(badge);
    }

    fn set_metrics(&self, metrics: &MetricsDisplay) {
        self.metrics.set(Some(metrics.clone()));
        self.last_update.set(Some(Local::now()));
    }

    fn set_density_bar(&self, bar: DensityBar) {
        self.density_bar.set(Some(bar));
    }

    fn set_signal(&self, signal: SignalDisplay) {
        self.signal.set(Some(signal));
    }

    fn set_summary(&self, summary: &str) {
        self.summary.set(summary.to_string());
    }

    fn show_frame(&self, frame: &str) {
        self.frame.set(Some(frame.to_string()));
        self.preview_visible.set(true);
    }

    fn show_placeholder(&self) {
        self.preview_visible.set(false);
    }

    fn set_source_label(&self, label: &str) {
        self.source_label.set(label.to_string());
    }

    fn show_notice(&self, notice: &Notice) {
        self.notice.set(Some(notice.clone()));
    }

    fn hide_notice(&self) {
        self.notice.set(None);
    }

    fn show_signal_timing(&self, timing: &SignalTiming) {
        self.timing.set(Some(TimingDisplay::from(timing)));
    }

    fn set_signal_button(&self, button: SignalButton) {
        self.signal_button.set(button);
    }

    fn open_graph_modal(&self) {
        self.graph_open.set(true);
    }

    fn set_graph(&self, panel: GraphPanel) {
        self.graph.set(panel);
    }
}
