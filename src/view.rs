//! View Binding Layer
//!
//! [`DashboardView`] is the typed seam between request handling and
//! rendering. The browser front end implements it over reactive signals, the
//! CLI over a terminal, and tests over a recorder.

use crate::model::SignalTiming;
use crate::presenter::{
    Badge, DensityBar, GraphPanel, MetricsDisplay, Notice, SignalButton, SignalDisplay,
};

/// Named update operations for every dashboard widget
pub trait DashboardView {
    /// Header status badge
    fn set_badge(&self, badge: Badge);

    /// Density, vehicle count and level readouts
    fn set_metrics(&self, metrics: &MetricsDisplay);

    fn set_density_bar(&self, bar: DensityBar);

    /// Three-light traffic signal
    fn set_signal(&self, signal: SignalDisplay);

    fn set_summary(&self, summary: &str);

    /// Show a base64 JPEG frame and hide the "no video" placeholder
    fn show_frame(&self, frame: &str);

    /// Show the "no video" placeholder and hide the preview
    fn show_placeholder(&self);

    fn set_source_label(&self, label: &str);

    fn show_notice(&self, notice: &Notice);

    fn hide_notice(&self);

    /// Fill in and reveal the signal timing card
    fn show_signal_timing(&self, timing: &SignalTiming);

    fn set_signal_button(&self, button: SignalButton);

    fn open_graph_modal(&self);

    fn set_graph(&self, panel: GraphPanel);
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording view for reducer and controller tests

    use super::*;
    use std::sync::{Arc, Mutex};

    /// A single view update
    #[derive(Debug, Clone, PartialEq)]
    pub enum ViewEvent {
        Badge(Badge),
        Metrics(MetricsDisplay),
        DensityBar(DensityBar),
        Signal(SignalDisplay),
        Summary(String),
        Frame(String),
        Placeholder,
        Source(String),
        Notice(Notice),
        HideNotice,
        Timing(SignalTiming),
        SignalButton(SignalButton),
        OpenGraph,
        Graph(GraphPanel),
    }

    /// Records every update; clones share the same log
    #[derive(Debug, Clone, Default)]
    pub struct RecordingView {
        events: Arc<Mutex<Vec<ViewEvent>>>,
    }

    impl RecordingView {
        pub fn events(&self) -> Vec<ViewEvent> {
            self.events.lock().unwrap().clone()
        }

        pub fn clear(&self) {
            self.events.lock().unwrap().clear();
        }

        pub fn last_badge(&self) -> Option<Badge> {
            self.events().into_iter().rev().find_map(|e| match e {
                ViewEvent::Badge(b) => Some(b),
                _ => None,
            })
        }

        pub fn last_notice(&self) -> Option<Notice> {
            self.events().into_iter().rev().find_map(|e| match e {
                ViewEvent::Notice(n) => Some(n),
                _ => None,
            })
        }

        /// Whether the notice banner is currently visible
        pub fn notice_visible(&self) -> bool {
            self.events()
                .into_iter()
                .rev()
                .find_map(|e| match e {
                    ViewEvent::Notice(_) => Some(true),
                    ViewEvent::HideNotice => Some(false),
                    _ => None,
                })
                .unwrap_or(false)
        }

        pub fn last_graph(&self) -> Option<GraphPanel> {
            self.events().into_iter().rev().find_map(|e| match e {
                ViewEvent::Graph(g) => Some(g),
                _ => None,
            })
        }

        fn push(&self, event: ViewEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl DashboardView for RecordingView {
        fn set_badge(&self, badge: Badge) {
            self.push(ViewEvent::Badge(badge));
        }

        fn set_metrics(&self, metrics: &MetricsDisplay) {
            self.push(ViewEvent::Metrics(metrics.clone()));
        }

        fn set_density_bar(&self, bar: DensityBar) {
            self.push(ViewEvent::DensityBar(bar));
        }

        fn set_signal(&self, signal: SignalDisplay) {
            self.push(ViewEvent::Signal(signal));
        }

        fn set_summary(&self, summary: &str) {
            self.push(ViewEvent::Summary(summary.to_string()));
        }

        fn show_frame(&self, frame: &str) {
            self.push(ViewEvent::Frame(frame.to_string()));
        }

        fn show_placeholder(&self) {
            self.push(ViewEvent::Placeholder);
        }

        fn set_source_label(&self, label: &str) {
            self.push(ViewEvent::Source(label.to_string()));
        }

        fn show_notice(&self, notice: &Notice) {
            self.push(ViewEvent::Notice(notice.clone()));
        }

        fn hide_notice(&self) {
            self.push(ViewEvent::HideNotice);
        }

        fn show_signal_timing(&self, timing: &SignalTiming) {
            self.push(ViewEvent::Timing(timing.clone()));
        }

        fn set_signal_button(&self, button: SignalButton) {
            self.push(ViewEvent::SignalButton(button));
        }

        fn open_graph_modal(&self) {
            self.push(ViewEvent::OpenGraph);
        }

        fn set_graph(&self, panel: GraphPanel) {
            self.push(ViewEvent::Graph(panel));
        }
    }
}
