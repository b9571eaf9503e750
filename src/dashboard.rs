//! Dashboard Reducer
//!
//! [`Dashboard`] turns request outcomes into view updates. It is synchronous
//! and runtime-agnostic: the caller performs the HTTP request, hands the
//! result to the matching `apply_*` method, and schedules any returned
//! [`Deferred`] effect on its own timer facility.

use std::time::Duration;

use crate::error::{ClientError, ClientResult};
use crate::model::{
    ActionResponse, GraphResponse, SignalRequest, SignalTiming, SnapshotResponse, SourceStatus,
    TrafficReading, VideoSource,
};
use crate::presenter::{
    Badge, DensityBar, GraphPanel, MetricsDisplay, Notice, NoticeKind, SignalButton,
    SignalDisplay,
};
use crate::report::{Action, ErrorSink, TracingSink};
use crate::state::{ClientState, ConfirmId, NoticeId};
use crate::view::DashboardView;

const GRAPH_FALLBACK: &str = "Failed to generate graph";

/// Tunables shared by every front end
#[derive(Debug, Clone)]
pub struct DashboardSettings {
    /// Snapshot failures tolerated before the badge shows "Error"
    pub error_threshold: u32,
    /// How long success notices stay visible
    pub success_notice_ttl: Duration,
    /// How long the signal button stays in its confirmed state
    pub signal_confirm_ttl: Duration,
    pub upload: UploadPolicy,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            error_threshold: 3,
            success_notice_ttl: Duration::from_millis(3000),
            signal_confirm_ttl: Duration::from_millis(2000),
            upload: UploadPolicy::default(),
        }
    }
}

/// Client-side checks applied before a video is uploaded
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_bytes: u64,
    /// Lower-case extensions without the dot
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: 500 * 1024 * 1024,
            allowed_extensions: ["mp4", "avi", "mov", "mkv", "flv", "wmv", "webm", "mp4v"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl UploadPolicy {
    /// Check a file before sending it
    pub fn validate(&self, file_name: &str, size: u64) -> Result<(), String> {
        if file_name.trim().is_empty() {
            return Err("No file selected".to_string());
        }

        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());

        let allowed = extension
            .map(|ext| self.allowed_extensions.iter().any(|a| *a == ext))
            .unwrap_or(false);
        if !allowed {
            return Err("Invalid file type. Use: mp4, avi, mov, mkv".to_string());
        }

        if size > self.max_bytes {
            return Err(format!(
                "File too large (max {} MB)",
                self.max_bytes / (1024 * 1024)
            ));
        }

        Ok(())
    }
}

/// A timed UI effect the runtime must schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Hide notice `id` if it is still the one showing
    HideNotice { id: NoticeId, after: Duration },
    /// Put the signal button back if confirmation `id` is still the latest
    RevertSignalButton { id: ConfirmId, after: Duration },
}

impl Deferred {
    pub fn delay(&self) -> Duration {
        match self {
            Deferred::HideNotice { after, .. } => *after,
            Deferred::RevertSignalButton { after, .. } => *after,
        }
    }
}

/// Session state plus the view it drives
pub struct Dashboard<V, S = TracingSink> {
    state: ClientState,
    view: V,
    sink: S,
    settings: DashboardSettings,
}

impl<V: DashboardView, S: ErrorSink> Dashboard<V, S> {
    pub fn new(view: V, sink: S, settings: DashboardSettings) -> Self {
        Self {
            state: ClientState::new(settings.error_threshold),
            view,
            sink,
            settings,
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    // ============ Snapshot polling ============

    /// Render one poll result
    pub fn apply_snapshot(&mut self, result: ClientResult<SnapshotResponse>) {
        match result {
            Ok(snapshot) if snapshot.is_ok() => {
                let reading = snapshot.reading();
                self.render_reading(&reading);
            }
            Ok(snapshot) => {
                let message = snapshot
                    .message
                    .unwrap_or_else(|| format!("snapshot status \"{}\"", snapshot.status));
                self.snapshot_failed(ClientError::Rejected(message));
            }
            Err(e) => self.snapshot_failed(e),
        }
    }

    fn render_reading(&mut self, reading: &TrafficReading) {
        self.state.record_success(reading.level);

        tracing::debug!(
            density = reading.density,
            vehicles = reading.vehicle_count,
            level = %reading.level,
            "Snapshot received"
        );

        self.view.set_badge(Badge::Live);
        self.view.set_metrics(&MetricsDisplay::for_reading(reading));
        self.view.set_density_bar(DensityBar::for_reading(reading));
        self.view.set_summary(&reading.summary);

        if let Some(frame) = &reading.frame {
            self.view.show_frame(frame);
        }

        self.view.set_signal(SignalDisplay::for_level(reading.level));
        self.view.set_source_label(reading.source.label());

        if self.state.clear_danger_notice() {
            self.view.hide_notice();
        }
    }

    fn snapshot_failed(&mut self, error: ClientError) {
        self.sink.report(Action::Snapshot, &error);

        if self.state.record_failure() {
            self.view.set_badge(Badge::Error);
        }
        self.view.show_placeholder();
    }

    // ============ Signal configuration ============

    /// Request body carrying the last-known cluster level
    pub fn signal_request(&self) -> SignalRequest {
        SignalRequest {
            cluster_level: self.state.cluster_level(),
        }
    }

    pub fn apply_signal(&mut self, result: ClientResult<SignalTiming>) -> Option<Deferred> {
        match result {
            Ok(timing) => {
                tracing::info!(
                    green = timing.green_time,
                    red = timing.red_time,
                    "Signal configured"
                );
                self.view.show_signal_timing(&timing);
                self.view.set_signal_button(SignalButton::Confirmed);
                Some(Deferred::RevertSignalButton {
                    id: self.state.confirm_signal(),
                    after: self.settings.signal_confirm_ttl,
                })
            }
            Err(e) => {
                self.sink.report(Action::ConfigureSignal, &e);
                self.notify(Notice::danger("Failed to configure signal"))
            }
        }
    }

    // ============ Graph modal ============

    /// Start a graph load, opening the modal first when `open_modal` is set
    pub fn begin_graph(&mut self, open_modal: bool) {
        if open_modal {
            self.view.open_graph_modal();
        }
        self.view.set_graph(GraphPanel::Loading);
    }

    pub fn apply_graph(&mut self, result: ClientResult<GraphResponse>) {
        let panel = match result {
            Ok(GraphResponse {
                status,
                graph: Some(graph),
                data_points,
                ..
            }) if status == "success" => {
                tracing::info!(data_points = data_points.unwrap_or(0), "Graph generated");
                GraphPanel::Image(graph)
            }
            Ok(response) => {
                let message = response
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| GRAPH_FALLBACK.to_string());
                self.sink
                    .report(Action::LoadGraph, &ClientError::Rejected(message.clone()));
                GraphPanel::Error(message)
            }
            Err(e) => {
                self.sink.report(Action::LoadGraph, &e);
                GraphPanel::Error(format!("Error loading graph: {}", e))
            }
        };
        self.view.set_graph(panel);
    }

    // ============ Video upload ============

    /// Validate a selected file and show the uploading notice.
    ///
    /// Returns `false` when the file was rejected and must not be sent.
    pub fn begin_upload(&mut self, file_name: &str, size: u64) -> bool {
        if let Err(reason) = self.settings.upload.validate(file_name, size) {
            let error = ClientError::InvalidUpload(reason);
            self.sink.report(Action::UploadVideo, &error);
            self.notify(Notice::danger(format!("✗ {}", error)));
            return false;
        }

        tracing::info!(file = %file_name, bytes = size, "Uploading video");
        self.notify(Notice::info("⏳ Uploading video..."));
        true
    }

    pub fn apply_upload(&mut self, result: ClientResult<ActionResponse>) -> Option<Deferred> {
        match result {
            Ok(response) if response.is_success() => {
                self.state.reset_errors();
                self.notify(Notice::success(format!("✓ {}", response.message)))
            }
            Ok(response) => {
                self.sink.report(
                    Action::UploadVideo,
                    &ClientError::Rejected(response.message.clone()),
                );
                self.notify(Notice::danger(format!("✗ {}", response.message)))
            }
            Err(e) => {
                self.sink.report(Action::UploadVideo, &e);
                self.notify(Notice::danger(format!("✗ Upload failed: {}", e)))
            }
        }
    }

    // ============ Video deletion ============

    pub fn begin_delete(&mut self) {
        self.notify(Notice::info("Deleting video..."));
    }

    pub fn apply_delete(&mut self, result: ClientResult<ActionResponse>) -> Option<Deferred> {
        match result {
            Ok(response) if response.is_success() => {
                let deferred = self.notify(Notice::success(format!("✓ {}", response.message)));
                self.show_no_source();
                deferred
            }
            Ok(response) => {
                self.sink.report(
                    Action::DeleteVideo,
                    &ClientError::Rejected(response.message.clone()),
                );
                self.notify(Notice::danger(format!("✗ {}", response.message)))
            }
            Err(e) => {
                self.sink.report(Action::DeleteVideo, &e);
                self.notify(Notice::danger("✗ Delete failed"))
            }
        }
    }

    // ============ Source switching ============

    pub fn begin_switch(&mut self) {
        self.notify(Notice::info("Activating webcam..."));
    }

    pub fn apply_switch(&mut self, result: ClientResult<ActionResponse>) -> Option<Deferred> {
        match result {
            Ok(response) if response.is_success() => {
                self.state.reset_errors();
                self.notify(Notice::success(format!("✓ {}", response.message)))
            }
            Ok(response) => {
                self.sink.report(
                    Action::SwitchSource,
                    &ClientError::Rejected(response.message.clone()),
                );
                self.notify(Notice::danger(format!("✗ {}", response.message)))
            }
            Err(e) => {
                self.sink.report(Action::SwitchSource, &e);
                self.notify(Notice::danger("✗ Webcam activation failed"))
            }
        }
    }

    // ============ Source status ============

    pub fn apply_source_status(&mut self, result: ClientResult<SourceStatus>) {
        match result {
            Ok(status) if status.is_ready() => {
                self.view.set_source_label(status.source().label());
            }
            Ok(status) if status.status == "no_source" || status.status == "ready" => {
                self.show_no_source();
            }
            Ok(status) => {
                let message = status
                    .message
                    .unwrap_or_else(|| format!("status \"{}\"", status.status));
                self.sink
                    .report(Action::SourceStatus, &ClientError::Rejected(message));
            }
            Err(e) => self.sink.report(Action::SourceStatus, &e),
        }
    }

    // ============ Timers ============

    /// Run a deferred effect whose delay has elapsed
    pub fn expire(&mut self, deferred: Deferred) {
        match deferred {
            Deferred::HideNotice { id, .. } => {
                if self.state.notice_expired(id) {
                    self.view.hide_notice();
                }
            }
            Deferred::RevertSignalButton { id, .. } => {
                if self.state.is_current_confirmation(id) {
                    self.view.set_signal_button(SignalButton::Idle);
                }
            }
        }
    }

    fn notify(&mut self, notice: Notice) -> Option<Deferred> {
        let id = self.state.post_notice(notice.kind);
        self.view.show_notice(&notice);

        match notice.kind {
            NoticeKind::Success => Some(Deferred::HideNotice {
                id,
                after: self.settings.success_notice_ttl,
            }),
            NoticeKind::Info | NoticeKind::Danger => None,
        }
    }

    fn show_no_source(&mut self) {
        self.view.set_source_label(VideoSource::None.label());
        self.view.show_placeholder();
        self.view.set_badge(Badge::NoSource);
    }
}
