//! Dashboard Runtime
//!
//! Drives the shared [`Dashboard`] reducer from the browser event loop:
//! requests go out through a [`Backend`], results are applied to the
//! reducer, and timed effects run on `gloo-timers`.

use gloo_timers::callback::{Interval, Timeout};
use leptos::spawn_local;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use traffic_dashboard::{Dashboard, DashboardSettings, Deferred};

use super::console::ConsoleSink;
use super::view::SignalView;
use crate::api::{Backend, HttpBackend};

/// Snapshot poll period
pub const POLL_INTERVAL_MS: u32 = 500;

type UiDashboard = Dashboard<SignalView, ConsoleSink>;

struct Inner<B> {
    backend: B,
    dashboard: RefCell<UiDashboard>,
    /// Active poll timer; dropping an `Interval` cancels it
    monitor: RefCell<Option<Interval>>,
    poll_interval_ms: u32,
}

/// Handle shared by every component through context
pub struct DashboardRuntime<B = HttpBackend> {
    inner: Rc<Inner<B>>,
}

impl<B> Clone for DashboardRuntime<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<B: Backend> DashboardRuntime<B> {
    pub fn new(
        backend: B,
        view: SignalView,
        settings: DashboardSettings,
        poll_interval_ms: u32,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                backend,
                dashboard: RefCell::new(Dashboard::new(view, ConsoleSink, settings)),
                monitor: RefCell::new(None),
                poll_interval_ms: poll_interval_ms.max(1),
            }),
        }
    }

    pub fn view(&self) -> SignalView {
        *self.inner.dashboard.borrow().view()
    }

    /// Borrow is released before any await
    fn update<R>(&self, f: impl FnOnce(&mut UiDashboard) -> R) -> R {
        f(&mut self.inner.dashboard.borrow_mut())
    }

    fn downgrade(&self) -> Weak<Inner<B>> {
        Rc::downgrade(&self.inner)
    }

    fn upgrade(weak: &Weak<Inner<B>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    fn schedule(&self, deferred: Option<Deferred>) {
        let Some(deferred) = deferred else {
            return;
        };
        let delay = u32::try_from(deferred.delay().as_millis()).unwrap_or(u32::MAX);
        let weak = self.downgrade();
        Timeout::new(delay, move || {
            if let Some(runtime) = Self::upgrade(&weak) {
                runtime.update(|d| d.expire(deferred));
            }
        })
        .forget();
    }

    // ============ Monitoring ============

    /// Start polling snapshots. A running timer is cancelled first, so there
    /// is never more than one.
    pub fn start_monitoring(&self) {
        self.stop_monitoring();

        let status = self.clone();
        spawn_local(async move { status.check_status().await });

        let weak = self.downgrade();
        let interval = Interval::new(self.inner.poll_interval_ms, move || {
            if let Some(runtime) = Self::upgrade(&weak) {
                spawn_local(async move { runtime.poll_once().await });
            }
        });
        *self.inner.monitor.borrow_mut() = Some(interval);
    }

    pub fn stop_monitoring(&self) {
        if let Some(interval) = self.inner.monitor.borrow_mut().take() {
            interval.cancel();
        }
    }

    pub fn is_monitoring(&self) -> bool {
        self.inner.monitor.borrow().is_some()
    }

    pub async fn poll_once(&self) {
        let result = self.inner.backend.fetch_snapshot().await;
        self.update(|d| d.apply_snapshot(result));
    }

    async fn check_status(&self) {
        let result = self.inner.backend.source_status().await;
        self.update(|d| d.apply_source_status(result));
    }

    // ============ Actions ============

    pub async fn configure_signal(&self) {
        let request = self.update(|d| d.signal_request());
        let result = self.inner.backend.control_signal(&request).await;
        let deferred = self.update(|d| d.apply_signal(result));
        self.schedule(deferred);
    }

    pub async fn show_graph(&self) {
        self.update(|d| d.begin_graph(true));
        let result = self.inner.backend.generate_graph().await;
        self.update(|d| d.apply_graph(result));
    }

    pub async fn refresh_graph(&self) {
        self.update(|d| d.begin_graph(false));
        let result = self.inner.backend.generate_graph().await;
        self.update(|d| d.apply_graph(result));
    }

    pub async fn upload_video(&self, file: web_sys::File) {
        let name = file.name();
        let size = file.size().max(0.0) as u64;
        if !self.update(|d| d.begin_upload(&name, size)) {
            return;
        }

        let result = self.inner.backend.upload_video(&file).await;
        let deferred = self.update(|d| d.apply_upload(result));
        self.schedule(deferred);
    }

    pub async fn delete_video(&self) {
        self.update(|d| d.begin_delete());
        let result = self.inner.backend.delete_video().await;
        let deferred = self.update(|d| d.apply_delete(result));
        self.schedule(deferred);
    }

    pub async fn switch_to_webcam(&self) {
        self.update(|d| d.begin_switch());
        let result = self.inner.backend.switch_to_webcam().await;
        let deferred = self.update(|d| d.apply_switch(result));
        self.schedule(deferred);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use gloo_timers::future::TimeoutFuture;
    use leptos::{create_runtime, SignalGetUntracked};
    use std::cell::Cell;
    use std::time::Duration;
    use traffic_dashboard::model::{
        ActionResponse, GraphResponse, SignalRequest, SignalTiming, SnapshotResponse,
        SourceStatus,
    };
    use traffic_dashboard::{Badge, ClientResult, SignalButton};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Default)]
    struct FakeBackend {
        snapshots: Cell<u32>,
        uploads: Cell<u32>,
    }

    fn success(message: &str) -> ClientResult<ActionResponse> {
        Ok(ActionResponse {
            status: "success".to_string(),
            message: message.to_string(),
        })
    }

    impl Backend for FakeBackend {
        async fn fetch_snapshot(&self) -> ClientResult<SnapshotResponse> {
            self.snapshots.set(self.snapshots.get() + 1);
            Ok(SnapshotResponse {
                status: "ok".to_string(),
                density_score: Some(0.3),
                bbox_count: Some(4),
                cluster_level: Some("low".to_string()),
                ..Default::default()
            })
        }

        async fn control_signal(&self, _request: &SignalRequest) -> ClientResult<SignalTiming> {
            Ok(SignalTiming {
                green_time: 30,
                red_time: 60,
                note: "Light traffic".to_string(),
            })
        }

        async fn generate_graph(&self) -> ClientResult<GraphResponse> {
            Ok(GraphResponse {
                status: "success".to_string(),
                graph: Some("iVBORw0KGgo=".to_string()),
                ..Default::default()
            })
        }

        async fn upload_video(&self, _file: &web_sys::File) -> ClientResult<ActionResponse> {
            self.uploads.set(self.uploads.get() + 1);
            success("Saved")
        }

        async fn delete_video(&self) -> ClientResult<ActionResponse> {
            success("Video deleted")
        }

        async fn switch_to_webcam(&self) -> ClientResult<ActionResponse> {
            success("Webcam activated successfully")
        }

        async fn source_status(&self) -> ClientResult<SourceStatus> {
            Ok(SourceStatus {
                status: "ready".to_string(),
                video_source: Some("file".to_string()),
                video_ok: true,
                ..Default::default()
            })
        }
    }

    fn runtime(
        settings: DashboardSettings,
        poll_interval_ms: u32,
    ) -> DashboardRuntime<FakeBackend> {
        DashboardRuntime::new(
            FakeBackend::default(),
            SignalView::new(),
            settings,
            poll_interval_ms,
        )
    }

    fn video(name: &str) -> web_sys::File {
        let bits = js_sys::Array::of1(&"frames".into());
        web_sys::File::new_with_str_sequence(&bits, name).unwrap()
    }

    fn notice_text(runtime: &DashboardRuntime<FakeBackend>) -> Option<String> {
        runtime.view().notice.get_untracked().map(|n| n.text)
    }

    #[wasm_bindgen_test]
    async fn test_restart_keeps_one_poll_timer() {
        let reactive = create_runtime();
        let runtime = runtime(DashboardSettings::default(), 100);

        runtime.start_monitoring();
        runtime.start_monitoring();
        runtime.start_monitoring();
        assert!(runtime.is_monitoring());

        TimeoutFuture::new(350).await;
        // Three live timers would have polled about nine times
        let polls = runtime.inner.backend.snapshots.get();
        assert!((2..=4).contains(&polls), "polled {} times", polls);
        assert_eq!(runtime.view().badge.get_untracked(), Badge::Live);

        runtime.stop_monitoring();
        assert!(!runtime.is_monitoring());
        TimeoutFuture::new(300).await;
        assert_eq!(runtime.inner.backend.snapshots.get(), polls);

        reactive.dispose();
    }

    #[wasm_bindgen_test]
    async fn test_upload_notice_hides_after_ttl() {
        let reactive = create_runtime();
        let settings = DashboardSettings {
            success_notice_ttl: Duration::from_millis(100),
            ..Default::default()
        };
        let runtime = runtime(settings, 500);

        runtime.upload_video(video("clip.mp4")).await;
        assert_eq!(runtime.inner.backend.uploads.get(), 1);
        assert_eq!(notice_text(&runtime).as_deref(), Some("✓ Saved"));

        TimeoutFuture::new(200).await;
        assert!(notice_text(&runtime).is_none());

        reactive.dispose();
    }

    #[wasm_bindgen_test]
    async fn test_rejected_file_is_never_sent() {
        let reactive = create_runtime();
        let runtime = runtime(DashboardSettings::default(), 500);

        runtime.upload_video(video("notes.txt")).await;
        assert_eq!(runtime.inner.backend.uploads.get(), 0);
        assert!(notice_text(&runtime).is_some_and(|text| text.starts_with('✗')));

        reactive.dispose();
    }

    #[wasm_bindgen_test]
    async fn test_delete_resets_to_no_source() {
        let reactive = create_runtime();
        let runtime = runtime(DashboardSettings::default(), 500);

        runtime.delete_video().await;
        let view = runtime.view();
        assert_eq!(view.badge.get_untracked(), Badge::NoSource);
        assert_eq!(view.source_label.get_untracked(), "None");
        assert!(!view.preview_visible.get_untracked());
        assert_eq!(notice_text(&runtime).as_deref(), Some("✓ Video deleted"));

        reactive.dispose();
    }

    #[wasm_bindgen_test]
    async fn test_second_confirm_outlives_first_timer() {
        let reactive = create_runtime();
        let settings = DashboardSettings {
            signal_confirm_ttl: Duration::from_millis(200),
            ..Default::default()
        };
        let runtime = runtime(settings, 500);
        let button = || runtime.view().signal_button.get_untracked();

        runtime.configure_signal().await;
        TimeoutFuture::new(150).await;
        runtime.configure_signal().await;

        // The first click's timer has fired by now
        TimeoutFuture::new(100).await;
        assert_eq!(button(), SignalButton::Confirmed);

        TimeoutFuture::new(200).await;
        assert_eq!(button(), SignalButton::Idle);

        reactive.dispose();
    }
}
