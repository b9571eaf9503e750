//! Dashboard Controller
//!
//! Drives a [`Dashboard`] on tokio: performs requests through a
//! [`TrafficApi`], feeds the results to the reducer, schedules deferred UI
//! effects, and owns the snapshot polling timer.
//!
//! Requests are never serialized against each other. A slow poll, the next
//! tick and a user action may all be in flight at once; each result is
//! applied when it arrives.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::client::TrafficApi;
use crate::dashboard::{Dashboard, Deferred};
use crate::error::ClientError;
use crate::report::{ErrorSink, TracingSink};
use crate::view::DashboardView;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns the API client, the dashboard and the polling monitor
pub struct Controller<A, V, S = TracingSink> {
    api: Arc<A>,
    dashboard: Arc<Mutex<Dashboard<V, S>>>,
    poll_interval: Duration,
    monitor: Mutex<Option<JoinHandle<()>>>,
}

impl<A, V, S> Controller<A, V, S>
where
    A: TrafficApi + 'static,
    V: DashboardView + Send + 'static,
    S: ErrorSink + Send + 'static,
{
    pub fn new(api: A, dashboard: Dashboard<V, S>, poll_interval: Duration) -> Self {
        Self {
            api: Arc::new(api),
            dashboard: Arc::new(Mutex::new(dashboard)),
            poll_interval,
            monitor: Mutex::new(None),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Read-only access to the dashboard
    pub fn inspect<R>(&self, f: impl FnOnce(&Dashboard<V, S>) -> R) -> R {
        f(&lock(&self.dashboard))
    }

    fn update<R>(&self, f: impl FnOnce(&mut Dashboard<V, S>) -> R) -> R {
        f(&mut lock(&self.dashboard))
    }

    /// Run `deferred` once its delay has elapsed
    fn schedule(&self, deferred: Option<Deferred>) {
        let Some(deferred) = deferred else {
            return;
        };

        let dashboard = Arc::clone(&self.dashboard);
        tokio::spawn(async move {
            tokio::time::sleep(deferred.delay()).await;
            lock(&dashboard).expire(deferred);
        });
    }

    // ============ Monitoring ============

    /// Start polling snapshots, replacing any running monitor.
    ///
    /// The first poll happens one interval after the call. Each tick spawns
    /// its own request, so a slow response never delays the next tick.
    pub fn start_monitoring(self: &Arc<Self>) {
        let mut slot = lock(&self.monitor);
        if let Some(previous) = slot.take() {
            previous.abort();
            tracing::debug!("Replaced running monitor");
        }

        let weak: Weak<Self> = Arc::downgrade(self);
        let period = self.poll_interval;

        tracing::info!(interval_ms = period.as_millis() as u64, "Monitoring started");

        *slot = Some(tokio::spawn(async move {
            if let Some(controller) = weak.upgrade() {
                tokio::spawn(async move { controller.check_status().await });
            }

            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let Some(controller) = weak.upgrade() else {
                    break;
                };
                tokio::spawn(async move { controller.poll_once().await });
            }
        }));
    }

    /// Stop polling. In-flight requests still complete and render.
    pub fn stop_monitoring(&self) {
        if let Some(handle) = lock(&self.monitor).take() {
            handle.abort();
            tracing::info!("Monitoring stopped");
        }
    }

    pub fn is_monitoring(&self) -> bool {
        lock(&self.monitor)
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Fetch and render one snapshot
    pub async fn poll_once(&self) {
        let result = self.api.snapshot().await;
        self.update(|d| d.apply_snapshot(result));
    }

    // ============ Actions ============

    /// Send the last-known cluster level to the signal controller
    pub async fn configure_signal(&self) {
        let request = self.update(|d| d.signal_request());
        tracing::info!(level = %request.cluster_level, "Configuring signal");

        let result = self.api.control_signal(&request).await;
        let deferred = self.update(|d| d.apply_signal(result));
        self.schedule(deferred);
    }

    /// Open the graph modal and load the graph
    pub async fn show_graph(&self) {
        self.update(|d| d.begin_graph(true));
        self.load_graph().await;
    }

    /// Reload the graph without reopening the modal
    pub async fn refresh_graph(&self) {
        self.update(|d| d.begin_graph(false));
        self.load_graph().await;
    }

    async fn load_graph(&self) {
        let result = self.api.generate_graph().await;
        self.update(|d| d.apply_graph(result));
    }

    /// Upload a video file from disk
    pub async fn upload_video(&self, path: &Path) {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let size = match tokio::fs::metadata(path).await {
            Ok(meta) => meta.len(),
            Err(e) => {
                let deferred = self.update(|d| {
                    d.apply_upload(Err(ClientError::Io {
                        path: path.to_path_buf(),
                        error: e.to_string(),
                    }))
                });
                self.schedule(deferred);
                return;
            }
        };

        if !self.update(|d| d.begin_upload(&file_name, size)) {
            return;
        }

        let result = match tokio::fs::read(path).await {
            Ok(data) => self.api.upload_video(&file_name, data).await,
            Err(e) => Err(ClientError::Io {
                path: path.to_path_buf(),
                error: e.to_string(),
            }),
        };

        let deferred = self.update(|d| d.apply_upload(result));
        self.schedule(deferred);
    }

    /// Upload an in-memory video
    pub async fn upload_bytes(&self, file_name: &str, data: Vec<u8>) {
        if !self.update(|d| d.begin_upload(file_name, data.len() as u64)) {
            return;
        }

        let result = self.api.upload_video(file_name, data).await;
        let deferred = self.update(|d| d.apply_upload(result));
        self.schedule(deferred);
    }

    pub async fn delete_video(&self) {
        self.update(|d| d.begin_delete());

        let result = self.api.delete_video().await;
        let deferred = self.update(|d| d.apply_delete(result));
        self.schedule(deferred);
    }

    pub async fn switch_to_webcam(&self) {
        self.update(|d| d.begin_switch());

        let result = self.api.switch_to_webcam().await;
        let deferred = self.update(|d| d.apply_switch(result));
        self.schedule(deferred);
    }

    /// Probe which video source the backend has open
    pub async fn check_status(&self) {
        let result = self.api.source_status().await;
        self.update(|d| d.apply_source_status(result));
    }
}

impl<A, V, S> Drop for Controller<A, V, S> {
    fn drop(&mut self) {
        if let Some(handle) = lock(&self.monitor).take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::DashboardSettings;
    use crate::error::ClientResult;
    use crate::model::{
        ActionResponse, ClusterLevel, GraphResponse, SignalRequest, SignalTiming,
        SnapshotResponse, SourceStatus,
    };
    use crate::presenter::{Badge, Notice, SignalButton};
    use crate::report::MemorySink;
    use crate::view::testing::{RecordingView, ViewEvent};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeApi {
        snapshot_calls: AtomicUsize,
        status_calls: AtomicUsize,
        snapshots: Mutex<VecDeque<ClientResult<SnapshotResponse>>>,
        upload_reply: Mutex<Option<ClientResult<ActionResponse>>>,
        uploads: Mutex<Vec<(String, usize)>>,
        signal_levels: Mutex<Vec<ClusterLevel>>,
    }

    impl FakeApi {
        fn with_snapshots(snapshots: Vec<ClientResult<SnapshotResponse>>) -> Self {
            Self {
                snapshots: Mutex::new(snapshots.into()),
                ..Default::default()
            }
        }

        fn snapshot_calls(&self) -> usize {
            self.snapshot_calls.load(Ordering::SeqCst)
        }
    }

    fn ok_snapshot(level: &str) -> SnapshotResponse {
        SnapshotResponse {
            status: "ok".into(),
            density_score: Some(0.5),
            bbox_count: Some(4),
            cluster_level: Some(level.into()),
            video_source: Some("webcam".into()),
            ..Default::default()
        }
    }

    fn success(message: &str) -> ActionResponse {
        ActionResponse {
            status: "success".into(),
            message: message.into(),
        }
    }

    #[async_trait]
    impl TrafficApi for FakeApi {
        async fn snapshot(&self) -> ClientResult<SnapshotResponse> {
            self.snapshot_calls.fetch_add(1, Ordering::SeqCst);
            lock(&self.snapshots)
                .pop_front()
                .unwrap_or_else(|| Ok(ok_snapshot("medium")))
        }

        async fn control_signal(&self, request: &SignalRequest) -> ClientResult<SignalTiming> {
            lock(&self.signal_levels).push(request.cluster_level);
            Ok(SignalTiming {
                green_time: 60,
                red_time: 20,
                note: format!("Signal configured for {} traffic", request.cluster_level),
            })
        }

        async fn generate_graph(&self) -> ClientResult<GraphResponse> {
            Ok(GraphResponse {
                status: "success".into(),
                graph: Some("PNGDATA".into()),
                message: None,
                data_points: Some(3),
            })
        }

        async fn upload_video(
            &self,
            file_name: &str,
            data: Vec<u8>,
        ) -> ClientResult<ActionResponse> {
            lock(&self.uploads).push((file_name.to_string(), data.len()));
            lock(&self.upload_reply)
                .take()
                .unwrap_or_else(|| Ok(success("Saved")))
        }

        async fn delete_video(&self) -> ClientResult<ActionResponse> {
            Ok(success("Deleted 1 file(s)"))
        }

        async fn switch_to_webcam(&self) -> ClientResult<ActionResponse> {
            Ok(success("Webcam activated successfully"))
        }

        async fn source_status(&self) -> ClientResult<SourceStatus> {
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            Ok(SourceStatus {
                status: "no_source".into(),
                video_source: Some("none".into()),
                video_ok: false,
                message: None,
            })
        }
    }

    type TestController = Controller<FakeApi, RecordingView, MemorySink>;

    fn controller(api: FakeApi) -> (Arc<TestController>, RecordingView, MemorySink) {
        let view = RecordingView::default();
        let sink = MemorySink::new();
        let dashboard = Dashboard::new(view.clone(), sink.clone(), DashboardSettings::default());
        let controller = Arc::new(Controller::new(api, dashboard, Duration::from_millis(500)));
        (controller, view, sink)
    }

    #[tokio::test(start_paused = true)]
    async fn test_restarting_keeps_one_timer() {
        let (controller, _view, _sink) = controller(FakeApi::default());

        controller.start_monitoring();
        controller.start_monitoring();
        controller.start_monitoring();
        assert!(controller.is_monitoring());

        tokio::time::sleep(Duration::from_millis(1250)).await;
        assert_eq!(controller.api().snapshot_calls(), 2);
        assert_eq!(controller.api().status_calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(controller.api().snapshot_calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_monitoring() {
        let (controller, _view, _sink) = controller(FakeApi::default());

        controller.start_monitoring();
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(controller.api().snapshot_calls(), 1);

        controller.stop_monitoring();
        assert!(!controller.is_monitoring());

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(controller.api().snapshot_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_polling_survives_failures() {
        let failures = (0..4)
            .map(|_| Err(ClientError::Network("connection refused".into())))
            .collect();
        let (controller, view, sink) = controller(FakeApi::with_snapshots(failures));

        controller.start_monitoring();
        tokio::time::sleep(Duration::from_millis(2100)).await;
        assert_eq!(view.last_badge(), Some(Badge::Error));
        assert_eq!(sink.count(crate::report::Action::Snapshot), 4);

        // The fifth tick succeeds and the badge recovers
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(view.last_badge(), Some(Badge::Live));
        assert_eq!(controller.inspect(|d| d.state().consecutive_errors()), 0);
        assert!(controller.is_monitoring());
    }

    #[tokio::test(start_paused = true)]
    async fn test_signal_uses_polled_level_and_reverts() {
        let api = FakeApi::with_snapshots(vec![Ok(ok_snapshot("high"))]);
        let (controller, view, _sink) = controller(api);

        controller.poll_once().await;
        controller.configure_signal().await;

        assert_eq!(*lock(&controller.api().signal_levels), vec![ClusterLevel::High]);
        assert!(view
            .events()
            .contains(&ViewEvent::SignalButton(SignalButton::Confirmed)));

        tokio::time::sleep(Duration::from_millis(2001)).await;
        assert_eq!(
            view.events().last(),
            Some(&ViewEvent::SignalButton(SignalButton::Idle))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_confirm_gets_full_two_seconds() {
        let (controller, view, _sink) = controller(FakeApi::default());
        let last_button = || {
            view.events().into_iter().rev().find_map(|e| match e {
                ViewEvent::SignalButton(button) => Some(button),
                _ => None,
            })
        };

        controller.configure_signal().await;
        tokio::time::sleep(Duration::from_millis(1500)).await;
        controller.configure_signal().await;

        // The first click's timer has fired by now
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(last_button(), Some(SignalButton::Confirmed));

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(last_button(), Some(SignalButton::Idle));
    }

    #[tokio::test(start_paused = true)]
    async fn test_upload_success_notice_hides_after_three_seconds() {
        let (controller, view, _sink) = controller(FakeApi::default());

        controller.upload_bytes("clip.mp4", vec![0u8; 16]).await;
        assert_eq!(view.last_notice(), Some(Notice::success("✓ Saved")));
        assert!(view.notice_visible());

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(view.notice_visible());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!view.notice_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_upload_failure_notice_persists() {
        let api = FakeApi::default();
        *lock(&api.upload_reply) = Some(Ok(ActionResponse {
            status: "error".into(),
            message: "Bad format".into(),
        }));
        let (controller, view, _sink) = controller(api);

        controller.upload_bytes("clip.mp4", vec![1, 2, 3]).await;
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert!(view.notice_visible());
        assert_eq!(view.last_notice(), Some(Notice::danger("✗ Bad format")));
    }

    #[tokio::test]
    async fn test_upload_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intersection.mp4");
        std::fs::write(&path, vec![7u8; 64]).unwrap();

        let (controller, _view, _sink) = controller(FakeApi::default());
        controller.upload_video(&path).await;

        assert_eq!(
            *lock(&controller.api().uploads),
            vec![("intersection.mp4".to_string(), 64)]
        );
    }

    #[tokio::test]
    async fn test_upload_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let (controller, view, sink) = controller(FakeApi::default());

        controller.upload_video(&dir.path().join("gone.mp4")).await;

        let notice = view.last_notice().unwrap();
        assert!(notice.text.starts_with("✗ Upload failed: cannot read"));
        assert!(lock(&controller.api().uploads).is_empty());
        assert_eq!(sink.count(crate::report::Action::UploadVideo), 1);
    }

    #[tokio::test]
    async fn test_rejected_file_is_not_sent() {
        let (controller, view, _sink) = controller(FakeApi::default());

        controller.upload_bytes("readme.txt", vec![0u8; 4]).await;

        assert!(lock(&controller.api().uploads).is_empty());
        assert_eq!(
            view.last_notice(),
            Some(Notice::danger("✗ Invalid file type. Use: mp4, avi, mov, mkv"))
        );
    }

    #[tokio::test]
    async fn test_graph_and_refresh() {
        let (controller, view, _sink) = controller(FakeApi::default());

        controller.show_graph().await;
        controller.refresh_graph().await;

        let opens = view
            .events()
            .iter()
            .filter(|e| **e == ViewEvent::OpenGraph)
            .count();
        assert_eq!(opens, 1);
        assert_eq!(
            view.last_graph(),
            Some(crate::presenter::GraphPanel::Image("PNGDATA".into()))
        );
    }

    #[tokio::test]
    async fn test_delete_and_switch() {
        let (controller, view, _sink) = controller(FakeApi::default());

        controller.delete_video().await;
        assert_eq!(view.last_badge(), Some(Badge::NoSource));

        controller.switch_to_webcam().await;
        assert_eq!(
            view.last_notice(),
            Some(Notice::success("✓ Webcam activated successfully"))
        );
    }
}
