//! Backend API
//!
//! `gloo-net` requests against the traffic analytics REST API, behind the
//! [`Backend`] trait the runtime is generic over.

mod client;

pub use client::*;

use traffic_dashboard::model::{
    ActionResponse, GraphResponse, SignalRequest, SignalTiming, SnapshotResponse, SourceStatus,
};
use traffic_dashboard::ClientResult;

/// Calls the dashboard makes against the backend.
///
/// The browser is single-threaded, so futures are not required to be `Send`.
#[allow(async_fn_in_trait)]
pub trait Backend: 'static {
    async fn fetch_snapshot(&self) -> ClientResult<SnapshotResponse>;

    async fn control_signal(&self, request: &SignalRequest) -> ClientResult<SignalTiming>;

    async fn generate_graph(&self) -> ClientResult<GraphResponse>;

    async fn upload_video(&self, file: &web_sys::File) -> ClientResult<ActionResponse>;

    async fn delete_video(&self) -> ClientResult<ActionResponse>;

    async fn switch_to_webcam(&self) -> ClientResult<ActionResponse>;

    async fn source_status(&self) -> ClientResult<SourceStatus>;
}

/// The REST API at [`get_api_base`]
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpBackend;

impl Backend for HttpBackend {
    async fn fetch_snapshot(&self) -> ClientResult<SnapshotResponse> {
        client::fetch_snapshot().await
    }

    async fn control_signal(&self, request: &SignalRequest) -> ClientResult<SignalTiming> {
        client::control_signal(request).await
    }

    async fn generate_graph(&self) -> ClientResult<GraphResponse> {
        client::generate_graph().await
    }

    async fn upload_video(&self, file: &web_sys::File) -> ClientResult<ActionResponse> {
        client::upload_video(file).await
    }

    async fn delete_video(&self) -> ClientResult<ActionResponse> {
        client::delete_video().await
    }

    async fn switch_to_webcam(&self) -> ClientResult<ActionResponse> {
        client::switch_to_webcam().await
    }

    async fn source_status(&self) -> ClientResult<SourceStatus> {
        client::source_status().await
    }
}
