//! Backend API Client
//!
//! The [`TrafficApi`] trait is the seam between the controller and the
//! analytics backend. [`HttpClient`] talks to the real REST API.

mod http;

pub use http::HttpClient;

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::model::{
    ActionResponse, GraphResponse, SignalRequest, SignalTiming, SnapshotResponse, SourceStatus,
};

/// Operations offered by the traffic analytics backend
#[async_trait]
pub trait TrafficApi: Send + Sync {
    /// `GET /api/traffic_snapshot`
    async fn snapshot(&self) -> ClientResult<SnapshotResponse>;

    /// `POST /api/control_signal`
    async fn control_signal(&self, request: &SignalRequest) -> ClientResult<SignalTiming>;

    /// `GET /api/generate_graph`
    async fn generate_graph(&self) -> ClientResult<GraphResponse>;

    /// `POST /api/upload_video` with the file as multipart field `video`
    async fn upload_video(&self, file_name: &str, data: Vec<u8>) -> ClientResult<ActionResponse>;

    /// `POST /api/delete_video`
    async fn delete_video(&self) -> ClientResult<ActionResponse>;

    /// `POST /api/switch_source` with `{source: "webcam"}`
    async fn switch_to_webcam(&self) -> ClientResult<ActionResponse>;

    /// `GET /api/status`
    async fn source_status(&self) -> ClientResult<SourceStatus>;
}
