//! Wire and Domain Types
//!
//! Request/response DTOs for the traffic analytics REST API, plus the typed
//! values the dashboard works with once defaults have been applied.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================
// Domain values
// ============================================

/// Discrete traffic-density classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl ClusterLevel {
    /// Parse a wire value. Missing or unrecognized levels fall back to `Medium`.
    pub fn from_wire(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "low" => ClusterLevel::Low,
            Some(v) if v == "high" => ClusterLevel::High,
            _ => ClusterLevel::Medium,
        }
    }

    /// Level from the numeric `cluster_label` (0, 1, 2)
    pub fn from_label(label: u8) -> Option<Self> {
        match label {
            0 => Some(ClusterLevel::Low),
            1 => Some(ClusterLevel::Medium),
            2 => Some(ClusterLevel::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterLevel::Low => "low",
            ClusterLevel::Medium => "medium",
            ClusterLevel::High => "high",
        }
    }
}

impl fmt::Display for ClusterLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Active video source on the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoSource {
    Webcam,
    File,
    #[default]
    None,
}

impl VideoSource {
    /// Parse a wire value. Anything unrecognized is treated as no source.
    pub fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some("webcam") => VideoSource::Webcam,
            Some("file") => VideoSource::File,
            _ => VideoSource::None,
        }
    }

    /// Human-readable label shown in the source field
    pub fn label(&self) -> &'static str {
        match self {
            VideoSource::Webcam => "Webcam",
            VideoSource::File => "Video File",
            VideoSource::None => "None",
        }
    }
}

/// One snapshot with defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficReading {
    pub density: f64,
    pub vehicle_count: u64,
    pub level: ClusterLevel,
    pub summary: String,
    /// Base64 JPEG preview frame
    pub frame: Option<String>,
    pub source: VideoSource,
}

// ============================================
// Response DTOs
// ============================================

/// `GET /api/traffic_snapshot`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SnapshotResponse {
    pub status: String,
    #[serde(default)]
    pub density_score: Option<f64>,
    #[serde(default)]
    pub bbox_count: Option<u64>,
    #[serde(default)]
    pub cluster_level: Option<String>,
    #[serde(default)]
    pub cluster_label: Option<u8>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub frame: Option<String>,
    #[serde(default)]
    pub video_source: Option<String>,
    /// Present on error responses
    #[serde(default)]
    pub message: Option<String>,
}

impl SnapshotResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    /// Convert into a typed reading, applying the display defaults
    pub fn reading(&self) -> TrafficReading {
        let level = match (&self.cluster_level, self.cluster_label) {
            (Some(level), _) => ClusterLevel::from_wire(Some(level)),
            (None, Some(label)) => ClusterLevel::from_label(label).unwrap_or_default(),
            (None, None) => ClusterLevel::Medium,
        };

        TrafficReading {
            density: self.density_score.filter(|d| d.is_finite()).unwrap_or(0.0),
            vehicle_count: self.bbox_count.unwrap_or(0),
            level,
            summary: self.summary.clone().unwrap_or_default(),
            frame: self.frame.clone().filter(|f| !f.is_empty()),
            source: VideoSource::from_wire(self.video_source.as_deref()),
        }
    }
}

/// `POST /api/control_signal`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SignalTiming {
    pub green_time: u32,
    pub red_time: u32,
    pub note: String,
}

/// `GET /api/generate_graph`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GraphResponse {
    pub status: String,
    #[serde(default)]
    pub graph: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data_points: Option<u32>,
}

impl GraphResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Generic `{status, message}` reply for upload/delete/switch
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ActionResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl ActionResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// `GET /api/status`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SourceStatus {
    pub status: String,
    #[serde(default)]
    pub video_source: Option<String>,
    #[serde(default)]
    pub video_ok: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl SourceStatus {
    pub fn source(&self) -> VideoSource {
        VideoSource::from_wire(self.video_source.as_deref())
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready" && self.video_ok
    }
}

// ============================================
// Request DTOs
// ============================================

#[derive(Debug, Clone, Serialize)]
pub struct SignalRequest {
    pub cluster_level: ClusterLevel,
}

#[derive(Debug, Clone, Serialize)]
pub struct SwitchSourceRequest {
    pub source: String,
}

impl SwitchSourceRequest {
    pub fn webcam() -> Self {
        Self {
            source: "webcam".to_string(),
        }
    }
}

/// API endpoint paths, relative to the backend base URL
pub mod endpoints {
    pub const SNAPSHOT: &str = "/api/traffic_snapshot";
    pub const CONTROL_SIGNAL: &str = "/api/control_signal";
    pub const GENERATE_GRAPH: &str = "/api/generate_graph";
    pub const UPLOAD_VIDEO: &str = "/api/upload_video";
    pub const DELETE_VIDEO: &str = "/api/delete_video";
    pub const SWITCH_SOURCE: &str = "/api/switch_source";
    pub const STATUS: &str = "/api/status";

    /// Multipart field carrying the uploaded video
    pub const UPLOAD_FIELD: &str = "video";
}
