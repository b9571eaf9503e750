//! Presentation Values
//!
//! Pure mappings from domain values to what the widgets display: texts,
//! CSS classes and which signal light is lit. Every front end renders these
//! values as-is, so the mapping rules live in one place.

use crate::model::{ClusterLevel, SignalTiming, TrafficReading};

/// Status badge in the page header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Connecting,
    Live,
    Error,
    NoSource,
}

impl Badge {
    pub fn text(&self) -> &'static str {
        match self {
            Badge::Connecting => "Connecting...",
            Badge::Live => "🟢 Live",
            Badge::Error => "Error",
            Badge::NoSource => "No Source",
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Badge::Connecting => "badge bg-secondary",
            Badge::Live => "badge bg-success",
            Badge::Error => "badge bg-danger",
            Badge::NoSource => "badge bg-secondary",
        }
    }
}

/// Density progress bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DensityBar {
    /// Fill width in percent (0..=100)
    pub percent: u8,
    pub level: ClusterLevel,
}

impl DensityBar {
    pub fn new(density: f64, level: ClusterLevel) -> Self {
        let percent = (density * 100.0).round().clamp(0.0, 100.0) as u8;
        Self { percent, level }
    }

    pub fn for_reading(reading: &TrafficReading) -> Self {
        Self::new(reading.density, reading.level)
    }

    /// Bootstrap contextual color for the level
    pub fn color(&self) -> &'static str {
        match self.level {
            ClusterLevel::Low => "success",
            ClusterLevel::Medium => "warning",
            ClusterLevel::High => "danger",
        }
    }

    pub fn class(&self) -> String {
        format!(
            "progress-bar bg-{} progress-bar-striped progress-bar-animated",
            self.color()
        )
    }

    /// Inline `width` style value, e.g. `"42%"`
    pub fn width(&self) -> String {
        format!("{}%", self.percent)
    }
}

/// One of the three traffic lights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Light {
    Red,
    Yellow,
    Green,
}

impl Light {
    pub const ALL: [Light; 3] = [Light::Red, Light::Yellow, Light::Green];

    /// DOM id of the light element
    pub fn id(&self) -> &'static str {
        match self {
            Light::Red => "red-light",
            Light::Yellow => "yellow-light",
            Light::Green => "green-light",
        }
    }

    fn on_class(&self) -> &'static str {
        match self {
            Light::Red => "signal-light red-on",
            Light::Yellow => "signal-light yellow-on",
            Light::Green => "signal-light green-on",
        }
    }
}

/// Signal indicator state: exactly one light lit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalDisplay {
    pub lit: Light,
}

impl SignalDisplay {
    pub fn for_level(level: ClusterLevel) -> Self {
        let lit = match level {
            ClusterLevel::High => Light::Red,
            ClusterLevel::Medium => Light::Yellow,
            ClusterLevel::Low => Light::Green,
        };
        Self { lit }
    }

    pub fn is_on(&self, light: Light) -> bool {
        self.lit == light
    }

    pub fn class_for(&self, light: Light) -> &'static str {
        if self.is_on(light) {
            light.on_class()
        } else {
            "signal-light"
        }
    }

    pub fn status_text(&self) -> &'static str {
        match self.lit {
            Light::Red => "🔴 Heavy Traffic",
            Light::Yellow => "🟡 Moderate Traffic",
            Light::Green => "🟢 Light Traffic",
        }
    }
}

/// Numeric readouts next to the density bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsDisplay {
    pub density: String,
    pub vehicle_count: String,
    pub level: String,
}

impl MetricsDisplay {
    pub fn for_reading(reading: &TrafficReading) -> Self {
        Self {
            density: format!("{:.2}", reading.density),
            vehicle_count: reading.vehicle_count.to_string(),
            level: reading.level.as_str().to_uppercase(),
        }
    }
}

/// Notice banner style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Danger,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Info => "info",
            NoticeKind::Success => "success",
            NoticeKind::Danger => "danger",
        }
    }
}

/// Message shown in the upload-status banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Info,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Success,
        }
    }

    pub fn danger(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Danger,
        }
    }

    pub fn class(&self) -> String {
        format!("alert alert-{}", self.kind.as_str())
    }
}

/// "Update Signal" button state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalButton {
    #[default]
    Idle,
    Confirmed,
}

impl SignalButton {
    pub fn text(&self) -> &'static str {
        match self {
            SignalButton::Idle => "Update Signal",
            SignalButton::Confirmed => "✓ Configured!",
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            SignalButton::Idle => "btn btn-primary btn-lg",
            SignalButton::Confirmed => "btn btn-success btn-lg",
        }
    }
}

/// Signal timing card contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingDisplay {
    pub green: String,
    pub red: String,
    pub note: String,
}

impl From<&SignalTiming> for TimingDisplay {
    fn from(timing: &SignalTiming) -> Self {
        Self {
            green: timing.green_time.to_string(),
            red: timing.red_time.to_string(),
            note: timing.note.clone(),
        }
    }
}

/// Graph modal body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphPanel {
    Loading,
    /// Base64 PNG
    Image(String),
    Error(String),
}

/// Data URL for a base64 JPEG preview frame
pub fn frame_data_url(frame: &str) -> String {
    format!("data:image/jpeg;base64,{}", frame)
}

/// Data URL for a base64 PNG graph
pub fn graph_data_url(graph: &str) -> String {
    format!("data:image/png;base64,{}", graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_width_is_rounded_percent() {
        for step in 0..=1000 {
            let density = step as f64 / 1000.0;
            let bar = DensityBar::new(density, ClusterLevel::Medium);
            assert_eq!(bar.percent as f64, (density * 100.0).round(), "density {}", density);
        }
        assert_eq!(DensityBar::new(0.42, ClusterLevel::Low).width(), "42%");
    }

    #[test]
    fn test_bar_clamps_out_of_range() {
        assert_eq!(DensityBar::new(1.7, ClusterLevel::High).percent, 100);
        assert_eq!(DensityBar::new(-0.2, ClusterLevel::Low).percent, 0);
    }

    #[test]
    fn test_bar_color_follows_level() {
        assert_eq!(DensityBar::new(0.1, ClusterLevel::Low).color(), "success");
        assert_eq!(DensityBar::new(0.1, ClusterLevel::Medium).color(), "warning");
        assert_eq!(DensityBar::new(0.1, ClusterLevel::High).color(), "danger");
        assert_eq!(
            DensityBar::new(0.9, ClusterLevel::High).class(),
            "progress-bar bg-danger progress-bar-striped progress-bar-animated"
        );
    }

    #[test]
    fn test_exactly_one_light_on() {
        for level in [ClusterLevel::Low, ClusterLevel::Medium, ClusterLevel::High] {
            let signal = SignalDisplay::for_level(level);
            let lit = Light::ALL.iter().filter(|l| signal.is_on(**l)).count();
            assert_eq!(lit, 1);

            let on_classes = Light::ALL
                .iter()
                .filter(|l| signal.class_for(**l).ends_with("-on"))
                .count();
            assert_eq!(on_classes, 1);
        }
    }

    #[test]
    fn test_light_mapping() {
        assert_eq!(SignalDisplay::for_level(ClusterLevel::High).lit, Light::Red);
        assert_eq!(SignalDisplay::for_level(ClusterLevel::Medium).lit, Light::Yellow);
        assert_eq!(SignalDisplay::for_level(ClusterLevel::Low).lit, Light::Green);
        assert_eq!(
            SignalDisplay::for_level(ClusterLevel::High).status_text(),
            "🔴 Heavy Traffic"
        );
    }

    #[test]
    fn test_metrics_display() {
        let reading = TrafficReading {
            density: 0.5,
            vehicle_count: 7,
            level: ClusterLevel::Medium,
            summary: String::new(),
            frame: None,
            source: crate::model::VideoSource::Webcam,
        };
        let metrics = MetricsDisplay::for_reading(&reading);
        assert_eq!(metrics.density, "0.50");
        assert_eq!(metrics.vehicle_count, "7");
        assert_eq!(metrics.level, "MEDIUM");
    }

    #[test]
    fn test_notice_class() {
        assert_eq!(Notice::danger("x").class(), "alert alert-danger");
        assert_eq!(Notice::info("x").class(), "alert alert-info");
    }
}
