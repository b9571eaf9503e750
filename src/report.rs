//! Error Reporting
//!
//! Every caught failure goes through one [`ErrorSink`]. The default sink logs
//! with `tracing`; tests use [`MemorySink`] to assert on what was surfaced.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::error::ClientError;

/// Which dashboard operation a failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Snapshot,
    ConfigureSignal,
    LoadGraph,
    UploadVideo,
    DeleteVideo,
    SwitchSource,
    SourceStatus,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Snapshot => "snapshot",
            Action::ConfigureSignal => "configure_signal",
            Action::LoadGraph => "load_graph",
            Action::UploadVideo => "upload_video",
            Action::DeleteVideo => "delete_video",
            Action::SwitchSource => "switch_source",
            Action::SourceStatus => "source_status",
        };
        f.write_str(name)
    }
}

/// Destination for caught failures
pub trait ErrorSink {
    fn report(&self, action: Action, error: &ClientError);
}

/// Logs failures through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn report(&self, action: Action, error: &ClientError) {
        match action {
            // Polling failures are routine while no source is active
            Action::Snapshot | Action::SourceStatus => {
                tracing::warn!(action = %action, error = %error, "Request failed");
            }
            _ => {
                tracing::error!(action = %action, error = %error, "Request failed");
            }
        }
    }
}

/// Keeps reported failures in memory; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<(Action, String)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reported failures as (action, message)
    pub fn entries(&self) -> Vec<(Action, String)> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn count(&self, action: Action) -> usize {
        self.entries().iter().filter(|(a, _)| *a == action).count()
    }
}

impl ErrorSink for MemorySink {
    fn report(&self, action: Action, error: &ClientError) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((action, error.to_string()));
    }
}

impl<S: ErrorSink + ?Sized> ErrorSink for Arc<S> {
    fn report(&self, action: Action, error: &ClientError) {
        (**self).report(action, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records() {
        let sink = MemorySink::new();
        let shared = sink.clone();

        shared.report(Action::UploadVideo, &ClientError::Rejected("Bad format".into()));
        shared.report(Action::Snapshot, &ClientError::Network("refused".into()));

        assert_eq!(sink.entries().len(), 2);
        assert_eq!(sink.count(Action::UploadVideo), 1);
        assert_eq!(sink.entries()[0].1, "Bad format");
    }

    #[test]
    fn test_action_names() {
        assert_eq!(Action::ConfigureSignal.to_string(), "configure_signal");
        assert_eq!(Action::Snapshot.to_string(), "snapshot");
    }
}
