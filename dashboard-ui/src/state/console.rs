//! Browser console error sink.

use traffic_dashboard::{Action, ClientError, ErrorSink};

/// Reports failures to the devtools console
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ErrorSink for ConsoleSink {
    fn report(&self, action: Action, error: &ClientError) {
        let message = format!("{} failed: {}", action, error);
        match action {
            // Polls retry on the next tick
            Action::Snapshot | Action::SourceStatus => {
                web_sys::console::warn_1(&message.into())
            }
            _ => web_sys::console::error_1(&message.into()),
        }
    }
}
