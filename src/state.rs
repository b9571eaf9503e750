//! Client Session State
//!
//! The few values that outlive a single request: last-known cluster level,
//! consecutive snapshot failures and the currently shown notice.

use crate::model::ClusterLevel;
use crate::presenter::NoticeKind;

/// Identifier of a posted notice
pub type NoticeId = u64;

/// Identifier of a signal button confirmation
pub type ConfirmId = u64;

/// Session-lifetime dashboard state
#[derive(Debug, Clone)]
pub struct ClientState {
    cluster_level: ClusterLevel,
    consecutive_errors: u32,
    error_threshold: u32,
    next_notice: NoticeId,
    active_notice: Option<(NoticeId, NoticeKind)>,
    confirmations: ConfirmId,
}

impl ClientState {
    /// Create state that escalates once failures exceed `error_threshold`
    pub fn new(error_threshold: u32) -> Self {
        Self {
            cluster_level: ClusterLevel::default(),
            consecutive_errors: 0,
            error_threshold,
            next_notice: 0,
            active_notice: None,
            confirmations: 0,
        }
    }

    pub fn cluster_level(&self) -> ClusterLevel {
        self.cluster_level
    }

    pub fn consecutive_errors(&self) -> u32 {
        self.consecutive_errors
    }

    /// A snapshot came back ok
    pub fn record_success(&mut self, level: ClusterLevel) {
        self.consecutive_errors = 0;
        self.cluster_level = level;
    }

    /// A snapshot failed. Returns true once the failure streak is past the threshold.
    pub fn record_failure(&mut self) -> bool {
        self.consecutive_errors = self.consecutive_errors.saturating_add(1);
        self.is_escalated()
    }

    pub fn is_escalated(&self) -> bool {
        self.consecutive_errors > self.error_threshold
    }

    /// Upload or source switch succeeded
    pub fn reset_errors(&mut self) {
        self.consecutive_errors = 0;
    }

    /// Register a newly shown notice and return its id
    pub fn post_notice(&mut self, kind: NoticeKind) -> NoticeId {
        self.next_notice += 1;
        self.active_notice = Some((self.next_notice, kind));
        self.next_notice
    }

    pub fn active_notice(&self) -> Option<(NoticeId, NoticeKind)> {
        self.active_notice
    }

    /// Clear the notice if it is still `id`. Returns whether it was cleared.
    pub fn notice_expired(&mut self, id: NoticeId) -> bool {
        match self.active_notice {
            Some((active, _)) if active == id => {
                self.active_notice = None;
                true
            }
            _ => false,
        }
    }

    /// Start a new signal button confirmation and return its id
    pub fn confirm_signal(&mut self) -> ConfirmId {
        self.confirmations += 1;
        self.confirmations
    }

    /// True if `id` is the latest confirmation
    pub fn is_current_confirmation(&self, id: ConfirmId) -> bool {
        self.confirmations == id
    }

    /// Clear a danger notice, if one is showing. Returns whether it was cleared.
    pub fn clear_danger_notice(&mut self) -> bool {
        match self.active_notice {
            Some((_, NoticeKind::Danger)) => {
                self.active_notice = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = ClientState::default();
        assert_eq!(state.cluster_level(), ClusterLevel::Medium);
        assert_eq!(state.consecutive_errors(), 0);
        assert!(state.active_notice().is_none());
    }

    #[test]
    fn test_escalates_after_threshold() {
        let mut state = ClientState::new(3);
        assert!(!state.record_failure());
        assert!(!state.record_failure());
        assert!(!state.record_failure());
        assert!(state.record_failure());
        assert!(state.record_failure());
        assert_eq!(state.consecutive_errors(), 5);
    }

    #[test]
    fn test_success_resets_streak() {
        let mut state = ClientState::new(3);
        for _ in 0..10 {
            state.record_failure();
        }
        state.record_success(ClusterLevel::High);
        assert_eq!(state.consecutive_errors(), 0);
        assert_eq!(state.cluster_level(), ClusterLevel::High);
        assert!(!state.is_escalated());
    }

    #[test]
    fn test_stale_notice_timer_is_ignored() {
        let mut state = ClientState::default();
        let first = state.post_notice(NoticeKind::Success);
        let second = state.post_notice(NoticeKind::Danger);

        assert!(!state.notice_expired(first));
        assert_eq!(state.active_notice(), Some((second, NoticeKind::Danger)));
        assert!(state.notice_expired(second));
        assert!(state.active_notice().is_none());
    }

    #[test]
    fn test_only_latest_confirmation_is_current() {
        let mut state = ClientState::default();
        let first = state.confirm_signal();
        assert!(state.is_current_confirmation(first));

        let second = state.confirm_signal();
        assert!(!state.is_current_confirmation(first));
        assert!(state.is_current_confirmation(second));
    }

    #[test]
    fn test_clear_danger_only() {
        let mut state = ClientState::default();
        state.post_notice(NoticeKind::Info);
        assert!(!state.clear_danger_notice());
        state.post_notice(NoticeKind::Danger);
        assert!(state.clear_danger_notice());
        assert!(state.active_notice().is_none());
    }
}
