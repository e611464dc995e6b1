//! Upload state machine.

use serde::{Deserialize, Serialize};

/// Lifecycle state of an upload.
///
/// Transitions:
/// - Queued -> Processing (once progress passes the early-lifecycle threshold)
/// - Queued | Processing -> Completed (progress 100, outcome draw succeeded)
/// - Queued | Processing -> Failed (progress 100, outcome draw failed)
///
/// Queued -> Completed/Failed without an observable Processing window is
/// legal when the configured duration is short enough that the first tick
/// already reaches 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadState {
    /// Accepted, progress still at or below the threshold.
    Queued,

    /// Progress visibly advancing.
    Processing,

    /// Finished with a transcript.
    Completed,

    /// Finished with an error message (pre-determined at creation).
    Failed,
}

impl UploadState {
    /// Is this a terminal state (no further transitions)?
    pub fn is_terminal(self) -> bool {
        matches!(self, UploadState::Completed | UploadState::Failed)
    }

    /// Still moving through the lifecycle?
    pub fn is_in_flight(self) -> bool {
        !self.is_terminal()
    }
}

/// Totals per lifecycle state, for the informational endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCounts {
    pub queued: usize,
    pub processing: usize,
    pub completed: usize,
    pub failed: usize,
}

impl StateCounts {
    pub fn observe(&mut self, state: UploadState) {
        match state {
            UploadState::Queued => self.queued += 1,
            UploadState::Processing => self.processing += 1,
            UploadState::Completed => self.completed += 1,
            UploadState::Failed => self.failed += 1,
        }
    }

    pub fn total(self) -> usize {
        self.queued + self.processing + self.completed + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::queued(UploadState::Queued, false)]
    #[case::processing(UploadState::Processing, false)]
    #[case::completed(UploadState::Completed, true)]
    #[case::failed(UploadState::Failed, true)]
    fn terminal_classification(#[case] state: UploadState, #[case] terminal: bool) {
        assert_eq!(state.is_terminal(), terminal);
        assert_eq!(state.is_in_flight(), !terminal);
    }

    #[test]
    fn states_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&UploadState::Queued).unwrap(),
            "\"queued\""
        );
        assert_eq!(
            serde_json::to_string(&UploadState::Processing).unwrap(),
            "\"processing\""
        );
    }

    #[test]
    fn counts_observe_and_total() {
        let mut counts = StateCounts::default();
        counts.observe(UploadState::Queued);
        counts.observe(UploadState::Processing);
        counts.observe(UploadState::Processing);
        counts.observe(UploadState::Failed);

        assert_eq!(counts.queued, 1);
        assert_eq!(counts.processing, 2);
        assert_eq!(counts.completed, 0);
        assert_eq!(counts.failed, 1);
        assert_eq!(counts.total(), 4);
    }
}
