//! Time-based progress advancement.
//!
//! One driver task per upload, spawned at creation. Each tick re-evaluates
//! elapsed time against the record's fixed target and self-terminates after
//! applying the terminal transition, or silently if the record has been
//! removed from the store.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info};

use super::id::UploadId;
use super::memory::StoreState;
use crate::config::SimulationConfig;
use crate::transcript;

/// Fixed message reported when an upload's pre-drawn failure fires.
pub const PROCESSING_FAILURE_MESSAGE: &str = "Transcription failed: Unable to process audio";

/// Percentage of `total` covered by `elapsed`, rounded, capped at 100.
/// A zero-length target counts as already complete.
pub(super) fn percent_complete(elapsed: Duration, total: Duration) -> u8 {
    if total.is_zero() {
        return 100;
    }
    let ratio = elapsed.as_secs_f64() / total.as_secs_f64();
    (ratio * 100.0).round().min(100.0) as u8
}

/// Per-record driver loop.
///
/// The lock is taken once per tick for a single read-then-write and released
/// before sleeping again, so status reads and other drivers are never blocked
/// across a tick period.
pub(super) async fn drive(
    state: Arc<Mutex<StoreState>>,
    id: UploadId,
    config: Arc<SimulationConfig>,
) {
    let tick = config.tick();
    loop {
        tokio::time::sleep(tick).await;

        let mut store = state.lock().await;
        let Some(record) = store.records.get_mut(&id) else {
            debug!(id = %id, "upload removed mid-flight, driver stopping");
            return;
        };

        let progress = percent_complete(record.elapsed(), record.total_duration);
        if progress < 100 {
            record.advance_progress(progress);
            debug!(id = %id, progress = record.progress, state = ?record.state, "progress tick");
            continue;
        }

        if record.will_fail {
            record.mark_failed(PROCESSING_FAILURE_MESSAGE);
            info!(id = %id, "upload failed");
        } else {
            let text = transcript::generate(
                config.transcript_min_sentences,
                config.transcript_max_sentences,
            );
            record.mark_completed(text);
            info!(id = %id, "upload completed");
        }
        return;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::not_started(0, 1_000, 0)]
    #[case::halfway(500, 1_000, 50)]
    #[case::exactly_done(1_000, 1_000, 100)]
    #[case::overshot(2_500, 1_000, 100)]
    #[case::rounds_down(333, 1_000, 33)]
    #[case::rounds_up(335, 1_000, 34)]
    #[case::zero_total(0, 0, 100)]
    #[case::zero_total_with_elapsed(50, 0, 100)]
    fn percentage_math(#[case] elapsed_ms: u64, #[case] total_ms: u64, #[case] expected: u8) {
        let elapsed = Duration::from_millis(elapsed_ms);
        let total = Duration::from_millis(total_ms);
        assert_eq!(percent_complete(elapsed, total), expected);
    }
}
