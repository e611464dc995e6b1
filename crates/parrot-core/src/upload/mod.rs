//! Upload lifecycle engine: records, state machine, and the in-memory store.

mod id;
mod memory;
mod progress;
mod record;
mod state;

pub use id::UploadId;
pub use memory::InMemoryStore;
pub use progress::PROCESSING_FAILURE_MESSAGE;
pub use record::{
    PROCESSING_THRESHOLD, UploadRecord, UploadSnapshot, UploadSubmission, UploadSummary,
};
pub use state::{StateCounts, UploadState};

use async_trait::async_trait;

/// Store port (interface).
///
/// v1 is in-memory, but this trait is the seam for swapping implementations
/// later. Callers only ever receive snapshots (copies): each record is
/// mutated exclusively by its own progress driver task, never through this
/// interface.
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Accept a pre-validated submission, store it, and start its progress
    /// driver. Returns the stored record immediately; there is no error path
    /// at this layer (format validation is the boundary's job).
    async fn create(&self, submission: UploadSubmission) -> UploadSnapshot;

    /// Point-in-time snapshot of one upload. `None` is the defined
    /// not-found result, not an error.
    async fn get(&self, id: UploadId) -> Option<UploadSnapshot>;

    /// Snapshot over all uploads. Listing is for inspection only; order is
    /// unspecified.
    async fn list(&self) -> Vec<UploadSummary>;

    /// Drop a record. Its driver notices on its next tick and stops
    /// silently. Returns whether the record existed.
    async fn remove(&self, id: UploadId) -> bool;

    /// Observability hook: totals per lifecycle state.
    async fn counts_by_state(&self) -> StateCounts;
}
