//! Upload record: metadata plus lifecycle state.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::UploadId;
use super::state::UploadState;

/// Progress percentage above which a queued upload becomes `processing`.
/// Strictly greater-than, so the "still queued" window is observable but
/// short.
pub const PROCESSING_THRESHOLD: u8 = 5;

/// Caller-validated input to [`UploadStore::create`](super::UploadStore).
///
/// The boundary has already checked the MIME type against the supported set
/// and merged metadata defaults before building one of these.
#[derive(Debug, Clone)]
pub struct UploadSubmission {
    pub filename: String,
    pub mime_type: String,
    pub size: u64,
    pub metadata: HashMap<String, serde_json::Value>,
}

/// One submitted audio item and its transcription lifecycle.
///
/// Design:
/// - This is the single source of truth; the store map holds it by id.
/// - All state transitions happen through methods here, never by direct
///   field writes from outside.
/// - After a terminal transition every mutator is a no-op, so terminal
///   fields can never change once set.
#[derive(Debug, Clone)]
pub struct UploadRecord {
    pub id: UploadId,
    pub filename: String,
    pub mime_type: String,
    pub size: u64,
    pub metadata: HashMap<String, serde_json::Value>,

    pub state: UploadState,

    /// Percentage in [0, 100]; never decreases.
    pub progress: u8,

    /// Terminal outcome drawn once at creation, never re-evaluated. Keeps
    /// the outcome independent of tick timing and stable under concurrent
    /// reads.
    pub will_fail: bool,

    /// Target processing time drawn at creation.
    pub total_duration: Duration,

    pub created_at: DateTime<Utc>,

    /// Monotonic twin of `created_at`, used for elapsed-time math.
    pub started: Instant,

    /// `created_at + total_duration`.
    pub completes_at: DateTime<Utc>,

    /// Set only on the transition into `completed`.
    pub completed_at: Option<DateTime<Utc>>,

    /// Set only on the transition into `completed`.
    pub transcript: Option<String>,

    /// Set only on the transition into `failed`.
    pub error: Option<String>,
}

impl UploadRecord {
    pub fn new(submission: UploadSubmission, total_duration: Duration, will_fail: bool) -> Self {
        let created_at = Utc::now();
        let completes_at = created_at
            + chrono::Duration::milliseconds(total_duration.as_millis() as i64);
        Self {
            id: UploadId::generate(),
            filename: submission.filename,
            mime_type: submission.mime_type,
            size: submission.size,
            metadata: submission.metadata,
            state: UploadState::Queued,
            progress: 0,
            will_fail,
            total_duration,
            created_at,
            started: Instant::now(),
            completes_at,
            completed_at: None,
            transcript: None,
            error: None,
        }
    }

    /// Wall time elapsed since creation, from the monotonic clock.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Write one progress tick. Progress is clamped to 100 and never moves
    /// backwards; a queued upload past the threshold (but not yet at 100)
    /// becomes `processing`. No-op once terminal.
    pub fn advance_progress(&mut self, progress: u8) {
        if self.state.is_terminal() {
            return;
        }
        self.progress = self.progress.max(progress.min(100));
        if self.state == UploadState::Queued
            && self.progress > PROCESSING_THRESHOLD
            && self.progress < 100
        {
            self.state = UploadState::Processing;
        }
    }

    /// Terminal transition: success. Sets progress to 100, records the
    /// completion time, and attaches the transcript. No-op once terminal.
    pub fn mark_completed(&mut self, transcript: String) {
        if self.state.is_terminal() {
            return;
        }
        self.progress = 100;
        self.state = UploadState::Completed;
        self.completed_at = Some(Utc::now());
        self.transcript = Some(transcript);
    }

    /// Terminal transition: the pre-drawn failure fires. No-op once
    /// terminal.
    pub fn mark_failed(&mut self, error: impl Into<String>) {
        if self.state.is_terminal() {
            return;
        }
        self.progress = 100;
        self.state = UploadState::Failed;
        self.error = Some(error.into());
    }
}

/// Full serializable copy of a record, for status responses. Terminal-only
/// fields are omitted while unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSnapshot {
    pub id: UploadId,
    pub filename: String,
    pub mime_type: String,
    pub size: u64,
    pub metadata: HashMap<String, serde_json::Value>,
    pub status: UploadState,
    pub progress: u8,
    pub created_at: DateTime<Utc>,
    pub completes_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&UploadRecord> for UploadSnapshot {
    fn from(record: &UploadRecord) -> Self {
        Self {
            id: record.id,
            filename: record.filename.clone(),
            mime_type: record.mime_type.clone(),
            size: record.size,
            metadata: record.metadata.clone(),
            status: record.state,
            progress: record.progress,
            created_at: record.created_at,
            completes_at: record.completes_at,
            completed_at: record.completed_at,
            transcript: record.transcript.clone(),
            error: record.error.clone(),
        }
    }
}

/// Listing view: just enough to inspect the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    pub id: UploadId,
    pub filename: String,
    pub status: UploadState,
    pub progress: u8,
    pub created_at: DateTime<Utc>,
}

impl From<&UploadRecord> for UploadSummary {
    fn from(record: &UploadRecord) -> Self {
        Self {
            id: record.id,
            filename: record.filename.clone(),
            status: record.state,
            progress: record.progress,
            created_at: record.created_at,
        }
    }
}
