//! parrot-core
//!
//! Engine of the parrot mock transcription service: accepts upload
//! submissions, advances them through time-based progress, and applies a
//! pre-determined randomized terminal outcome. The HTTP boundary lives in
//! `parrot-server` and only talks to this crate through [`UploadStore`].
//!
//! Module map:
//! - **config**: simulation tuning knobs (rates, durations, tick period)
//! - **chance**: stateless randomized outcome decisions
//! - **transcript**: canned transcript generation
//! - **upload**: upload records, state machine, in-memory store, and the
//!   per-record progress driver tasks

pub mod chance;
pub mod config;
pub mod error;
pub mod transcript;
pub mod upload;

pub use config::SimulationConfig;
pub use error::ConfigError;
pub use upload::{
    InMemoryStore, PROCESSING_FAILURE_MESSAGE, StateCounts, UploadId, UploadSnapshot, UploadState,
    UploadStore, UploadSubmission, UploadSummary,
};
