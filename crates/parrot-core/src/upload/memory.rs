//! In-memory upload store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use super::UploadStore;
use super::id::UploadId;
use super::progress;
use super::record::{UploadRecord, UploadSnapshot, UploadSubmission, UploadSummary};
use super::state::StateCounts;
use crate::chance;
use crate::config::SimulationConfig;

/// Shared store state (single source of truth for upload records).
pub(super) struct StoreState {
    pub(super) records: HashMap<UploadId, UploadRecord>,
}

/// In-memory [`UploadStore`] implementation.
///
/// The record map sits behind one `tokio::sync::Mutex`; every critical
/// section is a single read-then-write of one record. Each record is mutated
/// only by its own driver task (spawned in `create`), which holds an `Arc`
/// clone of the state and uses it to notice removal.
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
    config: Arc<SimulationConfig>,
}

impl InMemoryStore {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState {
                records: HashMap::new(),
            })),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

#[async_trait]
impl UploadStore for InMemoryStore {
    async fn create(&self, submission: UploadSubmission) -> UploadSnapshot {
        let (min, max) = self.config.processing_range();
        let total_duration = chance::draw_duration(min, max);
        let will_fail = chance::roll(self.config.processing_failure_rate);

        let record = UploadRecord::new(submission, total_duration, will_fail);
        let id = record.id;
        let snapshot = UploadSnapshot::from(&record);

        {
            let mut state = self.state.lock().await;
            state.records.insert(id, record);
        }

        info!(
            id = %id,
            total_ms = total_duration.as_millis() as u64,
            will_fail,
            "upload accepted"
        );
        tokio::spawn(progress::drive(
            Arc::clone(&self.state),
            id,
            Arc::clone(&self.config),
        ));

        snapshot
    }

    async fn get(&self, id: UploadId) -> Option<UploadSnapshot> {
        let state = self.state.lock().await;
        state.records.get(&id).map(UploadSnapshot::from)
    }

    async fn list(&self) -> Vec<UploadSummary> {
        let state = self.state.lock().await;
        state.records.values().map(UploadSummary::from).collect()
    }

    async fn remove(&self, id: UploadId) -> bool {
        let mut state = self.state.lock().await;
        state.records.remove(&id).is_some()
    }

    async fn counts_by_state(&self) -> StateCounts {
        let state = self.state.lock().await;
        let mut counts = StateCounts::default();
        for record in state.records.values() {
            counts.observe(record.state);
        }
        counts
    }
}
