//! Request handlers: the boundary between HTTP and the engine.
//!
//! The randomizer is consulted here, before any engine call, in a fixed
//! order: simulated timeout, then outright rejection (upload only), then a
//! short slowdown. The stalls suspend only the request path: no progress
//! driver waits on them, and they touch no engine state.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use serde_json::{Value, json};
use tracing::{info, warn};

use parrot_core::{SimulationConfig, UploadId, UploadSnapshot, UploadStore, chance};

use crate::error::ApiError;
use crate::multipart::{SUPPORTED_MIME_TYPES, read_submission};
use crate::server::AppState;

/// `POST /api/upload`: accept a multipart audio submission.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<UploadSnapshot>), ApiError> {
    simulate_request_faults(&state.config, true).await?;

    let submission = read_submission(multipart).await?;
    info!(
        filename = %submission.filename,
        mime_type = %submission.mime_type,
        size = submission.size,
        "accepting upload"
    );
    let snapshot = state.store.create(submission).await;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// `GET /api/status/{id}`: point-in-time snapshot of one upload.
pub async fn status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UploadSnapshot>, ApiError> {
    simulate_request_faults(&state.config, false).await?;

    // An id that does not even parse can't name a stored upload.
    let id: UploadId = id.parse().map_err(|_| ApiError::NotFound)?;
    state.store.get(id).await.map(Json).ok_or(ApiError::NotFound)
}

/// `GET /api/uploads`: listing of all uploads.
pub async fn list(State(state): State<AppState>) -> Json<Value> {
    let uploads = state.store.list().await;
    Json(json!({
        "count": uploads.len(),
        "uploads": uploads,
    }))
}

/// `GET /`: service description, endpoint table, and live counts.
pub async fn info(State(state): State<AppState>) -> Json<Value> {
    let counts = state.store.counts_by_state().await;
    let config = state.config.as_ref();
    Json(json!({
        "service": "parrot",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Mock transcription service: simulated uploads, progress, and failures",
        "supportedFormats": SUPPORTED_MIME_TYPES,
        "endpoints": {
            "upload": "POST /api/upload",
            "status": "GET /api/status/{id}",
            "uploads": "GET /api/uploads",
            "health": "GET /health",
        },
        "simulation": {
            "uploadFailureRate": config.upload_failure_rate,
            "timeoutRate": config.timeout_rate,
            "processingFailureRate": config.processing_failure_rate,
            "minProcessingMs": config.min_processing_ms,
            "maxProcessingMs": config.max_processing_ms,
        },
        "counts": counts,
    }))
}

/// Apply the boundary's randomized behaviors for one request.
async fn simulate_request_faults(
    config: &SimulationConfig,
    allow_rejection: bool,
) -> Result<(), ApiError> {
    if chance::should_timeout(config.timeout_rate) {
        warn!(stall_ms = config.timeout_stall_ms, "simulating gateway timeout");
        tokio::time::sleep(config.timeout_stall()).await;
        return Err(ApiError::GatewayTimeout);
    }

    if allow_rejection && chance::should_fail(config.upload_failure_rate) {
        let fault = chance::pick_error();
        warn!(status = fault.status, "simulating upload failure");
        return Err(ApiError::SimulatedFault {
            status: StatusCode::from_u16(fault.status)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            message: fault.message.to_string(),
        });
    }

    if chance::should_slow_down() {
        let delay = chance::slowdown_delay(config);
        info!(delay_ms = delay.as_millis() as u64, "simulating slow response");
        tokio::time::sleep(delay).await;
    }

    Ok(())
}
