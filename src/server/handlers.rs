//! HTTP handlers for the broadcast server.

use super::upload::read_submission;
use super::AppState;
use crate::error::BroadcastError;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use serde_json::json;

/// `POST /upload`
///
/// Runs a broadcast from the upload form and answers in plain text with the
/// number of contacts attempted.
pub async fn upload(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, BroadcastError> {
    let submission = read_submission(payload, state.max_upload_bytes).await?;
    let report = state.service.broadcast(submission).await?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(report.summary()))
}

/// `POST /api/v1/broadcasts`
///
/// Same input as [`upload`], but responds with the full per-contact report:
///
/// ```json
/// {
///   "from": "+15550000000",
///   "message_url": "https://example.com/twiml.xml",
///   "placed": 1,
///   "failed": 1,
///   "results": [
///     {"to": "+15551234567", "status": "queued", "sid": "CA..."},
///     {"to": "+15559876543", "status": "failed", "error": "Authentication failed"}
///   ]
/// }
/// ```
pub async fn create_broadcast(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, BroadcastError> {
    let submission = read_submission(payload, state.max_upload_bytes).await?;
    let report = state.service.broadcast(submission).await?;

    Ok(HttpResponse::Ok().json(report))
}

/// `GET /api/v1/calls/{sid}`
pub async fn call_status(
    state: web::Data<AppState>,
    sid: web::Path<String>,
) -> Result<HttpResponse, crate::error::VoiceApiError> {
    let call = state.service.call_status(&sid).await?;
    Ok(HttpResponse::Ok().json(call))
}

/// `GET /api/v1/metrics`
pub async fn metrics(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.metrics.summary())
}

/// `GET /health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
