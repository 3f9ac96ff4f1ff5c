//! HTTP server for voice broadcasts.
//!
//! Exposes the upload form endpoint (plain-text answers), a JSON variant that
//! returns the per-contact report, call status lookup, metrics, and health.

pub mod handlers;
pub mod upload;

use crate::error::{BroadcastError, VoiceApiError};
use crate::metrics::Metrics;
use crate::services::BroadcastService;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpServer, ResponseError};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

/// State shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn BroadcastService>,
    pub metrics: Metrics,

    /// Per-field upload size limit
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(service: Arc<dyn BroadcastService>, metrics: Metrics, max_upload_bytes: usize) -> Self {
        Self {
            service,
            metrics,
            max_upload_bytes,
        }
    }
}

/// Register all routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/upload", web::post().to(handlers::upload))
        .route("/health", web::get().to(handlers::health))
        .service(
            web::scope("/api/v1")
                .route("/broadcasts", web::post().to(handlers::create_broadcast))
                .route("/calls/{sid}", web::get().to(handlers::call_status))
                .route("/metrics", web::get().to(handlers::metrics)),
        );
}

/// Run the HTTP server until it is stopped (Ctrl+C / SIGTERM are handled by actix).
pub async fn run_server(state: AppState, bind_addr: &str) -> std::io::Result<()> {
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(TracingLogger::default())
            .configure(configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}

// Errors render as plain text using their Display message.
impl ResponseError for BroadcastError {
    fn status_code(&self) -> StatusCode {
        match self {
            BroadcastError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            BroadcastError::LoadFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl ResponseError for VoiceApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            VoiceApiError::NotFound(_) => StatusCode::NOT_FOUND,
            VoiceApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            VoiceApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}
