//! Voice Broadcast Server - Main entry point
//!
//! Loads configuration, wires the provider client into the broadcast service,
//! and serves the upload endpoints.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use voice_broadcast_server::client::{AsyncVoiceClient, AsyncVoiceClientImpl};
use voice_broadcast_server::repositories::{CallRepository, TwilioCallRepository};
use voice_broadcast_server::server::{self, AppState};
use voice_broadcast_server::services::{BroadcastDefaults, BroadcastService};
use voice_broadcast_server::{BroadcastServiceImpl, Config, Metrics, VoiceClient};

#[actix_web::main]
async fn main() -> Result<()> {
    // Configuration errors surface through main's Result before logging exists
    let config = Config::from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        "Starting voice-broadcast-server v{} with provider API: {}",
        env!("CARGO_PKG_VERSION"),
        config.api_base_url
    );
    info!(
        normalize_numbers = config.normalize_numbers,
        country_code = %config.default_country_code,
        default_from = config.default_from_number.is_some(),
        default_message_url = config.default_message_url.is_some(),
        "Broadcast defaults"
    );

    let metrics = Metrics::new();

    // Initialize provider client
    let sync_client = VoiceClient::new(&config, metrics.clone());
    let client = Arc::new(AsyncVoiceClientImpl::new(sync_client)) as Arc<dyn AsyncVoiceClient>;
    let calls = Arc::new(TwilioCallRepository::new(client)) as Arc<dyn CallRepository>;

    let service = Arc::new(BroadcastServiceImpl::new(
        calls,
        metrics.clone(),
        BroadcastDefaults::from_config(&config),
    )) as Arc<dyn BroadcastService>;

    let state = AppState::new(service, metrics, config.max_upload_bytes);
    let bind_addr = config.bind_address();

    info!("Starting HTTP server on {}", bind_addr);
    server::run_server(state, &bind_addr).await?;

    info!("Voice broadcast server shutdown complete");
    Ok(())
}
