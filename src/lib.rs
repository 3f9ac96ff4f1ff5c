//! Voice Broadcast Server - places voice calls to every number in an uploaded contact list.
//!
//! An uploaded CSV is parsed into an ordered contact list, then one outbound call
//! per contact is requested from a Twilio-compatible voice provider. Each contact
//! gets its own result (call SID or error), and one failed contact never stops the
//! rest of the broadcast.
//!
//! # Architecture
//!
//! - **domain**: Phone number, message URL, and normalization policy value objects
//! - **models**: Contact lists, provider call resources, and broadcast reports
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **client**: HTTP client for the voice provider API
//! - **repositories**: Call repository abstraction over the client
//! - **broadcast**: Contact loader and dispatch loop
//! - **services**: Upload validation and broadcast orchestration
//! - **server**: actix-web HTTP endpoints
//! - **metrics**: Request and call counters

pub mod broadcast;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;

pub use broadcast::{BroadcastDispatcher, ContactLoader};
pub use client::VoiceClient;
pub use config::Config;
pub use domain::{MessageUrl, NormalizationPolicy, PhoneNumber};
pub use error::{BroadcastError, ConfigError, ContactLoadError, VoiceApiError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{BroadcastReport, BroadcastRequest, Call, CallRequest, CallResult, ContactList};
pub use services::{BroadcastService, BroadcastServiceImpl, BroadcastSubmission};
