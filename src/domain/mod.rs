//! Domain value objects and types.
//!
//! This module contains type-safe wrappers for phone numbers and message URLs,
//! plus the normalization policy applied to raw contact entries.

pub mod errors;
pub mod message_url;
pub mod phone;

pub use errors::ValidationError;
pub use message_url::MessageUrl;
pub use phone::{NormalizationPolicy, PhoneNumber};
