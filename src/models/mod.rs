//! Data models for voice broadcasts.
//!
//! This module contains the contact list, the provider's call resource, and the
//! per-contact results collected while a broadcast is dispatched.

pub mod broadcast;
pub mod call;

pub use broadcast::{BroadcastReport, BroadcastRequest, ContactList};
pub use call::{Call, CallOutcome, CallRequest, CallResult, FAILED_STATUS};
