//! Broadcast core: load a contact list, then place one call per contact.
//!
//! - **loader**: CSV parsing and number normalization
//! - **dispatcher**: sequential, failure-isolated call placement

pub mod dispatcher;
pub mod loader;

pub use dispatcher::BroadcastDispatcher;
pub use loader::ContactLoader;
