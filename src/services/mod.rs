//! Application service layer.
//!
//! Services contain business logic and orchestrate interactions between the
//! broadcast core and the call repository. They provide a clean boundary between
//! the HTTP handlers and the data access layer.

mod broadcast_service;

pub use broadcast_service::{
    allowed_file, BroadcastDefaults, BroadcastService, BroadcastServiceImpl, BroadcastSubmission,
    UploadedFile,
};
