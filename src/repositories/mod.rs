pub mod traits;
pub mod twilio_call_repository;

pub use traits::CallRepository;
pub use twilio_call_repository::TwilioCallRepository;
