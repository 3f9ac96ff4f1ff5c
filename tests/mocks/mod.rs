mod mock_call_repository;

pub use mock_call_repository::MockCallRepository;
