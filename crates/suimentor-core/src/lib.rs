pub mod classifier;
pub mod error;
pub mod generation;
pub mod orchestrator;
pub mod session;

// Re-export common error type
pub use error::MentorError;
