//! Session domain module.
//!
//! This module contains the conversation state holder and the submission
//! service that drives one orchestration per user turn.
//!
//! # Module Structure
//!
//! - `message`: Conversation message types (`MessageRole`, `ChatMessage`, `Source`)
//! - `model`: Core session state (`ChatSession`)
//! - `service`: Submission handling (`ChatService`, `SubmitOutcome`)

mod message;
mod model;
mod service;

// Re-export public API
pub use message::{ChatMessage, MessageRole, Source};
pub use model::{ChatSession, SUBMISSION_FAILURE_FALLBACK};
pub use service::{ChatService, SubmitOutcome};
