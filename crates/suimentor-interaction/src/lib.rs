//! Provider layer for SuiMentor.
//!
//! Implements the core's `GenerationBackend` seam against the Gemini REST
//! API and carries the fixed persona data supplied with every call.

pub mod gemini_client;
pub mod prompt;

pub use gemini_client::GeminiClient;
