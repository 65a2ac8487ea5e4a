//! Session domain model.
//!
//! This module contains the core `ChatSession` entity: the append-only
//! transcript, the two user-controlled mode flags, the busy flag guarding
//! the single in-flight orchestration, and the derived input mode.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::message::{ChatMessage, Source};
use crate::classifier::InputMode;

/// Fallback appended by the outer submission handler when the orchestration
/// itself cannot be reached (as opposed to the provider failing, which the
/// orchestrator recovers into its own fallback text).
pub const SUBMISSION_FAILURE_FALLBACK: &str =
    "Sorry, I encountered an error while processing your request. \
     Please check the logs for details and try again.";

/// Per-session conversation state.
///
/// All state is single-owner: one session is driven by one caller at a time,
/// and the submission service holds `&mut` access for the duration of a
/// turn. Messages are never mutated or removed after being appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    /// Unique session identifier (UUID format).
    pub id: String,
    /// Ordered, append-only transcript.
    messages: Vec<ChatMessage>,
    /// Deep-think mode flag, toggled only by explicit user action.
    pub deep_think: bool,
    /// Web-search mode flag, toggled only by explicit user action.
    pub web_search: bool,
    /// Derived pending-input state for the input widget.
    pub input_mode: InputMode,
    /// True while an orchestration is outstanding.
    busy: bool,
    /// Timestamp when the session was created (ISO 8601 format).
    pub created_at: String,
    /// Timestamp when the session was last updated (ISO 8601 format).
    pub updated_at: String,
}

impl ChatSession {
    /// Creates an empty session with both mode flags off.
    pub fn new() -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            messages: Vec::new(),
            deep_think: false,
            web_search: false,
            input_mode: InputMode::Idle,
            busy: false,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// The transcript, in append order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether an orchestration is currently outstanding.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// The placeholder text the input widget should currently display.
    pub fn placeholder(&self) -> &'static str {
        self.input_mode.placeholder()
    }

    fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        self.updated_at = chrono::Utc::now().to_rfc3339();
        // Safe to unwrap because we just pushed an element
        self.messages.last().unwrap()
    }

    /// Appends a user turn and returns it.
    pub fn append_user(&mut self, text: impl Into<String>) -> &ChatMessage {
        self.push(ChatMessage::user(text))
    }

    /// Appends an assistant turn with its citations and returns it.
    pub fn append_assistant(
        &mut self,
        text: impl Into<String>,
        sources: Vec<Source>,
    ) -> &ChatMessage {
        self.push(ChatMessage::assistant(text, sources))
    }

    /// Appends the fixed outer-layer error notice and returns it.
    pub fn append_error(&mut self) -> &ChatMessage {
        self.push(ChatMessage::error_notice(SUBMISSION_FAILURE_FALLBACK))
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
