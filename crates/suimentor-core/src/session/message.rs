//! Conversation message types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the AI assistant.
    Assistant,
}

/// A grounding citation attached to a web-search-augmented assistant reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub uri: String,
    pub title: String,
}

/// A single message in a conversation transcript.
///
/// Messages are immutable once appended: the transcript is an append-only
/// ordered sequence, and the full prefix is resent as context on every turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role-prefixed unique identifier, stable for list rendering.
    pub id: String,
    /// The role of the message sender.
    pub role: MessageRole,
    /// UTF-8 content; may contain fenced code blocks and markdown emphasis.
    pub text: String,
    /// Grounding citations; non-empty only on web-search-augmented
    /// assistant messages.
    #[serde(default)]
    pub sources: Vec<Source>,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
}

impl ChatMessage {
    fn new(prefix: &str, role: MessageRole, text: String, sources: Vec<Source>) -> Self {
        Self {
            id: format!("{}-{}", prefix, Uuid::new_v4()),
            role,
            text,
            sources,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Creates a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new("user", MessageRole::User, text.into(), Vec::new())
    }

    /// Creates an assistant turn with its grounding citations.
    pub fn assistant(text: impl Into<String>, sources: Vec<Source>) -> Self {
        Self::new("model", MessageRole::Assistant, text.into(), sources)
    }

    /// Creates an assistant-shaped error notice.
    pub fn error_notice(text: impl Into<String>) -> Self {
        Self::new("error", MessageRole::Assistant, text.into(), Vec::new())
    }
}
