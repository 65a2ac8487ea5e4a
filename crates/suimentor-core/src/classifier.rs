//! Input-mode classification for assistant replies.
//!
//! The assistant sometimes asks the user for an on-chain identifier (a
//! package ID, transaction hash, or object ID) so it can describe what the
//! user would find on an explorer. When that happens the input widget should
//! switch its placeholder to prompt for the identifier. Detection is a
//! deliberately simple conjunctive keyword match over the reply text, kept
//! as a pure data-driven predicate so it can be swapped for a real
//! classifier later without touching the state machine.

use serde::{Deserialize, Serialize};

/// Terms naming an on-chain identifier. One of these must appear.
const IDENTIFIER_TERMS: [&str; 3] = ["package id", "transaction hash", "object id"];

/// Phrasings that ask the user to supply something. One of these must appear.
const REQUEST_PHRASES: [&str; 4] = ["please provide", "what's the", "what is the", "enter the"];

/// Returns true iff the reply both names an on-chain identifier and asks the
/// user to supply one. Matching is case-insensitive; both keyword sets must
/// hit simultaneously.
pub fn is_identifier_request(text: &str) -> bool {
    let text = text.to_lowercase();

    IDENTIFIER_TERMS.iter().any(|term| text.contains(term))
        && REQUEST_PHRASES.iter().any(|phrase| text.contains(phrase))
}

/// The pending-input state of a session's input widget.
///
/// Transitions:
/// - `Idle` -> `AwaitingIdentifier` after an assistant reply for which
///   [`is_identifier_request`] returns true;
/// - `AwaitingIdentifier` -> `Idle` unconditionally on the next user
///   submission, before the new generation call is issued.
///
/// The initial state is `Idle` and there is no terminal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMode {
    /// Normal free-text input.
    #[default]
    Idle,
    /// The next input is expected to be an on-chain identifier.
    AwaitingIdentifier,
}

impl InputMode {
    /// Resets to `Idle`. Called on every user submission, regardless of the
    /// submission's content or the outcome of the call it triggers.
    pub fn on_user_submission(&mut self) {
        *self = InputMode::Idle;
    }

    /// Applies the classifier to a finished assistant reply.
    pub fn on_assistant_reply(&mut self, text: &str) {
        if is_identifier_request(text) {
            *self = InputMode::AwaitingIdentifier;
        }
    }

    /// The placeholder text the input widget should display in this state.
    pub fn placeholder(&self) -> &'static str {
        match self {
            InputMode::Idle => "Ask about Sui, Move, or paste an error message...",
            InputMode::AwaitingIdentifier => "Enter the Package ID or Transaction Hash...",
        }
    }

    /// Whether the widget is prompting for an identifier.
    pub fn is_awaiting_identifier(&self) -> bool {
        matches!(self, InputMode::AwaitingIdentifier)
    }
}
