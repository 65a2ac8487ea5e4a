//! The boundary between the conversation core and the generation provider.
//!
//! The core never talks to a provider directly; it goes through the
//! [`GenerationBackend`] trait, which hands back the provider's raw payload
//! (optional text, unfiltered citation candidates). Text fallback and
//! citation filtering are the orchestrator's job, so backends stay thin.

use async_trait::async_trait;

use crate::error::Result;
use crate::session::ChatMessage;

/// Extended reasoning allowance requested for the deep profile, in tokens.
pub const DEEP_THINKING_BUDGET: u32 = 32_768;

/// The two model profiles a session can generate with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelProfile {
    /// Default profile for everyday turns.
    Standard,
    /// Deep-think profile with an extended internal reasoning budget.
    Deep,
}

impl ModelProfile {
    /// Selects the profile for a session's deep-think flag.
    pub fn for_deep_think(deep_think: bool) -> Self {
        if deep_think {
            ModelProfile::Deep
        } else {
            ModelProfile::Standard
        }
    }

    /// The reasoning budget to request, if this profile carries one.
    pub fn thinking_budget(&self) -> Option<u32> {
        match self {
            ModelProfile::Standard => None,
            ModelProfile::Deep => Some(DEEP_THINKING_BUDGET),
        }
    }
}

/// Per-call generation switches derived from the session's mode flags.
///
/// The deep profile is a configuration switch on the request, not a separate
/// code path; backends must not vary anything else based on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOptions {
    pub profile: ModelProfile,
    /// Attach the provider's web-grounding capability to the request.
    pub web_search: bool,
}

impl GenerationOptions {
    /// Builds options from the session's two mode flags.
    pub fn from_flags(deep_think: bool, web_search: bool) -> Self {
        Self {
            profile: ModelProfile::for_deep_think(deep_think),
            web_search,
        }
    }
}

/// A grounding citation as the provider returned it, fields unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitationCandidate {
    pub uri: Option<String>,
    pub title: Option<String>,
}

/// The provider's raw reply to one generation call.
#[derive(Debug, Clone, Default)]
pub struct BackendReply {
    /// Primary text payload, if the provider produced one.
    pub text: Option<String>,
    /// Grounding citations, present only for web-search-augmented calls.
    pub citations: Vec<CitationCandidate>,
}

/// A generation provider capable of answering one conversation turn.
///
/// Implementations issue exactly one call per invocation: no retries, no
/// streaming, no timeout beyond the transport default. Transport, auth, and
/// malformed-response failures must surface as
/// [`MentorError::Provider`](crate::MentorError::Provider) so the
/// orchestrator can recover them locally.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generates a reply for the full transcript, resent in order on every
    /// call (there is no incremental protocol).
    async fn generate(
        &self,
        transcript: &[ChatMessage],
        options: &GenerationOptions,
    ) -> Result<BackendReply>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_selection() {
        assert_eq!(ModelProfile::for_deep_think(false), ModelProfile::Standard);
        assert_eq!(ModelProfile::for_deep_think(true), ModelProfile::Deep);
    }

    #[test]
    fn test_thinking_budget() {
        assert_eq!(ModelProfile::Standard.thinking_budget(), None);
        assert_eq!(ModelProfile::Deep.thinking_budget(), Some(32_768));
    }

    #[test]
    fn test_options_from_flags() {
        let options = GenerationOptions::from_flags(true, false);
        assert_eq!(options.profile, ModelProfile::Deep);
        assert!(!options.web_search);

        let options = GenerationOptions::from_flags(false, true);
        assert_eq!(options.profile, ModelProfile::Standard);
        assert!(options.web_search);
    }
}
