//! Response orchestration for one conversation turn.
//!
//! The orchestrator owns the per-turn contract with the generation backend:
//! it selects the model profile from the session's flags, issues exactly one
//! call with the full transcript, and classifies the raw payload into a
//! reply the state holder can append. Provider-class failures never escape
//! this module; they degrade into a fixed fallback text with no citations.

use std::sync::Arc;

use crate::error::Result;
use crate::generation::{BackendReply, CitationCandidate, GenerationBackend, GenerationOptions};
use crate::session::{ChatMessage, Source};

/// Substituted when the provider answers but the text payload is empty.
pub const EMPTY_REPLY_FALLBACK: &str = "I am sorry, I could not generate a response.";

/// Substituted when the provider call itself fails (network, auth, or a
/// malformed response body).
pub const PROVIDER_FAILURE_FALLBACK: &str =
    "Sorry, I encountered an error. This could be due to a network issue, \
     an invalid API key, or a problem with the model. \
     Please check the logs for more details.";

/// The orchestrator's classification of one generation attempt.
///
/// `Degraded` stays distinct from `Completed` so the two fallback layers
/// (this one and the outer submission handler's) remain distinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedReply {
    /// The provider answered; citations already filtered.
    Completed { text: String, sources: Vec<Source> },
    /// The provider failed and was recovered into the fixed fallback text.
    Degraded { text: String },
}

impl GeneratedReply {
    /// The text to append as the assistant turn.
    pub fn text(&self) -> &str {
        match self {
            GeneratedReply::Completed { text, .. } => text,
            GeneratedReply::Degraded { text } => text,
        }
    }

    /// The citations to attach; always empty for degraded replies.
    pub fn sources(&self) -> &[Source] {
        match self {
            GeneratedReply::Completed { sources, .. } => sources,
            GeneratedReply::Degraded { .. } => &[],
        }
    }
}

/// Issues generation calls and normalizes their results.
pub struct ResponseOrchestrator {
    backend: Arc<dyn GenerationBackend>,
}

impl ResponseOrchestrator {
    /// Creates an orchestrator over the given backend.
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    /// Generates one reply for the transcript under the session's flags.
    ///
    /// Provider failures are recovered here into a `Degraded` reply. Any
    /// other error (misconfiguration, internal invariants) propagates to the
    /// caller, whose own failure handler appends the generic error notice.
    pub async fn generate(
        &self,
        transcript: &[ChatMessage],
        deep_think: bool,
        web_search: bool,
    ) -> Result<GeneratedReply> {
        let options = GenerationOptions::from_flags(deep_think, web_search);

        match self.backend.generate(transcript, &options).await {
            Ok(reply) => Ok(Self::classify(reply)),
            Err(err) if err.is_provider() => {
                tracing::error!(error = %err, "generation call failed, degrading to fallback");
                Ok(GeneratedReply::Degraded {
                    text: PROVIDER_FAILURE_FALLBACK.to_string(),
                })
            }
            Err(err) => Err(err),
        }
    }

    fn classify(reply: BackendReply) -> GeneratedReply {
        let text = match reply.text {
            Some(text) if !text.trim().is_empty() => text,
            _ => EMPTY_REPLY_FALLBACK.to_string(),
        };

        GeneratedReply::Completed {
            text,
            sources: filter_citations(reply.citations),
        }
    }
}

/// Keeps only citations with both a non-empty URI and a non-empty title.
///
/// This filter is a hard contract, not a best-effort cleanup: partial
/// entries are discarded outright.
fn filter_citations(candidates: Vec<CitationCandidate>) -> Vec<Source> {
    candidates
        .into_iter()
        .filter_map(|candidate| match (candidate.uri, candidate.title) {
            (Some(uri), Some(title)) if !uri.is_empty() && !title.is_empty() => {
                Some(Source { uri, title })
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MentorError;
    use crate::generation::ModelProfile;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // Mock backend that records the options it was called with and returns
    // a queued result.
    struct MockBackend {
        result: Mutex<Option<Result<BackendReply>>>,
        seen_options: Mutex<Vec<GenerationOptions>>,
    }

    impl MockBackend {
        fn returning(result: Result<BackendReply>) -> Arc<Self> {
            Arc::new(Self {
                result: Mutex::new(Some(result)),
                seen_options: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl GenerationBackend for MockBackend {
        async fn generate(
            &self,
            _transcript: &[ChatMessage],
            options: &GenerationOptions,
        ) -> Result<BackendReply> {
            self.seen_options.lock().unwrap().push(*options);
            self.result.lock().unwrap().take().unwrap()
        }
    }

    fn citation(uri: &str, title: &str) -> CitationCandidate {
        CitationCandidate {
            uri: Some(uri.to_string()),
            title: Some(title.to_string()),
        }
    }

    #[tokio::test]
    async fn test_success_passes_text_and_filtered_citations() {
        let backend = MockBackend::returning(Ok(BackendReply {
            text: Some("Walrus stores blobs off-chain.".to_string()),
            citations: vec![citation("a", ""), citation("", "b"), citation("c", "d")],
        }));
        let orchestrator = ResponseOrchestrator::new(backend);

        let reply = orchestrator.generate(&[], false, true).await.unwrap();

        assert_eq!(reply.text(), "Walrus stores blobs off-chain.");
        assert_eq!(
            reply.sources(),
            &[Source {
                uri: "c".to_string(),
                title: "d".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_missing_citation_fields_are_discarded() {
        let backend = MockBackend::returning(Ok(BackendReply {
            text: Some("ok".to_string()),
            citations: vec![
                CitationCandidate {
                    uri: Some("https://sui.io".to_string()),
                    title: None,
                },
                CitationCandidate {
                    uri: None,
                    title: Some("Sui".to_string()),
                },
            ],
        }));
        let orchestrator = ResponseOrchestrator::new(backend);

        let reply = orchestrator.generate(&[], false, true).await.unwrap();
        assert!(reply.sources().is_empty());
    }

    #[tokio::test]
    async fn test_empty_text_falls_back() {
        let backend = MockBackend::returning(Ok(BackendReply {
            text: Some("   ".to_string()),
            citations: Vec::new(),
        }));
        let orchestrator = ResponseOrchestrator::new(backend);

        let reply = orchestrator.generate(&[], false, false).await.unwrap();
        assert_eq!(reply.text(), EMPTY_REPLY_FALLBACK);
        assert!(matches!(reply, GeneratedReply::Completed { .. }));
    }

    #[tokio::test]
    async fn test_provider_failure_degrades() {
        let backend =
            MockBackend::returning(Err(MentorError::provider_status(401, "bad API key")));
        let orchestrator = ResponseOrchestrator::new(backend);

        let reply = orchestrator.generate(&[], false, false).await.unwrap();

        assert_eq!(reply.text(), PROVIDER_FAILURE_FALLBACK);
        assert!(reply.sources().is_empty());
        assert!(matches!(reply, GeneratedReply::Degraded { .. }));
    }

    #[tokio::test]
    async fn test_non_provider_failure_propagates() {
        let backend = MockBackend::returning(Err(MentorError::config("GEMINI_API_KEY not set")));
        let orchestrator = ResponseOrchestrator::new(backend);

        let result = orchestrator.generate(&[], false, false).await;
        assert!(matches!(result, Err(MentorError::Config(_))));
    }

    #[tokio::test]
    async fn test_deep_think_selects_deep_profile_only() {
        let backend = MockBackend::returning(Ok(BackendReply {
            text: Some("ok".to_string()),
            citations: Vec::new(),
        }));
        let orchestrator = ResponseOrchestrator::new(backend.clone());

        orchestrator.generate(&[], true, false).await.unwrap();

        let seen = backend.seen_options.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].profile, ModelProfile::Deep);
        // No other call parameter changes as a side effect
        assert!(!seen[0].web_search);
    }
}
