//! Submission handling for a chat session.
//!
//! `ChatService` drives one full turn: validate the input, append the user
//! message, run the orchestrator, classify the reply for the pending-input
//! state machine, and append the assistant (or error) message. The busy
//! flag brackets the only await point, so at most one orchestration is ever
//! in flight per session.

use std::sync::Arc;

use crate::error::Result;
use crate::generation::GenerationBackend;
use crate::orchestrator::{GeneratedReply, ResponseOrchestrator};
use crate::session::ChatSession;

/// How one submission was resolved.
///
/// The variants keep the two fallback layers and the two rejection reasons
/// apart, so tests can tell exactly which path a submission took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The provider answered and an assistant message was appended.
    Completed,
    /// The provider failed; the orchestrator's fallback text was appended.
    Degraded,
    /// The orchestration itself could not be run; the generic error notice
    /// was appended.
    Failed,
    /// Blank or whitespace-only input; nothing was appended, no call issued.
    RejectedEmpty,
    /// A previous orchestration is still outstanding.
    RejectedBusy,
}

/// Drives submissions for chat sessions.
pub struct ChatService {
    orchestrator: ResponseOrchestrator,
}

impl ChatService {
    /// Creates a service generating through the given backend.
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            orchestrator: ResponseOrchestrator::new(backend),
        }
    }

    /// Submits one user input to the session.
    ///
    /// Exactly one user message and exactly one assistant (or error) message
    /// are appended for every accepted submission, in that order. Rejected
    /// submissions leave the session untouched.
    pub async fn submit(&self, session: &mut ChatSession, input: &str) -> SubmitOutcome {
        if input.trim().is_empty() {
            return SubmitOutcome::RejectedEmpty;
        }
        if session.is_busy() {
            return SubmitOutcome::RejectedBusy;
        }

        // The pending-input flag is cleared on every submission, before the
        // new orchestration is issued and independent of its outcome.
        session.input_mode.on_user_submission();

        session.append_user(input);
        session.set_busy(true);

        let outcome = match self.run_turn(session).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(error = %err, "failed to get a response from the orchestrator");
                session.append_error();
                SubmitOutcome::Failed
            }
        };

        session.set_busy(false);
        outcome
    }

    async fn run_turn(&self, session: &mut ChatSession) -> Result<SubmitOutcome> {
        let reply = self
            .orchestrator
            .generate(session.messages(), session.deep_think, session.web_search)
            .await?;

        // The classifier sees whatever text came back, degraded fallbacks
        // included; the fallback strings never match the keyword sets.
        session.input_mode.on_assistant_reply(reply.text());

        let outcome = match &reply {
            GeneratedReply::Completed { .. } => SubmitOutcome::Completed,
            GeneratedReply::Degraded { .. } => SubmitOutcome::Degraded,
        };

        let sources = reply.sources().to_vec();
        session.append_assistant(reply.text(), sources);

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::InputMode;
    use crate::error::MentorError;
    use crate::generation::{
        BackendReply, CitationCandidate, GenerationOptions, ModelProfile,
    };
    use crate::orchestrator::PROVIDER_FAILURE_FALLBACK;
    use crate::session::message::MessageRole;
    use crate::session::model::SUBMISSION_FAILURE_FALLBACK;
    use crate::session::ChatMessage;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // Mock backend with a queue of scripted results; records every call.
    #[derive(Default)]
    struct ScriptedBackend {
        results: Mutex<VecDeque<crate::error::Result<BackendReply>>>,
        calls: Mutex<Vec<(usize, GenerationOptions)>>,
    }

    impl ScriptedBackend {
        fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        fn push_text(&self, text: &str) {
            self.results.lock().unwrap().push_back(Ok(BackendReply {
                text: Some(text.to_string()),
                citations: Vec::new(),
            }));
        }

        fn push_error(&self, err: MentorError) {
            self.results.lock().unwrap().push_back(Err(err));
        }
    }

    #[async_trait]
    impl GenerationBackend for ScriptedBackend {
        async fn generate(
            &self,
            transcript: &[ChatMessage],
            options: &GenerationOptions,
        ) -> crate::error::Result<BackendReply> {
            self.calls.lock().unwrap().push((transcript.len(), *options));
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected generation call")
        }
    }

    fn service_with(backend: &Arc<ScriptedBackend>) -> ChatService {
        ChatService::new(backend.clone())
    }

    #[tokio::test]
    async fn test_submission_appends_user_then_assistant() {
        let backend = ScriptedBackend::new();
        backend.push_text("Move is an object-centric language.");
        let service = service_with(&backend);
        let mut session = ChatSession::new();

        let outcome = service.submit(&mut session, "What is Move?").await;

        assert_eq!(outcome, SubmitOutcome::Completed);
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[0].role, MessageRole::User);
        assert_eq!(session.messages()[0].text, "What is Move?");
        assert_eq!(session.messages()[1].role, MessageRole::Assistant);
        assert_eq!(session.messages()[1].text, "Move is an object-centric language.");
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_blank_input_rejected_before_any_mutation() {
        let backend = ScriptedBackend::new();
        let service = service_with(&backend);
        let mut session = ChatSession::new();
        session.input_mode = InputMode::AwaitingIdentifier;

        let outcome = service.submit(&mut session, "   \n\t").await;

        assert_eq!(outcome, SubmitOutcome::RejectedEmpty);
        assert!(session.messages().is_empty());
        // Blank input never reached the submission path, so the pending
        // flag is untouched and no call was issued.
        assert_eq!(session.input_mode, InputMode::AwaitingIdentifier);
        assert!(backend.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_busy_session_rejects_submission() {
        let backend = ScriptedBackend::new();
        let service = service_with(&backend);
        let mut session = ChatSession::new();
        session.set_busy(true);

        let outcome = service.submit(&mut session, "hello?").await;

        assert_eq!(outcome, SubmitOutcome::RejectedBusy);
        assert!(session.messages().is_empty());
        assert!(backend.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_full_transcript_resent_each_turn() {
        let backend = ScriptedBackend::new();
        backend.push_text("first answer");
        backend.push_text("second answer");
        let service = service_with(&backend);
        let mut session = ChatSession::new();

        service.submit(&mut session, "first question").await;
        service.submit(&mut session, "second question").await;

        let calls = backend.calls.lock().unwrap();
        // 1 message on the first call, 3 on the second (full prefix resent)
        assert_eq!(calls[0].0, 1);
        assert_eq!(calls[1].0, 3);
    }

    #[tokio::test]
    async fn test_pending_flag_set_by_matching_reply_and_reset_on_next_turn() {
        let backend = ScriptedBackend::new();
        backend.push_text("Sure - please provide the package ID you want me to check.");
        backend.push_text("That package exposes three modules.");
        let service = service_with(&backend);
        let mut session = ChatSession::new();

        service.submit(&mut session, "Can you verify my package?").await;
        assert_eq!(session.input_mode, InputMode::AwaitingIdentifier);
        assert!(session.placeholder().starts_with("Enter the Package ID"));

        service.submit(&mut session, "0x2::coin").await;
        assert_eq!(session.input_mode, InputMode::Idle);
    }

    #[tokio::test]
    async fn test_deep_think_flag_selects_deep_profile() {
        let backend = ScriptedBackend::new();
        backend.push_text("thought about it");
        let service = service_with(&backend);
        let mut session = ChatSession::new();
        session.deep_think = true;

        service.submit(&mut session, "Audit this module for me").await;

        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls[0].1.profile, ModelProfile::Deep);
        assert!(!calls[0].1.web_search);
    }

    #[tokio::test]
    async fn test_provider_failure_appends_degraded_fallback() {
        let backend = ScriptedBackend::new();
        backend.push_error(MentorError::provider("connection refused"));
        let service = service_with(&backend);
        let mut session = ChatSession::new();

        let outcome = service.submit(&mut session, "hello").await;

        assert_eq!(outcome, SubmitOutcome::Degraded);
        assert_eq!(session.messages()[1].text, PROVIDER_FAILURE_FALLBACK);
        assert!(session.messages()[1].sources.is_empty());
        // Session remains usable for a subsequent submission
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_internal_failure_appends_outer_fallback() {
        let backend = ScriptedBackend::new();
        backend.push_error(MentorError::internal("backend misconfigured"));
        let service = service_with(&backend);
        let mut session = ChatSession::new();

        let outcome = service.submit(&mut session, "hello").await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[1].text, SUBMISSION_FAILURE_FALLBACK);
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_session_usable_after_failure() {
        let backend = ScriptedBackend::new();
        backend.push_error(MentorError::provider("timeout"));
        backend.push_text("recovered");
        let service = service_with(&backend);
        let mut session = ChatSession::new();

        service.submit(&mut session, "first").await;
        let outcome = service.submit(&mut session, "second").await;

        assert_eq!(outcome, SubmitOutcome::Completed);
        assert_eq!(session.messages().len(), 4);
    }

    #[tokio::test]
    async fn test_citations_attached_to_assistant_message() {
        let backend = ScriptedBackend::new();
        backend.results.lock().unwrap().push_back(Ok(BackendReply {
            text: Some("See the framework docs.".to_string()),
            citations: vec![
                CitationCandidate {
                    uri: Some("https://docs.sui.io".to_string()),
                    title: Some("Sui Docs".to_string()),
                },
                CitationCandidate {
                    uri: Some("".to_string()),
                    title: Some("broken".to_string()),
                },
            ],
        }));
        let service = service_with(&backend);
        let mut session = ChatSession::new();
        session.web_search = true;

        service.submit(&mut session, "Where are the docs?").await;

        let sources = &session.messages()[1].sources;
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].uri, "https://docs.sui.io");
        assert_eq!(sources[0].title, "Sui Docs");
    }
}
