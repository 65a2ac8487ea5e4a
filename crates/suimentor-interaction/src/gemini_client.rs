//! GeminiClient - Direct REST API implementation for Gemini.
//!
//! This backend sends `generateContent` requests with the full transcript,
//! the fixed system instruction, the deep-think reasoning budget when the
//! deep profile is selected, and the google_search tool when web grounding
//! is requested. Grounded references come back raw; the orchestrator owns
//! the citation filter.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;

use suimentor_core::error::{MentorError, Result};
use suimentor_core::generation::{
    BackendReply, CitationCandidate, GenerationBackend, GenerationOptions, ModelProfile,
};
use suimentor_core::session::{ChatMessage, MessageRole};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const STANDARD_MODEL: &str = "gemini-2.5-flash";
const DEEP_MODEL: &str = "gemini-2.5-pro";

/// Backend implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    system_instruction: Option<String>,
}

impl GeminiClient {
    /// Creates a new client with the provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            system_instruction: None,
        }
    }

    /// Loads configuration from the `GEMINI_API_KEY` environment variable.
    pub fn try_from_env() -> Result<Self> {
        let api_key = env::var("GEMINI_API_KEY").map_err(|_| {
            MentorError::config("GEMINI_API_KEY not found in environment variables")
        })?;

        Ok(Self::new(api_key))
    }

    /// Adds a system instruction that will be sent alongside every request.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// The model identifier a profile selects.
    fn model_for(profile: ModelProfile) -> &'static str {
        match profile {
            ModelProfile::Standard => STANDARD_MODEL,
            ModelProfile::Deep => DEEP_MODEL,
        }
    }

    fn build_request(
        &self,
        transcript: &[ChatMessage],
        options: &GenerationOptions,
    ) -> GenerateContentRequest {
        let contents = transcript
            .iter()
            .map(|message| Content {
                role: wire_role(message.role).to_string(),
                parts: vec![Part {
                    text: message.text.clone(),
                }],
            })
            .collect();

        let system_instruction = self.system_instruction.as_ref().map(|text| Content {
            role: "system".to_string(),
            parts: vec![Part {
                text: text.to_string(),
            }],
        });

        let generation_config =
            options
                .profile
                .thinking_budget()
                .map(|thinking_budget| GenerationConfig {
                    thinking_config: ThinkingConfig { thinking_budget },
                });

        let tools = if options.web_search {
            vec![Tool::default()]
        } else {
            Vec::new()
        };

        GenerateContentRequest {
            contents,
            system_instruction,
            generation_config,
            tools,
        }
    }

    async fn send_request(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            BASE_URL,
            model = model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                MentorError::provider(format!("Gemini API request failed: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        response
            .json()
            .await
            .map_err(|err| MentorError::provider(format!("Failed to parse Gemini response: {err}")))
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    async fn generate(
        &self,
        transcript: &[ChatMessage],
        options: &GenerationOptions,
    ) -> Result<BackendReply> {
        let model = Self::model_for(options.profile);
        let request = self.build_request(transcript, options);

        tracing::debug!(model, web_search = options.web_search, "issuing generateContent call");

        let response = self.send_request(model, &request).await?;
        Ok(reply_from_response(response))
    }
}

fn wire_role(role: MessageRole) -> &'static str {
    match role {
        MessageRole::User => "user",
        MessageRole::Assistant => "model",
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Serialize, Default)]
struct Tool {
    #[serde(rename = "google_search")]
    google_search: GoogleSearchConfig,
}

#[derive(Serialize, Default)]
struct GoogleSearchConfig {}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
    #[serde(rename = "groundingMetadata")]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Deserialize)]
struct WebSource {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn reply_from_response(response: GenerateContentResponse) -> BackendReply {
    let candidates = response.candidates.unwrap_or_default();

    let text = candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .filter(|text| !text.trim().is_empty())
                .collect::<Vec<_>>()
                .join("\n\n")
        })
        .filter(|text| !text.is_empty());

    let citations = candidates
        .into_iter()
        .filter_map(|candidate| candidate.grounding_metadata)
        .flat_map(|metadata| metadata.grounding_chunks)
        .filter_map(|chunk| chunk.web)
        .map(|web| CitationCandidate {
            uri: web.uri,
            title: web.title,
        })
        .collect();

    BackendReply { text, citations }
}

fn map_http_error(status: StatusCode, body: String) -> MentorError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    MentorError::provider_status(status.as_u16(), message)
}
