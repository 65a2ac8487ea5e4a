//! Contract scan client for the Anthropic Messages API.
//!
//! One request per scan: the contract code is embedded in a fixed prompt
//! template asking for a JSON verdict, and the provider's raw response body
//! is relayed to the caller unchanged.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::env;
use thiserror::Error;

const BASE_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const SCAN_MODEL: &str = "claude-sonnet-4-20250514";
const SCAN_MAX_TOKENS: u32 = 1000;

/// Errors a scan can produce, each mapping to one HTTP response shape.
#[derive(Error, Debug)]
pub enum ScanError {
    /// `ANTHROPIC_API_KEY` is not set.
    #[error("API key not configured")]
    MissingApiKey,

    /// The provider answered with a non-success status.
    #[error("upstream returned {status}")]
    Upstream { status: u16, details: String },

    /// The request could not be sent or the body could not be read.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Client forwarding scan requests to the Anthropic API.
#[derive(Clone)]
pub struct ScanClient {
    client: Client,
    api_key: Option<String>,
}

impl ScanClient {
    /// Creates a client from the `ANTHROPIC_API_KEY` environment variable.
    ///
    /// A missing key is not an error at construction time; it is reported
    /// per-request so the health endpoint stays usable.
    pub fn from_env() -> Self {
        Self {
            client: Client::new(),
            api_key: env::var("ANTHROPIC_API_KEY").ok(),
        }
    }

    #[cfg(test)]
    fn with_key(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: Some(api_key.into()),
        }
    }

    /// Analyzes one contract and returns the provider's raw JSON response.
    pub async fn analyze(&self, contract_code: &str) -> Result<Value, ScanError> {
        let api_key = self.api_key.as_ref().ok_or(ScanError::MissingApiKey)?;

        let request = CreateMessageRequest {
            model: SCAN_MODEL.to_string(),
            max_tokens: SCAN_MAX_TOKENS,
            messages: vec![Message {
                role: "user".to_string(),
                content: build_scan_prompt(contract_code),
            }],
        };

        let response = self
            .client
            .post(BASE_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|err| ScanError::Transport(format!("Anthropic API request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let details = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Anthropic error body".to_string());
            tracing::error!(status = status.as_u16(), %details, "Anthropic API error");
            return Err(ScanError::Upstream {
                status: status.as_u16(),
                details,
            });
        }

        response
            .json()
            .await
            .map_err(|err| ScanError::Transport(format!("Failed to parse Anthropic response: {err}")))
    }
}

#[derive(Serialize)]
struct CreateMessageRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

/// The fixed audit prompt wrapping the submitted contract code.
fn build_scan_prompt(contract_code: &str) -> String {
    format!(
        r#"Analyze this Sui Move smart contract for vulnerabilities. Return ONLY a JSON object with this structure:
{{
  "severity": "critical|high|medium|low",
  "score": 0-100,
  "vulnerabilities": [
    {{"type": "string", "description": "string", "line": number, "severity": "string"}}
  ],
  "recommendations": ["string"],
  "summary": "string"
}}

Contract code:
{contract_code}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_prompt_embeds_code_and_schema() {
        let prompt = build_scan_prompt("module demo::vault { }");

        assert!(prompt.contains("module demo::vault { }"));
        assert!(prompt.contains(r#""severity": "critical|high|medium|low""#));
        assert!(prompt.contains(r#""recommendations": ["string"]"#));
        assert!(prompt.ends_with("module demo::vault { }"));
    }

    #[test]
    fn test_request_body_shape() {
        let request = CreateMessageRequest {
            model: SCAN_MODEL.to_string(),
            max_tokens: SCAN_MAX_TOKENS,
            messages: vec![Message {
                role: "user".to_string(),
                content: build_scan_prompt("module x::y {}"),
            }],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "claude-sonnet-4-20250514");
        assert_eq!(value["max_tokens"], 1000);
        assert_eq!(value["messages"][0]["role"], "user");
    }

    #[tokio::test]
    async fn test_missing_api_key_is_reported_per_request() {
        let client = ScanClient {
            client: Client::new(),
            api_key: None,
        };

        let err = client.analyze("module x::y {}").await.unwrap_err();
        assert!(matches!(err, ScanError::MissingApiKey));
    }

    #[test]
    fn test_with_key_sets_key() {
        let client = ScanClient::with_key("sk-test");
        assert!(client.api_key.is_some());
    }
}
