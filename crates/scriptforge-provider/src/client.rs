//! Gemini `generateContent` client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::model::ModelTier;
use crate::prompt;
use crate::{ProviderError, ProviderResult};

/// Environment variable the API key is read from.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Production endpoint base.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// The generative text exchange the rest of the application depends on.
///
/// Implementations own their transport; callers only see script text or
/// a [`ProviderError`]. Keeping this object-safe lets tests substitute a
/// scripted provider without touching the session logic.
#[async_trait]
pub trait ScriptProvider: Send + Sync {
    /// Generates a script from a natural-language description.
    async fn generate(&self, description: &str, tier: ModelTier) -> ProviderResult<String>;

    /// Repairs a script given the error Revit reported.
    async fn fix(
        &self,
        original_code: &str,
        error_message: &str,
        tier: ModelTier,
    ) -> ProviderResult<String>;

    /// Answers a free-form technical question.
    async fn advise(&self, question: &str) -> ProviderResult<String>;
}

/// HTTP client for the Gemini API.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl GeminiClient {
    /// Creates a client with the given API key and default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retries: 2,
            retry_delay: Duration::from_millis(750),
        }
    }

    /// Creates a client from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> ProviderResult<Self> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key)),
            _ => Err(ProviderError::MissingApiKey(API_KEY_ENV.to_string())),
        }
    }

    /// Overrides the endpoint base, mainly for tests and proxies.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the retry policy.
    pub fn with_retries(mut self, max_retries: u32, delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = delay;
        self
    }

    /// Sends one prompt and returns the model's text, retrying transport
    /// failures and 429/5xx responses up to the configured limit.
    async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> ProviderResult<String> {
        let mut attempt = 0;
        loop {
            match self.try_generate(model, prompt, system_instruction).await {
                Ok(text) => return Ok(text),
                Err(err) if attempt < self.max_retries && err.is_retryable() => {
                    attempt += 1;
                    tracing::warn!(attempt, error = %err, "generation failed, retrying");
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn try_generate(
        &self,
        model: &str,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> ProviderResult<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: system_instruction.map(|text| Content {
                parts: vec![Part { text }],
            }),
        };

        tracing::debug!(model, prompt_len = prompt.len(), "sending generateContent");
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        extract_text(parsed)
    }
}

#[async_trait]
impl ScriptProvider for GeminiClient {
    async fn generate(&self, description: &str, tier: ModelTier) -> ProviderResult<String> {
        self.generate_content(
            tier.model_id(),
            &prompt::generation_prompt(description),
            Some(prompt::SYSTEM_INSTRUCTION),
        )
        .await
    }

    async fn fix(
        &self,
        original_code: &str,
        error_message: &str,
        tier: ModelTier,
    ) -> ProviderResult<String> {
        self.generate_content(
            tier.model_id(),
            &prompt::fix_prompt(original_code, error_message),
            Some(prompt::SYSTEM_INSTRUCTION),
        )
        .await
    }

    async fn advise(&self, question: &str) -> ProviderResult<String> {
        self.generate_content(
            ModelTier::Flash.model_id(),
            &prompt::advice_prompt(question),
            None,
        )
        .await
    }
}

/// Pulls the first candidate's text out of a response.
fn extract_text(response: GenerateContentResponse) -> ProviderResult<String> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(ProviderError::EmptyResponse)
    } else {
        Ok(trimmed.to_string())
    }
}

// Wire types for the generateContent endpoint.

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hello" }],
            }],
            system_instruction: Some(Content {
                parts: vec![Part { text: "rules" }],
            }),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "rules");
    }

    #[test]
    fn test_request_omits_absent_system_instruction() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: "q" }],
            }],
            system_instruction: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("systemInstruction").is_none());
    }

    #[test]
    fn test_extract_text_joins_parts_and_trims() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"  a"},{"text":"b \n"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "ab");
    }

    #[test]
    fn test_extract_text_empty_candidates() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(matches!(
            extract_text(response),
            Err(ProviderError::EmptyResponse)
        ));
    }

    #[test]
    fn test_from_env_missing_key() {
        // Runs in-process: use a name no other test touches.
        let result = std::env::var(API_KEY_ENV).is_err().then(GeminiClient::from_env);
        if let Some(Err(err)) = result {
            assert!(matches!(err, ProviderError::MissingApiKey(_)));
        }
    }
}
