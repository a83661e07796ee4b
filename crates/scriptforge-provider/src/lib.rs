//! # Scriptforge Provider
//!
//! The generative text exchange: prompt construction, model tier
//! selection and the Gemini HTTP client.
//!
//! The rest of the workspace talks to [`ScriptProvider`], an object-safe
//! async trait; [`GeminiClient`] is the production implementation. The
//! provider owns its own error taxonomy (network, quota, auth, empty
//! responses); downstream, a failure is rendered as an ordinary comment
//! script and flows through display like any other text.

pub mod client;
pub mod model;
pub mod prompt;

pub use client::{API_KEY_ENV, DEFAULT_BASE_URL, GeminiClient, ScriptProvider};
pub use model::{ModelTier, ParseModelTierError};

// Re-exported so downstream crates can implement `ScriptProvider`
// (e.g. scripted test providers) without depending on async-trait
// themselves.
pub use async_trait::async_trait;

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors that can occur while talking to the generative API.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API key not set (expected in ${0})")]
    MissingApiKey(String),

    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("empty response from model")]
    EmptyResponse,
}

impl ProviderError {
    /// Returns true if a retry could plausibly succeed.
    ///
    /// Transport failures and throttling/server statuses are worth a
    /// retry; auth and quota rejections are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Http(_) => true,
            ProviderError::Api { status, .. } => *status == 429 || *status >= 500,
            ProviderError::MissingApiKey(_) | ProviderError::EmptyResponse => false,
        }
    }
}
