//! Clients for the generative AI endpoints that write itineraries
//!
//! Every provider takes a prompt and hands back the raw response text; the
//! normalizer deals with its structure.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::{Result, TravelAiError};

pub mod gemini;
pub mod openai;

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

/// Supported generative AI providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Gemini,
    OpenAi,
}

impl LlmProvider {
    #[must_use]
    pub fn default_base_url(self) -> &'static str {
        match self {
            LlmProvider::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            LlmProvider::OpenAi => "https://api.openai.com/v1",
        }
    }

    #[must_use]
    pub fn default_model(self) -> &'static str {
        match self {
            LlmProvider::Gemini => "gemini-1.5-flash",
            LlmProvider::OpenAi => "gpt-4o-mini",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::Gemini => write!(f, "gemini"),
            LlmProvider::OpenAi => write!(f, "openai"),
        }
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    fn provider(&self) -> LlmProvider;

    /// Send `prompt` and return the model's text answer
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Build the client for the configured provider
pub fn build_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>> {
    let api_key = config
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            TravelAiError::config(format!(
                "No API key configured for provider '{}'. Set llm.api_key or TRAVELPLANNER__LLM__API_KEY.",
                config.provider
            ))
        })?;

    let http = http_client(config)?;
    let base_url = config.effective_base_url().trim_end_matches('/').to_string();
    let model = config.effective_model().to_string();

    let client: Arc<dyn LlmClient> = match config.provider {
        LlmProvider::Gemini => Arc::new(GeminiClient::new(http, api_key, base_url, model)),
        LlmProvider::OpenAi => Arc::new(OpenAiClient::new(http, api_key, base_url, model)),
    };
    Ok(client)
}

/// HTTP client with timeout and transient-failure retries
fn http_client(config: &LlmConfig) -> Result<ClientWithMiddleware> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds.into()))
        .user_agent(concat!("travelplanner/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| TravelAiError::config(format!("Failed to create HTTP client: {e}")))?;

    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);

    Ok(ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

/// Read a provider response, turning non-success statuses into API errors
async fn read_body(provider: LlmProvider, response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TravelAiError::api(format!("Failed to read {provider} response body: {e}")))?;

    if !status.is_success() {
        let snippet: String = body.chars().take(300).collect();
        return Err(TravelAiError::api(format!(
            "{provider} returned status {status}: {snippet}"
        )));
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_serde_names() {
        assert_eq!(serde_json::to_string(&LlmProvider::Gemini).unwrap(), "\"gemini\"");
        assert_eq!(serde_json::to_string(&LlmProvider::OpenAi).unwrap(), "\"openai\"");
        let parsed: LlmProvider = serde_json::from_str("\"openai\"").unwrap();
        assert_eq!(parsed, LlmProvider::OpenAi);
    }

    #[test]
    fn test_build_client_requires_api_key() {
        let config = LlmConfig::default();
        let err = build_client(&config).err().unwrap();
        assert!(matches!(err, TravelAiError::Config { .. }));
        assert!(err.to_string().contains("gemini"));
    }

    #[test]
    fn test_build_client_selects_provider() {
        let mut config = LlmConfig {
            api_key: Some("test-key-123456".to_string()),
            ..LlmConfig::default()
        };
        assert_eq!(build_client(&config).unwrap().provider(), LlmProvider::Gemini);

        config.provider = LlmProvider::OpenAi;
        assert_eq!(build_client(&config).unwrap().provider(), LlmProvider::OpenAi);
    }
}
