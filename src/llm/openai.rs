//! OpenAI-compatible chat completions client

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, instrument};

use super::{LlmClient, LlmProvider, read_body};
use crate::{Result, TravelAiError};

pub struct OpenAiClient {
    http: ClientWithMiddleware,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiClient {
    #[must_use]
    pub fn new(http: ClientWithMiddleware, api_key: String, base_url: String, model: String) -> Self {
        Self {
            http,
            api_key,
            base_url,
            model,
        }
    }
}

/// Pull `choices[0].message.content` out of a response body
fn extract_text(body: &str) -> Result<String> {
    let response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| TravelAiError::api(format!("Invalid OpenAI response: {e}")))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| TravelAiError::api("OpenAI response contained no message content"))
}

#[async_trait]
impl LlmClient for OpenAiClient {
    fn provider(&self) -> LlmProvider {
        LlmProvider::OpenAi
    }

    #[instrument(name = "openai_generate", skip(self, prompt), fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let start = Instant::now();
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };
        let body = serde_json::to_vec(&request)
            .map_err(|e| TravelAiError::general(format!("Failed to encode OpenAI request: {e}")))?;

        debug!("Sending chat completion request ({} prompt chars)", prompt.len());
        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| TravelAiError::api(format!("OpenAI request failed: {e}")))?;

        let text = extract_text(&read_body(LlmProvider::OpenAi, response).await?)?;
        info!(
            "OpenAI returned {} chars in {:.3}s",
            text.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(text)
    }
}
