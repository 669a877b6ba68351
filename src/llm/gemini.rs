//! Google Gemini `generateContent` client

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, instrument};

use super::{LlmClient, LlmProvider, read_body};
use crate::{Result, TravelAiError};

const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiClient {
    http: ClientWithMiddleware,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
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
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiClient {
    #[must_use]
    pub fn new(http: ClientWithMiddleware, api_key: String, base_url: String, model: String) -> Self {
        Self {
            http,
            api_key,
            base_url,
            model,
        }
    }

    /// The key travels in a header so it never shows up in request URLs or their errors
    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url,
            urlencoding::encode(&self.model)
        )
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a response body
fn extract_text(body: &str) -> Result<String> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| TravelAiError::api(format!("Invalid Gemini response: {e}")))?;

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| TravelAiError::api("Gemini response contained no text candidate"))
}

#[async_trait]
impl LlmClient for GeminiClient {
    fn provider(&self) -> LlmProvider {
        LlmProvider::Gemini
    }

    #[instrument(name = "gemini_generate", skip(self, prompt), fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let start = Instant::now();
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };
        let body = serde_json::to_vec(&request)
            .map_err(|e| TravelAiError::general(format!("Failed to encode Gemini request: {e}")))?;

        debug!("Sending Gemini request ({} prompt chars)", prompt.len());
        let response = self
            .http
            .post(self.endpoint())
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .body(body)
            .send()
            .await
            .map_err(|e| TravelAiError::api(format!("Gemini request failed: {e}")))?;

        let text = extract_text(&read_body(LlmProvider::Gemini, response).await?)?;
        info!(
            "Gemini returned {} chars in {:.3}s",
            text.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(text)
    }
}
