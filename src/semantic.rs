//! Semantic extraction over chunked page text.
//!
//! The extractor receives the ordered chunks of normalized text together with
//! a natural-language goal. `OllamaExtractor` prompts a local Ollama model once
//! per chunk and joins the non-empty answers.

use crate::error::ExtractError;
use crate::parsers::text;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::time::Duration;

/// Default timeout for one model request
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Derives text from chunked content according to a goal
#[async_trait]
pub trait SemanticExtractor: Send + Sync {
    async fn extract(&self, chunks: &[&str], goal: &str) -> Result<String, ExtractError>;
}

/// Chunks `content` and hands the chunks to `extractor`
pub async fn extract_from_text<E: SemanticExtractor + ?Sized>(
    extractor: &E,
    content: &str,
    chunk_size: usize,
    goal: &str,
) -> Result<String, ExtractError> {
    let chunk_size = NonZeroUsize::new(chunk_size).unwrap_or(text::DEFAULT_CHUNK_SIZE);
    let chunks = text::chunk(content, chunk_size);
    ::log::info!(
        "Parsing {} characters in {} chunks",
        content.chars().count(),
        chunks.len()
    );

    extractor.extract(&chunks, goal).await
}

/// Builds the prompt for one chunk
fn build_prompt(chunk: &str, goal: &str) -> String {
    format!(
        "You are extracting information from the text content of a job search results page.\n\
         Text content:\n{chunk}\n\n\
         Instructions:\n\
         1. Extract only the information that matches this description: {goal}\n\
         2. Reply with the extracted information only, without commentary.\n\
         3. If nothing matches, reply with an empty string."
    )
}

/// Request body for the Ollama generate API
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

/// Response from the Ollama generate API
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Semantic extractor backed by a local Ollama instance
pub struct OllamaExtractor {
    endpoint: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaExtractor {
    /// Create an extractor for `model` served at `endpoint`
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, ExtractError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            endpoint: endpoint.into(),
            model: model.into(),
            client,
        })
    }

    async fn generate(&self, prompt: String) -> Result<String, ExtractError> {
        let url = format!("{}/api/generate", self.endpoint.trim_end_matches('/'));
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self.client.post(&url).json(&request).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ExtractError::ModelNotAvailable(self.model.clone()));
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractError::Communication(format!("HTTP {}: {}", status, body)));
        }

        let body = response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| ExtractError::InvalidResponse(e.to_string()))?;
        Ok(body.response)
    }
}

#[async_trait]
impl SemanticExtractor for OllamaExtractor {
    async fn extract(&self, chunks: &[&str], goal: &str) -> Result<String, ExtractError> {
        let mut answers = Vec::with_capacity(chunks.len());

        for (i, chunk) in chunks.iter().enumerate() {
            let answer = self.generate(build_prompt(chunk, goal)).await?;
            ::log::info!("Parsed chunk {} of {}", i + 1, chunks.len());

            let answer = answer.trim();
            if !answer.is_empty() {
                answers.push(answer.to_string());
            }
        }

        Ok(answers.join("\n"))
    }
}
