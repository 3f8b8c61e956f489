//! Gemini completion client implementation
//!
//! This module implements the [`CompletionClient`] trait against the Gemini
//! `generateContent` REST endpoint. The system instruction and generation
//! parameters are fixed constants of the deployment; only the endpoint base,
//! model, and API key come from configuration.

use crate::config::CompletionConfig;
use crate::error::{Result, TaskdeckError};
use crate::completion::{CompletionClient, Turn};
use crate::prompts::task_assistant_instruction;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed generation parameters of the deployment
const TEMPERATURE: f64 = 1.0;
const TOP_P: f64 = 0.95;
const TOP_K: u32 = 40;
const MAX_OUTPUT_TOKENS: u32 = 8192;
const RESPONSE_MIME_TYPE: &str = "application/json";

/// Gemini API client
///
/// # Examples
///
/// ```no_run
/// use taskdeck::config::CompletionConfig;
/// use taskdeck::completion::{CompletionClient, GeminiClient, Turn};
///
/// # async fn example() -> taskdeck::error::Result<()> {
/// let config = CompletionConfig {
///     api_base: "https://generativelanguage.googleapis.com".to_string(),
///     model: "gemini-2.0-flash-lite".to_string(),
///     api_key: "secret".to_string(),
/// };
/// let client = GeminiClient::new(config)?;
/// let history = vec![Turn::user("Hi"), Turn::model("Hello!")];
/// let reply = client.send_message(&history, "What can you do?").await?;
/// # Ok(())
/// # }
/// ```
pub struct GeminiClient {
    client: Client,
    config: CompletionConfig,
}

/// Request structure for the generateContent endpoint
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    system_instruction: GeminiContent,
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

/// Content block with role and parts
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

/// A single text part
#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

/// Generation parameters sent with every request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_p: f64,
    top_k: u32,
    max_output_tokens: u32,
    response_mime_type: String,
}

/// Response structure from the generateContent endpoint
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

/// One response candidate
#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

impl GeminiClient {
    /// Create a new Gemini client
    ///
    /// # Arguments
    ///
    /// * `config` - Completion configuration with api_base, model, and key
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: CompletionConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .user_agent("taskdeck/0.2.0")
            .build()
            .map_err(|e| {
                TaskdeckError::Completion(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            "Initialized completion client: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self { client, config })
    }

    /// URL of the generateContent endpoint for the configured model
    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Build the request body from history and the new user message
    fn build_request(&self, history: &[Turn], text: &str) -> GenerateContentRequest {
        let mut contents: Vec<GeminiContent> = history
            .iter()
            .map(|turn| GeminiContent {
                role: Some(turn.role.as_str().to_string()),
                parts: vec![GeminiPart {
                    text: turn.text.clone(),
                }],
            })
            .collect();

        contents.push(GeminiContent {
            role: Some("user".to_string()),
            parts: vec![GeminiPart {
                text: text.to_string(),
            }],
        });

        GenerateContentRequest {
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: task_assistant_instruction().to_string(),
                }],
            },
            contents,
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
                top_k: TOP_K,
                max_output_tokens: MAX_OUTPUT_TOKENS,
                response_mime_type: RESPONSE_MIME_TYPE.to_string(),
            },
        }
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn send_message(&self, history: &[Turn], text: &str) -> Result<String> {
        let url = self.generate_url();
        tracing::debug!(
            "Sending completion request: {} history turns, {} chars",
            history.len(),
            text.len()
        );

        let request = self.build_request(history, text);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                TaskdeckError::Completion(format!("Failed to reach completion service: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Completion service returned {}: {}", status, body);
            return Err(TaskdeckError::Completion(format!(
                "Service returned {}: {}",
                status, body
            ))
            .into());
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            TaskdeckError::Completion(format!("Failed to parse completion response: {}", e))
        })?;

        let reply = body
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| {
                TaskdeckError::Completion("Response carried no candidates".to_string())
            })?;

        tracing::debug!("Completion response: {} chars", reply.len());
        Ok(reply)
    }
}
