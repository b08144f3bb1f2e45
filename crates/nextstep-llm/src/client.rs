use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use nextstep_core::config::ServiceSettings;

/// Minimal client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct ChatCompletionsClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionsClient {
    pub fn new(settings: &ServiceSettings, api_key: String) -> Result<Self> {
        let timeout = Duration::from_millis(settings.timeout_ms.max(1));
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .tcp_nodelay(true)
            .build()?;
        let endpoint = format!("{}/chat/completions", settings.base_url.trim_end_matches('/'));
        tracing::info!(endpoint = %endpoint, model = %settings.model, timeout_ms = settings.timeout_ms, "creating chat completions client");
        Ok(Self { client, endpoint, api_key, model: settings.model.clone() })
    }

    pub fn endpoint(&self) -> &str { &self.endpoint }

    /// One non-streaming completion. Returns the first choice's content.
    pub async fn complete(&self, system: &str, user: &str, max_tokens: u32) -> Result<String> {
        tracing::debug!(endpoint = %self.endpoint, model = %self.model, prompt_len = user.len(), "sending completion request");
        let request = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user}
            ],
            "max_tokens": max_tokens,
            "temperature": 0.2,
            "stream": false
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    anyhow!("request to {} timed out", self.endpoint)
                } else if e.is_connect() {
                    anyhow!("failed to connect to {}: {}", self.endpoint, e)
                } else {
                    anyhow!("request to {} failed: {}", self.endpoint, e)
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| anyhow!("failed to read response body from {}: {}", self.endpoint, e))?;
        if !status.is_success() {
            let preview: String = body.chars().take(200).collect();
            return Err(anyhow!("API error ({}): {}", status, preview));
        }
        parse_completion(&body)
    }
}

/// Extracts the first choice's text from a completion response body.
pub(crate) fn parse_completion(body: &str) -> Result<String> {
    let trimmed = body.trim_start();
    if trimmed.starts_with('<') {
        let preview: String = trimmed.chars().take(200).collect();
        return Err(anyhow!("endpoint returned HTML instead of JSON: {}", preview));
    }
    let parsed: CompletionResponse = serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(300).collect();
        anyhow!("failed to parse completion JSON: {}. Response body: {}", e, preview)
    })?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| anyhow!("no choices returned from API"))
}
