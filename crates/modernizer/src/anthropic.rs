//! Client for the Anthropic Messages API.

use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use jernkorset_core::modernize::{throughput, ModernizeError, Modernized, Modernizer};

use crate::{ensure_success, user_prompt, BackendError, SYSTEM_PROMPT};

pub const DEFAULT_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

/// Modernizer backed by a hosted Anthropic model.
///
/// Constructed without a key it still builds, but every call fails with
/// [`ModernizeError::MissingCredential`].
pub struct AnthropicModernizer {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [UserMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    output_tokens: u64,
}

impl AnthropicModernizer {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(reqwest::Client::new(), DEFAULT_URL, api_key, model)
    }

    pub fn with_base_url(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    async fn complete(&self, api_key: &str, text: &str) -> Result<Modernized, BackendError> {
        let prompt = user_prompt(text);
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system: SYSTEM_PROMPT,
            messages: [UserMessage {
                role: "user",
                content: &prompt,
            }],
        };

        let started = Instant::now();
        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;
        let reply: MessagesResponse = ensure_success(response).await?.json().await?;
        let seconds = started.elapsed().as_secs_f64();

        let text: String = reply
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect();
        if text.trim().is_empty() {
            return Err(BackendError::EmptyResponse);
        }

        let tokens_per_second = throughput(reply.usage.output_tokens, seconds);
        tracing::debug!(
            model = %self.model,
            seconds,
            tokens_per_second,
            "Anthropic message completed"
        );

        Ok(Modernized {
            text,
            tokens_per_second,
        })
    }
}

#[async_trait]
impl Modernizer for AnthropicModernizer {
    async fn modernize(&self, text: &str) -> Result<Modernized, ModernizeError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ModernizeError::MissingCredential(API_KEY_VAR.to_string()))?;
        Ok(self.complete(api_key, text).await?)
    }
}
