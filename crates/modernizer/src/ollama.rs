//! Client for a local Ollama server's `/api/chat` endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use jernkorset_core::modernize::{throughput, ModernizeError, Modernized, Modernizer};

use crate::{ensure_success, user_prompt, BackendError, SYSTEM_PROMPT};

pub const DEFAULT_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.1";

/// Modernizer backed by an Ollama chat model.
pub struct OllamaModernizer {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
    /// Generated token count.
    #[serde(default)]
    eval_count: Option<u64>,
    /// Generation time in nanoseconds.
    #[serde(default)]
    eval_duration: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OllamaModernizer {
    /// * `base_url` - e.g. `http://localhost:11434`; a trailing slash is ignored.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, model)
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            model: model.into(),
        }
    }

    async fn chat(&self, text: &str) -> Result<Modernized, BackendError> {
        let prompt = user_prompt(text);
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await?;
        let reply: ChatResponse = ensure_success(response).await?.json().await?;

        if reply.message.content.trim().is_empty() {
            return Err(BackendError::EmptyResponse);
        }

        let seconds = reply.eval_duration.unwrap_or(0) as f64 / 1e9;
        let tokens_per_second = throughput(reply.eval_count.unwrap_or(0), seconds);
        tracing::debug!(
            model = %self.model,
            eval_count = reply.eval_count,
            seconds,
            tokens_per_second,
            "Ollama chat completed"
        );

        Ok(Modernized {
            text: reply.message.content,
            tokens_per_second,
        })
    }
}

#[async_trait]
impl Modernizer for OllamaModernizer {
    async fn modernize(&self, text: &str) -> Result<Modernized, ModernizeError> {
        Ok(self.chat(text).await?)
    }
}
