//! Chat-completion client used when no local rule matches.

use anyhow::{anyhow, Context, Result};
use futures_util::future::{select, Either};
use gloo_timers::future::TimeoutFuture;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::AssistantConfig;

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    top_p: f64,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// Remote text generation. Implementations must not retry; the caller turns
/// any error into a local fallback reply.
#[allow(async_fn_in_trait)]
pub trait CompletionBackend {
    async fn complete(&self, api_key: &str, text: &str) -> Result<String>;
}

/// Extracts the first choice's content, trimmed. Empty content is malformed.
pub fn parse_completion(body: &str) -> Result<String> {
    let parsed: ChatResponse = serde_json::from_str(body).context("malformed completion body")?;
    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| anyhow!("completion had no choices"))?;
    let content = content.trim();
    if content.is_empty() {
        return Err(anyhow!("completion content was empty"));
    }
    Ok(content.to_string())
}

#[derive(Clone)]
pub struct ChatCompletionClient {
    client: Client,
    config: AssistantConfig,
}

impl ChatCompletionClient {
    pub fn new(config: AssistantConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn request_body<'a>(&'a self, text: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.config.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            temperature: self.config.temperature,
            top_p: self.config.top_p,
            max_tokens: self.config.max_tokens,
        }
    }

    async fn send(&self, api_key: &str, text: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&self.request_body(text))
            .send()
            .await
            .context("completion request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("completion API error {status}: {body}"));
        }

        let body = response.text().await.context("reading completion body")?;
        parse_completion(&body)
    }
}

impl CompletionBackend for ChatCompletionClient {
    async fn complete(&self, api_key: &str, text: &str) -> Result<String> {
        let request = Box::pin(self.send(api_key, text));
        let timeout = Box::pin(TimeoutFuture::new(self.config.timeout_ms));
        match select(request, timeout).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(anyhow!(
                "completion timed out after {} ms",
                self.config.timeout_ms
            )),
        }
    }
}
