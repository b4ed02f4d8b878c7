//! OpenAI chat-completion client
//!
//! One long-lived reqwest::Client, built once at startup and shared by every
//! request. No retries: a failed call is returned to the caller as-is.

use super::ChatModel;
use crate::config::Config;
use crate::error::FinaticError;
use crate::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

pub struct OpenAiChatModel {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiChatModel {
    pub fn new(
        api_key: String,
        model: String,
        base_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(FinaticError::MissingApiKey);
        }

        let mut builder = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8);

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_key,
            model,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.openai_api_key.clone(),
            config.openai_model.clone(),
            &config.openai_base_url,
            config.request_timeout,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.as_str(),
            messages: vec![
                Message {
                    role: "system",
                    content: system_prompt,
                },
                Message {
                    role: "user",
                    content: user_message,
                },
            ],
        };

        info!(model = %self.model, "Calling chat-completion API");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Chat-completion request failed: {}", e);
                FinaticError::LlmError(format!("request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Chat-completion API returned {}: {}", status, error_text);
            return Err(FinaticError::LlmError(format!(
                "API returned {}: {}",
                status, error_text
            )));
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            error!("Failed to parse chat-completion response: {}", e);
            FinaticError::LlmError(format!("parse error: {}", e))
        })?;

        let answer = first_reply(body)?;
        info!(chars = answer.chars().count(), "Chat-completion response received");

        Ok(answer)
    }
}

/// `choices[0].message.content`, or an error when the service sent nothing.
fn first_reply(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| FinaticError::LlmError("response contained no choices".to_string()))?
        .message
        .content
        .ok_or_else(|| FinaticError::LlmError("response message had no content".to_string()))
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}
