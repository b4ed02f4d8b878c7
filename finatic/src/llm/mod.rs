//! Chat-completion seam
//!
//! The advisor talks to a language model only through [`ChatModel`], so the
//! production client and test doubles are interchangeable.

use crate::error::FinaticError;
use crate::Result;
use async_trait::async_trait;
use std::sync::Mutex;

pub mod openai;
pub use openai::OpenAiChatModel;

/// A single system + user exchange, answered with plain text.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String>;
}

/// Canned chat model for development & testing
/// Records every user message it receives.
pub struct MockChatModel {
    reply: std::result::Result<String, String>,
    received: Mutex<Vec<(String, String)>>,
}

impl MockChatModel {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with an `LlmError` carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            received: Mutex::new(Vec::new()),
        }
    }

    /// `(system_prompt, user_message)` pairs, oldest first.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.received
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn complete(&self, system_prompt: &str, user_message: &str) -> Result<String> {
        if let Ok(mut calls) = self.received.lock() {
            calls.push((system_prompt.to_string(), user_message.to_string()));
        }

        self.reply
            .clone()
            .map_err(FinaticError::LlmError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_calls() {
        let model = MockChatModel::replying("¡Ahorra un poco cada semana!");
        let answer = tokio_test::block_on(model.complete("persona", "¿cómo ahorro?")).unwrap();

        assert_eq!(answer, "¡Ahorra un poco cada semana!");
        assert_eq!(
            model.calls(),
            vec![("persona".to_string(), "¿cómo ahorro?".to_string())]
        );
    }

    #[tokio::test]
    async fn test_failing_mock() {
        let model = MockChatModel::failing("quota exceeded");
        let err = model.complete("persona", "hola").await.unwrap_err();

        assert!(matches!(err, FinaticError::LlmError(_)));
        assert!(err.to_string().contains("quota exceeded"));
        assert_eq!(model.calls().len(), 1);
    }
}
