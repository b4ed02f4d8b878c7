//! Conversational interaction handler
//!
//! Answers a free-text question. Recognised calculations are answered by the
//! formula library; everything else goes to the chat model with the youth
//! advisor persona, and its reply is returned untouched.

use crate::classifier::detect_calculation;
use crate::llm::ChatModel;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// System prompt for every advisor call.
pub const ADVISOR_PERSONA: &str = "Eres un asesor financiero juvenil, amable y motivador. \
Respondes con lenguaje claro, ejemplos sencillos y consejos responsables. \
Evita jerga técnica y promueve hábitos financieros saludables.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerSource {
    Calculator,
    Advisor,
}

/// Response for a free-text question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub source: AnswerSource,
}

pub struct Responder {
    model: Arc<dyn ChatModel>,
}

impl Responder {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    pub async fn respond(&self, question: &str) -> crate::Result<Answer> {
        if let Some(text) = detect_calculation(question) {
            info!("Answered by calculator");
            return Ok(Answer {
                text,
                source: AnswerSource::Calculator,
            });
        }

        info!("No calculation detected, asking advisor");

        match self.model.complete(ADVISOR_PERSONA, question).await {
            Ok(text) => Ok(Answer {
                text,
                source: AnswerSource::Advisor,
            }),
            Err(e) => {
                warn!("Advisor call failed: {}", e);
                Err(e)
            }
        }
    }
}
