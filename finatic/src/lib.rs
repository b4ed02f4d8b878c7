//! Finatic
//!
//! A small financial-literacy assistant for young people:
//! - Free-text questions, with simple/compound interest and monthly budget
//!   requests answered deterministically by the formula library
//! - Everything else answered by a chat model playing a friendly advisor
//! - A quick calculator with one form per mode
//!
//! FLOW:
//! QUESTION → CLASSIFY → (CALCULATE | ASK ADVISOR) → RENDER

pub mod api;
pub mod calculator;
pub mod classifier;
pub mod config;
pub mod conversational;
pub mod error;
pub mod llm;
pub mod models;
pub mod page;

pub use error::Result;

// Re-export common types
pub use classifier::{detect_calculation, Intent, IntentClassifier};
pub use config::Config;
pub use conversational::{Answer, AnswerSource, Responder};
pub use models::{CalculationRequest, CalculatorMode};
