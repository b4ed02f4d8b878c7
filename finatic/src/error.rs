//! Error types for the Finatic assistant

use thiserror::Error;

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, FinaticError>;

#[derive(Error, Debug)]
pub enum FinaticError {

    // =============================
    // Startup / Configuration
    // =============================

    #[error("OPENAI_API_KEY is not configured")]
    MissingApiKey,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    // =============================
    // Request Handling
    // =============================

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FinaticError {
    /// True when the fault came from the chat-completion service rather than
    /// from this process.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::LlmError(_) | Self::HttpError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_classification() {
        assert!(FinaticError::LlmError("429 Too Many Requests".into()).is_upstream());
        assert!(!FinaticError::MissingApiKey.is_upstream());
        assert!(!FinaticError::InvalidInput("capital".into()).is_upstream());

        let io: FinaticError = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken").into();
        assert!(matches!(io, FinaticError::IoError(_)));
        assert!(!io.is_upstream());
        assert_eq!(io.to_string(), "IO error: port taken");
    }
}
