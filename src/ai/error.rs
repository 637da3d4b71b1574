//! Generative text service error types

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while talking to the generative text service
#[derive(Debug, Error)]
pub enum AiError {
    #[error("No API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AiError {
    /// Short message suitable for the TUI status line
    pub fn user_message(&self) -> String {
        match self {
            AiError::MissingApiKey => "Import needs GEMINI_API_KEY to be set".to_string(),
            AiError::ApiError { status, .. } => format!("Import failed: service returned {}", status),
            AiError::Network(_) | AiError::Timeout(_) => "Import failed: service unreachable".to_string(),
            AiError::InvalidResponse(_) | AiError::Json(_) => {
                "Import failed: could not read the extracted tasks".to_string()
            }
        }
    }
}
