//! TextService trait and request types

use super::AiError;
use serde_json::Value;

/// One part of a request: plain text or an inline binary payload
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(String),
    /// Base64-encoded bytes with their media type
    InlineData { mime_type: String, data: String },
}

/// A single, stateless generation request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateRequest {
    pub system_instruction: Option<String>,
    pub parts: Vec<Part>,
    pub temperature: Option<f32>,
    /// e.g. `application/json` to ask for structured output
    pub response_mime_type: Option<String>,
    pub response_schema: Option<Value>,
}

impl GenerateRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::Text(prompt.into())],
            ..Self::default()
        }
    }
}

/// A generative text service; each call is independent
pub trait TextService: Send + Sync {
    /// Run one request, returning the generated text (`None` when the service produced nothing)
    fn generate(&self, request: &GenerateRequest) -> Result<Option<String>, AiError>;
}
