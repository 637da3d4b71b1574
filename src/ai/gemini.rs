//! Gemini `generateContent` REST client
//!
//! Implements TextService over the blocking reqwest client; it is only ever
//! called from the AI worker thread or from one-shot CLI commands.

use super::{AiError, GenerateRequest, Part, TextService};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Connection settings, read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl AiConfig {
    /// `GEMINI_API_KEY` (or `API_KEY`), `FOCUSFLOW_MODEL`, `FOCUSFLOW_AI_BASE_URL`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            api_key: non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")),
            model: non_empty("FOCUSFLOW_MODEL").unwrap_or(defaults.model),
            base_url: non_empty("FOCUSFLOW_AI_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            timeout_ms: defaults.timeout_ms,
        }
    }
}

// Wire types (camelCase per the REST API)

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest<'a> {
    contents: Vec<WireContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<WireGenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct WireContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<WirePart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum WirePart<'a> {
    Text {
        text: &'a str,
    },
    #[serde(rename_all = "camelCase")]
    Inline {
        inline_data: WireInlineData<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireInlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a Value>,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Debug, Deserialize)]
struct WireCandidate {
    content: Option<WireCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct WireCandidateContent {
    #[serde(default)]
    parts: Vec<WireResponsePart>,
}

#[derive(Debug, Deserialize)]
struct WireResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireErrorBody {
    error: WireErrorDetail,
}

#[derive(Debug, Deserialize)]
struct WireErrorDetail {
    message: String,
}

fn build_body(request: &GenerateRequest) -> WireRequest<'_> {
    let parts = request
        .parts
        .iter()
        .map(|part| match part {
            Part::Text(text) => WirePart::Text { text },
            Part::InlineData { mime_type, data } => WirePart::Inline {
                inline_data: WireInlineData { mime_type, data },
            },
        })
        .collect();

    let generation_config = if request.temperature.is_some()
        || request.response_mime_type.is_some()
        || request.response_schema.is_some()
    {
        Some(WireGenerationConfig {
            temperature: request.temperature,
            response_mime_type: request.response_mime_type.as_deref(),
            response_schema: request.response_schema.as_ref(),
        })
    } else {
        None
    };

    WireRequest {
        contents: vec![WireContent {
            role: Some("user"),
            parts,
        }],
        system_instruction: request.system_instruction.as_deref().map(|text| WireContent {
            role: None,
            parts: vec![WirePart::Text { text }],
        }),
        generation_config,
    }
}

/// Concatenate the text parts of the first candidate
fn extract_text(response: WireResponse) -> Option<String> {
    let text: String = response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Gemini API client
pub struct GeminiClient {
    config: AiConfig,
    http: Client,
}

impl GeminiClient {
    pub fn from_config(config: AiConfig) -> Result<Self, AiError> {
        debug!(model = %config.model, base_url = %config.base_url, "gemini: creating client");
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self { config, http })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.config.base_url, self.config.model)
    }
}

impl TextService for GeminiClient {
    fn generate(&self, request: &GenerateRequest) -> Result<Option<String>, AiError> {
        let api_key = self.config.api_key.as_deref().ok_or(AiError::MissingApiKey)?;
        let body = build_body(request);

        debug!(model = %self.config.model, parts = request.parts.len(), "gemini: generateContent");
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout(Duration::from_millis(self.config.timeout_ms))
                } else {
                    AiError::Network(e)
                }
            })?;

        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            let message = serde_json::from_str::<WireErrorBody>(&text)
                .map(|b| b.error.message)
                .unwrap_or(text);
            warn!(status = status.as_u16(), %message, "gemini: request failed");
            return Err(AiError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: WireResponse = serde_json::from_str(&text)?;
        Ok(extract_text(parsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_config_from_lookup() {
        let config = AiConfig::from_lookup(|key| match key {
            "API_KEY" => Some("fallback-key".to_string()),
            "FOCUSFLOW_MODEL" => Some("gemini-lite".to_string()),
            "FOCUSFLOW_AI_BASE_URL" => Some("http://localhost:8080/".to_string()),
            _ => None,
        });
        assert_eq!(config.api_key.as_deref(), Some("fallback-key"));
        assert_eq!(config.model, "gemini-lite");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_config_prefers_gemini_key_and_ignores_blank() {
        let config = AiConfig::from_lookup(|key| match key {
            "GEMINI_API_KEY" => Some("primary".to_string()),
            "API_KEY" => Some("secondary".to_string()),
            "FOCUSFLOW_MODEL" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.api_key.as_deref(), Some("primary"));
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_missing_key_fails_before_network() {
        let client = GeminiClient::from_config(AiConfig::default()).unwrap();
        let err = client.generate(&GenerateRequest::text("hi")).unwrap_err();
        assert!(matches!(err, AiError::MissingApiKey));
    }

    #[test]
    fn test_build_body_text_only() {
        let mut request = GenerateRequest::text("Plan my day");
        request.system_instruction = Some("Be brief".to_string());
        request.temperature = Some(0.5);

        let body = serde_json::to_value(build_body(&request)).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{"role": "user", "parts": [{"text": "Plan my day"}]}],
                "systemInstruction": {"parts": [{"text": "Be brief"}]},
                "generationConfig": {"temperature": 0.5}
            })
        );
    }

    #[test]
    fn test_build_body_inline_data_and_schema() {
        let schema = json!({"type": "ARRAY"});
        let request = GenerateRequest {
            parts: vec![
                Part::InlineData {
                    mime_type: "image/png".to_string(),
                    data: "aGVsbG8=".to_string(),
                },
                Part::Text("Extract".to_string()),
            ],
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema),
            ..GenerateRequest::default()
        };

        let body = serde_json::to_value(build_body(&request)).unwrap();
        assert_eq!(
            body["contents"][0]["parts"][0],
            json!({"inlineData": {"mimeType": "image/png", "data": "aGVsbG8="}})
        );
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "ARRAY");
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: WireResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "Hello "}, {"text": "there."}]}}]
        }))
        .unwrap();
        assert_eq!(extract_text(response), Some("Hello there.".to_string()));
    }

    #[test]
    fn test_extract_text_empty_candidates() {
        let response: WireResponse = serde_json::from_value(json!({"candidates": []})).unwrap();
        assert_eq!(extract_text(response), None);

        let blank: WireResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "  "}]}}]
        }))
        .unwrap();
        assert_eq!(extract_text(blank), None);
    }
}
