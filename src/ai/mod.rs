//! Insight and extraction adapters over a generative text service.
//!
//! Insights never fail past this boundary (fixed fallback text instead);
//! extraction errors are returned to the caller, which leaves the store untouched.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use tracing::{debug, warn};

mod client;
mod error;
mod gemini;
pub mod worker;

#[cfg(test)]
pub use client::mock;
pub use client::{GenerateRequest, Part, TextService};
pub use error::AiError;
pub use gemini::{AiConfig, GeminiClient};
pub use worker::{AiRequest, AiResponse, AiWorker};

use crate::domain::{Activity, ExtractedActivity};

/// Shown before any activity exists
pub const EMPTY_LIST_INSIGHT: &str =
    "Add your tasks to get started. I can help you organize your flow once you've listed a few items.";

/// Shown when the service answers with nothing
pub const EMPTY_RESPONSE_INSIGHT: &str =
    "Focus on the first task. Take a short 2-minute stretch between transitions. You are ready to begin.";

/// Shown when the service call fails
pub const FAILED_INSIGHT: &str =
    "Check your first task and ensure your workspace is ready. Take small breaks to stay fresh.";

const INSIGHT_SYSTEM_INSTRUCTION: &str = "You are a practical executive functioning coach. \
Your advice is brief, concrete, and supportive. Use simple language. No metaphors. \
No storytelling. No markdown formatting. Max 4 sentences.";

const EXTRACTION_PROMPT: &str = "Extract all tasks, assignments, or activities from this document or image. \
For each task, provide a descriptive name and an estimated duration in minutes. \
If no duration is mentioned, assign a reasonable estimate (e.g., 15, 30, or 45 minutes) based on the task type. \
Return the data as a clean JSON array.";

fn insight_prompt(activities: &[Activity]) -> String {
    let schedule = activities
        .iter()
        .map(|a| format!("{} ({}m)", a.name, a.duration))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Look at this schedule: {}. \
Provide 3-4 very short, concrete, and actionable sentences of advice. \
Focus on 1-2 practical suggestions for focus. \
Avoid metaphors, storytelling, or emotional build-up. \
Speak in a calm, encouraging, and highly practical tone. \
Ensure it can be read in under 10 seconds. \
No markdown, no bolding, no symbols.",
        schedule
    )
}

/// Structured-output schema for extraction: an array of `{name, duration}`
fn extraction_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": {"type": "STRING"},
                "duration": {"type": "INTEGER"}
            },
            "required": ["name", "duration"]
        }
    })
}

/// Short practical advice for the given schedule; never fails
pub fn smart_insights(service: &dyn TextService, activities: &[Activity]) -> String {
    if activities.is_empty() {
        return EMPTY_LIST_INSIGHT.to_string();
    }

    let request = GenerateRequest {
        system_instruction: Some(INSIGHT_SYSTEM_INSTRUCTION.to_string()),
        temperature: Some(0.5),
        ..GenerateRequest::text(insight_prompt(activities))
    };

    match service.generate(&request) {
        Ok(Some(text)) => {
            let cleaned = text.replace('*', "").trim().to_string();
            if cleaned.is_empty() {
                EMPTY_RESPONSE_INSIGHT.to_string()
            } else {
                cleaned
            }
        }
        Ok(None) => EMPTY_RESPONSE_INSIGHT.to_string(),
        Err(e) => {
            warn!(error = %e, "insights: service failed, using fallback");
            FAILED_INSIGHT.to_string()
        }
    }
}

/// Extract `(name, duration)` records from a document or image
pub fn extract_activities(
    service: &dyn TextService,
    bytes: &[u8],
    mime_type: &str,
) -> Result<Vec<ExtractedActivity>, AiError> {
    debug!(len = bytes.len(), mime_type, "extract: called");

    let request = GenerateRequest {
        parts: vec![
            Part::InlineData {
                mime_type: mime_type.to_string(),
                data: STANDARD.encode(bytes),
            },
            Part::Text(EXTRACTION_PROMPT.to_string()),
        ],
        response_mime_type: Some("application/json".to_string()),
        response_schema: Some(extraction_schema()),
        ..GenerateRequest::default()
    };

    match service.generate(&request)? {
        Some(text) => parse_extracted(&text),
        None => Ok(Vec::new()),
    }
}

/// Parse the service's JSON array, tolerating code fences and fractional durations
pub fn parse_extracted(text: &str) -> Result<Vec<ExtractedActivity>, AiError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    if body.is_empty() {
        return Ok(Vec::new());
    }

    let items: Vec<Value> = serde_json::from_str(body)?;
    items
        .into_iter()
        .map(|item| {
            let name = item
                .get("name")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .ok_or_else(|| AiError::InvalidResponse(format!("task without a name: {}", item)))?;
            let duration = item
                .get("duration")
                .and_then(|d| d.as_i64().or_else(|| d.as_f64().map(|f| f.round() as i64)))
                .ok_or_else(|| AiError::InvalidResponse(format!("task without a duration: {}", item)))?;

            Ok(ExtractedActivity {
                name: name.to_string(),
                duration,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::mock::MockTextService;
    use super::*;
    use pretty_assertions::assert_eq;

    fn schedule() -> Vec<Activity> {
        vec![
            Activity::new("Essay", 45, "#6366f1"),
            Activity::new("Break", 5, "#10b981"),
        ]
    }

    #[test]
    fn test_insights_for_empty_list_skip_the_service() {
        let service = MockTextService::replying("unused");
        assert_eq!(smart_insights(&service, &[]), EMPTY_LIST_INSIGHT);
        assert_eq!(service.request_count(), 0);
    }

    #[test]
    fn test_insights_strip_asterisks_and_send_schedule() {
        let service = MockTextService::replying("**Start** with the essay. Stretch at the break.");
        let text = smart_insights(&service, &schedule());
        assert_eq!(text, "Start with the essay. Stretch at the break.");

        let request = service.last_request().unwrap();
        assert_eq!(request.temperature, Some(0.5));
        assert!(request.system_instruction.is_some());
        match &request.parts[0] {
            Part::Text(prompt) => assert!(prompt.contains("Essay (45m), Break (5m)")),
            other => panic!("unexpected part: {:?}", other),
        }
    }

    #[test]
    fn test_insights_empty_response_fallback() {
        let service = MockTextService::new(vec![Ok(None)]);
        assert_eq!(smart_insights(&service, &schedule()), EMPTY_RESPONSE_INSIGHT);

        let only_stars = MockTextService::replying("***");
        assert_eq!(smart_insights(&only_stars, &schedule()), EMPTY_RESPONSE_INSIGHT);
    }

    #[test]
    fn test_insights_swallow_errors() {
        let service = MockTextService::failing(AiError::MissingApiKey);
        assert_eq!(smart_insights(&service, &schedule()), FAILED_INSIGHT);
    }

    #[test]
    fn test_extract_sends_inline_payload() {
        let service = MockTextService::replying(r#"[{"name":"Read chapter 3","duration":30}]"#);
        let records = extract_activities(&service, b"hello", "application/pdf").unwrap();
        assert_eq!(
            records,
            vec![ExtractedActivity {
                name: "Read chapter 3".to_string(),
                duration: 30,
            }]
        );

        let request = service.last_request().unwrap();
        assert_eq!(
            request.parts[0],
            Part::InlineData {
                mime_type: "application/pdf".to_string(),
                data: "aGVsbG8=".to_string(),
            }
        );
        assert_eq!(request.response_mime_type.as_deref(), Some("application/json"));
        assert_eq!(request.response_schema.unwrap()["items"]["required"][1], "duration");
    }

    #[test]
    fn test_extract_empty_response_is_empty_list() {
        let service = MockTextService::new(vec![Ok(None)]);
        assert!(extract_activities(&service, b"x", "image/png").unwrap().is_empty());
    }

    #[test]
    fn test_extract_propagates_errors() {
        let service = MockTextService::failing(AiError::ApiError {
            status: 500,
            message: "boom".to_string(),
        });
        let err = extract_activities(&service, b"x", "image/png").unwrap_err();
        assert!(matches!(err, AiError::ApiError { status: 500, .. }));
    }

    #[test]
    fn test_parse_extracted_tolerates_fences_and_floats() {
        let text = "```json\n[{\"name\":\" Lab report \",\"duration\":29.6}]\n```";
        let records = parse_extracted(text).unwrap();
        assert_eq!(records[0].name, "Lab report");
        assert_eq!(records[0].duration, 30);
    }

    #[test]
    fn test_parse_extracted_rejects_bad_shapes() {
        assert!(matches!(parse_extracted("{\"name\":\"x\"}"), Err(AiError::Json(_))));
        assert!(matches!(
            parse_extracted("[{\"duration\":5}]"),
            Err(AiError::InvalidResponse(_))
        ));
        assert!(parse_extracted("  ").unwrap().is_empty());
    }
}
