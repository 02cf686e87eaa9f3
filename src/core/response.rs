use crate::core::text::truncate_chars;
use crate::domain::model::Mcq;
use crate::utils::error::{McqError, Result, UNKNOWN_API_ERROR};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// How much of an offending payload is quoted back in error messages.
pub const SNIPPET_CHARS: usize = 200;

static JSON_ARRAY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\[.*\]").unwrap());

/// Builds the error for a non-success status from whatever body came back.
pub fn api_error(status: u16, body: &str) -> McqError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .or_else(|| {
            let snippet = truncate_chars(body, SNIPPET_CHARS);
            (!snippet.trim().is_empty()).then(|| snippet.to_string())
        })
        .unwrap_or_else(|| UNKNOWN_API_ERROR.to_string());

    McqError::Api { status, message }
}

/// `candidates[0].content.parts[0].text`
pub fn candidate_text(envelope: &Value) -> Result<&str> {
    envelope
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(Value::as_str)
        .ok_or(McqError::EmptyResponse)
}

/// Parses the model's text into questions, ignoring anything outside the outermost `[...]`.
pub fn parse_questions(payload: &str) -> Result<Vec<Mcq>> {
    let json_str = JSON_ARRAY
        .find(payload)
        .map(|m| m.as_str())
        .unwrap_or(payload);

    serde_json::from_str::<Vec<Mcq>>(json_str).map_err(|e| McqError::ResponseParse {
        reason: e.to_string(),
        snippet: truncate_chars(json_str, SNIPPET_CHARS).to_string(),
    })
}

/// Full success path: raw body text to questions.
pub fn questions_from_body(body: &str) -> Result<Vec<Mcq>> {
    let envelope: Value = serde_json::from_str(body).map_err(|e| McqError::ResponseParse {
        reason: e.to_string(),
        snippet: truncate_chars(body, SNIPPET_CHARS).to_string(),
    })?;
    parse_questions(candidate_text(&envelope)?)
}
