use crate::utils::error::{PlannerError, Result};
use serde_json::{Map, Value};

/// 去掉模型常包在回覆外層的 Markdown code fence
fn strip_markdown_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let clean = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let clean = clean.strip_suffix("```").unwrap_or(clean);
    clean.trim()
}

/// Parses the service reply into a JSON object. Anything that is not an
/// object is reported as `MalformedResponse` so the caller can fall back.
pub fn parse_candidate(text: &str) -> Result<Map<String, Value>> {
    let clean = strip_markdown_fences(text);

    match serde_json::from_str::<Value>(clean) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(PlannerError::MalformedResponse {
            message: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
        Err(e) => Err(PlannerError::MalformedResponse {
            message: e.to_string(),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
