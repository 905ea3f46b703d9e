//! Normalization of raw provider replies into [`FactCheckResult`]

use super::models::{FactCheckResult, DEFAULT_CONFIDENCE};
use serde_json::{Map, Value};

/// Extract the body of a reply wrapped in a ```` ``` ```` or ```` ```json ````
/// fence. Unfenced replies are returned trimmed.
pub fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let body = match rest.find("```") {
        Some(end) => &rest[..end],
        None => rest,
    };

    body.trim()
}

/// Normalize a provider reply.
///
/// Structured replies (a JSON object, optionally fenced) have their
/// `result`, `confidence` and `sources` fields coerced; anything else is
/// wrapped verbatim with the default confidence and the provider's label.
pub fn normalize_reply(reply: &str, source_label: &str) -> FactCheckResult {
    let raw = reply.trim();

    match serde_json::from_str::<Value>(strip_code_fence(raw)) {
        Ok(Value::Object(fields)) => from_fields(&fields, raw, source_label),
        _ => FactCheckResult::new(raw, DEFAULT_CONFIDENCE, vec![source_label.to_string()]),
    }
}

fn from_fields(fields: &Map<String, Value>, raw: &str, source_label: &str) -> FactCheckResult {
    let verdict = match fields.get("result") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        None | Some(Value::Null) | Some(Value::String(_)) => raw.to_string(),
        Some(other) => other.to_string(),
    };

    let confidence = match fields.get("confidence") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .unwrap_or(DEFAULT_CONFIDENCE);

    let mut sources: Vec<String> = match fields.get("sources") {
        Some(Value::Array(items)) => items.iter().map(value_to_string).collect(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    };
    sources.retain(|s| !s.trim().is_empty());

    if sources.is_empty() {
        sources.push(source_label.to_string());
    }

    FactCheckResult::new(verdict, confidence, sources)
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
