use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a JSON array produced by a language model.
///
/// Never fails: text that is not a JSON array yields an empty list, and array
/// items that do not fit `T` are dropped. Both cases are logged as `malformed`.
pub fn decode_list<T: DeserializeOwned>(text: &str, what: &str) -> Vec<T> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Vec::new();
    }

    let items = match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(items)) => items,
        Ok(other) => {
            tracing::warn!(kind = "malformed", what, found = json_kind(&other), "expected a JSON array");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(kind = "malformed", what, error = %e, "response is not valid JSON");
            return Vec::new();
        }
    };

    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| match serde_json::from_value::<T>(item) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(kind = "malformed", what, index = idx, error = %e, "skipping item");
                None
            }
        })
        .collect();

    if decoded.len() != total {
        tracing::debug!(what, kept = decoded.len(), total, "partially decoded list");
    }
    decoded
}

/// Models sometimes wrap JSON in a Markdown fence even when asked not to.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line.
    let rest = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
