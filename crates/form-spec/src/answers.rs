use serde_json::Value;

/// Whether an answer value counts as present for required-field checks.
///
/// Absent keys, nulls, and empty strings are missing. Arrays count as
/// answered even when empty, matching the original submission handler.
pub fn is_answered(answer: Option<&Value>) -> bool {
    match answer {
        None | Some(Value::Null) => false,
        Some(Value::String(text)) => !text.is_empty(),
        Some(_) => true,
    }
}
