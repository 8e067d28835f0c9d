use serde_json::{Map, Value};

use crate::spec::form::FormSpec;

/// Maps accepted answers onto destination column identifiers.
///
/// Produces the field payload for the record write: one entry per
/// question that has a `field_id` and a present answer key. Questions
/// without a destination column are collected but never written.
/// Callers are expected to validate the submission first.
pub fn to_record_fields(spec: &FormSpec, answers: &Value) -> Map<String, Value> {
    let mut fields = Map::new();
    for question in &spec.questions {
        if let Some(field_id) = &question.field_id
            && let Some(value) = answers.get(&question.question_key)
        {
            fields.insert(field_id.clone(), value.clone());
        }
    }
    fields
}
