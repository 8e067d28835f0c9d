use serde_json::{Map, Value, json};

use crate::spec::form::FormSpec;
use crate::spec::question::{QuestionSpec, QuestionType};
use crate::visibility::VisibilityMap;

/// Generates a JSON Schema for the answers object of a form.
///
/// Hidden questions are left out entirely; `required` lists the
/// visible required questions, so the schema tracks the same
/// visibility the validator enforces.
pub fn answers_schema(spec: &FormSpec, visibility: &VisibilityMap) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for question in &spec.questions {
        if !visibility
            .get(&question.question_key)
            .copied()
            .unwrap_or(true)
        {
            continue;
        }
        properties.insert(question.question_key.clone(), question_schema(question));
        if question.required {
            required.push(Value::String(question.question_key.clone()));
        }
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

fn question_schema(question: &QuestionSpec) -> Value {
    match question.kind {
        QuestionType::SingleLineText | QuestionType::MultilineText => {
            json!({ "type": "string", "title": question.label })
        }
        QuestionType::SingleSelect => {
            json!({ "type": "string", "title": question.label, "enum": question.options })
        }
        QuestionType::MultipleSelect => json!({
            "type": "array",
            "title": question.label,
            "items": { "type": "string", "enum": question.options },
        }),
        QuestionType::Attachment => {
            json!({ "type": "string", "title": question.label, "description": "file name" })
        }
    }
}

/// JSON Schema of the form definition itself (for authoring tooling).
pub fn form_schema() -> Value {
    serde_json::to_value(schemars::schema_for!(FormSpec)).unwrap_or_default()
}
