use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thiserror::Error;

use form_spec::{
    FormSpec, RenderPayload, answers_schema, build_render_payload,
    render_json_ui as spec_render_json_ui, render_text as spec_render_text, resolve_visibility,
    to_record_fields, validate_submission,
};

const DEFAULT_SPEC: &str = include_str!("../../form-spec/tests/fixtures/simple_form.json");

#[derive(Debug, Error)]
enum EngineError {
    #[error("failed to parse config/{0}")]
    ConfigParse(#[source] serde_json::Error),
    #[error("form '{0}' is not available")]
    FormUnavailable(String),
    #[error("json encode error: {0}")]
    JsonEncode(#[source] serde_json::Error),
}

#[derive(Debug, Deserialize, Serialize, Default)]
struct EngineConfig {
    #[serde(default)]
    form_spec_json: Option<String>,
}

fn load_form_spec(config_json: &str) -> Result<FormSpec, EngineError> {
    let config = if config_json.trim().is_empty() {
        EngineConfig::default()
    } else {
        serde_json::from_str(config_json).map_err(EngineError::ConfigParse)?
    };

    let spec_json = config.form_spec_json.as_deref().unwrap_or(DEFAULT_SPEC);

    serde_json::from_str(spec_json).map_err(EngineError::ConfigParse)
}

fn ensure_form(form_id: &str, config_json: &str) -> Result<FormSpec, EngineError> {
    let spec = load_form_spec(config_json)?;
    if spec.form_id != form_id {
        Err(EngineError::FormUnavailable(form_id.to_string()))
    } else {
        Ok(spec)
    }
}

fn parse_answers(answers_json: &str) -> Value {
    serde_json::from_str(answers_json).unwrap_or_else(|_| Value::Object(Map::new()))
}

fn respond(result: Result<Value, EngineError>) -> String {
    match result {
        Ok(value) => serde_json::to_string(&value).unwrap_or_else(|error| {
            json!({"error": format!("json encode: {}", error)}).to_string()
        }),
        Err(err) => json!({ "error": err.to_string() }).to_string(),
    }
}

fn respond_string(result: Result<String, EngineError>) -> String {
    match result {
        Ok(value) => value,
        Err(err) => json!({ "error": err.to_string() }).to_string(),
    }
}

/// Echo the form definition backing `form_id`.
pub fn describe(form_id: &str, config_json: &str) -> String {
    respond(
        ensure_form(form_id, config_json)
            .and_then(|spec| serde_json::to_value(spec).map_err(EngineError::JsonEncode)),
    )
}

/// JSON Schema of the answers object given the current answers.
pub fn get_answer_schema(form_id: &str, config_json: &str, answers_json: &str) -> String {
    let schema = ensure_form(form_id, config_json).map(|spec| {
        let answers = parse_answers(answers_json);
        let visibility = resolve_visibility(&spec, &answers);
        answers_schema(&spec, &visibility)
    });
    respond(schema)
}

/// Pre-submit validation, sharing the submit code path exactly.
pub fn validate_answers(form_id: &str, config_json: &str, answers_json: &str) -> String {
    let validation = ensure_form(form_id, config_json).map(|spec| {
        let answers = parse_answers(answers_json);
        match validate_submission(&spec, &answers) {
            Ok(()) => json!({ "valid": true }),
            Err(err) => json!({
                "valid": false,
                "error": err.to_string(),
                "questionKey": err.question_key(),
            }),
        }
    });
    respond(validation)
}

/// Accept a submission: validate, then map answers onto record fields.
///
/// On the first missing visible+required question the submission is
/// rejected with the same message `validate_answers` reports. The
/// returned `fields` object is the payload a record writer would send;
/// the write itself happens outside this crate.
pub fn submit(form_id: &str, config_json: &str, answers_json: &str) -> String {
    respond(ensure_form(form_id, config_json).map(|spec| {
        let answers = parse_answers(answers_json);
        match validate_submission(&spec, &answers) {
            Ok(()) => json!({
                "success": true,
                "fields": to_record_fields(&spec, &answers),
                "answers": answers,
            }),
            Err(err) => json!({
                "success": false,
                "error": err.to_string(),
                "questionKey": err.question_key(),
            }),
        }
    }))
}

fn render_payload(
    form_id: &str,
    config_json: &str,
    answers_json: &str,
) -> Result<RenderPayload, EngineError> {
    let spec = ensure_form(form_id, config_json)?;
    let answers = parse_answers(answers_json);
    Ok(build_render_payload(&spec, &answers))
}

/// Render the form as human-friendly text.
pub fn render_text(form_id: &str, config_json: &str, answers_json: &str) -> String {
    respond_string(
        render_payload(form_id, config_json, answers_json)
            .map(|payload| spec_render_text(&payload)),
    )
}

/// Render the form as a structured JSON UI payload.
pub fn render_json_ui(form_id: &str, config_json: &str, answers_json: &str) -> String {
    respond(
        render_payload(form_id, config_json, answers_json)
            .map(|payload| spec_render_json_ui(&payload)),
    )
}
