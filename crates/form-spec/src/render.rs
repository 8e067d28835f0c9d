use serde_json::{Map, Value, json};

use crate::{
    progress::{answered_count, next_question},
    schema::answers_schema,
    spec::{form::FormSpec, question::QuestionType},
    visibility::resolve_visibility,
};

/// Status labels returned by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// More input is required.
    NeedInput,
    /// All visible questions are filled.
    Complete,
}

impl RenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStatus::NeedInput => "need_input",
            RenderStatus::Complete => "complete",
        }
    }
}

/// Progress counters exposed to renderers.
#[derive(Debug, Clone)]
pub struct RenderProgress {
    pub answered: usize,
    pub total: usize,
}

/// Describes a single question for render outputs.
#[derive(Debug, Clone)]
pub struct RenderQuestion {
    pub question_key: String,
    pub label: String,
    pub kind: QuestionType,
    pub required: bool,
    pub visible: bool,
    pub current_value: Option<Value>,
    pub options: Vec<String>,
}

/// Collected payload used by both text and JSON renderers.
#[derive(Debug, Clone)]
pub struct RenderPayload {
    pub form_id: String,
    pub form_title: String,
    pub status: RenderStatus,
    pub next_question_key: Option<String>,
    pub progress: RenderProgress,
    pub questions: Vec<RenderQuestion>,
    pub schema: Value,
}

/// Builds the renderer payload from the form definition and answers.
///
/// Visibility comes from the same resolution the validator uses, so a
/// question hidden here is exactly a question whose requirement is not
/// enforced on submit.
pub fn build_render_payload(spec: &FormSpec, answers: &Value) -> RenderPayload {
    let visibility = resolve_visibility(spec, answers);
    let next_question_key = next_question(spec, answers, &visibility);

    let answered = answered_count(spec, answers, &visibility);
    let total = visibility.values().filter(|visible| **visible).count();

    let questions = spec
        .questions
        .iter()
        .map(|question| RenderQuestion {
            question_key: question.question_key.clone(),
            label: question.label.clone(),
            kind: question.kind,
            required: question.required,
            visible: visibility
                .get(&question.question_key)
                .copied()
                .unwrap_or(true),
            current_value: answers.get(&question.question_key).cloned(),
            options: question.options.clone(),
        })
        .collect::<Vec<_>>();

    let schema = answers_schema(spec, &visibility);

    let status = if next_question_key.is_some() {
        RenderStatus::NeedInput
    } else {
        RenderStatus::Complete
    };

    RenderPayload {
        form_id: spec.form_id.clone(),
        form_title: spec.title.clone(),
        status,
        next_question_key,
        progress: RenderProgress { answered, total },
        questions,
        schema,
    }
}

/// Render the payload as a structured JSON-friendly value.
pub fn render_json_ui(payload: &RenderPayload) -> Value {
    let questions = payload
        .questions
        .iter()
        .map(|question| {
            let mut map = Map::new();
            map.insert(
                "questionKey".into(),
                Value::String(question.question_key.clone()),
            );
            map.insert("label".into(), Value::String(question.label.clone()));
            map.insert(
                "type".into(),
                Value::String(question.kind.as_str().to_string()),
            );
            map.insert("required".into(), Value::Bool(question.required));
            map.insert("visible".into(), Value::Bool(question.visible));
            if let Some(current_value) = &question.current_value {
                map.insert("currentValue".into(), current_value.clone());
            }
            if !question.options.is_empty() {
                map.insert(
                    "options".into(),
                    Value::Array(
                        question
                            .options
                            .iter()
                            .map(|option| Value::String(option.clone()))
                            .collect(),
                    ),
                );
            }
            Value::Object(map)
        })
        .collect::<Vec<_>>();

    json!({
        "formId": payload.form_id,
        "formTitle": payload.form_title,
        "status": payload.status.as_str(),
        "nextQuestionKey": payload.next_question_key,
        "progress": {
            "answered": payload.progress.answered,
            "total": payload.progress.total,
        },
        "questions": questions,
        "schema": payload.schema,
    })
}

/// Render the payload as human-friendly text.
pub fn render_text(payload: &RenderPayload) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Form: {} ({})", payload.form_title, payload.form_id));
    lines.push(format!(
        "Status: {} ({}/{})",
        payload.status.as_str(),
        payload.progress.answered,
        payload.progress.total
    ));

    if let Some(next_key) = &payload.next_question_key {
        lines.push(format!("Next question: {}", next_key));
        if let Some(question) = payload
            .questions
            .iter()
            .find(|question| &question.question_key == next_key)
        {
            lines.push(format!("  Label: {}", question.label));
            if question.required {
                lines.push("  Required: yes".to_string());
            }
            if !question.options.is_empty() {
                lines.push(format!("  Options: {}", question.options.join(", ")));
            }
        }
    } else {
        lines.push("All visible questions are answered.".to_string());
    }

    lines.push("Visible questions:".to_string());
    for question in payload.questions.iter().filter(|question| question.visible) {
        let mut entry = format!(" - {} ({})", question.question_key, question.label);
        if question.required {
            entry.push_str(" [required]");
        }
        if let Some(current_value) = &question.current_value {
            entry.push_str(&format!(" = {}", value_to_display(current_value)));
        }
        lines.push(entry);
    }

    lines.join("\n")
}

fn value_to_display(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_to_display)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
