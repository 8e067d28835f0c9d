#![allow(missing_docs)]

pub mod answers;
pub mod authoring;
pub mod progress;
pub mod record;
pub mod render;
pub mod rules;
pub mod schema;
pub mod spec;
pub mod validate;
pub mod visibility;

pub use answers::is_answered;
pub use authoring::{LintCode, LintIssue, lint, normalize};
pub use progress::{answered_count, next_question};
pub use record::to_record_fields;
pub use render::{
    RenderPayload, RenderProgress, RenderQuestion, RenderStatus, build_render_payload,
    render_json_ui, render_text,
};
pub use rules::{Condition, ConditionOperator, RuleLogic, RuleSet};
pub use schema::{answers_schema, form_schema};
pub use spec::{FormSpec, QuestionSpec, QuestionType};
pub use validate::{SubmissionError, validate_submission};
pub use visibility::{VisibilityMap, resolve_visibility, should_show};
