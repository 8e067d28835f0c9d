use serde_json::Value;
use thiserror::Error;

use crate::answers::is_answered;
use crate::spec::form::FormSpec;
use crate::visibility::should_show;

/// Rejection raised by submission validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Required field \"{label}\" is missing")]
    MissingRequired { question_key: String, label: String },
}

impl SubmissionError {
    pub fn question_key(&self) -> &str {
        match self {
            SubmissionError::MissingRequired { question_key, .. } => question_key,
        }
    }
}

/// Validates a submission against the form's required questions.
///
/// Walks questions in form order and rejects on the first required
/// question that is currently visible but has no answer. Hidden
/// required questions are skipped; their requirement is only enforced
/// while the question is shown. The rendering surface must use the
/// same visibility decision so both sides accept the same submissions.
pub fn validate_submission(spec: &FormSpec, answers: &Value) -> Result<(), SubmissionError> {
    for question in spec.questions.iter().filter(|question| question.required) {
        if !should_show(question.conditional_rules.as_ref(), answers) {
            continue;
        }
        if !is_answered(answers.get(&question.question_key)) {
            return Err(SubmissionError::MissingRequired {
                question_key: question.question_key.clone(),
                label: question.label.clone(),
            });
        }
    }
    Ok(())
}
