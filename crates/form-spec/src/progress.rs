use serde_json::Value;

use crate::answers::is_answered;
use crate::spec::form::FormSpec;
use crate::visibility::VisibilityMap;

/// First visible question in form order without a usable answer.
pub fn next_question(spec: &FormSpec, answers: &Value, visibility: &VisibilityMap) -> Option<String> {
    spec.questions
        .iter()
        .filter(|question| {
            visibility
                .get(&question.question_key)
                .copied()
                .unwrap_or(true)
        })
        .find(|question| !is_answered(answers.get(&question.question_key)))
        .map(|question| question.question_key.clone())
}

/// Number of visible questions that already have an answer.
pub fn answered_count(spec: &FormSpec, answers: &Value, visibility: &VisibilityMap) -> usize {
    spec.questions
        .iter()
        .filter(|question| {
            visibility
                .get(&question.question_key)
                .copied()
                .unwrap_or(true)
        })
        .filter(|question| is_answered(answers.get(&question.question_key)))
        .count()
}
