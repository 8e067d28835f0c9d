use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::question::QuestionSpec;

/// Top-level form definition.
///
/// Mirrors the stored form document: identity, an optional destination
/// table, and questions in presentation order. Question order matters:
/// conditional rules are expected to reference earlier questions, and
/// submission validation reports the first violation in this order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormSpec {
    pub form_id: String,
    pub title: String,
    /// Destination base the collected records are written to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_id: Option<String>,
    /// Destination table within the base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    pub questions: Vec<QuestionSpec>,
}

impl FormSpec {
    /// Looks up a question by its answer key.
    pub fn question(&self, question_key: &str) -> Option<&QuestionSpec> {
        self.questions
            .iter()
            .find(|question| question.question_key == question_key)
    }
}
