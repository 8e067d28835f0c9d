use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::rules::RuleSet;

/// Input kinds supported by the form surface.
///
/// Wire names follow the stored document format (camelCase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum QuestionType {
    SingleLineText,
    MultilineText,
    SingleSelect,
    MultipleSelect,
    Attachment,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::SingleLineText => "singleLineText",
            QuestionType::MultilineText => "multilineText",
            QuestionType::SingleSelect => "singleSelect",
            QuestionType::MultipleSelect => "multipleSelect",
            QuestionType::Attachment => "attachment",
        }
    }
}

/// A single question in a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSpec {
    /// Key the answer is stored under; unique within a form.
    pub question_key: String,
    /// Destination column identifier, if the form writes to a table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_id: Option<String>,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default)]
    pub required: bool,
    /// Choices for select kinds, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_rules: Option<RuleSet>,
}
