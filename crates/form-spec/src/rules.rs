use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How the conditions of a [`RuleSet`] are combined.
///
/// Unknown wire values land on [`RuleLogic::Other`] instead of failing
/// deserialization; evaluation treats them as "always visible".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum RuleLogic {
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
    #[serde(other, rename = "other")]
    Other,
}

/// Comparison applied by a single [`Condition`].
///
/// Unknown wire values land on [`ConditionOperator::Other`] and always
/// evaluate to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    Contains,
    #[serde(other)]
    Other,
}

/// A single visibility condition referencing another question's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Key of the referenced question. Expected to appear earlier in
    /// form order; a key with no answer never satisfies the condition.
    pub question_key: String,
    pub operator: ConditionOperator,
    pub value: String,
}

impl Condition {
    /// Evaluates this condition against the answers collected so far.
    ///
    /// An absent or null answer yields `false` for every operator.
    /// `equals`/`notEquals` compare the answer as a string; an answer
    /// of any other shape is never equal to the condition value.
    /// `contains` is a case-insensitive substring test on string
    /// answers and an exact element-membership test on array answers.
    pub fn evaluate(&self, answers: &Value) -> bool {
        let Some(answer) = answers.get(&self.question_key) else {
            return false;
        };
        if answer.is_null() {
            return false;
        }

        match self.operator {
            ConditionOperator::Equals => answer.as_str() == Some(self.value.as_str()),
            ConditionOperator::NotEquals => answer.as_str() != Some(self.value.as_str()),
            ConditionOperator::Contains => match answer {
                Value::String(text) => text
                    .to_lowercase()
                    .contains(&self.value.to_lowercase()),
                Value::Array(items) => items
                    .iter()
                    .any(|item| item.as_str() == Some(self.value.as_str())),
                _ => false,
            },
            ConditionOperator::Other => false,
        }
    }
}

/// Conditional-visibility rules attached to a question.
///
/// Lives embedded in its owning question and is immutable for a given
/// form version. An empty condition list means "always visible".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuleSet {
    pub logic: RuleLogic,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl RuleSet {
    /// Evaluates all conditions and combines them with the rule logic.
    ///
    /// Conditions are independent of each other; order never changes
    /// the outcome. Unrecognized logic falls back to visible.
    pub fn evaluate(&self, answers: &Value) -> bool {
        if self.conditions.is_empty() {
            return true;
        }
        match self.logic {
            RuleLogic::And => self
                .conditions
                .iter()
                .all(|condition| condition.evaluate(answers)),
            RuleLogic::Or => self
                .conditions
                .iter()
                .any(|condition| condition.evaluate(answers)),
            RuleLogic::Other => true,
        }
    }
}
