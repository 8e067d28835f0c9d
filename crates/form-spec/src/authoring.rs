use std::collections::HashSet;

use regex::Regex;
use serde::Serialize;

use crate::rules::{ConditionOperator, RuleLogic};
use crate::spec::form::FormSpec;

const KEY_PATTERN: &str = "^[A-Za-z][A-Za-z0-9_]*$";

/// Machine-readable lint categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LintCode {
    DuplicateKey,
    MalformedKey,
    EmptyConditionKey,
    UnknownConditionKey,
    SelfReference,
    ForwardReference,
    UnknownOperator,
    UnknownLogic,
}

/// A single finding from the authoring lint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LintIssue {
    pub question_key: String,
    pub code: LintCode,
    pub message: String,
}

impl LintIssue {
    fn new(question_key: &str, code: LintCode, message: impl Into<String>) -> Self {
        Self {
            question_key: question_key.to_string(),
            code,
            message: message.into(),
        }
    }
}

/// Checks a form definition for authoring mistakes in keys and rules.
///
/// The evaluator itself never errors, so every problem a rule can have
/// is surfaced here, at form-authoring time: duplicate or malformed
/// question keys, conditions referencing unknown keys, self or forward
/// references, and operator/logic values that fell into the catch-all
/// variants. Self and forward references are findings rather than hard
/// errors; at runtime the evaluator still consults raw answers only.
pub fn lint(spec: &FormSpec) -> Vec<LintIssue> {
    let mut issues = Vec::new();
    let key_format = Regex::new(KEY_PATTERN).ok();

    let mut seen: HashSet<&str> = HashSet::new();
    for question in &spec.questions {
        let key = question.question_key.as_str();
        if !seen.insert(key) {
            issues.push(LintIssue::new(
                key,
                LintCode::DuplicateKey,
                format!("question key '{key}' is used more than once"),
            ));
        }
        if let Some(format) = &key_format
            && !format.is_match(key)
        {
            issues.push(LintIssue::new(
                key,
                LintCode::MalformedKey,
                format!("question key '{key}' does not match {KEY_PATTERN}"),
            ));
        }
    }

    for (position, question) in spec.questions.iter().enumerate() {
        let Some(rules) = &question.conditional_rules else {
            continue;
        };
        let key = question.question_key.as_str();

        if rules.logic == RuleLogic::Other {
            issues.push(LintIssue::new(
                key,
                LintCode::UnknownLogic,
                "rule logic is not AND or OR; the question is always shown",
            ));
        }

        for condition in &rules.conditions {
            let target = condition.question_key.as_str();
            if target.is_empty() {
                issues.push(LintIssue::new(
                    key,
                    LintCode::EmptyConditionKey,
                    "condition has an empty question key",
                ));
                continue;
            }
            if target == key {
                issues.push(LintIssue::new(
                    key,
                    LintCode::SelfReference,
                    format!("condition references its own question '{target}'"),
                ));
                continue;
            }
            match spec
                .questions
                .iter()
                .position(|other| other.question_key == target)
            {
                None => issues.push(LintIssue::new(
                    key,
                    LintCode::UnknownConditionKey,
                    format!("condition references unknown question '{target}'"),
                )),
                Some(target_position) if target_position > position => {
                    issues.push(LintIssue::new(
                        key,
                        LintCode::ForwardReference,
                        format!("condition references later question '{target}'"),
                    ));
                }
                Some(_) => {}
            }
            if condition.operator == ConditionOperator::Other {
                issues.push(LintIssue::new(
                    key,
                    LintCode::UnknownOperator,
                    "condition operator is unrecognized and never matches",
                ));
            }
        }
    }

    issues
}

/// Canonicalizes a form definition.
///
/// Rule sets without conditions behave as "always visible"; normalize
/// drops them so the stored document has a single representation.
pub fn normalize(spec: &FormSpec) -> FormSpec {
    let mut normalized = spec.clone();
    for question in &mut normalized.questions {
        if let Some(rules) = &question.conditional_rules
            && rules.conditions.is_empty()
        {
            question.conditional_rules = None;
        }
    }
    normalized
}
