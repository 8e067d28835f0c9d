use serde_json::Value;

use crate::rules::RuleSet;
use crate::spec::form::FormSpec;

pub type VisibilityMap = std::collections::BTreeMap<String, bool>;

/// Decides whether a question with the given rules is currently shown.
///
/// Absent rules and rules without conditions mean "always visible".
/// Only the raw answer values are consulted; a condition referencing a
/// question that is itself hidden (or missing entirely) simply sees no
/// answer. No recursion into other questions' visibility takes place,
/// so cyclic references cannot loop.
pub fn should_show(rules: Option<&RuleSet>, answers: &Value) -> bool {
    match rules {
        Some(rules) => rules.evaluate(answers),
        None => true,
    }
}

/// Computes the visibility flag for every question in form order.
pub fn resolve_visibility(spec: &FormSpec, answers: &Value) -> VisibilityMap {
    let mut map = VisibilityMap::new();
    for question in &spec.questions {
        map.insert(
            question.question_key.clone(),
            should_show(question.conditional_rules.as_ref(), answers),
        );
    }
    map
}
