use serde_json::json;

use form_spec::{Condition, ConditionOperator, RuleLogic, RuleSet, should_show};

fn condition(question_key: &str, operator: ConditionOperator, value: &str) -> Condition {
    Condition {
        question_key: question_key.into(),
        operator,
        value: value.into(),
    }
}

fn rule_set(logic: RuleLogic, conditions: Vec<Condition>) -> RuleSet {
    RuleSet { logic, conditions }
}

#[test]
fn absent_rules_are_always_visible() {
    assert!(should_show(None, &json!({})));
    assert!(should_show(None, &json!({ "q1": "anything" })));
}

#[test]
fn empty_condition_list_is_always_visible() {
    let rules = rule_set(RuleLogic::And, vec![]);
    assert!(should_show(Some(&rules), &json!({})));
    let rules = rule_set(RuleLogic::Or, vec![]);
    assert!(should_show(Some(&rules), &json!({ "q1": "no" })));
}

#[test]
fn unanswered_reference_fails_for_every_operator() {
    for operator in [
        ConditionOperator::Equals,
        ConditionOperator::NotEquals,
        ConditionOperator::Contains,
    ] {
        let cond = condition("q1", operator, "yes");
        assert!(!cond.evaluate(&json!({})), "operator {operator:?}");
        assert!(!cond.evaluate(&json!({ "q1": null })), "operator {operator:?}");
    }
}

#[test]
fn equals_and_not_equals_are_complements() {
    let cases = [
        (json!({ "q1": "yes" }), "yes"),
        (json!({ "q1": "yes" }), "no"),
        (json!({ "q1": "Yes" }), "yes"),
        (json!({ "q1": ["yes"] }), "yes"),
    ];
    for (answers, value) in cases {
        let eq = condition("q1", ConditionOperator::Equals, value).evaluate(&answers);
        let ne = condition("q1", ConditionOperator::NotEquals, value).evaluate(&answers);
        assert_ne!(eq, ne, "answers={answers} value={value}");
    }
}

#[test]
fn equals_requires_exact_string_match() {
    let cond = condition("q1", ConditionOperator::Equals, "yes");
    assert!(cond.evaluate(&json!({ "q1": "yes" })));
    assert!(!cond.evaluate(&json!({ "q1": "Yes" })));
    assert!(!cond.evaluate(&json!({ "q1": ["yes"] })));
}

#[test]
fn contains_on_string_is_case_insensitive_substring() {
    let cond = condition("q1", ConditionOperator::Contains, "hello");
    assert!(cond.evaluate(&json!({ "q1": "Hello World" })));
    assert!(cond.evaluate(&json!({ "q1": "say HELLO twice" })));
    assert!(!cond.evaluate(&json!({ "q1": "goodbye" })));
}

#[test]
fn contains_on_array_is_exact_element_match() {
    let answers = json!({ "colors": ["Red", "Blue"] });
    assert!(condition("colors", ConditionOperator::Contains, "Red").evaluate(&answers));
    assert!(!condition("colors", ConditionOperator::Contains, "red").evaluate(&answers));
    assert!(!condition("colors", ConditionOperator::Contains, "Green").evaluate(&answers));
}

#[test]
fn contains_on_other_shapes_is_false() {
    let cond = condition("q1", ConditionOperator::Contains, "1");
    assert!(!cond.evaluate(&json!({ "q1": 1 })));
    assert!(!cond.evaluate(&json!({ "q1": { "nested": "1" } })));
}

#[test]
fn unknown_operator_fails_closed() {
    let cond = condition("q1", ConditionOperator::Other, "yes");
    assert!(!cond.evaluate(&json!({ "q1": "yes" })));
}

#[test]
fn unknown_operator_deserializes_to_catch_all() {
    let cond: Condition =
        serde_json::from_value(json!({ "questionKey": "q1", "operator": "startsWith", "value": "x" }))
            .expect("deserialize");
    assert_eq!(cond.operator, ConditionOperator::Other);
}

#[test]
fn and_requires_every_condition() {
    let rules = rule_set(
        RuleLogic::And,
        vec![
            condition("q1", ConditionOperator::Equals, "yes"),
            condition("q2", ConditionOperator::Equals, "yes"),
        ],
    );
    assert!(should_show(Some(&rules), &json!({ "q1": "yes", "q2": "yes" })));
    assert!(!should_show(Some(&rules), &json!({ "q1": "yes", "q2": "no" })));
}

#[test]
fn or_requires_any_condition() {
    let rules = rule_set(
        RuleLogic::Or,
        vec![
            condition("q1", ConditionOperator::Equals, "yes"),
            condition("q2", ConditionOperator::Equals, "yes"),
        ],
    );
    assert!(should_show(Some(&rules), &json!({ "q1": "yes", "q2": "no" })));
    assert!(!should_show(Some(&rules), &json!({ "q1": "no", "q2": "no" })));
}

#[test]
fn unknown_logic_falls_back_to_visible() {
    let rules = rule_set(
        RuleLogic::Other,
        vec![condition("q1", ConditionOperator::Equals, "yes")],
    );
    assert!(should_show(Some(&rules), &json!({ "q1": "no" })));

    let parsed: RuleSet = serde_json::from_value(json!({
        "logic": "XOR",
        "conditions": [{ "questionKey": "q1", "operator": "equals", "value": "yes" }]
    }))
    .expect("deserialize");
    assert!(should_show(Some(&parsed), &json!({ "q1": "no" })));
}

#[test]
fn single_equals_scenario() {
    let rules = rule_set(
        RuleLogic::And,
        vec![condition("q1", ConditionOperator::Equals, "yes")],
    );
    assert!(should_show(Some(&rules), &json!({ "q1": "yes" })));
    assert!(!should_show(Some(&rules), &json!({ "q1": "no" })));
    assert!(!should_show(Some(&rules), &json!({})));
}
