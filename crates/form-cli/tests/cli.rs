use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use serde_json::json;

fn spec_json() -> String {
    json!({
        "formId": "intake",
        "title": "Intake",
        "questions": [
            {
                "questionKey": "channel",
                "fieldId": "fldChannel",
                "label": "Preferred channel",
                "type": "singleSelect",
                "required": true,
                "options": ["Email", "Phone"]
            },
            {
                "questionKey": "phone",
                "fieldId": "fldPhone",
                "label": "Phone number",
                "type": "singleLineText",
                "required": true,
                "conditionalRules": {
                    "logic": "AND",
                    "conditions": [
                        { "questionKey": "channel", "operator": "equals", "value": "Phone" }
                    ]
                }
            }
        ]
    })
    .to_string()
}

fn write_files(temp: &TempDir, answers: serde_json::Value) -> (String, String) {
    let spec = temp.child("spec.json");
    spec.write_str(&spec_json()).expect("write spec");
    let answers_file = temp.child("answers.json");
    answers_file
        .write_str(&answers.to_string())
        .expect("write answers");
    (
        spec.path().to_string_lossy().into_owned(),
        answers_file.path().to_string_lossy().into_owned(),
    )
}

fn branchform() -> Command {
    Command::cargo_bin("branchform").expect("binary")
}

#[test]
fn validate_accepts_hidden_required_question() {
    let temp = TempDir::new().expect("tempdir");
    let (spec, answers) = write_files(&temp, json!({ "channel": "Email" }));

    branchform()
        .args(["validate", "--spec", spec.as_str(), "--answers", answers.as_str()])
        .assert()
        .success()
        .stdout(predicates::str::contains("OK"));
}

#[test]
fn validate_rejects_missing_visible_required_question() {
    let temp = TempDir::new().expect("tempdir");
    let (spec, answers) = write_files(&temp, json!({ "channel": "Phone" }));

    branchform()
        .args(["validate", "--spec", spec.as_str(), "--answers", answers.as_str()])
        .assert()
        .failure()
        .stderr(predicates::str::contains(
            "Required field \"Phone number\" is missing",
        ));
}

#[test]
fn render_text_lists_visible_questions() {
    let temp = TempDir::new().expect("tempdir");
    let (spec, answers) = write_files(&temp, json!({ "channel": "Email" }));

    branchform()
        .args([
            "render",
            "--spec",
            spec.as_str(),
            "--answers",
            answers.as_str(),
            "--format",
            "text",
        ])
        .assert()
        .success()
        .stdout(predicates::str::contains("Preferred channel"))
        .stdout(predicates::str::contains("Visible questions"));
}

#[test]
fn render_json_hides_gated_question() {
    let temp = TempDir::new().expect("tempdir");
    let (spec, answers) = write_files(&temp, json!({ "channel": "Email" }));

    let output = branchform()
        .args([
            "render",
            "--spec",
            spec.as_str(),
            "--answers",
            answers.as_str(),
            "--format",
            "json",
        ])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).into_owned();
    let ui: serde_json::Value = serde_json::from_str(stdout.trim()).expect("json output");
    let phone = ui["questions"]
        .as_array()
        .expect("questions")
        .iter()
        .find(|q| q["questionKey"] == "phone")
        .expect("phone question")
        .clone();
    assert_eq!(phone["visible"], false);
}

#[test]
fn check_reports_forward_reference() {
    let temp = TempDir::new().expect("tempdir");
    let spec = temp.child("bad.json");
    spec.write_str(
        &json!({
            "formId": "bad",
            "title": "Bad",
            "questions": [
                {
                    "questionKey": "q1",
                    "label": "One",
                    "type": "singleLineText",
                    "conditionalRules": {
                        "logic": "AND",
                        "conditions": [
                            { "questionKey": "q2", "operator": "equals", "value": "x" }
                        ]
                    }
                },
                { "questionKey": "q2", "label": "Two", "type": "singleLineText" }
            ]
        })
        .to_string(),
    )
    .expect("write spec");

    let spec_path = spec.path().to_string_lossy().into_owned();
    branchform()
        .args(["check", "--spec", spec_path.as_str()])
        .assert()
        .failure()
        .stdout(predicates::str::contains("later question 'q2'"));
}

#[test]
fn fill_walks_visible_questions_from_stdin() {
    let temp = TempDir::new().expect("tempdir");
    let spec = temp.child("spec.json");
    spec.write_str(&spec_json()).expect("write spec");

    let spec_path = spec.path().to_string_lossy().into_owned();
    branchform()
        .args(["fill", "--spec", spec_path.as_str()])
        .write_stdin("Phone\n555-0100\n")
        .assert()
        .success()
        .stdout(predicates::str::contains("Done"))
        .stdout(predicates::str::contains("555-0100"));
}

#[test]
fn schema_answers_for_excludes_hidden_questions() {
    let temp = TempDir::new().expect("tempdir");
    let spec = temp.child("spec.json");
    spec.write_str(&spec_json()).expect("write spec");

    let spec_path = spec.path().to_string_lossy().into_owned();
    let output = branchform()
        .args(["schema", "--answers-for", spec_path.as_str()])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).into_owned();
    let schema: serde_json::Value = serde_json::from_str(stdout.trim()).expect("schema json");
    let properties = schema["properties"].as_object().expect("properties");
    assert!(properties.contains_key("channel"));
    // "phone" is gated and hidden while nothing is answered.
    assert!(!properties.contains_key("phone"));
}

#[test]
fn new_writes_bundle_from_input_file() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.child("input.json");
    input
        .write_str(
            &json!({
                "form": { "formId": "gen", "title": "Generated" },
                "questions": [
                    {
                        "questionKey": "q1",
                        "label": "One",
                        "type": "singleLineText",
                        "required": true
                    }
                ]
            })
            .to_string(),
        )
        .expect("write input");
    let out_dir = temp.child("bundle");

    let out_path = out_dir.path().to_string_lossy().into_owned();
    let input_path = input.path().to_string_lossy().into_owned();
    branchform()
        .args([
            "new",
            "--out",
            out_path.as_str(),
            "--input",
            input_path.as_str(),
        ])
        .assert()
        .success();

    out_dir.child("spec.json").assert(predicates::path::exists());
    out_dir
        .child("answers.schema.json")
        .assert(predicates::path::exists());
}
