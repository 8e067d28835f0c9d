use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use form_spec::{
    Condition, ConditionOperator, FormSpec, LintIssue, QuestionSpec, QuestionType, RuleLogic,
    RuleSet, answers_schema, lint, normalize, resolve_visibility,
};

/// Input shape describing the form to generate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationInput {
    pub form: FormInput,
    #[serde(default)]
    pub questions: Vec<QuestionInput>,
}

/// Metadata describing the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    pub form_id: String,
    pub title: String,
    #[serde(default)]
    pub base_id: Option<String>,
    #[serde(default)]
    pub table_id: Option<String>,
}

/// Question metadata collected from CLI interactions or JSON inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionInput {
    pub question_key: String,
    #[serde(default)]
    pub field_id: Option<String>,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_rules: Option<RuleSet>,
}

/// Generated bundle returned by the builder.
pub struct GeneratedBundle {
    pub spec: FormSpec,
    pub schema: Value,
    pub issues: Vec<LintIssue>,
}

/// Assembles the form spec, lints it, and derives the answers schema.
pub fn build_bundle(input: GenerationInput) -> GeneratedBundle {
    let spec = FormSpec {
        form_id: input.form.form_id,
        title: input.form.title,
        base_id: input.form.base_id,
        table_id: input.form.table_id,
        questions: input
            .questions
            .into_iter()
            .map(|question| QuestionSpec {
                question_key: question.question_key,
                field_id: question.field_id,
                label: question.label,
                kind: question.kind,
                required: question.required,
                options: question.options,
                conditional_rules: question.conditional_rules,
            })
            .collect(),
    };

    let spec = normalize(&spec);
    let issues = lint(&spec);
    let visibility = resolve_visibility(&spec, &Value::Object(Default::default()));
    let schema = answers_schema(&spec, &visibility);

    GeneratedBundle {
        spec,
        schema,
        issues,
    }
}

/// Writes the bundle artifacts into `out_dir` and returns their paths.
pub fn write_bundle(out_dir: &Path, bundle: &GeneratedBundle) -> io::Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;
    let mut written = Vec::new();

    let spec_path = out_dir.join("spec.json");
    fs::write(&spec_path, to_pretty(&bundle.spec)?)?;
    written.push(spec_path);

    let schema_path = out_dir.join("answers.schema.json");
    fs::write(&schema_path, to_pretty(&bundle.schema)?)?;
    written.push(schema_path);

    if !bundle.issues.is_empty() {
        let lint_path = out_dir.join("lint.json");
        fs::write(&lint_path, to_pretty(&bundle.issues)?)?;
        written.push(lint_path);
    }

    Ok(written)
}

fn to_pretty<T: Serialize>(value: &T) -> io::Result<String> {
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}

/// Collects a [`GenerationInput`] interactively from `input` lines.
///
/// Prompts go to stdout. A blank question key ends the question loop.
pub fn prompt_input(input: &mut dyn io::BufRead) -> io::Result<GenerationInput> {
    let form_id = prompt_line(input, "Form id: ")?;
    let title = prompt_line(input, "Title: ")?;
    let base_id = optional(prompt_line(input, "Base id (optional): ")?);
    let table_id = optional(prompt_line(input, "Table id (optional): ")?);

    let mut questions = Vec::new();
    loop {
        let question_key = prompt_line(input, "Question key (blank to finish): ")?;
        if question_key.is_empty() {
            break;
        }
        let label = prompt_line(input, "Label: ")?;
        let kind = loop {
            let raw = prompt_line(
                input,
                "Type (singleLineText/multilineText/singleSelect/multipleSelect/attachment): ",
            )?;
            match parse_kind(&raw) {
                Some(kind) => break kind,
                None => println!("Unknown type '{raw}'"),
            }
        };
        let required = matches!(
            prompt_line(input, "Required? (y/N): ")?.to_lowercase().as_str(),
            "y" | "yes"
        );
        let options = match kind {
            QuestionType::SingleSelect | QuestionType::MultipleSelect => {
                prompt_line(input, "Options (comma-separated): ")?
                    .split(',')
                    .map(|option| option.trim().to_string())
                    .filter(|option| !option.is_empty())
                    .collect()
            }
            _ => Vec::new(),
        };
        let field_id = optional(prompt_line(input, "Field id (optional): ")?);
        let conditional_rules = prompt_rules(input)?;

        questions.push(QuestionInput {
            question_key,
            field_id,
            label,
            kind,
            required,
            options,
            conditional_rules,
        });
    }

    Ok(GenerationInput {
        form: FormInput {
            form_id,
            title,
            base_id,
            table_id,
        },
        questions,
    })
}

fn prompt_rules(input: &mut dyn io::BufRead) -> io::Result<Option<RuleSet>> {
    let wants_rule = matches!(
        prompt_line(input, "Add a visibility rule? (y/N): ")?
            .to_lowercase()
            .as_str(),
        "y" | "yes"
    );
    if !wants_rule {
        return Ok(None);
    }

    let logic = match prompt_line(input, "Logic (AND/OR): ")?.to_uppercase().as_str() {
        "OR" => RuleLogic::Or,
        _ => RuleLogic::And,
    };

    let mut conditions = Vec::new();
    loop {
        let question_key = prompt_line(input, "Condition question key (blank to finish): ")?;
        if question_key.is_empty() {
            break;
        }
        let operator = match prompt_line(input, "Operator (equals/notEquals/contains): ")?.as_str()
        {
            "notEquals" => ConditionOperator::NotEquals,
            "contains" => ConditionOperator::Contains,
            _ => ConditionOperator::Equals,
        };
        let value = prompt_line(input, "Value: ")?;
        conditions.push(Condition {
            question_key,
            operator,
            value,
        });
    }

    Ok(Some(RuleSet { logic, conditions }))
}

fn parse_kind(raw: &str) -> Option<QuestionType> {
    match raw.trim() {
        "singleLineText" | "text" => Some(QuestionType::SingleLineText),
        "multilineText" | "multiline" => Some(QuestionType::MultilineText),
        "singleSelect" | "select" => Some(QuestionType::SingleSelect),
        "multipleSelect" | "multi" => Some(QuestionType::MultipleSelect),
        "attachment" | "file" => Some(QuestionType::Attachment),
        _ => None,
    }
}

fn prompt_line(input: &mut dyn io::BufRead, prompt: &str) -> io::Result<String> {
    use std::io::Write;
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn optional(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
