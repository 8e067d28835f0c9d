pub mod builder;

mod wizard;

use builder::{GenerationInput, build_bundle, prompt_input, write_bundle};
use clap::{Parser, Subcommand, ValueEnum};
use form_engine::{render_json_ui, render_text, validate_answers};
use form_spec::{
    FormSpec, answers_schema, build_render_payload, form_schema, is_answered, lint,
    resolve_visibility, validate_submission,
};
use serde_json::{Map, Value, json};
use std::collections::HashSet;
use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use wizard::{PromptContext, Verbosity, WizardPresenter, parse_answer};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Conditional form CLI",
    long_about = "Renders, validates, fills, and generates conditional intake forms backed by the form engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RenderMode {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Render a form with the current answers.
    Render {
        /// Path to the form spec JSON.
        #[arg(long, value_name = "SPEC")]
        spec: PathBuf,
        /// Optional JSON file containing answers.
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
    },
    /// Validate an answers file against a form spec.
    Validate {
        #[arg(long, value_name = "SPEC")]
        spec: PathBuf,
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
    },
    /// Lint a form spec for authoring mistakes.
    Check {
        #[arg(long, value_name = "SPEC")]
        spec: PathBuf,
        /// Emit findings as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Fill a form interactively on the terminal.
    Fill {
        #[arg(long, value_name = "SPEC")]
        spec: PathBuf,
        /// Optional JSON file containing initial answers.
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
        /// Show verbose output (statuses, visible questions).
        #[arg(long, alias = "debug")]
        verbose: bool,
    },
    /// Print the JSON Schema of the form spec format itself.
    Schema {
        /// Print the answers schema for this form spec instead.
        #[arg(long, value_name = "SPEC")]
        answers_for: Option<PathBuf>,
    },
    /// Generate a form spec bundle, interactively or from a JSON input.
    New {
        /// Directory the bundle is written into.
        #[arg(long, value_name = "DIR")]
        out: PathBuf,
        /// Non-interactive generation input (JSON).
        #[arg(long, value_name = "INPUT")]
        input: Option<PathBuf>,
    },
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Render {
            spec,
            answers,
            format,
        } => render(&spec, answers.as_deref(), format),
        Command::Validate { spec, answers } => validate(&spec, &answers),
        Command::Check { spec, json } => check(&spec, json),
        Command::Fill {
            spec,
            answers,
            verbose,
        } => fill(&spec, answers.as_deref(), verbose),
        Command::Schema { answers_for } => schema(answers_for.as_deref()),
        Command::New { out, input } => generate(&out, input.as_deref()),
    }
}

fn load_spec_raw(path: &Path) -> CliResult<(String, FormSpec)> {
    let raw = fs::read_to_string(path)?;
    let spec: FormSpec = serde_json::from_str(&raw)?;
    Ok((raw, spec))
}

fn load_answers(path: Option<&Path>) -> CliResult<Value> {
    match path {
        Some(path) => Ok(serde_json::from_str(&fs::read_to_string(path)?)?),
        None => Ok(Value::Object(Map::new())),
    }
}

fn engine_config(spec_raw: &str) -> String {
    json!({ "form_spec_json": spec_raw }).to_string()
}

fn render(spec_path: &Path, answers_path: Option<&Path>, format: RenderMode) -> CliResult<()> {
    let (raw, spec) = load_spec_raw(spec_path)?;
    let answers = load_answers(answers_path)?;
    let config = engine_config(&raw);
    let output = match format {
        RenderMode::Text => render_text(&spec.form_id, &config, &answers.to_string()),
        RenderMode::Json => render_json_ui(&spec.form_id, &config, &answers.to_string()),
    };
    println!("{output}");
    Ok(())
}

fn validate(spec_path: &Path, answers_path: &Path) -> CliResult<()> {
    let (raw, spec) = load_spec_raw(spec_path)?;
    let answers = load_answers(Some(answers_path))?;
    let config = engine_config(&raw);
    let response = validate_answers(&spec.form_id, &config, &answers.to_string());
    let parsed: Value = serde_json::from_str(&response)?;
    if parsed["valid"].as_bool().unwrap_or(false) {
        println!("OK");
        Ok(())
    } else {
        Err(parsed["error"]
            .as_str()
            .unwrap_or("validation failed")
            .to_string()
            .into())
    }
}

fn schema(answers_for: Option<&Path>) -> CliResult<()> {
    let schema = match answers_for {
        Some(spec_path) => {
            let (_, spec) = load_spec_raw(spec_path)?;
            let visibility = resolve_visibility(&spec, &Value::Object(Map::new()));
            answers_schema(&spec, &visibility)
        }
        None => form_schema(),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn check(spec_path: &Path, as_json: bool) -> CliResult<()> {
    let (_, spec) = load_spec_raw(spec_path)?;
    let issues = lint(&spec);
    if as_json {
        println!("{}", serde_json::to_string_pretty(&issues)?);
    } else if issues.is_empty() {
        println!("No issues found");
    } else {
        for issue in &issues {
            println!("{}: {}", issue.question_key, issue.message);
        }
    }
    if issues.is_empty() {
        Ok(())
    } else {
        Err(format!("{} issue(s) found", issues.len()).into())
    }
}

fn fill(spec_path: &Path, answers_path: Option<&Path>, verbose: bool) -> CliResult<()> {
    let (_, spec) = load_spec_raw(spec_path)?;
    let initial = load_answers(answers_path)?;
    let mut answers = initial.as_object().cloned().unwrap_or_default();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut presenter = WizardPresenter::new(Verbosity::from_verbose(verbose));
    // Optional questions left blank are not asked again.
    let mut skipped: HashSet<String> = HashSet::new();

    loop {
        let answers_value = Value::Object(answers.clone());
        let payload = build_render_payload(&spec, &answers_value);
        presenter.show_header(&payload);
        presenter.show_status(&payload);

        let next_key = payload
            .questions
            .iter()
            .filter(|question| question.visible)
            .filter(|question| !is_answered(answers.get(&question.question_key)))
            .map(|question| question.question_key.clone())
            .find(|key| !skipped.contains(key));
        let Some(next_key) = next_key else {
            break;
        };
        let Some(question) = spec.question(&next_key) else {
            break;
        };

        presenter.show_prompt(&PromptContext::new(question, &payload.progress));

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match parse_answer(question, &line) {
            Ok(Some(value)) => {
                answers.insert(next_key, value);
            }
            Ok(None) => {
                if question.required {
                    eprintln!("An answer is required for \"{}\"", question.label);
                } else {
                    skipped.insert(next_key);
                }
            }
            Err(error) => presenter.show_parse_error(&error),
        }
    }

    let answers_value = Value::Object(answers.clone());
    validate_submission(&spec, &answers_value)?;
    presenter.show_completion(&answers);
    Ok(())
}

fn generate(out_dir: &Path, input_path: Option<&Path>) -> CliResult<()> {
    let input: GenerationInput = match input_path {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => {
            let stdin = io::stdin();
            let mut lock = stdin.lock();
            prompt_input(&mut lock)?
        }
    };

    let bundle = build_bundle(input);
    for issue in &bundle.issues {
        eprintln!("warning: {}: {}", issue.question_key, issue.message);
    }
    let written = write_bundle(out_dir, &bundle)?;
    for path in written {
        println!("wrote {}", path.display());
    }
    Ok(())
}
