use serde_json::{Map, Value};

use form_spec::{QuestionSpec, QuestionType, RenderPayload, RenderProgress, RenderStatus};

/// Controls which bits of state the wizard prints.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Verbosity {
    /// Clean output: question prompts only.
    Clean,
    /// Verbose output: status, visible questions, error details.
    Verbose,
}

impl Verbosity {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Clean
        }
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

/// Prints prompts and progress once the form yields a question.
pub struct WizardPresenter {
    verbosity: Verbosity,
    header_printed: bool,
}

impl WizardPresenter {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            header_printed: false,
        }
    }

    pub fn show_header(&mut self, payload: &RenderPayload) {
        if self.header_printed {
            return;
        }
        println!("Form: {}", payload.form_title);
        self.header_printed = true;
    }

    pub fn show_status(&self, payload: &RenderPayload) {
        if self.verbosity.is_verbose() {
            println!(
                "Status: {} ({}/{})",
                payload.status.as_str(),
                payload.progress.answered,
                payload.progress.total
            );
            self.print_visible_questions(payload);
        } else if payload.status == RenderStatus::NeedInput
            && payload.questions.iter().all(|question| !question.visible)
        {
            println!("No visible questions are available; check your conditional rules.");
        }
    }

    fn print_visible_questions(&self, payload: &RenderPayload) {
        println!("Visible questions:");
        for question in payload.questions.iter().filter(|question| question.visible) {
            let mut entry = format!(" - {} ({})", question.question_key, question.label);
            if question.required {
                entry.push_str(" [required]");
            }
            println!("{}", entry);
        }
    }

    pub fn show_prompt(&self, prompt: &PromptContext) {
        let mut line = if prompt.total > 0 {
            format!("{}/{} {}", prompt.index, prompt.total, prompt.label)
        } else {
            format!("{} {}", prompt.index, prompt.label)
        };
        if prompt.required {
            line.push_str(" *");
        }
        if let Some(hint) = &prompt.hint {
            line.push(' ');
            line.push_str(hint);
        }
        println!("{}", line);
        if self.verbosity.is_verbose() && !prompt.options.is_empty() {
            println!("Options: {}", prompt.options.join(", "));
        }
    }

    pub fn show_parse_error(&self, error: &AnswerParseError) {
        eprintln!("Invalid answer: {}", error.user_message);
        if self.verbosity.is_verbose()
            && let Some(debug) = &error.debug_message
        {
            eprintln!("  Expected: {}", debug);
        }
    }

    pub fn show_completion(&self, answers: &Map<String, Value>) {
        println!("Done");
        match serde_json::to_string_pretty(&Value::Object(answers.clone())) {
            Ok(pretty) => println!("{}", pretty),
            Err(err) => eprintln!("Failed to serialize answers to JSON: {}", err),
        }
    }
}

/// Context used to format a single prompt.
pub struct PromptContext {
    pub index: usize,
    pub total: usize,
    pub label: String,
    pub required: bool,
    pub hint: Option<String>,
    pub options: Vec<String>,
}

impl PromptContext {
    pub fn new(question: &QuestionSpec, progress: &RenderProgress) -> Self {
        let index = progress.answered + 1;
        Self {
            index: index.max(1),
            total: progress.total,
            label: question.label.clone(),
            required: question.required,
            hint: kind_hint(question),
            options: question.options.clone(),
        }
    }
}

fn kind_hint(question: &QuestionSpec) -> Option<String> {
    match question.kind {
        QuestionType::SingleSelect if !question.options.is_empty() => {
            Some(format!("({})", question.options.join("/")))
        }
        QuestionType::MultipleSelect if !question.options.is_empty() => {
            Some(format!("(comma-separated: {})", question.options.join("/")))
        }
        QuestionType::Attachment => Some("(file name)".to_string()),
        _ => None,
    }
}

/// Error produced when parsing answers from the user.
#[derive(Debug)]
pub struct AnswerParseError {
    pub user_message: String,
    pub debug_message: Option<String>,
}

impl AnswerParseError {
    pub fn new(user_message: impl Into<String>, debug_message: Option<String>) -> Self {
        Self {
            user_message: user_message.into(),
            debug_message,
        }
    }
}

/// Parses a raw input line into an answer value for the question.
///
/// Empty input means "no answer" and is reported as `None`; the caller
/// decides whether that is acceptable. Select answers accept an option
/// name or its 1-based index; multi-select takes comma-separated
/// entries.
pub fn parse_answer(
    question: &QuestionSpec,
    input: &str,
) -> Result<Option<Value>, AnswerParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match question.kind {
        QuestionType::SingleLineText | QuestionType::MultilineText | QuestionType::Attachment => {
            Ok(Some(Value::String(trimmed.to_string())))
        }
        QuestionType::SingleSelect => {
            let option = match_option(&question.options, trimmed).ok_or_else(|| {
                AnswerParseError::new(
                    format!("'{}' is not one of the options", trimmed),
                    Some(format!("one of: {}", question.options.join(", "))),
                )
            })?;
            Ok(Some(Value::String(option)))
        }
        QuestionType::MultipleSelect => {
            let mut picked = Vec::new();
            for entry in trimmed.split(',') {
                let entry = entry.trim();
                if entry.is_empty() {
                    continue;
                }
                let option = match_option(&question.options, entry).ok_or_else(|| {
                    AnswerParseError::new(
                        format!("'{}' is not one of the options", entry),
                        Some(format!("any of: {}", question.options.join(", "))),
                    )
                })?;
                if !picked.contains(&option) {
                    picked.push(option);
                }
            }
            Ok(Some(Value::Array(
                picked.into_iter().map(Value::String).collect(),
            )))
        }
    }
}

fn match_option(options: &[String], input: &str) -> Option<String> {
    if let Some(exact) = options.iter().find(|option| option.as_str() == input) {
        return Some(exact.clone());
    }
    if let Ok(index) = input.parse::<usize>()
        && index >= 1
        && index <= options.len()
    {
        return Some(options[index - 1].clone());
    }
    None
}
