use clap::{Parser, Subcommand};
use form_spec::{Form, check_form, renumber, resolve_visible, validate};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Dynamic form schema toolbox",
    long_about = "Structural checks, answer validation, renumbering, and schema export for dynamic form definitions"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the pre-save structural check on a form definition.
    Check {
        /// Path to the Form JSON.
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
    },
    /// Validate an answer map against a form definition.
    Validate {
        /// Path to the Form JSON.
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        /// Path to the answers JSON object.
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
        /// Emit the validation outcome as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// List the flattened active question set for the given answers.
    Visible {
        /// Path to the Form JSON.
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        /// Path to the answers JSON object.
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
    },
    /// Re-label question numbers sequentially, sub-questions as letters.
    Renumber {
        /// Path to the Form JSON.
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        /// Write the renumbered form here instead of stdout.
        #[arg(long, value_name = "OUT")]
        output: Option<PathBuf>,
    },
    /// Print the JSON Schema of the Form model.
    Schema,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> CliResult<ExitCode> {
    match command {
        Command::Check { form } => run_check(&form),
        Command::Validate {
            form,
            answers,
            json,
        } => run_validate(&form, &answers, json),
        Command::Visible { form, answers } => run_visible(&form, &answers),
        Command::Renumber { form, output } => run_renumber(&form, output.as_deref()),
        Command::Schema => run_schema(),
    }
}

fn load_form(path: &Path) -> CliResult<Form> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn load_answers(path: &Path) -> CliResult<Value> {
    let contents = fs::read_to_string(path)?;
    let answers: Value = serde_json::from_str(&contents)?;
    if !answers.is_object() {
        return Err("answers file must contain a JSON object".into());
    }
    Ok(answers)
}

fn run_check(form_path: &Path) -> CliResult<ExitCode> {
    let form = load_form(form_path)?;
    match check_form(&form) {
        Ok(()) => {
            println!("Form '{}' is structurally valid.", form.title);
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            eprintln!("Structural check failed: {error}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_validate(form_path: &Path, answers_path: &Path, as_json: bool) -> CliResult<ExitCode> {
    let form = load_form(form_path)?;
    let answers = load_answers(answers_path)?;
    let outcome = validate(&form, &answers);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if outcome.is_valid() {
        println!("All answers are valid.");
    } else {
        println!("Validation failed:");
        for (question_id, message) in &outcome.errors_by_question {
            println!(" - {question_id}: {message}");
        }
        if let Some(first) = &outcome.first_failed {
            println!("First failing question: {first}");
        }
    }

    if outcome.is_valid() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn run_visible(form_path: &Path, answers_path: &Path) -> CliResult<ExitCode> {
    let form = load_form(form_path)?;
    let answers = load_answers(answers_path)?;

    println!("Form: {} ({})", form.title, form.id);
    println!("Active questions:");
    for question in resolve_visible(&form, &answers) {
        println!(
            " - {} {} ({})",
            question.question_number, question.question, question.question_id
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn run_renumber(form_path: &Path, output: Option<&Path>) -> CliResult<ExitCode> {
    let mut form = load_form(form_path)?;
    form.questions = renumber(&form.questions);
    let contents = serde_json::to_string_pretty(&form)?;
    match output {
        Some(path) => fs::write(path, contents)?,
        None => println!("{contents}"),
    }
    Ok(ExitCode::SUCCESS)
}

fn run_schema() -> CliResult<ExitCode> {
    let schema = schemars::schema_for!(Form);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(ExitCode::SUCCESS)
}
