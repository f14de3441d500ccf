use regex::Regex;
use serde_json::Value;

use crate::answers::{is_empty_value, numeric_value, scalar_text, value_length};
use crate::schema::question::{OptionType, Question, ValidatorType};

/// Shape-only check for the `email` rule family.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// One executable validation rule, compiled from a question's declared
/// validator configuration.
#[derive(Debug, Clone)]
pub enum CompiledRule {
    Required { message: String },
    Max { bound: f64, message: String },
    Min { bound: f64, message: String },
    MaxLength { bound: usize, message: String },
    MinLength { bound: usize, message: String },
    Pattern { regex: Regex, message: String },
    /// The configured pattern did not compile. Always reports the
    /// configuration problem instead of a false validation failure.
    BrokenPattern { message: String },
    Email { regex: Regex, message: String },
}

impl CompiledRule {
    /// Validator type this rule was compiled from.
    pub fn kind(&self) -> ValidatorType {
        match self {
            CompiledRule::Required { .. } => ValidatorType::Required,
            CompiledRule::Max { .. } => ValidatorType::Max,
            CompiledRule::Min { .. } => ValidatorType::Min,
            CompiledRule::MaxLength { .. } => ValidatorType::MaxLength,
            CompiledRule::MinLength { .. } => ValidatorType::MinLength,
            CompiledRule::Pattern { .. } | CompiledRule::BrokenPattern { .. } => {
                ValidatorType::Pattern
            }
            CompiledRule::Email { .. } => ValidatorType::Email,
        }
    }

    /// Apply the rule to an answer value, returning the failure message.
    ///
    /// Rules other than `required` assume a non-empty value; the engine
    /// short-circuits empty values before reaching them.
    pub fn check(&self, value: Option<&Value>) -> Option<String> {
        match self {
            CompiledRule::Required { message } => {
                is_empty_value(value).then(|| message.clone())
            }
            CompiledRule::Max { bound, message } => {
                let number = value.and_then(numeric_value)?;
                (number > *bound).then(|| message.clone())
            }
            CompiledRule::Min { bound, message } => {
                let number = value.and_then(numeric_value)?;
                (number < *bound).then(|| message.clone())
            }
            CompiledRule::MaxLength { bound, message } => {
                let length = value.and_then(value_length)?;
                (length > *bound).then(|| message.clone())
            }
            CompiledRule::MinLength { bound, message } => {
                let length = value.and_then(value_length)?;
                (length < *bound).then(|| message.clone())
            }
            CompiledRule::Pattern { regex, message } => {
                let text = value.and_then(scalar_text)?;
                (!regex.is_match(&text)).then(|| message.clone())
            }
            CompiledRule::BrokenPattern { message } => Some(message.clone()),
            CompiledRule::Email { regex, message } => {
                let text = value.and_then(scalar_text)?;
                (!regex.is_match(&text)).then(|| message.clone())
            }
        }
    }
}

/// Compile a question's active validator types into executable rules, in
/// the fixed application order: required, max, min, maxLength, minLength,
/// pattern, email.
///
/// Stale entries in `validator_values` for deactivated types are ignored.
/// Numeric rules with missing or uncoercible thresholds are dropped here
/// so they can never produce an error. Date-family types are carried in
/// the catalog but compile to nothing.
pub fn compile_rules(question: &Question) -> Vec<CompiledRule> {
    let mut rules = Vec::new();

    if question.validator_active(ValidatorType::Required) {
        rules.push(CompiledRule::Required {
            message: message_for(question, ValidatorType::Required, |prompt| {
                format!("{prompt} is required")
            }),
        });
    }

    if let Some(bound) = numeric_bound(question, ValidatorType::Max) {
        rules.push(CompiledRule::Max {
            bound,
            message: message_for(question, ValidatorType::Max, |prompt| {
                format!("{prompt} must not exceed {}", bound_text(question, ValidatorType::Max))
            }),
        });
    }

    if let Some(bound) = numeric_bound(question, ValidatorType::Min) {
        rules.push(CompiledRule::Min {
            bound,
            message: message_for(question, ValidatorType::Min, |prompt| {
                format!("{prompt} must be at least {}", bound_text(question, ValidatorType::Min))
            }),
        });
    }

    if let Some(bound) = length_bound(question, ValidatorType::MaxLength) {
        rules.push(CompiledRule::MaxLength {
            bound,
            message: message_for(question, ValidatorType::MaxLength, |prompt| {
                format!("{prompt} must not exceed {bound} characters")
            }),
        });
    }

    if let Some(bound) = length_bound(question, ValidatorType::MinLength) {
        rules.push(CompiledRule::MinLength {
            bound,
            message: message_for(question, ValidatorType::MinLength, |prompt| {
                format!("{prompt} must be at least {bound} characters")
            }),
        });
    }

    if let Some(raw) = pattern_source(question) {
        match Regex::new(strip_pattern_delimiters(&raw)) {
            Ok(regex) => rules.push(CompiledRule::Pattern {
                regex,
                message: message_for(question, ValidatorType::Pattern, |prompt| {
                    format!("{prompt} does not match the expected format")
                }),
            }),
            Err(_) => rules.push(CompiledRule::BrokenPattern {
                message: format!(
                    "{} has an invalid pattern configuration",
                    question.question
                ),
            }),
        }
    }

    if question.validator_active(ValidatorType::Email) && question.option_type == OptionType::Email
    {
        rules.push(CompiledRule::Email {
            regex: Regex::new(EMAIL_PATTERN).expect("email pattern is valid"),
            message: message_for(question, ValidatorType::Email, |prompt| {
                format!("{prompt} must be a valid email address")
            }),
        });
    }

    rules
}

/// Strip a `/body/flags` delimited form down to the bare expression body.
/// Flags are dropped; the source engine only ever configured plain bodies
/// or slash-wrapped ones.
pub fn strip_pattern_delimiters(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.len() >= 2
        && trimmed.starts_with('/')
        && let Some(end) = trimmed.rfind('/')
        && end > 0
    {
        return &trimmed[1..end];
    }
    trimmed
}

fn message_for(
    question: &Question,
    kind: ValidatorType,
    fallback: impl FnOnce(&str) -> String,
) -> String {
    question
        .custom_message(kind)
        .map(str::to_string)
        .unwrap_or_else(|| fallback(&question.question))
}

/// Configured threshold when present and non-blank.
fn configured_value(question: &Question, kind: ValidatorType) -> Option<&Value> {
    question.validator_value(kind).filter(|value| match value {
        Value::Null => false,
        Value::String(text) => !text.trim().is_empty(),
        _ => true,
    })
}

fn numeric_bound(question: &Question, kind: ValidatorType) -> Option<f64> {
    configured_value(question, kind).and_then(numeric_value)
}

/// Length bounds are skipped when falsy: absent, zero, or unparseable.
fn length_bound(question: &Question, kind: ValidatorType) -> Option<usize> {
    let bound = match configured_value(question, kind)? {
        Value::Number(number) => number.as_u64()?,
        Value::String(text) => text.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    if bound == 0 { None } else { Some(bound as usize) }
}

fn pattern_source(question: &Question) -> Option<String> {
    configured_value(question, ValidatorType::Pattern).and_then(scalar_text)
}

/// The configured threshold as display text for default messages.
fn bound_text(question: &Question, kind: ValidatorType) -> String {
    configured_value(question, kind)
        .and_then(scalar_text)
        .unwrap_or_default()
}
