use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::answers::scalar_text;
use crate::error::SchemaError;
use crate::schema::form::Form;
use crate::schema::question::{ChoiceOption, Question, ValidatorType};

/// Add a top-level question. Refused when the id is blank or already
/// taken among top-level siblings.
pub fn add_question(form: &Form, question: Question) -> Result<Form, SchemaError> {
    if question.question_id.trim().is_empty() {
        return Err(SchemaError::MissingId {
            question: question.question.clone(),
        });
    }
    if form.question(&question.question_id).is_some() {
        return Err(SchemaError::DuplicateId {
            question_id: question.question_id,
        });
    }
    let mut next = form.clone();
    next.questions.push(question);
    Ok(next)
}

/// Remove a top-level question by id.
pub fn remove_question(form: &Form, question_id: &str) -> Result<Form, SchemaError> {
    if form.question(question_id).is_none() {
        return Err(SchemaError::UnknownQuestion {
            question_id: question_id.to_string(),
        });
    }
    let mut next = form.clone();
    next.questions
        .retain(|question| question.question_id != question_id);
    Ok(next)
}

/// Add a sub-question under a parent. The parent must already declare at
/// least one trigger answer in `children`, otherwise the sub-question
/// could never be revealed and the operation is refused.
pub fn add_sub_question(
    form: &Form,
    parent_id: &str,
    sub: Question,
) -> Result<Form, SchemaError> {
    if sub.question_id.trim().is_empty() {
        return Err(SchemaError::MissingId {
            question: sub.question.clone(),
        });
    }
    with_question(form, parent_id, |parent| {
        if parent.trigger_tokens().is_empty() {
            return Err(SchemaError::NoTriggers {
                question_id: parent_id.to_string(),
            });
        }
        if parent
            .sub_questions
            .iter()
            .any(|existing| existing.question_id == sub.question_id)
        {
            return Err(SchemaError::DuplicateId {
                question_id: sub.question_id.clone(),
            });
        }
        parent.sub_questions.push(sub);
        Ok(())
    })
}

/// Remove a sub-question from a parent by id.
pub fn remove_sub_question(
    form: &Form,
    parent_id: &str,
    sub_id: &str,
) -> Result<Form, SchemaError> {
    with_question(form, parent_id, |parent| {
        let before = parent.sub_questions.len();
        parent
            .sub_questions
            .retain(|sub| sub.question_id != sub_id);
        if parent.sub_questions.len() == before {
            return Err(SchemaError::UnknownSubQuestion {
                parent_id: parent_id.to_string(),
                question_id: sub_id.to_string(),
            });
        }
        Ok(())
    })
}

/// Append a `{key, val}` option to a question.
pub fn add_option(
    form: &Form,
    question_id: &str,
    option: ChoiceOption,
) -> Result<Form, SchemaError> {
    with_question(form, question_id, |question| {
        question.options.push(option);
        Ok(())
    })
}

/// Remove an option by key.
pub fn remove_option(form: &Form, question_id: &str, key: &str) -> Result<Form, SchemaError> {
    with_question(form, question_id, |question| {
        let before = question.options.len();
        question.options.retain(|option| option.key != key);
        if question.options.len() == before {
            return Err(SchemaError::UnknownOption {
                question_id: question_id.to_string(),
                key: key.to_string(),
            });
        }
        Ok(())
    })
}

/// Append an auxiliary list item string.
pub fn add_list_item(form: &Form, question_id: &str, item: String) -> Result<Form, SchemaError> {
    with_question(form, question_id, |question| {
        question.list_items.push(item);
        Ok(())
    })
}

/// Remove a list item by position.
pub fn remove_list_item(
    form: &Form,
    question_id: &str,
    index: usize,
) -> Result<Form, SchemaError> {
    with_question(form, question_id, |question| {
        if index >= question.list_items.len() {
            return Err(SchemaError::UnknownListItem {
                question_id: question_id.to_string(),
                index,
            });
        }
        question.list_items.remove(index);
        Ok(())
    })
}

/// Toggle a validator type on or off in `validator_options`. Stored
/// values and messages are left untouched either way; deactivated types
/// keep their configuration as stale entries until re-activation.
pub fn toggle_validator(
    form: &Form,
    question_id: &str,
    kind: ValidatorType,
    enabled: bool,
) -> Result<Form, SchemaError> {
    with_question(form, question_id, |question| {
        if enabled {
            question.validator_options.insert(kind);
        } else {
            question.validator_options.remove(&kind);
        }
        Ok(())
    })
}

/// Clone the form and edit one top-level question in place.
fn with_question<F>(form: &Form, question_id: &str, edit: F) -> Result<Form, SchemaError>
where
    F: FnOnce(&mut Question) -> Result<(), SchemaError>,
{
    let mut next = form.clone();
    let question = next
        .questions
        .iter_mut()
        .find(|question| question.question_id == question_id)
        .ok_or_else(|| SchemaError::UnknownQuestion {
            question_id: question_id.to_string(),
        })?;
    edit(question)?;
    Ok(next)
}

/// Whole-form structural validation before save.
///
/// Title non-empty, at least one question, every question (sub-questions
/// included) with non-empty prompt, id, and type, unique sibling ids, and
/// at least one option on every select/radio/checkbox question. The first
/// violation aborts the save with its specific error.
pub fn check_form(form: &Form) -> Result<(), SchemaError> {
    if form.title.trim().is_empty() {
        return Err(SchemaError::EmptyTitle);
    }
    if form.questions.is_empty() {
        return Err(SchemaError::NoQuestions);
    }
    check_siblings(&form.questions)?;
    Ok(())
}

fn check_siblings(siblings: &[Question]) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for question in siblings {
        if question.question_id.trim().is_empty() {
            return Err(SchemaError::MissingId {
                question: question.question.clone(),
            });
        }
        if !seen.insert(question.question_id.clone()) {
            return Err(SchemaError::DuplicateId {
                question_id: question.question_id.clone(),
            });
        }
        if question.question.trim().is_empty() {
            return Err(SchemaError::MissingPrompt {
                question_id: question.question_id.clone(),
            });
        }
        if question.question_type.trim().is_empty() {
            return Err(SchemaError::MissingType {
                question_id: question.question_id.clone(),
            });
        }
        if question.option_type.needs_options() && question.options.is_empty() {
            return Err(SchemaError::MissingOptions {
                question_id: question.question_id.clone(),
            });
        }
        check_siblings(&question.sub_questions)?;
    }
    Ok(())
}

/// One catalog entry in the persisted validator bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct ValidatorEntry {
    pub value: Value,
    pub message: String,
}

/// The persisted, per-question validator bundle handed to the rule
/// compiler at validation time.
///
/// Intentionally redundant with `validator_options` plus the value and
/// message maps: the valued families carry `{value, message}` pairs, the
/// rest a plain carried-over string, with empty defaults for every
/// inactive type, so consumers need not know which types are active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct Validators {
    pub required: ValidatorEntry,
    pub max: ValidatorEntry,
    pub min: ValidatorEntry,
    #[serde(rename = "maxLength")]
    pub max_length: ValidatorEntry,
    #[serde(rename = "minLength")]
    pub min_length: ValidatorEntry,
    pub pattern: ValidatorEntry,
    pub email: String,
    #[serde(rename = "maxDate")]
    pub max_date: String,
    #[serde(rename = "minDate")]
    pub min_date: String,
    #[serde(rename = "maxPastDays")]
    pub max_past_days: String,
    #[serde(rename = "maxFutureDays")]
    pub max_future_days: String,
}

/// Build the persisted validator bundle for a question.
pub fn generate_validators(question: &Question) -> Validators {
    Validators {
        required: valued_entry(question, ValidatorType::Required),
        max: valued_entry(question, ValidatorType::Max),
        min: valued_entry(question, ValidatorType::Min),
        max_length: valued_entry(question, ValidatorType::MaxLength),
        min_length: valued_entry(question, ValidatorType::MinLength),
        pattern: valued_entry(question, ValidatorType::Pattern),
        email: carried_string(question, ValidatorType::Email),
        max_date: carried_string(question, ValidatorType::MaxDate),
        min_date: carried_string(question, ValidatorType::MinDate),
        max_past_days: carried_string(question, ValidatorType::MaxPastDays),
        max_future_days: carried_string(question, ValidatorType::MaxFutureDays),
    }
}

fn valued_entry(question: &Question, kind: ValidatorType) -> ValidatorEntry {
    if !question.validator_active(kind) {
        return ValidatorEntry {
            value: Value::String(String::new()),
            message: String::new(),
        };
    }
    let value = question
        .validator_values
        .get(&kind)
        .cloned()
        .unwrap_or_else(|| match kind {
            // An active required flag with no stored value still means on.
            ValidatorType::Required => Value::Bool(true),
            _ => Value::String(String::new()),
        });
    let message = question
        .error_messages
        .get(&kind)
        .cloned()
        .unwrap_or_default();
    ValidatorEntry { value, message }
}

fn carried_string(question: &Question, kind: ValidatorType) -> String {
    if !question.validator_active(kind) {
        return String::new();
    }
    question
        .validator_values
        .get(&kind)
        .and_then(scalar_text)
        .unwrap_or_default()
}

/// Transient authoring state for a sub-question being edited. Lives
/// outside the persisted schema and is merged in only on commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SubQuestionDraft {
    pub parent_id: String,
    pub question: Question,
}

impl SubQuestionDraft {
    pub fn new(parent_id: impl Into<String>, question: Question) -> Self {
        Self {
            parent_id: parent_id.into(),
            question,
        }
    }

    /// Merge the draft into the form, subject to the same invariants as
    /// [`add_sub_question`]. The form is untouched on failure.
    pub fn commit(self, form: &Form) -> Result<Form, SchemaError> {
        add_sub_question(form, &self.parent_id, self.question)
    }
}
