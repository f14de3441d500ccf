use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Answer shape tag for a question. Decides which rule families apply and
/// how the visibility resolver reads the stored answer value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    #[default]
    Text,
    Email,
    Number,
    Textarea,
    Select,
    Radio,
    Checkbox,
    Date,
    File,
}

impl OptionType {
    /// True for the types that require a non-empty option list.
    pub fn needs_options(self) -> bool {
        matches!(
            self,
            OptionType::Select | OptionType::Radio | OptionType::Checkbox
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OptionType::Text => "text",
            OptionType::Email => "email",
            OptionType::Number => "number",
            OptionType::Textarea => "textarea",
            OptionType::Select => "select",
            OptionType::Radio => "radio",
            OptionType::Checkbox => "checkbox",
            OptionType::Date => "date",
            OptionType::File => "file",
        }
    }
}

/// Fixed validator-type catalog. Types outside this list never apply.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum ValidatorType {
    Required,
    Max,
    Min,
    MaxLength,
    MinLength,
    Pattern,
    Email,
    MaxDate,
    MinDate,
    MaxPastDays,
    MaxFutureDays,
}

/// Every catalog entry, in rule-application order for the first seven.
pub const VALIDATOR_CATALOG: [ValidatorType; 11] = [
    ValidatorType::Required,
    ValidatorType::Max,
    ValidatorType::Min,
    ValidatorType::MaxLength,
    ValidatorType::MinLength,
    ValidatorType::Pattern,
    ValidatorType::Email,
    ValidatorType::MaxDate,
    ValidatorType::MinDate,
    ValidatorType::MaxPastDays,
    ValidatorType::MaxFutureDays,
];

/// Catalog subset whose configuration carries both a value and a message.
pub const VALUED_VALIDATORS: [ValidatorType; 6] = [
    ValidatorType::Required,
    ValidatorType::Max,
    ValidatorType::Min,
    ValidatorType::MaxLength,
    ValidatorType::MinLength,
    ValidatorType::Pattern,
];

impl ValidatorType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidatorType::Required => "required",
            ValidatorType::Max => "max",
            ValidatorType::Min => "min",
            ValidatorType::MaxLength => "maxLength",
            ValidatorType::MinLength => "minLength",
            ValidatorType::Pattern => "pattern",
            ValidatorType::Email => "email",
            ValidatorType::MaxDate => "maxDate",
            ValidatorType::MinDate => "minDate",
            ValidatorType::MaxPastDays => "maxPastDays",
            ValidatorType::MaxFutureDays => "maxFutureDays",
        }
    }

    /// True for the date family, declared in the catalog but not enforced
    /// by the validation engine.
    pub fn is_date_family(self) -> bool {
        matches!(
            self,
            ValidatorType::MaxDate
                | ValidatorType::MinDate
                | ValidatorType::MaxPastDays
                | ValidatorType::MaxFutureDays
        )
    }
}

/// One selectable option for select/radio/checkbox questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChoiceOption {
    pub key: String,
    pub val: String,
}

/// One schema unit: prompt, answer-shape tag, options, validator
/// configuration, and optional conditionally-shown sub-questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct Question {
    /// Natural key, unique among siblings. Never regenerated on edit.
    #[serde(rename = "questionId")]
    pub question_id: String,
    /// Prompt text shown to the end user.
    pub question: String,
    /// Free-text display label such as "3" or "1a". Ordering input only.
    #[serde(rename = "questionNumber", default)]
    pub question_number: String,
    /// Integer fallback tiebreaker for ordering.
    #[serde(default)]
    pub order: i64,
    /// Category label, e.g. "Health".
    #[serde(rename = "questionType", default)]
    pub question_type: String,
    #[serde(default)]
    pub option_type: OptionType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,
    /// Auxiliary ordered-list content after the prompt. Never validated.
    #[serde(rename = "listItems", default, skip_serializing_if = "Vec::is_empty")]
    pub list_items: Vec<String>,
    /// The authoritative set of active validator types.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub validator_options: BTreeSet<ValidatorType>,
    /// Configured thresholds/patterns/flags. May hold stale entries for
    /// deactivated types; the rule compiler ignores those.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub validator_values: BTreeMap<ValidatorType, Value>,
    /// Custom messages keyed by validator type. Same staleness rule.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub error_messages: BTreeMap<ValidatorType, String>,
    /// Comma-separated trigger answers that reveal `subQuestions`.
    /// Empty or absent means no sub-questions are ever shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<String>,
    #[serde(
        rename = "subQuestions",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub sub_questions: Vec<Question>,
    /// Sub-question only: a single trigger filtering within the revealed
    /// set. Absent means shown whenever any parent trigger fires.
    #[serde(
        rename = "triggerValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub trigger_value: Option<String>,
}

impl Question {
    /// True when the validator type is active for this question.
    pub fn validator_active(&self, kind: ValidatorType) -> bool {
        self.validator_options.contains(&kind)
    }

    /// Configured value for an active validator type, if any.
    pub fn validator_value(&self, kind: ValidatorType) -> Option<&Value> {
        if !self.validator_active(kind) {
            return None;
        }
        self.validator_values.get(&kind)
    }

    /// Custom message for a validator type when configured and non-blank.
    pub fn custom_message(&self, kind: ValidatorType) -> Option<&str> {
        self.error_messages
            .get(&kind)
            .map(String::as_str)
            .filter(|message| !message.trim().is_empty())
    }

    /// Comma-split, trimmed, lowercased trigger tokens from `children`.
    pub fn trigger_tokens(&self) -> Vec<String> {
        self.children
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(|token| token.trim().to_lowercase())
            .filter(|token| !token.is_empty())
            .collect()
    }
}
