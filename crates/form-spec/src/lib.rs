#![allow(missing_docs)]

pub mod answers;
pub mod builder;
pub mod error;
pub mod ordering;
pub mod rules;
pub mod schema;
pub mod validate;
pub mod visibility;

pub use answers::{ValidationOutcome, is_empty_value};
pub use builder::{
    SubQuestionDraft, ValidatorEntry, Validators, add_list_item, add_option, add_question,
    add_sub_question, check_form, generate_validators, remove_list_item, remove_option,
    remove_question, remove_sub_question, toggle_validator,
};
pub use error::SchemaError;
pub use ordering::{
    NumberKey, display_cmp, parse_number, renumber, renumber_cmp, sort_for_display,
    sort_for_renumber,
};
pub use rules::{CompiledRule, compile_rules, strip_pattern_delimiters};
pub use schema::{
    ChoiceOption, Form, OptionType, Question, VALIDATOR_CATALOG, VALUED_VALIDATORS, ValidatorType,
};
pub use validate::{validate, validate_question};
pub use visibility::{active_sub_questions, resolve_visible, subset_visible};
