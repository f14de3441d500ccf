pub mod form;
pub mod question;

pub use form::Form;
pub use question::{
    ChoiceOption, OptionType, Question, VALIDATOR_CATALOG, VALUED_VALIDATORS, ValidatorType,
};
