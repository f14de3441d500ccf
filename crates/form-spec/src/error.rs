use thiserror::Error;

/// Schema-structural problems raised by the builder operations and the
/// pre-save check. Each identifies the offending question; all are fatal
/// to the attempted operation and recoverable by the operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("form title must not be empty")]
    EmptyTitle,
    #[error("form must contain at least one question")]
    NoQuestions,
    #[error("question '{question_id}' is missing its prompt text")]
    MissingPrompt { question_id: String },
    #[error("question '{question}' is missing its id")]
    MissingId { question: String },
    #[error("question '{question_id}' is missing its question type")]
    MissingType { question_id: String },
    #[error("choice question '{question_id}' must define at least one option")]
    MissingOptions { question_id: String },
    #[error("duplicate question id '{question_id}'")]
    DuplicateId { question_id: String },
    #[error("no question with id '{question_id}'")]
    UnknownQuestion { question_id: String },
    #[error("question '{question_id}' has no trigger answers; set children before adding sub-questions")]
    NoTriggers { question_id: String },
    #[error("question '{question_id}' has no option with key '{key}'")]
    UnknownOption { question_id: String, key: String },
    #[error("question '{question_id}' has no list item at index {index}")]
    UnknownListItem { question_id: String, index: usize },
    #[error("question '{parent_id}' has no sub-question with id '{question_id}'")]
    UnknownSubQuestion {
        parent_id: String,
        question_id: String,
    },
}
