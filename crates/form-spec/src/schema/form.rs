use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::schema::question::Question;

/// Top-level form definition: a named, ordered collection of questions.
///
/// Owned by the authoring surface and mutated only through the builder
/// operations in [`crate::builder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct Form {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Form {
    /// Look up a top-level question by its natural key.
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions
            .iter()
            .find(|question| question.question_id == question_id)
    }
}
