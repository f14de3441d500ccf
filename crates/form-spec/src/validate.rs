use serde_json::Value;

use crate::answers::{ValidationOutcome, is_empty_value};
use crate::rules::{CompiledRule, compile_rules};
use crate::schema::form::Form;
use crate::schema::question::Question;
use crate::visibility::active_in_document_order;

/// Validate one question's answer, returning the first failure only.
///
/// The required rule runs first and short-circuits the rest; a value that
/// is empty but not required passes every check.
pub fn validate_question(question: &Question, value: Option<&Value>) -> Option<String> {
    let rules = compile_rules(question);

    for rule in &rules {
        if let CompiledRule::Required { .. } = rule
            && let Some(message) = rule.check(value)
        {
            return Some(message);
        }
    }

    if is_empty_value(value) {
        return None;
    }

    rules
        .iter()
        .filter(|rule| !matches!(rule, CompiledRule::Required { .. }))
        .find_map(|rule| rule.check(value))
}

/// Run the validation engine over the visibility-aware active question
/// set, walking top-level questions in document order and appending each
/// parent's active sub-questions.
///
/// Questions excluded by visibility never contribute an error, even when
/// a stale answer from a previous visibility state is still present in
/// the answer map.
pub fn validate(form: &Form, answers: &Value) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();

    for question in active_in_document_order(form, answers) {
        let value = answers.get(&question.question_id);
        if let Some(message) = validate_question(&question, value) {
            if outcome.first_failed.is_none() {
                outcome.first_failed = Some(question.question_id.clone());
            }
            outcome
                .errors_by_question
                .insert(question.question_id.clone(), message);
        }
    }

    outcome
}
