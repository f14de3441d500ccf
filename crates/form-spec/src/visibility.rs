use serde_json::Value;

use crate::answers::scalar_text;
use crate::ordering::sort_for_display;
use crate::schema::form::Form;
use crate::schema::question::Question;

/// Whether a question's sub-question set is currently revealed.
///
/// False when there are no sub-questions or no `children` triggers.
/// Otherwise the current answer (stringified, lowercased) must equal one
/// of the comma-separated trigger tokens; an absent or non-scalar answer
/// never matches. Re-evaluated on every answer change, never cached.
pub fn subset_visible(question: &Question, answers: &Value) -> bool {
    if question.sub_questions.is_empty() {
        return false;
    }
    let tokens = question.trigger_tokens();
    if tokens.is_empty() {
        return false;
    }
    let Some(answer) = current_answer_text(question, answers) else {
        return false;
    };
    tokens.contains(&answer)
}

/// The sub-questions currently shown for a parent, in display order.
///
/// Empty unless [`subset_visible`]; survivors are those with no
/// `triggerValue` plus those whose `triggerValue` matches the parent
/// answer case-insensitively.
pub fn active_sub_questions(question: &Question, answers: &Value) -> Vec<Question> {
    if !subset_visible(question, answers) {
        return Vec::new();
    }
    let answer = current_answer_text(question, answers).unwrap_or_default();
    let survivors: Vec<Question> = question
        .sub_questions
        .iter()
        .filter(|sub| match &sub.trigger_value {
            None => true,
            Some(trigger) => trigger.trim().to_lowercase() == answer,
        })
        .cloned()
        .collect();
    sort_for_display(&survivors)
}

/// Flattened active question set for rendering: top-level questions in
/// display order, each followed by its active sub-questions.
pub fn resolve_visible(form: &Form, answers: &Value) -> Vec<Question> {
    flatten_active(&sort_for_display(&form.questions), answers)
}

/// Same flattening in document order, the traversal the validation
/// engine uses.
pub fn active_in_document_order(form: &Form, answers: &Value) -> Vec<Question> {
    flatten_active(&form.questions, answers)
}

fn flatten_active(top_level: &[Question], answers: &Value) -> Vec<Question> {
    let mut active = Vec::new();
    for question in top_level {
        active.push(question.clone());
        active.extend(active_sub_questions(question, answers));
    }
    active
}

fn current_answer_text(question: &Question, answers: &Value) -> Option<String> {
    let answer = answers.get(&question.question_id)?;
    // Falsy answers (false, zero, empty) never match a trigger token,
    // though the literal strings "false" and "0" still can.
    match answer {
        Value::Bool(false) => return None,
        Value::Number(number) if number.as_f64() == Some(0.0) => return None,
        _ => {}
    }
    let text = scalar_text(answer)?;
    let folded = text.trim().to_lowercase();
    if folded.is_empty() { None } else { Some(folded) }
}
