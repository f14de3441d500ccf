use serde_json::json;

use form_spec::schema::question::Question;
use form_spec::{Form, active_sub_questions, resolve_visible, subset_visible};

fn fixture() -> Form {
    serde_json::from_str(include_str!("fixtures/health_form.json")).expect("deserialize fixture")
}

fn parent_with_triggers(id: &str, children: &str) -> Question {
    Question {
        question_id: id.into(),
        question: format!("Question {id}"),
        question_type: "General".into(),
        children: Some(children.into()),
        sub_questions: vec![Question {
            question_id: format!("{id}a"),
            question: "Follow-up".into(),
            question_type: "General".into(),
            ..Question::default()
        }],
        ..Question::default()
    }
}

#[test]
fn triggers_match_case_insensitively() {
    let form = fixture();
    let parent = form.question("q2").expect("q2");
    for answer in ["yes", "Yes", "YES", " yes "] {
        assert!(subset_visible(parent, &json!({ "q2": answer })));
    }
    assert!(subset_visible(parent, &json!({ "q2": "maybe" })));
    assert!(!subset_visible(parent, &json!({ "q2": "no" })));
}

#[test]
fn absent_or_non_scalar_answers_hide_the_subset() {
    let form = fixture();
    let parent = form.question("q2").expect("q2");
    assert!(!subset_visible(parent, &json!({})));
    assert!(!subset_visible(parent, &json!({ "q2": null })));
    assert!(!subset_visible(parent, &json!({ "q2": ["yes"] })));
    assert!(!subset_visible(parent, &json!({ "q2": "" })));
}

#[test]
fn falsy_answers_never_reveal_the_subset() {
    let parent = parent_with_triggers("p", "0,false,yes");
    assert!(!subset_visible(&parent, &json!({ "p": 0 })));
    assert!(!subset_visible(&parent, &json!({ "p": 0.0 })));
    assert!(!subset_visible(&parent, &json!({ "p": false })));
    // The literal strings are not falsy and still match their tokens.
    assert!(subset_visible(&parent, &json!({ "p": "0" })));
    assert!(subset_visible(&parent, &json!({ "p": "false" })));
    assert!(subset_visible(&parent, &json!({ "p": "yes" })));
    // Non-zero numbers and true stringify as usual.
    assert!(!subset_visible(&parent, &json!({ "p": 1 })));
    let numbered = parent_with_triggers("p", "1,true");
    assert!(subset_visible(&numbered, &json!({ "p": 1 })));
    assert!(subset_visible(&numbered, &json!({ "p": true })));
}

#[test]
fn questions_without_children_never_reveal() {
    let form = fixture();
    let leaf = form.question("q1").expect("q1");
    assert!(!subset_visible(leaf, &json!({ "q1": "anything" })));
}

#[test]
fn trigger_value_filters_within_the_revealed_set() {
    let form = fixture();
    let parent = form.question("q2").expect("q2");

    // "yes" fires q2a (triggerValue yes) and q2b (no trigger), display order.
    let active = active_sub_questions(parent, &json!({ "q2": "Yes" }));
    let ids: Vec<&str> = active.iter().map(|q| q.question_id.as_str()).collect();
    assert_eq!(ids, ["q2a", "q2b"]);

    // "maybe" reveals the subset but q2a's trigger does not match.
    let active = active_sub_questions(parent, &json!({ "q2": "maybe" }));
    let ids: Vec<&str> = active.iter().map(|q| q.question_id.as_str()).collect();
    assert_eq!(ids, ["q2b"]);

    // A failed parent condition hides everything regardless of triggers.
    assert!(active_sub_questions(parent, &json!({ "q2": "no" })).is_empty());
}

#[test]
fn resolve_visible_flattens_parent_then_children() {
    let form = fixture();
    let active = resolve_visible(&form, &json!({ "q2": "yes" }));
    let ids: Vec<&str> = active.iter().map(|q| q.question_id.as_str()).collect();
    assert_eq!(ids, ["q1", "q2", "q2a", "q2b", "q3"]);

    let active = resolve_visible(&form, &json!({}));
    let ids: Vec<&str> = active.iter().map(|q| q.question_id.as_str()).collect();
    assert_eq!(ids, ["q1", "q2", "q3"]);
}
