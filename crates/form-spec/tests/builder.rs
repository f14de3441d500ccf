use serde_json::{Value, json};

use form_spec::schema::question::{ChoiceOption, OptionType, Question, ValidatorType};
use form_spec::{
    Form, SchemaError, SubQuestionDraft, add_list_item, add_option, add_question,
    add_sub_question, check_form, generate_validators, remove_list_item, remove_option,
    remove_question, remove_sub_question, toggle_validator, validate_question,
};

fn question(id: &str, prompt: &str) -> Question {
    Question {
        question_id: id.into(),
        question: prompt.into(),
        question_type: "General".into(),
        ..Question::default()
    }
}

fn base_form() -> Form {
    Form {
        id: "f1".into(),
        title: "Survey".into(),
        description: None,
        questions: vec![question("q1", "First question")],
    }
}

#[test]
fn add_question_refuses_duplicate_ids() {
    let form = base_form();
    let form = add_question(&form, question("q2", "Second")).expect("add q2");
    assert_eq!(form.questions.len(), 2);

    let err = add_question(&form, question("q2", "Clone")).unwrap_err();
    assert_eq!(err, SchemaError::DuplicateId { question_id: "q2".into() });

    // The original value is untouched by the failed operation.
    assert_eq!(form.questions.len(), 2);
}

#[test]
fn add_question_refuses_blank_ids() {
    let err = add_question(&base_form(), question("  ", "No id")).unwrap_err();
    assert!(matches!(err, SchemaError::MissingId { .. }));
}

#[test]
fn remove_question_by_id() {
    let form = remove_question(&base_form(), "q1").expect("remove");
    assert!(form.questions.is_empty());

    let err = remove_question(&base_form(), "nope").unwrap_err();
    assert_eq!(err, SchemaError::UnknownQuestion { question_id: "nope".into() });
}

#[test]
fn sub_questions_require_parent_triggers() {
    let form = base_form();
    let err = add_sub_question(&form, "q1", question("q1a", "Follow-up")).unwrap_err();
    assert_eq!(err, SchemaError::NoTriggers { question_id: "q1".into() });

    let mut parent = question("q2", "Any issues?");
    parent.children = Some("yes".into());
    let form = add_question(&form, parent).expect("add parent");
    let form = add_sub_question(&form, "q2", question("q2a", "Describe them")).expect("add sub");
    assert_eq!(form.question("q2").unwrap().sub_questions.len(), 1);

    let err = add_sub_question(&form, "q2", question("q2a", "Again")).unwrap_err();
    assert_eq!(err, SchemaError::DuplicateId { question_id: "q2a".into() });
}

#[test]
fn remove_sub_question_by_id() {
    let mut parent = question("q2", "Any issues?");
    parent.children = Some("yes".into());
    parent.sub_questions = vec![question("q2a", "Describe them")];
    let form = add_question(&base_form(), parent).expect("add parent");

    let form = remove_sub_question(&form, "q2", "q2a").expect("remove sub");
    assert!(form.question("q2").unwrap().sub_questions.is_empty());

    let err = remove_sub_question(&form, "q2", "q2a").unwrap_err();
    assert!(matches!(err, SchemaError::UnknownSubQuestion { .. }));
}

#[test]
fn options_and_list_items_round_trip() {
    let form = base_form();
    let form = add_option(
        &form,
        "q1",
        ChoiceOption { key: "yes".into(), val: "Yes".into() },
    )
    .expect("add option");
    assert_eq!(form.question("q1").unwrap().options.len(), 1);

    let form = remove_option(&form, "q1", "yes").expect("remove option");
    assert!(form.question("q1").unwrap().options.is_empty());
    let err = remove_option(&form, "q1", "yes").unwrap_err();
    assert!(matches!(err, SchemaError::UnknownOption { .. }));

    let form = add_list_item(&form, "q1", "<p>Bring your card</p>".into()).expect("add item");
    assert_eq!(form.question("q1").unwrap().list_items.len(), 1);
    let form = remove_list_item(&form, "q1", 0).expect("remove item");
    assert!(form.question("q1").unwrap().list_items.is_empty());
    let err = remove_list_item(&form, "q1", 0).unwrap_err();
    assert!(matches!(err, SchemaError::UnknownListItem { .. }));
}

#[test]
fn toggling_a_validator_keeps_its_stale_configuration() {
    let mut form = base_form();
    form.questions[0]
        .validator_options
        .insert(ValidatorType::MaxLength);
    form.questions[0]
        .validator_values
        .insert(ValidatorType::MaxLength, json!(5));

    let form = toggle_validator(&form, "q1", ValidatorType::MaxLength, false).expect("off");
    let q = form.question("q1").unwrap();
    assert!(!q.validator_active(ValidatorType::MaxLength));
    assert_eq!(q.validator_values.get(&ValidatorType::MaxLength), Some(&json!(5)));
    // Deactivated: the stale value no longer produces errors.
    assert_eq!(validate_question(q, Some(&json!("way too long"))), None);

    let form = toggle_validator(&form, "q1", ValidatorType::MaxLength, true).expect("on");
    let q = form.question("q1").unwrap();
    assert!(validate_question(q, Some(&json!("way too long"))).is_some());
}

#[test]
fn generate_validators_round_trip() {
    let mut q = question("q1", "Code");
    q.validator_options.insert(ValidatorType::Required);
    q.validator_options.insert(ValidatorType::Pattern);
    q.validator_values
        .insert(ValidatorType::Required, json!(true));
    q.validator_values
        .insert(ValidatorType::Pattern, json!("^[A-Z]+$"));

    let validators = generate_validators(&q);
    assert_eq!(validators.required.value, Value::Bool(true));
    assert_eq!(validators.pattern.value, Value::String("^[A-Z]+$".into()));

    // Every other catalog entry is empty-valued.
    let empty = Value::String(String::new());
    assert_eq!(validators.max.value, empty);
    assert_eq!(validators.min.value, empty);
    assert_eq!(validators.max_length.value, empty);
    assert_eq!(validators.min_length.value, empty);
    assert_eq!(validators.email, "");
    assert_eq!(validators.max_date, "");
    assert_eq!(validators.min_date, "");
    assert_eq!(validators.max_past_days, "");
    assert_eq!(validators.max_future_days, "");
}

#[test]
fn generate_validators_serializes_with_catalog_names() {
    let validators = generate_validators(&question("q1", "Prompt"));
    let json = serde_json::to_value(&validators).expect("serialize");
    for key in [
        "required",
        "max",
        "min",
        "maxLength",
        "minLength",
        "pattern",
        "email",
        "maxDate",
        "minDate",
        "maxPastDays",
        "maxFutureDays",
    ] {
        assert!(json.get(key).is_some(), "missing key {key}");
    }
}

#[test]
fn check_form_walks_the_structural_rules() {
    let mut form = base_form();
    form.title = "  ".into();
    assert_eq!(check_form(&form).unwrap_err(), SchemaError::EmptyTitle);

    let mut form = base_form();
    form.questions.clear();
    assert_eq!(check_form(&form).unwrap_err(), SchemaError::NoQuestions);

    let mut form = base_form();
    form.questions[0].question = String::new();
    assert_eq!(
        check_form(&form).unwrap_err(),
        SchemaError::MissingPrompt { question_id: "q1".into() }
    );

    let mut form = base_form();
    form.questions[0].question_type = String::new();
    assert_eq!(
        check_form(&form).unwrap_err(),
        SchemaError::MissingType { question_id: "q1".into() }
    );

    let mut form = base_form();
    form.questions[0].option_type = OptionType::Radio;
    assert_eq!(
        check_form(&form).unwrap_err(),
        SchemaError::MissingOptions { question_id: "q1".into() }
    );

    let mut form = base_form();
    form.questions.push(question("q1", "Duplicate"));
    assert_eq!(
        check_form(&form).unwrap_err(),
        SchemaError::DuplicateId { question_id: "q1".into() }
    );

    assert_eq!(check_form(&base_form()), Ok(()));
}

#[test]
fn check_form_descends_into_sub_questions() {
    let mut parent = question("q2", "Any issues?");
    parent.children = Some("yes".into());
    let mut bad_sub = question("q2a", "Which ones?");
    bad_sub.option_type = OptionType::Select;
    parent.sub_questions = vec![bad_sub];
    let form = add_question(&base_form(), parent).expect("add parent");

    assert_eq!(
        check_form(&form).unwrap_err(),
        SchemaError::MissingOptions { question_id: "q2a".into() }
    );
}

#[test]
fn draft_merges_only_on_commit() {
    let mut parent = question("q2", "Any issues?");
    parent.children = Some("yes".into());
    let form = add_question(&base_form(), parent).expect("add parent");

    let draft = SubQuestionDraft::new("q2", question("q2a", "Describe them"));
    // The form is untouched while the draft exists.
    assert!(form.question("q2").unwrap().sub_questions.is_empty());

    let form = draft.commit(&form).expect("commit");
    assert_eq!(form.question("q2").unwrap().sub_questions.len(), 1);

    let broken = SubQuestionDraft::new("missing", question("x", "X"));
    assert!(matches!(
        broken.commit(&form).unwrap_err(),
        SchemaError::UnknownQuestion { .. }
    ));
}
