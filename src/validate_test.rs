use super::*;

#[test]
fn json_revision_accepts_single_character() {
    let schema = FormSchema::for_revision(Revision::Json);
    assert_eq!(schema.validate(&FormInput::new("A")), Ok(()));
}

#[test]
fn json_revision_rejects_empty_name() {
    let schema = FormSchema::for_revision(Revision::Json);
    let errors = schema.validate(&FormInput::default()).unwrap_err();
    assert_eq!(errors.message_for(Field::Username), Some("Name must be at least 1 character."));
    assert_eq!(errors.errors().len(), 1);
}

#[test]
fn query_revision_requires_two_characters() {
    let schema = FormSchema::for_revision(Revision::Query);
    assert!(schema.validate(&FormInput::new("A")).is_err());
    assert_eq!(schema.validate(&FormInput::new("An")), Ok(()));
}

#[test]
fn length_counts_characters_not_bytes() {
    let schema = FormSchema::for_revision(Revision::Query);
    // "Ă" is two bytes in UTF-8 but a single character.
    assert!(schema.validate(&FormInput::new("Ă")).is_err());
    assert_eq!(schema.validate(&FormInput::new("Ăn")), Ok(()));
}

#[test]
fn whitespace_is_not_trimmed() {
    let schema = FormSchema::for_revision(Revision::Query);
    assert_eq!(schema.validate(&FormInput::new(" a")), Ok(()));
}

#[test]
fn preview_revision_reports_each_short_field() {
    let schema = FormSchema::for_revision(Revision::Preview);
    let errors = schema.validate(&FormInput::new("x")).unwrap_err();
    assert_eq!(errors.errors().len(), 2);
    assert_eq!(
        errors.message_for(Field::Username),
        Some("Username must be at least 2 characters.")
    );
    assert_eq!(
        errors.message_for(Field::EmployeeId),
        Some("Employee ID must be at least 2 characters.")
    );
}

#[test]
fn preview_revision_accepts_both_fields() {
    let schema = FormSchema::for_revision(Revision::Preview);
    let input = FormInput::new("Nguyễn An").with_employee_id("NV01");
    assert_eq!(schema.validate(&input), Ok(()));
}

#[test]
fn single_field_revisions_ignore_employee_id() {
    let schema = FormSchema::for_revision(Revision::Json);
    assert!(!schema.has_field(Field::EmployeeId));
    let input = FormInput::new("An").with_employee_id("");
    assert_eq!(schema.validate(&input), Ok(()));
}

#[test]
fn labels_follow_revision() {
    let preview = FormSchema::for_revision(Revision::Preview);
    let labels: Vec<&str> = preview.fields.iter().map(|spec| spec.label).collect();
    assert_eq!(labels, ["Họ tên", "Mã nhân viên"]);

    let json = FormSchema::for_revision(Revision::Json);
    assert_eq!(json.fields[0].label, "Tên");
}

#[test]
fn revision_parses_clap_names() {
    assert_eq!(Revision::parse("query"), Ok(Revision::Query));
    assert_eq!(Revision::parse("v4"), Err(UnknownRevision("v4".to_owned())));
    assert_eq!(Revision::parse("JSON"), Err(UnknownRevision("JSON".to_owned())));
}

#[test]
fn revision_display_round_trips_through_parse() {
    for revision in [Revision::Preview, Revision::Query, Revision::Json] {
        assert_eq!(Revision::parse(&revision.to_string()), Ok(revision));
    }
    assert_eq!(Revision::Preview.to_string(), "preview");
}

#[test]
fn input_serializes_camel_case() {
    let input = FormInput::new("An").with_employee_id("NV01");
    let value = serde_json::to_value(&input).unwrap();
    assert_eq!(value, serde_json::json!({ "username": "An", "employeeId": "NV01" }));
}

#[test]
fn display_joins_messages() {
    let schema = FormSchema::for_revision(Revision::Preview);
    let errors = schema.validate(&FormInput::default()).unwrap_err();
    assert_eq!(
        errors.to_string(),
        "Username must be at least 2 characters. Employee ID must be at least 2 characters."
    );
}
