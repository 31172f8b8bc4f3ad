use giftring_core::{AssignmentMap, Drawing, DrawingValidationError, Participant};

fn pair(a: &str, b: &str) -> Drawing {
    let participants = vec![Participant::new(a, "111"), Participant::new(b, "222")];
    let mut assignments = AssignmentMap::new();
    assignments.insert(participants[0].slug.clone(), participants[1].name.clone());
    assignments.insert(participants[1].slug.clone(), participants[0].name.clone());
    Drawing::new(participants, assignments, 1_700_000_000_000)
}

#[test]
fn participant_new_trims_name_and_derives_slug() {
    let participant = Participant::new("  José Azevedo ", "+55 11 98765-4321");
    assert_eq!(participant.name, "José Azevedo");
    assert_eq!(participant.slug, "jose-azevedo");
    assert_eq!(participant.contact, "+55 11 98765-4321");
}

#[test]
fn valid_two_person_drawing_passes_validation() {
    let drawing = pair("Alice", "Bob");
    drawing.validate().unwrap();
    assert_eq!(drawing.assignment_for("alice"), Some("Bob"));
    assert_eq!(drawing.assignment_for("nobody"), None);
}

#[test]
fn validation_rejects_empty_slug() {
    let mut drawing = pair("Alice", "Bob");
    drawing.participants[1].slug = String::new();
    assert!(matches!(
        drawing.validate(),
        Err(DrawingValidationError::EmptySlug { .. })
    ));
}

#[test]
fn validation_rejects_duplicate_slugs() {
    let mut drawing = pair("Alice", "Bob");
    drawing.participants[1].slug = "alice".to_string();
    assert!(matches!(
        drawing.validate(),
        Err(DrawingValidationError::DuplicateSlug { slug }) if slug == "alice"
    ));
}

#[test]
fn validation_rejects_assignment_count_mismatch() {
    let mut drawing = pair("Alice", "Bob");
    drawing.assignments.insert("ghost".to_string(), "Alice".to_string());
    assert!(matches!(
        drawing.validate(),
        Err(DrawingValidationError::AssignmentCountMismatch {
            participants: 2,
            assignments: 3
        })
    ));
}

#[test]
fn validation_rejects_missing_assignment() {
    let mut drawing = pair("Alice", "Bob");
    drawing.assignments.remove("bob");
    drawing.assignments.insert("ghost".to_string(), "Alice".to_string());
    assert!(matches!(
        drawing.validate(),
        Err(DrawingValidationError::MissingAssignment { slug }) if slug == "bob"
    ));
}

#[test]
fn validation_rejects_self_assignment() {
    let mut drawing = pair("Alice", "Bob");
    drawing.assignments.insert("alice".to_string(), "Alice".to_string());
    drawing.assignments.insert("bob".to_string(), "Bob".to_string());
    assert!(matches!(
        drawing.validate(),
        Err(DrawingValidationError::SelfAssignment { slug }) if slug == "alice"
    ));
}

#[test]
fn validation_rejects_assignees_outside_the_roster() {
    let mut drawing = pair("Alice", "Bob");
    drawing.assignments.insert("alice".to_string(), "Mallory".to_string());
    assert!(matches!(
        drawing.validate(),
        Err(DrawingValidationError::BrokenAssignmentCycle { .. })
    ));
}

#[test]
fn namesake_roster_with_distinct_slugs_passes_validation() {
    let participants = vec![
        Participant::with_slug("Ana", "111", "ana"),
        Participant::with_slug("Ana", "222", "ana-2"),
        Participant::with_slug("Bob", "333", "bob"),
    ];
    let mut assignments = AssignmentMap::new();
    assignments.insert("ana".to_string(), "Ana".to_string());
    assignments.insert("ana-2".to_string(), "Bob".to_string());
    assignments.insert("bob".to_string(), "Ana".to_string());

    let drawing = Drawing::new(participants, assignments, 1_000);
    drawing.validate().unwrap();
}

#[test]
fn drawing_serializes_with_stable_field_names() {
    let drawing = pair("Alice", "Bob");
    let json = serde_json::to_value(&drawing).unwrap();

    assert!(json.get("uuid").is_some());
    assert_eq!(json["drawn_at"], 1_700_000_000_000i64);
    assert_eq!(json["participants"][0]["slug"], "alice");
    assert_eq!(json["assignments"]["alice"], "Bob");

    let roundtrip: Drawing = serde_json::from_value(json).unwrap();
    assert_eq!(roundtrip, drawing);
}
