use std::{fs, path::PathBuf};

use archimate_core::{Bounds, FolderKey, schema::MODEL_ID};
use archimate_parser::{
    ParseError, markup, parse, parse::parse_model, serialize, serialize::serialize_model,
};

fn demo_document() -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos/retail.archimate");
    fs::read_to_string(&path).expect("Failed to read demo document")
}

#[test]
fn test_parse_demo_document() {
    let model = parse(&demo_document()).expect("Failed to parse");

    assert_eq!(model.name, "Retail & Logistics");
    assert_eq!(
        model.purpose.as_deref(),
        Some("Reference model for the retail ordering flow.")
    );
    assert_eq!(model.element_count(), 11);

    let customer = model
        .element("id-act00000000000000000000000000001")
        .expect("customer");
    assert_eq!(customer.kind, "BusinessActor");
    assert_eq!(
        customer.documentation.as_deref(),
        Some("Anyone placing an order <online or in store>.")
    );
    assert_eq!(customer.property("segment"), Some("consumer"));

    let relations = model.folder(FolderKey::Relations).elements();
    assert_eq!(relations.len(), 3);
    assert!(relations.iter().all(|relation| relation.is_relationship()));

    let view = &model.folder(FolderKey::Diagrams).elements()[0];
    assert_eq!(view.children.len(), 3);
    let group = &view.children[1];
    assert_eq!(group.kind, "Group");
    assert_eq!(group.children[0].bounds, Bounds::new(20.0, 40.0, 120.0, 55.0));
    assert_eq!(
        group.children[0].source_connections[0].bendpoints[0]
            .get("startX")
            .map(String::as_str),
        Some("-80")
    );
    assert_eq!(view.children[2].content.as_deref(), Some("Draft for review."));
}

#[test]
fn test_round_trip_preserves_model() {
    let model = parse(&demo_document()).expect("Failed to parse");

    let text = serialize(&model).expect("Failed to serialize");
    let reparsed = parse(&text).expect("Failed to parse serialized document");

    assert_eq!(reparsed, model);
}

#[test]
fn test_serialized_tree_matches_document() {
    let mut document = markup::parse_document(&demo_document()).expect("Failed to parse markup");
    let model = parse_model(&document).expect("Failed to parse model");

    // The root id is always written as the fixed model id.
    document.set_attribute("id", MODEL_ID);

    assert_eq!(serialize_model(&model), document);
}

#[test]
fn test_round_trip_is_stable_text() {
    let model = parse(&demo_document()).expect("Failed to parse");

    let first = serialize(&model).expect("Failed to serialize");
    let second = serialize(&parse(&first).expect("Failed to reparse")).expect("Failed to reserialize");

    assert_eq!(first, second);
}

#[test]
fn test_serialized_document_shape() {
    let model = parse(&demo_document()).expect("Failed to parse");
    let text = serialize(&model).expect("Failed to serialize");

    assert!(text.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    let root = markup::parse_document(&text).expect("Failed to parse markup");
    assert_eq!(root.attribute("version"), Some("5.0.0"));
    assert_eq!(root.children_named("folder").count(), 9);

    let view = root
        .children_named("folder")
        .find(|folder| folder.attribute("type") == Some("diagrams"))
        .and_then(|folder| folder.child_named("element"))
        .expect("view element");
    let names: Vec<_> = view.attributes.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["xsi:type", "name", "id", "viewpoint"]);
}

#[test]
fn test_invalid_documents_are_rejected() {
    assert!(matches!(parse("not markup <"), Err(ParseError::Markup { .. })));
    assert!(matches!(
        parse(r#"<model:diagram name="x"/>"#),
        Err(ParseError::MissingRoot { .. })
    ));
}
