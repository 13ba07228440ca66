//! Validates gallery response fixtures against the frozen JSON schema and
//! checks that the item source accepts what the schema accepts.

use hero_gallery_core::MediaKind;
use hero_gallery_pages::build_pages;
use hero_gallery_source::parse_gallery_response;
use jsonschema::JSONSchema;
use serde_json::Value;

const SCHEMA: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../contracts/gallery-response.schema.json"
);
const VALID: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../contracts/fixtures/gallery-response.valid.json"
);
const INVALID: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../contracts/fixtures/gallery-response.invalid.json"
);

fn read(path: &str) -> String {
    std::fs::read_to_string(path).expect("json file should be readable")
}

fn load_json(path: &str) -> Value {
    serde_json::from_str(&read(path)).expect("json file should be valid")
}

fn compile_validator(schema_path: &str) -> JSONSchema {
    let schema = load_json(schema_path);
    JSONSchema::compile(&schema).expect("schema should compile")
}

#[test]
fn gallery_fixture_matches_schema() {
    let validator = compile_validator(SCHEMA);
    assert!(
        validator.is_valid(&load_json(VALID)),
        "gallery fixture should validate against schema"
    );
}

#[test]
fn invalid_gallery_fixture_is_rejected_by_schema() {
    let validator = compile_validator(SCHEMA);
    assert!(!validator.is_valid(&load_json(INVALID)));
}

#[test]
fn schema_valid_fixture_normalizes_every_record() {
    let items = parse_gallery_response(&read(VALID)).expect("fixture should parse");

    assert_eq!(items.len(), 7);
    assert_eq!(items[3].id, "image-/gallery/suite.jpg-3");
    assert_eq!(items[1].kind, MediaKind::Video);
    assert_eq!(items[0].alt_text.as_deref(), Some("Terrace at dusk"));
}

#[test]
fn schema_valid_fixture_builds_pages_led_by_portrait_video() {
    let items = parse_gallery_response(&read(VALID)).expect("fixture should parse");

    let pages = build_pages(&items);

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].left.id, "hero-02");
    assert_eq!(pages[1].left.id, "hero-06");
}

#[test]
fn schema_invalid_records_are_skipped_not_fatal() {
    let items = parse_gallery_response(&read(INVALID)).expect("envelope is still well formed");

    let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, vec!["hero-01"]);
}
