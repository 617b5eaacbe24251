use serde_json::{json, Map};

use bootcamp_builder_server::bootcamp::models::{
    BootcampDocument, GenerateResponse, Identitas, Level,
};
use bootcamp_builder_server::ApiError;

#[test]
fn test_identitas_defaults() {
    let identitas = Identitas::new("Web Dev", 8, Level::Beginner);
    assert_eq!(identitas.nama, "Web Dev");
    assert!(identitas.kode.starts_with("BC-"));
    assert_eq!(identitas.durasi, 8);
    assert_eq!(identitas.mode, "Online");
    assert_eq!(identitas.level, Level::Beginner);
    assert_eq!(identitas.kapasitas, 25);
}

#[test]
fn test_document_assemble_sets_id_and_timestamps() {
    let mut content = Map::new();
    content.insert("modules".to_string(), json!([]));
    let doc = BootcampDocument::assemble(content, Identitas::new("Web Dev", 8, Level::Beginner));

    assert!(doc.id.starts_with("boot-"));
    assert_eq!(doc.created_at, doc.updated_at);
    assert!(chrono::DateTime::parse_from_rfc3339(&doc.created_at).is_ok());
}

#[test]
fn test_document_serializes_flattened_content() {
    let mut content = Map::new();
    content.insert("modules".to_string(), json!([{"title": "Intro"}]));
    let doc = BootcampDocument::assemble(content, Identitas::new("Web Dev", 8, Level::Advanced));

    let value = serde_json::to_value(&doc).unwrap();
    // Open-ended content sits at the top level, not under a "content" key.
    assert_eq!(value["modules"], json!([{"title": "Intro"}]));
    assert!(value.get("content").is_none());
    assert!(value["createdAt"].as_str().is_some());
    assert!(value["updatedAt"].as_str().is_some());
    assert_eq!(value["identitas"]["level"], "Advanced");
}

#[test]
fn test_document_round_trip_preserves_open_ended_fields() {
    let original = json!({
        "id": "boot-1754550000000",
        "identitas": {
            "nama": "Web Dev",
            "kode": "BC-1754550000000",
            "durasi": 8,
            "mode": "Online",
            "level": "Beginner",
            "kapasitas": 25
        },
        "modules": [{"title": "Intro", "weeks": 2}],
        "catatan": "draft",
        "createdAt": "2026-08-07T14:30:00+00:00",
        "updatedAt": "2026-08-07T14:30:00+00:00"
    });

    let doc: BootcampDocument = serde_json::from_value(original.clone()).unwrap();
    assert!(doc.content.contains_key("modules"));
    assert!(doc.content.contains_key("catatan"));

    let back = serde_json::to_value(&doc).unwrap();
    assert_eq!(back, original);
}

#[test]
fn test_generate_response_envelope() {
    let mut content = Map::new();
    content.insert("modules".to_string(), json!([]));
    let doc = BootcampDocument::assemble(content, Identitas::new("Web Dev", 8, Level::Beginner));
    let response = GenerateResponse::new(doc);

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["data"]["identitas"]["nama"], "Web Dev");
}

#[test]
fn test_level_wire_format() {
    assert_eq!(serde_json::to_string(&Level::Beginner).unwrap(), "\"Beginner\"");
    assert_eq!(serde_json::to_string(&Level::Advanced).unwrap(), "\"Advanced\"");

    let level: Level = serde_json::from_str("\"Intermediate\"").unwrap();
    assert_eq!(level, Level::Intermediate);
    assert_eq!(level.to_string(), "Intermediate");

    let invalid: Result<Level, _> = serde_json::from_str("\"Expert\"");
    assert!(invalid.is_err());
}

#[test]
fn test_api_error_shape() {
    let error = ApiError::new("Missing required fields");
    let value = serde_json::to_value(&error).unwrap();
    assert_eq!(value, json!({"success": false, "error": "Missing required fields"}));
}

#[test]
fn test_document_codes_derive_from_time() {
    let identitas = Identitas::new("Web Dev", 8, Level::Beginner);
    let millis: i64 = identitas.kode.trim_start_matches("BC-").parse().unwrap();
    assert!(millis > 0);
}
