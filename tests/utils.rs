use std::collections::HashSet;

use mirrorgraph::utils::id_generator::IdGenerator;
use mirrorgraph::utils::json_ext::json_type_name;
use serde_json::{Value, json};

#[test]
fn session_ids_are_prefixed_and_collision_free() {
    let generator = IdGenerator::new();
    let ids: HashSet<String> = (0..100).map(|_| generator.generate_session_id()).collect();
    assert_eq!(ids.len(), 100);
    for id in &ids {
        assert!(id.starts_with("session-"), "unexpected id shape: {id}");
    }
}

#[test]
fn json_type_names_cover_every_value_kind() {
    let test_cases = vec![
        (Value::Null, "null"),
        (json!(true), "boolean"),
        (json!(42), "number"),
        (json!("key"), "string"),
        (json!(["a", "b"]), "array"),
        (json!({"a": ["b"]}), "object"),
    ];

    for (value, expected) in test_cases {
        assert_eq!(json_type_name(&value), expected);
    }
}
