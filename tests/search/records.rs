//! JSON records searched through a schema file.

use crate::common::ids;
use fieldseek::{Record, SchemaError, SchemaFile};

const SCHEMA: &str = r#"{
    "fields": [
        { "name": "name", "priority": 1, "matchThreshold": 50 },
        { "name": "code", "priority": 2, "exactMatchOnly": true },
        { "name": "city", "priority": 3 }
    ],
    "relation": { "codeField": "code", "parentField": "parentCode" },
    "config": { "nearPhraseSlop": 1 }
}"#;

const RECORDS: &str = r#"[
    { "code": "ACME", "parentCode": "ACME", "name": "Acme Corp", "city": "Springfield" },
    { "code": "ACMEL", "parentCode": "ACME", "name": "Acme Logistics", "city": "Shelbyville" },
    { "code": "GLBX", "parentCode": "GLBX", "name": "Globex", "city": "Cypress Creek" },
    { "code": "EMPTY", "parentCode": "EMPTY", "name": "", "city": null }
]"#;

fn records() -> Vec<Record> {
    Record::parse_all(RECORDS).unwrap()
}

#[test]
fn test_schema_file_config_applies() {
    let schema = SchemaFile::parse(SCHEMA).unwrap();
    let engine = schema.build_engine(records()).unwrap();
    assert_eq!(engine.config().near_phrase_slop, 1);
    assert_eq!(engine.config().fetch_multiplier, 2);
    assert_eq!(engine.schema().len(), 3);
}

#[test]
fn test_search_records_with_relations() {
    let engine = SchemaFile::parse(SCHEMA)
        .unwrap()
        .build_engine(records())
        .unwrap();

    let results = engine.search("acme corp", 10).unwrap();
    assert_eq!(ids(&results), vec![0, 1]);
    assert_eq!(results[0].object.get("city"), Some("Springfield"));
    assert_eq!(results[1].matched_text, "ACMEL");
}

#[test]
fn test_blank_record_values_skipped() {
    let engine = SchemaFile::parse(SCHEMA)
        .unwrap()
        .build_engine(records())
        .unwrap();
    assert_eq!(engine.indexed_value_count(0), 3);
    assert_eq!(engine.indexed_value_count(2), 3);
}

#[test]
fn test_results_serialize_camel_case() {
    let engine = SchemaFile::parse(SCHEMA)
        .unwrap()
        .build_engine(records())
        .unwrap();
    let results = engine.search("Globex", 1).unwrap();
    let json = serde_json::to_value(&results).unwrap();

    assert_eq!(json[0]["objectIndex"], 2);
    assert_eq!(json[0]["matchedProperty"], "name");
    assert_eq!(json[0]["matchPercentage"], 100.0);
    assert_eq!(json[0]["object"]["code"], "GLBX");
}

#[test]
fn test_schema_file_rejects_oversized_slop() {
    let schema = SchemaFile::parse(
        r#"{ "fields": [{ "name": "name" }], "config": { "nearPhraseSlop": 4294967295 } }"#,
    )
    .unwrap();
    let result = schema.build_engine(records());
    assert!(matches!(result, Err(SchemaError::InvalidConfig(_))));
}
