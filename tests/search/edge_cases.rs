//! Blank input, missing values, schema errors and index failures.

use crate::common::{company, engine_without_relations, ids, sample_companies};
use fieldseek::search::tiered::execute;
use fieldseek::testing::Company;
use fieldseek::{
    Engine, Error, FieldDescriptor, FieldSchema, IndexedDocument, InvertedIndex,
    QueryExecutionError, QueryTier, ScanIndex, SchemaError, SearchConfig, Searchable,
    TextIndex, TierStrategy,
};

#[test]
fn test_blank_query_returns_nothing() {
    let engine = Engine::new(sample_companies()).unwrap();
    assert!(engine.search("", 10).unwrap().is_empty());
    assert!(engine.search(" \n\t ", 10).unwrap().is_empty());
}

#[test]
fn test_zero_max_results_returns_nothing() {
    let engine = Engine::new(sample_companies()).unwrap();
    assert!(engine.search("Acme Corp", 0).unwrap().is_empty());
}

#[test]
fn test_punctuation_only_query() {
    let engine = Engine::new(sample_companies()).unwrap();
    assert!(engine.search("-- , !", 10).unwrap().is_empty());
}

#[test]
fn test_short_word_only_hits_exact_fields() {
    let engine = engine_without_relations(vec![company("ABC", "Abc Trading", "Nowhere")]);
    let results = engine.search("abc", 10).unwrap();
    // Too short to fuzzy-match the name; the exact-only code field still plans it
    assert_eq!(ids(&results), vec![0]);
    assert_eq!(results[0].matched_property, "code");
}

#[test]
fn test_missing_values_are_not_indexed() {
    let engine = Engine::new(sample_companies()).unwrap();
    let notes = engine.schema().position("notes").unwrap();
    assert_eq!(engine.indexed_value_count(notes), 1);
    assert_eq!(engine.document(0).unwrap().field(notes), None);
    assert_eq!(engine.len(), 7);
    assert_eq!(engine.object(4).map(|c| c.code.as_str()), Some("INIT"));
}

#[test]
fn test_diacritics_fold() {
    let engine = engine_without_relations(vec![
        company("SG", "Société Générale", "Paris"),
        company("XX", "Other", "Lyon"),
    ]);
    let results = engine.search("societe generale", 10).unwrap();
    assert_eq!(ids(&results), vec![0]);
    assert_eq!(results[0].matched_text, "Société Générale");
}

struct Duplicated {
    name: String,
}

impl Searchable for Duplicated {
    fn search_fields() -> Vec<FieldDescriptor<Self>> {
        vec![
            FieldDescriptor::new("name", |d: &Duplicated| Some(d.name.as_str())),
            FieldDescriptor::new("name", |d: &Duplicated| Some(d.name.as_str())),
        ]
    }
}

#[test]
fn test_schema_errors_abort_build() {
    let err = Engine::new(vec![Duplicated { name: "x".into() }]).unwrap_err();
    assert_eq!(err, SchemaError::DuplicateField("name".into()));

    let err = FieldSchema::<Company>::new(Vec::new()).unwrap_err();
    assert_eq!(err, SchemaError::NoSearchableFields);

    let crate_err: Error = err.into();
    assert!(matches!(crate_err, Error::Schema(_)));
}

#[test]
fn test_invalid_config_aborts_build() {
    let config = SearchConfig {
        majority_ratio: 0.0,
        ..SearchConfig::default()
    };
    let result = Engine::builder(sample_companies(), FieldSchema::of().unwrap())
        .config(config)
        .build();
    assert!(matches!(result, Err(SchemaError::InvalidConfig(_))));
}

#[test]
fn test_unknown_field_is_query_error() {
    let docs = vec![IndexedDocument {
        object_index: 0,
        fields: vec![Some("Acme".into())],
    }];
    let mut index = InvertedIndex::with_fields(1);
    index.index(&docs[0]);

    let tier = QueryTier {
        field: 5,
        level: 0,
        strategy: TierStrategy::FuzzyTerm {
            term: "acme".into(),
            max_distance: 1,
        },
    };
    let err = execute(&index, &docs, &[tier], 10, &SearchConfig::default()).unwrap_err();
    assert_eq!(err, QueryExecutionError::UnknownField(5));
}

fn name_index<I: TextIndex>(values: &[&str]) -> I {
    let mut index = I::with_fields(1);
    for (object_index, value) in values.iter().enumerate() {
        index.index(&IndexedDocument {
            object_index,
            fields: vec![Some(value.to_string())],
        });
    }
    index
}

#[test]
fn test_unbounded_slop_matches_in_order() {
    let tier = QueryTier {
        field: 0,
        level: 1,
        strategy: TierStrategy::NearPhrase {
            terms: vec!["acme".into(), "corp".into()],
            slop: usize::MAX,
        },
    };
    let values = ["Acme one two three four Corp", "Corp Acme"];

    let inverted: InvertedIndex = name_index(&values);
    let hits = inverted.query(&tier, 10).unwrap();
    assert_eq!(hits.iter().map(|h| h.object_index).collect::<Vec<_>>(), vec![0]);

    let scan: ScanIndex = name_index(&values);
    let hits = scan.query(&tier, 10).unwrap();
    assert_eq!(hits.iter().map(|h| h.object_index).collect::<Vec<_>>(), vec![0]);
}

#[test]
fn test_empty_tier_is_query_error() {
    let docs = vec![IndexedDocument {
        object_index: 0,
        fields: vec![Some("Acme".into())],
    }];
    let index: InvertedIndex = name_index(&["Acme"]);
    let tier = QueryTier {
        field: 0,
        level: 0,
        strategy: TierStrategy::ExactPhrase { terms: vec![] },
    };

    let err = execute(&index, &docs, &[tier.clone()], 10, &SearchConfig::default()).unwrap_err();
    assert!(matches!(err, QueryExecutionError::InvalidTier(_)));

    let scan: ScanIndex = name_index(&["Acme"]);
    assert!(matches!(
        scan.query(&tier, 10),
        Err(QueryExecutionError::InvalidTier(_))
    ));
}
