//! Tier ladder execution: first tier with hits wins, later tiers never run.

use crate::common::{
    assert_close, ids, single_field_documents, single_field_index, RecordingIndex,
};
use fieldseek::search::planner::plan;
use fieldseek::search::tiered::execute;
use fieldseek::testing::Company;
use fieldseek::{
    Engine, FieldDescriptor, FieldSchema, InvertedIndex, QueryTier, SearchConfig,
    SearchableField, TextIndex,
};

fn tiers_for(query: &str) -> Vec<QueryTier> {
    plan(0, query, &SearchableField::new("name"), &SearchConfig::default())
}

/// (object index, winning tier level) per match.
fn run(values: &[&str], query: &str) -> Vec<(usize, usize)> {
    let docs = single_field_documents(values);
    let index: InvertedIndex = single_field_index(&docs);
    execute(&index, &docs, &tiers_for(query), 10, &SearchConfig::default())
        .unwrap()
        .iter()
        .map(|m| (m.object_index, m.tier))
        .collect()
}

#[test]
fn test_exact_phrase_wins_level_zero() {
    assert_eq!(run(&["Acme Corp", "Corp Acme"], "acme corp"), vec![(0, 0)]);
}

#[test]
fn test_near_phrase_allows_intervening_words() {
    assert_eq!(run(&["Acme Global Corp", "Corp Acme"], "acme corp"), vec![(0, 1)]);
    assert_eq!(run(&["Acme of the Corp"], "acme corp"), vec![(0, 1)]);
}

#[test]
fn test_near_phrase_gap_limit() {
    // Three words in between is too far for the near tier
    assert_eq!(run(&["Acme one two three Corp"], "acme corp"), vec![(0, 2)]);
}

#[test]
fn test_falls_back_to_all_terms_with_decay() {
    let docs = single_field_documents(&["Corp Acme", "Acme Widgets"]);
    let index: RecordingIndex = single_field_index(&docs);
    let tiers = tiers_for("acme corp");

    let matches = execute(&index, &docs, &tiers, 10, &SearchConfig::default()).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].object_index, 0);
    assert_eq!(matches[0].tier, 2);
    assert_eq!(matches[0].matched_text, "Corp Acme");

    // Majority and fuzzy tiers are never attempted once all-terms hits
    assert_eq!(index.levels_for(0), vec![0, 1, 2]);

    let native = index.query(&tiers[2], 10).unwrap()[0].score;
    assert_close(matches[0].raw_score, native * 0.90);
}

#[test]
fn test_majority_terms() {
    assert_eq!(
        run(&["Acme Widgets Ltd", "Acme Tools"], "acme corp widgets"),
        vec![(0, 3)]
    );
}

#[test]
fn test_anchored_fuzzy_needs_exact_word() {
    // "acmi widgets" has no exact word for "acme widgetz"
    assert_eq!(run(&["Acme Tools", "Acmi Widgets"], "acme widgetz"), vec![(0, 4)]);
}

#[test]
fn test_single_word_fuzzy() {
    let matches = run(&["Globex", "Initech"], "globx");
    assert_eq!(matches, vec![(0, 0)]);
}

#[test]
fn test_short_single_word_plans_nothing() {
    let docs = single_field_documents(&["abc"]);
    let index: RecordingIndex = single_field_index(&docs);
    let matches = execute(&index, &docs, &tiers_for("abc"), 10, &SearchConfig::default()).unwrap();
    assert!(matches.is_empty());
    assert!(index.levels_for(0).is_empty());
}

#[test]
fn test_engine_stops_each_field_independently() {
    let schema = FieldSchema::new(vec![
        FieldDescriptor::new("name", |c: &Company| Some(c.name.as_str())),
        FieldDescriptor::new("city", |c: &Company| Some(c.city.as_str())),
    ])
    .unwrap();
    let companies = vec![
        crate::common::company("A", "Acme Corp", "Corp Acme"),
        crate::common::company("B", "Bolt", "Nowhere"),
    ];
    let engine = Engine::builder(companies, schema)
        .index::<RecordingIndex>()
        .build()
        .unwrap();

    let results = engine.search("acme corp", 5).unwrap();
    assert_eq!(ids(&results), vec![0]);
    assert_eq!(results[0].matched_property, "name");

    // name hits at level 0, city has to fall back to level 2
    assert_eq!(engine.index().levels_for(0), vec![0]);
    assert_eq!(engine.index().levels_for(1), vec![0, 1, 2]);
}
