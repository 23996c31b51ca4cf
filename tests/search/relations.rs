//! Relation expansion through the code / ultimate-parent hierarchy.

use crate::common::{
    assert_close, company, engine_without_relations, ids, sample_companies, subsidiary,
};
use fieldseek::Engine;

#[test]
fn test_matched_parent_pulls_in_subsidiary() {
    let engine = Engine::new(vec![
        company("A", "Alpha Industries", "Xenia"),
        subsidiary("B", "A", "Beta Works", "Yuma"),
        company("C", "Gamma Labs", "Zion"),
    ])
    .unwrap();

    let results = engine.search("Alpha Industries", 10).unwrap();
    assert_eq!(ids(&results), vec![0, 1]);

    let related = &results[1];
    assert_eq!(related.matched_text, "B");
    assert_eq!(related.matched_property, "code");
    assert_close(related.match_percentage, 100.0);
    assert!(related.score < results[0].score);
}

#[test]
fn test_matched_subsidiary_pulls_in_family() {
    let engine = Engine::new(sample_companies()).unwrap();
    let results = engine.search("Roadrunner Supply", 10).unwrap();

    // The parent ACME by code, the sibling ACMEL by shared parent
    assert_eq!(ids(&results), vec![2, 0, 1]);
    assert_eq!(results[1].matched_text, "ACME");
    assert_eq!(results[2].matched_text, "ACMEL");
    assert_eq!(results[1].score, results[2].score);
    assert!(results[1].score < results[0].score);
}

#[test]
fn test_expansion_respects_max_results() {
    let engine = Engine::new(sample_companies()).unwrap();
    let results = engine.search("Roadrunner Supply", 2).unwrap();
    assert_eq!(ids(&results), vec![2, 0]);
}

#[test]
fn test_no_expansion_without_relations() {
    let engine = engine_without_relations(sample_companies());
    let results = engine.search("Roadrunner Supply", 10).unwrap();
    assert_eq!(ids(&results), vec![2]);
}

#[test]
fn test_standalone_match_expands_nothing() {
    let engine = Engine::new(sample_companies()).unwrap();
    let results = engine.search("Initech", 10).unwrap();
    assert_eq!(ids(&results), vec![4]);
}

#[test]
fn test_related_scores_below_every_genuine_match() {
    let engine = Engine::new(sample_companies()).unwrap();
    let results = engine.search("acme", 20).unwrap();

    let genuine: Vec<f64> = results
        .iter()
        .filter(|r| r.object_index != 2)
        .map(|r| r.score)
        .collect();
    let related = results
        .iter()
        .find(|r| r.object_index == 2)
        .expect("ROAD belongs to ACME");
    assert!(genuine.iter().all(|&score| score > related.score));
    assert_eq!(results.last().map(|r| r.object_index), Some(2));
}
