//! One result per object, best field wins, stable ordering.

use crate::common::{company, engine_without_relations, ids, sample_companies};

#[test]
fn test_one_result_per_object_across_fields() {
    let engine = engine_without_relations(sample_companies());
    // "acme" hits name, code and notes fields
    let results = engine.search("acme", 20).unwrap();
    let mut seen = ids(&results);
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), results.len());
    assert_eq!(seen, vec![0, 1, 5, 6]);
}

#[test]
fn test_best_field_is_reported() {
    let engine = engine_without_relations(vec![company("ZZ", "Springfield Tools", "Springfield")]);
    let results = engine.search("springfield", 10).unwrap();
    assert_eq!(results.len(), 1);
    // name (priority 1) beats city (priority 3) despite city's closer match
    assert_eq!(results[0].matched_property, "name");
}

#[test]
fn test_sorted_by_score_descending() {
    let engine = engine_without_relations(sample_companies());
    let results = engine.search("acme", 20).unwrap();
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    assert_eq!(results[0].object_index, 0);
}

#[test]
fn test_equal_scores_ordered_by_object_index() {
    let engine = engine_without_relations(vec![
        company("T1", "Twin Peaks", "Alpha"),
        company("XX", "Unrelated", "Beta"),
        company("T2", "Twin Peaks", "Gamma"),
    ]);
    let results = engine.search("Twin Peaks", 10).unwrap();
    assert_eq!(ids(&results), vec![0, 2]);
    assert_eq!(results[0].score, results[1].score);
}

#[test]
fn test_truncates_to_max_results() {
    let engine = engine_without_relations(sample_companies());
    let results = engine.search("acme", 2).unwrap();
    assert_eq!(results.len(), 2);
    let full = engine.search("acme", 20).unwrap();
    assert_eq!(ids(&results), ids(&full[..2]));
}
