//! Differential testing: the inverted index against the linear-scan oracle.
//!
//! Scores are computed differently (BM25 vs coverage over length) so only the
//! matched document sets are compared, for every tier the planner produces.

use std::collections::BTreeSet;

use crate::common::{single_field_documents, single_field_index};
use fieldseek::search::planner::plan;
use fieldseek::{
    InvertedIndex, QueryTier, ScanIndex, SearchConfig, SearchableField, TextIndex, TierStrategy,
};
use proptest::prelude::*;

const VOCAB: [&str; 8] = ["acme", "acmi", "corp", "cord", "west", "trade", "ab", "of"];

fn words(max: usize) -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(VOCAB.to_vec()), 0..max)
}

/// At least one word: tiers with no terms are rejected by both indexes.
fn query_words(max: usize) -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(VOCAB.to_vec()), 1..max)
}

fn corpus() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(words(7).prop_map(|w| w.join(" ")), 1..12)
}

fn hit_set<I: TextIndex>(index: &I, tier: &QueryTier) -> BTreeSet<usize> {
    index
        .query(tier, usize::MAX)
        .unwrap()
        .into_iter()
        .map(|hit| hit.object_index)
        .collect()
}

fn compare(values: &[String], tiers: &[QueryTier]) -> Result<(), TestCaseError> {
    let refs: Vec<&str> = values.iter().map(String::as_str).collect();
    let docs = single_field_documents(&refs);
    let inverted: InvertedIndex = single_field_index(&docs);
    let scan: ScanIndex = single_field_index(&docs);

    for tier in tiers {
        prop_assert_eq!(
            hit_set(&inverted, tier),
            hit_set(&scan, tier),
            "{} over {:?}",
            tier.strategy.label(),
            values
        );
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn diff_planned_tiers(values in corpus(), query in words(4)) {
        let field = SearchableField::new("name");
        let tiers = plan(0, &query.join(" "), &field, &SearchConfig::default());
        compare(&values, &tiers)?;
    }

    #[test]
    fn diff_near_phrase_any_slop(values in corpus(), query in query_words(4), slop in 0usize..4) {
        let tier = QueryTier {
            field: 0,
            level: 1,
            strategy: TierStrategy::NearPhrase {
                terms: query.iter().map(|w| w.to_string()).collect(),
                slop,
            },
        };
        compare(&values, &[tier])?;
    }

    #[test]
    fn diff_minimum_terms_any_minimum(
        values in corpus(),
        query in query_words(5),
        minimum in 0usize..6
    ) {
        let tier = QueryTier {
            field: 0,
            level: 3,
            strategy: TierStrategy::MinimumTerms {
                terms: query.iter().map(|w| w.to_string()).collect(),
                minimum,
            },
        };
        compare(&values, &[tier])?;
    }

    #[test]
    fn diff_fuzzy_distance_two(values in corpus(), term in prop::sample::select(VOCAB.to_vec())) {
        let tier = QueryTier {
            field: 0,
            level: 0,
            strategy: TierStrategy::FuzzyTerm { term: term.to_string(), max_distance: 2 },
        };
        compare(&values, &[tier])?;
    }

    #[test]
    fn inverted_scores_positive_and_ranked(values in corpus(), query in words(4)) {
        let refs: Vec<&str> = values.iter().map(String::as_str).collect();
        let docs = single_field_documents(&refs);
        let inverted: InvertedIndex = single_field_index(&docs);
        let field = SearchableField::new("name");
        let tiers = plan(0, &query.join(" "), &field, &SearchConfig::default());
        for tier in &tiers {
            let hits = inverted.query(tier, usize::MAX).unwrap();
            prop_assert!(hits.iter().all(|h| h.score > 0.0 && h.score.is_finite()));
            prop_assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }
}
