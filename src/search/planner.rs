// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query planning: one search text, a ladder of increasingly forgiving tiers.
//!
//! For a multi-word query against a fuzzy-enabled field the ladder is:
//!
//! ```text
//! level 0  exact phrase        "acme corp"      adjacent, in order
//! level 1  near phrase         "acme _ _ corp"  in order, <= slop gap
//! level 2  all terms           "corp ... acme"  any order
//! level 3  majority terms      ceil(n * 0.6) of the words
//! level 4  anchored fuzzy      >= 1 exact word, typos in the rest boost
//! ```
//!
//! A single word gets one fuzzy tier, and only if it is long enough that one
//! edit doesn't turn it into half the vocabulary. Exact-only fields get the
//! level 0 phrase and nothing else.
//!
//! The planner returns every tier; the executor stops at the first one with hits.

use crate::config::SearchConfig;
use crate::schema::SearchableField;
use crate::types::{QueryTier, TierStrategy};
use crate::util::tokenize;

/// Plan the tiers for searching `search_text` in field `field`.
pub fn plan(
    field: usize,
    search_text: &str,
    config: &SearchableField,
    tuning: &SearchConfig,
) -> Vec<QueryTier> {
    let words = tokenize(search_text);
    let strategies = strategies(words, config.exact_match_only, tuning);

    strategies
        .into_iter()
        .enumerate()
        .map(|(level, strategy)| QueryTier {
            field,
            level,
            strategy,
        })
        .collect()
}

fn strategies(words: Vec<String>, exact_only: bool, tuning: &SearchConfig) -> Vec<TierStrategy> {
    if words.is_empty() {
        return Vec::new();
    }

    if exact_only {
        return vec![TierStrategy::ExactPhrase { terms: words }];
    }

    let fuzzy_eligible = |word: &String| word.chars().count() > tuning.fuzzy_min_word_len;

    if words.len() == 1 {
        return words
            .into_iter()
            .filter(fuzzy_eligible)
            .map(|term| TierStrategy::FuzzyTerm {
                term,
                max_distance: tuning.fuzzy_max_distance,
            })
            .collect();
    }

    let minimum = majority(words.len(), tuning.majority_ratio);
    let fuzzy: Vec<String> = words.iter().filter(|w| fuzzy_eligible(*w)).cloned().collect();

    vec![
        TierStrategy::ExactPhrase {
            terms: words.clone(),
        },
        TierStrategy::NearPhrase {
            terms: words.clone(),
            slop: tuning.near_phrase_slop,
        },
        TierStrategy::AllTerms {
            terms: words.clone(),
        },
        TierStrategy::MinimumTerms {
            terms: words.clone(),
            minimum,
        },
        TierStrategy::AnchoredFuzzy {
            terms: words,
            fuzzy,
            max_distance: tuning.fuzzy_max_distance,
        },
    ]
}

/// `ceil(word_count * ratio)`, at least 1.
fn majority(word_count: usize, ratio: f64) -> usize {
    ((word_count as f64 * ratio).ceil() as usize).max(1)
}
