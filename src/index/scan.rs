// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Linear-scan index: tokenize at build time, scan every document per query.
//!
//! No postings, no idf. Each tier is evaluated directly against a document's
//! token list, which makes the matching rules easy to read off. The property
//! tests use it as an oracle: the inverted index must match exactly the same
//! documents for every strategy.
//!
//! Score is matched term weight over the square root of the field length, so
//! short fields with full coverage rank first.

use crate::error::QueryExecutionError;
use crate::fuzzy::bounded_distance;
use crate::index::{
    check_tier, distinct_terms, fuzzy_weight, phrase_frequency, rank_hits, TextIndex,
};
use crate::types::{IndexHit, IndexedDocument, QueryTier, TierStrategy};
use crate::util::tokenize;

/// Token lists per field, per object.
#[derive(Debug, Default)]
pub struct ScanIndex {
    field_count: usize,
    /// `docs[object_index][field]`
    docs: Vec<Vec<Option<Vec<String>>>>,
}

fn positions(tokens: &[String], term: &str) -> Vec<u32> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| token.as_str() == term)
        .map(|(i, _)| i as u32)
        .collect()
}

/// Best fuzzy weight of `term` against any token, if any token is close enough.
fn best_fuzzy(tokens: &[String], term: &str, max_distance: usize) -> Option<f64> {
    tokens
        .iter()
        .filter_map(|token| bounded_distance(term, token, max_distance))
        .min()
        .map(|distance| fuzzy_weight(term, distance))
}

/// Matched weight of `strategy` against one token list, `None` if it doesn't match.
fn evaluate(tokens: &[String], strategy: &TierStrategy) -> Option<f64> {
    match strategy {
        TierStrategy::ExactPhrase { terms } => phrase(tokens, terms, 0),
        TierStrategy::NearPhrase { terms, slop } => phrase(tokens, terms, *slop),
        TierStrategy::AllTerms { terms } => minimum(tokens, terms, usize::MAX),
        TierStrategy::MinimumTerms { terms, minimum: min } => minimum(tokens, terms, *min),
        TierStrategy::AnchoredFuzzy {
            terms,
            fuzzy,
            max_distance,
        } => {
            let anchored = minimum(tokens, terms, 1)?;
            let boost: f64 = fuzzy
                .iter()
                .filter(|term| !tokens.contains(term))
                .filter_map(|term| best_fuzzy(tokens, term, *max_distance))
                .sum();
            Some(anchored + boost)
        }
        TierStrategy::FuzzyTerm { term, max_distance } => best_fuzzy(tokens, term, *max_distance),
    }
}

fn phrase(tokens: &[String], terms: &[String], slop: usize) -> Option<f64> {
    if terms.is_empty() {
        return None;
    }
    let lists: Vec<Vec<u32>> = terms.iter().map(|term| positions(tokens, term)).collect();
    let slices: Vec<&[u32]> = lists.iter().map(Vec::as_slice).collect();
    let freq = phrase_frequency(&slices, slop);
    (freq > 0).then(|| (terms.len() * freq) as f64)
}

fn minimum(tokens: &[String], terms: &[String], min: usize) -> Option<f64> {
    let distinct = distinct_terms(terms);
    if distinct.is_empty() {
        return None;
    }
    let required = min.clamp(1, distinct.len());
    let matched = distinct
        .iter()
        .filter(|term| tokens.iter().any(|token| token == *term))
        .count();
    (matched >= required).then_some(matched as f64)
}

impl TextIndex for ScanIndex {
    fn with_fields(field_count: usize) -> Self {
        Self {
            field_count,
            docs: Vec::new(),
        }
    }

    fn index(&mut self, doc: &IndexedDocument) {
        let field_count = self.field_count;
        if self.docs.len() <= doc.object_index {
            self.docs.resize_with(doc.object_index + 1, || vec![None; field_count]);
        }
        self.docs[doc.object_index] = (0..field_count)
            .map(|field| {
                doc.field(field)
                    .map(tokenize)
                    .filter(|tokens| !tokens.is_empty())
            })
            .collect();
    }

    fn query(&self, tier: &QueryTier, limit: usize) -> Result<Vec<IndexHit>, QueryExecutionError> {
        if tier.field >= self.field_count {
            return Err(QueryExecutionError::UnknownField(tier.field));
        }
        check_tier(tier)?;

        let hits = self
            .docs
            .iter()
            .enumerate()
            .filter_map(|(object_index, fields)| {
                let tokens = fields.get(tier.field)?.as_ref()?;
                let weight = evaluate(tokens, &tier.strategy)?;
                Some(IndexHit {
                    object_index,
                    score: weight / (tokens.len() as f64).sqrt(),
                })
            })
            .collect();

        Ok(rank_hits(hits, limit))
    }
}
