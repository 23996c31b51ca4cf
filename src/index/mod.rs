// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The full-text index capability.
//!
//! The engine never looks inside an index. It hands each [`IndexedDocument`]
//! to [`TextIndex::index`] once at build time, then asks [`TextIndex::query`]
//! for scored hits of one [`QueryTier`] at a time. Two implementations:
//! - **Inverted**: term → postings with token positions, BM25-style scores
//! - **Scan**: re-tokenizes stored text per query. Slow, obviously correct,
//!   and the oracle the inverted index is tested against
//!
//! Both must agree on *which* documents a tier matches. Scores are each
//! index's own business; the ranker only uses them as a base to scale.

mod inverted;
mod scan;

pub use inverted::InvertedIndex;
pub use scan::ScanIndex;

use crate::error::QueryExecutionError;
use crate::types::{IndexHit, IndexedDocument, QueryTier, TierStrategy};

/// A pluggable full-text index over a fixed number of fields.
pub trait TextIndex: Send + Sync {
    /// Empty index for a schema with `field_count` fields.
    fn with_fields(field_count: usize) -> Self
    where
        Self: Sized;

    /// Add one document. Documents arrive in ascending `object_index` order.
    fn index(&mut self, doc: &IndexedDocument);

    /// Up to `limit` hits for `tier`, best first.
    fn query(&self, tier: &QueryTier, limit: usize) -> Result<Vec<IndexHit>, QueryExecutionError>;
}

/// Sort hits best-first (score desc, then object index asc) and keep `limit`.
pub(crate) fn rank_hits(mut hits: Vec<IndexHit>, limit: usize) -> Vec<IndexHit> {
    hits.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.object_index.cmp(&b.object_index))
    });
    hits.truncate(limit);
    hits
}

/// Number of start positions from which the terms occur in order with at most
/// `slop` tokens between neighbours.
///
/// `positions[i]` lists the token positions of term `i`, ascending. With
/// `slop = 0` this counts exact phrase occurrences.
pub(crate) fn phrase_frequency(positions: &[&[u32]], slop: usize) -> usize {
    let Some((first, rest)) = positions.split_first() else {
        return 0;
    };
    let window = u32::try_from(slop).unwrap_or(u32::MAX).saturating_add(1);

    first
        .iter()
        .filter(|&&start| {
            let mut reachable = vec![start];
            for next in rest {
                reachable = next
                    .iter()
                    .copied()
                    .filter(|&q| reachable.iter().any(|&r| q > r && q - r <= window))
                    .collect();
                if reachable.is_empty() {
                    return false;
                }
            }
            true
        })
        .count()
}

/// Rejects tiers no index can execute: a term strategy with no terms, or a
/// blank fuzzy term.
pub(crate) fn check_tier(tier: &QueryTier) -> Result<(), QueryExecutionError> {
    let empty = match &tier.strategy {
        TierStrategy::ExactPhrase { terms }
        | TierStrategy::NearPhrase { terms, .. }
        | TierStrategy::AllTerms { terms }
        | TierStrategy::MinimumTerms { terms, .. }
        | TierStrategy::AnchoredFuzzy { terms, .. } => terms.is_empty(),
        TierStrategy::FuzzyTerm { term, .. } => term.is_empty(),
    };
    if empty {
        return Err(QueryExecutionError::InvalidTier(format!(
            "{} tier on field {} has no terms",
            tier.strategy.label(),
            tier.field
        )));
    }
    Ok(())
}

/// Distinct terms, first occurrence wins.
pub(crate) fn distinct_terms(terms: &[String]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::with_capacity(terms.len());
    for term in terms {
        if !seen.contains(&term.as_str()) {
            seen.push(term);
        }
    }
    seen
}

/// Weight of a fuzzy expansion: 1.0 for an exact hit, less per edit.
pub(crate) fn fuzzy_weight(term: &str, distance: usize) -> f64 {
    let len = term.chars().count().max(1) as f64;
    (1.0 - distance as f64 / len).max(0.1)
}
