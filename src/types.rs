// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks passed between the index, the planner and the ranker.
//!
//! # Invariants
//!
//! - **IndexedDocument**: `object_index` is the object's position in the
//!   engine's arena. Assigned once at build time, never reused.
//!   `fields[i]` holds the stored text of schema field `i`, `None` when the
//!   object had no value (blank values are never stored).
//!
//! - **QueryTier**: `level` is the tier's position in the planned sequence.
//!   Lower level = more specific query = less score decay.
//!
//! - **ObjectSearchResult**: at most one per `object_index` in any result list,
//!   `match_percentage` in `[0, 100]`.

use serde::Serialize;

/// One object's searchable text, as handed to the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedDocument {
    pub object_index: usize,
    pub fields: Vec<Option<String>>,
}

impl IndexedDocument {
    /// Stored text of field `field`, if the object had one.
    pub fn field(&self, field: usize) -> Option<&str> {
        self.fields.get(field).and_then(|value| value.as_deref())
    }
}

/// How a tier matches a field's tokens. Terms are already normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierStrategy {
    /// All terms adjacent, in order.
    ExactPhrase { terms: Vec<String> },
    /// All terms in order, at most `slop` tokens between consecutive terms.
    NearPhrase { terms: Vec<String>, slop: usize },
    /// Every term present, any order.
    AllTerms { terms: Vec<String> },
    /// At least `minimum` distinct terms present.
    MinimumTerms { terms: Vec<String>, minimum: usize },
    /// At least one term present exactly; `fuzzy` terms add score when a
    /// token lies within `max_distance` edits of them.
    AnchoredFuzzy {
        terms: Vec<String>,
        fuzzy: Vec<String>,
        max_distance: usize,
    },
    /// A token within `max_distance` edits of `term`.
    FuzzyTerm { term: String, max_distance: usize },
}

impl TierStrategy {
    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            TierStrategy::ExactPhrase { .. } => "exact-phrase",
            TierStrategy::NearPhrase { .. } => "near-phrase",
            TierStrategy::AllTerms { .. } => "all-terms",
            TierStrategy::MinimumTerms { .. } => "majority-terms",
            TierStrategy::AnchoredFuzzy { .. } => "anchored-fuzzy",
            TierStrategy::FuzzyTerm { .. } => "fuzzy-term",
        }
    }
}

/// A query strategy scoped to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTier {
    /// Schema ordinal of the field.
    pub field: usize,
    /// Position in the planned sequence (0 = most specific).
    pub level: usize,
    pub strategy: TierStrategy,
}

/// A document the index matched, with the index's own score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexHit {
    pub object_index: usize,
    pub score: f64,
}

/// A hit from the winning tier of one field.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyMatch<'a> {
    pub field: usize,
    pub object_index: usize,
    pub matched_text: &'a str,
    /// Native index score after tier decay.
    pub raw_score: f64,
    pub tier: usize,
}

/// One ranked object in a search response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSearchResult<'a, T> {
    pub object: &'a T,
    pub object_index: usize,
    pub matched_property: &'a str,
    pub match_percentage: f64,
    pub score: f64,
    pub matched_text: &'a str,
}
