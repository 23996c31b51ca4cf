// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Positional inverted index, one per field.
//!
//! # Invariants
//!
//! 1. **POSTING_LIST_SORTED**: each posting list is sorted by object index,
//!    positions within a posting ascending
//! 2. **NON_EMPTY**: every term has at least one posting, every posting at
//!    least one position
//! 3. **LENGTHS_ALIGNED**: `lengths[i] > 0` iff object `i` has a value for the field
//!
//! Scores are BM25 (k1 = 1.2, b = 0.75) summed over matched terms. Phrase
//! tiers use phrase frequency as the term frequency and the summed idf of the
//! phrase terms. Fuzzy expansions are down-weighted by edit distance.

use std::collections::BTreeMap;

use crate::error::QueryExecutionError;
use crate::fuzzy::bounded_distance;
use crate::index::{
    check_tier, distinct_terms, fuzzy_weight, phrase_frequency, rank_hits, TextIndex,
};
use crate::types::{IndexHit, IndexedDocument, QueryTier, TierStrategy};
use crate::util::tokenize;

const BM25_K1: f64 = 1.2;
const BM25_B: f64 = 0.75;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Posting {
    object_index: usize,
    positions: Vec<u32>,
}

#[derive(Debug, Default)]
struct FieldPostings {
    /// BTreeMap keeps vocabulary walks (fuzzy expansion) in a stable order.
    terms: BTreeMap<String, Vec<Posting>>,
    /// Token count per object index, 0 = no value.
    lengths: Vec<u32>,
    doc_count: usize,
    total_len: u64,
}

impl FieldPostings {
    fn insert(&mut self, object_index: usize, text: &str) {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return;
        }

        if self.lengths.len() <= object_index {
            self.lengths.resize(object_index + 1, 0);
        }
        self.lengths[object_index] = tokens.len() as u32;
        self.doc_count += 1;
        self.total_len += tokens.len() as u64;

        for (position, token) in tokens.into_iter().enumerate() {
            let postings = self.terms.entry(token).or_default();
            match postings.last_mut() {
                Some(last) if last.object_index == object_index => {
                    last.positions.push(position as u32);
                }
                _ => postings.push(Posting {
                    object_index,
                    positions: vec![position as u32],
                }),
            }
        }
    }

    fn postings(&self, term: &str) -> &[Posting] {
        self.terms.get(term).map_or(&[], Vec::as_slice)
    }

    fn positions(&self, term: &str, object_index: usize) -> Option<&[u32]> {
        let postings = self.postings(term);
        postings
            .binary_search_by_key(&object_index, |p| p.object_index)
            .ok()
            .map(|i| postings[i].positions.as_slice())
    }

    fn idf(&self, term: &str) -> f64 {
        let n = self.doc_count as f64;
        let df = self.postings(term).len() as f64;
        (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
    }

    fn tf_norm(&self, tf: usize, object_index: usize) -> f64 {
        let len = self.lengths.get(object_index).copied().unwrap_or(0) as f64;
        let avg = if self.doc_count == 0 {
            1.0
        } else {
            self.total_len as f64 / self.doc_count as f64
        };
        let tf = tf as f64;
        tf * (BM25_K1 + 1.0) / (tf + BM25_K1 * (1.0 - BM25_B + BM25_B * len / avg))
    }

    fn term_score(&self, term: &str, posting: &Posting) -> f64 {
        self.idf(term) * self.tf_norm(posting.positions.len(), posting.object_index)
    }

    /// Vocabulary terms within `max_distance` edits of `term`, with distances.
    fn expand(&self, term: &str, max_distance: usize) -> Vec<(&str, usize)> {
        self.terms
            .keys()
            .filter_map(|candidate| {
                bounded_distance(term, candidate, max_distance)
                    .map(|distance| (candidate.as_str(), distance))
            })
            .collect()
    }

    fn phrase(&self, terms: &[String], slop: usize) -> Vec<IndexHit> {
        if terms.is_empty() {
            return Vec::new();
        }
        // Drive the intersection from the rarest term
        let Some(rarest) = terms.iter().min_by_key(|term| self.postings(term).len()) else {
            return Vec::new();
        };
        let idf_sum: f64 = distinct_terms(terms).iter().map(|term| self.idf(term)).sum();

        self.postings(rarest)
            .iter()
            .filter_map(|candidate| {
                let object_index = candidate.object_index;
                let positions: Option<Vec<&[u32]>> = terms
                    .iter()
                    .map(|term| self.positions(term, object_index))
                    .collect();
                let freq = phrase_frequency(&positions?, slop);
                (freq > 0).then(|| IndexHit {
                    object_index,
                    score: idf_sum * self.tf_norm(freq, object_index),
                })
            })
            .collect()
    }

    /// Per-document (distinct terms matched, summed score) over exact terms.
    fn accumulate(&self, terms: &[&str]) -> BTreeMap<usize, (usize, f64)> {
        let mut acc: BTreeMap<usize, (usize, f64)> = BTreeMap::new();
        for term in terms {
            for posting in self.postings(term) {
                let entry = acc.entry(posting.object_index).or_insert((0, 0.0));
                entry.0 += 1;
                entry.1 += self.term_score(term, posting);
            }
        }
        acc
    }

    fn minimum_terms(&self, terms: &[String], minimum: usize) -> Vec<IndexHit> {
        let distinct = distinct_terms(terms);
        let minimum = minimum.clamp(1, distinct.len().max(1));
        self.accumulate(&distinct)
            .into_iter()
            .filter(|(_, (matched, _))| *matched >= minimum)
            .map(|(object_index, (_, score))| IndexHit { object_index, score })
            .collect()
    }

    fn anchored_fuzzy(
        &self,
        terms: &[String],
        fuzzy: &[String],
        max_distance: usize,
    ) -> Vec<IndexHit> {
        let distinct = distinct_terms(terms);
        let mut acc = self.accumulate(&distinct);

        for term in fuzzy {
            for (expansion, distance) in self.expand(term, max_distance) {
                if distance == 0 {
                    continue;
                }
                let weight = fuzzy_weight(term, distance);
                for posting in self.postings(expansion) {
                    // Fuzzy terms only boost documents the exact anchor already matched
                    if let Some(entry) = acc.get_mut(&posting.object_index) {
                        entry.1 += weight * self.term_score(expansion, posting);
                    }
                }
            }
        }

        acc.into_iter()
            .map(|(object_index, (_, score))| IndexHit { object_index, score })
            .collect()
    }

    fn fuzzy_term(&self, term: &str, max_distance: usize) -> Vec<IndexHit> {
        let mut acc: BTreeMap<usize, f64> = BTreeMap::new();
        for (expansion, distance) in self.expand(term, max_distance) {
            let weight = fuzzy_weight(term, distance);
            for posting in self.postings(expansion) {
                *acc.entry(posting.object_index).or_insert(0.0) +=
                    weight * self.term_score(expansion, posting);
            }
        }
        acc.into_iter()
            .map(|(object_index, score)| IndexHit { object_index, score })
            .collect()
    }
}

/// Term → postings index with token positions, one table per field.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    fields: Vec<FieldPostings>,
}

impl InvertedIndex {
    /// Number of distinct terms in `field`.
    pub fn vocabulary_len(&self, field: usize) -> usize {
        self.fields.get(field).map_or(0, |f| f.terms.len())
    }

    /// Number of documents with a value in `field`.
    pub fn doc_count(&self, field: usize) -> usize {
        self.fields.get(field).map_or(0, |f| f.doc_count)
    }
}

impl TextIndex for InvertedIndex {
    fn with_fields(field_count: usize) -> Self {
        Self {
            fields: (0..field_count).map(|_| FieldPostings::default()).collect(),
        }
    }

    fn index(&mut self, doc: &IndexedDocument) {
        for (field, postings) in self.fields.iter_mut().enumerate() {
            if let Some(text) = doc.field(field) {
                debug_assert!(
                    postings.lengths.len() <= doc.object_index
                        || postings.lengths[doc.object_index] == 0
                );
                postings.insert(doc.object_index, text);
            }
        }
    }

    fn query(&self, tier: &QueryTier, limit: usize) -> Result<Vec<IndexHit>, QueryExecutionError> {
        let field = self
            .fields
            .get(tier.field)
            .ok_or(QueryExecutionError::UnknownField(tier.field))?;
        check_tier(tier)?;

        let hits = match &tier.strategy {
            TierStrategy::ExactPhrase { terms } => field.phrase(terms, 0),
            TierStrategy::NearPhrase { terms, slop } => field.phrase(terms, *slop),
            TierStrategy::AllTerms { terms } => field.minimum_terms(terms, usize::MAX),
            TierStrategy::MinimumTerms { terms, minimum } => field.minimum_terms(terms, *minimum),
            TierStrategy::AnchoredFuzzy {
                terms,
                fuzzy,
                max_distance,
            } => field.anchored_fuzzy(terms, fuzzy, *max_distance),
            TierStrategy::FuzzyTerm { term, max_distance } => field.fuzzy_term(term, *max_distance),
        };

        Ok(rank_hits(hits, limit))
    }
}
