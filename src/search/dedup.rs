// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result deduplication: one result per object, the best one.
//!
//! Every field runs its own tier ladder, so the same object can come back
//! from several fields. `ResultMerger` keeps a flat arena indexed by object
//! index holding the best match seen so far. No hashing, and iterating the
//! arena visits objects in a fixed order, which is what makes the final sort
//! deterministic.
//!
//! **Invariant**: each object appears at most once in the merged results.
//!
//! Replacement is strict: a later match must score *higher* to evict the
//! current one. Fields are merged in schema order, so on a tie the earlier
//! field keeps the slot.

/// A scored, thresholded match ready for ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedMatch<'a> {
    pub object_index: usize,
    pub property: &'a str,
    pub matched_text: &'a str,
    pub percentage: f64,
    pub score: f64,
}

/// Arena of best-match-so-far per object.
#[derive(Debug)]
pub struct ResultMerger<'a> {
    best: Vec<Option<RankedMatch<'a>>>,
    len: usize,
}

impl<'a> ResultMerger<'a> {
    /// Merger for a collection of `object_count` objects.
    pub fn new(object_count: usize) -> Self {
        Self {
            best: vec![None; object_count],
            len: 0,
        }
    }

    /// Merge a single match, keeping the best per object index.
    ///
    /// Matches pointing outside the arena are ignored.
    pub fn merge(&mut self, candidate: RankedMatch<'a>) {
        let Some(slot) = self.best.get_mut(candidate.object_index) else {
            return;
        };
        match slot {
            Some(existing) if candidate.score > existing.score => *existing = candidate,
            Some(_) => {}
            None => {
                *slot = Some(candidate);
                self.len += 1;
            }
        }
    }

    /// Merge multiple matches in order.
    pub fn merge_all(&mut self, candidates: impl IntoIterator<Item = RankedMatch<'a>>) {
        for candidate in candidates {
            self.merge(candidate);
        }
    }

    /// Number of distinct objects merged so far.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Best matches, highest score first, at most `limit`.
    pub fn into_sorted(self, limit: usize) -> Vec<RankedMatch<'a>> {
        let mut results: Vec<RankedMatch<'a>> = self.best.into_iter().flatten().collect();
        sort_ranked(&mut results);
        results.truncate(limit);
        results
    }
}

/// Score descending, object index ascending.
pub fn sort_ranked(results: &mut [RankedMatch<'_>]) {
    results.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.object_index.cmp(&b.object_index))
    });
}
