// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search tuning with sensible defaults.
//!
//! [`SearchConfig`] holds the knobs of the tier planner, the tier executor and
//! the relation expander. The defaults are the reference behavior; most callers
//! never touch them. The CLI reads an optional `config` object from the schema
//! file, so the struct deserializes with camelCase keys and per-field defaults.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Tuning values for planning, executing and expanding a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    /// Score decay per tier: tier `i` is scaled by `1.0 - step * i`.
    pub tier_decay_step: f64,
    /// Maximum intervening tokens between consecutive words of a near phrase.
    pub near_phrase_slop: usize,
    /// Fraction of query words the majority tier requires (rounded up).
    pub majority_ratio: f64,
    /// Edit distance allowed for fuzzy terms.
    pub fuzzy_max_distance: usize,
    /// Words must be strictly longer than this to be fuzzy-matched.
    pub fuzzy_min_word_len: usize,
    /// Per-field hit budget as a multiple of `max_results`.
    pub fetch_multiplier: usize,
    /// Score assigned to relation-expanded results.
    pub relation_score: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tier_decay_step: 0.05,
            near_phrase_slop: 2,
            majority_ratio: 0.6,
            fuzzy_max_distance: 1,
            fuzzy_min_word_len: 3,
            fetch_multiplier: 2,
            relation_score: 0.001,
        }
    }
}

impl SearchConfig {
    /// Largest accepted `near_phrase_slop`.
    pub const MAX_NEAR_PHRASE_SLOP: usize = u16::MAX as usize;

    /// Validates this configuration.
    ///
    /// Checks:
    /// - `tier_decay_step` is in `[0, 0.2)` so five tiers never decay to zero
    /// - `near_phrase_slop` is at most [`Self::MAX_NEAR_PHRASE_SLOP`]
    /// - `majority_ratio` is in `(0, 1]`
    /// - `fetch_multiplier` is at least 1
    /// - `relation_score` is positive and finite
    pub fn validate(&self) -> Result<(), SchemaError> {
        if !(0.0..0.2).contains(&self.tier_decay_step) {
            return Err(SchemaError::InvalidConfig(format!(
                "tierDecayStep must be in [0, 0.2), got {}",
                self.tier_decay_step
            )));
        }
        if self.near_phrase_slop > Self::MAX_NEAR_PHRASE_SLOP {
            return Err(SchemaError::InvalidConfig(format!(
                "nearPhraseSlop must be at most {}, got {}",
                Self::MAX_NEAR_PHRASE_SLOP,
                self.near_phrase_slop
            )));
        }
        if !(self.majority_ratio > 0.0 && self.majority_ratio <= 1.0) {
            return Err(SchemaError::InvalidConfig(format!(
                "majorityRatio must be in (0, 1], got {}",
                self.majority_ratio
            )));
        }
        if self.fetch_multiplier == 0 {
            return Err(SchemaError::InvalidConfig(
                "fetchMultiplier must be greater than 0".into(),
            ));
        }
        if !(self.relation_score.is_finite() && self.relation_score > 0.0) {
            return Err(SchemaError::InvalidConfig(format!(
                "relationScore must be positive, got {}",
                self.relation_score
            )));
        }
        Ok(())
    }

    /// Decay multiplier for the tier at `level` (0 = most specific).
    pub fn tier_decay(&self, level: usize) -> f64 {
        1.0 - self.tier_decay_step * level as f64
    }

    /// How many hits to pull per field for a request of `max_results`.
    pub fn fetch_limit(&self, max_results: usize) -> usize {
        max_results.saturating_mul(self.fetch_multiplier)
    }
}
