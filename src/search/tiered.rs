// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tier execution: walk a field's ladder until something matches.
//!
//! Tiers run strictly in planned order. The first tier returning at least one
//! hit wins the field: all of its hits are kept, scaled by the tier's decay
//! (`1.0 - 0.05 * level` by default), and no later tier is attempted. Results
//! from different tiers are never blended, so a typo-tolerant tier can't drown
//! out an exact phrase that matched only a handful of documents.

use tracing::trace;

use crate::config::SearchConfig;
use crate::error::QueryExecutionError;
use crate::index::TextIndex;
use crate::types::{IndexedDocument, PropertyMatch, QueryTier};

/// Run `tiers` against `index`, returning the hits of the first tier that has any.
///
/// `documents` is the engine's document arena; hits are resolved to the stored
/// field text there. An index hit pointing at an object with no stored value
/// for the field is an index failure.
pub fn execute<'a, I>(
    index: &I,
    documents: &'a [IndexedDocument],
    tiers: &[QueryTier],
    max_hits: usize,
    tuning: &SearchConfig,
) -> Result<Vec<PropertyMatch<'a>>, QueryExecutionError>
where
    I: TextIndex + ?Sized,
{
    for tier in tiers {
        let hits = index.query(tier, max_hits)?;
        trace!(
            field = tier.field,
            level = tier.level,
            strategy = tier.strategy.label(),
            hits = hits.len(),
            "tier executed"
        );
        if hits.is_empty() {
            continue;
        }

        let decay = tuning.tier_decay(tier.level);
        return hits
            .into_iter()
            .map(|hit| {
                let matched_text = documents
                    .get(hit.object_index)
                    .and_then(|doc| doc.field(tier.field))
                    .ok_or_else(|| {
                        QueryExecutionError::Index(format!(
                            "hit on object {} has no stored value for field {}",
                            hit.object_index, tier.field
                        ))
                    })?;
                Ok(PropertyMatch {
                    field: tier.field,
                    object_index: hit.object_index,
                    matched_text,
                    raw_score: hit.score * decay,
                    tier: tier.level,
                })
            })
            .collect();
    }

    Ok(Vec::new())
}
