// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind the final ranking score.
//!
//! ```text
//! score = decayed_index_score × (100 / priority) × (percentage / 100) × position_boost
//! ```
//!
//! The index score says how strongly the tier matched, priority says how much
//! the field matters, the percentage says how close the text is to the query,
//! and the position boost rewards texts that *start* with what was typed.
//!
//! # Position boost
//!
//! | Condition                          | Boost                          |
//! |------------------------------------|--------------------------------|
//! | Text equals query                  | 1.30                           |
//! | Text starts with query             | 1.20                           |
//! | Text starts with first query word  | 1.15                           |
//! | Query found at char offset `o`     | `1.0 + 0.1 × (1 − o / len)`    |
//! | Otherwise                          | 1.00                           |

/// Boost when the text is the query.
pub const EXACT_POSITION_BOOST: f64 = 1.3;

/// Boost when the text starts with the whole query.
pub const PREFIX_POSITION_BOOST: f64 = 1.2;

/// Boost when the text starts with the query's first word.
pub const FIRST_WORD_POSITION_BOOST: f64 = 1.15;

/// Maximum boost for a query found inside the text (at offset 0).
pub const MAX_OFFSET_BONUS: f64 = 0.1;

/// Position boost multiplier in `[1.0, 1.3]`. Case-insensitive.
pub fn position_boost(matched_text: &str, search_text: &str) -> f64 {
    let text = matched_text.trim().to_lowercase();
    let query = search_text.trim().to_lowercase();
    if query.is_empty() {
        return 1.0;
    }

    if text == query {
        return EXACT_POSITION_BOOST;
    }
    if text.starts_with(&query) {
        return PREFIX_POSITION_BOOST;
    }
    if let Some(first) = query.split_whitespace().next() {
        if text.starts_with(first) {
            return FIRST_WORD_POSITION_BOOST;
        }
    }
    if let Some(byte_offset) = text.find(&query) {
        let offset = text[..byte_offset].chars().count();
        let len = text.chars().count();
        return 1.0 + offset_bonus(offset, len);
    }
    1.0
}

/// Linear bonus: `MAX_OFFSET_BONUS` at offset 0, falling to 0 at the end.
pub fn offset_bonus(offset: usize, text_len: usize) -> f64 {
    if text_len > 0 {
        MAX_OFFSET_BONUS * (1.0 - (offset as f64 / text_len as f64))
    } else {
        0.0
    }
}

/// Weight of a field: priority 1 → 100, priority 2 → 50, ...
pub fn priority_weight(priority: u32) -> f64 {
    100.0 / f64::from(priority.max(1))
}

/// Combine the four factors into the ranking score.
pub fn final_score(decayed_index_score: f64, priority: u32, percentage: f64, boost: f64) -> f64 {
    decayed_index_score * priority_weight(priority) * (percentage / 100.0) * boost
}
