// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Match percentage: how well does the matched text answer the query, 0 to 100?
//!
//! This number is what users see and what per-field thresholds compare
//! against, so it has to mean the same thing no matter which tier or index
//! produced the hit. It ignores the index score entirely and looks only at the
//! two strings.
//!
//! The rules form a cascade; the first one that applies decides.
//!
//! | Rule                                   | Single word | Multi word |
//! |----------------------------------------|-------------|------------|
//! | Byte-identical                         | 100         | 100        |
//! | Equal ignoring case and outer spaces   | 99          | 99         |
//! | Whole word / phrase equals text        | 95          | 100        |
//! | Word prefix / phrase starts text       | 85          | 95         |
//! | Substring / phrase ends text           | 75          | 93         |
//! | Phrase somewhere in text               |             | 90         |
//! | Words in order, gaps between           |             | 85         |
//! | Every word exact, scattered            |             | 82         |
//! | Edit-distance / weighted word mix      | 50..70      | 50..80     |

use crate::fuzzy::levenshtein;

/// Byte-identical strings.
pub const EXACT_PERCENT: f64 = 100.0;
/// Same text after trimming and lowercasing.
pub const CASE_INSENSITIVE_PERCENT: f64 = 99.0;

/// Single-word query equals one of the text's words.
pub const WORD_EXACT_PERCENT: f64 = 95.0;
/// Single-word query is a prefix of one of the text's words.
pub const WORD_PREFIX_PERCENT: f64 = 85.0;
/// Single-word query occurs inside the text.
pub const WORD_SUBSTRING_PERCENT: f64 = 75.0;
/// Ceiling of the edit-distance similarity band.
pub const WORD_SIMILARITY_SCALE: f64 = 70.0;

/// Multi-word phrase is the whole text.
pub const PHRASE_EQUAL_PERCENT: f64 = 100.0;
/// Multi-word phrase starts the text.
pub const PHRASE_PREFIX_PERCENT: f64 = 95.0;
/// Multi-word phrase ends the text.
pub const PHRASE_SUFFIX_PERCENT: f64 = 93.0;
/// Multi-word phrase appears mid-text.
pub const PHRASE_INNER_PERCENT: f64 = 90.0;
/// Query words appear in order but not contiguously.
pub const IN_ORDER_PERCENT: f64 = 85.0;
/// Every query word appears as a whole word, in any order.
pub const ALL_WORDS_EXACT_PERCENT: f64 = 82.0;

/// Lowest percentage a non-empty query can produce.
pub const FLOOR_PERCENT: f64 = 50.0;
/// Width of the weighted word-mix band above the floor.
pub const WORD_MIX_SPAN: f64 = 30.0;

/// Per-word class weights for the word-mix score, out of 100.
const EXACT_WORD_WEIGHT: f64 = 100.0;
const PARTIAL_WORD_WEIGHT: f64 = 60.0;
const FUZZY_WORD_WEIGHT: f64 = 30.0;

/// Score how well `matched_text` matches `search_text`, in `[0, 100]`.
///
/// Case-insensitive apart from the first rule. A blank query scores 0 unless
/// the text is byte-identical to it.
pub fn match_percentage(matched_text: &str, search_text: &str) -> f64 {
    if matched_text == search_text {
        return EXACT_PERCENT;
    }

    let text = matched_text.trim().to_lowercase();
    let query = search_text.trim().to_lowercase();
    if text == query {
        return CASE_INSENSITIVE_PERCENT;
    }

    let query_words: Vec<&str> = query.split_whitespace().collect();
    let text_words: Vec<&str> = text.split_whitespace().collect();

    match query_words.as_slice() {
        [] => 0.0,
        [word] => single_word(&text, &text_words, word),
        _ => multi_word(&text_words, &query_words),
    }
}

fn single_word(text: &str, text_words: &[&str], word: &str) -> f64 {
    if text_words.contains(&word) {
        return WORD_EXACT_PERCENT;
    }
    if text_words.iter().any(|w| w.starts_with(word)) {
        return WORD_PREFIX_PERCENT;
    }
    if text.contains(word) {
        return WORD_SUBSTRING_PERCENT;
    }

    text_words
        .iter()
        .map(|w| word_similarity(word, w))
        .fold(FLOOR_PERCENT, f64::max)
}

/// `max(50, (1 - d / max(len(a), len(b))) * 70)`.
fn word_similarity(query: &str, word: &str) -> f64 {
    let longest = query.chars().count().max(word.chars().count());
    if longest == 0 {
        return FLOOR_PERCENT;
    }
    let distance = levenshtein(query, word) as f64;
    ((1.0 - distance / longest as f64) * WORD_SIMILARITY_SCALE).max(FLOOR_PERCENT)
}

fn multi_word(text_words: &[&str], query_words: &[&str]) -> f64 {
    let text = text_words.join(" ");
    let phrase = query_words.join(" ");

    if text.contains(&phrase) {
        return if text == phrase {
            PHRASE_EQUAL_PERCENT
        } else if text.starts_with(&phrase) {
            PHRASE_PREFIX_PERCENT
        } else if text.ends_with(&phrase) {
            PHRASE_SUFFIX_PERCENT
        } else {
            PHRASE_INNER_PERCENT
        };
    }

    if words_in_order(&text, query_words) {
        return IN_ORDER_PERCENT;
    }

    let mut exact = 0usize;
    let mut partial = 0usize;
    let mut fuzzy = 0usize;
    for word in query_words {
        match classify(word, text_words) {
            WordClass::Exact => exact += 1,
            WordClass::Partial => partial += 1,
            WordClass::Fuzzy => fuzzy += 1,
            WordClass::Missing => {}
        }
    }

    if exact == query_words.len() {
        return ALL_WORDS_EXACT_PERCENT;
    }

    let weighted = exact as f64 * EXACT_WORD_WEIGHT
        + partial as f64 * PARTIAL_WORD_WEIGHT
        + fuzzy as f64 * FUZZY_WORD_WEIGHT;
    let max_weight = query_words.len() as f64 * EXACT_WORD_WEIGHT;
    (FLOOR_PERCENT + WORD_MIX_SPAN * weighted / max_weight).max(FLOOR_PERCENT)
}

/// Each word found as a substring after the end of the previous one.
fn words_in_order(text: &str, words: &[&str]) -> bool {
    let mut rest = text;
    for word in words {
        match rest.find(word) {
            Some(at) => rest = &rest[at + word.len()..],
            None => return false,
        }
    }
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordClass {
    Exact,
    Partial,
    Fuzzy,
    Missing,
}

/// Best relation of one query word to any text word.
fn classify(word: &str, text_words: &[&str]) -> WordClass {
    if text_words.contains(&word) {
        return WordClass::Exact;
    }
    if text_words
        .iter()
        .any(|w| w.contains(word) || word.contains(w))
    {
        return WordClass::Partial;
    }
    let allowed = (word.chars().count() / 4).max(1);
    if text_words.iter().any(|w| levenshtein(word, w) <= allowed) {
        return WordClass::Fuzzy;
    }
    WordClass::Missing
}
