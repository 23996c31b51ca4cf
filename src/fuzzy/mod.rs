// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy matching: typo tolerance via edit distance.
//!
//! A bounded check for the index's fuzzy term expansion, and a full distance
//! for the relevance scorer, which needs the actual number of edits.

mod levenshtein;

pub use levenshtein::*;
