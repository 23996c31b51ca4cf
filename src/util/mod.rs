// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text helpers shared by the index, the planner and the scorer.
//!
//! Index and query must agree on what a "word" is, otherwise an exact phrase
//! tier can never fire. Both sides go through `normalize` and `tokenize`.

pub mod normalize;

pub use normalize::{normalize, tokenize};
