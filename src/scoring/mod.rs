// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring: how search results get their numbers.
//!
//! Two independent measurements per hit. The match percentage compares the
//! matched text against the query and ignores the index entirely; it is what
//! thresholds filter on. The final score multiplies the index's tier-decayed
//! score by field priority, percentage and position boost; it is what results
//! are sorted by.

mod core;
mod percentage;

pub use core::*;
pub use percentage::*;
