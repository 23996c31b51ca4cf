// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search pipeline stages between the index and the caller.
//!
//! The planner turns a query into a tier ladder per field, the tiered
//! executor walks the ladder against the index, the merger keeps the best
//! match per object, and the relation expander appends related objects.

pub mod dedup;
pub mod planner;
pub mod relation;
pub mod tiered;
