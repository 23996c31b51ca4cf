// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Multi-field fuzzy search over in-memory typed collections.
//!
//! Declare which attributes of a type are searchable, hand the engine a
//! `Vec<T>`, and query it with free text. Every field runs a ladder of
//! progressively looser query tiers and stops at the first one that hits.
//! Hits are re-scored by how closely the matched text resembles the query,
//! merged to one result per object, and optionally expanded through an
//! object hierarchy.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  schema.rs  │────▶│  engine.rs   │────▶│   index/     │
//! │ (fields,    │     │ (builder,    │     │ (TextIndex:  │
//! │  accessors) │     │  search)     │     │  inverted,   │
//! └─────────────┘     └──────────────┘     │  scan)       │
//!                            │             └──────────────┘
//!                            ▼                     ▲
//! ┌─────────────────────────────────────────────────────────┐
//! │ search/planner ─▶ search/tiered ─▶ scoring ─▶ dedup     │
//! │                                           ─▶ relation   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use fieldseek::{Engine, FieldDescriptor, Searchable};
//!
//! struct Company { name: String, city: String }
//!
//! impl Searchable for Company {
//!     fn search_fields() -> Vec<FieldDescriptor<Self>> {
//!         vec![
//!             FieldDescriptor::new("name", |c: &Company| Some(c.name.as_str())),
//!             FieldDescriptor::new("city", |c: &Company| Some(c.city.as_str())).priority(3),
//!         ]
//!     }
//! }
//!
//! let engine = Engine::new(companies)?;
//! for hit in engine.search("acme corp", 10)? {
//!     println!("{} {:.1}%", hit.matched_text, hit.match_percentage);
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod fuzzy;
pub mod index;
pub mod record;
pub mod schema;
pub mod scoring;
pub mod search;
pub mod types;
pub mod util;

#[doc(hidden)]
pub mod testing;

pub use config::SearchConfig;
pub use engine::{Engine, EngineBuilder};
pub use error::{Error, LoadError, QueryExecutionError, Result, SchemaError};
pub use fuzzy::{bounded_distance, levenshtein, levenshtein_within};
pub use index::{InvertedIndex, ScanIndex, TextIndex};
pub use record::{Record, RelationSpec, SchemaFile};
pub use schema::{Accessor, FieldDescriptor, FieldSchema, Searchable, SearchableField};
pub use scoring::{final_score, match_percentage, position_boost};
pub use search::relation::{Expansion, HierarchyExpander, NoRelations, RelationExpander};
pub use types::{
    IndexHit, IndexedDocument, ObjectSearchResult, PropertyMatch, QueryTier, TierStrategy,
};
pub use util::{normalize, tokenize};
