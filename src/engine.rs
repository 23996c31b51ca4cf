// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search engine: build once, query many.
//!
//! Two states, enforced by ownership. An [`EngineBuilder`] owns the objects
//! and is the only thing that can mutate the index; [`EngineBuilder::build`]
//! consumes it and returns an immutable [`Engine`]. There is no way back.
//! `Engine::search` takes `&self` and writes nothing shared, so one engine can
//! serve any number of threads without locks.
//!
//! # Search pipeline
//!
//! ```text
//! for each field (schema order):
//!     plan tiers ─▶ execute until a tier hits ─▶ percentage ─▶ threshold
//!                                                   │
//!                                     boost × priority × decay
//!                                                   ▼
//!                                           ResultMerger (best per object)
//!                                                   ▼
//!                              sort, truncate ─▶ relation expansion ─▶ results
//! ```

use std::marker::PhantomData;

use tracing::debug;

use crate::config::SearchConfig;
use crate::error::{QueryExecutionError, SchemaError};
use crate::index::{InvertedIndex, TextIndex};
use crate::schema::{FieldSchema, Searchable};
use crate::scoring::{final_score, match_percentage, position_boost};
use crate::search::dedup::{sort_ranked, RankedMatch, ResultMerger};
use crate::search::planner::plan;
use crate::search::relation::{NoRelations, RelationExpander};
use crate::search::tiered::execute;
use crate::types::{IndexedDocument, ObjectSearchResult};

/// Percentage reported for relation-expanded results.
const RELATION_PERCENT: f64 = 100.0;

/// Collects objects, schema and options; [`build`](Self::build) indexes them.
pub struct EngineBuilder<T, I = InvertedIndex> {
    objects: Vec<T>,
    schema: FieldSchema<T>,
    relations: Box<dyn RelationExpander<T>>,
    config: SearchConfig,
    index: PhantomData<fn() -> I>,
}

impl<T, I: TextIndex> EngineBuilder<T, I> {
    /// Replace the tuning values.
    pub fn config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Expand results through `relations` after aggregation.
    pub fn relations<R>(mut self, relations: R) -> Self
    where
        R: RelationExpander<T> + 'static,
    {
        self.relations = Box::new(relations);
        self
    }

    /// Already-boxed variant of [`relations`](Self::relations).
    pub fn relations_boxed(mut self, relations: Box<dyn RelationExpander<T>>) -> Self {
        self.relations = relations;
        self
    }

    /// Use a different index implementation.
    pub fn index<J: TextIndex>(self) -> EngineBuilder<T, J> {
        EngineBuilder {
            objects: self.objects,
            schema: self.schema,
            relations: self.relations,
            config: self.config,
            index: PhantomData,
        }
    }

    /// Index every object and freeze the engine.
    ///
    /// Object `i` of the input becomes object index `i`. Blank field values
    /// are not stored and not indexed.
    pub fn build(self) -> Result<Engine<T, I>, SchemaError> {
        self.config.validate()?;

        let schema = self.schema;
        let documents: Vec<IndexedDocument> = self
            .objects
            .iter()
            .enumerate()
            .map(|(object_index, object)| IndexedDocument {
                object_index,
                fields: schema
                    .iter()
                    .map(|field| field.value(object).map(str::to_string))
                    .collect(),
            })
            .collect();

        let mut index = I::with_fields(schema.len());
        for doc in &documents {
            index.index(doc);
        }

        debug!(
            objects = documents.len(),
            fields = schema.len(),
            "search engine built"
        );

        Ok(Engine {
            objects: self.objects,
            documents,
            schema,
            index,
            relations: self.relations,
            config: self.config,
        })
    }
}

/// An immutable, indexed collection of `T`.
pub struct Engine<T, I = InvertedIndex> {
    objects: Vec<T>,
    documents: Vec<IndexedDocument>,
    schema: FieldSchema<T>,
    index: I,
    relations: Box<dyn RelationExpander<T>>,
    config: SearchConfig,
}

impl<T: Searchable> Engine<T, InvertedIndex> {
    /// Index `objects` using the schema and relations `T` declares.
    pub fn new(objects: Vec<T>) -> Result<Self, SchemaError> {
        Self::builder(objects, FieldSchema::of()?)
            .relations_boxed(T::relation_expander())
            .build()
    }
}

impl<T> Engine<T, InvertedIndex> {
    /// Start building an engine over `objects` with an explicit schema.
    pub fn builder(objects: Vec<T>, schema: FieldSchema<T>) -> EngineBuilder<T, InvertedIndex> {
        EngineBuilder {
            objects,
            schema,
            relations: Box::new(NoRelations),
            config: SearchConfig::default(),
            index: PhantomData,
        }
    }
}

impl<T, I: TextIndex> Engine<T, I> {
    /// Search every field for `search_text`; at most `max_results` results, best first.
    ///
    /// Blank text (or `max_results == 0`) returns no results without touching
    /// the index.
    pub fn search(
        &self,
        search_text: &str,
        max_results: usize,
    ) -> Result<Vec<ObjectSearchResult<'_, T>>, QueryExecutionError> {
        if search_text.trim().is_empty() || max_results == 0 {
            return Ok(Vec::new());
        }

        let fetch_limit = self.config.fetch_limit(max_results);
        let mut merger = ResultMerger::new(self.objects.len());

        for (ordinal, field) in self.schema.iter().enumerate() {
            let config = field.config();
            let tiers = plan(ordinal, search_text, config, &self.config);
            if tiers.is_empty() {
                continue;
            }

            let matches = execute(&self.index, &self.documents, &tiers, fetch_limit, &self.config)?;
            merger.merge_all(matches.into_iter().filter_map(|hit| {
                let percentage = match_percentage(hit.matched_text, search_text);
                if percentage < f64::from(config.match_threshold) {
                    return None;
                }
                let boost = position_boost(hit.matched_text, search_text);
                Some(RankedMatch {
                    object_index: hit.object_index,
                    property: field.name(),
                    matched_text: hit.matched_text,
                    percentage,
                    score: final_score(hit.raw_score, config.priority, percentage, boost),
                })
            }));
        }

        let matched = merger.len();
        let mut ranked = merger.into_sorted(max_results);
        let expanded = self.expand_relations(&mut ranked, max_results);

        debug!(
            query = search_text,
            matched,
            expanded,
            returned = ranked.len(),
            "search complete"
        );

        Ok(ranked
            .into_iter()
            .filter_map(|r| {
                Some(ObjectSearchResult {
                    object: self.objects.get(r.object_index)?,
                    object_index: r.object_index,
                    matched_property: r.property,
                    match_percentage: r.percentage,
                    score: r.score,
                    matched_text: r.matched_text,
                })
            })
            .collect())
    }

    /// Append related objects below every genuine match. Returns how many were added
    /// before the final truncation.
    fn expand_relations<'a>(
        &'a self,
        ranked: &mut Vec<RankedMatch<'a>>,
        max_results: usize,
    ) -> usize {
        let matched: Vec<usize> = ranked.iter().map(|r| r.object_index).collect();
        let expansions = self.relations.expand(&self.objects, &matched);
        if expansions.is_empty() {
            return 0;
        }

        // Fixed score, but never level with or above a real match
        let lowest = ranked.iter().map(|r| r.score).fold(f64::INFINITY, f64::min);
        let score = if lowest.is_finite() {
            self.config.relation_score.min(lowest * 0.5)
        } else {
            self.config.relation_score
        };

        let added = expansions.len();
        ranked.extend(expansions.into_iter().map(|expansion| RankedMatch {
            object_index: expansion.object_index,
            property: expansion.property,
            matched_text: expansion.matched_text,
            percentage: RELATION_PERCENT,
            score,
        }));
        sort_ranked(ranked);
        ranked.truncate(max_results);
        added
    }

    /// Number of indexed objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn schema(&self) -> &FieldSchema<T> {
        &self.schema
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The underlying text index.
    pub fn index(&self) -> &I {
        &self.index
    }

    pub fn objects(&self) -> &[T] {
        &self.objects
    }

    pub fn object(&self, object_index: usize) -> Option<&T> {
        self.objects.get(object_index)
    }

    pub fn document(&self, object_index: usize) -> Option<&IndexedDocument> {
        self.documents.get(object_index)
    }

    /// How many objects have a non-blank value for field `field`.
    pub fn indexed_value_count(&self, field: usize) -> usize {
        self.documents
            .iter()
            .filter(|doc| doc.field(field).is_some())
            .count()
    }
}

impl<T, I> std::fmt::Debug for Engine<T, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("objects", &self.objects.len())
            .field("schema", &self.schema)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
