//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::sync::Mutex;

use fieldseek::testing::Company;
use fieldseek::{
    Engine, FieldSchema, IndexHit, IndexedDocument, InvertedIndex, ObjectSearchResult,
    QueryExecutionError, QueryTier, TextIndex,
};

// Re-export canonical fixtures from fieldseek::testing
pub use fieldseek::testing::{company, generated_companies, sample_companies, subsidiary};

/// Engine over `companies` with the declared schema and no relation expansion.
pub fn engine_without_relations(companies: Vec<Company>) -> Engine<Company> {
    Engine::builder(companies, FieldSchema::of().unwrap())
        .build()
        .unwrap()
}

/// Object indices of a result list, in order.
pub fn ids<T>(results: &[ObjectSearchResult<'_, T>]) -> Vec<usize> {
    results.iter().map(|r| r.object_index).collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// Inverted index that records every (field, level) it is asked to run.
pub struct RecordingIndex {
    inner: InvertedIndex,
    pub queried: Mutex<Vec<(usize, usize)>>,
}

impl RecordingIndex {
    pub fn levels_for(&self, field: usize) -> Vec<usize> {
        self.queried
            .lock()
            .unwrap()
            .iter()
            .filter(|(f, _)| *f == field)
            .map(|(_, level)| *level)
            .collect()
    }
}

impl TextIndex for RecordingIndex {
    fn with_fields(field_count: usize) -> Self {
        Self {
            inner: InvertedIndex::with_fields(field_count),
            queried: Mutex::new(Vec::new()),
        }
    }

    fn index(&mut self, doc: &IndexedDocument) {
        self.inner.index(doc);
    }

    fn query(&self, tier: &QueryTier, limit: usize) -> Result<Vec<IndexHit>, QueryExecutionError> {
        self.queried.lock().unwrap().push((tier.field, tier.level));
        self.inner.query(tier, limit)
    }
}

/// Documents for a single-field schema, one per value.
pub fn single_field_documents(values: &[&str]) -> Vec<IndexedDocument> {
    values
        .iter()
        .enumerate()
        .map(|(object_index, value)| IndexedDocument {
            object_index,
            fields: vec![Some(value.to_string()).filter(|v| !v.trim().is_empty())],
        })
        .collect()
}

/// Build an index of type `I` over single-field documents.
pub fn single_field_index<I: TextIndex>(documents: &[IndexedDocument]) -> I {
    let mut index = I::with_fields(1);
    for doc in documents {
        index.index(doc);
    }
    index
}
