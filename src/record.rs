// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime-shaped objects: JSON records described by a JSON schema file.
//!
//! Compile-time types implement [`Searchable`](crate::Searchable). Data that
//! only has a shape at runtime (the CLI's input) is loaded as [`Record`]s, flat
//! attribute maps, and a [`SchemaFile`] says which attributes to search:
//!
//! ```json
//! {
//!   "fields": [
//!     { "name": "name", "priority": 1, "matchThreshold": 60 },
//!     { "name": "code", "priority": 2, "exactMatchOnly": true }
//!   ],
//!   "relation": { "codeField": "code", "parentField": "parentCode" },
//!   "config": { "nearPhraseSlop": 2 }
//! }
//! ```
//!
//! Record values are stringified on load. Numbers and booleans keep their JSON
//! text, arrays of scalars are joined with spaces, `null` and nested objects
//! are dropped.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::SearchConfig;
use crate::engine::Engine;
use crate::error::{LoadError, SchemaError};
use crate::schema::{FieldDescriptor, FieldSchema, SearchableField};
use crate::search::relation::HierarchyExpander;

/// A flat attribute map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Value>",
    into = "BTreeMap<String, String>"
)]
pub struct Record {
    values: BTreeMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse a JSON array of objects.
    pub fn parse_all(json: &str) -> Result<Vec<Record>, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read and parse a JSON array of objects from `path`.
    pub fn load_all(path: impl AsRef<Path>) -> Result<Vec<Record>, LoadError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_all(&json).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl From<BTreeMap<String, Value>> for Record {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let values = raw
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match &value {
                    Value::Array(items) => {
                        let parts: Vec<String> = items.iter().filter_map(scalar_text).collect();
                        (!parts.is_empty()).then(|| parts.join(" "))
                    }
                    other => scalar_text(other),
                }?;
                Some((key, text))
            })
            .collect();
        Self { values }
    }
}

impl From<Record> for BTreeMap<String, String> {
    fn from(record: Record) -> Self {
        record.values
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Which record attributes form the code / ultimate-parent hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationSpec {
    pub code_field: String,
    pub parent_field: String,
}

/// Search schema for [`Record`]s, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaFile {
    pub fields: Vec<SearchableField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<RelationSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<SearchConfig>,
}

impl SchemaFile {
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&json).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Field table reading each field by attribute name.
    pub fn field_schema(&self) -> Result<FieldSchema<Record>, SchemaError> {
        FieldSchema::new(
            self.fields
                .iter()
                .map(|field| {
                    let key = field.name.clone();
                    FieldDescriptor::with_config(field.clone(), move |record: &Record| {
                        record.get(&key)
                    })
                })
                .collect(),
        )
    }

    /// Hierarchy expander over the configured attributes, if any.
    pub fn expander(&self) -> Option<HierarchyExpander<Record>> {
        let relation = self.relation.as_ref()?;
        let code = relation.code_field.clone();
        let parent = relation.parent_field.clone();
        Some(HierarchyExpander::new(
            relation.code_field.clone(),
            move |record: &Record| record.get(&code),
            move |record: &Record| record.get(&parent),
        ))
    }

    /// Build an engine over `records` with this schema, relation and config.
    pub fn build_engine(&self, records: Vec<Record>) -> Result<Engine<Record>, SchemaError> {
        let mut builder = Engine::builder(records, self.field_schema()?)
            .config(self.config.clone().unwrap_or_default());
        if let Some(expander) = self.expander() {
            builder = builder.relations(expander);
        }
        builder.build()
    }
}
