// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Field schema: which attributes of a type are searchable, and how.
//!
//! A type opts in by implementing [`Searchable`] and returning a static table of
//! [`FieldDescriptor`]s, one per attribute. Each descriptor pairs the field's
//! [`SearchableField`] config with an accessor that borrows the text out of an
//! object. Callers with runtime-defined shapes (JSON records) build the table
//! themselves and hand it to [`FieldSchema::new`].
//!
//! The table is validated once. After that it is read-only and the field
//! ordinal (position in the table) is the field's identity everywhere else:
//! in the index, in query tiers, and as the aggregation tiebreaker.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::search::relation::{NoRelations, RelationExpander};

/// Per-field search configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchableField {
    /// Exported field name, reported back as `matched_property`.
    pub name: String,
    /// Lower is more important. Scores are scaled by `100 / priority`.
    #[serde(default = "default_priority")]
    pub priority: u32,
    /// Minimum match percentage (0-100) a hit needs to survive.
    #[serde(default)]
    pub match_threshold: u8,
    /// Only the exact ordered phrase tier is planned for this field.
    #[serde(default)]
    pub exact_match_only: bool,
}

fn default_priority() -> u32 {
    1
}

impl SearchableField {
    /// Field with priority 1, threshold 0, fuzzy tiers enabled.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority: default_priority(),
            match_threshold: 0,
            exact_match_only: false,
        }
    }

    fn validate(&self) -> Result<(), SchemaError> {
        if self.priority == 0 {
            return Err(SchemaError::InvalidPriority {
                field: self.name.clone(),
                priority: self.priority,
            });
        }
        if self.match_threshold > 100 {
            return Err(SchemaError::InvalidThreshold {
                field: self.name.clone(),
                threshold: self.match_threshold,
            });
        }
        Ok(())
    }
}

/// Borrows a field's text out of an object. `None` means "no value".
pub type Accessor<T> = Box<dyn Fn(&T) -> Option<&str> + Send + Sync>;

/// A searchable field: its config plus how to read it.
pub struct FieldDescriptor<T> {
    config: SearchableField,
    accessor: Accessor<T>,
}

impl<T> FieldDescriptor<T> {
    /// Describe a field with default config (priority 1, threshold 0).
    ///
    /// ```ignore
    /// FieldDescriptor::new("name", |c: &Company| Some(c.name.as_str()))
    ///     .priority(1)
    ///     .match_threshold(60)
    /// ```
    pub fn new<F>(name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> Option<&str> + Send + Sync + 'static,
    {
        Self::with_config(SearchableField::new(name), accessor)
    }

    /// Describe a field with an explicit config.
    pub fn with_config<F>(config: SearchableField, accessor: F) -> Self
    where
        F: Fn(&T) -> Option<&str> + Send + Sync + 'static,
    {
        Self {
            config,
            accessor: Box::new(accessor),
        }
    }

    pub fn priority(mut self, priority: u32) -> Self {
        self.config.priority = priority;
        self
    }

    pub fn match_threshold(mut self, threshold: u8) -> Self {
        self.config.match_threshold = threshold;
        self
    }

    pub fn exact_match_only(mut self, exact: bool) -> Self {
        self.config.exact_match_only = exact;
        self
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &SearchableField {
        &self.config
    }

    /// The field's text for `object`, or `None` if missing or blank.
    pub fn value<'a>(&self, object: &'a T) -> Option<&'a str> {
        (self.accessor)(object).filter(|text| !text.trim().is_empty())
    }
}

impl<T> std::fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Implemented by types that can be indexed with [`crate::Engine::new`].
pub trait Searchable: Sized {
    /// The static field table for this type, in declaration order.
    fn search_fields() -> Vec<FieldDescriptor<Self>>;

    /// Relation expansion for this type. No expansion unless overridden.
    fn relation_expander() -> Box<dyn RelationExpander<Self>> {
        Box::new(NoRelations)
    }
}

/// A validated, ordered field table.
pub struct FieldSchema<T> {
    fields: Vec<FieldDescriptor<T>>,
}

impl<T> std::fmt::Debug for FieldSchema<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.fields.iter()).finish()
    }
}

impl<T> FieldSchema<T> {
    /// Validate a field table.
    ///
    /// Fails on an empty table, a repeated field name, a zero priority, or a
    /// threshold above 100.
    pub fn new(fields: Vec<FieldDescriptor<T>>) -> Result<Self, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::NoSearchableFields);
        }
        for (i, field) in fields.iter().enumerate() {
            field.config.validate()?;
            if fields[..i].iter().any(|other| other.name() == field.name()) {
                return Err(SchemaError::DuplicateField(field.name().to_string()));
            }
        }
        Ok(Self { fields })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, ordinal: usize) -> Option<&FieldDescriptor<T>> {
        self.fields.get(ordinal)
    }

    /// Ordinal of the field called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor<T>> {
        self.fields.iter()
    }
}

impl<T: Searchable> FieldSchema<T> {
    /// The schema a [`Searchable`] type declares for itself.
    pub fn of() -> Result<Self, SchemaError> {
        Self::new(T::search_fields())
    }
}
