// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! Two failure points, two enums. `SchemaError` aborts engine construction;
//! `QueryExecutionError` fails a single search call. Neither leaves state
//! behind: a failed build returns no engine, a failed search leaves the engine
//! untouched. `LoadError` covers reading records and schema files from disk.

use std::path::PathBuf;

/// Invalid field table or configuration. Fatal to engine construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// The type declares no searchable fields.
    #[error("no searchable fields declared")]
    NoSearchableFields,

    /// Two fields export the same name.
    #[error("duplicate searchable field '{0}'")]
    DuplicateField(String),

    /// Priority is a divisor in the final score and must be at least 1.
    #[error("field '{field}' has priority {priority}, expected >= 1")]
    InvalidPriority { field: String, priority: u32 },

    /// Threshold is compared against a 0-100 percentage.
    #[error("field '{field}' has match threshold {threshold}, expected 0..=100")]
    InvalidThreshold { field: String, threshold: u8 },

    /// A tuning value in `SearchConfig` is out of range.
    #[error("invalid search config: {0}")]
    InvalidConfig(String),
}

/// A single search call failed inside the index capability.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryExecutionError {
    /// The tier referenced a field ordinal the index never saw.
    #[error("unknown field ordinal {0}")]
    UnknownField(usize),

    /// The tier cannot be executed as specified.
    #[error("invalid query tier: {0}")]
    InvalidTier(String),

    /// The index backend reported a failure.
    #[error("index error: {0}")]
    Index(String),
}

/// Reading a records or schema file failed.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Crate-level error for callers that handle both phases in one place.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Query(#[from] QueryExecutionError),
}

/// Convenience alias for fallible crate operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
