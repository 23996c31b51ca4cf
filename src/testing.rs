// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit tests, integration tests and benches.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use crate::schema::{FieldDescriptor, Searchable};
use crate::search::relation::{HierarchyExpander, RelationExpander};

/// A company in a corporate hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub code: String,
    pub parent_code: String,
    pub name: String,
    pub city: String,
    pub notes: Option<String>,
}

impl Searchable for Company {
    fn search_fields() -> Vec<FieldDescriptor<Self>> {
        vec![
            FieldDescriptor::new("name", |c: &Company| Some(c.name.as_str())),
            FieldDescriptor::new("code", |c: &Company| Some(c.code.as_str()))
                .priority(2)
                .exact_match_only(true),
            FieldDescriptor::new("city", |c: &Company| Some(c.city.as_str())).priority(3),
            FieldDescriptor::new("notes", |c: &Company| c.notes.as_deref()).priority(4),
        ]
    }

    fn relation_expander() -> Box<dyn RelationExpander<Self>> {
        Box::new(HierarchyExpander::new(
            "code",
            |c: &Company| Some(c.code.as_str()),
            |c: &Company| Some(c.parent_code.as_str()),
        ))
    }
}

/// A standalone company (its own ultimate parent).
pub fn company(code: &str, name: &str, city: &str) -> Company {
    subsidiary(code, code, name, city)
}

/// A company owned by `parent_code`.
pub fn subsidiary(code: &str, parent_code: &str, name: &str, city: &str) -> Company {
    Company {
        code: code.to_string(),
        parent_code: parent_code.to_string(),
        name: name.to_string(),
        city: city.to_string(),
        notes: None,
    }
}

/// A small directory with one corporate family and assorted near-misses.
pub fn sample_companies() -> Vec<Company> {
    vec![
        company("ACME", "Acme Corp", "Springfield"),
        subsidiary("ACMEL", "ACME", "Acme Logistics", "Shelbyville"),
        subsidiary("ROAD", "ACME", "Roadrunner Supply", "Albuquerque"),
        company("GLBX", "Globex Corporation", "Cypress Creek"),
        company("INIT", "Initech", "Austin"),
        company("ACMI", "Acmi Widgets", "Springfield"),
        Company {
            notes: Some("formerly acme corp west".to_string()),
            ..company("WEST", "Westward Trading", "Ogdenville")
        },
    ]
}

/// `n` synthetic companies for benchmarks and property tests.
pub fn generated_companies(n: usize) -> Vec<Company> {
    const WORDS: [&str; 12] = [
        "acme", "global", "north", "supply", "trading", "logistics", "widgets", "holdings",
        "systems", "partners", "river", "summit",
    ];
    const CITIES: [&str; 5] = ["Springfield", "Austin", "Portland", "Dayton", "Tulsa"];

    (0..n)
        .map(|i| {
            let first = WORDS[i % WORDS.len()];
            let second = WORDS[(i / WORDS.len() + i) % WORDS.len()];
            let code = format!("C{:05}", i);
            let parent = format!("C{:05}", i - i % 8);
            subsidiary(
                &code,
                &parent,
                &format!("{} {} {}", first, second, i),
                CITIES[i % CITIES.len()],
            )
        })
        .collect()
}
