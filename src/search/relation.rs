// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Relation expansion: pull in objects related to what matched.
//!
//! Searching for a subsidiary should surface the rest of its corporate family
//! even when their names share nothing with the query. A [`RelationExpander`]
//! is chosen when the engine is built; the default [`NoRelations`] does nothing.
//!
//! [`HierarchyExpander`] reads two attributes: an object's own `code` and the
//! code of its ultimate parent. Given the matched set it collects the parent
//! codes and adds every other object that either *is* one of those parents
//! (its code is in the set) or *belongs* to one (its parent code is in the set).

use std::collections::BTreeSet;

use crate::schema::Accessor;

/// An object added by relation expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion<'a> {
    pub object_index: usize,
    /// Attribute reported as `matched_property`.
    pub property: &'a str,
    /// Attribute value reported as `matched_text`.
    pub matched_text: &'a str,
}

/// Strategy for appending related objects after aggregation.
pub trait RelationExpander<T>: Send + Sync {
    /// Objects related to `matched` (object indices), excluding `matched` itself.
    ///
    /// Must be deterministic: same inputs, same expansions in the same order.
    fn expand<'a>(&'a self, objects: &'a [T], matched: &[usize]) -> Vec<Expansion<'a>>;
}

/// No-op expander for types without a relation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRelations;

impl<T> RelationExpander<T> for NoRelations {
    fn expand<'a>(&'a self, _objects: &'a [T], _matched: &[usize]) -> Vec<Expansion<'a>> {
        Vec::new()
    }
}

/// Expands through a code / ultimate-parent-code hierarchy.
pub struct HierarchyExpander<T> {
    code_field: String,
    code: Accessor<T>,
    parent_code: Accessor<T>,
}

impl<T> HierarchyExpander<T> {
    /// `code_field` names the code attribute in results.
    pub fn new<C, P>(code_field: impl Into<String>, code: C, parent_code: P) -> Self
    where
        C: Fn(&T) -> Option<&str> + Send + Sync + 'static,
        P: Fn(&T) -> Option<&str> + Send + Sync + 'static,
    {
        Self {
            code_field: code_field.into(),
            code: Box::new(code),
            parent_code: Box::new(parent_code),
        }
    }

    fn read<'a>(accessor: &Accessor<T>, object: &'a T) -> Option<&'a str> {
        accessor(object)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

impl<T> std::fmt::Debug for HierarchyExpander<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HierarchyExpander")
            .field("code_field", &self.code_field)
            .finish_non_exhaustive()
    }
}

impl<T> RelationExpander<T> for HierarchyExpander<T> {
    fn expand<'a>(&'a self, objects: &'a [T], matched: &[usize]) -> Vec<Expansion<'a>> {
        let parents: BTreeSet<&str> = matched
            .iter()
            .filter_map(|&i| objects.get(i))
            .filter_map(|object| Self::read(&self.parent_code, object))
            .collect();
        if parents.is_empty() {
            return Vec::new();
        }

        let mut in_results = vec![false; objects.len()];
        for &i in matched {
            if let Some(flag) = in_results.get_mut(i) {
                *flag = true;
            }
        }

        objects
            .iter()
            .enumerate()
            .filter(|(i, _)| !in_results[*i])
            .filter_map(|(object_index, object)| {
                let code = Self::read(&self.code, object)?;
                let is_parent = parents.contains(code);
                let is_member = Self::read(&self.parent_code, object)
                    .is_some_and(|parent| parents.contains(parent));
                (is_parent || is_member).then_some(Expansion {
                    object_index,
                    property: self.code_field.as_str(),
                    matched_text: code,
                })
            })
            .collect()
    }
}
