//! Label-level assignments: a mapping from variable to one concrete value.
//!
//! A partial assignment (an "event") may omit variables; a complete one (a
//! "world") names every network variable exactly once. Completeness is only
//! meaningful relative to a network, so this type does not track it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::id::{Value, VariableId};

/// Mapping from variable id to value label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment(BTreeMap<VariableId, Value>);

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `value` to `var`, returning the previous value if any.
    pub fn insert(&mut self, var: impl Into<VariableId>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(var.into(), value.into())
    }

    /// Builder-style insert.
    pub fn with(mut self, var: impl Into<VariableId>, value: impl Into<Value>) -> Self {
        self.insert(var, value);
        self
    }

    pub fn get(&self, var: &str) -> Option<&Value> {
        self.0.get(var)
    }

    pub fn contains(&self, var: &str) -> bool {
        self.0.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VariableId, &Value)> {
        self.0.iter()
    }

    /// Merge two assignments. Where both name the same variable, `other`'s
    /// value wins.
    pub fn union(&self, other: &Assignment) -> Assignment {
        let mut merged = self.0.clone();
        for (var, value) in &other.0 {
            merged.insert(var.clone(), value.clone());
        }
        Assignment(merged)
    }

    /// True if every variable assigned here has the same value in `other`.
    pub fn agrees_with(&self, other: &Assignment) -> bool {
        self.0.iter().all(|(var, value)| other.get(var.as_str()) == Some(value))
    }
}

impl FromIterator<(VariableId, Value)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (VariableId, Value)>>(iter: I) -> Self {
        Assignment(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = (&'a VariableId, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, VariableId, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
