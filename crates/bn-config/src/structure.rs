//! Network structure document: variable domains and parent declarations.
//!
//! ```json
//! {
//!   "variables": { "Burglary": ["true", "false"], "Alarm": ["true", "false"] },
//!   "dependencies": { "Alarm": ["Burglary"], "Burglary": null }
//! }
//! ```
//!
//! Variable declaration order is preserved as written; it fixes the order in
//! which free variables are expanded during world enumeration.

use bn_common::{Value, VariableId};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::document::JsonDocument;

/// Complete structure document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub variables: Variables,

    /// Parent lists keyed by child. A missing key, `null`, or `[]` marks a
    /// root variable.
    #[serde(default)]
    pub dependencies: BTreeMap<VariableId, Option<Vec<VariableId>>>,
}

impl JsonDocument for Structure {
    const KIND: &'static str = "structure";
}

impl Structure {
    /// Declared parents of `var`, empty for roots and unknown variables.
    pub fn parents(&self, var: &str) -> &[VariableId] {
        self.dependencies
            .get(var)
            .and_then(|p| p.as_deref())
            .unwrap_or(&[])
    }

    /// True when `var` declares no parents.
    pub fn is_root(&self, var: &str) -> bool {
        self.parents(var).is_empty()
    }
}

/// Ordered variable declarations: id plus finite domain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables(Vec<(VariableId, Vec<Value>)>);

impl Variables {
    pub fn new(decls: Vec<(VariableId, Vec<Value>)>) -> Self {
        Variables(decls)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Declarations in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&VariableId, &[Value])> {
        self.0.iter().map(|(id, domain)| (id, domain.as_slice()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &VariableId> {
        self.0.iter().map(|(id, _)| id)
    }

    pub fn domain(&self, var: &str) -> Option<&[Value]> {
        self.0
            .iter()
            .find(|(id, _)| id.as_str() == var)
            .map(|(_, domain)| domain.as_slice())
    }

    pub fn contains(&self, var: &str) -> bool {
        self.domain(var).is_some()
    }
}

impl FromIterator<(VariableId, Vec<Value>)> for Variables {
    fn from_iter<I: IntoIterator<Item = (VariableId, Vec<Value>)>>(iter: I) -> Self {
        Variables(iter.into_iter().collect())
    }
}

impl Serialize for Variables {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, domain) in &self.0 {
            map.serialize_entry(id, domain)?;
        }
        map.end()
    }
}

struct VariablesVisitor;

impl<'de> Visitor<'de> for VariablesVisitor {
    type Value = Variables;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from variable id to its list of values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Variables, A::Error> {
        let mut decls = Vec::with_capacity(access.size_hint().unwrap_or(0));
        let mut seen = HashSet::new();
        while let Some((id, domain)) = access.next_entry::<VariableId, Vec<Value>>()? {
            if !seen.insert(id.clone()) {
                return Err(de::Error::custom(format!("duplicate variable `{id}`")));
            }
            decls.push((id, domain));
        }
        Ok(Variables(decls))
    }
}

impl<'de> Deserialize<'de> for Variables {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(VariablesVisitor)
    }
}
