//! Probability-table document: priors for roots, conditional rows for the rest.
//!
//! ```json
//! {
//!   "prior_probabilities": { "A": { "true": 0.2, "false": 0.8 } },
//!   "conditional_probabilities": {
//!     "B": [ { "A": "true", "own_value": "true", "probability": 0.8 } ]
//!   }
//! }
//! ```
//!
//! On the wire a conditional row is a flat object: `own_value` and
//! `probability` are reserved, every other key names a parent variable.
//! [`ConditionalRow`] splits these into typed fields.

use bn_common::{Value, VariableId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::document::JsonDocument;

/// Complete values document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Values {
    #[serde(default)]
    pub prior_probabilities: BTreeMap<VariableId, BTreeMap<Value, f64>>,

    #[serde(default)]
    pub conditional_probabilities: BTreeMap<VariableId, Vec<ConditionalRow>>,
}

impl JsonDocument for Values {
    const KIND: &'static str = "values";
}

impl Values {
    pub fn prior(&self, var: &str) -> Option<&BTreeMap<Value, f64>> {
        self.prior_probabilities.get(var)
    }

    pub fn conditional(&self, var: &str) -> Option<&[ConditionalRow]> {
        self.conditional_probabilities.get(var).map(Vec::as_slice)
    }

    /// All variable ids that carry a table of either kind.
    pub fn table_owners(&self) -> impl Iterator<Item = &VariableId> {
        self.prior_probabilities
            .keys()
            .chain(self.conditional_probabilities.keys())
    }
}

/// One row of a conditional probability table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalRow {
    /// Value of the table's own variable this row applies to.
    pub own_value: Value,

    /// `P(own_value | parent_values)`.
    pub probability: f64,

    /// Parent assignments this row is conditioned on.
    #[serde(flatten)]
    pub parent_values: BTreeMap<VariableId, Value>,
}

impl ConditionalRow {
    pub fn new(own_value: impl Into<Value>, probability: f64) -> Self {
        Self {
            own_value: own_value.into(),
            probability,
            parent_values: BTreeMap::new(),
        }
    }

    /// Builder-style parent condition.
    pub fn given(mut self, parent: impl Into<VariableId>, value: impl Into<Value>) -> Self {
        self.parent_values.insert(parent.into(), value.into());
        self
    }
}
