//! Query document: a list of `P(tofind | given)` requests.

use bn_common::Assignment;
use serde::{Deserialize, Serialize};

use crate::document::JsonDocument;

/// One conditional-probability query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Correlates the answer with this query.
    pub index: u64,

    /// Evidence to condition on.
    #[serde(default)]
    pub given: Assignment,

    /// Target assignment whose probability is requested.
    pub tofind: Assignment,
}

impl Query {
    pub fn new(index: u64, given: Assignment, tofind: Assignment) -> Self {
        Self {
            index,
            given,
            tofind,
        }
    }
}

/// Query document: a JSON array of [`Query`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Queries(pub Vec<Query>);

impl JsonDocument for Queries {
    const KIND: &'static str = "queries";
}

impl Queries {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Query] {
        &self.0
    }
}
