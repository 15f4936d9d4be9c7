//! Joint probability of a single world via the chain rule.
//!
//! `P(world) = Π_v P(world[v] | world[parents(v)])`. Roots read their prior;
//! every other node scans its conditional rows in document order and takes
//! the first row whose parent conditions and own value agree with the world.
//! A lookup that finds nothing is a table error, never a silent 0 or 1.

use bn_common::{Value, VariableId};
use thiserror::Error;
use tracing::trace;

use crate::network::{LocalTable, Network, VarIndex};
use crate::worlds::World;

/// Errors from evaluating a world.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("no row of `{variable}` matches {variable}={own_value} given [{parents}]")]
    NoMatchingRow {
        variable: VariableId,
        own_value: Value,
        parents: String,
    },

    #[error("prior of `{variable}` has no entry for `{value}`")]
    MissingPrior { variable: VariableId, value: Value },

    #[error("world assigns {actual} variables, network has {expected}")]
    WorldSizeMismatch { expected: usize, actual: usize },
}

impl From<EvaluationError> for bn_common::Error {
    fn from(err: EvaluationError) -> Self {
        match err {
            EvaluationError::WorldSizeMismatch { .. } => bn_common::Error::Inference(err.to_string()),
            _ => bn_common::Error::InvalidTable(err.to_string()),
        }
    }
}

/// `P(world[var] | parents of var in world)`.
pub fn local_probability(
    network: &Network,
    var: VarIndex,
    world: &World,
) -> Result<f64, EvaluationError> {
    let node = network.node(var);
    let own = world.value(var);
    match &node.table {
        LocalTable::Prior(prior) => prior[own].ok_or_else(|| EvaluationError::MissingPrior {
            variable: node.id.clone(),
            value: node.domain[own].clone(),
        }),
        LocalTable::Conditional(rows) => rows
            .iter()
            .find(|row| row.matches(var, world.values()))
            .map(|row| row.probability)
            .ok_or_else(|| EvaluationError::NoMatchingRow {
                variable: node.id.clone(),
                own_value: node.domain[own].clone(),
                parents: describe_parents(network, var, world),
            }),
    }
}

/// Joint probability of a complete world.
pub fn world_probability(network: &Network, world: &World) -> Result<f64, EvaluationError> {
    if world.len() != network.len() {
        return Err(EvaluationError::WorldSizeMismatch {
            expected: network.len(),
            actual: world.len(),
        });
    }

    let mut product = 1.0;
    for var in 0..network.len() {
        product *= local_probability(network, var, world)?;
    }
    trace!(world = ?world.values(), probability = product, "world evaluated");
    Ok(product)
}

fn describe_parents(network: &Network, var: VarIndex, world: &World) -> String {
    network
        .node(var)
        .parents
        .iter()
        .map(|&p| {
            let parent = network.node(p);
            format!("{}={}", parent.id, parent.domain[world.value(p)])
        })
        .collect::<Vec<_>>()
        .join(", ")
}
