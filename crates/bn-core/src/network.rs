//! Network model: variables, parent/child links, and resolved local tables.
//!
//! Construction is a pure two-phase function of the structure and values
//! documents:
//!
//! 1. declare one node per variable, in document order, and check that every
//!    dependency and table refers to a declared variable;
//! 2. link parents to children and attach each node's table: a prior for
//!    roots, a conditional table for everything else.
//!
//! The result is an immutable arena. Variables are addressed by [`VarIndex`]
//! (declaration position) and values by their position in the variable's
//! domain, so worlds are plain index vectors and table lookups never touch
//! strings.
//!
//! Acyclicity is assumed, not checked.

use bn_common::{Assignment, Value, VariableId};
use bn_config::{ConditionalRow, Structure, Values};
use bn_math::is_probability;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;
use tracing::{debug, warn};

use crate::worlds::{generate_worlds, Event, World};

/// Position of a variable in declaration order.
pub type VarIndex = usize;

// ── Errors ──────────────────────────────────────────────────────────────

/// Errors from network construction and assignment resolution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    #[error("unknown variable `{variable}` referenced in {context}")]
    UnknownVariable { variable: VariableId, context: String },

    #[error("value `{value}` is not in the domain of `{variable}` ({context})")]
    UnknownValue {
        variable: VariableId,
        value: Value,
        context: String,
    },

    #[error("`{variable}` has no {kind} table")]
    MissingTable {
        variable: VariableId,
        kind: &'static str,
    },

    #[error("probability {probability} for `{variable}` is outside [0, 1]")]
    InvalidProbability { variable: VariableId, probability: f64 },

    #[error("invalid domain for `{variable}`: {reason}")]
    InvalidDomain { variable: VariableId, reason: String },
}

impl From<NetworkError> for bn_common::Error {
    fn from(err: NetworkError) -> Self {
        bn_common::Error::InvalidNetwork(err.to_string())
    }
}

// ── Tables ──────────────────────────────────────────────────────────────

/// A conditional-table row resolved to indices.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// `(parent, value index)` conditions, all of which must hold.
    pub parent_values: Vec<(VarIndex, usize)>,
    /// Value index of the node's own variable.
    pub own_value: usize,
    pub probability: f64,
}

impl TableRow {
    /// True if this row applies to `world` for the node `var`.
    pub fn matches(&self, var: VarIndex, world: &[usize]) -> bool {
        self.own_value == world[var]
            && self
                .parent_values
                .iter()
                .all(|&(parent, value)| world[parent] == value)
    }
}

/// A node's local probability table.
#[derive(Debug, Clone, PartialEq)]
pub enum LocalTable {
    /// Unconditional distribution, indexed by value. `None` marks a value
    /// the prior document did not list.
    Prior(Vec<Option<f64>>),
    /// Rows in document order; the first matching row wins.
    Conditional(Vec<TableRow>),
}

impl LocalTable {
    pub fn is_prior(&self) -> bool {
        matches!(self, LocalTable::Prior(_))
    }
}

// ── Nodes ───────────────────────────────────────────────────────────────

/// One variable of the network.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkNode {
    pub id: VariableId,
    pub domain: Vec<Value>,
    pub parents: BTreeSet<VarIndex>,
    pub children: BTreeSet<VarIndex>,
    pub table: LocalTable,
}

impl NetworkNode {
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Position of `value` in this node's domain.
    pub fn value_index(&self, value: &Value) -> Option<usize> {
        self.domain.iter().position(|v| v == value)
    }
}

// ── Network ─────────────────────────────────────────────────────────────

/// Immutable Bayesian network.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    nodes: Vec<NetworkNode>,
    index: HashMap<VariableId, VarIndex>,
}

impl Network {
    /// Build a network from its structure and probability tables.
    pub fn construct(structure: &Structure, values: &Values) -> Result<Self, NetworkError> {
        // Phase 1: declare variables and check references.
        let mut index = HashMap::with_capacity(structure.variables.len());
        let mut domains = Vec::with_capacity(structure.variables.len());
        for (i, (id, domain)) in structure.variables.iter().enumerate() {
            check_domain(id, domain)?;
            index.insert(id.clone(), i);
            domains.push((id.clone(), domain.to_vec()));
        }

        for var in structure.dependencies.keys() {
            lookup(&index, var, "dependencies")?;
        }
        for var in values.table_owners() {
            lookup(&index, var, "probability tables")?;
        }

        // Phase 2: link parents and children, attach tables.
        let n = domains.len();
        let mut parents = vec![BTreeSet::new(); n];
        let mut children = vec![BTreeSet::new(); n];
        for (x, (id, _)) in domains.iter().enumerate() {
            for p in structure.parents(id.as_str()) {
                let pi = lookup(&index, p, &format!("parents of `{id}`"))?;
                parents[x].insert(pi);
                children[pi].insert(x);
            }
        }

        let mut nodes = Vec::with_capacity(n);
        for (x, ((id, domain), (node_parents, node_children))) in domains
            .into_iter()
            .zip(parents.into_iter().zip(children))
            .enumerate()
        {
            let table = if node_parents.is_empty() {
                let prior = values.prior(id.as_str()).ok_or_else(|| NetworkError::MissingTable {
                    variable: id.clone(),
                    kind: "prior",
                })?;
                resolve_prior(&id, &domain, prior)?
            } else {
                let rows = values
                    .conditional(id.as_str())
                    .ok_or_else(|| NetworkError::MissingTable {
                        variable: id.clone(),
                        kind: "conditional",
                    })?;
                resolve_rows(x, &id, &domain, &node_parents, rows, &index, structure)?
            };

            nodes.push(NetworkNode {
                id,
                domain,
                parents: node_parents,
                children: node_children,
                table,
            });
        }

        let network = Network { nodes, index };
        debug!(
            variables = network.len(),
            roots = network.nodes.iter().filter(|n| n.is_root()).count(),
            "network constructed"
        );
        Ok(network)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in declaration order.
    pub fn nodes(&self) -> &[NetworkNode] {
        &self.nodes
    }

    pub fn node(&self, var: VarIndex) -> &NetworkNode {
        &self.nodes[var]
    }

    pub fn index_of(&self, var: &str) -> Option<VarIndex> {
        self.index.get(var).copied()
    }

    pub fn node_by_id(&self, var: &str) -> Option<&NetworkNode> {
        self.index_of(var).map(|i| &self.nodes[i])
    }

    /// Domain size of `var`.
    pub fn arity(&self, var: VarIndex) -> usize {
        self.nodes[var].domain.len()
    }

    /// Resolve a label-level assignment into an index-based event.
    pub fn resolve(&self, assignment: &Assignment) -> Result<Event, NetworkError> {
        let mut event = Event::empty(self.len());
        for (var, value) in assignment {
            let vi = lookup(&self.index, var, "assignment")?;
            let node = &self.nodes[vi];
            let value_idx = node.value_index(value).ok_or_else(|| NetworkError::UnknownValue {
                variable: var.clone(),
                value: value.clone(),
                context: "assignment".to_string(),
            })?;
            event.set(vi, value_idx);
        }
        Ok(event)
    }

    /// Label-level view of an event.
    pub fn to_assignment(&self, event: &Event) -> Assignment {
        event
            .assigned()
            .map(|(var, value)| {
                let node = &self.nodes[var];
                (node.id.clone(), node.domain[value].clone())
            })
            .collect()
    }

    /// Label-level view of a complete world.
    pub fn world_assignment(&self, world: &World) -> Assignment {
        world
            .values()
            .iter()
            .enumerate()
            .map(|(var, &value)| {
                let node = &self.nodes[var];
                (node.id.clone(), node.domain[value].clone())
            })
            .collect()
    }

    /// Every complete assignment that agrees with `partial`, in enumeration
    /// order.
    pub fn generate_worlds(&self, partial: &Assignment) -> Result<Vec<Assignment>, NetworkError> {
        let event = self.resolve(partial)?;
        Ok(generate_worlds(self, &event)
            .iter()
            .map(|w| self.world_assignment(w))
            .collect())
    }
}

fn lookup(
    index: &HashMap<VariableId, VarIndex>,
    var: &VariableId,
    context: &str,
) -> Result<VarIndex, NetworkError> {
    index
        .get(var)
        .copied()
        .ok_or_else(|| NetworkError::UnknownVariable {
            variable: var.clone(),
            context: context.to_string(),
        })
}

fn check_domain(id: &VariableId, domain: &[Value]) -> Result<(), NetworkError> {
    if domain.is_empty() {
        return Err(NetworkError::InvalidDomain {
            variable: id.clone(),
            reason: "no values declared".to_string(),
        });
    }
    let mut seen = BTreeSet::new();
    for value in domain {
        if !seen.insert(value) {
            return Err(NetworkError::InvalidDomain {
                variable: id.clone(),
                reason: format!("value `{value}` declared twice"),
            });
        }
    }
    Ok(())
}

fn check_probability(id: &VariableId, probability: f64) -> Result<(), NetworkError> {
    if is_probability(probability) {
        Ok(())
    } else {
        Err(NetworkError::InvalidProbability {
            variable: id.clone(),
            probability,
        })
    }
}

fn resolve_prior(
    id: &VariableId,
    domain: &[Value],
    prior: &std::collections::BTreeMap<Value, f64>,
) -> Result<LocalTable, NetworkError> {
    for (value, &p) in prior {
        if !domain.contains(value) {
            return Err(NetworkError::UnknownValue {
                variable: id.clone(),
                value: value.clone(),
                context: "prior table".to_string(),
            });
        }
        check_probability(id, p)?;
    }
    Ok(LocalTable::Prior(
        domain.iter().map(|v| prior.get(v).copied()).collect(),
    ))
}

fn resolve_rows(
    var: VarIndex,
    id: &VariableId,
    domain: &[Value],
    parents: &BTreeSet<VarIndex>,
    rows: &[ConditionalRow],
    index: &HashMap<VariableId, VarIndex>,
    structure: &Structure,
) -> Result<LocalTable, NetworkError> {
    let context = format!("conditional table of `{id}`");
    let mut resolved = Vec::with_capacity(rows.len());
    for row in rows {
        check_probability(id, row.probability)?;
        let own_value = domain
            .iter()
            .position(|v| *v == row.own_value)
            .ok_or_else(|| NetworkError::UnknownValue {
                variable: id.clone(),
                value: row.own_value.clone(),
                context: context.clone(),
            })?;

        let mut parent_values = Vec::with_capacity(row.parent_values.len());
        for (parent, value) in &row.parent_values {
            let pi = lookup(index, parent, &context)?;
            if pi == var {
                warn!(variable = %id, "conditional row conditions on its own variable");
            } else if !parents.contains(&pi) {
                warn!(variable = %id, condition = %parent, "conditional row conditions on a non-parent");
            }
            let parent_domain = structure.variables.domain(parent.as_str()).unwrap_or(&[]);
            let vi = parent_domain
                .iter()
                .position(|v| v == value)
                .ok_or_else(|| NetworkError::UnknownValue {
                    variable: parent.clone(),
                    value: value.clone(),
                    context: context.clone(),
                })?;
            parent_values.push((pi, vi));
        }

        resolved.push(TableRow {
            parent_values,
            own_value,
            probability: row.probability,
        });
    }
    Ok(LocalTable::Conditional(resolved))
}
