//! Conditional-probability queries by enumeration.
//!
//! `P(tofind | given) = P(given ∪ tofind) / P(given)`, each marginal being
//! the sum of joint probabilities over every world consistent with the
//! event. Where `given` and `tofind` assign the same variable, `tofind`
//! wins.
//!
//! Impossible evidence makes the quotient 0/0; the answer is NaN for that
//! query only. A table error aborts the whole run.

use bn_common::Assignment;
use bn_config::Query;
use bn_math::{conditional_ratio, CompensatedSum};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::evaluate::{world_probability, EvaluationError};
use crate::network::{Network, NetworkError};
use crate::worlds::{world_count, Event, Worlds};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Errors from answering queries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("invalid table data: {0}")]
    Evaluation(#[from] EvaluationError),

    #[error("unresolved assignment: {0}")]
    Assignment(#[from] NetworkError),

    #[error("query {index}: {source}")]
    Unresolved {
        index: u64,
        #[source]
        source: NetworkError,
    },
}

impl From<QueryError> for bn_common::Error {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Evaluation(e) => e.into(),
            QueryError::Assignment(_) | QueryError::Unresolved { .. } => {
                bn_common::Error::UnresolvedQuery(err.to_string())
            }
        }
    }
}

/// One query's answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Answer {
    pub index: u64,
    /// `P(tofind | given)`; NaN (JSON `null`) when the evidence is impossible.
    pub answer: f64,
}

impl Answer {
    pub fn is_undefined(&self) -> bool {
        bn_math::is_undefined(self.answer)
    }
}

/// Answers queries against a borrowed, immutable network.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'n> {
    network: &'n Network,
}

impl<'n> QueryEngine<'n> {
    pub fn new(network: &'n Network) -> Self {
        Self { network }
    }

    pub fn network(&self) -> &'n Network {
        self.network
    }

    /// Marginal probability of an event: the sum over its worlds.
    pub fn event_probability(&self, event: &Event) -> Result<f64, EvaluationError> {
        self.check_len(event)?;
        let mut total = CompensatedSum::new();
        for world in Worlds::new(self.network, event) {
            total.add(world_probability(self.network, &world)?);
        }
        Ok(total.total())
    }

    /// `P(given ∪ tofind) / P(given)`.
    pub fn answer_query(&self, given: &Event, tofind: &Event) -> Result<f64, EvaluationError> {
        self.check_len(given)?;
        self.check_len(tofind)?;
        let joint = self.event_probability(&given.union(tofind))?;
        let marginal = self.event_probability(given)?;
        Ok(conditional_ratio(joint, marginal))
    }

    fn check_len(&self, event: &Event) -> Result<(), EvaluationError> {
        if event.len() != self.network.len() {
            return Err(EvaluationError::WorldSizeMismatch {
                expected: self.network.len(),
                actual: event.len(),
            });
        }
        Ok(())
    }

    /// Marginal probability of a label-level assignment.
    pub fn probability(&self, event: &Assignment) -> Result<f64, QueryError> {
        let resolved = self.network.resolve(event)?;
        Ok(self.event_probability(&resolved)?)
    }

    /// Answer a single query document entry.
    pub fn answer(&self, query: &Query) -> Result<Answer, QueryError> {
        let resolve = |a: &Assignment| {
            self.network
                .resolve(a)
                .map_err(|source| QueryError::Unresolved {
                    index: query.index,
                    source,
                })
        };
        let given = resolve(&query.given)?;
        let tofind = resolve(&query.tofind)?;

        debug!(
            index = query.index,
            worlds = ?world_count(self.network, &given),
            "answering query"
        );
        let answer = self.answer_query(&given, &tofind)?;
        if answer.is_nan() {
            warn!(
                index = query.index,
                evidence = %describe(&query.given),
                "evidence has zero probability; answer undefined"
            );
        }
        Ok(Answer {
            index: query.index,
            answer,
        })
    }

    /// Answer every query in order. The first table error aborts the run.
    pub fn infer(&self, queries: &[Query]) -> Result<Vec<Answer>, QueryError> {
        let answers = queries
            .iter()
            .map(|q| self.answer(q))
            .collect::<Result<Vec<_>, _>>()?;
        info!(queries = answers.len(), "inference complete");
        Ok(answers)
    }

    /// Answer every query on the rayon pool. Results are in input order.
    #[cfg(feature = "parallel")]
    pub fn infer_parallel(&self, queries: &[Query]) -> Result<Vec<Answer>, QueryError> {
        let answers = queries
            .par_iter()
            .map(|q| self.answer(q))
            .collect::<Result<Vec<_>, _>>()?;
        info!(queries = answers.len(), "parallel inference complete");
        Ok(answers)
    }
}

fn describe(assignment: &Assignment) -> String {
    assignment
        .iter()
        .map(|(var, value)| format!("{var}={value}"))
        .collect::<Vec<_>>()
        .join(", ")
}
