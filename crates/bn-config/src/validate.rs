//! Document errors and semantic validation.
//!
//! Hard failures (unreadable file, malformed JSON) are [`ValidationError`]s.
//! Table-level problems that only matter if inference actually visits the
//! affected world are collected as [`ValidationWarning`]s; network
//! construction decides what is fatal.

use bn_common::{Value, VariableId};
use bn_math::{approx_eq, stable_sum};
use std::fmt;
use thiserror::Error;

use crate::structure::Structure;
use crate::values::{ConditionalRow, Values};

/// Tolerance for "sums to one" checks.
pub const NORMALIZATION_TOLERANCE: f64 = 1e-6;

/// Coverage checks enumerate parent combinations; tables larger than this
/// are skipped and reported.
pub const MAX_COVERAGE_COMBINATIONS: usize = 1 << 16;

/// Errors from loading or validating documents.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("semantic error: {0}")]
    Semantic(String),
}

impl From<ValidationError> for bn_common::Error {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::IoError(msg) => bn_common::Error::Io(std::io::Error::other(msg)),
            ValidationError::ParseError(msg) => bn_common::Error::InvalidDocument(msg),
            ValidationError::Semantic(msg) => bn_common::Error::InvalidDocument(msg),
        }
    }
}

/// A non-fatal table problem.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationWarning {
    /// A prior table's probabilities do not sum to one.
    PriorNotNormalized { variable: VariableId, sum: f64 },

    /// For one parent combination, the own-value probabilities do not sum to one.
    ConditionalNotNormalized {
        variable: VariableId,
        parents: String,
        sum: f64,
    },

    /// No row covers a (parent combination, own value) pair.
    MissingRow {
        variable: VariableId,
        parents: String,
        own_value: Value,
    },

    /// A variable carries both a prior and a conditional table.
    ConflictingTables { variable: VariableId },

    /// Coverage was not checked because the table is too large.
    CoverageSkipped {
        variable: VariableId,
        combinations: usize,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::PriorNotNormalized { variable, sum } => {
                write!(f, "prior for `{variable}` sums to {sum}, expected 1")
            }
            ValidationWarning::ConditionalNotNormalized {
                variable,
                parents,
                sum,
            } => write!(
                f,
                "conditional table for `{variable}` sums to {sum} given [{parents}], expected 1"
            ),
            ValidationWarning::MissingRow {
                variable,
                parents,
                own_value,
            } => write!(
                f,
                "conditional table for `{variable}` has no row for {variable}={own_value} given [{parents}]"
            ),
            ValidationWarning::ConflictingTables { variable } => {
                write!(f, "`{variable}` has both a prior and a conditional table")
            }
            ValidationWarning::CoverageSkipped {
                variable,
                combinations,
            } => write!(
                f,
                "coverage of `{variable}` not checked ({combinations} combinations)"
            ),
        }
    }
}

/// Outcome of [`validate_documents`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Treat every warning as an error.
    pub fn into_strict(self) -> Result<(), ValidationError> {
        if self.warnings.is_empty() {
            return Ok(());
        }
        let msgs: Vec<String> = self.warnings.iter().map(ToString::to_string).collect();
        Err(ValidationError::Semantic(msgs.join("; ")))
    }
}

/// Check table normalisation and coverage.
///
/// Variables or parents that are not declared are skipped here; they are
/// construction errors and reported there.
pub fn validate_documents(structure: &Structure, values: &Values) -> ValidationReport {
    let mut report = ValidationReport::default();

    for (var, prior) in &values.prior_probabilities {
        if values.conditional_probabilities.contains_key(var) {
            report.warnings.push(ValidationWarning::ConflictingTables {
                variable: var.clone(),
            });
        }
        let probs: Vec<f64> = prior.values().copied().collect();
        let sum = stable_sum(&probs);
        if !approx_eq(sum, 1.0, NORMALIZATION_TOLERANCE) {
            report.warnings.push(ValidationWarning::PriorNotNormalized {
                variable: var.clone(),
                sum,
            });
        }
    }

    for (var, rows) in &values.conditional_probabilities {
        check_conditional(structure, var, rows, &mut report);
    }

    report
}

fn check_conditional(
    structure: &Structure,
    var: &VariableId,
    rows: &[ConditionalRow],
    report: &mut ValidationReport,
) {
    let Some(own_domain) = structure.variables.domain(var.as_str()) else {
        return;
    };
    let parents = structure.parents(var.as_str());
    let mut parent_domains = Vec::with_capacity(parents.len());
    for p in parents {
        match structure.variables.domain(p.as_str()) {
            Some(d) if !d.is_empty() => parent_domains.push((p, d)),
            _ => return,
        }
    }

    let combinations = parent_domains
        .iter()
        .try_fold(own_domain.len(), |acc, (_, d)| acc.checked_mul(d.len()));
    match combinations {
        Some(n) if n <= MAX_COVERAGE_COMBINATIONS => {}
        other => {
            report.warnings.push(ValidationWarning::CoverageSkipped {
                variable: var.clone(),
                combinations: other.unwrap_or(usize::MAX),
            });
            return;
        }
    }

    let mut digits = vec![0usize; parent_domains.len()];
    loop {
        let combo: Vec<(&VariableId, &Value)> = parent_domains
            .iter()
            .zip(&digits)
            .map(|((p, d), &i)| (*p, &d[i]))
            .collect();

        let mut probs = Vec::with_capacity(own_domain.len());
        let mut complete = true;
        for own in own_domain {
            match first_covering_row(rows, &combo, own) {
                Some(row) => probs.push(row.probability),
                None => {
                    complete = false;
                    report.warnings.push(ValidationWarning::MissingRow {
                        variable: var.clone(),
                        parents: describe(&combo),
                        own_value: own.clone(),
                    });
                }
            }
        }
        if complete {
            let sum = stable_sum(&probs);
            if !approx_eq(sum, 1.0, NORMALIZATION_TOLERANCE) {
                report.warnings.push(ValidationWarning::ConditionalNotNormalized {
                    variable: var.clone(),
                    parents: describe(&combo),
                    sum,
                });
            }
        }

        if !advance(&mut digits, &parent_domains) {
            break;
        }
    }
}

/// First row whose own value matches and whose parent conditions agree with
/// `combo`. Conditions on variables outside `combo` cannot be decided here
/// and are treated as satisfied.
fn first_covering_row<'a>(
    rows: &'a [ConditionalRow],
    combo: &[(&VariableId, &Value)],
    own: &Value,
) -> Option<&'a ConditionalRow> {
    rows.iter().find(|row| {
        row.own_value == *own
            && row.parent_values.iter().all(|(k, v)| {
                combo
                    .iter()
                    .find(|(p, _)| *p == k)
                    .map_or(true, |(_, cv)| *cv == v)
            })
    })
}

fn advance(digits: &mut [usize], domains: &[(&VariableId, &[Value])]) -> bool {
    for (digit, (_, d)) in digits.iter_mut().zip(domains) {
        *digit += 1;
        if *digit < d.len() {
            return true;
        }
        *digit = 0;
    }
    false
}

fn describe(combo: &[(&VariableId, &Value)]) -> String {
    combo
        .iter()
        .map(|(p, v)| format!("{p}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}
