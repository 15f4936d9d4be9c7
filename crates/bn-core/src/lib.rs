//! Exact Bayesian-network inference by enumeration.
//!
//! A [`Network`] is built once from the structure and values documents and
//! never mutated. Queries are answered by summing chain-rule joint
//! probabilities over every world consistent with an event:
//!
//! ```text
//! structure.json ┐
//!                ├─▶ Network::construct ─▶ Worlds + world_probability ─▶ QueryEngine ─▶ Answer
//! values.json ───┘
//! ```

pub mod cli;
pub mod evaluate;
pub mod exit_codes;
pub mod logging;
pub mod network;
pub mod output;
pub mod query;
pub mod worlds;

pub use evaluate::{local_probability, world_probability, EvaluationError};
pub use exit_codes::ExitCode;
pub use network::{LocalTable, Network, NetworkError, NetworkNode, TableRow, VarIndex};
pub use query::{Answer, QueryEngine, QueryError};
pub use worlds::{generate_worlds, world_count, Event, World, Worlds};
