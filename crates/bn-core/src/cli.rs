//! Command-line driver: load the three documents, build the network, answer
//! the queries, and write the answers.

use bn_common::{Error, OutputFormat};
use bn_config::{validate_documents, JsonDocument, Queries, Structure, Values};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::exit_codes::ExitCode;
use crate::network::Network;
use crate::output::write_answers;
use crate::query::QueryEngine;

/// Exact Bayesian-network inference by enumeration
#[derive(Parser, Debug)]
#[command(name = "bn-infer", version, about)]
pub struct Cli {
    /// Network structure document (variables and dependencies)
    pub structure: PathBuf,

    /// Probability tables document (priors and conditional rows)
    pub values: PathBuf,

    /// Queries document
    pub queries: PathBuf,

    /// Output format for answers
    #[arg(long, value_enum, env = "BN_FORMAT", default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Log filter directive (e.g. warn, info, bn_core=debug)
    #[arg(long, env = "BN_LOG", default_value = "warn")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Treat table validation warnings as errors
    #[arg(long)]
    pub strict: bool,

    /// Evaluate queries in parallel
    #[cfg(feature = "parallel")]
    #[arg(long)]
    pub parallel: bool,
}

/// Run one inference pass and write the answers to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<ExitCode, Error> {
    let structure = Structure::from_file(&cli.structure)?;
    let values = Values::from_file(&cli.values)?;
    let queries = Queries::from_file(&cli.queries)?;

    let report = validate_documents(&structure, &values);
    for warning in &report.warnings {
        warn!(%warning, "table validation");
    }
    if cli.strict {
        report.into_strict()?;
    }

    let network = Network::construct(&structure, &values)?;
    drop((structure, values));

    let engine = QueryEngine::new(&network);
    #[cfg(feature = "parallel")]
    let answers = if cli.parallel {
        engine.infer_parallel(queries.as_slice())?
    } else {
        engine.infer(queries.as_slice())?
    };
    #[cfg(not(feature = "parallel"))]
    let answers = engine.infer(queries.as_slice())?;

    write_answers(out, &answers, cli.format)?;

    let undefined = answers.iter().filter(|a| a.is_undefined()).count();
    info!(answers = answers.len(), undefined, "run complete");
    Ok(if undefined > 0 {
        ExitCode::UndefinedAnswers
    } else {
        ExitCode::Clean
    })
}
