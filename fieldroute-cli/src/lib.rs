//! Command-line interface for sequencing a representative's stops.
//!
//! `fieldroute sequence <request.json>` reads a JSON `SequenceRequest`, orders
//! its stops through an OSRM instance (falling back to local heuristics when
//! the service is unavailable) and prints the `RouteResult` as JSON.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod sequence;

pub use error::CliError;
use sequence::{SequenceArgs, run_sequence};

const ARG_SEQUENCE_REQUEST: &str = "request";
const ARG_SEQUENCE_OSRM_BASE_URL: &str = "osrm-base-url";
const ARG_SEQUENCE_OSRM_PROFILE: &str = "osrm-profile";
const ARG_SEQUENCE_TIMEOUT_SECS: &str = "timeout-secs";
const ENV_SEQUENCE_REQUEST: &str = "FIELDROUTE_CMDS_SEQUENCE_REQUEST_PATH";

/// Run the fieldroute CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Sequence(args) => run_sequence(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "fieldroute",
    about = "Order field visits from a depot and draw the route between them",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sequence the stops of a JSON request and print the route.
    Sequence(SequenceArgs),
}

#[cfg(test)]
mod tests;
