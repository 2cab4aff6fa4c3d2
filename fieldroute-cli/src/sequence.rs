//! Sequence command implementation for the fieldroute CLI.

use std::io::{BufReader, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use fieldroute_core::{RouteResult, RoutingService, SequenceRequest};
use fieldroute_osrm::{
    DEFAULT_BASE_URL, DEFAULT_PROFILE, DEFAULT_TIMEOUT_SECS, HttpRoutingService,
    HttpRoutingServiceConfig,
};
use fieldroute_sequencer::RouteSequencer;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{
    ARG_SEQUENCE_OSRM_BASE_URL, ARG_SEQUENCE_OSRM_PROFILE, ARG_SEQUENCE_REQUEST,
    ARG_SEQUENCE_TIMEOUT_SECS, CliError, ENV_SEQUENCE_REQUEST,
};

/// CLI arguments for the `sequence` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "sequence",
    long_about = "Order the stops of a JSON-encoded SequenceRequest starting \
                 from its depot. The OSRM trip service chooses the order when \
                 it can; otherwise stops are visited nearest-first and legs \
                 the route service cannot draw become straight lines.",
    about = "Sequence stops from a depot"
)]
#[ortho_config(prefix = "FIELDROUTE")]
pub(crate) struct SequenceArgs {
    /// Path to a JSON file containing a SequenceRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_SEQUENCE_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// OSRM routing profile, e.g. "driving".
    #[arg(long = ARG_SEQUENCE_OSRM_PROFILE, value_name = "name")]
    #[serde(default)]
    pub(crate) osrm_profile: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long = ARG_SEQUENCE_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl SequenceArgs {
    pub(crate) fn into_config(self) -> Result<SequenceConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SequenceConfig::try_from(merged)
    }
}

/// Resolved `sequence` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SequenceConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Base URL for the OSRM trip and route services.
    pub(crate) osrm_base_url: String,
    /// OSRM routing profile.
    pub(crate) osrm_profile: String,
    /// Per-request timeout.
    pub(crate) timeout: Duration,
}

impl SequenceConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_SEQUENCE_REQUEST)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn service_config(&self) -> HttpRoutingServiceConfig {
        HttpRoutingServiceConfig::new(self.osrm_base_url.clone())
            .with_profile(self.osrm_profile.clone())
            .with_timeout(self.timeout)
    }
}

impl TryFrom<SequenceArgs> for SequenceConfig {
    type Error = CliError;

    fn try_from(args: SequenceArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_SEQUENCE_REQUEST,
            env: ENV_SEQUENCE_REQUEST,
        })?;
        let timeout_secs = args.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(CliError::ZeroTimeout);
        }

        Ok(Self {
            request_path,
            osrm_base_url: args
                .osrm_base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            osrm_profile: args
                .osrm_profile
                .unwrap_or_else(|| DEFAULT_PROFILE.to_owned()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Builds a sequencer for the current invocation.
pub(super) trait SequencerBuilder {
    fn build(
        &self,
        config: &SequenceConfig,
    ) -> Result<RouteSequencer<Box<dyn RoutingService>>, CliError>;
}

pub(super) struct DefaultSequencerBuilder;

impl SequencerBuilder for DefaultSequencerBuilder {
    fn build(
        &self,
        config: &SequenceConfig,
    ) -> Result<RouteSequencer<Box<dyn RoutingService>>, CliError> {
        let service = HttpRoutingService::with_config(config.service_config()).map_err(
            |source| CliError::BuildRoutingService {
                base_url: config.osrm_base_url.clone(),
                source,
            },
        )?;
        let service: Box<dyn RoutingService> = Box::new(service);
        Ok(RouteSequencer::new(service))
    }
}

pub(super) fn run_sequence(args: SequenceArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultSequencerBuilder;
    run_sequence_with(args, &builder, &mut stdout)
}

pub(super) fn run_sequence_with(
    args: SequenceArgs,
    builder: &dyn SequencerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let route = execute_sequence(args, builder)?;
    write_route(writer, &route)
}

fn execute_sequence(
    args: SequenceArgs,
    builder: &dyn SequencerBuilder,
) -> Result<RouteResult, CliError> {
    let config = resolve_sequence_config(args)?;
    let request = load_sequence_request(&config.request_path)?;
    let sequencer = builder.build(&config)?;
    log::info!(
        "sequencing {} stops from {} ({})",
        request.stops.len(),
        config.request_path,
        config.osrm_base_url
    );
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::BuildRuntime)?;
    Ok(runtime.block_on(sequencer.sequence_request(&request)))
}

fn resolve_sequence_config(args: SequenceArgs) -> Result<SequenceConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`SequenceRequest`] from disk.
pub(super) fn load_sequence_request(path: &Utf8Path) -> Result<SequenceRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenSequenceRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseSequenceRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_route(writer: &mut dyn Write, route: &RouteResult) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(route).map_err(CliError::SerialiseRouteResult)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteRouteOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WriteRouteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SequenceConfig, CliError> {
    let merged = SequenceArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SequenceConfig::try_from(merged)
}
