//! Test helpers for staging sequence requests on disk.

use camino::{Utf8Path, Utf8PathBuf};
use fieldroute_core::RoutingService;
use fieldroute_core::test_support::StubRoutingService;
use fieldroute_sequencer::RouteSequencer;
use tempfile::TempDir;

use crate::CliError;
use crate::sequence::{SequenceConfig, SequencerBuilder};

/// A small request: two stops east of a depot on the equator, listed
/// farthest first.
pub(super) const SAMPLE_REQUEST: &str = r#"{
    "depot": { "latitude": 0.0, "longitude": 0.0 },
    "stops": [
        { "id": "far", "location": { "latitude": 0.0, "longitude": 2.0 } },
        { "id": "near", "location": { "latitude": 0.0, "longitude": 1.0 },
          "metadata": { "contact": "Ada" } }
    ]
}"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

/// Temporary directory with a UTF-8 root path; keep the `TempDir` alive.
pub(super) fn temp_root() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Builds sequencers over a straight-line stub instead of OSRM.
#[derive(Debug, Default)]
pub(super) struct StubSequencerBuilder;

impl SequencerBuilder for StubSequencerBuilder {
    fn build(
        &self,
        _config: &SequenceConfig,
    ) -> Result<RouteSequencer<Box<dyn RoutingService>>, CliError> {
        let service: Box<dyn RoutingService> = Box::new(StubRoutingService::straight_lines());
        Ok(RouteSequencer::new(service))
    }
}
