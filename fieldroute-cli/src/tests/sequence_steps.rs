//! Behaviour-driven step definitions driving the sequence CLI scenarios.

use std::cell::RefCell;

use camino::Utf8PathBuf;
use clap::Parser;
use fieldroute_core::{RouteResult, StopId};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

use super::helpers::{SAMPLE_REQUEST, StubSequencerBuilder, temp_root, write_utf8};
use super::*;
use crate::sequence::run_sequence_with;

#[derive(Debug)]
struct SequenceWorld {
    _tmp: TempDir,
    request_path: Utf8PathBuf,
    include_request: RefCell<bool>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl SequenceWorld {
    fn new() -> Self {
        let (tmp, root) = temp_root();
        let request_path = root.join("request.json");

        Self {
            _tmp: tmp,
            request_path,
            include_request: RefCell::new(true),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["fieldroute".to_owned(), "sequence".to_owned()];
        if *self.include_request.borrow() {
            argv.push(self.request_path.as_str().to_owned());
        }
        argv
    }

    fn route(&self) -> RouteResult {
        let stdout = String::from_utf8(self.stdout.borrow().clone()).expect("stdout utf-8");
        serde_json::from_str(&stdout).expect("output should be a JSON route")
    }

    fn first_stop(&self) -> Option<StopId> {
        self.route()
            .ordered_stops
            .first()
            .map(|stop| stop.id.clone())
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }
}

#[fixture]
fn world() -> SequenceWorld {
    SequenceWorld::new()
}

#[given("a valid sequence request exists on disk")]
fn valid_request_exists(#[from(world)] world: &SequenceWorld) {
    write_utf8(&world.request_path, SAMPLE_REQUEST.as_bytes());
}

#[given("a sequence request pinning the farther stop exists on disk")]
fn pinned_request_exists(#[from(world)] world: &SequenceWorld) {
    let mut request: serde_json::Value =
        serde_json::from_str(SAMPLE_REQUEST).expect("sample request is JSON");
    request["pinned_stop_id"] = serde_json::Value::from("far");
    let payload = serde_json::to_vec_pretty(&request).expect("serialize request");
    write_utf8(&world.request_path, &payload);
}

#[given("the sequence request contains invalid JSON")]
fn request_contains_invalid_json(#[from(world)] world: &SequenceWorld) {
    write_utf8(&world.request_path, b"{ not valid json");
}

#[given("I omit the sequence request path")]
fn omit_request_path(#[from(world)] world: &SequenceWorld) {
    *world.include_request.borrow_mut() = false;
}

#[given("the sequence request path is a directory")]
fn request_path_is_directory(#[from(world)] world: &SequenceWorld) {
    std::fs::create_dir(world.request_path.as_std_path()).expect("request directory");
}

#[when("I run the sequence command")]
fn run_sequence_command(#[from(world)] world: &SequenceWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| {
        let Command::Sequence(args) = cli.command;
        let mut buffer = world.stdout.borrow_mut();
        run_sequence_with(args, &StubSequencerBuilder, &mut *buffer)
    });

    world.result.replace(Some(outcome));
}

#[then("the command succeeds and prints the route as JSON")]
fn command_succeeds(#[from(world)] world: &SequenceWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    if let Err(err) = result {
        panic!("expected success, found {err:?}");
    }
    assert_eq!(world.route().ordered_stops.len(), 2);
}

#[then("the nearer stop is visited first")]
fn nearer_first(#[from(world)] world: &SequenceWorld) {
    assert_eq!(world.first_stop(), Some(StopId::from("near")));
}

#[then("the farther stop is visited first")]
fn farther_first(#[from(world)] world: &SequenceWorld) {
    assert_eq!(world.first_stop(), Some(StopId::from("far")));
}

#[then("the command fails because the request JSON is invalid")]
fn command_fails_invalid_json(#[from(world)] world: &SequenceWorld) {
    match &*world.error() {
        CliError::ParseSequenceRequest { path, .. } => assert_eq!(*path, world.request_path),
        other => panic!("expected ParseSequenceRequest, found {other:?}"),
    }
}

#[then("the command fails because the request path is missing")]
fn command_fails_missing_request_path(#[from(world)] world: &SequenceWorld) {
    match &*world.error() {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_SEQUENCE_REQUEST),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[then("the command fails because the request path is not a file")]
fn command_fails_not_file(#[from(world)] world: &SequenceWorld) {
    match &*world.error() {
        CliError::SourcePathNotFile { field, .. } => assert_eq!(*field, ARG_SEQUENCE_REQUEST),
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

macro_rules! register_sequence_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/sequence_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: SequenceWorld) {
            let _ = world;
        }
    };
}

register_sequence_scenario!(sequence_happy_path, "sequencing a request from JSON");
register_sequence_scenario!(sequence_pinned_stop, "honouring a pinned stop from JSON");
register_sequence_scenario!(sequence_invalid_json, "rejecting invalid JSON input");
register_sequence_scenario!(sequence_missing_request, "rejecting missing request paths");
register_sequence_scenario!(
    sequence_directory_request,
    "rejecting a request path that is a directory"
);
