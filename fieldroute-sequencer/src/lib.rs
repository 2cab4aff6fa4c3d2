//! Stop sequencing for field representatives.
//!
//! This crate provides [`RouteSequencer`], which orders a list of stops from a
//! depot and builds the path through them on top of any
//! [`RoutingService`](fieldroute_core::RoutingService).
//!
//! The remote trip service is asked once for the whole order. When it fails,
//! or answers with something that does not describe a valid open trip, the
//! stops are ordered by [`nearest_neighbour_order`] and every leg is routed on
//! its own. Legs the service cannot route become straight lines, so a result
//! is always returned.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod assemble;
mod heuristic;
mod sequencer;
mod trip;

pub use heuristic::nearest_neighbour_order;
pub use sequencer::{RouteSequencer, SequencerConfig};
