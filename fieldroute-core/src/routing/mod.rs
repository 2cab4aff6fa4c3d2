//! Remote road routing.
//!
//! The [`RoutingService`] trait abstracts the two calls the sequencer needs:
//! a multi-stop trip that picks a visiting order, and a point-to-point route
//! for a single leg. Both report failures as [`RoutingError`]; the sequencer
//! collapses any error into its local fallback.

mod error;
mod service;

pub use error::RoutingError;
pub use service::{RouteLeg, RoutingService, TripPlan};
