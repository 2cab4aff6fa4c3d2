//! Core domain types for the fieldroute sequencing engine.
//!
//! Responsibilities:
//! - Model depots, stops and sequenced routes.
//! - Provide the great-circle distance primitive.
//! - Define the [`RoutingService`] seam implemented by HTTP adapters and test
//!   doubles.
//!
//! Invariants:
//! - No global mutable state; every value is transient and owned by its caller.
//! - Coordinates are latitude-first; longitude-first pairs only appear at the
//!   routing-service boundary.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod distance;
mod point;
mod request;
mod route;
pub mod routing;
mod stop;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use distance::{EARTH_RADIUS_KM, haversine_km, meters_to_km, path_length_km};
pub use point::GeoPoint;
pub use request::SequenceRequest;
pub use route::{OrderingStrategy, RouteDiagnostics, RouteResult};
pub use routing::{RouteLeg, RoutingError, RoutingService, TripPlan};
pub use stop::{Stop, StopId};
