//! Facade crate for the fieldroute stop sequencer.
//!
//! This crate re-exports the core domain types and exposes the sequencer and
//! the OSRM-backed routing service behind feature flags.
//!
//! ```no_run
//! use fieldroute::{GeoPoint, HttpRoutingService, RouteSequencer, Stop};
//!
//! let service = HttpRoutingService::new("http://localhost:5000")?;
//! let sequencer = RouteSequencer::new(service);
//! let stops = vec![Stop::at("lead-1", GeoPoint::new(52.51, 13.39))];
//! let future = sequencer.sequence(GeoPoint::new(52.52, 13.405), &stops, None);
//! # drop(future);
//! # Ok::<(), fieldroute::ProviderBuildError>(())
//! ```

#![forbid(unsafe_code)]

pub use fieldroute_core::{
    EARTH_RADIUS_KM, GeoPoint, OrderingStrategy, RouteDiagnostics, RouteLeg, RouteResult,
    RoutingError, RoutingService, SequenceRequest, Stop, StopId, TripPlan, haversine_km,
    meters_to_km, path_length_km,
};

#[cfg(feature = "test-support")]
pub use fieldroute_core::test_support;

#[cfg(feature = "sequencer")]
pub use fieldroute_sequencer::{RouteSequencer, SequencerConfig, nearest_neighbour_order};

#[cfg(feature = "osrm")]
pub use fieldroute_osrm::{HttpRoutingService, HttpRoutingServiceConfig, ProviderBuildError};
