//! OSRM-backed routing for the fieldroute sequencer.
//!
//! This crate provides [`HttpRoutingService`], an implementation of
//! [`fieldroute_core::RoutingService`] that talks to an OSRM instance.
//!
//! # Architecture
//!
//! Two OSRM services are used:
//! - the Trip API orders the depot and all stops into an open path that starts
//!   at the depot and ends anywhere;
//! - the Route API draws one leg between two points.
//!
//! Coordinates cross the HTTP boundary longitude-first and are swapped back to
//! latitude-first [`GeoPoint`](fieldroute_core::GeoPoint)s on the way in.
//! Every response field is validated; anything missing or out of range is a
//! [`RoutingError::InvalidResponse`](fieldroute_core::RoutingError::InvalidResponse).
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use fieldroute_osrm::{HttpRoutingService, HttpRoutingServiceConfig};
//!
//! let config = HttpRoutingServiceConfig::new("http://localhost:5000")
//!     .with_profile("driving")
//!     .with_timeout(Duration::from_secs(3))
//!     .with_user_agent("my-crm/1.0");
//! let service = HttpRoutingService::with_config(config)?;
//! # let _ = service;
//! # Ok::<(), fieldroute_osrm::ProviderBuildError>(())
//! ```

#![forbid(unsafe_code)]

mod osrm;
mod provider;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_PROFILE, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    HttpRoutingService, HttpRoutingServiceConfig, ProviderBuildError,
};
