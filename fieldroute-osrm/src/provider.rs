//! HTTP-based `RoutingService` using OSRM's Trip and Route APIs.
//!
//! # Example
//!
//! ```no_run
//! use fieldroute_core::{GeoPoint, RoutingService};
//! use fieldroute_osrm::HttpRoutingService;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let service = HttpRoutingService::new("http://localhost:5000")?;
//! let leg = service
//!     .route(GeoPoint::new(52.52, 13.405), GeoPoint::new(52.51, 13.39))
//!     .await?;
//! println!("{} m", leg.distance_meters);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use fieldroute_core::{GeoPoint, RouteLeg, RoutingError, RoutingService, TripPlan};
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use super::osrm::{LineGeometry, OsrmRoute, RouteResponse, TripResponse, TripWaypoint};

/// Error type for [`HttpRoutingService`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// The configured base URL does not parse.
    #[error("invalid routing base URL {base_url:?}: {source}")]
    InvalidBaseUrl {
        base_url: String,
        #[source]
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "fieldroute/0.1";

/// Default OSRM routing profile.
pub const DEFAULT_PROFILE: &str = "driving";

/// Default base URL for a locally hosted OSRM instance.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default request timeout in seconds.
///
/// Kept short so a stalled service degrades to the local fallback quickly.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Configuration for [`HttpRoutingService`].
#[derive(Debug, Clone)]
pub struct HttpRoutingServiceConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// OSRM profile segment of the request path (e.g., `"driving"`).
    pub profile: String,
    /// Connect and request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpRoutingServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            profile: DEFAULT_PROFILE.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpRoutingServiceConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Routing service backed by an OSRM HTTP endpoint.
///
/// Each call issues exactly one request; there is no retry. Every failure,
/// from transport errors through non-`Ok` codes to malformed fields, comes
/// back as a [`RoutingError`].
#[derive(Debug, Clone)]
pub struct HttpRoutingService {
    client: Client,
    config: HttpRoutingServiceConfig,
}

impl HttpRoutingService {
    /// Create a new service with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails to
    /// build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpRoutingServiceConfig::new(base_url))
    }

    /// Create a new service with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails to
    /// build.
    pub fn with_config(config: HttpRoutingServiceConfig) -> Result<Self, ProviderBuildError> {
        Url::parse(&config.base_url).map_err(|source| ProviderBuildError::InvalidBaseUrl {
            base_url: config.base_url.clone(),
            source,
        })?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self { client, config })
    }

    /// The configuration this service was built with.
    pub fn config(&self) -> &HttpRoutingServiceConfig {
        &self.config
    }

    /// Format points as OSRM's semicolon-separated `lon,lat` list.
    fn coordinate_list(points: &[GeoPoint]) -> String {
        points
            .iter()
            .map(|point| format!("{},{}", point.longitude, point.latitude))
            .collect::<Vec<_>>()
            .join(";")
    }

    fn service_url(&self, service: &str, points: &[GeoPoint], query: &str) -> String {
        format!(
            "{}/{service}/v1/{}/{}?{query}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            Self::coordinate_list(points),
        )
    }

    /// Build the OSRM Trip API URL for an open trip starting at `points[0]`.
    fn build_trip_url(&self, points: &[GeoPoint]) -> String {
        self.service_url(
            "trip",
            points,
            "source=first&destination=any&roundtrip=false&geometries=geojson&overview=full",
        )
    }

    /// Build the OSRM Route API URL for a single leg.
    fn build_route_url(&self, from: GeoPoint, to: GeoPoint) -> String {
        self.service_url("route", &[from, to], "geometries=geojson&overview=full")
    }

    /// Fetch and decode a JSON body.
    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, RoutingError> {
        log::debug!("requesting {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))?;

        response.json().await.map_err(|err| {
            if err.is_timeout() {
                self.convert_reqwest_error(&err, url)
            } else {
                RoutingError::ParseError {
                    message: err.to_string(),
                }
            }
        })
    }

    /// Convert a reqwest error to a `RoutingError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> RoutingError {
        if error.is_timeout() {
            return RoutingError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return RoutingError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        RoutingError::NetworkError {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

fn invalid(message: impl Into<String>) -> RoutingError {
    RoutingError::InvalidResponse {
        message: message.into(),
    }
}

/// Convert an OSRM trip response for `point_count` inputs into a `TripPlan`.
pub(crate) fn convert_trip(
    response: TripResponse,
    point_count: usize,
) -> Result<TripPlan, RoutingError> {
    if !response.is_ok() {
        return Err(RoutingError::ServiceError {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let waypoints = response
        .waypoints
        .ok_or_else(|| invalid("OSRM trip response missing waypoints"))?;
    if waypoints.len() != point_count {
        return Err(invalid(format!(
            "expected {point_count} waypoints, got {}",
            waypoints.len()
        )));
    }
    let waypoint_order = waypoints
        .iter()
        .map(|waypoint| convert_waypoint(waypoint, point_count))
        .collect::<Result<Vec<_>, _>>()?;

    let mut trips = response
        .trips
        .ok_or_else(|| invalid("OSRM trip response missing trips"))?;
    if trips.len() != 1 {
        return Err(invalid(format!("expected a single trip, got {}", trips.len())));
    }
    let trip = trips
        .pop()
        .ok_or_else(|| invalid("OSRM trip response missing trips"))?;
    let (distance_meters, geometry) = convert_route_object(trip)?;

    Ok(TripPlan {
        waypoint_order,
        distance_meters,
        geometry,
    })
}

fn convert_waypoint(waypoint: &TripWaypoint, point_count: usize) -> Result<usize, RoutingError> {
    if waypoint.trips_index.is_some_and(|trip| trip != 0) {
        return Err(invalid("waypoint assigned to a secondary trip"));
    }
    match waypoint.waypoint_index {
        Some(index) if index < point_count => Ok(index),
        Some(index) => Err(invalid(format!(
            "waypoint index {index} out of range for {point_count} points"
        ))),
        None => Err(invalid("waypoint missing waypoint_index")),
    }
}

/// Convert an OSRM route response into the first `RouteLeg`.
pub(crate) fn convert_route(response: RouteResponse) -> Result<RouteLeg, RoutingError> {
    if !response.is_ok() {
        return Err(RoutingError::ServiceError {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let route = response
        .routes
        .and_then(|routes| routes.into_iter().next())
        .ok_or_else(|| invalid("OSRM route response has no routes"))?;
    let (distance_meters, geometry) = convert_route_object(route)?;

    Ok(RouteLeg {
        distance_meters,
        geometry,
    })
}

fn convert_route_object(route: OsrmRoute) -> Result<(f64, Vec<GeoPoint>), RoutingError> {
    let distance = route
        .distance
        .filter(|meters| meters.is_finite() && *meters >= 0.0)
        .ok_or_else(|| invalid("route distance missing or not a non-negative number"))?;
    let geometry = convert_geometry(route.geometry)?;
    Ok((distance, geometry))
}

/// Swap GeoJSON `[lon, lat]` pairs into latitude-first points.
fn convert_geometry(geometry: Option<LineGeometry>) -> Result<Vec<GeoPoint>, RoutingError> {
    let line = geometry.ok_or_else(|| invalid("route geometry missing"))?;
    if line.coordinates.is_empty() {
        return Err(invalid("route geometry is empty"));
    }
    let points: Vec<GeoPoint> = line
        .coordinates
        .into_iter()
        .map(GeoPoint::from_lon_lat)
        .collect();
    if points.iter().any(|point| !point.is_valid()) {
        return Err(invalid("route geometry contains non-finite coordinates"));
    }
    Ok(points)
}

#[async_trait]
impl RoutingService for HttpRoutingService {
    async fn trip(&self, points: &[GeoPoint]) -> Result<TripPlan, RoutingError> {
        if points.len() < 2 {
            return Err(RoutingError::EmptyInput);
        }
        let url = self.build_trip_url(points);
        let response: TripResponse = self.fetch(&url).await?;
        convert_trip(response, points.len())
    }

    async fn route(&self, from: GeoPoint, to: GeoPoint) -> Result<RouteLeg, RoutingError> {
        let url = self.build_route_url(from, to);
        let response: RouteResponse = self.fetch(&url).await?;
        convert_route(response)
    }
}
