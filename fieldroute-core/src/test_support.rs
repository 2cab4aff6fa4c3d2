//! Deterministic `RoutingService` doubles used by unit, behaviour and property
//! tests across the workspace.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::{GeoPoint, RouteLeg, RoutingError, RoutingService, TripPlan, haversine_km};

/// Service that fails every request with a network error, as if offline.
#[derive(Default, Debug, Copy, Clone)]
pub struct UnavailableRoutingService;

impl UnavailableRoutingService {
    fn offline() -> RoutingError {
        RoutingError::NetworkError {
            url: "http://routing.invalid".to_owned(),
            message: "connection refused".to_owned(),
        }
    }
}

#[async_trait]
impl RoutingService for UnavailableRoutingService {
    async fn trip(&self, _points: &[GeoPoint]) -> Result<TripPlan, RoutingError> {
        Err(Self::offline())
    }

    async fn route(&self, _from: GeoPoint, _to: GeoPoint) -> Result<RouteLeg, RoutingError> {
        Err(Self::offline())
    }
}

#[derive(Debug, Clone)]
enum TripResponse {
    Plan(TripPlan),
    InputOrder { distance_meters: f64 },
    Error(RoutingError),
}

#[derive(Debug, Clone)]
enum LegResponse {
    StraightLine,
    Error(RoutingError),
}

/// Configurable `RoutingService` stub.
///
/// Trip requests return a pre-configured outcome. Leg requests return a
/// two-point straight line whose distance is the haversine distance in meters,
/// unless legs are configured to fail or the destination is marked
/// unroutable. Every call is counted so tests can assert the number of
/// requests made.
///
/// # Example
///
/// ```
/// use fieldroute_core::test_support::StubRoutingService;
///
/// let service = StubRoutingService::straight_lines();
/// assert_eq!(service.trip_calls(), 0);
/// ```
#[derive(Debug)]
pub struct StubRoutingService {
    trip: TripResponse,
    legs: LegResponse,
    unroutable: Vec<GeoPoint>,
    trip_calls: AtomicUsize,
    route_calls: AtomicUsize,
}

impl StubRoutingService {
    fn with_responses(trip: TripResponse, legs: LegResponse) -> Self {
        Self {
            trip,
            legs,
            unroutable: Vec::new(),
            trip_calls: AtomicUsize::new(0),
            route_calls: AtomicUsize::new(0),
        }
    }

    fn no_trips() -> RoutingError {
        RoutingError::ServiceError {
            code: "NoTrips".to_owned(),
            message: "No trip visiting all destinations possible.".to_owned(),
        }
    }

    /// Trips fail; legs are routed as straight lines.
    pub fn straight_lines() -> Self {
        Self::with_responses(TripResponse::Error(Self::no_trips()), LegResponse::StraightLine)
    }

    /// Trips return `plan` regardless of input; legs are straight lines.
    pub fn with_trip(plan: TripPlan) -> Self {
        Self::with_responses(TripResponse::Plan(plan), LegResponse::StraightLine)
    }

    /// Trips visit points in input order along straight lines and report
    /// `distance_meters` as their length.
    pub fn input_order_trips(distance_meters: f64) -> Self {
        Self::with_responses(
            TripResponse::InputOrder { distance_meters },
            LegResponse::StraightLine,
        )
    }

    /// Trips fail with `error`; legs are unaffected.
    #[must_use]
    pub fn with_trip_error(mut self, error: RoutingError) -> Self {
        self.trip = TripResponse::Error(error);
        self
    }

    /// Every leg request fails with `error`.
    #[must_use]
    pub fn with_leg_error(mut self, error: RoutingError) -> Self {
        self.legs = LegResponse::Error(error);
        self
    }

    /// Leg requests ending at `destination` fail.
    #[must_use]
    pub fn with_unroutable_destination(mut self, destination: GeoPoint) -> Self {
        self.unroutable.push(destination);
        self
    }

    /// Number of trip requests received.
    pub fn trip_calls(&self) -> usize {
        self.trip_calls.load(Ordering::SeqCst)
    }

    /// Number of leg requests received.
    pub fn route_calls(&self) -> usize {
        self.route_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoutingService for StubRoutingService {
    async fn trip(&self, points: &[GeoPoint]) -> Result<TripPlan, RoutingError> {
        self.trip_calls.fetch_add(1, Ordering::SeqCst);
        if points.len() < 2 {
            return Err(RoutingError::EmptyInput);
        }
        match &self.trip {
            TripResponse::Plan(plan) => Ok(plan.clone()),
            TripResponse::InputOrder { distance_meters } => Ok(TripPlan {
                waypoint_order: (0..points.len()).collect(),
                distance_meters: *distance_meters,
                geometry: points.to_vec(),
            }),
            TripResponse::Error(error) => Err(error.clone()),
        }
    }

    async fn route(&self, from: GeoPoint, to: GeoPoint) -> Result<RouteLeg, RoutingError> {
        self.route_calls.fetch_add(1, Ordering::SeqCst);
        if self.unroutable.contains(&to) {
            return Err(Self::no_route());
        }
        match &self.legs {
            LegResponse::StraightLine => Ok(RouteLeg {
                distance_meters: haversine_km(from, to) * 1000.0,
                geometry: vec![from, to],
            }),
            LegResponse::Error(error) => Err(error.clone()),
        }
    }
}

impl StubRoutingService {
    fn no_route() -> RoutingError {
        RoutingError::ServiceError {
            code: "NoRoute".to_owned(),
            message: "Impossible route between points".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn two_points() -> [GeoPoint; 2] {
        [GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)]
    }

    #[rstest]
    #[tokio::test]
    async fn straight_lines_fail_trips_and_route_legs() {
        let service = StubRoutingService::straight_lines();
        let [from, to] = two_points();

        let trip = service.trip(&[from, to]).await;
        let leg = service.route(from, to).await.expect("leg should route");

        assert!(matches!(trip, Err(RoutingError::ServiceError { .. })));
        assert_eq!(leg.geometry, vec![from, to]);
        assert!((leg.distance_meters - haversine_km(from, to) * 1000.0).abs() < 1.0e-9);
        assert_eq!(service.trip_calls(), 1);
        assert_eq!(service.route_calls(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn input_order_trips_follow_the_request() {
        let service = StubRoutingService::input_order_trips(2500.0);
        let points = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 1.0),
        ];

        let plan = service.trip(&points).await.expect("trip should succeed");

        assert_eq!(plan.waypoint_order, vec![0, 1, 2]);
        assert_eq!(plan.geometry, points.to_vec());
        assert_eq!(plan.distance_meters, 2500.0);
    }

    #[rstest]
    #[tokio::test]
    async fn unroutable_destination_fails_only_that_leg() {
        let [from, to] = two_points();
        let service = StubRoutingService::straight_lines().with_unroutable_destination(to);

        assert!(service.route(from, to).await.is_err());
        assert!(service.route(to, from).await.is_ok());
        assert_eq!(service.route_calls(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn leg_error_applies_to_every_leg() {
        let [from, to] = two_points();
        let service = StubRoutingService::straight_lines()
            .with_leg_error(RoutingError::ParseError {
                message: "truncated body".to_owned(),
            });

        let err = service.route(from, to).await.expect_err("leg should fail");

        assert!(matches!(err, RoutingError::ParseError { .. }));
    }
}
