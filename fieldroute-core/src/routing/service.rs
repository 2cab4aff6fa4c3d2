//! Routing-service trait and the payloads it returns.

use async_trait::async_trait;

use crate::GeoPoint;

use super::error::RoutingError;

/// An open trip through a list of points, as ordered by a routing service.
///
/// `waypoint_order[i]` is the visiting position of the `i`-th input point.
/// Distances are in meters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TripPlan {
    /// Visiting position per input point.
    pub waypoint_order: Vec<usize>,
    /// Total trip length in meters.
    pub distance_meters: f64,
    /// Trip geometry from the first to the last visited point.
    pub geometry: Vec<GeoPoint>,
}

/// A routed path between exactly two points. Distances are in meters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteLeg {
    /// Leg length in meters.
    pub distance_meters: f64,
    /// Leg geometry, normally starting near `from` and ending near `to`.
    pub geometry: Vec<GeoPoint>,
}

/// Remote road routing used to order stops and draw paths.
///
/// Implementations make exactly one attempt per call and never retry; callers
/// decide what a failure means.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use fieldroute_core::{GeoPoint, RouteLeg, RoutingError, RoutingService, TripPlan};
///
/// struct Offline;
///
/// #[async_trait]
/// impl RoutingService for Offline {
///     async fn trip(&self, _points: &[GeoPoint]) -> Result<TripPlan, RoutingError> {
///         Err(RoutingError::NetworkError {
///             url: "offline".into(),
///             message: "no network".into(),
///         })
///     }
///
///     async fn route(&self, from: GeoPoint, to: GeoPoint) -> Result<RouteLeg, RoutingError> {
///         Ok(RouteLeg { distance_meters: 0.0, geometry: vec![from, to] })
///     }
/// }
///
/// let service: Box<dyn RoutingService> = Box::new(Offline);
/// # let _ = service;
/// ```
#[async_trait]
pub trait RoutingService: Send + Sync {
    /// Order `points` into an open trip that starts at `points[0]` and ends
    /// wherever the service finds cheapest.
    async fn trip(&self, points: &[GeoPoint]) -> Result<TripPlan, RoutingError>;

    /// Route between two points.
    async fn route(&self, from: GeoPoint, to: GeoPoint) -> Result<RouteLeg, RoutingError>;
}

#[async_trait]
impl<S> RoutingService for Box<S>
where
    S: RoutingService + ?Sized,
{
    async fn trip(&self, points: &[GeoPoint]) -> Result<TripPlan, RoutingError> {
        (**self).trip(points).await
    }

    async fn route(&self, from: GeoPoint, to: GeoPoint) -> Result<RouteLeg, RoutingError> {
        (**self).route(from, to).await
    }
}
