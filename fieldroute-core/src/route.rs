//! Sequenced routes through stops.
//!
//! Aggregates the visiting order, the renderable path and the total distance.

use geo::{Coord, LineString};

use crate::{GeoPoint, Stop};

/// How the visiting order of a [`RouteResult`] was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OrderingStrategy {
    /// Nothing to order: no valid stops, or an invalid depot.
    #[default]
    Trivial,
    /// The remote trip service chose the order.
    RemoteTrip,
    /// The greedy nearest-neighbour heuristic chose the order.
    NearestNeighbour,
}

/// Deterministic facts about how a route was assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteDiagnostics {
    /// Strategy that ordered the stops after the depot (or after the pinned
    /// stop, when one was set).
    pub ordering: OrderingStrategy,
    /// Number of legs drawn as straight lines because the route service gave
    /// no usable answer.
    pub straight_line_legs: usize,
}

/// An ordered visit sequence with its path and total distance.
///
/// `path` starts at the depot; the depot itself is not part of
/// `ordered_stops`.
///
/// # Examples
/// ```
/// use fieldroute_core::{GeoPoint, RouteResult};
///
/// let depot = GeoPoint::new(52.5, 13.4);
/// let route = RouteResult::at_depot(depot);
///
/// assert!(route.ordered_stops.is_empty());
/// assert_eq!(route.path, vec![depot]);
/// assert_eq!(route.total_distance_km, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteResult {
    /// Stops in visiting order.
    pub ordered_stops: Vec<Stop>,
    /// Polyline from the depot through every stop.
    pub path: Vec<GeoPoint>,
    /// Length of `path` in kilometres.
    pub total_distance_km: f64,
    /// How the route was built.
    #[cfg_attr(feature = "serde", serde(default))]
    pub diagnostics: RouteDiagnostics,
}

impl RouteResult {
    /// Construct a route from its parts.
    pub fn new(
        ordered_stops: Vec<Stop>,
        path: Vec<GeoPoint>,
        total_distance_km: f64,
        diagnostics: RouteDiagnostics,
    ) -> Self {
        Self {
            ordered_stops,
            path,
            total_distance_km,
            diagnostics,
        }
    }

    /// The result returned for an invalid depot: no stops, no path.
    ///
    /// # Examples
    /// ```
    /// use fieldroute_core::RouteResult;
    ///
    /// let route = RouteResult::empty();
    /// assert!(route.path.is_empty());
    /// assert_eq!(route.total_distance_km, 0.0);
    /// ```
    pub fn empty() -> Self {
        Self::default()
    }

    /// The result for a valid depot with nothing to visit.
    pub fn at_depot(depot: GeoPoint) -> Self {
        Self {
            path: vec![depot],
            ..Self::default()
        }
    }

    /// Identifiers of the ordered stops.
    pub fn stop_ids(&self) -> impl Iterator<Item = &crate::StopId> + '_ {
        self.ordered_stops.iter().map(|stop| &stop.id)
    }

    /// Render the path as a `geo` line string (x = longitude, y = latitude).
    ///
    /// # Examples
    /// ```
    /// use fieldroute_core::{GeoPoint, RouteResult};
    ///
    /// let route = RouteResult::at_depot(GeoPoint::new(1.0, 2.0));
    /// let line = route.to_line_string();
    /// assert_eq!(line.0.len(), 1);
    /// assert_eq!(line.0[0].x, 2.0);
    /// ```
    pub fn to_line_string(&self) -> LineString<f64> {
        self.path.iter().copied().map(Coord::from).collect()
    }
}
