//! Validation of remote trip plans before they are trusted.

use fieldroute_core::{GeoPoint, TripPlan};
use thiserror::Error;

/// Reasons a [`TripPlan`] is rejected in favour of the local fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum TripRejection {
    /// The plan does not cover every requested point exactly once.
    #[error("expected {expected} waypoints, got {actual}")]
    WaypointCount {
        /// Number of points in the request.
        expected: usize,
        /// Number of waypoints in the plan.
        actual: usize,
    },
    /// A visiting position is outside `0..expected`.
    #[error("visiting position {position} is out of range")]
    PositionOutOfRange {
        /// Offending position.
        position: usize,
    },
    /// Two points share a visiting position.
    #[error("visiting position {position} is assigned twice")]
    DuplicatePosition {
        /// Offending position.
        position: usize,
    },
    /// The origin is not visited first.
    #[error("trip does not start at the origin")]
    OriginNotFirst,
    /// The reported distance is negative or not finite.
    #[error("trip distance is not a non-negative number")]
    InvalidDistance,
    /// The geometry is empty or contains non-finite coordinates.
    #[error("trip geometry is empty or malformed")]
    InvalidGeometry,
}

/// Derive the stop visiting order from a plan over `[origin, ...stops]`.
///
/// Returns indices into the stop list (the origin excluded), in visiting
/// order.
pub(crate) fn stop_order(plan: &TripPlan, stop_count: usize) -> Result<Vec<usize>, TripRejection> {
    let expected = stop_count.saturating_add(1);
    if plan.waypoint_order.len() != expected {
        return Err(TripRejection::WaypointCount {
            expected,
            actual: plan.waypoint_order.len(),
        });
    }
    if !plan.distance_meters.is_finite() || plan.distance_meters < 0.0 {
        return Err(TripRejection::InvalidDistance);
    }
    if plan.geometry.is_empty() || !plan.geometry.iter().all(GeoPoint::is_valid) {
        return Err(TripRejection::InvalidGeometry);
    }

    let mut visits: Vec<Option<usize>> = vec![None; expected];
    for (input, &position) in plan.waypoint_order.iter().enumerate() {
        let slot = visits
            .get_mut(position)
            .ok_or(TripRejection::PositionOutOfRange { position })?;
        if slot.replace(input).is_some() {
            return Err(TripRejection::DuplicatePosition { position });
        }
    }

    let mut visiting_order = visits.into_iter();
    if visiting_order.next() != Some(Some(0)) {
        return Err(TripRejection::OriginNotFirst);
    }
    // Every slot is filled: `expected` distinct positions were assigned.
    Ok(visiting_order
        .flatten()
        .filter_map(|input| input.checked_sub(1))
        .collect())
}
