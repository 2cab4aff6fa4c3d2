use crate::{GeoPoint, Stop, StopId};

/// Parameters for a sequencing request.
///
/// The request captures the depot (the representative's current position),
/// the stops to visit and an optional stop that must come first.
///
/// # Examples
/// ```rust
/// use fieldroute_core::{GeoPoint, SequenceRequest, Stop};
///
/// let request = SequenceRequest {
///     depot: GeoPoint::new(52.52, 13.405),
///     stops: vec![Stop::at("lead-1", GeoPoint::new(52.51, 13.39))],
///     pinned_stop_id: None,
/// };
/// assert_eq!(request.valid_stops().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceRequest {
    /// Fixed start of the route.
    pub depot: GeoPoint,
    /// Stops to visit, in caller order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stops: Vec<Stop>,
    /// Stop to visit immediately after the depot.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pinned_stop_id: Option<StopId>,
}

impl SequenceRequest {
    /// Stops whose coordinates are finite, in caller order.
    pub fn valid_stops(&self) -> impl Iterator<Item = &Stop> + '_ {
        self.stops.iter().filter(|stop| stop.location.is_valid())
    }
}
