//! Greedy nearest-neighbour ordering used when no trip service answers.

use fieldroute_core::{GeoPoint, Stop, haversine_km};

/// Order `stops` by repeatedly moving to the closest unvisited stop.
///
/// Starts at `origin` and returns a permutation of the indices of `stops`.
/// Distances are haversine kilometres. Among equally distant candidates the
/// one earliest in `stops` wins, so the result is deterministic.
///
/// # Examples
/// ```
/// use fieldroute_core::{GeoPoint, Stop};
/// use fieldroute_sequencer::nearest_neighbour_order;
///
/// let stops = vec![
///     Stop::at("far", GeoPoint::new(0.0, 3.0)),
///     Stop::at("near", GeoPoint::new(0.0, 1.0)),
/// ];
/// assert_eq!(nearest_neighbour_order(GeoPoint::new(0.0, 0.0), &stops), vec![1, 0]);
/// ```
#[must_use]
pub fn nearest_neighbour_order(origin: GeoPoint, stops: &[Stop]) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..stops.len()).collect();
    let mut order = Vec::with_capacity(stops.len());
    let mut current = origin;

    while let Some(position) = closest(current, &remaining, stops) {
        let index = remaining.remove(position);
        if let Some(stop) = stops.get(index) {
            current = stop.location;
        }
        order.push(index);
    }

    order
}

/// Position within `remaining` of the stop closest to `from`.
///
/// `remaining` stays in input order, and only a strictly smaller distance
/// replaces the current best.
fn closest(from: GeoPoint, remaining: &[usize], stops: &[Stop]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (position, &index) in remaining.iter().enumerate() {
        let Some(stop) = stops.get(index) else {
            continue;
        };
        let distance = haversine_km(from, stop.location);
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((position, distance));
        }
    }
    best.map(|(position, _)| position)
}
