//! Great-circle distances between [`GeoPoint`]s.
//!
//! Distances use the haversine formula on a sphere of radius
//! [`EARTH_RADIUS_KM`]. These values back the nearest-neighbour heuristic and
//! every straight-line leg emitted when a routing service gives no answer.

use crate::GeoPoint;

/// Mean Earth radius used for all haversine calculations.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Meters per kilometre; routing services report distances in meters.
pub const METERS_PER_KM: f64 = 1000.0;

/// Great-circle distance between two points in kilometres.
///
/// # Examples
/// ```
/// use fieldroute_core::{GeoPoint, haversine_km};
///
/// let equator = GeoPoint::new(0.0, 0.0);
/// let one_degree_east = GeoPoint::new(0.0, 1.0);
/// let km = haversine_km(equator, one_degree_east);
/// assert!((km - 111.19).abs() < 0.01);
/// ```
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat_from = from.latitude.to_radians();
    let lat_to = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    // Rounding can push `a` just past 1 for antipodal points.
    let a = ((d_lat / 2.0).sin().powi(2)
        + lat_from.cos() * lat_to.cos() * (d_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Sum of haversine distances between consecutive points of `path`.
///
/// Empty and single-point paths have zero length.
pub fn path_length_km(path: &[GeoPoint]) -> f64 {
    path.windows(2)
        .map(|pair| match pair {
            [from, to] => haversine_km(*from, *to),
            _ => 0.0,
        })
        .sum()
}

/// Convert a service-reported distance in meters to kilometres.
pub fn meters_to_km(meters: f64) -> f64 {
    meters / METERS_PER_KM
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TOLERANCE_KM: f64 = 1.0e-6;

    #[rstest]
    fn identical_points_are_zero_apart() {
        let point = GeoPoint::new(48.137, 11.575);
        assert_eq!(haversine_km(point, point), 0.0);
    }

    #[rstest]
    fn distance_is_symmetric() {
        let berlin = GeoPoint::new(52.52, 13.405);
        let munich = GeoPoint::new(48.137, 11.575);
        let there = haversine_km(berlin, munich);
        let back = haversine_km(munich, berlin);
        assert!((there - back).abs() < TOLERANCE_KM);
        // Published great-circle distance is roughly 504 km.
        assert!((there - 504.0).abs() < 2.0, "unexpected distance {there}");
    }

    #[rstest]
    fn quarter_meridian_matches_radius() {
        let equator = GeoPoint::new(0.0, 0.0);
        let pole = GeoPoint::new(90.0, 0.0);
        let expected = EARTH_RADIUS_KM * std::f64::consts::FRAC_PI_2;
        assert!((haversine_km(equator, pole) - expected).abs() < TOLERANCE_KM);
    }

    #[rstest]
    #[case::mid_latitudes(GeoPoint::new(-44.9, 0.0), GeoPoint::new(44.9, 180.0))]
    #[case::equator(GeoPoint::new(0.0, -90.0), GeoPoint::new(0.0, 90.0))]
    #[case::poles(GeoPoint::new(90.0, 0.0), GeoPoint::new(-90.0, 0.0))]
    fn antipodal_points_are_half_a_circumference_apart(
        #[case] from: GeoPoint,
        #[case] to: GeoPoint,
    ) {
        let km = haversine_km(from, to);
        let half_circumference = EARTH_RADIUS_KM * std::f64::consts::PI;
        assert!(km.is_finite(), "distance is {km}");
        assert!((km - half_circumference).abs() < 1.0e-3, "unexpected distance {km}");
    }

    #[rstest]
    fn nearly_antipodal_sweep_stays_finite() {
        for tenth in -450_i32..=450 {
            let latitude = f64::from(tenth) / 10.0;
            let km = haversine_km(GeoPoint::new(-latitude, 0.0), GeoPoint::new(latitude, 180.0));
            assert!(km.is_finite() && km >= 0.0, "latitude {latitude} gave {km}");
        }
    }

    #[rstest]
    #[case::empty(&[])]
    #[case::single(&[GeoPoint::new(1.0, 1.0)])]
    fn short_paths_have_zero_length(#[case] path: &[GeoPoint]) {
        assert_eq!(path_length_km(path), 0.0);
    }

    #[rstest]
    fn path_length_sums_segments() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 1.0);
        let c = GeoPoint::new(1.0, 1.0);
        let expected = haversine_km(a, b) + haversine_km(b, c);
        assert!((path_length_km(&[a, b, c]) - expected).abs() < TOLERANCE_KM);
    }

    #[rstest]
    fn meters_convert_to_kilometres() {
        assert_eq!(meters_to_km(12_345.0), 12.345);
    }
}
