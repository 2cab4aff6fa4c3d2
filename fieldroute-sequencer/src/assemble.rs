//! Incremental construction of a route path from routed or straight legs.

use fieldroute_core::{GeoPoint, RouteLeg, haversine_km, meters_to_km};

/// Accumulates path points, distance and fallback counts leg by leg.
#[derive(Debug, Clone)]
pub(crate) struct PathAssembler {
    path: Vec<GeoPoint>,
    distance_km: f64,
    straight_line_legs: usize,
}

/// Finished output of a [`PathAssembler`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AssembledPath {
    pub(crate) path: Vec<GeoPoint>,
    pub(crate) distance_km: f64,
    pub(crate) straight_line_legs: usize,
}

impl PathAssembler {
    pub(crate) fn starting_at(origin: GeoPoint) -> Self {
        Self {
            path: vec![origin],
            distance_km: 0.0,
            straight_line_legs: 0,
        }
    }

    /// Extend the path to `to`.
    ///
    /// A usable routed leg contributes its geometry minus the first point and
    /// its own distance. Anything else becomes a straight line from the
    /// current end of the path.
    #[expect(
        clippy::float_arithmetic,
        reason = "path distance is a running sum of leg distances"
    )]
    pub(crate) fn push_leg(&mut self, to: GeoPoint, leg: Option<RouteLeg>) {
        match leg.filter(is_usable) {
            Some(routed) => {
                self.path.extend(routed.geometry.into_iter().skip(1));
                self.distance_km += meters_to_km(routed.distance_meters);
            }
            None => {
                if let Some(&from) = self.path.last() {
                    self.distance_km += haversine_km(from, to);
                }
                self.path.push(to);
                self.straight_line_legs = self.straight_line_legs.saturating_add(1);
            }
        }
    }

    /// Append a path that begins where this one ends.
    #[expect(
        clippy::float_arithmetic,
        reason = "joined distance is the sum of both parts"
    )]
    pub(crate) fn append(&mut self, other: AssembledPath) {
        self.path.extend(other.path.into_iter().skip(1));
        self.distance_km += other.distance_km;
        self.straight_line_legs = self
            .straight_line_legs
            .saturating_add(other.straight_line_legs);
    }

    pub(crate) fn finish(self) -> AssembledPath {
        AssembledPath {
            path: self.path,
            distance_km: self.distance_km,
            straight_line_legs: self.straight_line_legs,
        }
    }
}

fn is_usable(leg: &RouteLeg) -> bool {
    leg.distance_meters.is_finite()
        && leg.distance_meters >= 0.0
        && leg.geometry.len() >= 2
        && leg.geometry.iter().all(GeoPoint::is_valid)
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "tests compare distances within a tolerance"
)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn origin() -> GeoPoint {
        GeoPoint::new(0.0, 0.0)
    }

    #[rstest]
    fn routed_leg_skips_its_first_point(origin: GeoPoint) {
        let bend = GeoPoint::new(0.5, 0.5);
        let end = GeoPoint::new(0.0, 1.0);
        let mut assembler = PathAssembler::starting_at(origin);

        assembler.push_leg(
            end,
            Some(RouteLeg {
                distance_meters: 2_500.0,
                geometry: vec![origin, bend, end],
            }),
        );
        let assembled = assembler.finish();

        assert_eq!(assembled.path, vec![origin, bend, end]);
        assert!((assembled.distance_km - 2.5).abs() < 1.0e-9);
        assert_eq!(assembled.straight_line_legs, 0);
    }

    #[rstest]
    fn missing_leg_becomes_a_straight_line(origin: GeoPoint) {
        let end = GeoPoint::new(0.0, 1.0);
        let mut assembler = PathAssembler::starting_at(origin);

        assembler.push_leg(end, None);
        let assembled = assembler.finish();

        assert_eq!(assembled.path, vec![origin, end]);
        assert!((assembled.distance_km - haversine_km(origin, end)).abs() < 1.0e-9);
        assert_eq!(assembled.straight_line_legs, 1);
    }

    #[rstest]
    #[case::negative_distance(RouteLeg { distance_meters: -1.0, geometry: vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)] })]
    #[case::single_point(RouteLeg { distance_meters: 10.0, geometry: vec![GeoPoint::new(0.0, 1.0)] })]
    #[case::non_finite_point(RouteLeg { distance_meters: 10.0, geometry: vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(f64::NAN, 1.0)] })]
    fn unusable_legs_fall_back(origin: GeoPoint, #[case] leg: RouteLeg) {
        let end = GeoPoint::new(0.0, 1.0);
        let mut assembler = PathAssembler::starting_at(origin);

        assembler.push_leg(end, Some(leg));
        let assembled = assembler.finish();

        assert_eq!(assembled.path, vec![origin, end]);
        assert_eq!(assembled.straight_line_legs, 1);
    }

    #[rstest]
    fn append_joins_at_the_shared_point(origin: GeoPoint) {
        let middle = GeoPoint::new(0.0, 1.0);
        let end = GeoPoint::new(0.0, 2.0);
        let mut head = PathAssembler::starting_at(origin);
        head.push_leg(middle, None);
        let mut tail = PathAssembler::starting_at(middle);
        tail.push_leg(end, None);

        head.append(tail.finish());
        let assembled = head.finish();

        assert_eq!(assembled.path, vec![origin, middle, end]);
        assert_eq!(assembled.straight_line_legs, 2);
        let expected = haversine_km(origin, middle) + haversine_km(middle, end);
        assert!((assembled.distance_km - expected).abs() < 1.0e-9);
    }
}
