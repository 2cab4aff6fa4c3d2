use geo::{Coord, Point};

/// A WGS84 position in degrees.
///
/// Fields are latitude-first. Routing services exchange `[longitude, latitude]`
/// pairs, so conversions at that boundary go through
/// [`GeoPoint::from_lon_lat`] and [`GeoPoint::to_lon_lat`].
///
/// # Examples
/// ```
/// use fieldroute_core::GeoPoint;
///
/// let office = GeoPoint::new(52.52, 13.405);
/// assert!(office.is_valid());
/// assert_eq!(office.to_lon_lat(), [13.405, 52.52]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    /// Degrees north of the equator.
    pub latitude: f64,
    /// Degrees east of Greenwich.
    pub longitude: f64,
}

impl GeoPoint {
    /// Construct a point from latitude and longitude in degrees.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Construct a point from a `[longitude, latitude]` pair.
    ///
    /// # Examples
    /// ```
    /// use fieldroute_core::GeoPoint;
    ///
    /// let point = GeoPoint::from_lon_lat([13.405, 52.52]);
    /// assert_eq!(point.latitude, 52.52);
    /// ```
    pub const fn from_lon_lat(pair: [f64; 2]) -> Self {
        let [longitude, latitude] = pair;
        Self::new(latitude, longitude)
    }

    /// Return the point as a `[longitude, latitude]` pair.
    pub const fn to_lon_lat(self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    /// Whether both coordinates are finite numbers.
    ///
    /// Points failing this check are discarded before sequencing.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        Self {
            x: point.longitude,
            y: point.latitude,
        }
    }
}

impl From<Coord<f64>> for GeoPoint {
    fn from(coord: Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(point: GeoPoint) -> Self {
        Self(Coord::from(point))
    }
}
