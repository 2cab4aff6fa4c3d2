//! OSRM API response types for the Trip and Route services.
//!
//! Both services share the same envelope: a `code` status, an optional
//! `message`, and one or more route objects carrying a distance in meters and
//! a GeoJSON line geometry. Every payload field is optional here so that a
//! missing field surfaces as a validation error rather than a decoder error.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#trip-service>

use serde::Deserialize;

/// OSRM Trip API response.
#[derive(Debug, Deserialize)]
pub struct TripResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"InvalidQuery"` - Invalid query parameters
    /// - `"NoTrips"` - No trip visiting all destinations possible
    /// - `"NotImplemented"` - Unsupported source/destination combination
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// One waypoint per input coordinate, in input order.
    pub waypoints: Option<Vec<TripWaypoint>>,

    /// Computed trips; a connected request yields exactly one.
    pub trips: Option<Vec<OsrmRoute>>,
}

impl TripResponse {
    /// Check if the response indicates success.
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

/// Position of one input coordinate inside the computed trip.
#[derive(Debug, Deserialize)]
pub struct TripWaypoint {
    /// Visiting position of this coordinate within its trip.
    pub waypoint_index: Option<usize>,
    /// Index of the trip this coordinate belongs to.
    pub trips_index: Option<usize>,
}

/// OSRM Route API response.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM (`"Ok"`, `"NoRoute"`, `"InvalidQuery"`, ...).
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Alternative routes, best first.
    pub routes: Option<Vec<OsrmRoute>>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

/// A trip or route object.
#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    /// Length in meters.
    pub distance: Option<f64>,
    /// Full-overview geometry when requested with `geometries=geojson`.
    pub geometry: Option<LineGeometry>,
}

/// GeoJSON `LineString` with `[longitude, latitude]` coordinates.
#[derive(Debug, Deserialize)]
pub struct LineGeometry {
    /// Coordinate pairs, longitude first.
    pub coordinates: Vec<[f64; 2]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_trip_response() {
        let json = r#"{
            "code": "Ok",
            "waypoints": [
                { "waypoint_index": 0, "trips_index": 0, "location": [13.4, 52.5], "name": "" },
                { "waypoint_index": 2, "trips_index": 0, "location": [13.5, 52.6], "name": "" },
                { "waypoint_index": 1, "trips_index": 0, "location": [13.3, 52.4], "name": "" }
            ],
            "trips": [{
                "distance": 18234.5,
                "duration": 1320.1,
                "geometry": { "type": "LineString", "coordinates": [[13.4, 52.5], [13.3, 52.4], [13.5, 52.6]] }
            }]
        }"#;

        let response: TripResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.is_ok());
        let waypoints = response.waypoints.expect("should have waypoints");
        let order: Vec<Option<usize>> = waypoints.iter().map(|wp| wp.waypoint_index).collect();
        assert_eq!(order, vec![Some(0), Some(2), Some(1)]);
        let trips = response.trips.expect("should have trips");
        assert_eq!(trips[0].distance, Some(18234.5));
        let geometry = trips[0].geometry.as_ref().expect("should have geometry");
        assert_eq!(geometry.coordinates[1], [13.3, 52.4]);
    }

    #[test]
    fn deserialise_error_response() {
        let json = r#"{
            "code": "NoTrips",
            "message": "No trip visiting all destinations possible."
        }"#;

        let response: TripResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(!response.is_ok());
        assert!(response.trips.is_none());
        assert!(response.waypoints.is_none());
    }

    #[test]
    fn deserialise_route_without_geometry() {
        let json = r#"{
            "code": "Ok",
            "routes": [{ "distance": 812.0, "duration": 95.0 }]
        }"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.is_ok());
        let routes = response.routes.expect("should have routes");
        assert_eq!(routes[0].distance, Some(812.0));
        assert!(routes[0].geometry.is_none());
    }
}
