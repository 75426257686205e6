//! Geolocation
//!
//! Great-circle distance between coordinate pairs and human-readable
//! distance formatting. Pure functions, no validation; callers gate inputs.

use shared::GeoPoint;

/// Mean Earth radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points using the haversine formula.
///
/// Inputs are decimal-degree latitude/longitude; returns kilometers.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Distance between two [`GeoPoint`]s in kilometers.
pub fn distance_between(a: &GeoPoint, b: &GeoPoint) -> f64 {
    haversine_distance(a.lat, a.lng, b.lat, b.lng)
}

/// Render a distance for display: meters below 1 km (truncated to an
/// integer), kilometers to one decimal place otherwise.
pub fn format_distance(distance_km: f64) -> String {
    if distance_km < 1.0 {
        format!("{} m", (distance_km * 1000.0) as i64)
    } else {
        format!("{distance_km:.1} km")
    }
}

/// Round a distance for display, keeping full precision out of payloads.
pub fn round_km(distance_km: f64, places: u32) -> f64 {
    let factor = 10_f64.powi(places as i32);
    (distance_km * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric() {
        let d1 = haversine_distance(12.97, 77.59, 13.08, 80.27);
        let d2 = haversine_distance(13.08, 80.27, 12.97, 77.59);
        assert_eq!(d1, d2);
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(haversine_distance(51.5, -0.12, 51.5, -0.12), 0.0);
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        // One degree of arc on a 6371 km sphere is ~111.19 km
        let d = haversine_distance(0.0, 0.0, 0.0, 1.0);
        assert!((d - 111.19).abs() < 0.01, "got {d}");
    }

    #[test]
    fn known_city_pair() {
        // Bangalore -> Chennai, roughly 290 km great-circle
        let d = haversine_distance(12.9716, 77.5946, 13.0827, 80.2707);
        assert!((d - 290.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn formats_meters_below_one_km() {
        assert_eq!(format_distance(0.35), "350 m");
        // Truncated, not rounded
        assert_eq!(format_distance(0.9999), "999 m");
    }

    #[test]
    fn formats_km_with_one_decimal() {
        assert_eq!(format_distance(1.0), "1.0 km");
        assert_eq!(format_distance(2.45), "2.5 km");
        assert_eq!(format_distance(12.34), "12.3 km");
    }

    #[test]
    fn rounding_for_display() {
        assert_eq!(round_km(3.14159, 2), 3.14);
        assert_eq!(round_km(3.145, 1), 3.1);
    }
}
