use crate::models::GeoPoint;

/// Earth's mean radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Largest possible great-circle distance (half the circumference)
pub const MAX_DISTANCE_KM: f64 = std::f64::consts::PI * EARTH_RADIUS_KM;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers. Inputs must already be within coordinate bounds.
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1.0 for antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance between two points in kilometers
#[inline]
pub fn distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    haversine_distance(a.latitude, a.longitude, b.latitude, b.longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance() {
        // Bogotá to Medellín is roughly 240 km
        let distance = haversine_distance(4.7110, -74.0721, 6.2442, -75.5812);
        assert!((distance - 240.0).abs() < 10.0, "Distance should be ~240km, got {}", distance);
    }

    #[test]
    fn test_identical_points_are_zero() {
        let p = GeoPoint::new(4.7110, -74.0721);
        assert_eq!(distance(&p, &p), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let a = GeoPoint::new(-34.6037, -58.3816);
        let b = GeoPoint::new(10.9685, -74.7813);
        assert_eq!(distance(&a, &b), distance(&b, &a));
    }

    #[test]
    fn test_antipodal_points_stay_finite() {
        let d = haversine_distance(0.0, 0.0, 0.0, 180.0);
        assert!(d.is_finite());
        assert!((d - MAX_DISTANCE_KM).abs() < 1e-6);

        let poles = haversine_distance(90.0, 0.0, -90.0, 0.0);
        assert!(poles <= MAX_DISTANCE_KM + 1e-9);
    }
}
