//! Great-circle distance and implied travel speed

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points, in kilometers, via the
/// haversine formula.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Implied travel speed in km/h for covering `distance_km` in
/// `elapsed_seconds`. Returns `None` when elapsed time is not positive; the
/// caller decides how to treat instantaneous relocation.
pub fn implied_speed_kmh(distance_km: f64, elapsed_seconds: f64) -> Option<f64> {
    if elapsed_seconds <= 0.0 {
        return None;
    }
    Some(distance_km / (elapsed_seconds / 3600.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance() {
        let d = haversine_km(40.7128, -74.0060, 40.7128, -74.0060);
        assert!(d.abs() < 1e-9);
    }

    #[test]
    fn test_new_york_to_tokyo() {
        // Known great-circle distance is roughly 10,850 km.
        let d = haversine_km(40.7128, -74.0060, 35.6762, 139.6503);
        assert!((10_700.0..11_000.0).contains(&d), "distance was {d} km");
    }

    #[test]
    fn test_distance_is_symmetric() {
        let ab = haversine_km(51.5074, -0.1278, 48.8566, 2.3522);
        let ba = haversine_km(48.8566, 2.3522, 51.5074, -0.1278);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_implied_speed() {
        // 600 km in one hour.
        assert_eq!(implied_speed_kmh(600.0, 3600.0), Some(600.0));
        // Non-positive elapsed time has no defined speed.
        assert_eq!(implied_speed_kmh(600.0, 0.0), None);
        assert_eq!(implied_speed_kmh(600.0, -5.0), None);
    }
}
