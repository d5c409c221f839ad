//! Great-circle distance on a spherical Earth and radius filtering.

use crate::shared::constants::EARTH_RADIUS_KM;

/// Anything with a latitude/longitude in decimal degrees
pub trait GeoPoint {
    fn latitude(&self) -> f64;
    fn longitude(&self) -> f64;
}

impl GeoPoint for (f64, f64) {
    fn latitude(&self) -> f64 {
        self.0
    }

    fn longitude(&self) -> f64 {
        self.1
    }
}

/// Haversine distance between two points in kilometers
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push sqrt(a) a hair above 1 for antipodal points
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

/// Candidates within `radius_km` of the target, in input order.
///
/// A candidate sitting exactly on the target coordinates is not considered
/// "nearby" and is always left out.
pub fn within_radius<T, I>(
    target_lat: f64,
    target_lon: f64,
    candidates: I,
    radius_km: f64,
) -> Vec<T>
where
    T: GeoPoint,
    I: IntoIterator<Item = T>,
{
    candidates
        .into_iter()
        .filter(|c| {
            let (lat, lon) = (c.latitude(), c.longitude());
            if lat == target_lat && lon == target_lon {
                return false;
            }
            distance_km(target_lat, target_lon, lat, lon) <= radius_km
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_same_point_is_zero() {
        for (lat, lon) in [(0.0, 0.0), (-6.2088, 106.8456), (90.0, 0.0), (-45.5, -179.9)] {
            assert_eq!(distance_km(lat, lon, lat, lon), 0.0);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let pairs = [
            ((0.0, 0.0), (0.0, 5.0)),
            ((-6.2088, 106.8456), (-6.9175, 107.6191)),
            ((51.5074, -0.1278), (40.7128, -74.0060)),
            ((89.9, 10.0), (-89.9, -170.0)),
        ];

        for ((lat1, lon1), (lat2, lon2)) in pairs {
            let forward = distance_km(lat1, lon1, lat2, lon2);
            let backward = distance_km(lat2, lon2, lat1, lon1);
            assert!((forward - backward).abs() < 1e-9, "{} != {}", forward, backward);
        }
    }

    #[test]
    fn test_distance_known_values() {
        // One degree of longitude on the equator is ~111.19 km
        let one_degree = distance_km(0.0, 0.0, 0.0, 1.0);
        assert!((one_degree - 111.19).abs() < 0.01);

        // Jakarta to Bandung, ~116 km great-circle
        let distance = distance_km(-6.2088, 106.8456, -6.9175, 107.6191);
        assert!(distance > 110.0 && distance < 125.0);
    }

    #[test]
    fn test_distance_antipodal_is_half_circumference() {
        let distance = distance_km(0.0, 0.0, 0.0, 180.0);
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!(distance.is_finite());
        assert!((distance - half).abs() < 1e-6);
    }

    #[test]
    fn test_within_radius_includes_near_and_excludes_far() {
        let candidates = vec![(0.0, 0.5), (0.0, 5.0)];
        let result = within_radius(0.0, 0.0, candidates, 100.0);
        assert_eq!(result, vec![(0.0, 0.5)]);
    }

    #[test]
    fn test_within_radius_excludes_exact_target() {
        let candidates = vec![(10.0, 20.0), (10.0, 20.1)];
        let result = within_radius(10.0, 20.0, candidates, 20_000.0);
        assert_eq!(result, vec![(10.0, 20.1)]);
    }

    #[test]
    fn test_within_radius_includes_near_equal_point() {
        let near = (10.0 + 1e-12, 20.0);
        let result = within_radius(10.0, 20.0, vec![near], 1.0);
        assert_eq!(result, vec![near]);
    }

    #[test]
    fn test_within_radius_keeps_input_order() {
        let candidates = vec![(0.0, 0.3), (0.0, 9.0), (0.0, 0.1), (0.0, 0.2)];
        let result = within_radius(0.0, 0.0, candidates, 50.0);
        assert_eq!(result, vec![(0.0, 0.3), (0.0, 0.1), (0.0, 0.2)]);
    }

    #[test]
    fn test_within_radius_boundary_is_inclusive() {
        let radius = distance_km(0.0, 0.0, 0.0, 1.0);
        let result = within_radius(0.0, 0.0, vec![(0.0, 1.0)], radius);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_within_radius_empty_input() {
        let result: Vec<(f64, f64)> = within_radius(0.0, 0.0, Vec::new(), 100.0);
        assert!(result.is_empty());
    }
}
