//! Great-circle distance on a spherical Earth.

use crate::domain::models::Coordinate;

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates in kilometres.
///
/// Always non-negative and symmetric; zero for identical coordinates.
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlng = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    // Rounding can push h slightly past 1 for antipodal points, which asin rejects
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DH: Coordinate = Coordinate::new(22.9944, 113.7258);
    const CT: Coordinate = Coordinate::new(22.9242, 113.8401);

    #[test]
    fn test_distance_to_self_is_zero() {
        for coord in [DH, CT, Coordinate::new(-45.0, 170.0), Coordinate::new(90.0, 0.0)] {
            assert_eq!(distance_km(&coord, &coord), 0.0);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let ab = distance_km(&DH, &CT);
        let ba = distance_km(&CT, &DH);
        assert!((ab - ba).abs() < 1e-12, "{} != {}", ab, ba);
    }

    #[test]
    fn test_distance_between_reference_sites() {
        // DH -> CT is roughly 14 km across Dongguan
        let d = distance_km(&DH, &CT);
        assert!(d > 13.0 && d < 15.0, "unexpected distance {}", d);
    }

    #[test]
    fn test_one_degree_of_longitude_on_equator() {
        let d = distance_km(&Coordinate::new(0.0, 10.0), &Coordinate::new(0.0, 11.0));
        let expected = EARTH_RADIUS_KM * 1.0_f64.to_radians();
        assert!((d - expected).abs() < 1e-9);
    }

    #[test]
    fn test_antipodal_points_do_not_produce_nan() {
        let d = distance_km(&Coordinate::new(0.0, 0.0), &Coordinate::new(0.0, 180.0));
        assert!(d.is_finite());
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((d - half_circumference).abs() < 1e-6);
    }
}
