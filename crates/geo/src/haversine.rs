//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes.

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// The result is non-negative, zero for identical points and symmetric in its
/// arguments up to floating-point rounding.
///
/// # Example
/// ```
/// use profinder_geo::{distance_km, Coordinate};
///
/// let berlin = Coordinate::new(52.5200, 13.4050);
/// let paris = Coordinate::new(48.8566, 2.3522);
///
/// let distance = distance_km(&berlin, &paris);
/// assert!((distance - 878.0).abs() < 10.0);
/// ```
#[inline]
pub fn distance_km(from: &Coordinate, to: &Coordinate) -> f64 {
    central_angle(from, to) * EARTH_RADIUS_KM
}

/// Calculates the great-circle distance between two coordinates in meters.
#[inline]
pub fn distance_m(from: &Coordinate, to: &Coordinate) -> f64 {
    central_angle(from, to) * EARTH_RADIUS_M
}

/// Central angle in radians between two points.
#[inline]
fn central_angle(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // sqrt(h) may overshoot 1.0 near antipodes
    2.0 * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BERLIN: Coordinate = Coordinate::new(52.5200, 13.4050);
    const PARIS: Coordinate = Coordinate::new(48.8566, 2.3522);
    const NEW_YORK: Coordinate = Coordinate::new(40.7128, -74.0060);
    const TOKYO: Coordinate = Coordinate::new(35.6762, 139.6503);

    #[test]
    fn test_berlin_to_paris() {
        let distance = distance_km(&BERLIN, &PARIS);
        assert!((distance - 878.0).abs() < 5.0, "Berlin-Paris: {}", distance);
    }

    #[test]
    fn test_new_york_to_tokyo() {
        let distance = distance_km(&NEW_YORK, &TOKYO);
        assert!((distance - 10838.0).abs() < 50.0, "NYC-Tokyo: {}", distance);
    }

    #[test]
    fn test_same_point_zero_distance() {
        assert_eq!(distance_km(&BERLIN, &BERLIN), 0.0);
    }

    #[test]
    fn test_antipodal_points_are_half_circumference() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 180.0);
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        let distance = distance_km(&a, &b);
        assert!(distance.is_finite());
        assert!((distance - half).abs() < 1e-6, "antipodal: {}", distance);
    }

    #[test]
    fn test_one_degree_latitude_both_hemispheres() {
        let north = distance_km(&Coordinate::new(45.0, 10.0), &Coordinate::new(46.0, 10.0));
        let south = distance_km(&Coordinate::new(-45.0, 10.0), &Coordinate::new(-46.0, 10.0));
        assert!((north - 111.2).abs() < 0.5, "north: {}", north);
        assert!((south - 111.2).abs() < 0.5, "south: {}", south);
    }

    #[test]
    fn test_meters_conversion() {
        let km = distance_km(&BERLIN, &PARIS);
        let meters = distance_m(&BERLIN, &PARIS);
        assert!((meters - km * 1000.0).abs() < 1e-6);
    }

    fn coordinate() -> impl Strategy<Value = Coordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| Coordinate::new(lat, lng))
    }

    proptest! {
        #[test]
        fn prop_symmetric(a in coordinate(), b in coordinate()) {
            prop_assert!((distance_km(&a, &b) - distance_km(&b, &a)).abs() < 1e-9);
        }

        #[test]
        fn prop_identity_is_zero(a in coordinate()) {
            prop_assert_eq!(distance_km(&a, &a), 0.0);
        }

        #[test]
        fn prop_non_negative_and_bounded(a in coordinate(), b in coordinate()) {
            let d = distance_km(&a, &b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }

        #[test]
        fn prop_one_degree_of_latitude(lat in -89.0f64..=89.0, lng in -180.0f64..=180.0) {
            let d = distance_km(&Coordinate::new(lat, lng), &Coordinate::new(lat + 1.0, lng));
            prop_assert!((d - 111.2).abs() < 0.5, "got {}", d);
        }
    }
}
