//! Geographic helpers shared by the repository and proximity index.

use serde::Serialize;

use crate::error::{Error, Result};

/// Mean Earth radius in kilometres used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a position, rejecting coordinates outside [-90, 90] x [-180, 180].
    pub fn checked(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::InvalidCoordinate {
                message: format!("latitude {latitude} is outside [-90, 90]"),
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidCoordinate {
                message: format!("longitude {longitude} is outside [-180, 180]"),
            });
        }
        Ok(Self::new(latitude, longitude))
    }

    /// Great-circle (haversine) distance to another position, in kilometres.
    pub fn distance_to(&self, other: &Self) -> f64 {
        great_circle_distance(self, other)
    }

    /// Earth-centred Cartesian coordinates in kilometres.
    pub(crate) fn to_cartesian(self) -> [f64; 3] {
        let lat = self.latitude.to_radians();
        let lon = self.longitude.to_radians();
        [
            EARTH_RADIUS_KM * lat.cos() * lon.cos(),
            EARTH_RADIUS_KM * lat.cos() * lon.sin(),
            EARTH_RADIUS_KM * lat.sin(),
        ]
    }
}

/// Haversine distance between two positions, in kilometres.
pub fn great_circle_distance(a: &Position, b: &Position) -> f64 {
    let d_lat = (a.latitude - b.latitude).to_radians();
    let d_lon = (a.longitude - b.longitude).to_radians();
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + (d_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Straight-line chord length through the sphere for a great-circle distance.
///
/// Chord length grows monotonically with surface distance, so a Euclidean
/// radius query with this value never misses a point on the surface.
pub(crate) fn chord_for_surface_distance(distance_km: f64) -> f64 {
    let half_angle = (distance_km / (2.0 * EARTH_RADIUS_KM)).min(std::f64::consts::FRAC_PI_2);
    2.0 * EARTH_RADIUS_KM * half_angle.sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let porto = Position::new(41.2481, -8.6814);
        assert!(porto.distance_to(&porto).abs() < 1e-9);
    }

    #[test]
    fn porto_to_lisbon_is_about_277_km() {
        let porto = Position::new(41.2481, -8.6814);
        let lisbon = Position::new(38.7813, -9.1359);
        let d = porto.distance_to(&lisbon);
        assert!((d - 277.0).abs() < 10.0, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Position::new(49.0128, 2.55);
        let b = Position::new(51.4706, -0.4619);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-9);
    }

    #[test]
    fn antipodes_are_half_circumference_apart() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(0.0, 180.0);
        let expected = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((a.distance_to(&b) - expected).abs() < 1e-6);
    }

    #[test]
    fn checked_rejects_out_of_range() {
        assert!(Position::checked(91.0, 0.0).is_err());
        assert!(Position::checked(0.0, -180.5).is_err());
        assert!(Position::checked(-90.0, 180.0).is_ok());
    }

    #[test]
    fn chord_never_exceeds_surface_distance() {
        for d in [0.0, 1.0, 100.0, 5000.0, 20000.0] {
            assert!(chord_for_surface_distance(d) <= d + 1e-9);
        }
        assert!((chord_for_surface_distance(1e9) - 2.0 * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn cartesian_chord_matches_surface_distance() {
        let a = Position::new(41.2481, -8.6814);
        let b = Position::new(38.7813, -9.1359);
        let pa = a.to_cartesian();
        let pb = b.to_cartesian();
        let chord = ((pa[0] - pb[0]).powi(2) + (pa[1] - pb[1]).powi(2) + (pa[2] - pb[2]).powi(2))
            .sqrt();
        let expected = chord_for_surface_distance(a.distance_to(&b));
        assert!((chord - expected).abs() < 1e-6);
    }
}
