//! Geographic primitives: points in decimal degrees and great-circle distance.
//!
//! All distances in this crate are great-circle (haversine) distances in
//! kilometers. Planar Euclidean distance is wrong for latitude/longitude
//! pairs: a degree of longitude shrinks with latitude, so a fixed degree
//! threshold would make the contact radius depend on where on the globe the
//! pings were recorded.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// The reference contact radius: 6 feet (1.8288 m) expressed in kilometers.
pub const CONTACT_RADIUS_KM: f64 = 0.0018288;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees, south negative.
    pub latitude: f64,
    /// Longitude in decimal degrees, west negative.
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point from latitude and longitude in decimal degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that the coordinates are finite and within geographic range.
    ///
    /// `index` identifies the record the point came from, so the error can
    /// name the offending row.
    pub fn validate(&self, index: usize) -> Result<()> {
        let ok = self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude);
        if ok {
            Ok(())
        } else {
            Err(Error::InvalidCoordinate {
                index,
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

/// Great-circle distance between two points, in kilometers.
///
/// Haversine formula over a spherical Earth of radius [`EARTH_RADIUS_KM`].
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_zero_distance() {
        let p = GeoPoint::new(48.8566, 2.3522);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn test_haversine_known_distance() {
        // Paris to London, roughly 344 km.
        let paris = GeoPoint::new(48.8566, 2.3522);
        let london = GeoPoint::new(51.5074, -0.1278);
        let d = haversine_km(paris, london);
        assert!((d - 344.0).abs() < 2.0, "got {d}");
    }

    #[test]
    fn test_haversine_symmetric() {
        let a = GeoPoint::new(12.97, 77.59);
        let b = GeoPoint::new(12.98, 77.60);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-12);
    }

    #[test]
    fn test_haversine_small_separation() {
        // One meter of separation along a meridian is ~0.001 km.
        let a = GeoPoint::new(40.0, -74.0);
        let b = GeoPoint::new(40.0 + 1.0 / 111_320.0, -74.0);
        let d = haversine_km(a, b);
        assert!((d - 0.001).abs() < 1e-5, "got {d}");
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(GeoPoint::new(91.0, 0.0).validate(0).is_err());
        assert!(GeoPoint::new(0.0, -181.0).validate(0).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).validate(0).is_err());
        assert!(GeoPoint::new(-90.0, 180.0).validate(0).is_ok());
    }

    #[test]
    fn test_validate_reports_record_index() {
        let err = GeoPoint::new(100.0, 0.0).validate(7).unwrap_err();
        match err {
            Error::InvalidCoordinate { index, .. } => assert_eq!(index, 7),
            other => panic!("unexpected error: {other}"),
        }
    }
}
