use std::cmp::Ordering;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

use crate::errors::{ErrorKind, HaliteError, HaliteResult};

use super::value::{canonical_double_bits, compare_doubles};

/// A geographical point expressed as latitude and longitude in degrees.
///
/// Points order by latitude first, then by longitude, using the same double
/// comparator as numeric values, so `-0.0` and `0.0` coordinates are
/// interchangeable.
#[derive(Clone, Copy, Debug, serde::Deserialize, serde::Serialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Creates a new geo point.
    ///
    /// # Errors
    ///
    /// Returns an error if the latitude is outside `[-90, 90]` or the
    /// longitude is outside `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> HaliteResult<GeoPoint> {
        if !(-90.0..=90.0).contains(&latitude) {
            log::error!("Latitude out of range: {}", latitude);
            return Err(HaliteError::new(
                &format!("Latitude out of range: {}", latitude),
                ErrorKind::InvalidArgument,
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            log::error!("Longitude out of range: {}", longitude);
            return Err(HaliteError::new(
                &format!("Longitude out of range: {}", longitude),
                ErrorKind::InvalidArgument,
            ));
        }
        Ok(GeoPoint {
            latitude,
            longitude,
        })
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl PartialEq for GeoPoint {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GeoPoint {}

impl PartialOrd for GeoPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GeoPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_doubles(self.latitude, other.latitude)
            .then_with(|| compare_doubles(self.longitude, other.longitude))
    }
}

impl Hash for GeoPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        canonical_double_bits(self.latitude).hash(state);
        canonical_double_bits(self.longitude).hash(state);
    }
}

impl Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "geo({:?},{:?})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_new() {
        let point = GeoPoint::new(10.5, -20.25).unwrap();
        assert_eq!(point.latitude(), 10.5);
        assert_eq!(point.longitude(), -20.25);
    }

    #[test]
    fn test_geo_point_rejects_out_of_range_latitude() {
        assert!(GeoPoint::new(90.1, 0.0).is_err());
        assert!(GeoPoint::new(-90.1, 0.0).is_err());
        assert!(GeoPoint::new(90.0, 0.0).is_ok());
    }

    #[test]
    fn test_geo_point_rejects_out_of_range_longitude() {
        assert!(GeoPoint::new(0.0, 180.1).is_err());
        assert!(GeoPoint::new(0.0, -180.1).is_err());
        assert!(GeoPoint::new(0.0, -180.0).is_ok());
    }

    #[test]
    fn test_geo_point_orders_by_latitude_then_longitude() {
        let a = GeoPoint::new(0.0, 10.0).unwrap();
        let b = GeoPoint::new(0.0, 20.0).unwrap();
        let c = GeoPoint::new(1.0, 0.0).unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_geo_point_longitude_breaks_latitude_tie() {
        let a = GeoPoint::new(5.0, -1.0).unwrap();
        let b = GeoPoint::new(5.0, 1.0).unwrap();
        assert_eq!(a.cmp(&b), Ordering::Less);
    }

    #[test]
    fn test_geo_point_negative_zero_equals_zero() {
        let a = GeoPoint::new(-0.0, 0.0).unwrap();
        let b = GeoPoint::new(0.0, -0.0).unwrap();
        assert_eq!(a, b);
    }
}
