use std::fmt;

const NINETY: f64 = 90.0;
const ONE_EIGHTY: f64 = NINETY * 2.0;

/// Anything that can be placed on a route.
///
/// Coordinates are in degrees. The sequencing functions only read them; the
/// rest of the implementing type travels along untouched.
pub trait Located {
    fn latitude(&self) -> f64;
    fn longitude(&self) -> f64;

    fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude(), self.longitude())
    }
}

impl<T: Located + ?Sized> Located for &T {
    fn latitude(&self) -> f64 {
        (**self).latitude()
    }

    fn longitude(&self) -> f64 {
        (**self).longitude()
    }
}

/// Latitude/longitude pair in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Describes why this point can't be routed, or `None` when it can.
    pub fn invalid_reason(self) -> Option<String> {
        if !self.lat.is_finite() {
            return Some(format!("latitude is not a finite number ({})", self.lat));
        }
        if !self.lng.is_finite() {
            return Some(format!("longitude is not a finite number ({})", self.lng));
        }
        if !(-NINETY..=NINETY).contains(&self.lat) {
            return Some(format!("latitude {} outside [-90, 90]", self.lat));
        }
        if !(-ONE_EIGHTY..=ONE_EIGHTY).contains(&self.lng) {
            return Some(format!("longitude {} outside [-180, 180]", self.lng));
        }
        None
    }
}

impl Located for GeoPoint {
    fn latitude(&self) -> f64 {
        self.lat
    }

    fn longitude(&self) -> f64 {
        self.lng
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut b1 = ryu::Buffer::new();
        let mut b2 = ryu::Buffer::new();
        write!(f, "{},{}", b1.format(self.lat), b2.format(self.lng))
    }
}

#[cfg(test)]
mod tests {
    use super::{GeoPoint, Located};

    fn routable(lat: f64, lng: f64) -> bool {
        GeoPoint::new(lat, lng).invalid_reason().is_none()
    }

    #[test]
    fn valid_bounds_are_accepted() {
        assert!(routable(-90.0, -180.0));
        assert!(routable(90.0, 180.0));
        assert!(routable(0.0, 0.0));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(!routable(91.0, 0.0));
        assert!(!routable(0.0, 181.0));
        assert!(!routable(f64::NAN, 0.0));
        assert!(!routable(0.0, f64::INFINITY));
    }

    #[test]
    fn invalid_reason_names_the_bad_axis() {
        let reason = GeoPoint::new(0.0, f64::NAN)
            .invalid_reason()
            .expect("NaN longitude should be rejected");
        assert!(reason.starts_with("longitude"));
    }

    #[test]
    fn references_are_located_too() {
        let p = GeoPoint::new(-23.55, -46.63);
        let r = &p;
        assert_eq!(r.point(), p);
    }

    #[test]
    fn display_formats_as_lat_lng() {
        let node = GeoPoint::new(1.5, -2.25);
        assert_eq!(node.to_string(), "1.5,-2.25");
    }
}
