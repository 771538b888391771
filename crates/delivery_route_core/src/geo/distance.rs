use crate::node::Located;

/// Mean Earth radius in kilometers (spherical model).
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Great-circle distance in kilometers between two points.
///
/// Missing coordinates are the caller's problem: a NaN in either point comes
/// back out as a NaN distance.
pub fn haversine_km<A: Located, B: Located>(a: &A, b: &B) -> f64 {
    let (lat1, lat2) = (a.latitude().to_radians(), b.latitude().to_radians());
    let dlat = (b.latitude() - a.latitude()).to_radians();
    let dlng = (b.longitude() - a.longitude()).to_radians();
    let s1 = (dlat / 2.0).sin();
    let s2 = (dlng / 2.0).sin();
    let h = s1 * s1 + lat1.cos() * lat2.cos() * s2 * s2;
    2.0 * h.sqrt().atan2((1.0 - h).sqrt()) * EARTH_RADIUS_KM
}

/// Sum of consecutive leg lengths of an open route (no return leg).
pub fn route_length_km<T: Located>(stops: &[T]) -> f64 {
    stops.windows(2).map(|w| haversine_km(&w[0], &w[1])).sum()
}
