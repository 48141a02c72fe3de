use crate::display::Coordinates;

pub const EARTH_RADIUS_NM: f64 = 3440.0;

/// Great-circle distance in nautical miles (haversine).
pub fn distance_nm(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_NM * h.sqrt().asin()
}

/// Bearing in degrees [0, 360) from `from` to `to`, clockwise from north.
///
/// Plain lat/lon deltas, no projection: good enough for polar placement.
pub fn bearing_deg(from: Coordinates, to: Coordinates) -> f64 {
    let dlat = to.latitude - from.latitude;
    let dlon = to.longitude - from.longitude;
    dlon.atan2(dlat).to_degrees().rem_euclid(360.0)
}
