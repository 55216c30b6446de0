use crate::models::{BoundingBox, GeoPoint};

/// Earth's mean radius in meters
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters per degree of latitude (and of longitude at the equator)
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Calculate the Haversine (great-circle) distance between two points in meters
#[inline]
pub fn haversine_distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1_rad = a.latitude.to_radians();
    let lat2_rad = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Calculate a bounding box around a center point.
///
/// Much cheaper than Haversine, so it serves as the coarse prefilter pushed
/// down to the store. The box is permissive: every point within `radius_m`
/// of the center lies inside it, and the exact distance pass afterwards is
/// authoritative.
/// A box crossing the antimeridian is represented with `min_lon > max_lon`
/// and the membership check treats the longitude range as wrapped.
pub fn calculate_bounding_box(center: GeoPoint, radius_m: f64) -> BoundingBox {
    let lat_delta = radius_m / METERS_PER_DEGREE;

    // A degree of longitude shrinks with latitude
    let lon_delta = radius_m / (METERS_PER_DEGREE * center.latitude.to_radians().cos().abs());

    let min_lat = (center.latitude - lat_delta).max(-90.0);
    let max_lat = (center.latitude + lat_delta).min(90.0);

    // Near a pole the box spans every longitude
    if lon_delta >= 180.0 {
        return BoundingBox {
            min_lat,
            max_lat,
            min_lon: -180.0,
            max_lon: 180.0,
        };
    }

    let mut min_lon = center.longitude - lon_delta;
    let mut max_lon = center.longitude + lon_delta;
    if min_lon < -180.0 {
        min_lon += 360.0;
    }
    if max_lon > 180.0 {
        max_lon -= 360.0;
    }

    BoundingBox {
        min_lat,
        max_lat,
        min_lon,
        max_lon,
    }
}

/// Check if a point is within a bounding box, honoring antimeridian wrap
#[inline]
pub fn is_within_bounding_box(point: GeoPoint, bbox: &BoundingBox) -> bool {
    if point.latitude < bbox.min_lat || point.latitude > bbox.max_lat {
        return false;
    }
    if bbox.min_lon <= bbox.max_lon {
        point.longitude >= bbox.min_lon && point.longitude <= bbox.max_lon
    } else {
        point.longitude >= bbox.min_lon || point.longitude <= bbox.max_lon
    }
}
