use crate::core::distance::haversine_distance_m;
use crate::models::GeoPoint;

/// Shared shape of every geo-indexed entity: anything with a location can be
/// ranked by distance from a query point.
pub trait Located {
    fn location(&self) -> GeoPoint;
}

impl Located for crate::models::LostFoundEntry {
    fn location(&self) -> GeoPoint {
        self.location
    }
}

impl Located for crate::models::Shelter {
    fn location(&self) -> GeoPoint {
        self.location
    }
}

impl Located for crate::models::Report {
    fn location(&self) -> GeoPoint {
        self.location
    }
}

/// Exact-distance stage of the proximity pipeline.
///
/// The store hands back everything inside a coarse bounding box; this pass
/// computes the great-circle distance for each candidate, drops anything
/// beyond `max_distance_m`, orders ascending by distance, and truncates at
/// `limit`. Callers rely on the nearest-first ordering.
pub fn rank_by_distance<T: Located>(
    origin: GeoPoint,
    candidates: Vec<T>,
    max_distance_m: f64,
    limit: usize,
) -> Vec<T> {
    let mut ranked: Vec<(f64, T)> = candidates
        .into_iter()
        .filter_map(|item| {
            let distance = haversine_distance_m(origin, item.location());
            if distance <= max_distance_m {
                Some((distance, item))
            } else {
                None
            }
        })
        .collect();

    ranked.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(limit);

    ranked.into_iter().map(|(_, item)| item).collect()
}
