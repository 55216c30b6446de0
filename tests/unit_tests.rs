// Unit tests for relief-match

use chrono::Utc;
use relief_match::core::{
    distance::{calculate_bounding_box, haversine_distance_m, is_within_bounding_box},
    matcher::{titles_overlap, Matcher},
    proximity::rank_by_distance,
};
use relief_match::models::{EntryKind, EntryStatus, GeoPoint, LostFoundEntry};
use uuid::Uuid;

fn point(lng: f64, lat: f64) -> GeoPoint {
    GeoPoint::new(lng, lat).unwrap()
}

fn entry(
    kind: EntryKind,
    title: Option<&str>,
    lng: f64,
    lat: f64,
    status: EntryStatus,
) -> LostFoundEntry {
    LostFoundEntry {
        id: Uuid::new_v4(),
        kind,
        title: title.map(String::from),
        description: None,
        image: None,
        location: point(lng, lat),
        reporter_id: Uuid::new_v4(),
        matched_with_id: None,
        status,
        created_at: Utc::now(),
    }
}

#[test]
fn test_haversine_distance_zero() {
    let p = point(-74.0060, 40.7128);
    assert!(haversine_distance_m(p, p) < 0.01);
}

#[test]
fn test_haversine_distance_manhattan_to_brooklyn() {
    // Manhattan to Brooklyn is approximately 5-10 km
    let manhattan = point(-73.9855, 40.7580);
    let brooklyn = point(-73.9442, 40.6782);

    let distance = haversine_distance_m(manhattan, brooklyn);
    assert!(distance > 5_000.0 && distance < 15_000.0);
}

#[test]
fn test_bounding_box_creation() {
    let center = point(-74.0060, 40.7128);
    let bbox = calculate_bounding_box(center, 10_000.0);

    assert!(bbox.min_lat < center.latitude);
    assert!(bbox.max_lat > center.latitude);
    assert!(bbox.min_lon < center.longitude);
    assert!(bbox.max_lon > center.longitude);

    // 10km / ~111.32km per degree of latitude
    let lat_span = bbox.max_lat - bbox.min_lat;
    assert!((lat_span - 0.18).abs() < 0.02);
}

#[test]
fn test_point_within_bbox() {
    let center = point(-74.0060, 40.7128);
    let bbox = calculate_bounding_box(center, 10_000.0);

    assert!(is_within_bounding_box(center, &bbox));
    assert!(is_within_bounding_box(point(-74.0, 40.71), &bbox));
    assert!(!is_within_bounding_box(point(-80.0, 50.0), &bbox));
    assert!(!is_within_bounding_box(point(-74.0, bbox.max_lat + 0.01), &bbox));
}

#[test]
fn test_coordinate_validation_bounds() {
    assert!(GeoPoint::new(180.0, 90.0).is_ok());
    assert!(GeoPoint::new(-180.0, -90.0).is_ok());
    assert!(GeoPoint::new(180.01, 0.0).is_err());
    assert!(GeoPoint::new(0.0, 90.01).is_err());
    assert!(GeoPoint::new(f64::NAN, 12.0).is_err());
}

#[test]
fn test_rank_by_distance_only_within_radius() {
    let origin = point(77.59, 12.97);
    let entries = vec![
        entry(EntryKind::Found, None, 77.591, 12.971, EntryStatus::Open),
        entry(EntryKind::Found, None, 77.70, 13.10, EntryStatus::Open), // far outside 2km
    ];

    let ranked = rank_by_distance(origin, entries, 2000.0, 10);
    assert_eq!(ranked.len(), 1);
    for e in &ranked {
        assert!(haversine_distance_m(origin, e.location) <= 2000.0);
    }
}

#[test]
fn test_rank_by_distance_monotonic() {
    let origin = point(77.59, 12.97);
    let entries: Vec<LostFoundEntry> = (1..15)
        .map(|i| {
            entry(
                EntryKind::Found,
                None,
                77.59 + (i as f64) * 0.001,
                12.97,
                EntryStatus::Open,
            )
        })
        .collect();

    let ranked = rank_by_distance(origin, entries, 50_000.0, 100);
    let mut previous = 0.0;
    for e in &ranked {
        let d = haversine_distance_m(origin, e.location);
        assert!(d >= previous, "results must be nearest-first");
        previous = d;
    }
}

#[test]
fn test_rank_by_distance_zero_radius_empty() {
    let origin = point(77.59, 12.97);
    let entries = vec![entry(EntryKind::Found, None, 77.5901, 12.9701, EntryStatus::Open)];

    let ranked = rank_by_distance(origin, entries, 0.0, 10);
    assert!(ranked.is_empty());
}

#[test]
fn test_title_filter_black_wallet_scenario() {
    // Base lost "black wallet" vs found "black leather wallet" nearby
    assert!(titles_overlap(Some("black wallet"), Some("black leather wallet")));
}

#[test]
fn test_title_filter_blue_umbrella_excluded() {
    assert!(!titles_overlap(Some("black wallet"), Some("blue umbrella")));
}

#[test]
fn test_title_filter_symmetry() {
    let red_backpack = Some("Red Backpack");
    let backpack = Some("backpack");
    assert_eq!(
        titles_overlap(red_backpack, backpack),
        titles_overlap(backpack, red_backpack)
    );
    assert!(titles_overlap(red_backpack, backpack));
}

#[test]
fn test_title_filter_missing_title_passes() {
    assert!(titles_overlap(None, Some("anything")));
    assert!(titles_overlap(Some("anything"), None));
}

#[test]
fn test_matcher_never_returns_base_entry() {
    let matcher = Matcher::with_defaults();
    let base = entry(EntryKind::Lost, Some("wallet"), 77.59, 12.97, EntryStatus::Open);

    let mut self_copy = base.clone();
    self_copy.kind = EntryKind::Found; // even disguised as opposite kind

    let result = matcher.filter_candidates(&base, vec![self_copy]);
    assert!(result.iter().all(|e| e.id != base.id));
    assert!(result.is_empty());
}

#[test]
fn test_matcher_never_returns_same_kind() {
    let matcher = Matcher::with_defaults();
    let base = entry(EntryKind::Found, Some("wallet"), 77.59, 12.97, EntryStatus::Open);
    let same = entry(EntryKind::Found, Some("wallet"), 77.591, 12.971, EntryStatus::Open);

    let result = matcher.filter_candidates(&base, vec![same]);
    assert!(result.is_empty());
}

#[test]
fn test_matcher_never_returns_non_open() {
    let matcher = Matcher::with_defaults();
    let base = entry(EntryKind::Lost, Some("wallet"), 77.59, 12.97, EntryStatus::Open);
    let matched = entry(EntryKind::Found, Some("wallet"), 77.591, 12.971, EntryStatus::Matched);
    let closed = entry(EntryKind::Found, Some("wallet"), 77.591, 12.971, EntryStatus::Closed);

    let result = matcher.filter_candidates(&base, vec![matched, closed]);
    assert!(result.is_empty());
}
