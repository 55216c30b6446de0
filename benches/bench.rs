// Criterion benchmarks for relief-match

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use relief_match::core::{
    distance::{calculate_bounding_box, haversine_distance_m},
    matcher::{titles_overlap, Matcher},
    proximity::rank_by_distance,
};
use relief_match::models::{EntryKind, EntryStatus, GeoPoint, LostFoundEntry};
use uuid::Uuid;

fn create_entry(i: usize, lng: f64, lat: f64) -> LostFoundEntry {
    LostFoundEntry {
        id: Uuid::new_v4(),
        kind: if i % 2 == 0 {
            EntryKind::Found
        } else {
            EntryKind::Lost
        },
        title: Some(format!("item {}", i % 20)),
        description: None,
        image: None,
        location: GeoPoint::new(lng, lat).unwrap(),
        reporter_id: Uuid::new_v4(),
        matched_with_id: None,
        status: EntryStatus::Open,
        created_at: Utc::now(),
    }
}

fn bench_haversine_distance(c: &mut Criterion) {
    let a = GeoPoint::new(-74.0060, 40.7128).unwrap();
    let b = GeoPoint::new(-74.01, 40.72).unwrap();

    c.bench_function("haversine_distance_m", |bench| {
        bench.iter(|| haversine_distance_m(black_box(a), black_box(b)));
    });
}

fn bench_bounding_box(c: &mut Criterion) {
    let center = GeoPoint::new(-74.0060, 40.7128).unwrap();

    c.bench_function("bounding_box_calculation", |bench| {
        bench.iter(|| calculate_bounding_box(black_box(center), black_box(2000.0)));
    });
}

fn bench_title_filter(c: &mut Criterion) {
    c.bench_function("titles_overlap", |bench| {
        bench.iter(|| {
            titles_overlap(
                black_box(Some("black leather wallet")),
                black_box(Some("black wallet")),
            )
        });
    });
}

fn bench_proximity_ranking(c: &mut Criterion) {
    let origin = GeoPoint::new(77.59, 12.97).unwrap();

    let mut group = c.benchmark_group("proximity_ranking");

    for candidate_count in [10, 100, 1000, 10_000].iter() {
        let candidates: Vec<LostFoundEntry> = (0..*candidate_count)
            .map(|i| {
                let lng_offset = (i as f64 * 0.0003) % 0.05;
                let lat_offset = (i as f64 * 0.0002) % 0.05;
                create_entry(i, 77.59 + lng_offset, 12.97 + lat_offset)
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(candidate_count),
            &candidates,
            |bench, candidates| {
                bench.iter(|| {
                    rank_by_distance(
                        black_box(origin),
                        black_box(candidates.clone()),
                        black_box(2000.0),
                        black_box(10),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_match_filtering(c: &mut Criterion) {
    let matcher = Matcher::with_defaults();
    let base = create_entry(1, 77.59, 12.97);

    let candidates: Vec<LostFoundEntry> = (0..100)
        .map(|i| create_entry(i * 2, 77.59 + (i as f64) * 0.0001, 12.97))
        .collect();

    c.bench_function("match_filtering_100", |bench| {
        bench.iter(|| matcher.filter_candidates(black_box(&base), black_box(candidates.clone())));
    });
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_bounding_box,
    bench_title_filter,
    bench_proximity_ranking,
    bench_match_filtering
);
criterion_main!(benches);
