//! relief-match - Geospatial proximity and lost-and-found matching service
//! for a disaster relief coordination platform.
//!
//! Two cooperating pieces over a geo-indexed store: nearest-first radius
//! queries for shelters and disaster reports, and a candidate matcher that
//! pairs lost items with found items by proximity and loose title overlap.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{haversine_distance_m, rank_by_distance, titles_overlap, Matcher};
pub use crate::models::{EntryKind, EntryStatus, GeoPoint, LostFoundEntry, Report, Shelter};
