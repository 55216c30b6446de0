use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::domain::{EntryKind, ReportKind, ReportStatus, Severity};

/// Query parameters for the `/near` endpoints.
///
/// Coordinates arrive as separate `lng`/`lat` parameters and are validated
/// into a `GeoPoint` by the handler, so a malformed pair surfaces as a typed
/// coordinate error rather than a generic parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearQuery {
    pub lng: f64,
    pub lat: f64,
    #[serde(rename = "maxDistance", default)]
    pub max_distance: Option<f64>,
}

/// Request to create a lost-or-found entry
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEntryRequest {
    pub kind: EntryKind,
    #[validate(length(max = 200))]
    #[serde(default)]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// `[longitude, latitude]`
    pub coords: [f64; 2],
    #[serde(alias = "reporter_id", rename = "reporterId")]
    pub reporter_id: Uuid,
}

/// Request to register a shelter
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateShelterRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub capacity: Option<i32>,
    #[serde(default)]
    pub facilities: Vec<String>,
    /// `[longitude, latitude]`
    pub coords: [f64; 2],
    #[serde(rename = "isVerified", default)]
    pub is_verified: bool,
}

/// Request to file a disaster report
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReportRequest {
    #[validate(length(max = 200))]
    #[serde(default)]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub description: Option<String>,
    pub kind: ReportKind,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub images: Vec<String>,
    /// `[longitude, latitude]`
    pub coords: [f64; 2],
    #[serde(alias = "reporter_id", rename = "reporterId")]
    pub reporter_id: Uuid,
}

/// Filter for listing lost/found entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryListQuery {
    #[serde(default)]
    pub kind: Option<EntryKind>,
}

/// Filter for listing shelters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShelterListQuery {
    #[serde(rename = "isVerified", default)]
    pub is_verified: Option<bool>,
}

/// Filters for listing reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportListQuery {
    #[serde(default)]
    pub kind: Option<ReportKind>,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub status: Option<ReportStatus>,
}
