use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error raised when a coordinate pair is outside the valid WGS84 ranges.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid coordinate: longitude {longitude}, latitude {latitude}")]
pub struct InvalidCoordinate {
    pub longitude: f64,
    pub latitude: f64,
}

/// A geographic point. Serialized as `[longitude, latitude]` (GeoJSON order).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    /// Construct a point, rejecting NaN/infinite values and out-of-range
    /// longitude/latitude.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, InvalidCoordinate> {
        if !longitude.is_finite()
            || !latitude.is_finite()
            || !(-180.0..=180.0).contains(&longitude)
            || !(-90.0..=90.0).contains(&latitude)
        {
            return Err(InvalidCoordinate { longitude, latitude });
        }
        Ok(Self { longitude, latitude })
    }
}

impl TryFrom<[f64; 2]> for GeoPoint {
    type Error = InvalidCoordinate;

    fn try_from(coords: [f64; 2]) -> Result<Self, Self::Error> {
        GeoPoint::new(coords[0], coords[1])
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(point: GeoPoint) -> Self {
        [point.longitude, point.latitude]
    }
}

/// Whether an entry reports something lost or something found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "entry_kind", rename_all = "lowercase")]
pub enum EntryKind {
    Lost,
    Found,
}

impl EntryKind {
    /// The counterpart kind a match candidate must have
    pub fn opposite(self) -> Self {
        match self {
            EntryKind::Lost => EntryKind::Found,
            EntryKind::Found => EntryKind::Lost,
        }
    }
}

/// Entry lifecycle: open until a match is confirmed or the entry is
/// withdrawn; matched and closed are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "entry_status", rename_all = "lowercase")]
pub enum EntryStatus {
    Open,
    Matched,
    Closed,
}

/// A lost-or-found record created by a reporting user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LostFoundEntry {
    pub id: Uuid,
    pub kind: EntryKind,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub location: GeoPoint,
    #[serde(rename = "reporterId")]
    pub reporter_id: Uuid,
    #[serde(rename = "matchedWithId", default)]
    pub matched_with_id: Option<Uuid>,
    pub status: EntryStatus,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A relief shelter with a fixed location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shelter {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub capacity: Option<i32>,
    #[serde(rename = "currentOccupancy", default)]
    pub current_occupancy: i32,
    #[serde(default)]
    pub facilities: Vec<String>,
    pub location: GeoPoint,
    #[serde(rename = "isVerified", default)]
    pub is_verified: bool,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "report_kind", rename_all = "lowercase")]
pub enum ReportKind {
    Flood,
    Fire,
    Earthquake,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "report_severity", rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "report_status", rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Verified,
    Rejected,
}

/// A disaster report filed from the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub kind: ReportKind,
    pub severity: Severity,
    #[serde(default)]
    pub images: Vec<String>,
    pub location: GeoPoint,
    #[serde(rename = "reporterId")]
    pub reporter_id: Uuid,
    pub status: ReportStatus,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Geospatial bounding box used as the coarse store-side prefilter
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}
