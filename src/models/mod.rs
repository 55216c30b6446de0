// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BoundingBox, EntryKind, EntryStatus, GeoPoint, InvalidCoordinate, LostFoundEntry, Report,
    ReportKind, ReportStatus, Severity, Shelter,
};
pub use requests::{
    CreateEntryRequest, CreateReportRequest, CreateShelterRequest, EntryListQuery, NearQuery,
    ReportListQuery, ShelterListQuery,
};
pub use responses::{ErrorResponse, HealthResponse};
