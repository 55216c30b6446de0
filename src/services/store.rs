use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::core::{calculate_bounding_box, rank_by_distance, validate_match_pair, ConfirmError};
use crate::models::{
    CreateEntryRequest, CreateReportRequest, CreateShelterRequest, EntryKind, EntryStatus,
    GeoPoint, LostFoundEntry, Report, ReportKind, ReportStatus, Severity, Shelter,
};

/// Errors that can occur when interacting with the store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store unavailable: {0}")]
    Unavailable(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        // Pool exhaustion and transport faults are transient and safe to
        // retry; everything else is a hard database failure.
        match err {
            e @ (sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)) => {
                StoreError::Unavailable(e)
            }
            e => StoreError::Database(e),
        }
    }
}

/// Postgres-backed geospatial store.
///
/// Holds all relief entities and serves the coarse half of the proximity
/// pipeline: near-queries fetch everything inside a bounding box over the
/// indexed (latitude, longitude) columns, and the core's exact haversine
/// pass ranks and cuts the result. The handle is passed explicitly
/// (`Arc<GeoStore>` in app state), never a global.
pub struct GeoStore {
    pool: PgPool,
}

impl GeoStore {
    /// Connect and run startup migrations
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, StoreError> {
        Self::connect(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }

    // --- lost/found entries ---

    /// Insert a new entry; status starts open, id and timestamp assigned here
    pub async fn create_entry(
        &self,
        req: &CreateEntryRequest,
        location: GeoPoint,
    ) -> Result<LostFoundEntry, StoreError> {
        let entry = LostFoundEntry {
            id: Uuid::new_v4(),
            kind: req.kind,
            title: req.title.clone(),
            description: req.description.clone(),
            image: req.image.clone(),
            location,
            reporter_id: req.reporter_id,
            matched_with_id: None,
            status: EntryStatus::Open,
            created_at: chrono::Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO lost_found_entries
                (id, kind, title, description, image, longitude, latitude,
                 reporter_id, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(entry.id)
        .bind(entry.kind)
        .bind(&entry.title)
        .bind(&entry.description)
        .bind(&entry.image)
        .bind(entry.location.longitude)
        .bind(entry.location.latitude)
        .bind(entry.reporter_id)
        .bind(entry.status)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!("Created {:?} entry {}", entry.kind, entry.id);

        Ok(entry)
    }

    /// Fetch a single entry by id
    pub async fn get_entry(&self, id: Uuid) -> Result<LostFoundEntry, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, kind, title, description, image, longitude, latitude,
                   reporter_id, matched_with_id, status, created_at
            FROM lost_found_entries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(entry_from_row(&row)?),
            None => Err(StoreError::NotFound(format!("entry {}", id))),
        }
    }

    /// List entries, optionally restricted to one kind, newest first
    pub async fn list_entries(
        &self,
        kind: Option<EntryKind>,
    ) -> Result<Vec<LostFoundEntry>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, kind, title, description, image, longitude, latitude,
                   reporter_id, matched_with_id, status, created_at
            FROM lost_found_entries
            WHERE ($1::entry_kind IS NULL OR kind = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(kind)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| entry_from_row(row).map_err(Into::into))
            .collect()
    }

    /// Fetch open entries of the given kind near a point, nearest-first.
    ///
    /// Stage one is the SQL bounding-box prefilter over the indexed
    /// coordinate columns; stage two is the exact haversine rank and cut.
    /// A box crossing the antimeridian carries min_lon > max_lon and is
    /// matched as two longitude ranges.
    pub async fn find_match_candidates(
        &self,
        base: &LostFoundEntry,
        radius_m: f64,
        limit: usize,
    ) -> Result<Vec<LostFoundEntry>, StoreError> {
        let bbox = calculate_bounding_box(base.location, radius_m);

        let rows = sqlx::query(
            r#"
            SELECT id, kind, title, description, image, longitude, latitude,
                   reporter_id, matched_with_id, status, created_at
            FROM lost_found_entries
            WHERE id <> $1
              AND kind = $2
              AND status = 'open'
              AND latitude BETWEEN $3 AND $4
              AND (
                    ($5::float8 <= $6::float8 AND longitude BETWEEN $5 AND $6)
                 OR ($5::float8 > $6::float8 AND (longitude >= $5 OR longitude <= $6))
              )
            "#,
        )
        .bind(base.id)
        .bind(base.kind.opposite())
        .bind(bbox.min_lat)
        .bind(bbox.max_lat)
        .bind(bbox.min_lon)
        .bind(bbox.max_lon)
        .fetch_all(&self.pool)
        .await?;

        let candidates: Vec<LostFoundEntry> = rows
            .iter()
            .map(entry_from_row)
            .collect::<Result<_, sqlx::Error>>()?;

        tracing::debug!(
            "Entry {}: {} candidates in box before distance cut",
            base.id,
            candidates.len()
        );

        Ok(rank_by_distance(base.location, candidates, radius_m, limit))
    }

    /// Confirm a match between two entries of opposite kinds.
    ///
    /// Both rows are updated in one transaction: status becomes matched and
    /// matched_with_id is cross-populated, or nothing is applied at all.
    pub async fn confirm_match(
        &self,
        entry_a_id: Uuid,
        entry_b_id: Uuid,
    ) -> Result<(LostFoundEntry, LostFoundEntry), StoreError> {
        if entry_a_id == entry_b_id {
            return Err(StoreError::Conflict(ConfirmError::SelfMatch.to_string()));
        }

        let mut tx = self.pool.begin().await?;

        // Lock rows in id order so concurrent confirmations cannot deadlock
        let (first_id, second_id) = if entry_a_id < entry_b_id {
            (entry_a_id, entry_b_id)
        } else {
            (entry_b_id, entry_a_id)
        };

        let first = lock_entry(&mut tx, first_id).await?;
        let second = lock_entry(&mut tx, second_id).await?;

        let (mut a, mut b) = if first.id == entry_a_id {
            (first, second)
        } else {
            (second, first)
        };

        validate_match_pair(&a, &b).map_err(|e| StoreError::Conflict(e.to_string()))?;

        for (id, other_id) in [(a.id, b.id), (b.id, a.id)] {
            sqlx::query(
                r#"
                UPDATE lost_found_entries
                SET status = 'matched', matched_with_id = $2
                WHERE id = $1
                "#,
            )
            .bind(id)
            .bind(other_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        a.status = EntryStatus::Matched;
        a.matched_with_id = Some(b.id);
        b.status = EntryStatus::Matched;
        b.matched_with_id = Some(a.id);

        tracing::info!("Confirmed match between {} and {}", a.id, b.id);

        Ok((a, b))
    }

    // --- shelters ---

    pub async fn create_shelter(
        &self,
        req: &CreateShelterRequest,
        location: GeoPoint,
    ) -> Result<Shelter, StoreError> {
        let shelter = Shelter {
            id: Uuid::new_v4(),
            name: req.name.clone(),
            address: req.address.clone(),
            capacity: req.capacity,
            current_occupancy: 0,
            facilities: req.facilities.clone(),
            location,
            is_verified: req.is_verified,
            created_at: chrono::Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO shelters
                (id, name, address, capacity, current_occupancy, facilities,
                 longitude, latitude, is_verified, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(shelter.id)
        .bind(&shelter.name)
        .bind(&shelter.address)
        .bind(shelter.capacity)
        .bind(shelter.current_occupancy)
        .bind(&shelter.facilities)
        .bind(shelter.location.longitude)
        .bind(shelter.location.latitude)
        .bind(shelter.is_verified)
        .bind(shelter.created_at)
        .execute(&self.pool)
        .await?;

        Ok(shelter)
    }

    pub async fn list_shelters(
        &self,
        is_verified: Option<bool>,
    ) -> Result<Vec<Shelter>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, address, capacity, current_occupancy, facilities,
                   longitude, latitude, is_verified, created_at
            FROM shelters
            WHERE ($1::boolean IS NULL OR is_verified = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(is_verified)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| shelter_from_row(row).map_err(Into::into))
            .collect()
    }

    /// Shelters within `radius_m` of a point, nearest-first
    pub async fn find_shelters_near(
        &self,
        origin: GeoPoint,
        radius_m: f64,
        limit: usize,
    ) -> Result<Vec<Shelter>, StoreError> {
        let bbox = calculate_bounding_box(origin, radius_m);

        let rows = sqlx::query(
            r#"
            SELECT id, name, address, capacity, current_occupancy, facilities,
                   longitude, latitude, is_verified, created_at
            FROM shelters
            WHERE latitude BETWEEN $1 AND $2
              AND (
                    ($3::float8 <= $4::float8 AND longitude BETWEEN $3 AND $4)
                 OR ($3::float8 > $4::float8 AND (longitude >= $3 OR longitude <= $4))
              )
            "#,
        )
        .bind(bbox.min_lat)
        .bind(bbox.max_lat)
        .bind(bbox.min_lon)
        .bind(bbox.max_lon)
        .fetch_all(&self.pool)
        .await?;

        let shelters: Vec<Shelter> = rows
            .iter()
            .map(shelter_from_row)
            .collect::<Result<_, sqlx::Error>>()?;

        Ok(rank_by_distance(origin, shelters, radius_m, limit))
    }

    // --- reports ---

    pub async fn create_report(
        &self,
        req: &CreateReportRequest,
        location: GeoPoint,
    ) -> Result<Report, StoreError> {
        let report = Report {
            id: Uuid::new_v4(),
            title: req.title.clone(),
            description: req.description.clone(),
            kind: req.kind,
            severity: req.severity.unwrap_or(Severity::Low),
            images: req.images.clone(),
            location,
            reporter_id: req.reporter_id,
            status: ReportStatus::Pending,
            created_at: chrono::Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO reports
                (id, title, description, kind, severity, images,
                 longitude, latitude, reporter_id, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(report.id)
        .bind(&report.title)
        .bind(&report.description)
        .bind(report.kind)
        .bind(report.severity)
        .bind(&report.images)
        .bind(report.location.longitude)
        .bind(report.location.latitude)
        .bind(report.reporter_id)
        .bind(report.status)
        .bind(report.created_at)
        .execute(&self.pool)
        .await?;

        Ok(report)
    }

    pub async fn list_reports(
        &self,
        kind: Option<ReportKind>,
        severity: Option<Severity>,
        status: Option<ReportStatus>,
    ) -> Result<Vec<Report>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, kind, severity, images,
                   longitude, latitude, reporter_id, status, created_at
            FROM reports
            WHERE ($1::report_kind IS NULL OR kind = $1)
              AND ($2::report_severity IS NULL OR severity = $2)
              AND ($3::report_status IS NULL OR status = $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(kind)
        .bind(severity)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| report_from_row(row).map_err(Into::into))
            .collect()
    }

    /// Reports within `radius_m` of a point, nearest-first
    pub async fn find_reports_near(
        &self,
        origin: GeoPoint,
        radius_m: f64,
        limit: usize,
    ) -> Result<Vec<Report>, StoreError> {
        let bbox = calculate_bounding_box(origin, radius_m);

        let rows = sqlx::query(
            r#"
            SELECT id, title, description, kind, severity, images,
                   longitude, latitude, reporter_id, status, created_at
            FROM reports
            WHERE latitude BETWEEN $1 AND $2
              AND (
                    ($3::float8 <= $4::float8 AND longitude BETWEEN $3 AND $4)
                 OR ($3::float8 > $4::float8 AND (longitude >= $3 OR longitude <= $4))
              )
            "#,
        )
        .bind(bbox.min_lat)
        .bind(bbox.max_lat)
        .bind(bbox.min_lon)
        .bind(bbox.max_lon)
        .fetch_all(&self.pool)
        .await?;

        let reports: Vec<Report> = rows
            .iter()
            .map(report_from_row)
            .collect::<Result<_, sqlx::Error>>()?;

        Ok(rank_by_distance(origin, reports, radius_m, limit))
    }
}

async fn lock_entry(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    id: Uuid,
) -> Result<LostFoundEntry, StoreError> {
    let row = sqlx::query(
        r#"
        SELECT id, kind, title, description, image, longitude, latitude,
               reporter_id, matched_with_id, status, created_at
        FROM lost_found_entries
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    match row {
        Some(row) => Ok(entry_from_row(&row)?),
        None => Err(StoreError::NotFound(format!("entry {}", id))),
    }
}

fn entry_from_row(row: &PgRow) -> Result<LostFoundEntry, sqlx::Error> {
    Ok(LostFoundEntry {
        id: row.try_get("id")?,
        kind: row.try_get("kind")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        image: row.try_get("image")?,
        location: GeoPoint {
            longitude: row.try_get("longitude")?,
            latitude: row.try_get("latitude")?,
        },
        reporter_id: row.try_get("reporter_id")?,
        matched_with_id: row.try_get("matched_with_id")?,
        status: row.try_get("status")?,
        created_at: row.try_get("created_at")?,
    })
}

fn shelter_from_row(row: &PgRow) -> Result<Shelter, sqlx::Error> {
    Ok(Shelter {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        address: row.try_get("address")?,
        capacity: row.try_get("capacity")?,
        current_occupancy: row.try_get("current_occupancy")?,
        facilities: row.try_get("facilities")?,
        location: GeoPoint {
            longitude: row.try_get("longitude")?,
            latitude: row.try_get("latitude")?,
        },
        is_verified: row.try_get("is_verified")?,
        created_at: row.try_get("created_at")?,
    })
}

fn report_from_row(row: &PgRow) -> Result<Report, sqlx::Error> {
    Ok(Report {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        kind: row.try_get("kind")?,
        severity: row.try_get("severity")?,
        images: row.try_get("images")?,
        location: GeoPoint {
            longitude: row.try_get("longitude")?,
            latitude: row.try_get("latitude")?,
        },
        reporter_id: row.try_get("reporter_id")?,
        status: row.try_get("status")?,
        created_at: row.try_get("created_at")?,
    })
}
