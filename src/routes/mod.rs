// Route exports
pub mod lostfound;
pub mod reports;
pub mod shelters;

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::config::MatchingSettings;
use crate::core::Matcher;
use crate::models::{ErrorResponse, HealthResponse, InvalidCoordinate};
use crate::services::{GeoStore, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<GeoStore>,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(lostfound::configure)
            .configure(shelters::configure)
            .configure(reports::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Map a typed store failure to its HTTP representation.
///
/// NotFound is distinct from an empty result (404 vs 200 with an empty
/// array); Unavailable is a transient 503 the caller may retry.
pub(crate) fn store_error_response(err: StoreError) -> HttpResponse {
    let (status, code) = match &err {
        StoreError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
        StoreError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
        StoreError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
        StoreError::Database(_) | StoreError::MigrateError(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "store_error")
        }
    };

    if status.is_server_error() {
        tracing::error!("Store failure: {}", err);
    }

    HttpResponse::build(status).json(ErrorResponse {
        error: code.to_string(),
        message: err.to_string(),
        status_code: status.as_u16(),
    })
}

pub(crate) fn invalid_coordinate_response(err: InvalidCoordinate) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "invalid_coordinate".to_string(),
        message: err.to_string(),
        status_code: 400,
    })
}

pub(crate) fn validation_error_response(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "validation_failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_shape() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
