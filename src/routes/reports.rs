use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{CreateReportRequest, GeoPoint, NearQuery, ReportListQuery};
use crate::routes::{
    invalid_coordinate_response, store_error_response, validation_error_response, AppState,
};

/// Configure disaster report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/reports", web::post().to(create_report))
        .route("/reports", web::get().to(list_reports))
        .route("/reports/near", web::get().to(find_near));
}

/// File a disaster report
///
/// POST /api/v1/reports
async fn create_report(
    state: web::Data<AppState>,
    req: web::Json<CreateReportRequest>,
) -> impl Responder {
    let req = req.into_inner();

    if let Err(errors) = req.validate() {
        return validation_error_response(errors);
    }

    let location = match GeoPoint::new(req.coords[0], req.coords[1]) {
        Ok(point) => point,
        Err(e) => return invalid_coordinate_response(e),
    };

    match state.store.create_report(&req, location).await {
        Ok(report) => HttpResponse::Created().json(report),
        Err(e) => store_error_response(e),
    }
}

/// List reports, newest first, with optional kind/severity/status filters
///
/// GET /api/v1/reports?kind=..&severity=..&status=..
async fn list_reports(
    state: web::Data<AppState>,
    query: web::Query<ReportListQuery>,
) -> impl Responder {
    match state
        .store
        .list_reports(query.kind, query.severity, query.status)
        .await
    {
        Ok(reports) => HttpResponse::Ok().json(reports),
        Err(e) => store_error_response(e),
    }
}

/// Reports near a point, nearest-first
///
/// GET /api/v1/reports/near?lng=..&lat=..&maxDistance=..
async fn find_near(state: web::Data<AppState>, query: web::Query<NearQuery>) -> impl Responder {
    let origin = match GeoPoint::new(query.lng, query.lat) {
        Ok(point) => point,
        Err(e) => return invalid_coordinate_response(e),
    };

    let radius_m = query
        .max_distance
        .unwrap_or(state.matching.near_radius_m);

    match state
        .store
        .find_reports_near(origin, radius_m, state.matching.report_limit)
        .await
    {
        Ok(reports) => HttpResponse::Ok().json(reports),
        Err(e) => store_error_response(e),
    }
}
