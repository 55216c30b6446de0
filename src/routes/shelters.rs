use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{CreateShelterRequest, GeoPoint, NearQuery, ShelterListQuery};
use crate::routes::{
    invalid_coordinate_response, store_error_response, validation_error_response, AppState,
};

/// Configure shelter routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/shelters", web::post().to(create_shelter))
        .route("/shelters", web::get().to(list_shelters))
        .route("/shelters/near", web::get().to(find_near));
}

/// Register a shelter
///
/// POST /api/v1/shelters
async fn create_shelter(
    state: web::Data<AppState>,
    req: web::Json<CreateShelterRequest>,
) -> impl Responder {
    let req = req.into_inner();

    if let Err(errors) = req.validate() {
        return validation_error_response(errors);
    }

    let location = match GeoPoint::new(req.coords[0], req.coords[1]) {
        Ok(point) => point,
        Err(e) => return invalid_coordinate_response(e),
    };

    match state.store.create_shelter(&req, location).await {
        Ok(shelter) => HttpResponse::Created().json(shelter),
        Err(e) => store_error_response(e),
    }
}

/// List shelters, optionally filtered by verification state
///
/// GET /api/v1/shelters?isVerified=true|false
async fn list_shelters(
    state: web::Data<AppState>,
    query: web::Query<ShelterListQuery>,
) -> impl Responder {
    match state.store.list_shelters(query.is_verified).await {
        Ok(shelters) => HttpResponse::Ok().json(shelters),
        Err(e) => store_error_response(e),
    }
}

/// Shelters near a point, nearest-first
///
/// GET /api/v1/shelters/near?lng=..&lat=..&maxDistance=..
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
        .find_shelters_near(origin, radius_m, state.matching.shelter_limit)
        .await
    {
        Ok(shelters) => HttpResponse::Ok().json(shelters),
        Err(e) => store_error_response(e),
    }
}
