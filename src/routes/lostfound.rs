use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::models::{CreateEntryRequest, EntryListQuery, GeoPoint};
use crate::routes::{
    invalid_coordinate_response, store_error_response, validation_error_response, AppState,
};

/// Configure lost-and-found routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/lostfound", web::post().to(create_entry))
        .route("/lostfound", web::get().to(list_entries))
        .route("/lostfound/{id}/matches", web::get().to(find_matches))
        .route(
            "/lostfound/{id}/confirm/{other_id}",
            web::post().to(confirm_match),
        );
}

/// Create a lost-or-found entry
///
/// POST /api/v1/lostfound
async fn create_entry(
    state: web::Data<AppState>,
    req: web::Json<CreateEntryRequest>,
) -> impl Responder {
    let req = req.into_inner();

    if let Err(errors) = req.validate() {
        return validation_error_response(errors);
    }

    let location = match GeoPoint::new(req.coords[0], req.coords[1]) {
        Ok(point) => point,
        Err(e) => return invalid_coordinate_response(e),
    };

    match state.store.create_entry(&req, location).await {
        Ok(entry) => HttpResponse::Created().json(entry),
        Err(e) => store_error_response(e),
    }
}

/// List entries, optionally filtered by kind
///
/// GET /api/v1/lostfound?kind=lost|found
async fn list_entries(
    state: web::Data<AppState>,
    query: web::Query<EntryListQuery>,
) -> impl Responder {
    match state.store.list_entries(query.kind).await {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(e) => store_error_response(e),
    }
}

/// Propose counterpart candidates for an entry
///
/// GET /api/v1/lostfound/{id}/matches
///
/// Returns open entries of the opposite kind within the match radius whose
/// titles loosely overlap the base entry's, nearest-first. An empty array is
/// a valid result; an unknown id is a 404.
async fn find_matches(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let entry_id = path.into_inner();

    let base = match state.store.get_entry(entry_id).await {
        Ok(entry) => entry,
        Err(e) => return store_error_response(e),
    };

    let candidates = match state
        .store
        .find_match_candidates(&base, state.matcher.radius_m(), state.matcher.candidate_limit())
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => return store_error_response(e),
    };

    let matches = state.matcher.filter_candidates(&base, candidates);

    tracing::info!(
        "Entry {}: proposing {} match candidates",
        entry_id,
        matches.len()
    );

    HttpResponse::Ok().json(matches)
}

/// Confirm a match between two entries
///
/// POST /api/v1/lostfound/{id}/confirm/{other_id}
async fn confirm_match(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> impl Responder {
    let (entry_id, other_id) = path.into_inner();

    match state.store.confirm_match(entry_id, other_id).await {
        Ok((a, b)) => HttpResponse::Ok().json([a, b]),
        Err(e) => store_error_response(e),
    }
}
