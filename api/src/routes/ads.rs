//! Marketplace ad and category routes.

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::{SaveAdRequest, SearchAdsRequest};
use crate::handlers::{handle_domain_error, validation_errors_response};
use crate::middleware::Session;

/// GET /api/ads/top
pub async fn top_ads(state: web::Data<AppState>) -> HttpResponse {
    match state.marketplace_service.top_ads().await {
        Ok(ads) => HttpResponse::Ok().json(ads),
        Err(error) => handle_domain_error(&error),
    }
}

/// POST /api/ads/search
pub async fn search_ads(
    state: web::Data<AppState>,
    request: web::Json<SearchAdsRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return validation_errors_response(&errors);
    }

    match state
        .marketplace_service
        .search_ads(&request.search_phrase, request.category_id)
        .await
    {
        Ok(ads) => HttpResponse::Ok().json(ads),
        Err(error) => handle_domain_error(&error),
    }
}

/// GET /api/ads/{id}
pub async fn view_ad(state: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
    match state.marketplace_service.view_ad(path.into_inner()).await {
        Ok(ad) => HttpResponse::Ok().json(ad),
        Err(error) => handle_domain_error(&error),
    }
}

/// POST /api/ads
///
/// Creates an ad, or updates it when `adId` is given. Requires a logged in
/// user with an organization account.
pub async fn save_update_ad(
    state: web::Data<AppState>,
    Session(session): Session,
    request: web::Json<SaveAdRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return validation_errors_response(&errors);
    }

    match state
        .marketplace_service
        .save_update_ad(&session, request.into())
        .await
    {
        Ok(ad) => HttpResponse::Ok().json(ad),
        Err(error) => handle_domain_error(&error),
    }
}

/// GET /api/categories
pub async fn categories(state: web::Data<AppState>) -> HttpResponse {
    match state.marketplace_service.categories().await {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(error) => handle_domain_error(&error),
    }
}
