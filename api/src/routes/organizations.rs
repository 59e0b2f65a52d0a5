//! Organization profile routes.

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::OrganizationRequest;
use crate::handlers::{handle_domain_error, validation_errors_response};
use crate::middleware::Session;

/// GET /api/organizations/{id}
pub async fn organization(
    state: web::Data<AppState>,
    Session(session): Session,
    path: web::Path<i64>,
) -> HttpResponse {
    match state.user_service.organization(&session, path.into_inner()).await {
        Ok(organization) => HttpResponse::Ok().json(organization),
        Err(error) => handle_domain_error(&error),
    }
}

/// PUT /api/organizations/{id}
///
/// Allowed only for users whose account belongs to the organization.
pub async fn update_organization(
    state: web::Data<AppState>,
    Session(session): Session,
    path: web::Path<i64>,
    request: web::Json<OrganizationRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return validation_errors_response(&errors);
    }

    match state
        .user_service
        .update_organization(&session, path.into_inner(), request.into())
        .await
    {
        Ok(organization) => HttpResponse::Ok().json(organization),
        Err(error) => handle_domain_error(&error),
    }
}
