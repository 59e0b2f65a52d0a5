use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::handlers::handle_domain_error;
use crate::middleware::Session;

/// Handler for GET /api/auth/check-login
///
/// Returns the profile of the current principal, or
/// `{"email": null, "roles": [], "organization": null}` when anonymous.
pub async fn check_login(state: web::Data<AppState>, Session(session): Session) -> HttpResponse {
    match state.auth_service.profile(&session).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(error) => handle_domain_error(&error),
    }
}
