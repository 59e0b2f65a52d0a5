use actix_web::{web, HttpResponse};
use fl_core::{AuthError, DomainError};
use validator::Validate;

use crate::app::AppState;
use crate::dto::{LoginErrorResponse, LoginRequest};
use crate::handlers::handle_domain_error;
use crate::middleware::with_session;

/// Handler for POST /api/auth/login
///
/// On success the response carries the user's profile and the session
/// middleware sets the token cookie.
///
/// # Request Body
///
/// ```json
/// { "email": "seller@foodloopz.se", "password": "..." }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "email": "seller@foodloopz.se", "roles": ["ROLE_ACCOUNT"], "organization": 1 }
/// ```
///
/// ## Errors
/// - 403 Forbidden: `{"errorMessage": "User could not be authenticated"}`
pub async fn login(state: web::Data<AppState>, request: web::Json<LoginRequest>) -> HttpResponse {
    let request = request.into_inner();
    if request.validate().is_err() {
        return HttpResponse::Forbidden().json(LoginErrorResponse::authentication_failed());
    }

    match state.auth_service.login(&request.email, &request.password).await {
        Ok(outcome) => with_session(HttpResponse::Ok().json(outcome.profile), outcome.session),
        Err(DomainError::Auth(AuthError::AuthenticationFailed)) => {
            HttpResponse::Forbidden().json(LoginErrorResponse::authentication_failed())
        }
        Err(error) => handle_domain_error(&error),
    }
}
