use actix_web::{web, HttpResponse};
use fl_core::{AuthError, DomainError};
use validator::Validate;

use crate::app::AppState;
use crate::dto::{SaveUserRequest, UserResponse};
use crate::handlers::{handle_domain_error, validation_errors_response};
use crate::middleware::{with_session, Session};

/// Handler for POST /api/users
///
/// Registers a new user when called anonymously, otherwise updates the
/// caller's own user. An email change replaces the session cookie.
pub async fn save_update_user(
    state: web::Data<AppState>,
    Session(session): Session,
    request: web::Json<SaveUserRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return validation_errors_response(&errors);
    }

    match state.user_service.save_update_user(&session, request.into()).await {
        Ok(saved) => with_session(HttpResponse::Ok().json(UserResponse::from(&saved.user)), saved.session),
        Err(error) => handle_domain_error(&error),
    }
}

/// GET /api/users/{id}
pub async fn user_profile(
    state: web::Data<AppState>,
    Session(session): Session,
    path: web::Path<i64>,
) -> HttpResponse {
    match state.user_service.user_profile(&session, path.into_inner()).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(&user)),
        Err(error) => handle_domain_error(&error),
    }
}

/// PUT /api/users/{id}
///
/// Only the owner may change a profile. Never registers a user.
pub async fn update_user_profile(
    state: web::Data<AppState>,
    Session(session): Session,
    path: web::Path<i64>,
    request: web::Json<SaveUserRequest>,
) -> HttpResponse {
    if session.is_anonymous() {
        return handle_domain_error(&DomainError::Auth(AuthError::AuthenticationRequired));
    }

    let mut request = request.into_inner();
    if let Err(errors) = request.validate() {
        return validation_errors_response(&errors);
    }
    request.user_id = Some(path.into_inner());
    request.organization = None;

    match state.user_service.save_update_user(&session, request.into()).await {
        Ok(saved) => with_session(HttpResponse::Ok().json(UserResponse::from(&saved.user)), saved.session),
        Err(error) => handle_domain_error(&error),
    }
}
