use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::{ChangePasswordRequest, MessageResponse, ResetPasswordRequest};
use crate::handlers::{handle_domain_error, validation_errors_response};
use crate::middleware::Authenticated;
use fl_core::SessionContext;

/// Handler for POST /api/auth/password-change
pub async fn change_password(
    state: web::Data<AppState>,
    Authenticated(principal): Authenticated,
    request: web::Json<ChangePasswordRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return validation_errors_response(&errors);
    }

    let session = SessionContext::Authenticated(principal);
    match state.auth_service.change_password(&session, request.into()).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Password changed")),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for POST /api/auth/password-reset
///
/// Reset links need email delivery, so this always answers with
/// "Password could not be reset".
pub async fn reset_password(
    state: web::Data<AppState>,
    request: Option<web::Json<ResetPasswordRequest>>,
) -> HttpResponse {
    let email = request
        .map(|r| r.into_inner())
        .unwrap_or_default()
        .email
        .unwrap_or_default();

    match state.auth_service.reset_password(&email).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Password reset")),
        Err(error) => handle_domain_error(&error),
    }
}
