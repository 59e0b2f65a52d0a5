//! Maps domain errors onto HTTP responses.

use actix_web::{http::StatusCode, HttpResponse};
use fl_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use fl_shared::errors::{error_codes, ErrorResponse};
use validator::ValidationErrors;

use crate::dto::ErrorResponseExt;

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Forbidden { .. } => StatusCode::FORBIDDEN,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Auth(auth) => match auth {
            AuthError::AuthenticationFailed => StatusCode::FORBIDDEN,
            AuthError::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            AuthError::UserAlreadyExists { .. } => StatusCode::CONFLICT,
            AuthError::InsufficientPermissions => StatusCode::FORBIDDEN,
            AuthError::PasswordsDoNotMatch => StatusCode::BAD_REQUEST,
            AuthError::PasswordResetUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        },
        DomainError::Token(token) => match token {
            TokenError::TokenGenerationFailed | TokenError::UnsupportedAlgorithm { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::UNAUTHORIZED,
        },
        DomainError::Validation(validation) => match validation {
            ValidationError::DuplicateValue { .. } => StatusCode::CONFLICT,
            _ => StatusCode::BAD_REQUEST,
        },
    }
}

/// Convert a domain error into an HTTP response
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let status = status_for(error);
    if status.is_server_error() {
        tracing::error!(error = %error, "Request failed");
    } else {
        tracing::debug!(error = %error, status = status.as_u16(), "Request rejected");
    }
    error.to_error_response().to_response(status)
}

/// 400 response for request bodies rejected by `validator`
pub fn validation_errors_response(errors: &ValidationErrors) -> HttpResponse {
    let fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    ErrorResponse::new(error_codes::VALIDATION_ERROR, "Request validation failed")
        .add_detail("fields", fields)
        .to_response(StatusCode::BAD_REQUEST)
}
