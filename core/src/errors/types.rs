//! Domain-specific error types for authentication, tokens and validation

use fl_shared::errors::{error_codes, ErrorResponse};
use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email, wrong password or inactive account. One variant for
    /// all three so callers cannot probe which emails are registered.
    #[error("User could not be authenticated")]
    AuthenticationFailed,

    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("User already exists: {email}")]
    UserAlreadyExists { email: String },

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Passwords do not match")]
    PasswordsDoNotMatch,

    #[error("Password could not be reset")]
    PasswordResetUnavailable,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token is older than the renewal limit")]
    RenewalLimitExceeded,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Unsupported signing algorithm: {algorithm}")]
    UnsupportedAlgorithm { algorithm: String },
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid format for field: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid organization number: {number}")]
    InvalidOrganizationNumber { number: u64 },

    #[error("Duplicate value for field: {field}")]
    DuplicateValue { field: String },
}

impl From<&AuthError> for ErrorResponse {
    fn from(err: &AuthError) -> Self {
        let error_code = match err {
            AuthError::AuthenticationFailed => error_codes::AUTHENTICATION_FAILED,
            AuthError::AuthenticationRequired => error_codes::UNAUTHORIZED,
            AuthError::UserAlreadyExists { .. } => error_codes::CONFLICT,
            AuthError::InsufficientPermissions => error_codes::FORBIDDEN,
            AuthError::PasswordsDoNotMatch => error_codes::VALIDATION_ERROR,
            AuthError::PasswordResetUnavailable => "PASSWORD_RESET_UNAVAILABLE",
        };
        ErrorResponse::new(error_code, err.to_string())
    }
}

impl From<&TokenError> for ErrorResponse {
    fn from(err: &TokenError) -> Self {
        let error_code = match err {
            TokenError::InvalidTokenFormat => "INVALID_TOKEN_FORMAT",
            TokenError::InvalidSignature => "INVALID_SIGNATURE",
            TokenError::RenewalLimitExceeded => "TOKEN_EXPIRED",
            TokenError::TokenGenerationFailed | TokenError::UnsupportedAlgorithm { .. } => {
                error_codes::INTERNAL_ERROR
            }
        };
        ErrorResponse::new(error_code, err.to_string())
    }
}

impl From<&ValidationError> for ErrorResponse {
    fn from(err: &ValidationError) -> Self {
        let response = ErrorResponse::new(error_codes::VALIDATION_ERROR, err.to_string());
        match err {
            ValidationError::RequiredField { field }
            | ValidationError::InvalidFormat { field }
            | ValidationError::DuplicateValue { field } => response.add_detail("field", field),
            ValidationError::InvalidEmail => response.add_detail("field", "email"),
            ValidationError::InvalidOrganizationNumber { .. } => {
                response.add_detail("field", "organizationNumber")
            }
        }
    }
}
