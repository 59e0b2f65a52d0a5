use fl_core::ChangePasswordCommand;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Credentials; the email doubles as the user name
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Body of a rejected login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginErrorResponse {
    pub error_message: String,
}

impl LoginErrorResponse {
    pub fn authentication_failed() -> Self {
        Self {
            error_message: "User could not be authenticated".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub old_password: String,

    #[validate(length(min = 1))]
    pub new_password: String,

    pub verify_password: String,
}

impl From<ChangePasswordRequest> for ChangePasswordCommand {
    fn from(request: ChangePasswordRequest) -> Self {
        Self {
            old_password: request.old_password,
            new_password: request.new_password,
            verify_password: request.verify_password,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
