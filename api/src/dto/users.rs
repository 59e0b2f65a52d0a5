use chrono::{DateTime, Utc};
use fl_core::{OrganizationCommand, Role, SaveUserCommand, User};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationRequest {
    pub organization_number: u64,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub city: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveUserRequest {
    #[serde(default)]
    pub user_id: Option<i64>,

    #[validate(length(min = 3, max = 254))]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 150))]
    pub username: Option<String>,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    pub verify_password: Option<String>,

    #[serde(default)]
    pub organization: Option<OrganizationRequest>,
}

impl From<SaveUserRequest> for SaveUserCommand {
    fn from(request: SaveUserRequest) -> Self {
        Self {
            user_id: request.user_id,
            email: request.email,
            username: request.username,
            first_name: request.first_name,
            last_name: request.last_name,
            password: request.password,
            verify_password: request.verify_password,
            organization: request.organization.map(OrganizationCommand::from),
        }
    }
}

impl From<OrganizationRequest> for OrganizationCommand {
    fn from(request: OrganizationRequest) -> Self {
        Self {
            organization_number: request.organization_number,
            name: request.name,
            address: request.address,
            zip_code: request.zip_code,
            city: request.city,
        }
    }
}

/// Public view of a user; never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            roles: user.roles.clone(),
            created_at: user.created_at,
        }
    }
}
