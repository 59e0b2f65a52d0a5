//! Authentication profile value object returned by check-login and login.

use serde::{Deserialize, Serialize};

use crate::domain::entities::user::{Role, User};

/// What the client learns about the current principal
///
/// The anonymous form serializes as
/// `{"email": null, "roles": [], "organization": null}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthProfile {
    pub email: Option<String>,

    pub roles: Vec<Role>,

    /// Organization id of the user's account, if any
    pub organization: Option<i64>,
}

impl AuthProfile {
    /// Profile of a session without a principal
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Builds the profile of an authenticated user
    ///
    /// # Arguments
    ///
    /// * `user` - The authenticated user
    /// * `organization` - Organization id of the user's account
    pub fn for_user(user: &User, organization: Option<i64>) -> Self {
        Self {
            email: Some(user.email.clone()),
            roles: user.roles.clone(),
            organization,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.email.is_none()
    }
}
