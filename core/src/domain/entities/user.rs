//! User entity representing a registered marketplace user.
//!
//! The email doubles as the login name; authentication is based on email
//! and password only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Roles granted to users through their organization account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Member of an organization account
    #[serde(rename = "ROLE_ACCOUNT")]
    Account,
    /// Administrator of an organization account
    #[serde(rename = "ROLE_ACCOUNT_ADMIN")]
    AccountAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Account => "ROLE_ACCOUNT",
            Role::AccountAdmin => "ROLE_ACCOUNT_ADMIN",
        }
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identifier assigned by the repository
    pub id: i64,

    /// Email address, unique across users
    pub email: String,

    /// Display user name
    pub username: String,

    pub first_name: String,

    pub last_name: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Inactive users cannot log in and their tokens are not renewed
    pub is_active: bool,

    pub roles: Vec<Role>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new active user; the repository assigns the id
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            email: email.into(),
            username: username.into(),
            first_name: String::new(),
            last_name: String::new(),
            password_hash: password_hash.into(),
            is_active: true,
            roles: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the user's names
    pub fn with_names(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// Grants a role if not already present
    pub fn grant_role(&mut self, role: Role) {
        if !self.roles.contains(&role) {
            self.roles.push(role);
            self.updated_at = Utc::now();
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Replaces the password hash
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.updated_at = Utc::now();
    }

    /// Deactivates the account
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Marks the user as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
