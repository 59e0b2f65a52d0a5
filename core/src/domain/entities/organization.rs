//! Organizations posting ads, and the accounts linking users to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An organization registered on the marketplace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: i64,

    /// Registered organization number, validated before creation
    pub organization_number: u64,

    pub name: String,

    pub address: String,

    pub zip_code: String,

    pub city: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Organization {
    /// Creates a new organization; the repository assigns the id
    pub fn new(
        organization_number: u64,
        name: impl Into<String>,
        address: impl Into<String>,
        zip_code: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            organization_number,
            name: name.into(),
            address: address.into(),
            zip_code: zip_code.into(),
            city: city.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl std::fmt::Display for Organization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.name, self.organization_number)
    }
}

/// Membership of a user in exactly one organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,

    pub user_id: i64,

    pub organization_id: i64,

    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(user_id: i64, organization_id: i64) -> Self {
        Self {
            id: 0,
            user_id,
            organization_id,
            created_at: Utc::now(),
        }
    }
}
