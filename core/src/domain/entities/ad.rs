//! Advertisements and the categories they are filed under.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ad category, optionally nested under a parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,

    pub name: String,

    pub parent_id: Option<i64>,
}

impl Category {
    pub fn new(name: impl Into<String>, parent_id: Option<i64>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            parent_id,
        }
    }
}

/// An advertisement posted by an organization account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    pub id: i64,

    pub heading: String,

    pub text: String,

    /// Reference to an externally hosted image
    pub image: Option<String>,

    pub category_id: i64,

    pub organization_id: i64,

    /// Account that posted the ad; only it may modify the ad
    pub account_id: i64,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Ad {
    /// Creates a new ad; the repository assigns the id
    pub fn new(
        heading: impl Into<String>,
        text: impl Into<String>,
        image: Option<String>,
        category_id: i64,
        organization_id: i64,
        account_id: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            heading: heading.into(),
            text: text.into(),
            image,
            category_id,
            organization_id,
            account_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Case-insensitive match of `phrase` against heading or text
    pub fn matches_phrase(&self, phrase: &str) -> bool {
        let phrase = phrase.to_lowercase();
        self.heading.to_lowercase().contains(&phrase) || self.text.to_lowercase().contains(&phrase)
    }

    pub fn is_owned_by(&self, account_id: i64) -> bool {
        self.account_id == account_id
    }

    /// Replaces the editable fields
    pub fn apply_changes(
        &mut self,
        heading: impl Into<String>,
        text: impl Into<String>,
        image: Option<String>,
        category_id: i64,
    ) {
        self.heading = heading.into();
        self.text = text.into();
        self.image = image;
        self.category_id = category_id;
        self.updated_at = Utc::now();
    }
}
