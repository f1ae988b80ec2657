//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL owned by a user.
///
/// `short_code` is globally unique and never changes once assigned.
/// `original_url` and `enabled` can be changed by the owner only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub owner_user_id: i64,
    pub created_at: DateTime<Utc>,
    pub enabled: bool,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_code: String,
        owner_user_id: i64,
        created_at: DateTime<Utc>,
        enabled: bool,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            owner_user_id,
            created_at,
            enabled,
        }
    }

    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_user_id == user_id
    }
}

/// Input data for creating a new link. New links are always enabled.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub original_url: String,
    pub short_code: String,
    pub owner_user_id: i64,
}

/// A link together with its live click count, as returned by owner listings.
#[derive(Debug, Clone)]
pub struct LinkSummary {
    pub link: Link,
    pub clicks: i64,
}
