//! DTOs for link management and analytics endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Click;

/// Body of `POST /links` and `POST /{code}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LongUrlRequest {
    pub long_url: String,
}

#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    pub short_url: String,
    pub original_url: String,
    pub link_id: i64,
}

/// A link as shown to its owner after an edit or toggle.
#[derive(Debug, Serialize)]
pub struct LinkView {
    pub id: i64,
    pub short_url: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub enabled: bool,
}

/// Listing entry: [`LinkView`] plus the live click count.
#[derive(Debug, Serialize)]
pub struct LinkListItem {
    #[serde(flatten)]
    pub link: LinkView,
    pub clicks: i64,
}

/// One recorded visit in `GET /analytics/{code}`.
#[derive(Debug, Serialize)]
pub struct ClickEventView {
    pub id: i64,
    pub short_code: String,
    pub timestamp: DateTime<Utc>,
    pub device_type: String,
    pub location: String,
}

impl From<Click> for ClickEventView {
    fn from(click: Click) -> Self {
        Self {
            id: click.id,
            short_code: click.short_code,
            timestamp: click.timestamp,
            device_type: click.device_type,
            location: click.location,
        }
    }
}
