//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Value stored when device type or location cannot be derived from the request.
pub const UNKNOWN: &str = "Unknown";

/// A recorded redirect of an enabled link. Click rows are append-only.
///
/// `short_code` is a soft reference: it is checked against an existing link
/// at insert time but not enforced by a foreign key.
#[derive(Debug, Clone, Serialize)]
pub struct Click {
    pub id: i64,
    pub short_code: String,
    pub timestamp: DateTime<Utc>,
    pub device_type: String,
    pub location: String,
}

/// Input data for recording a click. The timestamp is set by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClick {
    pub short_code: String,
    pub device_type: String,
    pub location: String,
}

impl NewClick {
    /// Builds a click, falling back to [`UNKNOWN`] for missing metadata.
    pub fn new(short_code: &str, device_type: Option<String>, location: Option<String>) -> Self {
        Self {
            short_code: short_code.to_string(),
            device_type: device_type.unwrap_or_else(|| UNKNOWN.to_string()),
            location: location.unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }
}
