use chrono::{DateTime, Utc};

use crate::error::{FolioError, Result};

/// Calendar date in en-US long form, e.g. `January 5, 2024`. Always UTC.
pub fn format_post_date(ts: &DateTime<Utc>) -> String {
    ts.format("%B %-d, %Y").to_string()
}

/// Parse an RFC 3339 timestamp as stored by the CMS.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| FolioError::BadRequest(format!("invalid timestamp {s:?}: {e}")))
}
