use chrono::{DateTime, Local, TimeZone, Utc};

use crate::domain::Timestamp;
use crate::error::ReportError;

/// Days below which a token counts as new.
pub const NEW_TOKEN_DAYS: f64 = 30.0;

/// Parses `detectedAt`: RFC 3339, falling back to epoch milliseconds.
pub fn parse_detected_at(raw: &str) -> Result<DateTime<Utc>, ReportError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    raw.parse::<i64>()
        .ok()
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .ok_or_else(|| ReportError::InvalidTimestamp(raw.to_string()))
}

/// Missing `detectedAt` is `None`; a present but unreadable one is an error.
pub fn resolve_detected_at(ts: Option<&Timestamp>) -> Result<Option<DateTime<Utc>>, ReportError> {
    match ts {
        None => Ok(None),
        Some(Timestamp::Text(raw)) => parse_detected_at(raw).map(Some),
        Some(Timestamp::Millis(ms)) => Utc
            .timestamp_millis_opt(*ms)
            .single()
            .map(Some)
            .ok_or_else(|| ReportError::InvalidTimestamp(ms.to_string())),
    }
}

/// Fractional days between `detected` and `now`.
pub fn age_days(detected: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - detected).num_milliseconds() as f64 / (1000.0 * 60.0 * 60.0 * 24.0)
}

/// Creation timestamp in the configured zone, or local time.
pub fn format_created(detected: DateTime<Utc>, tz: Option<chrono_tz::Tz>) -> String {
    const FMT: &str = "%Y-%m-%d %H:%M:%S %Z";
    match tz {
        Some(tz) => detected.with_timezone(&tz).format(FMT).to_string(),
        None => detected.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S %:z").to_string(),
    }
}
