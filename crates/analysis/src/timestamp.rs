use chrono::{DateTime, NaiveDateTime, Utc};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Render an ISO-8601 timestamp as `YYYY-MM-DD HH:MM:SS UTC`.
///
/// Offset-carrying values are converted to UTC; naive values are taken as
/// UTC. Anything unparseable is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Utc).format(DISPLAY_FORMAT).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return naive.format(DISPLAY_FORMAT).to_string();
        }
    }
    raw.to_string()
}
