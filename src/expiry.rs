//! Deadline parsing and expiry classification.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::ndjson::ResultRecord;

const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a deadline string into a UTC instant.
///
/// Accepts RFC 3339 with an offset (seconds optional), naive date-times and
/// bare dates. Values without an offset are read as UTC; bare dates mean
/// midnight.
pub fn parse_deadline(deadline: &str) -> Option<DateTime<Utc>> {
    let deadline = deadline.trim();
    if deadline.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(deadline) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(deadline, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(deadline, format) {
            return Some(naive.and_utc());
        }
    }

    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(deadline, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    })
}

/// Whether the record's deadline lies strictly before `now`.
///
/// Missing or unreadable deadlines are never expired.
pub fn classify(record: &ResultRecord, now: DateTime<Utc>) -> bool {
    match record.deadline().and_then(parse_deadline) {
        Some(deadline) => deadline < now,
        None => {
            if let Some(raw) = record.deadline() {
                tracing::debug!("Unparseable deadline {:?}; treating as open", raw);
            }
            false
        }
    }
}
