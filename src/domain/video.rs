use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, VideoId, VideoName};

/// Canonical storage format of `vod_time`.
pub const VOD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const VOD_TIME_INPUT_FORMATS: &[&str] = &[
    VOD_TIME_FORMAT,
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Catalog entry as stored in `vod_list`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub vod_id: VideoId,
    pub vod_name: VideoName,
    pub type_id: CategoryId,
    /// Denormalized copy of the category name at ingestion time.
    pub type_name: String,
    pub vod_en: Option<String>,
    pub vod_time: Option<String>,
    pub vod_remarks: Option<String>,
    pub vod_play_from: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert or replace a [`Video`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewVideo {
    pub vod_id: VideoId,
    pub vod_name: VideoName,
    pub type_id: CategoryId,
    pub type_name: String,
    pub vod_en: Option<String>,
    /// Already normalized with [`normalize_vod_time`].
    pub vod_time: String,
    pub vod_remarks: Option<String>,
    pub vod_play_from: Option<String>,
}

/// Number of videos filed under one (denormalized) category name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryVideoCount {
    pub type_name: String,
    pub count: i64,
}

/// Reformat an upstream display time as `YYYY-MM-DD HH:MM:SS`.
///
/// Accepts the common date-time layouts, RFC 3339, a bare date (midnight) and
/// unix seconds. Anything else, including an absent value, yields `now`.
pub fn normalize_vod_time(raw: Option<&str>, now: NaiveDateTime) -> String {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(parse_vod_time)
        .unwrap_or(now)
        .format(VOD_TIME_FORMAT)
        .to_string()
}

fn parse_vod_time(value: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_utc());
    }

    for format in VOD_TIME_INPUT_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    value
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|parsed| parsed.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap()
    }

    #[test]
    fn keeps_canonical_times() {
        assert_eq!(
            normalize_vod_time(Some("2024-03-02 10:11:12"), now()),
            "2024-03-02 10:11:12"
        );
    }

    #[test]
    fn reformats_other_layouts() {
        assert_eq!(
            normalize_vod_time(Some("2024-03-02T10:11:12Z"), now()),
            "2024-03-02 10:11:12"
        );
        assert_eq!(
            normalize_vod_time(Some("2024/03/02 10:11:12"), now()),
            "2024-03-02 10:11:12"
        );
        assert_eq!(
            normalize_vod_time(Some("2024-03-02"), now()),
            "2024-03-02 00:00:00"
        );
        assert_eq!(
            normalize_vod_time(Some("1709374272"), now()),
            "2024-03-02 10:11:12"
        );
    }

    #[test]
    fn falls_back_to_now() {
        assert_eq!(
            normalize_vod_time(Some("yesterday"), now()),
            "2024-05-01 08:30:00"
        );
        assert_eq!(normalize_vod_time(None, now()), "2024-05-01 08:30:00");
        assert_eq!(normalize_vod_time(Some("  "), now()), "2024-05-01 08:30:00");
    }
}
