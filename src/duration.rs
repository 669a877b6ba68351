//! Trip length calculation from the form's start and end dates

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Day count used when dates are missing or unusable
pub const FALLBACK_TRIP_DAYS: u32 = 5;

/// Upper bound on days requested from the model per generation
pub const MAX_PROMPT_DAYS: u32 = 7;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Both derived day counts for one trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDuration {
    /// Inclusive length of the trip
    pub diff_days: u32,
    /// `diff_days` capped to [`MAX_PROMPT_DAYS`]
    pub total_days: u32,
}

impl TripDuration {
    #[must_use]
    pub fn from_dates(start: Option<&str>, end: Option<&str>) -> Self {
        let diff_days = trip_length_days(start, end);
        Self {
            diff_days,
            total_days: prompt_day_count(diff_days),
        }
    }
}

/// Inclusive number of days between `start` and `end`.
///
/// Computes `ceil((end - start) / 1 day) + 1`. Missing or unparseable input,
/// or an end before the start, yields [`FALLBACK_TRIP_DAYS`].
#[must_use]
pub fn trip_length_days(start: Option<&str>, end: Option<&str>) -> u32 {
    let (Some(start), Some(end)) = (start.and_then(parse_date), end.and_then(parse_date)) else {
        return FALLBACK_TRIP_DAYS;
    };

    let seconds = (end - start).num_seconds();
    if seconds < 0 {
        return FALLBACK_TRIP_DAYS;
    }

    let whole_days = seconds.div_euclid(SECONDS_PER_DAY);
    let days = if seconds.rem_euclid(SECONDS_PER_DAY) > 0 {
        whole_days + 1
    } else {
        whole_days
    };

    u32::try_from(days + 1).unwrap_or(u32::MAX)
}

/// Number of day blocks to request from the model
#[must_use]
pub fn prompt_day_count(diff_days: u32) -> u32 {
    diff_days.clamp(1, MAX_PROMPT_DAYS)
}

/// Parse a calendar date, optionally with a time of day.
///
/// Offsets on RFC 3339 input are dropped so both ends compare in the same
/// local context.
fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Some(date_time.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}
