//! Time inputs and their reduction to a bucket string.
//!
//! Every key is derived from a *bucket*: a point in time formatted with a
//! coarse, numeric-only pattern such as `%Y-%m-%d`. All instants that format
//! to the same string produce the same key, which is what makes keys rotate
//! once per bucket instead of once per second.
//!
//! Only numeric directives should be used. Month and weekday names depend on
//! the locale of the formatting side and would make client and server
//! disagree; this is not checked. Bucket lists are sorted as strings, so the
//! pattern should also be fixed-width and ordered from the most to the least
//! significant field for that order to be chronological.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, NaiveDateTime, Utc};

use crate::error::{ApiKeyError, Result};
use crate::trace::{note, TraceSink};

/// Bucket pattern used when the caller doesn't pick one: one key per day.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// The time a key is derived for.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeInput {
    /// An already formatted bucket, used verbatim.
    Bucket(String),
    /// Calendar fields, formatted with the date format.
    BrokenDown(NaiveDateTime),
    /// Seconds since the Unix epoch, possibly fractional.
    Timestamp(f64),
}

impl From<&str> for TimeInput {
    fn from(bucket: &str) -> Self {
        TimeInput::Bucket(bucket.to_string())
    }
}

impl From<String> for TimeInput {
    fn from(bucket: String) -> Self {
        TimeInput::Bucket(bucket)
    }
}

impl From<NaiveDateTime> for TimeInput {
    fn from(time: NaiveDateTime) -> Self {
        TimeInput::BrokenDown(time)
    }
}

impl From<f64> for TimeInput {
    fn from(secs: f64) -> Self {
        TimeInput::Timestamp(secs)
    }
}

impl From<i64> for TimeInput {
    fn from(secs: i64) -> Self {
        TimeInput::Timestamp(secs as f64)
    }
}

/// Format a broken-down time into a bucket string.
///
/// Fails with [`ApiKeyError::Format`] if the pattern contains a directive
/// chrono doesn't understand, or one that needs data a naive time lacks
/// (e.g. `%z`).
pub fn format_time(time: &NaiveDateTime, date_format: &str) -> Result<String> {
    let format_error = || ApiKeyError::Format {
        format: date_format.to_string(),
    };

    let items: Vec<Item<'_>> = StrftimeItems::new(date_format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(format_error());
    }

    let mut bucket = String::new();
    write!(bucket, "{}", time.format_with_items(items.into_iter()))
        .map_err(|_| format_error())?;
    Ok(bucket)
}

/// Convert seconds since the epoch into UTC or local calendar fields.
pub fn timestamp_to_time(secs: f64, use_local_time: bool) -> Result<NaiveDateTime> {
    if !secs.is_finite() {
        return Err(ApiKeyError::InvalidArgument(format!(
            "timestamp must be finite, got {secs}"
        )));
    }

    let whole = secs.floor();
    let nanos = (((secs - whole) * 1e9) as u32).min(999_999_999);
    let utc = DateTime::<Utc>::from_timestamp(whole as i64, nanos)
        .ok_or_else(|| {
            ApiKeyError::InvalidArgument(format!("timestamp {secs} is out of range"))
        })?;

    Ok(if use_local_time {
        utc.with_timezone(&Local).naive_local()
    } else {
        utc.naive_utc()
    })
}

fn current_time(use_local_time: bool) -> NaiveDateTime {
    if use_local_time {
        Local::now().naive_local()
    } else {
        Utc::now().naive_utc()
    }
}

/// Reduce a time input to its bucket string, noting each step.
///
/// Steps are applied in a fixed order, each only if the input still has the
/// matching shape: absent → current time, timestamp → calendar fields,
/// calendar fields → formatted string. A bucket string skips all of them.
pub(crate) fn resolve_bucket(
    input: Option<TimeInput>,
    date_format: &str,
    use_local_time: bool,
    sink: &mut Option<&mut dyn TraceSink>,
) -> Result<String> {
    if use_local_time {
        note(sink, "Using local time".to_string());
    } else {
        note(sink, "Using UTC / GMT time".to_string());
    }

    let time = match input {
        None => {
            let now = current_time(use_local_time);
            note(sink, format!("Default time is {now}"));
            now
        }
        Some(TimeInput::Timestamp(secs)) => {
            let time = timestamp_to_time(secs, use_local_time)?;
            note(sink, format!("Converted {secs} to {time}"));
            time
        }
        Some(TimeInput::BrokenDown(time)) => time,
        Some(TimeInput::Bucket(bucket)) => return Ok(bucket),
    };

    let bucket = format_time(&time, date_format)?;
    note(sink, format!("Converted {time} to {bucket:?}"));
    Ok(bucket)
}
