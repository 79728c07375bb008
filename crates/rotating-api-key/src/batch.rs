//! Enumeration of every key valid within a time window.
//!
//! The server publishes the keys of all its seeds for the current bucket and,
//! to tolerate clients in other time zones or with skewed clocks, for the
//! buckets reached by stepping forward through a fuzz window.

use std::collections::BTreeSet;
use std::iter::FusedIterator;

use chrono::{NaiveDateTime, TimeDelta};

use crate::data::KeyEntry;
use crate::error::{ApiKeyError, Result};
use crate::time::format_time;

/// The keys for a set of seeds over a set of buckets.
///
/// Built once by [`keys_and_descriptions`]; iterating it (any number of
/// times) yields one [`KeyEntry`] per seed and bucket, seed-major: all
/// buckets of the first seed, then all buckets of the second, and so on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBatch {
    seeds: Vec<String>,
    buckets: Vec<String>,
}

impl KeyBatch {
    /// Seeds in input order.
    pub fn seeds(&self) -> &[String] {
        &self.seeds
    }

    /// Distinct bucket strings, sorted.
    pub fn buckets(&self) -> &[String] {
        &self.buckets
    }

    /// Number of entries (`seeds × buckets`).
    pub fn len(&self) -> usize {
        self.seeds.len() * self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> Keys<'_> {
        Keys {
            batch: self,
            front: 0,
            back: self.len(),
        }
    }
}

impl<'a> IntoIterator for &'a KeyBatch {
    type Item = KeyEntry;
    type IntoIter = Keys<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a [`KeyBatch`]. Keys are derived lazily.
#[derive(Debug, Clone)]
pub struct Keys<'a> {
    batch: &'a KeyBatch,
    front: usize,
    back: usize,
}

impl Keys<'_> {
    fn entry(&self, position: usize) -> KeyEntry {
        let per_seed = self.batch.buckets.len();
        let seed = &self.batch.seeds[position / per_seed];
        let bucket = &self.batch.buckets[position % per_seed];
        let entry = KeyEntry::new(seed, bucket);
        log::trace!("derived key for {}", entry.description);
        entry
    }
}

impl Iterator for Keys<'_> {
    type Item = KeyEntry;

    fn next(&mut self) -> Option<KeyEntry> {
        if self.front >= self.back {
            return None;
        }
        let entry = self.entry(self.front);
        self.front += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Keys<'_> {
    fn next_back(&mut self) -> Option<KeyEntry> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.entry(self.back))
    }
}

impl ExactSizeIterator for Keys<'_> {}

impl FusedIterator for Keys<'_> {}

/// Collect the bucket strings covering `[base_time, base_time + fuzz]`.
///
/// The bucket of `base_time` is always included. With a fuzz window, the time
/// is advanced by `step` (defaulting to `fuzz`) and each instant not past the
/// end of the window contributes its bucket. Duplicates collapse and the
/// result is sorted as strings.
///
/// # Errors
/// * `InvalidArgument` if `fuzz` or the effective `step` is zero or negative,
///   or if the window end is not a representable time
/// * `Format` if the date format can't be applied
///
/// # Cost
/// Every step is formatted, so the work is proportional to `fuzz / step`,
/// not to the number of distinct buckets. A year-long window stepped by the
/// second formats about 31 million instants to find 366 days; pick a step
/// close to the bucket width.
pub fn time_buckets(
    base_time: NaiveDateTime,
    date_format: &str,
    fuzz: Option<TimeDelta>,
    step: Option<TimeDelta>,
) -> Result<Vec<String>> {
    let mut buckets = BTreeSet::new();
    buckets.insert(format_time(&base_time, date_format)?);

    if let Some(fuzz) = fuzz {
        let step = step.unwrap_or(fuzz);
        if fuzz <= TimeDelta::zero() {
            return Err(ApiKeyError::InvalidArgument(format!(
                "fuzz must be positive, got {fuzz}"
            )));
        }
        if step <= TimeDelta::zero() {
            return Err(ApiKeyError::InvalidArgument(format!(
                "step must be positive, got {step}"
            )));
        }

        let end = base_time.checked_add_signed(fuzz).ok_or_else(|| {
            ApiKeyError::InvalidArgument(format!("{base_time} + {fuzz} is out of range"))
        })?;

        let mut current = base_time;
        // Overflowing past the calendar's end also means past `end`.
        while let Some(next) = current.checked_add_signed(step) {
            if next > end {
                break;
            }
            buckets.insert(format_time(&next, date_format)?);
            current = next;
        }
    }

    Ok(buckets.into_iter().collect())
}

/// Build the batch of `(key, description)` entries for `seeds`.
///
/// Every seed gets one key per bucket from [`time_buckets`]. All input
/// validation happens here, before any key is produced, so iterating the
/// returned batch cannot fail.
///
/// ```
/// use chrono::{NaiveDate, TimeDelta};
/// use rotating_api_key::keys_and_descriptions;
///
/// let now = NaiveDate::from_ymd_opt(2022, 6, 25)
///     .unwrap()
///     .and_hms_opt(17, 45, 0)
///     .unwrap();
/// let batch = keys_and_descriptions(
///     ["our dear customer"],
///     now,
///     "%Y-%m-%d",
///     Some(TimeDelta::days(1)),
///     None,
/// )
/// .unwrap();
///
/// let descriptions: Vec<String> = batch.iter().map(|e| e.description).collect();
/// assert_eq!(
///     descriptions,
///     ["our dear customer (2022-06-25)", "our dear customer (2022-06-26)"]
/// );
/// ```
pub fn keys_and_descriptions<I, S>(
    seeds: I,
    base_time: NaiveDateTime,
    date_format: &str,
    fuzz: Option<TimeDelta>,
    step: Option<TimeDelta>,
) -> Result<KeyBatch>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let buckets = time_buckets(base_time, date_format, fuzz, step)?;
    let seeds: Vec<String> = seeds.into_iter().map(Into::into).collect();

    log::debug!(
        "Prepared {} keys: {} seeds x {} buckets ({})",
        seeds.len() * buckets.len(),
        seeds.len(),
        buckets.len(),
        buckets.join(", ")
    );

    Ok(KeyBatch { seeds, buckets })
}
