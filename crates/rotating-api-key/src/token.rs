//! Key derivation for a single seed.

use crate::config::KeyOptions;
use crate::error::Result;
use crate::hash::compute_key;
use crate::time::resolve_bucket;

/// Derive the API key for `seed` at the time described by `options`.
///
/// Client and server call this independently; they get the same key as long
/// as they agree on the seed, the date format and the time zone policy, and
/// their clocks fall into the same bucket.
///
/// The time input is reduced to a bucket string first (see
/// [`crate::TimeInput`]), noting every conversion in `options.trace`. The
/// key is then the hex SHA-1 of `seed + "+" + bucket`.
///
/// # Errors
/// * `InvalidArgument` if a timestamp is not finite or out of range
/// * `Format` if the date format can't be applied
pub fn make_key(seed: &str, options: KeyOptions<'_>) -> Result<String> {
    let KeyOptions {
        date_format,
        use_local_time,
        time_input,
        mut trace,
    } = options;

    let bucket = resolve_bucket(time_input, &date_format, use_local_time, &mut trace)?;
    Ok(compute_key(seed, &bucket))
}
