//! Time keys for snapshot-addressed COG paths.

use chrono::{DateTime, Utc};

/// Format epoch milliseconds as the `YYYYMMDDHHMM` UTC key used in COG
/// snapshot paths (e.g. `/cog/rain_1h/202402110800.tif`).
///
/// Pure and deterministic; out-of-range timestamps fold to the epoch key
/// rather than failing, keeping URL resolution infallible.
pub fn cog_time_key(time_ms: i64) -> String {
    let dt = DateTime::<Utc>::from_timestamp_millis(time_ms).unwrap_or(DateTime::UNIX_EPOCH);
    dt.format("%Y%m%d%H%M").to_string()
}
