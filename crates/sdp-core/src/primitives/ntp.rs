//! NTP timestamps as used by `t=` lines
//!
//! SDP times are seconds since 1900-01-01 00:00:00 UTC. Zero is special and
//! means "unbounded" for both start and stop.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::{Error, Result};

/// Seconds between the NTP epoch (1900) and the Unix epoch (1970)
pub const NTP_OFFSET: u64 = 2_208_988_800;

/// Convert Unix seconds to NTP seconds
pub fn from_unix(unix_seconds: i64) -> Result<u64> {
    let ntp = i128::from(unix_seconds) + i128::from(NTP_OFFSET);
    u64::try_from(ntp)
        .map_err(|_| Error::invalid("time", format!("{} is before the NTP epoch", unix_seconds)))
}

/// Convert NTP seconds to Unix seconds
pub fn to_unix(ntp_seconds: u64) -> i64 {
    (i128::from(ntp_seconds) - i128::from(NTP_OFFSET)) as i64
}

/// Convert a UTC date-time to NTP seconds
pub fn from_datetime(time: &DateTime<Utc>) -> Result<u64> {
    from_unix(time.timestamp())
}

/// Convert NTP seconds to a UTC date-time
///
/// Returns `None` for zero, which SDP uses for "unbounded".
pub fn to_datetime(ntp_seconds: u64) -> Option<DateTime<Utc>> {
    if ntp_seconds == 0 {
        return None;
    }
    Utc.timestamp_opt(to_unix(ntp_seconds), 0).single()
}

/// Current time in NTP seconds
pub fn now() -> u64 {
    let unix = Utc::now().timestamp();
    from_unix(unix).unwrap_or(0)
}

/// Whether `token` is a valid NTP time: `0` or 1 to 20 digits without a leading zero
pub fn is_valid_ntp(token: &str) -> bool {
    if token == "0" {
        return true;
    }
    !token.is_empty()
        && token.len() <= 20
        && !token.starts_with('0')
        && token.chars().all(|c| c.is_ascii_digit())
        && token.parse::<u64>().is_ok()
}
