// Timestamp and timezone helpers
//
// All timestamps on the wire use the compact UTC layout YYYYMMDD'T'HHMMSS'Z',
// e.g. 20210728T204603Z.

use crate::errors::PeriodicTaskError;
use chrono::{DateTime, NaiveDateTime, ParseError, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use thiserror::Error;

/// strftime layout of wire timestamps
pub const TIMESTAMP_LAYOUT: &str = "%Y%m%dT%H%M%SZ";

/// Why a wire timestamp was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("expected layout YYYYMMDDTHHMMSSZ")]
    Layout,

    #[error("leap seconds are not accepted")]
    LeapSecond,
}

/// Parse a wire timestamp into a UTC instant
///
/// Every field must be zero-padded to its full width: the value has to
/// format back to exactly the input.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, TimestampError> {
    let naive = NaiveDateTime::parse_from_str(value, TIMESTAMP_LAYOUT)?;

    if naive.nanosecond() >= 1_000_000_000 {
        return Err(TimestampError::LeapSecond);
    }

    let instant = Utc.from_utc_datetime(&naive);
    if format_timestamp(&instant) != value {
        return Err(TimestampError::Layout);
    }

    Ok(instant)
}

/// Format any instant as a wire timestamp, normalized to UTC
pub fn format_timestamp<Z: TimeZone>(instant: &DateTime<Z>) -> String {
    instant
        .with_timezone(&Utc)
        .format(TIMESTAMP_LAYOUT)
        .to_string()
}

/// Resolve an IANA timezone name; an empty name means UTC
pub fn parse_timezone(name: &str) -> Result<Tz, PeriodicTaskError> {
    if name.is_empty() {
        return Ok(Tz::UTC);
    }

    name.parse::<Tz>()
        .map_err(|e| PeriodicTaskError::InvalidTimezone {
            timezone: name.to_string(),
            reason: e.to_string(),
        })
}
