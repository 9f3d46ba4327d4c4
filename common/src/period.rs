// Period token parsing
//
// A period is written as an integer followed by a unit token, e.g. "1d",
// "12h", "2Mo". Unit tokens are case-insensitive and must match exactly.

use crate::errors::PeriodicTaskError;
use crate::models::{Period, PeriodUnit};
use std::str::FromStr;

/// Parse a compact period token into a [`Period`]
///
/// The split point is the first alphabetic character: the prefix must be an
/// integer, the suffix (lower-cased) one of `y`, `mo`, `d`, `h`. Zero and
/// negative values are rejected since they would never advance a schedule.
#[tracing::instrument(level = "trace")]
pub fn parse_period(period: &str) -> Result<Period, PeriodicTaskError> {
    let split = period
        .find(char::is_alphabetic)
        .ok_or_else(|| PeriodicTaskError::invalid_period(period, "missing unit"))?;

    let (digits, token) = period.split_at(split);

    let value: i64 = digits.parse().map_err(|e| {
        PeriodicTaskError::invalid_period(period, format!("invalid value '{}': {}", digits, e))
    })?;

    let token = token.to_lowercase();
    let unit = PeriodUnit::from_token(&token).ok_or_else(|| {
        PeriodicTaskError::invalid_period(period, format!("unknown unit '{}'", token))
    })?;

    if value <= 0 {
        return Err(PeriodicTaskError::invalid_period(
            period,
            "value must be greater than 0",
        ));
    }

    let value = u32::try_from(value)
        .map_err(|_| PeriodicTaskError::invalid_period(period, "value is too large"))?;

    Ok(Period::new(value, unit))
}

impl FromStr for Period {
    type Err = PeriodicTaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_period(s)
    }
}
