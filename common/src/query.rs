// Validation of raw list request parameters

use crate::errors::PeriodicTaskError;
use crate::models::Period;
use crate::period::parse_period;
use crate::timestamp::{parse_timestamp, parse_timezone};
use chrono::DateTime;
use chrono_tz::Tz;

/// Validated parameters of a timestamp list request
///
/// Both points are localized to `timezone`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQueryParams {
    pub period: Period,
    pub timezone: Tz,
    pub t1: DateTime<Tz>,
    pub t2: DateTime<Tz>,
}

impl ListQueryParams {
    /// Parse the four raw request strings
    ///
    /// Checks run in order period, timezone, start point, end point; the
    /// first failure is returned.
    #[tracing::instrument(level = "trace")]
    pub fn parse(period: &str, tz: &str, t1: &str, t2: &str) -> Result<Self, PeriodicTaskError> {
        let period = parse_period(period)?;
        let timezone = parse_timezone(tz)?;

        let start_point = parse_timestamp(t1)
            .map_err(|e| PeriodicTaskError::InvalidStartPoint(format!("{}: {}", t1, e)))?;
        let end_point = parse_timestamp(t2)
            .map_err(|e| PeriodicTaskError::InvalidEndPoint(format!("{}: {}", t2, e)))?;

        Ok(Self {
            period,
            timezone,
            t1: start_point.with_timezone(&timezone),
            t2: end_point.with_timezone(&timezone),
        })
    }
}
