// Error handling framework for periodic task computation

use thiserror::Error;

/// Errors produced while validating a list request or computing its points
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodicTaskError {
    #[error("invalid period '{period}': {reason}")]
    InvalidPeriod { period: String, reason: String },

    #[error("invalid timezone '{timezone}': {reason}")]
    InvalidTimezone { timezone: String, reason: String },

    #[error("invalid start point '{0}'")]
    InvalidStartPoint(String),

    #[error("invalid end point '{0}'")]
    InvalidEndPoint(String),

    #[error("too many invocation points: more than {limit} requested")]
    TooManyPoints { limit: usize },

    #[error("something went wrong: {0}")]
    Internal(String),
}

impl PeriodicTaskError {
    pub(crate) fn invalid_period(period: &str, reason: impl Into<String>) -> Self {
        PeriodicTaskError::InvalidPeriod {
            period: period.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the error stems from bad input rather than a server-side failure
    pub fn is_client_error(&self) -> bool {
        !matches!(self, PeriodicTaskError::Internal(_))
    }

    /// Stable machine-readable code, used for metrics labels and logs
    pub fn code(&self) -> &'static str {
        match self {
            PeriodicTaskError::InvalidPeriod { .. } => "INVALID_PERIOD",
            PeriodicTaskError::InvalidTimezone { .. } => "INVALID_TIMEZONE",
            PeriodicTaskError::InvalidStartPoint(_) => "INVALID_START_POINT",
            PeriodicTaskError::InvalidEndPoint(_) => "INVALID_END_POINT",
            PeriodicTaskError::TooManyPoints { .. } => "TOO_MANY_POINTS",
            PeriodicTaskError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
