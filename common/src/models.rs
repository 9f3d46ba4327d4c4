// Data models for periodic tasks

use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar unit a period is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    Year,
    Month,
    Day,
    Hour,
}

impl PeriodUnit {
    pub const ALL: [PeriodUnit; 4] = [
        PeriodUnit::Year,
        PeriodUnit::Month,
        PeriodUnit::Day,
        PeriodUnit::Hour,
    ];

    /// Token used in the compact period notation ("1y", "2mo", "3d", "4h")
    pub fn token(self) -> &'static str {
        match self {
            PeriodUnit::Year => "y",
            PeriodUnit::Month => "mo",
            PeriodUnit::Day => "d",
            PeriodUnit::Hour => "h",
        }
    }

    /// Look up a unit from an already lower-cased token
    pub fn from_token(token: &str) -> Option<Self> {
        PeriodUnit::ALL.into_iter().find(|unit| unit.token() == token)
    }
}

impl fmt::Display for PeriodUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A period such as "every 2 months"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub value: u32,
    pub unit: PeriodUnit,
}

impl Period {
    pub fn new(value: u32, unit: PeriodUnit) -> Self {
        Self { value, unit }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// Invocation timestamps formatted in UTC, in chronological order
pub type PtList = Vec<String>;
