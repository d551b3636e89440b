//! The (year, month) a report covers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Calendar month a report covers.
///
/// Used only to synthesize record dates; parsing never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportPeriod {
    /// Four-digit year
    pub year: i32,
    /// Month, 1-12
    pub month: u32,
}

impl ReportPeriod {
    /// Create a period, checking the month and a four-digit year.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidPeriod(format!(
                "month {} is not in 1-12",
                month
            )));
        }
        if !(1000..=9999).contains(&year) {
            return Err(Error::InvalidPeriod(format!(
                "year {} is not a four-digit year",
                year
            )));
        }
        Ok(Self { year, month })
    }

    /// Format the date of `day` in this period as `YYYY-MM-DD`.
    ///
    /// No calendar check: day 31 of a 30-day month is still formatted.
    pub fn date_string(&self, day: u32) -> String {
        format!("{}-{:02}-{:02}", self.year, self.month, day)
    }

    /// Get the date of `day` if it exists in this period.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }
}

impl std::fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.month, self.year)
    }
}
