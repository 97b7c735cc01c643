//! Timestamp formatting for entry headers

use crate::error::{JcardError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt::Write;

pub const DEFAULT_TIMEFORMAT: &str = "%Y-%m-%d %H:%M";

/// A strftime pattern known to format any naive date-time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeFormat(String);

impl TimeFormat {
    /// Validate a strftime pattern.
    ///
    /// Rejects patterns chrono cannot parse as well as patterns that need
    /// data a naive date-time lacks (e.g. `%z`).
    pub fn parse(pattern: &str) -> Result<Self> {
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(JcardError::Config(format!(
                "Invalid time format: '{}'",
                pattern
            )));
        }

        let probe = NaiveDate::from_ymd_opt(2000, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(|| JcardError::Config("Failed to build probe date".to_string()))?;
        let mut out = String::new();
        write!(out, "{}", probe.format(pattern)).map_err(|_| {
            JcardError::Config(format!(
                "The time format '{}' cannot be applied to entry dates",
                pattern
            ))
        })?;

        Ok(TimeFormat(pattern.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn format(&self, date: NaiveDateTime) -> String {
        date.format(&self.0).to_string()
    }
}

impl Default for TimeFormat {
    fn default() -> Self {
        TimeFormat(DEFAULT_TIMEFORMAT.to_string())
    }
}
