use std::fmt;

use chrono::{Datelike, NaiveDateTime};

/// Calendar month key (`YYYY-MM`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    /// Calendar year
    pub year: i32,
    /// Month, 1-12
    pub month: u32,
}

impl YearMonth {
    /// Creates a new key. `month` must be in 1..=12.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month));
        Self { year, month }
    }

    /// Month containing the given timestamp.
    #[must_use]
    pub fn of(ts: NaiveDateTime) -> Self {
        Self::new(ts.year(), ts.month())
    }

    /// Inclusive number of months from `self` to `end` (same month = 1).
    /// Returns 0 when `end` precedes `self`.
    #[must_use]
    pub fn months_through(self, end: YearMonth) -> u32 {
        let diff =
            i64::from(end.year - self.year) * 12 + i64::from(end.month) - i64::from(self.month);
        u32::try_from(diff + 1).unwrap_or(0)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl serde::Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
