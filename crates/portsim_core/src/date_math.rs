//! Calendar bucketing for resampling and rebalancing.
//!
//! Periods are identified by a `(year, index)` key computed directly from the
//! civil date fields, so grouping a daily series into months never touches
//! jiff's `Span` machinery.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Sampling / rebalancing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Monthly,
    Quarterly,
    Annually,
}

/// Key identifying the calendar period a date falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodKey {
    pub year: i16,
    /// Month (1-12), quarter (1-4), or 1 for annual periods
    pub index: i8,
}

impl Period {
    #[inline]
    #[must_use]
    pub fn key(self, date: Date) -> PeriodKey {
        let index = match self {
            Period::Monthly => date.month(),
            Period::Quarterly => (date.month() - 1) / 3 + 1,
            Period::Annually => 1,
        };
        PeriodKey {
            year: date.year(),
            index,
        }
    }

    #[must_use]
    pub fn periods_per_year(self) -> u32 {
        match self {
            Period::Monthly => 12,
            Period::Quarterly => 4,
            Period::Annually => 1,
        }
    }

    /// Last calendar day of the period containing `date`.
    ///
    /// Resampled observations are labelled with this date so that series whose
    /// final trading day differs within a period still align.
    #[must_use]
    pub fn period_end(self, date: Date) -> Date {
        let last_month = match self {
            Period::Monthly => date.month(),
            Period::Quarterly => ((date.month() - 1) / 3 + 1) * 3,
            Period::Annually => 12,
        };
        month_end(jiff::civil::date(date.year(), last_month, 1))
    }

    /// True if `next` starts a new period relative to `prev`.
    #[inline]
    #[must_use]
    pub fn crosses_boundary(self, prev: Date, next: Date) -> bool {
        self.key(prev) != self.key(next)
    }
}

/// Fast leap year check.
#[inline]
pub fn is_leap_year(year: i16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Last calendar day of the month containing `date`.
#[inline]
pub fn month_end(date: Date) -> Date {
    const DAYS: [i8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let month = date.month();
    let last = if month == 2 && is_leap_year(date.year()) {
        29
    } else {
        DAYS[(month - 1) as usize]
    };
    jiff::civil::date(date.year(), month, last)
}
