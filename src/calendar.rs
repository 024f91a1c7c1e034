//! Calendar arithmetic for projection years and lease anniversaries
//!
//! Projection years are anchored to the property's effective date: year `i`
//! starts on the `i`-th anniversary of that date and spans 365 days.
//! All helpers operate on `NaiveDate` values and never mutate.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Length of a projection year in days
pub const DAYS_PER_PROJECTION_YEAR: i64 = 365;

/// Half-open date window `[start, end)` covered by one projection year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl YearWindow {
    /// True when the inclusive interval `[from, to]` touches this window
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        from < self.end && to >= self.start
    }
}

/// The `years`-th anniversary of `date`.
///
/// A Feb 29 anchor lands on Feb 28 in non-leap years.
pub fn anniversary(date: NaiveDate, years: u32) -> NaiveDate {
    date.checked_add_months(Months::new(years.saturating_mul(12)))
        .unwrap_or(NaiveDate::MAX)
}

/// Date window for the projection year with 0-based `year_index`
pub fn year_window(effective_date: NaiveDate, year_index: u32) -> YearWindow {
    let start = anniversary(effective_date, year_index);
    let end = start
        .checked_add_signed(Duration::days(DAYS_PER_PROJECTION_YEAR))
        .unwrap_or(NaiveDate::MAX);
    YearWindow { start, end }
}

/// Number of full anniversaries of `from` reached on or before `to`.
///
/// Returns 0 when `to` precedes `from` or the first anniversary.
pub fn full_years_between(from: NaiveDate, to: NaiveDate) -> u32 {
    if to < from {
        return 0;
    }
    let mut years = (to.year() - from.year()).max(0) as u32;
    if years > 0 && anniversary(from, years) > to {
        years -= 1;
    }
    years
}

/// Projection year (0-based) that starts right after the year containing
/// `end`, or `None` when `end` precedes the effective date.
///
/// Measured against window starts rather than window bodies so that the
/// leap-year day left between two 365-day windows still counts.
pub fn first_year_after(effective_date: NaiveDate, end: NaiveDate) -> Option<u32> {
    if end < effective_date {
        return None;
    }
    Some(full_years_between(effective_date, end) + 1)
}
