//! Fiscal calendar and period locks.
//!
//! Fiscal years run April through March; the label year is the starting
//! calendar year, so 2025-04-01 through 2026-03-31 is fiscal year 2025.

use chrono::{Datelike, NaiveDate};

/// Returns the fiscal year label for a posting date.
#[must_use]
pub fn fiscal_year_for(date: NaiveDate) -> i32 {
    if date.month() >= 4 {
        date.year()
    } else {
        date.year() - 1
    }
}

/// Returns the first day of the given fiscal year.
#[must_use]
pub fn fiscal_year_start(fiscal_year: i32) -> NaiveDate {
    // April 1 always exists.
    NaiveDate::from_ymd_opt(fiscal_year, 4, 1).unwrap_or_default()
}

/// True when a posting date falls inside a closed period.
///
/// A tenant's books may be locked through a cutoff date; postings on or
/// before that date are rejected.
#[must_use]
pub fn is_period_locked(date: NaiveDate, locked_through: Option<NaiveDate>) -> bool {
    locked_through.is_some_and(|cutoff| date <= cutoff)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_fiscal_year_boundaries() {
        assert_eq!(fiscal_year_for(d(2025, 4, 1)), 2025);
        assert_eq!(fiscal_year_for(d(2026, 3, 31)), 2025);
        assert_eq!(fiscal_year_for(d(2026, 4, 1)), 2026);
        assert_eq!(fiscal_year_for(d(2025, 1, 15)), 2024);
    }

    #[test]
    fn test_fiscal_year_start() {
        assert_eq!(fiscal_year_start(2025), d(2025, 4, 1));
    }

    #[test]
    fn test_period_lock() {
        assert!(!is_period_locked(d(2025, 4, 1), None));
        assert!(is_period_locked(d(2025, 4, 1), Some(d(2025, 4, 1))));
        assert!(is_period_locked(d(2025, 3, 31), Some(d(2025, 4, 1))));
        assert!(!is_period_locked(d(2025, 4, 2), Some(d(2025, 4, 1))));
    }
}
