//! Calendar utilities: month-aware date addition and day differences.

use anyhow::Result;
use chrono::{Months, NaiveDate};

/// Add `months` calendar months to `date`, clamping the day when the target
/// month is shorter (Jan 31 + 1 month = Feb 28/29). This is calendar-aware
/// addition, not `months * 30 days`.
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| anyhow::anyhow!("date overflow adding {months} months to {date}"))
}

/// Absolute difference between two dates in whole calendar days.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days().abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_add_months_plain() {
        assert_eq!(add_months(d(2026, 3, 15), 11).unwrap(), d(2027, 2, 15));
    }

    #[test]
    fn test_add_months_clamps_day() {
        assert_eq!(add_months(d(2026, 1, 31), 1).unwrap(), d(2026, 2, 28));
        assert_eq!(add_months(d(2024, 1, 31), 1).unwrap(), d(2024, 2, 29));
    }

    #[test]
    fn test_days_between_symmetric() {
        assert_eq!(days_between(d(2026, 3, 5), d(2026, 3, 6)), 1);
        assert_eq!(days_between(d(2026, 3, 6), d(2026, 3, 5)), 1);
        assert_eq!(days_between(d(2026, 3, 5), d(2026, 3, 5)), 0);
    }

    #[test]
    fn test_days_between_across_months() {
        assert_eq!(days_between(d(2026, 2, 28), d(2026, 3, 1)), 1);
    }
}
