//! Date-range aggregation.
//!
//! Turns an inclusive date range plus optional per-day data into either an
//! exact hours total or a three-point estimate.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::task::DailyHours;

/// Daily-hours assumptions used when no per-day data is available.
const ESTIMATE_LOW_HOURS: f64 = 8.0;
const ESTIMATE_MID_HOURS: f64 = 8.5;
const ESTIMATE_HIGH_HOURS: f64 = 9.0;

/// Validation errors for date ranges.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// The end date was earlier than the start date.
    #[error("end date {end} precedes start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

/// Day-counting mode for a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeMode {
    /// Monday through Friday only.
    Workdays,
    /// Every calendar day.
    Calendar,
}

impl RangeMode {
    /// Returns true when `day` is counted under this mode.
    #[must_use]
    pub fn includes(self, day: NaiveDate) -> bool {
        match self {
            Self::Calendar => true,
            Self::Workdays => day.weekday().num_days_from_monday() < 5,
        }
    }
}

/// An inclusive calendar date range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range after validating the bounds.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        if end < start {
            return Err(RangeError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// First date of the range.
    #[must_use]
    pub const fn start(self) -> NaiveDate {
        self.start
    }

    /// Last date of the range (inclusive).
    #[must_use]
    pub const fn end(self) -> NaiveDate {
        self.end
    }

    /// Iterates the dates in the range that pass the mode filter.
    pub fn days(self, mode: RangeMode) -> impl Iterator<Item = NaiveDate> {
        self.start
            .iter_days()
            .take_while(move |day| *day <= self.end)
            .filter(move |day| mode.includes(*day))
    }

    /// Number of counted days in the range under the given mode.
    #[must_use]
    pub fn day_count(self, mode: RangeMode) -> usize {
        self.days(mode).count()
    }
}

/// Aggregated total for a range: exact sum or three-point estimate, never
/// both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeTotal {
    /// Summed from per-day data; dates absent from the table contribute 0.
    Exact(f64),
    /// Derived from the day count and the fixed 8-9 h/day assumption.
    Estimate { low: f64, mid: f64, high: f64 },
}

/// Everything the summary renderer needs about an aggregated range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSummary {
    pub range: DateRange,
    pub mode: RangeMode,
    pub day_count: usize,
    pub total: RangeTotal,
}

/// Aggregates a range against optional per-day data.
///
/// A non-empty table selects the exact total even when none of its entries
/// fall inside the range; an exact 0.00 tells the caller the data existed
/// but nothing landed in range.
#[must_use]
pub fn aggregate_range(range: DateRange, mode: RangeMode, per_day: &DailyHours) -> RangeSummary {
    let day_count = range.day_count(mode);
    let total = if per_day.is_empty() {
        #[allow(clippy::cast_precision_loss)]
        let days = day_count as f64;
        RangeTotal::Estimate {
            low: days * ESTIMATE_LOW_HOURS,
            mid: days * ESTIMATE_MID_HOURS,
            high: days * ESTIMATE_HIGH_HOURS,
        }
    } else {
        let exact = range
            .days(mode)
            .map(|day| per_day.get(&day).copied().unwrap_or(0.0))
            .sum();
        RangeTotal::Exact(exact)
    };

    RangeSummary {
        range,
        mode,
        day_count,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// 2026-01-05 is a Monday, 2026-01-11 the following Sunday.
    fn one_week() -> DateRange {
        DateRange::new(date(2026, 1, 5), date(2026, 1, 11)).unwrap()
    }

    #[test]
    fn rejects_end_before_start() {
        let err = DateRange::new(date(2026, 1, 9), date(2026, 1, 5)).unwrap_err();
        assert_eq!(
            err,
            RangeError::EndBeforeStart {
                start: date(2026, 1, 9),
                end: date(2026, 1, 5),
            }
        );
    }

    #[test]
    fn single_day_range_is_valid() {
        let range = DateRange::new(date(2026, 1, 5), date(2026, 1, 5)).unwrap();
        assert_eq!(range.day_count(RangeMode::Calendar), 1);
    }

    #[test]
    fn workday_mode_excludes_weekends() {
        assert_eq!(one_week().day_count(RangeMode::Workdays), 5);
        assert_eq!(one_week().day_count(RangeMode::Calendar), 7);
    }

    #[test]
    fn weekend_only_range_counts_zero_workdays() {
        let weekend = DateRange::new(date(2026, 1, 10), date(2026, 1, 11)).unwrap();
        assert_eq!(weekend.day_count(RangeMode::Workdays), 0);
        assert_eq!(weekend.day_count(RangeMode::Calendar), 2);
    }

    #[test]
    fn empty_table_falls_back_to_estimate() {
        let summary = aggregate_range(one_week(), RangeMode::Workdays, &DailyHours::new());
        assert_eq!(summary.day_count, 5);
        assert_eq!(
            summary.total,
            RangeTotal::Estimate {
                low: 40.0,
                mid: 42.5,
                high: 45.0,
            }
        );
    }

    #[test]
    fn exact_total_sums_in_range_days() {
        let mut per_day = DailyHours::new();
        per_day.insert(date(2026, 1, 5), 8.0);
        per_day.insert(date(2026, 1, 6), 9.5);

        let summary = aggregate_range(one_week(), RangeMode::Workdays, &per_day);
        assert_eq!(summary.total, RangeTotal::Exact(17.5));
    }

    #[test]
    fn workday_mode_excludes_weekend_hours_from_exact_sum() {
        let mut per_day = DailyHours::new();
        per_day.insert(date(2026, 1, 9), 8.0); // Friday
        per_day.insert(date(2026, 1, 10), 5.0); // Saturday

        let workdays = aggregate_range(one_week(), RangeMode::Workdays, &per_day);
        assert_eq!(workdays.total, RangeTotal::Exact(8.0));

        let calendar = aggregate_range(one_week(), RangeMode::Calendar, &per_day);
        assert_eq!(calendar.total, RangeTotal::Exact(13.0));
    }

    #[test]
    fn data_outside_range_still_selects_exact_mode() {
        let mut per_day = DailyHours::new();
        per_day.insert(date(2025, 12, 1), 8.0);

        let summary = aggregate_range(one_week(), RangeMode::Workdays, &per_day);
        assert_eq!(summary.total, RangeTotal::Exact(0.0));
    }

    #[test]
    fn absent_days_contribute_zero() {
        let mut per_day = DailyHours::new();
        per_day.insert(date(2026, 1, 7), 6.0); // Wednesday only

        let summary = aggregate_range(one_week(), RangeMode::Workdays, &per_day);
        assert_eq!(summary.total, RangeTotal::Exact(6.0));
    }
}
