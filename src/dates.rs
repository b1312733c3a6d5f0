use crate::error::{PlanningError, Result};
use crate::numeric::{round2, round_half_up};
use chrono::{Datelike, Days, Months, NaiveDate};

/// Days used to approximate the fractional part of a month offset.
pub const DAYS_PER_MONTH: f64 = 30.0;

pub fn parse_iso_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| {
        PlanningError::DateError(format!("Invalid date: {}. Expected YYYY-MM-DD", text))
    })
}

/// Steps back `months` calendar months keeping the day of month. A day that
/// does not exist in the target month rolls forward into the following month,
/// so 31 March minus one month is 3 March in a non-leap year. Offsets past
/// the earliest representable date clamp to [`NaiveDate::MIN`].
pub fn subtract_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.with_day(1)
        .and_then(|first| first.checked_sub_months(Months::new(months)))
        .and_then(|first| first.checked_add_days(Days::new(u64::from(date.day() - 1))))
        .unwrap_or(NaiveDate::MIN)
}

/// Concrete date for a milestone `months_before` the anchor.
///
/// Whole months use calendar arithmetic; the fractional remainder is
/// approximated as `round(fraction * 30)` days, so 0.5 months is 15 days and
/// 0.25 months is 8 days. Non-finite offsets are treated as zero.
pub fn calculate_target_date(anchor: NaiveDate, months_before: f64) -> NaiveDate {
    let months_before = if months_before.is_finite() {
        months_before.max(0.0)
    } else {
        0.0
    };

    let whole = months_before.floor();
    let fraction = months_before - whole;
    let extra_days = round_half_up(fraction * DAYS_PER_MONTH) as u64;

    // saturates at u32::MAX, which subtract_months clamps
    let shifted = subtract_months(anchor, whole as u32);
    shifted
        .checked_sub_days(Days::new(extra_days))
        .unwrap_or(NaiveDate::MIN)
}

/// Inverse of [`calculate_target_date`]: how many months before `anchor` the
/// `target` falls, never negative, rounded to two decimals.
pub fn calculate_months_before(anchor: NaiveDate, target: NaiveDate) -> f64 {
    round2(get_months_between(target, anchor).max(0.0))
}

/// Signed month distance using the same 30-day approximation for days.
pub fn get_months_between(start: NaiveDate, end: NaiveDate) -> f64 {
    let years = (end.year() - start.year()) as f64;
    let months = end.month() as f64 - start.month() as f64;
    let days = end.day() as f64 - start.day() as f64;
    years * 12.0 + months + days / DAYS_PER_MONTH
}

/// Position of `date` on a timeline window as a percentage in `[0, 100]`.
/// A zero-length window always maps to `0`.
pub fn get_gantt_position(date: NaiveDate, window_start: NaiveDate, window_end: NaiveDate) -> f64 {
    let total = (window_end - window_start).num_days();
    if total == 0 {
        return 0.0;
    }

    let elapsed = (date - window_start).num_days();
    let position = elapsed as f64 / total as f64 * 100.0;
    position.clamp(0.0, 100.0)
}

/// Human label for an offset: `1 year 6mo before`, `3 months before`,
/// `2 weeks before`.
pub fn format_relative_months(months_before: f64) -> String {
    let months_before = if months_before.is_finite() {
        months_before.max(0.0)
    } else {
        0.0
    };

    if months_before >= 12.0 {
        let years = (months_before / 12.0).floor();
        let remainder = (months_before - years * 12.0).floor();
        let unit = if years == 1.0 { "year" } else { "years" };
        if remainder > 0.0 {
            format!("{} {} {}mo before", years, unit, remainder)
        } else {
            format!("{} {} before", years, unit)
        }
    } else if months_before >= 1.0 {
        let months = months_before.floor();
        let unit = if months == 1.0 { "month" } else { "months" };
        format!("{} {} before", months, unit)
    } else {
        let weeks = round_half_up(months_before * 4.0);
        let unit = if weeks == 1.0 { "week" } else { "weeks" };
        format!("{} {} before", weeks, unit)
    }
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn next_month_start(date: NaiveDate) -> NaiveDate {
    let first = month_start(date);
    first.checked_add_months(Months::new(1)).unwrap_or(first)
}

/// `"2025-06"`
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// `"Jun 2025"`
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// First day of every month from `start`'s month through `end`'s month.
pub fn month_starts_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut months = Vec::new();
    let last = month_start(end);

    let mut current = month_start(start);
    while current <= last {
        months.push(current);
        let next = next_month_start(current);
        if next == current {
            break;
        }
        current = next;
    }

    months
}
