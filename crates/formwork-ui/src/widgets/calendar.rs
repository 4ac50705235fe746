//! Calendar arithmetic behind the date picker.
//!
//! The month grid is always 6 weeks of 7 days, Monday first, so the panel
//! keeps the same height whatever month is shown.

use crate::error::{UiError, UiResult};
use std::ops::RangeInclusive;
use time::{Date, Duration, Month, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

/// Number of cells in a month grid.
pub const GRID_CELLS: usize = 42;

/// Years shown on each side of the cursor year in the year panel.
pub const YEAR_WINDOW: i32 = 10;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: Date,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
}

/// First day of the month containing `date`.
pub fn first_of_month(date: Date) -> Date {
    date.replace_day(1).unwrap_or(date)
}

/// Build the 42-cell grid for the month containing `cursor`.
///
/// Leading cells come from the previous month, trailing cells from the next
/// one; only cells of the viewed month are flagged today or selected.
pub fn month_grid(cursor: Date, selected: Option<Date>, today: Date) -> Vec<CalendarDay> {
    let first = first_of_month(cursor);
    let offset = first.weekday().number_days_from_monday() as i64;
    let start = first.saturating_sub(Duration::days(offset));

    (0..GRID_CELLS as i64)
        .map(|i| {
            let date = start.saturating_add(Duration::days(i));
            let is_current_month = date.year() == first.year() && date.month() == first.month();
            CalendarDay {
                date,
                is_current_month,
                is_today: is_current_month && date == today,
                is_selected: is_current_month && selected == Some(date),
            }
        })
        .collect()
}

/// Move `date` by `delta` months, clamping the day to the target month.
///
/// Returns `date` unchanged when the result would leave the supported range.
pub fn shift_months(date: Date, delta: i32) -> Date {
    let index = date
        .year()
        .checked_mul(12)
        .and_then(|months| months.checked_add(u8::from(date.month()) as i32 - 1))
        .and_then(|months| months.checked_add(delta));
    let Some(index) = index else {
        return date;
    };
    let year = index.div_euclid(12);
    let Ok(month) = Month::try_from((index.rem_euclid(12) + 1) as u8) else {
        return date;
    };
    let day = date.day().min(month.length(year));
    Date::from_calendar_date(year, month, day).unwrap_or(date)
}

pub fn shift_years(date: Date, delta: i32) -> Date {
    match delta.checked_mul(12) {
        Some(months) => shift_months(date, months),
        None => date,
    }
}

/// Move `date` to `month` of the same year, clamping the day.
pub fn with_month(date: Date, month: Month) -> Date {
    shift_months(date, u8::from(month) as i32 - u8::from(date.month()) as i32)
}

/// Move `date` to `year`, clamping the day (29 February in a common year).
pub fn with_year(date: Date, year: i32) -> Date {
    match year.checked_sub(date.year()) {
        Some(delta) => shift_years(date, delta),
        None => date,
    }
}

/// Years offered by the year panel around `center`.
pub fn year_range(center: i32) -> RangeInclusive<i32> {
    center - YEAR_WINDOW..=center + YEAR_WINDOW
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_iso_date(input: &str) -> UiResult<Date> {
    Date::parse(input.trim(), ISO_DATE).map_err(|err| UiError::InvalidDate {
        input: input.to_string(),
        reason: err.to_string(),
    })
}

/// Which dates can be picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatePolicy {
    pub min: Option<Date>,
    pub max: Option<Date>,
    pub disabled: Vec<Date>,
}

impl DatePolicy {
    /// True when `date` is before `min`, after `max`, or one of the
    /// explicitly disabled dates. Bounds are inclusive.
    pub fn is_disabled(&self, date: Date) -> bool {
        self.min.is_some_and(|min| date < min)
            || self.max.is_some_and(|max| date > max)
            || self.disabled.contains(&date)
    }
}

/// Source of "today".
pub trait Clock {
    fn today(&self) -> Date;
}

/// Local date of the running system, UTC when the offset is unknown.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_local()
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
            .date()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}
