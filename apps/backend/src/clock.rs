//! Study-day calculation for the daily reset hour.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, Timelike};

/// Get the current study day based on `daily_reset_hour`.
///
/// Before the reset hour the study day is still "yesterday", so late-night
/// reviews count towards the previous day.
pub fn study_today(daily_reset_hour: u32) -> NaiveDate {
    study_day_at(Local::now().naive_local(), daily_reset_hour)
}

/// Study day for a given local timestamp.
pub fn study_day_at(now: NaiveDateTime, daily_reset_hour: u32) -> NaiveDate {
    if now.hour() < daily_reset_hour {
        (now - Duration::days(1)).date()
    } else {
        now.date()
    }
}
