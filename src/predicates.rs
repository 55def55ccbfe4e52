//! Which days and times a picker lets the user choose.

use crate::consts::{DEFAULT_HIGHLIGHT_CLASS, HIGHLIGHT_KEY_FORMAT};
use crate::dispatch::{self, is_after_unit, is_before_unit};
use crate::prelude::*;
use crate::types::{Calendar, Unit};
use crate::{PickerDate, format};
use chrono::Timelike;
use std::collections::HashMap;
use thiserror::Error;

/// Limits on selectable days. Every field is optional; an absent field
/// doesn't constrain anything.
#[derive(Clone, Copy, Default)]
pub struct DayConstraints<'a> {
    pub min_date: Option<&'a PickerDate>,
    pub max_date: Option<&'a PickerDate>,
    pub exclude_dates: Option<&'a [PickerDate]>,
    pub include_dates: Option<&'a [PickerDate]>,
    /// Receives its own copy of the day; `false` disables the day
    pub filter_date: Option<&'a dyn Fn(PickerDate) -> bool>,
}

impl std::fmt::Debug for DayConstraints<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DayConstraints")
            .field("min_date", &self.min_date)
            .field("max_date", &self.max_date)
            .field("exclude_dates", &self.exclude_dates)
            .field("include_dates", &self.include_dates)
            .field("filter_date", &self.filter_date.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeBounds<'a> {
    pub min_time: Option<&'a PickerDate>,
    pub max_time: Option<&'a PickerDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimeRangeError {
    #[error("Both min_time and max_time are required")]
    MissingBounds,
}

/// An entry of the highlighted-days list.
///
/// Converts from a bare date or from a `(class_name, dates)` pair.
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum Highlight {
    /// Highlighted with the default class
    Date(PickerDate),
    /// Highlighted with `class_name`
    Classed {
        class_name: String,
        dates: Vec<PickerDate>,
    },
}

fn is_same_day(a: &PickerDate, b: &PickerDate) -> bool {
    dispatch::is_same(a, b, Unit::Day, Calendar::Gregorian)
}

pub fn is_day_disabled(day: &PickerDate, constraints: &DayConstraints<'_>) -> bool {
    constraints
        .min_date
        .is_some_and(|min| is_before_unit(day, min, Unit::Day, Calendar::Gregorian))
        || constraints
            .max_date
            .is_some_and(|max| is_after_unit(day, max, Unit::Day, Calendar::Gregorian))
        || constraints
            .exclude_dates
            .is_some_and(|excluded| excluded.iter().any(|d| is_same_day(day, d)))
        || constraints
            .include_dates
            .is_some_and(|included| !included.iter().any(|d| is_same_day(day, d)))
        || constraints
            .filter_date
            .is_some_and(|filter| !filter(day.clone()))
}

/// Whether `time` has the hour and minute of any of `disabled_times`; seconds don't count
pub fn is_time_disabled(time: &PickerDate, disabled_times: &[PickerDate]) -> bool {
    let (hour, minute) = hour_minute(time);
    disabled_times.iter().any(|t| hour_minute(t) == (hour, minute))
}

fn hour_minute(time: &PickerDate) -> (u32, u32) {
    let naive = time.naive_local();
    (naive.hour(), naive.minute())
}

fn minute_of_day(time: &PickerDate) -> u32 {
    let (hour, minute) = hour_minute(time);
    hour * 60 + minute
}

/// Whether the time of day of `time` falls outside `[min_time, max_time]`.
///
/// Only hours and minutes are compared, as if all three were on the same day.
///
/// # Errors
/// Returns `TimeRangeError::MissingBounds` unless both bounds are given.
pub fn is_time_in_disabled_range(
    time: &PickerDate,
    bounds: &TimeBounds<'_>,
) -> Result<bool, TimeRangeError> {
    let (Some(min_time), Some(max_time)) = (bounds.min_time, bounds.max_time) else {
        return Err(TimeRangeError::MissingBounds);
    };
    let minute = minute_of_day(time);
    Ok(!(minute_of_day(min_time) <= minute && minute <= minute_of_day(max_time)))
}

fn step(day: &PickerDate, amount: i64, unit: Unit, calendar: Calendar) -> Option<PickerDate> {
    dispatch::add(day, amount, unit, calendar)
        .inspect_err(|e| tracing::warn!("Cannot step {} by {} {}: {}", day, amount, unit, e))
        .ok()
}

/// Whether nothing before `day` can be picked: the previous `unit` is
/// entirely before `min_date`, or before every included date.
pub fn all_days_disabled_before(
    day: &PickerDate,
    unit: Unit,
    constraints: &DayConstraints<'_>,
    calendar: Calendar,
) -> bool {
    let Some(before) = step(day, -1, unit, calendar) else {
        return false;
    };
    constraints
        .min_date
        .is_some_and(|min| is_before_unit(&before, min, unit, calendar))
        || constraints.include_dates.is_some_and(|included| {
            included
                .iter()
                .all(|d| is_before_unit(&before, d, unit, calendar))
        })
}

/// Whether nothing after `day` can be picked: the next `unit` is entirely
/// after `max_date`, or after every included date.
pub fn all_days_disabled_after(
    day: &PickerDate,
    unit: Unit,
    constraints: &DayConstraints<'_>,
    calendar: Calendar,
) -> bool {
    let Some(after) = step(day, 1, unit, calendar) else {
        return false;
    };
    constraints
        .max_date
        .is_some_and(|max| is_after_unit(&after, max, unit, calendar))
        || constraints.include_dates.is_some_and(|included| {
            included
                .iter()
                .all(|d| is_after_unit(&after, d, unit, calendar))
        })
}

/// The earliest selectable date.
///
/// With included dates, the earliest of those not on a day before
/// `min_date`, or `None` if there is none.
pub fn get_effective_min_date(constraints: &DayConstraints<'_>) -> Option<PickerDate> {
    match (constraints.include_dates, constraints.min_date) {
        (Some(included), Some(min)) => included
            .iter()
            .filter(|d| !is_after_unit(min, d, Unit::Day, Calendar::Gregorian))
            .min()
            .cloned(),
        (Some(included), None) => included.iter().min().cloned(),
        (None, min) => min.cloned(),
    }
}

/// The latest selectable date; mirrors [`get_effective_min_date`]
pub fn get_effective_max_date(constraints: &DayConstraints<'_>) -> Option<PickerDate> {
    match (constraints.include_dates, constraints.max_date) {
        (Some(included), Some(max)) => included
            .iter()
            .filter(|d| !is_before_unit(max, d, Unit::Day, Calendar::Gregorian))
            .max()
            .cloned(),
        (Some(included), None) => included.iter().max().cloned(),
        (None, max) => max.cloned(),
    }
}

/// CSS classes for highlighted days, keyed by `MM.DD.YYYY`.
///
/// Bare dates get `default_class_name`, or the picker's standard highlight
/// class. A day listed twice under one class gets that class once.
pub fn get_highlight_days_map(
    highlights: &[Highlight],
    default_class_name: Option<&str>,
) -> HashMap<String, Vec<String>> {
    let default_class_name = default_class_name.unwrap_or(DEFAULT_HIGHLIGHT_CLASS);
    let mut classes: HashMap<String, Vec<String>> = HashMap::new();
    let mut add = |date: &PickerDate, class_name: &str| {
        let names = classes
            .entry(format::format(date, HIGHLIGHT_KEY_FORMAT))
            .or_default();
        if !names.iter().any(|name| name == class_name) {
            names.push(class_name.to_owned());
        }
    };

    for highlight in highlights {
        match highlight {
            Highlight::Date(date) => add(date, default_class_name),
            Highlight::Classed { class_name, dates } => {
                for date in dates {
                    add(date, class_name);
                }
            }
        }
    }
    classes
}

/// The first injected time strictly between `current_time` and the next
/// time slot, `(multiplier + 1) * interval_minutes` after `start_of_day`.
///
/// Injected times contribute only their hour and minute.
pub fn time_to_inject_after<'a>(
    start_of_day: &PickerDate,
    current_time: &PickerDate,
    multiplier: i64,
    interval_minutes: i64,
    injected_times: &'a [PickerDate],
) -> Option<&'a PickerDate> {
    let next_slot = multiplier
        .checked_add(1)
        .and_then(|m| m.checked_mul(interval_minutes))
        .and_then(|minutes| step(start_of_day, minutes, Unit::Minute, Calendar::Gregorian))?;

    injected_times.iter().find(|injected| {
        let (hour, minute) = hour_minute(injected);
        step(start_of_day, i64::from(hour) * 60 + i64::from(minute), Unit::Minute, Calendar::Gregorian)
            .is_some_and(|t| *current_time < t && t < next_slot)
    })
}
