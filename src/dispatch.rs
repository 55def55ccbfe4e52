//! Calendar dispatch.
//!
//! Every date operation the picker performs is routed through here with an
//! explicit [`Calendar`]. Under the Hijri calendar the year, month,
//! day-of-month and week units read and write Hijri fields; day-of-week,
//! hour, minute and second are the same in both calendars.

use crate::consts::{
    ARABIC_INDIC_ZERO, DAYS_PER_WEEK, HIJRI_SHORT_DATE_FORMAT, MONTHS_PER_YEAR,
    SECONDS_PER_HOUR, SECONDS_PER_MINUTE, SHORT_DATE_TOKEN,
};
use crate::hijri::HijriDate;
use crate::types::{Calendar, DayOfWeekCode, Unit};
use crate::{DateError, PickerDate, format};
use chrono::{
    DateTime, Datelike, FixedOffset, Local, Months, NaiveDate, NaiveDateTime, NaiveTime,
    TimeDelta, Timelike, Utc,
};
use std::fmt;

// --- wall-clock helpers ---

/// Day of the week, Sunday = 0
pub(crate) fn weekday_from_sunday(date: &PickerDate) -> u32 {
    date.naive_local().weekday().num_days_from_sunday()
}

fn shift_days(naive: NaiveDateTime, days: i64) -> Result<NaiveDateTime, DateError> {
    TimeDelta::try_days(days)
        .and_then(|delta| naive.checked_add_signed(delta))
        .ok_or(DateError::OutOfRange)
}

fn shift_weeks(naive: NaiveDateTime, weeks: i64) -> Result<NaiveDateTime, DateError> {
    let days = weeks
        .checked_mul(DAYS_PER_WEEK)
        .ok_or(DateError::OutOfRange)?;
    shift_days(naive, days)
}

fn midnight(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

fn checked_seconds(hours: i64, minutes: i64, seconds: i64) -> Result<i64, DateError> {
    hours
        .checked_mul(SECONDS_PER_HOUR)
        .zip(minutes.checked_mul(SECONDS_PER_MINUTE))
        .and_then(|(h, m)| h.checked_add(m))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or(DateError::OutOfRange)
}

/// Same day, time of day given in seconds; values past a day roll over
fn at_seconds_of_day(naive: NaiveDateTime, seconds: i64) -> Result<NaiveDateTime, DateError> {
    TimeDelta::try_seconds(seconds)
        .and_then(|delta| midnight(naive.date()).checked_add_signed(delta))
        .and_then(|t| t.with_nanosecond(naive.nanosecond()))
        .ok_or(DateError::OutOfRange)
}

/// Shifts by whole Gregorian months; chrono clamps the day of month
fn shift_gregorian_months(naive: NaiveDateTime, months: i64) -> Result<NaiveDateTime, DateError> {
    let count = u32::try_from(months.unsigned_abs()).map_err(|_| DateError::OutOfRange)?;
    if months < 0 {
        naive.checked_sub_months(Months::new(count))
    } else {
        naive.checked_add_months(Months::new(count))
    }
    .ok_or(DateError::OutOfRange)
}

/// Keeps the time of day, moves to the Gregorian day of `hijri`
fn at_hijri_day(naive: NaiveDateTime, hijri: HijriDate) -> Result<NaiveDateTime, DateError> {
    Ok(hijri.to_gregorian()?.and_time(naive.time()))
}

/// Locale week number and week-year of `date`, counted in `calendar`.
///
/// The week containing day-of-week `doy` of the locale's rule, nearest to
/// `date`, decides which year the week belongs to.
pub(crate) fn week_of_year(date: &PickerDate, calendar: Calendar) -> (i64, i64) {
    let rule = date.locale_data().week;
    let dow = i64::from(rule.dow);
    let doy = i64::from(rule.doy);
    let end = doy - dow;

    let mut days_to_doy = doy - i64::from(weekday_from_sunday(date));
    if days_to_doy > end {
        days_to_doy -= DAYS_PER_WEEK;
    }
    if days_to_doy < end - DAYS_PER_WEEK {
        days_to_doy += DAYS_PER_WEEK;
    }

    let day = date.naive_local().date();
    let adjusted = TimeDelta::try_days(days_to_doy)
        .and_then(|delta| day.checked_add_signed(delta))
        .unwrap_or(day);

    let gregorian = (i64::from(adjusted.ordinal()), i64::from(adjusted.year()));
    let (ordinal, year) = match calendar {
        Calendar::Gregorian => gregorian,
        Calendar::Hijri => HijriDate::from_gregorian(adjusted)
            .and_then(|hijri| Ok((i64::from(hijri.ordinal()?), i64::from(hijri.year()))))
            .unwrap_or_else(|err| {
                tracing::warn!("No Hijri week for {adjusted}: {err}; counting Gregorian weeks");
                gregorian
            }),
    };
    ((ordinal + DAYS_PER_WEEK - 1) / DAYS_PER_WEEK, year)
}

// --- dispatch ---

/// Reads `unit` from `date`. Months are zero-based.
///
/// A date the Hijri calendar can't convert reads its Gregorian fields.
pub fn get(date: &PickerDate, unit: Unit, calendar: Calendar) -> i64 {
    match (calendar, unit) {
        (Calendar::Hijri, Unit::Week) => week_of_year(date, Calendar::Hijri).0,
        (Calendar::Hijri, Unit::Date | Unit::Month | Unit::Year) => match date.hijri() {
            Ok(hijri) => match unit {
                Unit::Date => i64::from(hijri.day()),
                Unit::Month => i64::from(hijri.month0()),
                _ => i64::from(hijri.year()),
            },
            Err(err) => {
                tracing::warn!("No Hijri {unit} for {date}: {err}");
                get_generic(date, unit)
            }
        },
        _ => get_generic(date, unit),
    }
}

fn get_generic(date: &PickerDate, unit: Unit) -> i64 {
    let naive = date.naive_local();
    match unit {
        Unit::Second => i64::from(naive.second()),
        Unit::Minute => i64::from(naive.minute()),
        Unit::Hour => i64::from(naive.hour()),
        Unit::Day => i64::from(weekday_from_sunday(date)),
        Unit::Date => i64::from(naive.day()),
        Unit::Week => week_of_year(date, Calendar::Gregorian).0,
        Unit::Month => i64::from(naive.month0()),
        Unit::Year => i64::from(naive.year()),
    }
}

/// Returns `date` with `unit` set to `value`.
///
/// Values outside a unit's range roll into the next larger unit. Setting
/// the year or month clamps the day of month to the target month.
///
/// # Errors
/// Returns `DateError::OutOfRange` if the result can't be represented.
pub fn set(
    date: &PickerDate,
    unit: Unit,
    value: i64,
    calendar: Calendar,
) -> Result<PickerDate, DateError> {
    let naive = date.naive_local();
    let target = match (calendar, unit) {
        (Calendar::Hijri, Unit::Year) => at_hijri_day(naive, date.hijri()?.with_year(value)?)?,
        (Calendar::Hijri, Unit::Month) => at_hijri_day(naive, date.hijri()?.with_month(value)?)?,
        (Calendar::Hijri, Unit::Date) => {
            let first = at_hijri_day(naive, date.hijri()?.first_of_month())?;
            shift_days(first, value.saturating_sub(1))?
        }
        (Calendar::Hijri, Unit::Week) => {
            shift_weeks(naive, value.saturating_sub(week_of_year(date, Calendar::Hijri).0))?
        }
        _ => set_generic(date, naive, unit, value)?,
    };
    date.with_naive_local(target)
}

fn set_generic(
    date: &PickerDate,
    naive: NaiveDateTime,
    unit: Unit,
    value: i64,
) -> Result<NaiveDateTime, DateError> {
    let (hour, minute, second) = (
        i64::from(naive.hour()),
        i64::from(naive.minute()),
        i64::from(naive.second()),
    );
    match unit {
        Unit::Second => at_seconds_of_day(naive, checked_seconds(hour, minute, value)?),
        Unit::Minute => at_seconds_of_day(naive, checked_seconds(hour, value, second)?),
        Unit::Hour => at_seconds_of_day(naive, checked_seconds(value, minute, second)?),
        Unit::Day => shift_days(naive, value.saturating_sub(i64::from(weekday_from_sunday(date)))),
        Unit::Date => {
            let first = naive
                .with_day(1)
                .ok_or(DateError::OutOfRange)?;
            shift_days(first, value.saturating_sub(1))
        }
        Unit::Week => shift_weeks(naive, value.saturating_sub(week_of_year(date, Calendar::Gregorian).0)),
        Unit::Month => {
            shift_gregorian_months(naive, value.saturating_sub(i64::from(naive.month0())))
        }
        Unit::Year => {
            let months = value
                .checked_sub(i64::from(naive.year()))
                .and_then(|years| years.checked_mul(MONTHS_PER_YEAR))
                .ok_or(DateError::OutOfRange)?;
            shift_gregorian_months(naive, months)
        }
    }
}

/// Shifts `date` by `amount` of `unit`.
///
/// Hijri month and year steps follow lunar month boundaries. Month and year
/// steps clamp the day of month in both calendars.
///
/// # Errors
/// Returns `DateError::OutOfRange` if the result can't be represented.
pub fn add(
    date: &PickerDate,
    amount: i64,
    unit: Unit,
    calendar: Calendar,
) -> Result<PickerDate, DateError> {
    let naive = date.naive_local();
    match unit {
        Unit::Second | Unit::Minute | Unit::Hour => {
            let delta = match unit {
                Unit::Second => TimeDelta::try_seconds(amount),
                Unit::Minute => TimeDelta::try_minutes(amount),
                _ => TimeDelta::try_hours(amount),
            }
            .ok_or(DateError::OutOfRange)?;
            date.datetime()
                .checked_add_signed(delta)
                .map(|dt| date.with_instant(dt))
                .ok_or(DateError::OutOfRange)
        }
        Unit::Day | Unit::Date => date.with_naive_local(shift_days(naive, amount)?),
        Unit::Week => date.with_naive_local(shift_weeks(naive, amount)?),
        Unit::Month => date.with_naive_local(shift_months(date, naive, amount, calendar)?),
        Unit::Year => {
            let months = amount
                .checked_mul(MONTHS_PER_YEAR)
                .ok_or(DateError::OutOfRange)?;
            date.with_naive_local(shift_months(date, naive, months, calendar)?)
        }
    }
}

fn shift_months(
    date: &PickerDate,
    naive: NaiveDateTime,
    months: i64,
    calendar: Calendar,
) -> Result<NaiveDateTime, DateError> {
    match calendar {
        Calendar::Hijri => at_hijri_day(naive, date.hijri()?.add_months(months)?),
        Calendar::Gregorian => shift_gregorian_months(naive, months),
    }
}

/// # Errors
/// Returns `DateError::OutOfRange` if the result can't be represented.
pub fn subtract(
    date: &PickerDate,
    amount: i64,
    unit: Unit,
    calendar: Calendar,
) -> Result<PickerDate, DateError> {
    let negated = amount.checked_neg().ok_or(DateError::OutOfRange)?;
    add(date, negated, unit, calendar)
}

/// First instant of the `unit` containing `date`.
///
/// Weeks start on the locale's first day of the week.
///
/// # Errors
/// Returns `DateError::OutOfRange` if the boundary can't be represented.
pub fn start_of(date: &PickerDate, unit: Unit, calendar: Calendar) -> Result<PickerDate, DateError> {
    let naive = date.naive_local();
    let day = naive.date();
    let target = match unit {
        Unit::Second => naive.with_nanosecond(0).ok_or(DateError::OutOfRange)?,
        Unit::Minute => day
            .and_hms_opt(naive.hour(), naive.minute(), 0)
            .ok_or(DateError::OutOfRange)?,
        Unit::Hour => day
            .and_hms_opt(naive.hour(), 0, 0)
            .ok_or(DateError::OutOfRange)?,
        Unit::Day | Unit::Date => midnight(day),
        Unit::Week => {
            let dow = i64::from(date.locale_data().week.dow);
            let back = (i64::from(weekday_from_sunday(date)) - dow).rem_euclid(DAYS_PER_WEEK);
            shift_days(midnight(day), -back)?
        }
        Unit::Month => match calendar {
            Calendar::Hijri => midnight(date.hijri()?.first_of_month().to_gregorian()?),
            Calendar::Gregorian => midnight(day.with_day(1).ok_or(DateError::OutOfRange)?),
        },
        Unit::Year => match calendar {
            Calendar::Hijri => midnight(date.hijri()?.first_of_year().to_gregorian()?),
            Calendar::Gregorian => midnight(
                NaiveDate::from_ymd_opt(day.year(), 1, 1).ok_or(DateError::OutOfRange)?,
            ),
        },
    };
    date.with_naive_local(target)
}

/// Last instant (to the nanosecond) of the `unit` containing `date`.
///
/// Both calendars compute a real end boundary: the start of the next unit,
/// less one nanosecond.
///
/// # Errors
/// Returns `DateError::OutOfRange` if the boundary can't be represented.
pub fn end_of(date: &PickerDate, unit: Unit, calendar: Calendar) -> Result<PickerDate, DateError> {
    let start = start_of(date, unit, calendar)?;
    let next = add(&start, 1, unit, calendar)?;
    next.datetime()
        .checked_sub_signed(TimeDelta::nanoseconds(1))
        .map(|dt| date.with_instant(dt))
        .ok_or(DateError::OutOfRange)
}

/// Whether `date2` falls within the `unit` containing `date1`, inclusive at both ends.
///
/// Under the Hijri calendar, years and months are bounded by lunar month
/// boundaries; every other unit compares the same way in both calendars.
pub fn is_same(date1: &PickerDate, date2: &PickerDate, unit: Unit, calendar: Calendar) -> bool {
    match (start_of(date1, unit, calendar), end_of(date1, unit, calendar)) {
        (Ok(start), Ok(end)) => start <= *date2 && *date2 <= end,
        _ => false,
    }
}

/// `date` ends before `other`, at `unit` granularity
pub(crate) fn is_before_unit(
    date: &PickerDate,
    other: &PickerDate,
    unit: Unit,
    calendar: Calendar,
) -> bool {
    end_of(date, unit, calendar).is_ok_and(|end| end < *other)
}

/// `date` begins after `other`, at `unit` granularity
pub(crate) fn is_after_unit(
    date: &PickerDate,
    other: &PickerDate,
    unit: Unit,
    calendar: Calendar,
) -> bool {
    start_of(date, unit, calendar).is_ok_and(|start| *other < start)
}

/// Rewrites a Gregorian format string into its Hijri equivalent.
///
/// `L` becomes `iMM/iDD/iYYYY`. Otherwise only the first run of each of
/// `Y`, `D`, `M`, `w` and `g` gets the `i` prefix; later runs of the same
/// letter stay Gregorian.
pub fn convert_format_hijri(format: &str) -> String {
    if format == SHORT_DATE_TOKEN {
        return HIJRI_SHORT_DATE_FORMAT.to_owned();
    }
    ['Y', 'D', 'M', 'w', 'g']
        .into_iter()
        .fold(format.to_owned(), |mut rewritten, letter| {
            if let Some(pos) = rewritten.find(letter) {
                rewritten.insert(pos, 'i');
            }
            rewritten
        })
}

/// Formats `date`; digits are always Western (see [`format_year`]).
pub fn format_date(date: &PickerDate, format: &str, calendar: Calendar) -> String {
    match calendar {
        Calendar::Hijri => format::format(date, &convert_format_hijri(format)),
        Calendar::Gregorian => format::format(date, format),
    }
}

pub fn format_year<T: fmt::Display>(year: T, calendar: Calendar) -> String {
    let text = year.to_string();
    match calendar {
        Calendar::Hijri => english_to_arabic(&text),
        Calendar::Gregorian => text,
    }
}

pub fn format_day<T: fmt::Display>(day: T, calendar: Calendar) -> String {
    let text = day.to_string();
    match calendar {
        Calendar::Hijri => english_to_arabic(&text),
        Calendar::Gregorian => text,
    }
}

/// Replaces Arabic-Indic digits (U+0660..U+0669) with ASCII digits
pub fn arabic_to_english(s: &str) -> String {
    s.chars()
        .map(|c| {
            (c as u32)
                .checked_sub(ARABIC_INDIC_ZERO)
                .filter(|digit| *digit < 10)
                .and_then(|digit| char::from_digit(digit, 10))
                .unwrap_or(c)
        })
        .collect()
}

/// Replaces ASCII digits with Arabic-Indic digits
pub fn english_to_arabic(s: &str) -> String {
    s.chars()
        .map(|c| {
            c.to_digit(10)
                .and_then(|digit| char::from_u32(ARABIC_INDIC_ZERO + digit))
                .unwrap_or(c)
        })
        .collect()
}

// --- constructors ---

pub fn new_date(point: DateTime<FixedOffset>) -> PickerDate {
    PickerDate::new(point)
}

/// The current instant at a fixed offset (minutes east of UTC)
///
/// # Errors
/// Returns `DateError::InvalidOffset` if the offset is a day or more.
pub fn new_date_with_offset(utc_offset: i32) -> Result<PickerDate, DateError> {
    let offset = offset_from_minutes(utc_offset)?;
    Ok(PickerDate::new(Utc::now().with_timezone(&offset)))
}

/// The current instant, at a fixed offset if one is given, else at the host's offset
///
/// # Errors
/// Returns `DateError::InvalidOffset` for an offset of a day or more.
pub fn now(maybe_fixed_utc_offset: Option<i32>) -> Result<PickerDate, DateError> {
    match maybe_fixed_utc_offset {
        Some(utc_offset) => new_date_with_offset(utc_offset),
        None => Ok(PickerDate::new(Local::now().fixed_offset())),
    }
}

pub fn clone_date(date: &PickerDate) -> PickerDate {
    date.clone()
}

pub(crate) fn offset_from_minutes(minutes: i32) -> Result<FixedOffset, DateError> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or(DateError::InvalidOffset(minutes))
}

// --- setters ---

/// Sets the time of day, keeping sub-second precision; values past a day roll over.
///
/// # Errors
/// Returns `DateError::OutOfRange` if the result can't be represented.
pub fn set_time(
    date: &PickerDate,
    hour: u32,
    minute: u32,
    second: u32,
) -> Result<PickerDate, DateError> {
    let naive = date.naive_local();
    let seconds = checked_seconds(i64::from(hour), i64::from(minute), i64::from(second))?;
    date.with_naive_local(at_seconds_of_day(naive, seconds)?)
}

/// # Errors
/// Returns `DateError::OutOfRange` if the result can't be represented.
pub fn set_month(date: &PickerDate, month: i64, calendar: Calendar) -> Result<PickerDate, DateError> {
    set(date, Unit::Month, month, calendar)
}

/// # Errors
/// Returns `DateError::OutOfRange` if the result can't be represented.
pub fn set_year(date: &PickerDate, year: i64, calendar: Calendar) -> Result<PickerDate, DateError> {
    set(date, Unit::Year, year, calendar)
}

/// Same instant, seen from `offset` minutes east of UTC
///
/// # Errors
/// Returns `DateError::InvalidOffset` for an offset of a day or more.
pub fn set_utc_offset(date: &PickerDate, offset: i32) -> Result<PickerDate, DateError> {
    Ok(date.with_offset(offset_from_minutes(offset)?))
}

// --- getters ---

pub fn get_second(date: &PickerDate) -> i64 {
    get(date, Unit::Second, Calendar::Gregorian)
}

pub fn get_minute(date: &PickerDate) -> i64 {
    get(date, Unit::Minute, Calendar::Gregorian)
}

pub fn get_hour(date: &PickerDate) -> i64 {
    get(date, Unit::Hour, Calendar::Gregorian)
}

/// Day of the week, Sunday = 0
pub fn get_day(date: &PickerDate, calendar: Calendar) -> i64 {
    get(date, Unit::Day, calendar)
}

pub fn get_week(date: &PickerDate, calendar: Calendar) -> i64 {
    get(date, Unit::Week, calendar)
}

/// Zero-based month
pub fn get_month(date: &PickerDate, calendar: Calendar) -> i64 {
    get(date, Unit::Month, calendar)
}

pub fn get_year(date: &PickerDate, calendar: Calendar) -> i64 {
    get(date, Unit::Year, calendar)
}

/// Day of the month
pub fn get_date(date: &PickerDate, calendar: Calendar) -> i64 {
    get(date, Unit::Date, calendar)
}

/// The host's current offset from UTC, in minutes
pub fn get_utc_offset() -> i32 {
    Local::now().offset().local_minus_utc() / 60
}

pub fn get_day_of_week_code(date: &PickerDate) -> DayOfWeekCode {
    date.naive_local().weekday().into()
}

// --- start of / end of ---

/// # Errors
/// Returns `DateError::OutOfRange` if the boundary can't be represented.
pub fn get_start_of_day(date: &PickerDate, calendar: Calendar) -> Result<PickerDate, DateError> {
    start_of(date, Unit::Day, calendar)
}

/// # Errors
/// Returns `DateError::OutOfRange` if the boundary can't be represented.
pub fn get_start_of_week(date: &PickerDate, calendar: Calendar) -> Result<PickerDate, DateError> {
    start_of(date, Unit::Week, calendar)
}

/// # Errors
/// Returns `DateError::OutOfRange` if the boundary can't be represented.
pub fn get_start_of_month(date: &PickerDate, calendar: Calendar) -> Result<PickerDate, DateError> {
    start_of(date, Unit::Month, calendar)
}

/// # Errors
/// Returns `DateError::OutOfRange` if the boundary can't be represented.
pub fn get_start_of_date(date: &PickerDate, calendar: Calendar) -> Result<PickerDate, DateError> {
    start_of(date, Unit::Date, calendar)
}

/// # Errors
/// Returns `DateError::OutOfRange` if the boundary can't be represented.
pub fn get_end_of_day(date: &PickerDate, calendar: Calendar) -> Result<PickerDate, DateError> {
    end_of(date, Unit::Day, calendar)
}

/// # Errors
/// Returns `DateError::OutOfRange` if the boundary can't be represented.
pub fn get_end_of_week(date: &PickerDate, calendar: Calendar) -> Result<PickerDate, DateError> {
    end_of(date, Unit::Week, calendar)
}

/// # Errors
/// Returns `DateError::OutOfRange` if the boundary can't be represented.
pub fn get_end_of_month(date: &PickerDate, calendar: Calendar) -> Result<PickerDate, DateError> {
    end_of(date, Unit::Month, calendar)
}

// --- date math ---

macro_rules! shift_by {
    ($($add:ident, $subtract:ident => $unit:expr;)*) => {
        $(
            /// # Errors
            /// Returns `DateError::OutOfRange` if the result can't be represented.
            pub fn $add(
                date: &PickerDate,
                amount: i64,
                calendar: Calendar,
            ) -> Result<PickerDate, DateError> {
                add(date, amount, $unit, calendar)
            }

            /// # Errors
            /// Returns `DateError::OutOfRange` if the result can't be represented.
            pub fn $subtract(
                date: &PickerDate,
                amount: i64,
                calendar: Calendar,
            ) -> Result<PickerDate, DateError> {
                subtract(date, amount, $unit, calendar)
            }
        )*
    };
}

shift_by! {
    add_minutes, subtract_minutes => Unit::Minute;
    add_hours, subtract_hours => Unit::Hour;
    add_days, subtract_days => Unit::Day;
    add_weeks, subtract_weeks => Unit::Week;
    add_months, subtract_months => Unit::Month;
    add_years, subtract_years => Unit::Year;
}

// --- comparison ---

pub fn is_before(date1: &PickerDate, date2: &PickerDate) -> bool {
    date1 < date2
}

pub fn is_after(date1: &PickerDate, date2: &PickerDate) -> bool {
    date1 > date2
}

/// Same instant, regardless of offset or locale
pub fn equals(date1: &PickerDate, date2: &PickerDate) -> bool {
    date1 == date2
}

fn is_same_optional(
    date1: Option<&PickerDate>,
    date2: Option<&PickerDate>,
    unit: Unit,
    calendar: Calendar,
) -> bool {
    match (date1, date2) {
        (Some(a), Some(b)) => is_same(a, b, unit, calendar),
        (None, None) => true,
        _ => false,
    }
}

/// Two absent dates are the same year; one absent date is not
pub fn is_same_year(date1: Option<&PickerDate>, date2: Option<&PickerDate>, calendar: Calendar) -> bool {
    is_same_optional(date1, date2, Unit::Year, calendar)
}

pub fn is_same_month(date1: Option<&PickerDate>, date2: Option<&PickerDate>, calendar: Calendar) -> bool {
    is_same_optional(date1, date2, Unit::Month, calendar)
}

pub fn is_same_day(date1: Option<&PickerDate>, date2: Option<&PickerDate>, calendar: Calendar) -> bool {
    is_same_optional(date1, date2, Unit::Day, calendar)
}

pub fn is_same_utc_offset(date1: Option<&PickerDate>, date2: Option<&PickerDate>) -> bool {
    match (date1, date2) {
        (Some(a), Some(b)) => a.offset() == b.offset(),
        (None, None) => true,
        _ => false,
    }
}

/// Whether `day` falls on or between the days of `start_date` and `end_date`
pub fn is_day_in_range(day: &PickerDate, start_date: &PickerDate, end_date: &PickerDate) -> bool {
    let bounds = start_of(start_date, Unit::Day, Calendar::Gregorian)
        .and_then(|start| add(&start, -1, Unit::Second, Calendar::Gregorian))
        .and_then(|before| {
            start_of(end_date, Unit::Day, Calendar::Gregorian)
                .and_then(|end| add(&end, 1, Unit::Second, Calendar::Gregorian))
                .map(|after| (before, after))
        });
    match (bounds, start_of(day, Unit::Day, Calendar::Gregorian)) {
        (Ok((before, after)), Ok(day)) => before < day && day < after,
        _ => false,
    }
}

/// Whole days elapsed from `date2` to `date1`, truncated toward zero
pub fn get_days_diff(date1: &PickerDate, date2: &PickerDate) -> i64 {
    date1
        .datetime()
        .signed_duration_since(*date2.datetime())
        .num_days()
}
