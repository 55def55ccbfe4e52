//! Calendar layer for date-picker widgets.
//!
//! Every date operation a picker needs (construction, field access,
//! arithmetic, boundaries, comparison, formatting, locale lookup) goes
//! through this crate, taking an explicit [`Calendar`] so that rendering code
//! never has to know whether it is showing Gregorian or Hijri dates.

mod config;
mod consts;
mod dispatch;
mod format;
mod hijri;
mod locale;
mod predicates;
mod prelude;
mod types;

pub use config::{CONFIG_PATH_ENV_VAR, ConfigError, PickerConfig};
pub use consts::*;
pub use dispatch::*;
pub use format::{parse_date, safe_date_format};
pub use hijri::{HijriDate, days_in_month as hijri_days_in_month, days_in_year as hijri_days_in_year};
pub use locale::{
    LocaleData, LongDateFormat, Meridiem, Ordinal, WeekRule, get_default_locale,
    get_default_locale_data, get_locale_data, get_locale_data_for_locale, get_month_in_locale,
    get_month_short_in_locale, get_weekday_min_in_locale, get_weekday_short_in_locale,
    localize_date, register_locale, set_default_locale,
};
pub use predicates::{
    DayConstraints, Highlight, TimeBounds, TimeRangeError, all_days_disabled_after,
    all_days_disabled_before, get_effective_max_date, get_effective_min_date,
    get_highlight_days_map, is_day_disabled, is_time_disabled, is_time_in_disabled_range,
    time_to_inject_after,
};
pub use types::{Calendar, DayOfWeekCode, Unit};

use crate::prelude::*;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A point in time, seen through a fixed UTC offset and a locale.
///
/// Values are immutable: every operation in this crate that "changes" a date
/// returns a new one, and `clone()` gives an independent copy. Equality,
/// ordering and hashing only look at the instant.
#[derive(Debug, Clone)]
pub struct PickerDate {
    inner: DateTime<FixedOffset>,
    locale: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid unit: {_0}")]
    InvalidUnit(String),
    #[display(fmt = "Invalid calendar: {_0}")]
    InvalidCalendar(String),
    #[display(fmt = "Invalid Hijri date {year}-{month:02}-{day:02}")]
    InvalidHijriDate { year: i64, month: u32, day: u32 },
    #[display(fmt = "Invalid date {year}-{month:02}-{day:02}")]
    InvalidDate { year: i64, month: u32, day: u32 },
    #[display(fmt = "Invalid UTC offset: {_0} minutes")]
    InvalidOffset(i32),
    #[display(fmt = "Date out of range")]
    OutOfRange,
    #[display(fmt = "Unknown locale: {_0}")]
    UnknownLocale(String),
    #[display(fmt = "Invalid locale data for {name}: {reason}")]
    InvalidLocaleData { name: String, reason: String },
}

impl std::error::Error for DateError {}

impl PickerDate {
    /// Wraps an instant, tagging it with the process default locale
    pub fn new(inner: DateTime<FixedOffset>) -> Self {
        Self {
            inner,
            locale: locale::get_default_locale(),
        }
    }

    /// Midnight on a Gregorian date. `month0` is zero-based.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` if the date doesn't exist.
    pub fn from_ymd(
        year: i32,
        month0: u32,
        day: u32,
        offset: FixedOffset,
    ) -> Result<Self, DateError> {
        let month = month0.saturating_add(1);
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(DateError::InvalidDate {
            year: i64::from(year),
            month,
            day,
        })?;
        Self::from_naive_local(date.and_time(chrono::NaiveTime::MIN), offset)
    }

    /// Midnight on a Hijri date. `month0` is zero-based.
    ///
    /// # Errors
    /// Returns `DateError::InvalidHijriDate` if the date doesn't exist in the Hijri calendar.
    pub fn from_hijri(
        year: i32,
        month0: u32,
        day: u32,
        offset: FixedOffset,
    ) -> Result<Self, DateError> {
        let date = HijriDate::new(year, month0, day)?.to_gregorian()?;
        Self::from_naive_local(date.and_time(chrono::NaiveTime::MIN), offset)
    }

    /// # Errors
    /// Returns `DateError::OutOfRange` if the local time can't be placed at `offset`.
    pub fn from_naive_local(
        naive: NaiveDateTime,
        offset: FixedOffset,
    ) -> Result<Self, DateError> {
        offset
            .from_local_datetime(&naive)
            .single()
            .map(Self::new)
            .ok_or(DateError::OutOfRange)
    }

    /// Interprets a wall-clock time in the host's time zone
    pub(crate) fn from_host_local(naive: NaiveDateTime) -> Option<Self> {
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| Self::new(dt.fixed_offset()))
    }

    #[inline]
    pub const fn datetime(&self) -> &DateTime<FixedOffset> {
        &self.inner
    }

    /// Wall-clock date and time at this value's offset
    #[inline]
    pub fn naive_local(&self) -> NaiveDateTime {
        self.inner.naive_local()
    }

    #[inline]
    pub fn offset(&self) -> FixedOffset {
        *self.inner.offset()
    }

    /// Offset from UTC, in minutes east
    pub fn utc_offset_minutes(&self) -> i32 {
        self.inner.offset().local_minus_utc() / 60
    }

    #[inline]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    #[inline]
    pub fn timestamp_millis(&self) -> i64 {
        self.inner.timestamp_millis()
    }

    /// Same instant, different locale
    #[must_use]
    pub fn with_locale(&self, locale: &str) -> Self {
        Self {
            inner: self.inner,
            locale: locale.to_owned(),
        }
    }

    /// Same instant, seen from a different offset
    #[must_use]
    pub fn with_offset(&self, offset: FixedOffset) -> Self {
        Self {
            inner: self.inner.with_timezone(&offset),
            locale: self.locale.clone(),
        }
    }

    /// The locale table for this date, falling back to the default locale
    pub fn locale_data(&self) -> Arc<LocaleData> {
        locale::resolve(&self.locale)
    }

    /// This date's day in the Hijri calendar
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if the year is outside what the Hijri calendar converts.
    pub fn hijri(&self) -> Result<HijriDate, DateError> {
        HijriDate::from_gregorian(self.naive_local().date())
    }

    /// Same offset and locale, new wall-clock time
    pub(crate) fn with_naive_local(&self, naive: NaiveDateTime) -> Result<Self, DateError> {
        let inner = self
            .offset()
            .from_local_datetime(&naive)
            .single()
            .ok_or(DateError::OutOfRange)?;
        Ok(Self {
            inner,
            locale: self.locale.clone(),
        })
    }

    /// Same offset and locale, new instant
    pub(crate) fn with_instant(&self, inner: DateTime<FixedOffset>) -> Self {
        Self {
            inner: inner.with_timezone(&self.offset()),
            locale: self.locale.clone(),
        }
    }
}

impl From<DateTime<FixedOffset>> for PickerDate {
    fn from(inner: DateTime<FixedOffset>) -> Self {
        Self::new(inner)
    }
}

impl From<DateTime<Utc>> for PickerDate {
    fn from(inner: DateTime<Utc>) -> Self {
        Self::new(inner.fixed_offset())
    }
}

impl PartialEq for PickerDate {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for PickerDate {}

impl PartialOrd for PickerDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PickerDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}

impl Hash for PickerDate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl std::fmt::Display for PickerDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner.to_rfc3339())
    }
}

impl serde::Serialize for PickerDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.inner.to_rfc3339())
    }
}

impl<'de> serde::Deserialize<'de> for PickerDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(Self::new)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_from_ymd() {
        let date = PickerDate::from_ymd(2024, 1, 29, utc()).unwrap();
        let naive = date.naive_local();
        assert_eq!((naive.year(), naive.month0(), naive.day()), (2024, 1, 29));
        assert_eq!(naive.hour(), 0);
        assert_eq!(date.locale(), DEFAULT_LOCALE);
    }

    #[test]
    fn test_from_ymd_invalid() {
        let result = PickerDate::from_ymd(2023, 1, 29, utc());
        assert!(matches!(result, Err(DateError::InvalidDate { month: 2, day: 29, .. })));

        let result = PickerDate::from_ymd(2024, 12, 1, utc());
        assert!(matches!(result, Err(DateError::InvalidDate { month: 13, .. })));
    }

    #[test]
    fn test_month_index_at_u32_max_is_an_error() {
        let result = PickerDate::from_ymd(2024, u32::MAX, 1, utc());
        assert!(matches!(result, Err(DateError::InvalidDate { month: u32::MAX, .. })));

        let result = PickerDate::from_hijri(1445, u32::MAX, 1, utc());
        assert!(matches!(result, Err(DateError::InvalidHijriDate { month: u32::MAX, .. })));
    }

    #[test]
    fn test_from_hijri() {
        let date = PickerDate::from_hijri(1445, 0, 1, utc()).unwrap();
        assert_eq!(date.naive_local().date(), NaiveDate::from_ymd_opt(2023, 7, 19).unwrap());
        assert_eq!(date.hijri().unwrap(), HijriDate::new(1445, 0, 1).unwrap());

        let muharram = PickerDate::from_hijri(1446, 0, 1, utc()).unwrap();
        assert_eq!(muharram.naive_local().date(), NaiveDate::from_ymd_opt(2024, 7, 7).unwrap());

        let result = PickerDate::from_hijri(1446, 0, 31, utc());
        assert!(matches!(result, Err(DateError::InvalidHijriDate { .. })));
    }

    #[test]
    fn test_equality_ignores_offset_and_locale() {
        let a = PickerDate::from_ymd(2024, 0, 1, utc()).unwrap();
        let b = a
            .with_offset(FixedOffset::east_opt(3 * 3600).unwrap())
            .with_locale(ARABIC_SAUDI_LOCALE);
        assert_eq!(a, b);
        assert_eq!(b.naive_local().hour(), 3);
        assert_eq!(b.utc_offset_minutes(), 180);
        assert_eq!(b.locale(), ARABIC_SAUDI_LOCALE);
        assert_eq!(a.locale(), DEFAULT_LOCALE);
    }

    #[test]
    fn test_ordering() {
        let a = PickerDate::from_ymd(2024, 0, 1, utc()).unwrap();
        let b = PickerDate::from_ymd(2024, 0, 2, utc()).unwrap();
        assert!(a < b);
        assert_eq!(a.cmp(&a.clone()), Ordering::Equal);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = PickerDate::from_ymd(2024, 0, 1, utc()).unwrap();
        let moved = add_days(&original.clone(), 5, Calendar::Gregorian).unwrap();
        assert_eq!(original.naive_local().day(), 1);
        assert_eq!(moved.naive_local().day(), 6);
    }

    #[test]
    fn test_serde() {
        let date = PickerDate::from_ymd(2024, 7, 15, FixedOffset::east_opt(3 * 3600).unwrap())
            .unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#""2024-08-15T00:00:00+03:00""#);
        let parsed: PickerDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, date);
        assert_eq!(parsed.utc_offset_minutes(), 180);
    }

    #[test]
    fn test_serde_rejects_garbage() {
        let result: Result<PickerDate, _> = serde_json::from_str(r#""yesterday""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_error_display() {
        let err = DateError::InvalidHijriDate {
            year: 1446,
            month: 13,
            day: 1,
        };
        assert_eq!(err.to_string(), "Invalid Hijri date 1446-13-01");
        assert_eq!(DateError::OutOfRange.to_string(), "Date out of range");
    }
}
