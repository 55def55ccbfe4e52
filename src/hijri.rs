//! Hijri dates in the Umm al-Qura calendar.
//!
//! Conversions and month lengths come from ICU4X's `HijriUmmAlQura`, which
//! follows the published Saudi tables. Months are zero-based, days one-based.

use crate::DateError;
use crate::consts::{LAST_MONTH_INDEX, MONTHS_PER_YEAR};
use crate::prelude::*;
use chrono::{Datelike, NaiveDate};
use icu::calendar::Date;
use icu::calendar::cal::HijriUmmAlQura;

/// A calendar date in the Hijri calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year", "month0 + 1", "day")]
pub struct HijriDate {
    year: i32,
    month0: u32,
    day: u32,
}

fn invalid(year: i32, month0: u32, day: u32) -> DateError {
    DateError::InvalidHijriDate {
        year: i64::from(year),
        month: month0.saturating_add(1),
        day,
    }
}

fn umm_al_qura(year: i32, month0: u32, day: u32) -> Result<Date<HijriUmmAlQura>, DateError> {
    if month0 > LAST_MONTH_INDEX {
        return Err(invalid(year, month0, day));
    }
    let month = u8::try_from(month0 + 1).map_err(|_| invalid(year, month0, day))?;
    let day_of_month = u8::try_from(day).map_err(|_| invalid(year, month0, day))?;
    Date::try_new_ummalqura(year, month, day_of_month).map_err(|err| {
        tracing::debug!("Rejected Hijri date {year}-{month}-{day}: {err}");
        invalid(year, month0, day)
    })
}

/// Days in a Hijri month
///
/// # Errors
/// Returns `DateError::InvalidHijriDate` if `month0 > 11` or the year can't be converted.
pub fn days_in_month(year: i32, month0: u32) -> Result<u32, DateError> {
    Ok(u32::from(umm_al_qura(year, month0, 1)?.days_in_month()))
}

/// Days in a Hijri year, 354 or 355 (rarely 353 or 356 in the Umm al-Qura tables)
///
/// # Errors
/// Returns `DateError::InvalidHijriDate` if the year can't be converted.
pub fn days_in_year(year: i32) -> Result<u32, DateError> {
    Ok(u32::from(umm_al_qura(year, 0, 1)?.days_in_year()))
}

impl HijriDate {
    /// Creates a Hijri date, validating the month index and the day of month.
    ///
    /// # Errors
    /// Returns `DateError::InvalidHijriDate` if `month0 > 11` or `day` is not in the month.
    pub fn new(year: i32, month0: u32, day: u32) -> Result<Self, DateError> {
        umm_al_qura(year, month0, day)?;
        Ok(Self { year, month0, day })
    }

    fn from_icu(date: &Date<HijriUmmAlQura>) -> Self {
        Self {
            year: date.extended_year(),
            month0: u32::from(date.month().ordinal).saturating_sub(1),
            day: u32::from(date.day_of_month().0),
        }
    }

    #[inline]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Zero-based month index
    #[inline]
    pub const fn month0(self) -> u32 {
        self.month0
    }

    #[inline]
    pub const fn day(self) -> u32 {
        self.day
    }

    /// # Errors
    /// Returns `DateError::OutOfRange` if the year is outside what the calendar converts.
    pub fn from_gregorian(date: NaiveDate) -> Result<Self, DateError> {
        let iso = u8::try_from(date.month())
            .ok()
            .zip(u8::try_from(date.day()).ok())
            .and_then(|(month, day)| Date::try_new_iso(date.year(), month, day).ok())
            .ok_or(DateError::OutOfRange)?;
        Ok(Self::from_icu(&iso.to_calendar(HijriUmmAlQura::new())))
    }

    /// # Errors
    /// Returns `DateError::OutOfRange` if the date can't be represented by chrono.
    pub fn to_gregorian(self) -> Result<NaiveDate, DateError> {
        let iso = umm_al_qura(self.year, self.month0, self.day)?.to_iso();
        NaiveDate::from_ymd_opt(
            iso.extended_year(),
            u32::from(iso.month().ordinal),
            u32::from(iso.day_of_month().0),
        )
        .ok_or(DateError::OutOfRange)
    }

    /// One-based day of the year
    ///
    /// # Errors
    /// As [`HijriDate::to_gregorian`].
    pub fn ordinal(self) -> Result<u32, DateError> {
        let start = self.first_of_year().to_gregorian()?;
        let days = (self.to_gregorian()? - start).num_days();
        u32::try_from(days + 1).map_err(|_| DateError::OutOfRange)
    }

    /// First day of this date's month
    pub const fn first_of_month(self) -> Self {
        Self {
            day: 1,
            ..self
        }
    }

    /// First day of this date's year
    pub const fn first_of_year(self) -> Self {
        Self {
            year: self.year,
            month0: 0,
            day: 1,
        }
    }

    /// Moves to year/month given as a month count since year 0, clamping the day
    fn at_month_count(self, months: i64) -> Result<Self, DateError> {
        let year = i32::try_from(months.div_euclid(MONTHS_PER_YEAR))
            .map_err(|_| DateError::OutOfRange)?;
        let month0 = u32::try_from(months.rem_euclid(MONTHS_PER_YEAR))
            .map_err(|_| DateError::OutOfRange)?;
        let length = days_in_month(year, month0).map_err(|_| DateError::OutOfRange)?;
        Ok(Self {
            year,
            month0,
            day: self.day.min(length),
        })
    }

    fn month_count(self) -> i64 {
        i64::from(self.year) * MONTHS_PER_YEAR + i64::from(self.month0)
    }

    /// Shifts by whole lunar months, clamping the day to the target month's length.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` on overflow.
    pub fn add_months(self, months: i64) -> Result<Self, DateError> {
        let count = self
            .month_count()
            .checked_add(months)
            .ok_or(DateError::OutOfRange)?;
        self.at_month_count(count)
    }

    /// Sets the month index; values outside `0..=11` roll into adjacent years.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` on overflow.
    pub fn with_month(self, month0: i64) -> Result<Self, DateError> {
        let count = (i64::from(self.year) * MONTHS_PER_YEAR)
            .checked_add(month0)
            .ok_or(DateError::OutOfRange)?;
        self.at_month_count(count)
    }

    /// Sets the year, clamping the day when the target month is shorter.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` if `year` doesn't fit in an `i32`.
    pub fn with_year(self, year: i64) -> Result<Self, DateError> {
        let count = year
            .checked_mul(MONTHS_PER_YEAR)
            .and_then(|c| c.checked_add(i64::from(self.month0)))
            .ok_or(DateError::OutOfRange)?;
        self.at_month_count(count)
    }
}

impl TryFrom<NaiveDate> for HijriDate {
    type Error = DateError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_gregorian(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// First day of the first month in `year` that is `length` days long
    fn month_of_length(year: i32, length: u32) -> HijriDate {
        let month0 = (0..=LAST_MONTH_INDEX)
            .find(|m| days_in_month(year, *m).unwrap() == length)
            .unwrap();
        HijriDate::new(year, month0, 1).unwrap()
    }

    #[test]
    fn test_known_month_starts() {
        struct TestCase {
            hijri: (i32, u32),
            gregorian: NaiveDate,
        }

        let cases = [
            TestCase {
                hijri: (1445, 0),
                gregorian: ymd(2023, 7, 19),
            },
            TestCase {
                hijri: (1445, 8),
                gregorian: ymd(2024, 3, 11),
            },
            TestCase {
                hijri: (1446, 0),
                gregorian: ymd(2024, 7, 7),
            },
            TestCase {
                hijri: (1444, 9),
                gregorian: ymd(2023, 4, 21),
            },
            TestCase {
                hijri: (1446, 9),
                gregorian: ymd(2025, 3, 30),
            },
        ];

        for case in &cases {
            let (year, month0) = case.hijri;
            let first = HijriDate::new(year, month0, 1).unwrap();
            assert_eq!(first.to_gregorian().unwrap(), case.gregorian, "{first}");
            assert_eq!(HijriDate::try_from(case.gregorian).unwrap(), first);
        }
    }

    #[test]
    fn test_day_before_a_month_start() {
        // 2024-07-06 closes Dhu al-Hijjah 1445
        let last = HijriDate::from_gregorian(ymd(2024, 7, 6)).unwrap();
        assert_eq!((last.year(), last.month0()), (1445, 11));
        assert_eq!(last.day(), days_in_month(1445, 11).unwrap());

        let eve = HijriDate::from_gregorian(ymd(2025, 3, 29)).unwrap();
        assert_eq!((eve.year(), eve.month0()), (1446, 8));
    }

    #[test]
    fn test_round_trip_across_years() {
        let start = ymd(2015, 1, 1);
        for offset in 0..4000 {
            let gregorian = start + chrono::Days::new(offset);
            let hijri = HijriDate::from_gregorian(gregorian).unwrap();
            assert_eq!(hijri.to_gregorian().unwrap(), gregorian);
        }
    }

    #[test]
    fn test_month_and_year_lengths() {
        for year in 1440..1450 {
            let total: u32 = (0..=LAST_MONTH_INDEX)
                .map(|m| {
                    let length = days_in_month(year, m).unwrap();
                    assert!((29..=30).contains(&length), "{year}-{m}");
                    length
                })
                .sum();
            assert_eq!(total, days_in_year(year).unwrap(), "{year}");
        }
    }

    #[test]
    fn test_new_rejects_invalid() {
        assert!(matches!(
            HijriDate::new(1446, 12, 1),
            Err(DateError::InvalidHijriDate { month: 13, .. })
        ));
        assert!(matches!(
            HijriDate::new(1445, u32::MAX, 1),
            Err(DateError::InvalidHijriDate { month: u32::MAX, .. })
        ));
        assert!(HijriDate::new(1446, 0, 0).is_err());
        assert!(HijriDate::new(1446, 0, 31).is_err());
        assert!(HijriDate::new(1446, 0, u32::MAX).is_err());

        let short = month_of_length(1446, 29);
        assert!(HijriDate::new(1446, short.month0(), 29).is_ok());
        assert!(HijriDate::new(1446, short.month0(), 30).is_err());
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(HijriDate::new(1445, 0, 1).unwrap().ordinal().unwrap(), 1);
        let second_month = days_in_month(1445, 0).unwrap() + 1;
        assert_eq!(HijriDate::new(1445, 1, 1).unwrap().ordinal().unwrap(), second_month);

        let last = days_in_month(1445, 11).unwrap();
        let end = HijriDate::new(1445, 11, last).unwrap();
        assert_eq!(end.ordinal().unwrap(), days_in_year(1445).unwrap());
    }

    #[test]
    fn test_add_months_clamps_day() {
        let long = month_of_length(1445, 30);
        let day30 = HijriDate::new(1445, long.month0(), 30).unwrap();
        let next = day30.add_months(1).unwrap();
        let next_length = days_in_month(next.year(), next.month0()).unwrap();
        assert_eq!(next.day(), next_length.min(30));
        assert_eq!(next.month_count(), day30.month_count() + 1);

        let first = HijriDate::new(1445, 0, 1).unwrap();
        let back = first.add_months(-1).unwrap();
        assert_eq!((back.year(), back.month0(), back.day()), (1444, 11, 1));

        let year_later = first.add_months(12).unwrap();
        assert_eq!((year_later.year(), year_later.month0()), (1446, 0));
    }

    #[test]
    fn test_with_month_and_year() {
        let last_day = days_in_month(1445, 11).unwrap();
        let date = HijriDate::new(1445, 11, last_day).unwrap();

        let moved = date.with_year(1446).unwrap();
        let target_length = days_in_month(1446, 11).unwrap();
        assert_eq!(
            (moved.year(), moved.month0(), moved.day()),
            (1446, 11, last_day.min(target_length))
        );

        let rolled = date.with_month(12).unwrap();
        let muharram_length = days_in_month(1446, 0).unwrap();
        assert_eq!(
            (rolled.year(), rolled.month0(), rolled.day()),
            (1446, 0, last_day.min(muharram_length))
        );

        let back = date.with_month(-1).unwrap();
        let back_length = days_in_month(1444, 11).unwrap();
        assert_eq!(
            (back.year(), back.month0(), back.day()),
            (1444, 11, last_day.min(back_length))
        );
    }

    #[test]
    fn test_display() {
        let date = HijriDate::new(1445, 8, 1).unwrap();
        assert_eq!(date.to_string(), "1445-09-01");
    }
}
