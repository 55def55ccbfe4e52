//! Date format strings.
//!
//! Tokens are matched longest first. `[...]` is copied out literally, and
//! the long-date tokens (`LT`, `LTS`, `L`, `LL`, `LLL`, `LLLL`) expand from
//! the locale before anything else. Tokens prefixed with `i` read the Hijri
//! calendar. Digits are always Western.

use crate::consts::{
    DEFAULT_DATE_FORMAT, HIJRI_TWO_DIGIT_YEAR_BASE, MONTHS_PER_YEAR, TWO_DIGIT_YEAR_PIVOT,
};
use crate::dispatch::{self, week_of_year, weekday_from_sunday};
use crate::hijri::HijriDate;
use crate::locale::{self, LocaleData};
use crate::types::Calendar;
use crate::PickerDate;
use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveTime, TimeZone, Timelike,
};

const LONG_DATE_TOKENS: [&str; 6] = ["LTS", "LLLL", "LLL", "LT", "LL", "L"];

// Long-date formats may refer to each other
const MAX_LONG_DATE_EXPANSIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    HijriYear,
    HijriYearTwoDigit,
    HijriMonthName,
    HijriMonthShort,
    HijriMonthPadded,
    HijriMonth,
    HijriDayOrdinal,
    HijriDayPadded,
    HijriDay,
    HijriWeekPadded,
    HijriWeek,
    HijriWeekYear,
    HijriWeekYearTwoDigit,
    Year,
    YearTwoDigit,
    MonthName,
    MonthShort,
    MonthPadded,
    Month,
    DayOrdinal,
    DayPadded,
    Day,
    WeekdayName,
    WeekdayShort,
    WeekdayMin,
    Weekday,
    WeekYear,
    WeekYearTwoDigit,
    WeekPadded,
    Week,
    HourPadded,
    Hour,
    Hour12Padded,
    Hour12,
    MinutePadded,
    Minute,
    SecondPadded,
    Second,
    MeridiemUpper,
    MeridiemLower,
    OffsetBasic,
    Offset,
    UnixMillis,
    UnixSeconds,
}

/// Longest tokens first
const FIELDS: [(&str, Field); 44] = [
    ("iYYYY", Field::HijriYear),
    ("iMMMM", Field::HijriMonthName),
    ("igggg", Field::HijriWeekYear),
    ("iMMM", Field::HijriMonthShort),
    ("YYYY", Field::Year),
    ("MMMM", Field::MonthName),
    ("dddd", Field::WeekdayName),
    ("gggg", Field::WeekYear),
    ("iYY", Field::HijriYearTwoDigit),
    ("iMM", Field::HijriMonthPadded),
    ("iDo", Field::HijriDayOrdinal),
    ("iDD", Field::HijriDayPadded),
    ("iww", Field::HijriWeekPadded),
    ("igg", Field::HijriWeekYearTwoDigit),
    ("MMM", Field::MonthShort),
    ("ddd", Field::WeekdayShort),
    ("iM", Field::HijriMonth),
    ("iD", Field::HijriDay),
    ("iw", Field::HijriWeek),
    ("YY", Field::YearTwoDigit),
    ("MM", Field::MonthPadded),
    ("Do", Field::DayOrdinal),
    ("DD", Field::DayPadded),
    ("dd", Field::WeekdayMin),
    ("gg", Field::WeekYearTwoDigit),
    ("ww", Field::WeekPadded),
    ("HH", Field::HourPadded),
    ("hh", Field::Hour12Padded),
    ("mm", Field::MinutePadded),
    ("ss", Field::SecondPadded),
    ("ZZ", Field::OffsetBasic),
    ("M", Field::Month),
    ("D", Field::Day),
    ("d", Field::Weekday),
    ("w", Field::Week),
    ("H", Field::Hour),
    ("h", Field::Hour12),
    ("m", Field::Minute),
    ("s", Field::Second),
    ("A", Field::MeridiemUpper),
    ("a", Field::MeridiemLower),
    ("Z", Field::Offset),
    ("x", Field::UnixMillis),
    ("X", Field::UnixSeconds),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
    Literal(&'a str),
    Field(Field),
}

fn expand_once(format: &str, data: &LocaleData) -> String {
    let mut out = String::with_capacity(format.len());
    let mut rest = format;
    while let Some(c) = rest.chars().next() {
        if let Some(end) = rest.strip_prefix('[').and_then(|_| rest.find(']')) {
            out.push_str(&rest[..=end]);
            rest = &rest[end + 1..];
            continue;
        }
        let long = LONG_DATE_TOKENS
            .iter()
            .find(|token| rest.starts_with(**token))
            .and_then(|token| data.long_date_format(token).map(|expansion| (*token, expansion)));
        match long {
            Some((token, expansion)) => {
                out.push_str(expansion);
                rest = &rest[token.len()..];
            }
            None => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    out
}

fn expand_long_date(format: &str, data: &LocaleData) -> String {
    let mut current = format.to_owned();
    for _ in 0..MAX_LONG_DATE_EXPANSIONS {
        let next = expand_once(&current, data);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn tokenize(format: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut rest = format;
    while let Some(c) = rest.chars().next() {
        if let Some(end) = rest.strip_prefix('[').and_then(|_| rest.find(']')) {
            pieces.push(Piece::Literal(&rest[1..end]));
            rest = &rest[end + 1..];
            continue;
        }
        if let Some((token, field)) = FIELDS.iter().find(|(token, _)| rest.starts_with(token)) {
            pieces.push(Piece::Field(*field));
            rest = &rest[token.len()..];
        } else {
            pieces.push(Piece::Literal(&rest[..c.len_utf8()]));
            rest = &rest[c.len_utf8()..];
        }
    }
    pieces
}

fn two_digits(value: i64) -> String {
    format!("{:02}", value.rem_euclid(100))
}

fn offset_string(minutes: i32, separator: &str) -> String {
    let sign = if minutes < 0 { '-' } else { '+' };
    let minutes = minutes.unsigned_abs();
    format!("{sign}{:02}{separator}{:02}", minutes / 60, minutes % 60)
}

const fn hour12(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

/// Hijri fields of dates the Hijri calendar can't convert render as nothing
fn hijri_field(date: &PickerDate, render: impl FnOnce(HijriDate) -> String) -> String {
    date.hijri().map(render).unwrap_or_else(|err| {
        tracing::warn!("Can't render Hijri field of {date}: {err}");
        String::new()
    })
}

fn render(date: &PickerDate, field: Field, data: &LocaleData, out: &mut String) {
    let naive = date.naive_local();
    let rendered = match field {
        Field::HijriYear => hijri_field(date, |h| format!("{:04}", h.year())),
        Field::HijriYearTwoDigit => hijri_field(date, |h| two_digits(i64::from(h.year()))),
        Field::HijriMonthName => hijri_field(date, |h| data.hijri_month_name(h.month0()).to_owned()),
        Field::HijriMonthShort => {
            hijri_field(date, |h| data.hijri_month_short_name(h.month0()).to_owned())
        }
        Field::HijriMonthPadded => hijri_field(date, |h| format!("{:02}", h.month0() + 1)),
        Field::HijriMonth => hijri_field(date, |h| (h.month0() + 1).to_string()),
        Field::HijriDayOrdinal => hijri_field(date, |h| data.ordinal(h.day())),
        Field::HijriDayPadded => hijri_field(date, |h| format!("{:02}", h.day())),
        Field::HijriDay => hijri_field(date, |h| h.day().to_string()),
        Field::HijriWeekPadded => format!("{:02}", week_of_year(date, Calendar::Hijri).0),
        Field::HijriWeek => week_of_year(date, Calendar::Hijri).0.to_string(),
        Field::HijriWeekYear => format!("{:04}", week_of_year(date, Calendar::Hijri).1),
        Field::HijriWeekYearTwoDigit => two_digits(week_of_year(date, Calendar::Hijri).1),
        Field::Year => format!("{:04}", naive.year()),
        Field::YearTwoDigit => two_digits(i64::from(naive.year())),
        Field::MonthName => data.month_name(naive.month0()).to_owned(),
        Field::MonthShort => data.month_short_name(naive.month0()).to_owned(),
        Field::MonthPadded => format!("{:02}", naive.month()),
        Field::Month => naive.month().to_string(),
        Field::DayOrdinal => data.ordinal(naive.day()),
        Field::DayPadded => format!("{:02}", naive.day()),
        Field::Day => naive.day().to_string(),
        Field::WeekdayName => data.weekday_name(weekday_from_sunday(date)).to_owned(),
        Field::WeekdayShort => data.weekday_short_name(weekday_from_sunday(date)).to_owned(),
        Field::WeekdayMin => data.weekday_min_name(weekday_from_sunday(date)).to_owned(),
        Field::Weekday => weekday_from_sunday(date).to_string(),
        Field::WeekYear => format!("{:04}", week_of_year(date, Calendar::Gregorian).1),
        Field::WeekYearTwoDigit => two_digits(week_of_year(date, Calendar::Gregorian).1),
        Field::WeekPadded => format!("{:02}", week_of_year(date, Calendar::Gregorian).0),
        Field::Week => week_of_year(date, Calendar::Gregorian).0.to_string(),
        Field::HourPadded => format!("{:02}", naive.hour()),
        Field::Hour => naive.hour().to_string(),
        Field::Hour12Padded => format!("{:02}", hour12(naive.hour())),
        Field::Hour12 => hour12(naive.hour()).to_string(),
        Field::MinutePadded => format!("{:02}", naive.minute()),
        Field::Minute => naive.minute().to_string(),
        Field::SecondPadded => format!("{:02}", naive.second()),
        Field::Second => naive.second().to_string(),
        Field::MeridiemUpper => data.meridiem(naive.hour(), false),
        Field::MeridiemLower => data.meridiem(naive.hour(), true),
        Field::OffsetBasic => offset_string(date.utc_offset_minutes(), ""),
        Field::Offset => offset_string(date.utc_offset_minutes(), ":"),
        Field::UnixMillis => date.timestamp_millis().to_string(),
        Field::UnixSeconds => date.datetime().timestamp().to_string(),
    };
    out.push_str(&rendered);
}

/// Renders `date` with a format string, using the date's locale
pub(crate) fn format(date: &PickerDate, format: &str) -> String {
    let data = date.locale_data();
    let expanded = expand_long_date(format, &data);
    let mut out = String::with_capacity(expanded.len() * 2);
    for piece in tokenize(&expanded) {
        match piece {
            Piece::Literal(text) => out.push_str(text),
            Piece::Field(field) => render(date, field, &data, &mut out),
        }
    }
    out
}

// --- parsing ---

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    /// Between `min` and `max` ASCII digits
    fn digits(&mut self, min: usize, max: usize) -> Option<i64> {
        let len = self
            .rest
            .bytes()
            .take(max)
            .take_while(u8::is_ascii_digit)
            .count();
        if len < min {
            return None;
        }
        let (number, rest) = self.rest.split_at(len);
        self.rest = rest;
        number.parse().ok()
    }

    fn signed_digits(&mut self) -> Option<i64> {
        let negative = self.rest.starts_with('-');
        if negative {
            self.rest = &self.rest[1..];
        }
        let value = self.digits(1, 19)?;
        Some(if negative { -value } else { value })
    }

    fn literal(&mut self, text: &str) -> Option<()> {
        self.rest = self.rest.strip_prefix(text)?;
        Some(())
    }

    /// Index of the longest entry of `names` the input starts with, ignoring case
    fn name(&mut self, names: &[String]) -> Option<i64> {
        let (index, len) = names
            .iter()
            .enumerate()
            .filter(|(_, name)| !name.is_empty())
            .filter(|(_, name)| {
                self.rest
                    .get(..name.len())
                    .is_some_and(|head| head.to_lowercase() == name.to_lowercase())
            })
            .map(|(index, name)| (index, name.len()))
            .max_by_key(|(_, len)| *len)?;
        self.rest = &self.rest[len..];
        i64::try_from(index).ok()
    }

    /// `Z`, `+HH:mm` or `+HHmm`, in minutes east of UTC
    fn offset(&mut self) -> Option<i32> {
        if self.literal("Z").is_some() {
            return Some(0);
        }
        let negative = match self.rest.chars().next()? {
            '+' => false,
            '-' => true,
            _ => return None,
        };
        self.rest = &self.rest[1..];
        let hours = self.digits(2, 2)?;
        let _ = self.literal(":");
        let minutes = self.digits(2, 2)?;
        let total = i32::try_from(hours * 60 + minutes).ok()?;
        Some(if negative { -total } else { total })
    }
}

/// Fields picked out of the input, before any defaults are applied
#[derive(Debug, Default)]
struct Parsed {
    year: Option<i64>,
    month0: Option<i64>,
    day: Option<i64>,
    hijri_year: Option<i64>,
    hijri_month0: Option<i64>,
    hijri_day: Option<i64>,
    hour: Option<i64>,
    twelve_hour: bool,
    minute: Option<i64>,
    second: Option<i64>,
    pm: Option<bool>,
    weekday: Option<i64>,
    week: Option<i64>,
    week_year: Option<i64>,
    hijri_week: Option<i64>,
    hijri_week_year: Option<i64>,
    offset: Option<i32>,
    timestamp_millis: Option<i64>,
}

fn gregorian_two_digit_year(value: i64) -> i64 {
    if value > i64::from(TWO_DIGIT_YEAR_PIVOT) {
        1900 + value
    } else {
        2000 + value
    }
}

fn ordinal_day(cursor: &mut Cursor<'_>, data: &LocaleData) -> Option<i64> {
    let start = cursor.rest;
    let day = cursor.digits(1, 2)?;
    let expected = data.ordinal(u32::try_from(day).ok()?);
    cursor.rest = start.strip_prefix(expected.as_str())?;
    Some(day)
}

fn meridiem(cursor: &mut Cursor<'_>, data: &LocaleData) -> Option<bool> {
    let names = [data.meridiem.am.clone(), data.meridiem.pm.clone()];
    cursor.name(&names).map(|index| index == 1)
}

fn read_field(cursor: &mut Cursor<'_>, field: Field, data: &LocaleData, parsed: &mut Parsed) -> Option<()> {
    match field {
        Field::HijriYear => parsed.hijri_year = Some(cursor.digits(4, 4)?),
        Field::HijriYearTwoDigit => {
            parsed.hijri_year = Some(i64::from(HIJRI_TWO_DIGIT_YEAR_BASE) + cursor.digits(2, 2)?);
        }
        Field::HijriMonthName => {
            parsed.hijri_month0 = Some(cursor.name(&data.hijri_months)?);
        }
        Field::HijriMonthShort => {
            parsed.hijri_month0 = Some(cursor.name(&data.hijri_months_short)?);
        }
        Field::HijriMonthPadded => parsed.hijri_month0 = Some(cursor.digits(2, 2)? - 1),
        Field::HijriMonth => parsed.hijri_month0 = Some(cursor.digits(1, 2)? - 1),
        Field::HijriDayOrdinal => parsed.hijri_day = Some(ordinal_day(cursor, data)?),
        Field::HijriDayPadded => parsed.hijri_day = Some(cursor.digits(2, 2)?),
        Field::HijriDay => parsed.hijri_day = Some(cursor.digits(1, 2)?),
        Field::HijriWeekPadded => parsed.hijri_week = Some(cursor.digits(2, 2)?),
        Field::HijriWeek => parsed.hijri_week = Some(cursor.digits(1, 2)?),
        Field::HijriWeekYear => parsed.hijri_week_year = Some(cursor.digits(4, 4)?),
        Field::HijriWeekYearTwoDigit => {
            parsed.hijri_week_year =
                Some(i64::from(HIJRI_TWO_DIGIT_YEAR_BASE) + cursor.digits(2, 2)?);
        }
        Field::Year => parsed.year = Some(cursor.digits(4, 4)?),
        Field::YearTwoDigit => parsed.year = Some(gregorian_two_digit_year(cursor.digits(2, 2)?)),
        Field::MonthName => parsed.month0 = Some(cursor.name(&data.months)?),
        Field::MonthShort => parsed.month0 = Some(cursor.name(&data.months_short)?),
        Field::MonthPadded => parsed.month0 = Some(cursor.digits(2, 2)? - 1),
        Field::Month => parsed.month0 = Some(cursor.digits(1, 2)? - 1),
        Field::DayOrdinal => parsed.day = Some(ordinal_day(cursor, data)?),
        Field::DayPadded => parsed.day = Some(cursor.digits(2, 2)?),
        Field::Day => parsed.day = Some(cursor.digits(1, 2)?),
        Field::WeekdayName => parsed.weekday = Some(cursor.name(&data.weekdays)?),
        Field::WeekdayShort => parsed.weekday = Some(cursor.name(&data.weekdays_short)?),
        Field::WeekdayMin => parsed.weekday = Some(cursor.name(&data.weekdays_min)?),
        Field::Weekday => parsed.weekday = Some(cursor.digits(1, 1)?),
        Field::WeekYear => parsed.week_year = Some(cursor.digits(4, 4)?),
        Field::WeekYearTwoDigit => {
            parsed.week_year = Some(gregorian_two_digit_year(cursor.digits(2, 2)?));
        }
        Field::WeekPadded => parsed.week = Some(cursor.digits(2, 2)?),
        Field::Week => parsed.week = Some(cursor.digits(1, 2)?),
        Field::HourPadded => parsed.hour = Some(cursor.digits(2, 2)?),
        Field::Hour => parsed.hour = Some(cursor.digits(1, 2)?),
        Field::Hour12Padded => {
            parsed.hour = Some(cursor.digits(2, 2)?);
            parsed.twelve_hour = true;
        }
        Field::Hour12 => {
            parsed.hour = Some(cursor.digits(1, 2)?);
            parsed.twelve_hour = true;
        }
        Field::MinutePadded => parsed.minute = Some(cursor.digits(2, 2)?),
        Field::Minute => parsed.minute = Some(cursor.digits(1, 2)?),
        Field::SecondPadded => parsed.second = Some(cursor.digits(2, 2)?),
        Field::Second => parsed.second = Some(cursor.digits(1, 2)?),
        Field::MeridiemUpper | Field::MeridiemLower => parsed.pm = Some(meridiem(cursor, data)?),
        Field::OffsetBasic | Field::Offset => parsed.offset = Some(cursor.offset()?),
        Field::UnixMillis => parsed.timestamp_millis = Some(cursor.signed_digits()?),
        Field::UnixSeconds => {
            parsed.timestamp_millis = Some(cursor.signed_digits()?.checked_mul(1000)?);
        }
    }
    Some(())
}

/// Leading missing fields come from today, later ones from the start of the period
fn fill_date_fields(given: [Option<i64>; 3], today: [i64; 3]) -> [i64; 3] {
    let first_given = given.iter().position(Option::is_some).unwrap_or(given.len());
    let mut filled = [0, 0, 1];
    for (index, slot) in filled.iter_mut().enumerate() {
        *slot = match given[index] {
            Some(value) => value,
            None if index < first_given => today[index],
            None => *slot,
        };
    }
    filled
}

fn resolve_date(parsed: &Parsed, today: NaiveDate) -> Option<NaiveDate> {
    let hijri_given = [parsed.hijri_year, parsed.hijri_month0, parsed.hijri_day];
    let gregorian_given = [parsed.year, parsed.month0, parsed.day];

    if hijri_given.iter().any(Option::is_some) {
        if gregorian_given.iter().any(Option::is_some) {
            return None;
        }
        let current = HijriDate::from_gregorian(today).ok()?;
        let [year, month0, day] = fill_date_fields(
            hijri_given,
            [
                i64::from(current.year()),
                i64::from(current.month0()),
                i64::from(current.day()),
            ],
        );
        let hijri = HijriDate::new(
            i32::try_from(year).ok()?,
            u32::try_from(month0).ok()?,
            u32::try_from(day).ok()?,
        )
        .ok()?;
        return hijri.to_gregorian().ok();
    }

    let [year, month0, day] = fill_date_fields(
        gregorian_given,
        [
            i64::from(today.year()),
            i64::from(today.month0()),
            i64::from(today.day()),
        ],
    );
    if !(0..MONTHS_PER_YEAR).contains(&month0) {
        return None;
    }
    NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month0 + 1).ok()?,
        u32::try_from(day).ok()?,
    )
}

fn resolve_time(parsed: &Parsed) -> Option<NaiveTime> {
    let mut hour = parsed.hour.unwrap_or(0);
    if parsed.twelve_hour && parsed.pm.is_some() && !(1..=12).contains(&hour) {
        return None;
    }
    match parsed.pm {
        Some(true) if hour < 12 => hour += 12,
        Some(false) if hour == 12 => hour = 0,
        _ => {}
    }
    NaiveTime::from_hms_opt(
        u32::try_from(hour).ok()?,
        u32::try_from(parsed.minute.unwrap_or(0)).ok()?,
        u32::try_from(parsed.second.unwrap_or(0)).ok()?,
    )
}

fn in_host_zone(instant: DateTime<FixedOffset>) -> PickerDate {
    PickerDate::new(instant.with_timezone(&Local).fixed_offset())
}

/// The parsed week fields agree with the date they describe
fn weeks_agree(date: &PickerDate, parsed: &Parsed) -> bool {
    let agrees = |calendar, week: Option<i64>, week_year: Option<i64>| {
        if week.is_none() && week_year.is_none() {
            return true;
        }
        let (actual_week, actual_year) = week_of_year(date, calendar);
        week.is_none_or(|w| w == actual_week) && week_year.is_none_or(|y| y == actual_year)
    };
    agrees(Calendar::Gregorian, parsed.week, parsed.week_year)
        && agrees(Calendar::Hijri, parsed.hijri_week, parsed.hijri_week_year)
}

fn parse_with(
    value: &str,
    format: &str,
    locale_name: &str,
    data: &LocaleData,
    today: NaiveDate,
) -> Option<PickerDate> {
    let expanded = expand_long_date(format, data);
    let mut cursor = Cursor { rest: value };
    let mut parsed = Parsed::default();
    for piece in tokenize(&expanded) {
        match piece {
            Piece::Literal(text) => cursor.literal(text)?,
            Piece::Field(field) => read_field(&mut cursor, field, data, &mut parsed)?,
        }
    }
    if !cursor.rest.is_empty() {
        return None;
    }

    if let Some(millis) = parsed.timestamp_millis {
        let instant = DateTime::from_timestamp_millis(millis)?;
        return Some(in_host_zone(instant.fixed_offset()).with_locale(locale_name));
    }

    let naive = resolve_date(&parsed, today)?.and_time(resolve_time(&parsed)?);
    let date = match parsed.offset {
        Some(minutes) => {
            let offset = dispatch::offset_from_minutes(minutes).ok()?;
            in_host_zone(offset.from_local_datetime(&naive).single()?)
        }
        None => PickerDate::from_host_local(naive)?,
    }
    .with_locale(locale_name);

    // the weekday is checked against the wall clock that was parsed
    let weekday_matches = parsed
        .weekday
        .is_none_or(|weekday| weekday == i64::from(naive.weekday().num_days_from_sunday()));
    (weekday_matches && weeks_agree(&date, &parsed)).then_some(date)
}

/// Parses `value` strictly against each format in turn.
///
/// The whole input must match: numeric tokens take exactly two digits when
/// doubled (`MM`, `DD`), one or two otherwise, and four for `YYYY`. Fields
/// the format leaves out are filled in: leading ones from today,
/// later ones from the start of their period. Returns `None` if no format
/// matches or the fields don't form a real date.
pub fn parse_date(value: &str, formats: &[&str], locale: Option<&str>) -> Option<PickerDate> {
    let locale_name = locale.map_or_else(locale::get_default_locale, str::to_owned);
    let data = locale::resolve(&locale_name);
    let today = Local::now().date_naive();
    formats
        .iter()
        .find_map(|format| parse_with(value, format, &locale_name, &data, today))
}

/// Formats an optional date with the first of `formats`, in `locale`.
///
/// An absent date formats as the empty string.
pub fn safe_date_format(
    date: Option<&PickerDate>,
    formats: &[&str],
    locale: Option<&str>,
    calendar: Calendar,
) -> String {
    let Some(date) = date else {
        return String::new();
    };
    let format = formats.first().copied().unwrap_or(DEFAULT_DATE_FORMAT);
    let localized = locale::localize_date(date, locale);
    dispatch::format_date(&localized, format, calendar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ARABIC_SAUDI_LOCALE;
    use crate::dispatch::set_time;

    fn at(y: i32, m0: u32, d: u32, h: u32, mi: u32, s: u32, offset_hours: i32) -> PickerDate {
        let offset = FixedOffset::east_opt(offset_hours * 3600).unwrap();
        set_time(&PickerDate::from_ymd(y, m0, d, offset).unwrap(), h, mi, s).unwrap()
    }

    fn fields(date: &PickerDate) -> (i32, u32, u32, u32, u32, u32) {
        let naive = date.naive_local();
        (
            naive.year(),
            naive.month0(),
            naive.day(),
            naive.hour(),
            naive.minute(),
            naive.second(),
        )
    }

    #[test]
    fn test_format_gregorian_tokens() {
        // Monday 2024-03-11, 1 Ramadan 1445
        let d = at(2024, 2, 11, 15, 4, 5, 3);
        assert_eq!(format(&d, "YYYY-MM-DD HH:mm:ss"), "2024-03-11 15:04:05");
        assert_eq!(format(&d, "YY M D H m s"), "24 3 11 15 4 5");
        assert_eq!(format(&d, "MMM MMMM"), "Mar March");
        assert_eq!(format(&d, "d dd ddd dddd"), "1 Mo Mon Monday");
        assert_eq!(format(&d, "Do"), "11th");
        assert_eq!(format(&d, "h:mm A a hh"), "3:04 PM pm 03");
        assert_eq!(format(&d, "Z ZZ"), "+03:00 +0300");
        assert_eq!(format(&d, "w ww gggg gg"), "11 11 2024 24");
    }

    #[test]
    fn test_format_hijri_tokens() {
        let d = at(2024, 2, 11, 0, 0, 0, 0);
        assert_eq!(format(&d, "iYYYY/iMM/iDD"), "1445/09/01");
        assert_eq!(format(&d, "iYY iM iD iDo"), "45 9 1 1st");
        assert_eq!(format(&d, "iMMMM iMMM"), "Ramadan Ram");
    }

    #[test]
    fn test_format_escapes_and_literals() {
        let d = at(2024, 2, 11, 0, 0, 0, 0);
        assert_eq!(format(&d, "[Today is] dddd"), "Today is Monday");
        assert_eq!(format(&d, "[YYYY] YYYY"), "YYYY 2024");
        assert_eq!(format(&d, "DD.MM.YYYY"), "11.03.2024");
        assert_eq!(format(&d, "[open"), "[open");
    }

    #[test]
    fn test_format_long_date_tokens() {
        let d = at(2024, 2, 11, 9, 5, 0, 0);
        assert_eq!(format(&d, "L"), "03/11/2024");
        assert_eq!(format(&d, "LL"), "March 11, 2024");
        assert_eq!(format(&d, "LLLL"), "Monday, March 11, 2024 9:05 AM");
        assert_eq!(format(&d, "LT"), "9:05 AM");
        assert_eq!(format(&d, "LTS"), "9:05:00 AM");

        let arabic = d.with_locale(ARABIC_SAUDI_LOCALE);
        assert_eq!(format(&arabic, "L"), "11/03/2024");
        assert_eq!(format(&arabic, "iMMMM"), "رمضان");
    }

    #[test]
    fn test_format_twelve_hour_clock() {
        assert_eq!(format(&at(2024, 0, 1, 0, 0, 0, 0), "h A"), "12 AM");
        assert_eq!(format(&at(2024, 0, 1, 12, 0, 0, 0), "h A"), "12 PM");
        assert_eq!(format(&at(2024, 0, 1, 23, 0, 0, 0), "hh a"), "11 pm");
    }

    #[test]
    fn test_format_negative_offset_and_timestamps() {
        let d = at(1970, 0, 1, 0, 0, 0, 0).with_offset(FixedOffset::west_opt(5 * 3600 + 1800).unwrap());
        assert_eq!(format(&d, "Z"), "-05:30");
        assert_eq!(format(&d, "x X"), "0 0");
    }

    #[test]
    fn test_parse_strict() {
        let parsed = parse_date("03/11/2024", &["MM/DD/YYYY"], None).unwrap();
        assert_eq!(fields(&parsed), (2024, 2, 11, 0, 0, 0));
        assert_eq!(parsed.locale(), "en");

        assert!(parse_date("3/11/2024", &["MM/DD/YYYY"], None).is_none());
        assert!(parse_date("03/11/24", &["MM/DD/YYYY"], None).is_none());
        assert!(parse_date("03/11/2024 ", &["MM/DD/YYYY"], None).is_none());
        assert!(parse_date("02/30/2024", &["MM/DD/YYYY"], None).is_none());
        assert!(parse_date("13/01/2024", &["MM/DD/YYYY"], None).is_none());
        assert!(parse_date("", &["MM/DD/YYYY"], None).is_none());
    }

    #[test]
    fn test_parse_tries_each_format() {
        let formats = ["MM/DD/YYYY", "YYYY-MM-DD", "M/D/YY"];
        let parsed = parse_date("2024-03-11", &formats, None).unwrap();
        assert_eq!(fields(&parsed), (2024, 2, 11, 0, 0, 0));

        let parsed = parse_date("3/1/69", &formats, None).unwrap();
        assert_eq!(fields(&parsed), (1969, 2, 1, 0, 0, 0));
        let parsed = parse_date("3/1/68", &formats, None).unwrap();
        assert_eq!(fields(&parsed), (2068, 2, 1, 0, 0, 0));

        assert!(parse_date("11 March", &formats, None).is_none());
        assert!(parse_date("2024-03-11", &[], None).is_none());
    }

    #[test]
    fn test_parse_names_and_meridiem() {
        let parsed = parse_date("monday, march 11th 2024 3:04 pm", &["dddd, MMMM Do YYYY h:mm a"], None)
            .unwrap();
        assert_eq!(fields(&parsed), (2024, 2, 11, 15, 4, 0));

        let parsed = parse_date("12:30 AM", &["hh:mm A"], None).unwrap();
        assert_eq!(parsed.naive_local().hour(), 0);
        assert_eq!(parsed.naive_local().date(), Local::now().date_naive());

        assert!(parse_date("13:30 PM", &["hh:mm A"], None).is_none());
    }

    #[test]
    fn test_parse_weekday_mismatch() {
        assert!(parse_date("Tue 03/11/2024", &["ddd MM/DD/YYYY"], None).is_none());
        assert!(parse_date("Mon 03/11/2024", &["ddd MM/DD/YYYY"], None).is_some());
    }

    #[test]
    fn test_parse_defaults() {
        let today = Local::now().date_naive();

        let parsed = parse_date("2024", &["YYYY"], None).unwrap();
        assert_eq!(fields(&parsed), (2024, 0, 1, 0, 0, 0));

        let parsed = parse_date("07", &["DD"], None).unwrap();
        let naive = parsed.naive_local();
        assert_eq!((naive.year(), naive.month0(), naive.day()), (today.year(), today.month0(), 7));

        let parsed = parse_date("09:15", &["HH:mm"], None).unwrap();
        assert_eq!(parsed.naive_local().date(), today);
        assert_eq!((parsed.naive_local().hour(), parsed.naive_local().minute()), (9, 15));
    }

    #[test]
    fn test_parse_hijri_fields() {
        let parsed = parse_date("01/01/1445", &["iMM/iDD/iYYYY"], None).unwrap();
        assert_eq!(fields(&parsed), (2023, 6, 19, 0, 0, 0));

        let parsed = parse_date("Ramadan 1445", &["iMMMM iYYYY"], None).unwrap();
        assert_eq!(fields(&parsed), (2024, 2, 11, 0, 0, 0));

        // no 30th in a 29-day month
        let short_month = (1..=12)
            .find(|m| crate::hijri::days_in_month(1446, m - 1).unwrap() == 29)
            .unwrap();
        let input = format!("{short_month:02}/30/1446");
        assert!(parse_date(&input, &["iMM/iDD/iYYYY"], None).is_none());
        // mixing calendars is ambiguous
        assert!(parse_date("1445 2024", &["iYYYY YYYY"], None).is_none());
    }

    #[test]
    fn test_parse_with_locale() {
        let parsed = parse_date("11/03/2024", &["L"], Some(ARABIC_SAUDI_LOCALE)).unwrap();
        assert_eq!(fields(&parsed), (2024, 2, 11, 0, 0, 0));
        assert_eq!(parsed.locale(), ARABIC_SAUDI_LOCALE);

        let parsed = parse_date("رمضان 1445", &["iMMMM iYYYY"], Some(ARABIC_SAUDI_LOCALE)).unwrap();
        assert_eq!(fields(&parsed), (2024, 2, 11, 0, 0, 0));
    }

    #[test]
    fn test_parse_offset_and_timestamp() {
        let parsed = parse_date("2024-03-11T12:00:00+03:00", &["YYYY-MM-DD[T]HH:mm:ssZ"], None).unwrap();
        assert_eq!(parsed, at(2024, 2, 11, 9, 0, 0, 0));

        let parsed = parse_date("2024-03-11 12:00 +0000", &["YYYY-MM-DD HH:mm ZZ"], None).unwrap();
        assert_eq!(parsed, at(2024, 2, 11, 12, 0, 0, 0));

        let parsed = parse_date("1710158400000", &["x"], None).unwrap();
        assert_eq!(parsed, at(2024, 2, 11, 12, 0, 0, 0));
        let parsed = parse_date("1710158400", &["X"], None).unwrap();
        assert_eq!(parsed, at(2024, 2, 11, 12, 0, 0, 0));
    }

    #[test]
    fn test_parse_round_trips_format() {
        let d = at(2024, 2, 11, 15, 4, 5, 0);
        let rendered = format(&d, "YYYY-MM-DD HH:mm:ss Z");
        let parsed = parse_date(&rendered, &["YYYY-MM-DD HH:mm:ss Z"], None).unwrap();
        assert_eq!(parsed, d);
    }

    #[test]
    fn test_safe_date_format() {
        let d = at(2024, 2, 11, 0, 0, 0, 0);
        assert_eq!(safe_date_format(None, &["L"], None, Calendar::Gregorian), "");
        assert_eq!(
            safe_date_format(Some(&d), &["DD/MM/YYYY", "L"], None, Calendar::Gregorian),
            "11/03/2024"
        );
        assert_eq!(safe_date_format(Some(&d), &[], None, Calendar::Gregorian), "03/11/2024");
        assert_eq!(safe_date_format(Some(&d), &["L"], None, Calendar::Hijri), "09/01/1445");
        assert_eq!(
            safe_date_format(Some(&d), &["MMMM"], Some(ARABIC_SAUDI_LOCALE), Calendar::Hijri),
            "رمضان"
        );
        // the caller's date keeps its locale
        assert_eq!(d.locale(), "en");
    }
}
