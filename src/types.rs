use crate::DateError;
use crate::prelude::*;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The calendar system a date operation is evaluated in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Calendar {
    /// Proleptic Gregorian calendar
    #[default]
    #[display(fmt = "gregorian")]
    Gregorian,
    /// Arithmetical Islamic lunar calendar
    #[display(fmt = "hijri")]
    Hijri,
}

impl Calendar {
    #[inline]
    pub const fn is_hijri(self) -> bool {
        matches!(self, Self::Hijri)
    }
}

impl FromStr for Calendar {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gregorian" => Ok(Self::Gregorian),
            "hijri" => Ok(Self::Hijri),
            _ => Err(DateError::InvalidCalendar(s.to_owned())),
        }
    }
}

/// A date/time granularity.
///
/// `Date` is the day of the month, `Day` is the day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[display(fmt = "second")]
    Second,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "week")]
    Week,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "date")]
    Date,
}

impl Unit {
    /// Every unit, finest first
    pub const ALL: [Self; 8] = [
        Self::Second,
        Self::Minute,
        Self::Hour,
        Self::Day,
        Self::Date,
        Self::Week,
        Self::Month,
        Self::Year,
    ];
}

impl FromStr for Unit {
    type Err = DateError;

    /// Accepts singular, plural and the one-letter aliases (`M` is month, `m` is minute).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed {
            "s" => return Ok(Self::Second),
            "m" => return Ok(Self::Minute),
            "h" => return Ok(Self::Hour),
            "d" => return Ok(Self::Day),
            "D" => return Ok(Self::Date),
            "w" => return Ok(Self::Week),
            "M" => return Ok(Self::Month),
            "y" => return Ok(Self::Year),
            _ => {}
        }

        let lower = trimmed.to_ascii_lowercase();
        let singular = lower.strip_suffix('s').unwrap_or(&lower);
        match singular {
            "second" => Ok(Self::Second),
            "minute" => Ok(Self::Minute),
            "hour" => Ok(Self::Hour),
            "day" => Ok(Self::Day),
            "date" => Ok(Self::Date),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(DateError::InvalidUnit(s.to_owned())),
        }
    }
}

/// Short code for a day of the week, as used in CSS class names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeekCode {
    #[display(fmt = "mon")]
    Mon,
    #[display(fmt = "tue")]
    Tue,
    #[display(fmt = "wed")]
    Wed,
    #[display(fmt = "thu")]
    Thu,
    #[display(fmt = "fri")]
    Fri,
    #[display(fmt = "sat")]
    Sat,
    #[display(fmt = "sun")]
    Sun,
}

impl DayOfWeekCode {
    /// Maps an ISO weekday number (1 = Monday .. 7 = Sunday)
    pub const fn from_iso_weekday(day: u32) -> Option<Self> {
        match day {
            1 => Some(Self::Mon),
            2 => Some(Self::Tue),
            3 => Some(Self::Wed),
            4 => Some(Self::Thu),
            5 => Some(Self::Fri),
            6 => Some(Self::Sat),
            7 => Some(Self::Sun),
            _ => None,
        }
    }
}

impl From<Weekday> for DayOfWeekCode {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => Self::Mon,
            Weekday::Tue => Self::Tue,
            Weekday::Wed => Self::Wed,
            Weekday::Thu => Self::Thu,
            Weekday::Fri => Self::Fri,
            Weekday::Sat => Self::Sat,
            Weekday::Sun => Self::Sun,
        }
    }
}
