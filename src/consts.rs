/// Months per year, in both calendars
pub const MONTHS_PER_YEAR: i64 = 12;
/// Zero-based index of the last month of the year
pub const LAST_MONTH_INDEX: u32 = 11;

pub(crate) const DAYS_PER_WEEK: i64 = 7;
pub(crate) const SECONDS_PER_MINUTE: i64 = 60;
pub(crate) const SECONDS_PER_HOUR: i64 = 3_600;

/// First Arabic-Indic digit (٠)
pub const ARABIC_INDIC_ZERO: u32 = 0x0660;

/// Class given to highlighted days that don't name their own
pub const DEFAULT_HIGHLIGHT_CLASS: &str = "react-datepicker__day--highlighted";
/// Format of the keys in the highlighted-days map
pub const HIGHLIGHT_KEY_FORMAT: &str = "MM.DD.YYYY";

/// Localized short date, rewritten for the Hijri calendar
pub const HIJRI_SHORT_DATE_FORMAT: &str = "iMM/iDD/iYYYY";
/// The localized short date token
pub const SHORT_DATE_TOKEN: &str = "L";

/// Default date format used when a config doesn't name one
pub const DEFAULT_DATE_FORMAT: &str = "MM/DD/YYYY";

/// Locale every process starts with
pub const DEFAULT_LOCALE: &str = "en";
/// Built-in Arabic (Saudi Arabia) locale
pub const ARABIC_SAUDI_LOCALE: &str = "ar-sa";

/// Two-digit years up to this value parse into the 2000s
pub(crate) const TWO_DIGIT_YEAR_PIVOT: i32 = 68;

/// Two-digit Hijri years (`iYY`) parse into this century
pub(crate) const HIJRI_TWO_DIGIT_YEAR_BASE: i32 = 1400;
