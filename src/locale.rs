//! Process-wide locale registry.
//!
//! Locales are registered once at start-up and looked up by name. `en` and
//! `ar-sa` are always present and `en` is the default.

use crate::config::ConfigError;
use crate::consts::{ARABIC_SAUDI_LOCALE, DEFAULT_LOCALE};
use crate::types::Calendar;
use crate::{DateError, PickerDate, dispatch};
use chrono::Datelike;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Names and formats for one locale.
///
/// Weekday lists start on Sunday. Month lists have twelve entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleData {
    pub months: Vec<String>,
    pub months_short: Vec<String>,
    pub hijri_months: Vec<String>,
    pub hijri_months_short: Vec<String>,
    pub weekdays: Vec<String>,
    pub weekdays_short: Vec<String>,
    pub weekdays_min: Vec<String>,
    #[serde(default)]
    pub ordinal: Ordinal,
    pub long_date_format: LongDateFormat,
    pub meridiem: Meridiem,
    #[serde(default)]
    pub week: WeekRule,
}

/// Expansions of the `LT`, `LTS`, `L`, `LL`, `LLL` and `LLLL` tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongDateFormat {
    #[serde(rename = "LT")]
    pub lt: String,
    #[serde(rename = "LTS")]
    pub lts: String,
    #[serde(rename = "L")]
    pub l: String,
    #[serde(rename = "LL")]
    pub ll: String,
    #[serde(rename = "LLL")]
    pub lll: String,
    #[serde(rename = "LLLL")]
    pub llll: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meridiem {
    pub am: String,
    pub pm: String,
}

/// Week numbering rule.
///
/// `dow` is the first day of the week (0 = Sunday); the first week of the
/// year is the one containing day-of-week `doy` of its first days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRule {
    pub dow: u32,
    pub doy: u32,
}

impl Default for WeekRule {
    fn default() -> Self {
        Self { dow: 0, doy: 6 }
    }
}

/// How `Do` renders a day of the month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ordinal {
    /// 1st, 2nd, 3rd, 4th
    English,
    /// The bare number
    #[default]
    Plain,
}

fn names(joined: &str) -> Vec<String> {
    joined.split('_').map(str::to_owned).collect()
}

impl LocaleData {
    pub fn english() -> Self {
        Self {
            months: names(
                "January_February_March_April_May_June_July_August_September_October_November_December",
            ),
            months_short: names("Jan_Feb_Mar_Apr_May_Jun_Jul_Aug_Sep_Oct_Nov_Dec"),
            hijri_months: names(
                "Muharram_Safar_Rabi' al-Awwal_Rabi' al-Thani_Jumada al-Ula_Jumada al-Akhirah_Rajab_Sha'ban_Ramadan_Shawwal_Dhu al-Qi'dah_Dhu al-Hijjah",
            ),
            hijri_months_short: names("Muh_Saf_Rab-I_Rab-II_Jum-I_Jum-II_Raj_Sha_Ram_Shw_Dhu-Q_Dhu-H"),
            weekdays: names("Sunday_Monday_Tuesday_Wednesday_Thursday_Friday_Saturday"),
            weekdays_short: names("Sun_Mon_Tue_Wed_Thu_Fri_Sat"),
            weekdays_min: names("Su_Mo_Tu_We_Th_Fr_Sa"),
            ordinal: Ordinal::English,
            long_date_format: LongDateFormat {
                lt: "h:mm A".to_owned(),
                lts: "h:mm:ss A".to_owned(),
                l: "MM/DD/YYYY".to_owned(),
                ll: "MMMM D, YYYY".to_owned(),
                lll: "MMMM D, YYYY h:mm A".to_owned(),
                llll: "dddd, MMMM D, YYYY h:mm A".to_owned(),
            },
            meridiem: Meridiem {
                am: "AM".to_owned(),
                pm: "PM".to_owned(),
            },
            week: WeekRule::default(),
        }
    }

    pub fn arabic_saudi() -> Self {
        Self {
            months: names("يناير_فبراير_مارس_أبريل_مايو_يونيو_يوليو_أغسطس_سبتمبر_أكتوبر_نوفمبر_ديسمبر"),
            months_short: names(
                "يناير_فبراير_مارس_أبريل_مايو_يونيو_يوليو_أغسطس_سبتمبر_أكتوبر_نوفمبر_ديسمبر",
            ),
            hijri_months: names(
                "محرم_صفر_ربيع الأول_ربيع الثاني_جمادى الأولى_جمادى الآخرة_رجب_شعبان_رمضان_شوال_ذو القعدة_ذو الحجة",
            ),
            hijri_months_short: names(
                "محرم_صفر_ربيع ١_ربيع ٢_جمادى ١_جمادى ٢_رجب_شعبان_رمضان_شوال_ذو القعدة_ذو الحجة",
            ),
            weekdays: names("الأحد_الإثنين_الثلاثاء_الأربعاء_الخميس_الجمعة_السبت"),
            weekdays_short: names("أحد_إثنين_ثلاثاء_أربعاء_خميس_جمعة_سبت"),
            weekdays_min: names("ح_ن_ث_ر_خ_ج_س"),
            ordinal: Ordinal::Plain,
            long_date_format: LongDateFormat {
                lt: "HH:mm".to_owned(),
                lts: "HH:mm:ss".to_owned(),
                l: "DD/MM/YYYY".to_owned(),
                ll: "D MMMM YYYY".to_owned(),
                lll: "D MMMM YYYY HH:mm".to_owned(),
                llll: "dddd D MMMM YYYY HH:mm".to_owned(),
            },
            meridiem: Meridiem {
                am: "ص".to_owned(),
                pm: "م".to_owned(),
            },
            week: WeekRule { dow: 0, doy: 6 },
        }
    }

    /// Parses a locale table from TOML.
    ///
    /// # Errors
    /// Returns `ConfigError::Toml` if the document doesn't describe a locale.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Checks list lengths and the week rule
    ///
    /// # Errors
    /// Returns `DateError::InvalidLocaleData` naming the first bad field.
    pub fn validate(&self, name: &str) -> Result<(), DateError> {
        let lists: [(&str, &Vec<String>, usize); 7] = [
            ("months", &self.months, 12),
            ("months_short", &self.months_short, 12),
            ("hijri_months", &self.hijri_months, 12),
            ("hijri_months_short", &self.hijri_months_short, 12),
            ("weekdays", &self.weekdays, 7),
            ("weekdays_short", &self.weekdays_short, 7),
            ("weekdays_min", &self.weekdays_min, 7),
        ];
        for (field, list, expected) in lists {
            if list.len() != expected {
                return Err(DateError::InvalidLocaleData {
                    name: name.to_owned(),
                    reason: format!("{field} has {} entries, expected {expected}", list.len()),
                });
            }
        }
        if self.week.dow > 6 || self.week.doy > 6 {
            return Err(DateError::InvalidLocaleData {
                name: name.to_owned(),
                reason: format!("week rule {}/{} out of range", self.week.dow, self.week.doy),
            });
        }
        Ok(())
    }

    fn pick(list: &[String], index: u32) -> &str {
        list.get(index as usize).map_or("", String::as_str)
    }

    pub fn month_name(&self, month0: u32) -> &str {
        Self::pick(&self.months, month0)
    }

    pub fn month_short_name(&self, month0: u32) -> &str {
        Self::pick(&self.months_short, month0)
    }

    pub fn hijri_month_name(&self, month0: u32) -> &str {
        Self::pick(&self.hijri_months, month0)
    }

    pub fn hijri_month_short_name(&self, month0: u32) -> &str {
        Self::pick(&self.hijri_months_short, month0)
    }

    /// `weekday` counts from Sunday = 0
    pub fn weekday_name(&self, weekday: u32) -> &str {
        Self::pick(&self.weekdays, weekday)
    }

    pub fn weekday_short_name(&self, weekday: u32) -> &str {
        Self::pick(&self.weekdays_short, weekday)
    }

    pub fn weekday_min_name(&self, weekday: u32) -> &str {
        Self::pick(&self.weekdays_min, weekday)
    }

    pub fn meridiem(&self, hour: u32, lowercase: bool) -> String {
        let text = if hour < 12 {
            &self.meridiem.am
        } else {
            &self.meridiem.pm
        };
        if lowercase {
            text.to_lowercase()
        } else {
            text.clone()
        }
    }

    /// Expansion of a long-date token, if `token` is one
    pub fn long_date_format(&self, token: &str) -> Option<&str> {
        let format = &self.long_date_format;
        match token {
            "LT" => Some(&format.lt),
            "LTS" => Some(&format.lts),
            "L" => Some(&format.l),
            "LL" => Some(&format.ll),
            "LLL" => Some(&format.lll),
            "LLLL" => Some(&format.llll),
            _ => None,
        }
    }

    pub fn ordinal(&self, number: u32) -> String {
        match self.ordinal {
            Ordinal::Plain => number.to_string(),
            Ordinal::English => {
                let suffix = match (number % 100, number % 10) {
                    (11..=13, _) => "th",
                    (_, 1) => "st",
                    (_, 2) => "nd",
                    (_, 3) => "rd",
                    _ => "th",
                };
                format!("{number}{suffix}")
            }
        }
    }
}

struct Registry {
    default: String,
    locales: HashMap<String, Arc<LocaleData>>,
}

static REGISTRY: Lazy<RwLock<Registry>> = Lazy::new(|| {
    let mut locales = HashMap::new();
    locales.insert(DEFAULT_LOCALE.to_owned(), Arc::new(LocaleData::english()));
    locales.insert(
        ARABIC_SAUDI_LOCALE.to_owned(),
        Arc::new(LocaleData::arabic_saudi()),
    );
    RwLock::new(Registry {
        default: DEFAULT_LOCALE.to_owned(),
        locales,
    })
});

/// Locale names are case-insensitive and treat `_` like `-`
fn normalize(name: &str) -> String {
    name.trim().to_lowercase().replace('_', "-")
}

/// Installs (or replaces) a locale.
///
/// Meant for start-up; concurrent registration of the same name is last
/// writer wins.
///
/// # Errors
/// Returns `DateError::InvalidLocaleData` if the tables are malformed.
pub fn register_locale(name: &str, data: LocaleData) -> Result<(), DateError> {
    let key = normalize(name);
    data.validate(&key)?;
    tracing::debug!("Registering locale {}", key);
    REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .locales
        .insert(key, Arc::new(data));
    Ok(())
}

pub fn get_locale_data_for_locale(name: &str) -> Option<Arc<LocaleData>> {
    REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .locales
        .get(&normalize(name))
        .cloned()
}

pub fn get_default_locale() -> String {
    REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .default
        .clone()
}

/// # Errors
/// Returns `DateError::UnknownLocale` if `name` was never registered.
pub fn set_default_locale(name: &str) -> Result<(), DateError> {
    let key = normalize(name);
    let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    if !registry.locales.contains_key(&key) {
        return Err(DateError::UnknownLocale(name.to_owned()));
    }
    tracing::debug!("Default locale set to {}", key);
    registry.default = key;
    Ok(())
}

pub fn get_default_locale_data() -> Arc<LocaleData> {
    let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    registry
        .locales
        .get(&registry.default)
        .cloned()
        .unwrap_or_else(|| Arc::new(LocaleData::english()))
}

/// Looks up `name`, falling back to the default locale
pub(crate) fn resolve(name: &str) -> Arc<LocaleData> {
    get_locale_data_for_locale(name).unwrap_or_else(|| {
        tracing::warn!("Locale {} is not registered, using the default", name);
        get_default_locale_data()
    })
}

/// A copy of `date` in `locale`, or in the default locale
pub fn localize_date(date: &PickerDate, locale: Option<&str>) -> PickerDate {
    match locale {
        Some(name) => date.with_locale(name),
        None => date.with_locale(&get_default_locale()),
    }
}

pub fn get_locale_data(date: &PickerDate) -> Arc<LocaleData> {
    date.locale_data()
}

pub fn get_weekday_min_in_locale<'a>(locale: &'a LocaleData, date: &PickerDate) -> &'a str {
    locale.weekday_min_name(dispatch::weekday_from_sunday(date))
}

pub fn get_weekday_short_in_locale<'a>(locale: &'a LocaleData, date: &PickerDate) -> &'a str {
    locale.weekday_short_name(dispatch::weekday_from_sunday(date))
}

/// Full month name of `date`, from the Hijri tables under the Hijri calendar
pub fn get_month_in_locale<'a>(
    locale: &'a LocaleData,
    date: &PickerDate,
    calendar: Calendar,
) -> &'a str {
    match calendar {
        Calendar::Hijri => date.hijri().map_or_else(
            |_| locale.month_name(date.naive_local().month0()),
            |hijri| locale.hijri_month_name(hijri.month0()),
        ),
        Calendar::Gregorian => locale.month_name(date.naive_local().month0()),
    }
}

pub fn get_month_short_in_locale<'a>(locale: &'a LocaleData, date: &PickerDate) -> &'a str {
    locale.month_short_name(date.naive_local().month0())
}
