use crate::consts::{DEFAULT_DATE_FORMAT, DEFAULT_HIGHLIGHT_CLASS};
use crate::dispatch;
use crate::format::{parse_date, safe_date_format};
use crate::locale;
use crate::predicates::{Highlight, get_highlight_days_map};
use crate::types::Calendar;
use crate::{DateError, PickerDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::{env, fs, io};
use thiserror::Error;

/// Names a config file to load instead of the built-in defaults
pub const CONFIG_PATH_ENV_VAR: &str = "HIJRI_PICKER_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Date(#[from] DateError),
    #[error("date_format must name at least one format")]
    NoDateFormat,
}

/// Picker-wide defaults.
///
/// ```toml
/// calendar = "hijri"
/// locale = "ar-sa"
/// utc_offset = 180
/// date_format = ["DD/MM/YYYY", "L"]
/// highlight_class_name = "holiday"
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub calendar: Calendar,
    /// Registered locale name; the process default when absent
    pub locale: Option<String>,
    /// Minutes east of UTC; the host's offset when absent
    pub utc_offset: Option<i32>,
    /// Formats tried in order when parsing; the first one is used for display
    pub date_format: Vec<String>,
    pub highlight_class_name: String,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            calendar: Calendar::default(),
            locale: None,
            utc_offset: None,
            date_format: vec![DEFAULT_DATE_FORMAT.to_owned()],
            highlight_class_name: DEFAULT_HIGHLIGHT_CLASS.to_owned(),
        }
    }
}

impl PickerConfig {
    /// # Errors
    /// Fails on malformed TOML, an unregistered locale, an offset of a day or
    /// more, or an empty `date_format` list.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        tracing::trace!("Loaded picker config {:?}", config);
        Ok(config)
    }

    /// # Errors
    /// As [`PickerConfig::from_toml_str`], or `ConfigError::Io` if the file can't be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::trace!("Reading picker config from {}", path.display());
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    /// Loads the file named by `HIJRI_PICKER_CONFIG`, or the defaults if it isn't set.
    ///
    /// # Errors
    /// As [`PickerConfig::from_file`].
    pub fn load() -> Result<Self, ConfigError> {
        match env::var_os(CONFIG_PATH_ENV_VAR) {
            Some(path) => Self::from_file(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }

    /// # Errors
    /// Returns the first setting that can't be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(name) = self
            .locale
            .as_ref()
            .filter(|name| locale::get_locale_data_for_locale(name).is_none())
        {
            return Err(DateError::UnknownLocale(name.clone()).into());
        }
        if let Some(minutes) = self.utc_offset {
            dispatch::offset_from_minutes(minutes)?;
        }
        if self.date_format.is_empty() {
            return Err(ConfigError::NoDateFormat);
        }
        Ok(())
    }

    /// The configured locale, or the process default
    pub fn locale_name(&self) -> String {
        self.locale
            .clone()
            .unwrap_or_else(locale::get_default_locale)
    }

    pub fn date_formats(&self) -> Vec<&str> {
        self.date_format.iter().map(String::as_str).collect()
    }

    /// The current instant at the configured offset, in the configured locale
    ///
    /// # Errors
    /// Returns `DateError::InvalidOffset` if the offset is a day or more.
    pub fn now(&self) -> Result<PickerDate, DateError> {
        Ok(dispatch::now(self.utc_offset)?.with_locale(&self.locale_name()))
    }

    /// Parses user input against the configured formats, read in the configured calendar
    pub fn parse(&self, value: &str) -> Option<PickerDate> {
        let formats: Vec<String> = match self.calendar {
            Calendar::Hijri => self
                .date_format
                .iter()
                .map(|format| dispatch::convert_format_hijri(format))
                .collect(),
            Calendar::Gregorian => self.date_format.clone(),
        };
        let formats: Vec<&str> = formats.iter().map(String::as_str).collect();
        parse_date(value, &formats, Some(&self.locale_name()))
    }

    /// Displays a date with the first configured format, in the configured calendar
    pub fn format(&self, date: Option<&PickerDate>) -> String {
        safe_date_format(
            date,
            &self.date_formats(),
            Some(&self.locale_name()),
            self.calendar,
        )
    }

    pub fn highlight_days_map(&self, highlights: &[Highlight]) -> HashMap<String, Vec<String>> {
        get_highlight_days_map(highlights, Some(&self.highlight_class_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ARABIC_SAUDI_LOCALE;
    use chrono::{Datelike, FixedOffset};

    fn date(y: i32, m0: u32, d: u32) -> PickerDate {
        PickerDate::from_ymd(y, m0, d, FixedOffset::east_opt(0).unwrap()).unwrap()
    }

    #[test_log::test]
    fn test_empty_document_gives_defaults() {
        let config = PickerConfig::from_toml_str("").unwrap();
        assert_eq!(config, PickerConfig::default());
        assert_eq!(config.calendar, Calendar::Gregorian);
        assert_eq!(config.date_formats(), [DEFAULT_DATE_FORMAT]);
        assert_eq!(config.highlight_class_name, DEFAULT_HIGHLIGHT_CLASS);
    }

    #[test_log::test]
    fn test_full_document() {
        let config = PickerConfig::from_toml_str(
            r#"
calendar = "hijri"
locale = "ar-sa"
utc_offset = 180
date_format = ["DD/MM/YYYY", "L"]
highlight_class_name = "holiday"
"#,
        )
        .unwrap();
        assert_eq!(config.calendar, Calendar::Hijri);
        assert_eq!(config.locale_name(), ARABIC_SAUDI_LOCALE);
        assert_eq!(config.utc_offset, Some(180));
        assert_eq!(config.date_formats(), ["DD/MM/YYYY", "L"]);
    }

    #[test]
    fn test_rejects_unknown_locale() {
        let result = PickerConfig::from_toml_str(r#"locale = "xx-config""#);
        assert!(matches!(
            result,
            Err(ConfigError::Date(DateError::UnknownLocale(_)))
        ));
    }

    #[test]
    fn test_rejects_bad_values() {
        let result = PickerConfig::from_toml_str("utc_offset = 1440");
        assert!(matches!(
            result,
            Err(ConfigError::Date(DateError::InvalidOffset(1440)))
        ));

        let result = PickerConfig::from_toml_str("date_format = []");
        assert!(matches!(result, Err(ConfigError::NoDateFormat)));

        let result = PickerConfig::from_toml_str(r#"calendar = "julian""#);
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_from_file() {
        let path = env::temp_dir().join(format!("hijri_picker_config_{}.toml", std::process::id()));
        fs::write(&path, "calendar = \"hijri\"\n").unwrap();
        let config = PickerConfig::from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.calendar, Calendar::Hijri);

        let result = PickerConfig::from_file(env::temp_dir().join("hijri_picker_missing.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_format_and_parse_with_config() {
        let config = PickerConfig {
            calendar: Calendar::Hijri,
            date_format: vec!["DD/MM/YYYY".to_owned()],
            ..PickerConfig::default()
        };
        let d = date(2024, 2, 11);
        assert_eq!(config.format(Some(&d)), "01/09/1445");
        assert_eq!(config.format(None), "");

        let parsed = config.parse("01/09/1445").unwrap();
        let naive = parsed.naive_local();
        assert_eq!((naive.year(), naive.month0(), naive.day()), (2024, 2, 11));
        assert!(config.parse("2024-03-11").is_none());
    }

    #[test]
    fn test_now_uses_offset_and_locale() {
        let config = PickerConfig {
            locale: Some(ARABIC_SAUDI_LOCALE.to_owned()),
            utc_offset: Some(-300),
            ..PickerConfig::default()
        };
        let now = config.now().unwrap();
        assert_eq!(now.utc_offset_minutes(), -300);
        assert_eq!(now.locale(), ARABIC_SAUDI_LOCALE);
    }

    #[test]
    fn test_highlight_class_from_config() {
        let config = PickerConfig {
            highlight_class_name: "holiday".to_owned(),
            ..PickerConfig::default()
        };
        let map = config.highlight_days_map(&[Highlight::Date(date(2024, 2, 11))]);
        assert_eq!(map["03.11.2024"], ["holiday"]);
    }
}
