//! Run configuration.
//!
//! Every setting has a default, so an empty TOML document is a valid configuration that
//! describes a full 2018 run for Padova:
//!
//! ```toml
//! start = "2018-01-01"
//! end = "2018-12-31"
//! latitude = 45.23154
//! longitude = 11.87498
//! elevation = 7.0
//! # timezone = "Europe/Rome"   # looked up from the coordinates when absent
//! hour = 12
//! clock = "mean-solar"
//! angles = "radians"
//! layout = "analemma"
//! gaps = "abort"
//! bar_width = 96
//!
//! [scatter]
//! hours = [11, 12, 13]
//! clock = "civil"
//!
//! [refraction]
//! enabled = true
//! pressure = 1013.25
//! temperature = 15.0
//! ```
//!
//! Dates are quoted strings.

use crate::analemma::Clock;
use crate::calendar::DateRange;
use crate::ephemeris::Spa;
use crate::error::{check_coordinates, check_elevation, check_hour};
use crate::observer::{Observer, ZoneResolver, parse_timezone};
use crate::render::GapPolicy;
use crate::render::daylight::DEFAULT_WIDTH;
use crate::render::macros::{AngleUnit, Layout, MacroOptions};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use solar_positioning::RefractionCorrection;
use std::path::Path;


/// Settings for one run over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// First day, inclusive.
    pub start: NaiveDate,
    /// Last day, inclusive.
    pub end: NaiveDate,
    /// Observer latitude in degrees, north positive.
    pub latitude: f64,
    /// Observer longitude in degrees, east positive.
    pub longitude: f64,
    /// Observer elevation in metres.
    pub elevation: f64,
    /// IANA zone name; resolved from the coordinates when `None`.
    pub timezone: Option<String>,
    /// Analemma observation hour of the macro emitter.
    pub hour: u32,
    /// Clock the macro observation hour is read on.
    pub clock: Clock,
    /// Unit of raw altitude and azimuth in the macros.
    pub angles: AngleUnit,
    /// Macro field layout.
    pub layout: Layout,
    /// Handling of days with missing events.
    pub gaps: GapPolicy,
    /// Scatter series settings.
    pub scatter: Scatter,
    /// Atmospheric refraction applied to sun positions.
    pub refraction: Refraction,
    /// Cells per line in the daylight table.
    pub bar_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2018, 12, 31).unwrap_or_default(),
            latitude: 45.23154,
            longitude: 11.87498,
            elevation: 7.0,
            timezone: None,
            hour: 12,
            clock: Clock::default(),
            angles: AngleUnit::default(),
            layout: Layout::default(),
            gaps: GapPolicy::default(),
            scatter: Scatter::default(),
            refraction: Refraction::default(),
            bar_width: DEFAULT_WIDTH,
        }
    }
}

/// Observation hours of the scatter series, read on the civil clock by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scatter {
    /// One series per hour.
    pub hours: Vec<u32>,
    /// Clock the hours are read on.
    pub clock: Clock,
}

impl Default for Scatter {
    fn default() -> Self {
        Self {
            hours: vec![11, 12, 13],
            clock: Clock::Civil,
        }
    }
}

/// Atmospheric conditions for refraction correction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Refraction {
    /// Apply refraction to positions at all.
    pub enabled: bool,
    /// Surface pressure in hPa.
    pub pressure: f64,
    /// Surface temperature in °C.
    pub temperature: f64,
}

impl Default for Refraction {
    fn default() -> Self {
        Self {
            enabled: true,
            pressure: 1013.25,
            temperature: 15.0,
        }
    }
}

impl Config {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    /// Returns `Config` for malformed TOML or unknown keys, or the validation error.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|err| Error::config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML file.
    ///
    /// # Errors
    /// Returns `Config` if the file cannot be read, or the errors of
    /// [`Config::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| Error::config(format!("cannot read {}: {err}", path.display())))?;
        log::debug!("loaded configuration from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Checks every setting.
    ///
    /// # Errors
    /// Returns `InvalidRange`, coordinate, elevation or hour errors, `UnknownTimeZone` for
    /// an unknown zone name, or `Config` for an empty hour list, a zero bar width or
    /// unusable refraction parameters.
    pub fn validate(&self) -> Result<()> {
        self.range()?;
        check_coordinates(self.latitude, self.longitude)?;
        check_elevation(self.elevation)?;
        check_hour(self.hour)?;
        if self.scatter.hours.is_empty() {
            return Err(Error::config("at least one scatter hour is required"));
        }
        for &hour in &self.scatter.hours {
            check_hour(hour)?;
        }
        if self.bar_width == 0 {
            return Err(Error::config("bar width must be positive"));
        }
        if let Some(name) = &self.timezone {
            parse_timezone(name)?;
        }
        self.ephemeris()?;
        Ok(())
    }

    /// The configured date range.
    ///
    /// # Errors
    /// Returns `InvalidRange` if `end` precedes `start`.
    pub fn range(&self) -> Result<DateRange> {
        DateRange::new(self.start, self.end)
    }

    /// Builds the observer, resolving the zone through `resolver` unless one is named.
    ///
    /// # Errors
    /// Returns coordinate and elevation errors, or `UnknownTimeZone`.
    pub fn observer<R: ZoneResolver + ?Sized>(&self, resolver: &R) -> Result<Observer> {
        match &self.timezone {
            Some(name) => Observer::new(
                self.latitude,
                self.longitude,
                self.elevation,
                parse_timezone(name)?,
            ),
            None => Observer::locate(self.latitude, self.longitude, self.elevation, resolver),
        }
    }

    /// Builds the SPA ephemeris with the configured refraction.
    ///
    /// # Errors
    /// Returns `Config` if pressure or temperature are outside the model's range.
    pub fn ephemeris(&self) -> Result<Spa> {
        if !self.refraction.enabled {
            return Ok(Spa::new(None));
        }
        let correction =
            RefractionCorrection::new(self.refraction.pressure, self.refraction.temperature)
                .map_err(|err| Error::config(format!("refraction: {err}")))?;
        Ok(Spa::new(Some(correction)))
    }

    /// Macro emitter settings.
    #[must_use]
    pub const fn macro_options(&self) -> MacroOptions {
        MacroOptions {
            layout: self.layout,
            hour: self.hour,
            clock: self.clock,
            angles: self.angles,
            gaps: self.gaps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.range().unwrap().len(), 365);
        assert_eq!(config.hour, 12);
        assert_eq!(config.bar_width, 96);
        assert_eq!(config.clock, Clock::MeanSolar);
        assert_eq!(config.angles, AngleUnit::Radians);
        assert_eq!(config.gaps, GapPolicy::Abort);
        assert_eq!(config.scatter.hours, vec![11, 12, 13]);
        assert_eq!(config.scatter.clock, Clock::Civil);
    }

    #[test]
    fn test_full_document() {
        let config = Config::from_toml_str(
            r#"
            start = "2020-03-01"
            end = "2020-03-31"
            latitude = 69.65
            longitude = 18.96
            elevation = 10
            timezone = "Europe/Oslo"
            hour = 11
            clock = "civil"
            angles = "degrees"
            layout = "twilight"
            gaps = "placeholder"
            bar_width = 48

            [scatter]
            hours = [9, 15]
            clock = "mean-solar"

            [refraction]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.range().unwrap().len(), 31);
        assert_eq!(config.elevation, 10.0);
        assert_eq!(config.clock, Clock::Civil);
        assert_eq!(config.layout, Layout::Twilight);
        assert_eq!(config.gaps, GapPolicy::Placeholder);
        assert_eq!(config.refraction.pressure, 1013.25);
        assert_eq!(config.ephemeris().unwrap().refraction(), None);

        let observer = config.observer(&chrono_tz::UTC).unwrap();
        assert_eq!(observer.timezone(), chrono_tz::Europe::Oslo);

        let options = config.macro_options();
        assert_eq!(options.hour, 11);
        assert_eq!(options.layout, Layout::Twilight);
        assert_eq!(options.angles, AngleUnit::Degrees);
        assert_eq!(config.scatter.hours, vec![9, 15]);
        assert_eq!(config.scatter.clock, Clock::MeanSolar);
    }

    #[test]
    fn test_zone_falls_back_to_resolver() {
        let config = Config::default();
        let observer = config.observer(&chrono_tz::Europe::Rome).unwrap();
        assert_eq!(observer.timezone(), chrono_tz::Europe::Rome);
        assert_eq!(observer.elevation(), 7.0);
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(matches!(
            Config::from_toml_str("lattitude = 45.0"),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            Config::from_toml_str("start = \"2018-12-31\"\nend = \"2018-01-01\""),
            Err(Error::InvalidRange { .. })
        ));
        assert!(matches!(
            Config::from_toml_str("latitude = 91.0"),
            Err(Error::InvalidLatitude { .. })
        ));
        assert!(matches!(
            Config::from_toml_str("hour = 24"),
            Err(Error::InvalidHour { value: 24 })
        ));
        assert!(matches!(
            Config::from_toml_str("[scatter]\nhours = [12, 25]"),
            Err(Error::InvalidHour { value: 25 })
        ));
        assert!(matches!(
            Config::from_toml_str("[scatter]\nhours = []"),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            Config::from_toml_str("timezone = \"Atlantis/Capital\""),
            Err(Error::UnknownTimeZone { .. })
        ));
        assert!(matches!(
            Config::from_toml_str("[refraction]\npressure = -5.0"),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/ephemera.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/ephemera.toml"));
    }
}
