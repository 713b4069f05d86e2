//! Error types for the ephemera crate.

use crate::types::SolarEvent;
use chrono::NaiveDate;
use core::fmt;

/// Result type alias for operations in this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while computing or rendering ephemerides.
#[derive(Debug)]
pub enum Error {
    /// Invalid latitude value (must be between -90 and +90 degrees).
    InvalidLatitude {
        /// The invalid latitude value provided.
        value: f64,
    },
    /// Invalid longitude value (must be greater than -180 and at most +180 degrees).
    InvalidLongitude {
        /// The invalid longitude value provided.
        value: f64,
    },
    /// Invalid observer elevation (must be finite).
    InvalidElevation {
        /// The invalid elevation value provided.
        value: f64,
    },
    /// Invalid hour of day for sampling (must be 0-23).
    InvalidHour {
        /// The invalid hour value provided.
        value: u32,
    },
    /// Date range whose end precedes its start.
    InvalidRange {
        /// First day of the range.
        start: NaiveDate,
        /// Last day of the range.
        end: NaiveDate,
    },
    /// A calendar day that cannot be represented in the observer's time zone.
    InvalidDate {
        /// The offending day.
        date: NaiveDate,
        /// Description of the problem.
        message: &'static str,
    },
    /// The solar event does not occur on this day (polar day or polar night).
    NoEvent {
        /// The event that was requested.
        event: SolarEvent,
        /// The day it was requested for.
        date: NaiveDate,
    },
    /// Time zone name that is not a known IANA identifier.
    UnknownTimeZone {
        /// The name that failed to resolve.
        name: String,
    },
    /// Min/max normalisation over an unusable set of samples.
    Normalization {
        /// Description of the problem.
        message: &'static str,
    },
    /// Error reported by the underlying ephemeris model.
    Ephemeris(solar_positioning::Error),
    /// Invalid or unreadable configuration.
    Config {
        /// Description of the problem.
        message: String,
    },
    /// Failure writing rendered output.
    Io(std::io::Error),
    /// Failure writing CSV output.
    Csv(csv::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLatitude { value } => {
                write!(
                    f,
                    "invalid latitude {value}° (must be between -90° and +90°)"
                )
            }
            Self::InvalidLongitude { value } => {
                write!(
                    f,
                    "invalid longitude {value}° (must be above -180° and at most +180°)"
                )
            }
            Self::InvalidElevation { value } => {
                write!(f, "invalid elevation {value} m (must be finite)")
            }
            Self::InvalidHour { value } => {
                write!(f, "invalid hour {value} (must be between 0 and 23)")
            }
            Self::InvalidRange { start, end } => {
                write!(f, "invalid date range: end {end} precedes start {start}")
            }
            Self::InvalidDate { date, message } => {
                write!(f, "invalid date {date}: {message}")
            }
            Self::NoEvent { event, date } => {
                write!(f, "{event} does not occur on {date}")
            }
            Self::UnknownTimeZone { name } => {
                write!(f, "unknown time zone {name:?}")
            }
            Self::Normalization { message } => {
                write!(f, "normalization error: {message}")
            }
            Self::Ephemeris(err) => write!(f, "ephemeris error: {err}"),
            Self::Config { message } => write!(f, "configuration error: {message}"),
            Self::Io(err) => write!(f, "output error: {err}"),
            Self::Csv(err) => write!(f, "csv error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Ephemeris(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<solar_positioning::Error> for Error {
    fn from(err: solar_positioning::Error) -> Self {
        Self::Ephemeris(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl Error {
    /// Creates an invalid latitude error.
    #[must_use]
    pub const fn invalid_latitude(value: f64) -> Self {
        Self::InvalidLatitude { value }
    }

    /// Creates an invalid longitude error.
    #[must_use]
    pub const fn invalid_longitude(value: f64) -> Self {
        Self::InvalidLongitude { value }
    }

    /// Creates an invalid elevation error.
    #[must_use]
    pub const fn invalid_elevation(value: f64) -> Self {
        Self::InvalidElevation { value }
    }

    /// Creates an invalid hour error.
    #[must_use]
    pub const fn invalid_hour(value: u32) -> Self {
        Self::InvalidHour { value }
    }

    /// Creates an invalid range error.
    #[must_use]
    pub const fn invalid_range(start: NaiveDate, end: NaiveDate) -> Self {
        Self::InvalidRange { start, end }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub const fn invalid_date(date: NaiveDate, message: &'static str) -> Self {
        Self::InvalidDate { date, message }
    }

    /// Creates a missing event error.
    #[must_use]
    pub const fn no_event(event: SolarEvent, date: NaiveDate) -> Self {
        Self::NoEvent { event, date }
    }

    /// Creates an unknown time zone error.
    #[must_use]
    pub fn unknown_time_zone(name: impl Into<String>) -> Self {
        Self::UnknownTimeZone { name: name.into() }
    }

    /// Creates a normalization error.
    #[must_use]
    pub const fn normalization(message: &'static str) -> Self {
        Self::Normalization { message }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error only reports a missing event on one day.
    ///
    /// Callers iterating a range use this to decide between skipping the day and aborting.
    #[must_use]
    pub const fn is_no_event(&self) -> bool {
        matches!(self, Self::NoEvent { .. })
    }
}

/// Validates latitude is within the valid range (-90 to +90 degrees).
///
/// # Errors
/// Returns `InvalidLatitude` if latitude is outside -90 to +90 degrees.
pub fn check_latitude(latitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::invalid_latitude(latitude));
    }
    Ok(())
}

/// Validates longitude is within the valid range (-180 exclusive to +180 inclusive).
///
/// # Errors
/// Returns `InvalidLongitude` if longitude is outside (-180, +180] degrees.
pub fn check_longitude(longitude: f64) -> Result<()> {
    if !(longitude > -180.0 && longitude <= 180.0) {
        return Err(Error::invalid_longitude(longitude));
    }
    Ok(())
}

/// Validates both latitude and longitude are within valid ranges.
///
/// # Errors
/// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range coordinates.
pub fn check_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    check_latitude(latitude)?;
    check_longitude(longitude)?;
    Ok(())
}

/// Validates observer elevation is a finite number of metres.
///
/// # Errors
/// Returns `InvalidElevation` for NaN or infinite values.
pub fn check_elevation(elevation: f64) -> Result<()> {
    if !elevation.is_finite() {
        return Err(Error::invalid_elevation(elevation));
    }
    Ok(())
}

/// Validates an hour of day used for sampling.
///
/// # Errors
/// Returns `InvalidHour` if the hour is above 23.
pub fn check_hour(hour: u32) -> Result<()> {
    if hour > 23 {
        return Err(Error::invalid_hour(hour));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latitude_validation() {
        assert!(check_latitude(0.0).is_ok());
        assert!(check_latitude(90.0).is_ok());
        assert!(check_latitude(-90.0).is_ok());
        assert!(check_latitude(45.23154).is_ok());

        assert!(check_latitude(91.0).is_err());
        assert!(check_latitude(-91.0).is_err());
        assert!(check_latitude(f64::NAN).is_err());
        assert!(check_latitude(f64::INFINITY).is_err());
    }

    #[test]
    fn test_longitude_validation() {
        assert!(check_longitude(0.0).is_ok());
        assert!(check_longitude(180.0).is_ok());
        assert!(check_longitude(-179.999).is_ok());
        assert!(check_longitude(11.87498).is_ok());

        // -180 and +180 are the same meridian; only +180 is accepted
        assert!(check_longitude(-180.0).is_err());
        assert!(check_longitude(181.0).is_err());
        assert!(check_longitude(f64::NAN).is_err());
        assert!(check_longitude(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_elevation_and_hour_validation() {
        assert!(check_elevation(7.0).is_ok());
        assert!(check_elevation(-400.0).is_ok());
        assert!(check_elevation(f64::NAN).is_err());

        assert!(check_hour(0).is_ok());
        assert!(check_hour(23).is_ok());
        assert!(check_hour(24).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = Error::invalid_latitude(95.0);
        assert_eq!(
            err.to_string(),
            "invalid latitude 95° (must be between -90° and +90°)"
        );

        let start = NaiveDate::from_ymd_opt(2018, 12, 31).unwrap();
        let end = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
        assert_eq!(
            Error::invalid_range(start, end).to_string(),
            "invalid date range: end 2018-01-01 precedes start 2018-12-31"
        );

        let err = Error::no_event(SolarEvent::Sunrise, end);
        assert_eq!(err.to_string(), "sunrise does not occur on 2018-01-01");
        assert!(err.is_no_event());

        let err = Error::normalization("no samples");
        assert_eq!(err.to_string(), "normalization error: no samples");
        assert!(!err.is_no_event());
    }

    #[test]
    fn test_ephemeris_error_is_wrapped() {
        use std::error::Error as _;

        let inner = solar_positioning::Error::invalid_latitude(100.0);
        let err = Error::from(inner);
        assert!(matches!(err, Error::Ephemeris(_)));
        assert!(err.source().is_some());
    }
}
