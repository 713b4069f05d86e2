//! Observer location and time zone resolution.

use crate::error::{check_coordinates, check_elevation};
use crate::{Error, Result};
use chrono_tz::Tz;

/// A fixed geographic observer.
///
/// Immutable once constructed; the time zone is resolved up front, never per query.
///
/// # Example
/// ```
/// # use solar_ephemera::Observer;
/// let observer = Observer::new(45.23154, 11.87498, 7.0, chrono_tz::Europe::Rome).unwrap();
/// assert_eq!(observer.timezone(), chrono_tz::Europe::Rome);
/// assert!(Observer::new(45.0, 190.0, 0.0, chrono_tz::UTC).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    /// Latitude in degrees, north positive
    latitude: f64,
    /// Longitude in degrees, east positive
    longitude: f64,
    /// Elevation above sea level in metres
    elevation: f64,
    timezone: Tz,
}

impl Observer {
    /// Creates an observer with an explicit time zone.
    ///
    /// # Errors
    /// Returns `InvalidLatitude`, `InvalidLongitude` or `InvalidElevation` for out-of-range
    /// values.
    pub fn new(latitude: f64, longitude: f64, elevation: f64, timezone: Tz) -> Result<Self> {
        check_coordinates(latitude, longitude)?;
        check_elevation(elevation)?;
        Ok(Self {
            latitude,
            longitude,
            elevation,
            timezone,
        })
    }

    /// Creates an observer whose time zone is looked up from its coordinates.
    ///
    /// # Errors
    /// Returns coordinate errors as [`Observer::new`] does, or the resolver's error.
    pub fn locate<R: ZoneResolver + ?Sized>(
        latitude: f64,
        longitude: f64,
        elevation: f64,
        resolver: &R,
    ) -> Result<Self> {
        check_coordinates(latitude, longitude)?;
        let timezone = resolver.resolve(latitude, longitude)?;
        Self::new(latitude, longitude, elevation, timezone)
    }

    /// Latitude in degrees (-90 to +90).
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees, east positive (-180 exclusive to +180).
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Elevation above sea level in metres.
    #[must_use]
    pub const fn elevation(&self) -> f64 {
        self.elevation
    }

    /// The observer's IANA time zone.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }
}

/// Maps coordinates to an IANA time zone.
pub trait ZoneResolver {
    /// Resolves the zone in effect at the given coordinates.
    ///
    /// # Errors
    /// Returns `UnknownTimeZone` if no zone covers the coordinates.
    fn resolve(&self, latitude: f64, longitude: f64) -> Result<Tz>;
}

/// A fixed zone resolves every location to itself.
impl ZoneResolver for Tz {
    fn resolve(&self, _latitude: f64, _longitude: f64) -> Result<Tz> {
        Ok(*self)
    }
}

/// Parses an IANA zone identifier such as `Europe/Rome`.
///
/// # Errors
/// Returns `UnknownTimeZone` if the name is not in the tz database.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| Error::unknown_time_zone(name))
}

/// Resolver backed by the `tzf-rs` polygon database.
#[cfg(feature = "tz-lookup")]
pub struct TzfResolver {
    finder: tzf_rs::DefaultFinder,
}

#[cfg(feature = "tz-lookup")]
impl TzfResolver {
    /// Loads the bundled zone polygons.
    #[must_use]
    pub fn new() -> Self {
        Self {
            finder: tzf_rs::DefaultFinder::new(),
        }
    }
}

#[cfg(feature = "tz-lookup")]
impl Default for TzfResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "tz-lookup")]
impl core::fmt::Debug for TzfResolver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TzfResolver").finish_non_exhaustive()
    }
}

#[cfg(feature = "tz-lookup")]
impl ZoneResolver for TzfResolver {
    fn resolve(&self, latitude: f64, longitude: f64) -> Result<Tz> {
        let name = self.finder.get_tz_name(longitude, latitude);
        if name.is_empty() {
            return Err(Error::unknown_time_zone(format!(
                "<none at {latitude}, {longitude}>"
            )));
        }
        log::debug!("resolved time zone {name} for {latitude}, {longitude}");
        parse_timezone(name)
    }
}
