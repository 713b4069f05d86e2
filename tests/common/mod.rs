//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};
use solar_ephemera::{Crossings, Ephemeris, Observer, Result};
use solar_positioning::{Horizon, SolarPosition, SunriseResult};

/// Padova, the default observer.
pub fn padova() -> Observer {
    Observer::new(45.23154, 11.87498, 7.0, chrono_tz::Europe::Rome).unwrap()
}

/// Tromsø, north of the polar circle.
pub fn tromso() -> Observer {
    Observer::new(69.6492, 18.9553, 10.0, chrono_tz::Europe::Oslo).unwrap()
}

/// Los Angeles, west of Greenwich: local evenings fall on the next UTC day.
pub fn los_angeles() -> Observer {
    Observer::new(34.0522, -118.2437, 71.0, chrono_tz::America::Los_Angeles).unwrap()
}

/// Auckland, near the date line: local noon falls on the previous UTC day.
pub fn auckland() -> Observer {
    Observer::new(-36.8485, 174.7633, 20.0, chrono_tz::Pacific::Auckland).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// What the sky does in a [`Fake`] ephemeris.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sky {
    /// Every horizon is crossed.
    Regular,
    /// The sun never rises above any horizon.
    PolarNight,
    /// The sun never sets below any horizon.
    PolarDay,
    /// Sunrise, sunset and civil twilight occur; the sun never sinks below -12°.
    WhiteNight,
}

/// Deterministic ephemeris: transit at the reference instant, crossings at fixed offsets.
///
/// Sunrise/sunset are 4 h from transit, each twilight 30 minutes further out. Positions
/// depend only on the day of year.
#[derive(Debug, Clone, Copy)]
pub struct Fake {
    pub sky: Sky,
}

impl Fake {
    pub const fn new(sky: Sky) -> Self {
        Self { sky }
    }

    pub fn spread(horizon: Horizon) -> TimeDelta {
        let minutes = match horizon {
            Horizon::SunriseSunset => 240,
            Horizon::CivilTwilight => 270,
            Horizon::NauticalTwilight => 300,
            Horizon::AstronomicalTwilight => 330,
            Horizon::Custom(angle) => 240 - (angle * 5.0) as i64,
        };
        TimeDelta::minutes(minutes)
    }
}

impl Ephemeris for Fake {
    fn crossings(
        &self,
        _observer: &Observer,
        reference: DateTime<Utc>,
        horizon: Horizon,
    ) -> Result<Crossings> {
        let transit = reference;
        let regular = SunriseResult::RegularDay {
            sunrise: reference - Self::spread(horizon),
            transit,
            sunset: reference + Self::spread(horizon),
        };
        Ok(match self.sky {
            Sky::Regular => regular,
            Sky::PolarNight => SunriseResult::AllNight { transit },
            Sky::PolarDay => SunriseResult::AllDay { transit },
            Sky::WhiteNight => match horizon {
                Horizon::SunriseSunset | Horizon::CivilTwilight => regular,
                _ => SunriseResult::AllDay { transit },
            },
        })
    }

    fn position(&self, _observer: &Observer, instant: DateTime<Utc>) -> Result<SolarPosition> {
        let day = f64::from(instant.ordinal());
        let elevation = 20.0 + day * 0.1;
        Ok(SolarPosition::new(170.0 + day * 0.05, 90.0 - elevation)?)
    }
}
