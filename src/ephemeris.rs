//! Ephemeris collaborator.
//!
//! The astronomy itself lives in the `solar-positioning` crate (NREL SPA). This module
//! narrows it to the two queries the rest of the crate needs, with the horizon passed
//! explicitly on every call so that no query state outlives the query.

use crate::observer::Observer;
use crate::{Error, Result};
use chrono::{DateTime, Datelike, TimeDelta, Utc};
use solar_positioning::time::DeltaT;
use solar_positioning::{Horizon, RefractionCorrection, SolarPosition, SunriseResult, spa};

/// Horizon crossings around one day: rising, transit and setting in UTC.
pub type Crossings = SunriseResult<DateTime<Utc>>;

/// Source of solar rise/set/transit instants and topocentric positions.
pub trait Ephemeris {
    /// Meridian transit nearest to `reference`, with the rising through `horizon` before
    /// it and the setting after it.
    ///
    /// Polar day and polar night are reported through the `AllDay` and `AllNight`
    /// variants, which still carry the transit.
    ///
    /// # Errors
    /// Returns an error if the underlying model rejects the inputs.
    fn crossings(
        &self,
        observer: &Observer,
        reference: DateTime<Utc>,
        horizon: Horizon,
    ) -> Result<Crossings>;

    /// Topocentric sun position seen by `observer` at `instant`.
    ///
    /// # Errors
    /// Returns an error if the underlying model rejects the inputs.
    fn position(&self, observer: &Observer, instant: DateTime<Utc>) -> Result<SolarPosition>;
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn crossings(
        &self,
        observer: &Observer,
        reference: DateTime<Utc>,
        horizon: Horizon,
    ) -> Result<Crossings> {
        (**self).crossings(observer, reference, horizon)
    }

    fn position(&self, observer: &Observer, instant: DateTime<Utc>) -> Result<SolarPosition> {
        (**self).position(observer, instant)
    }
}

/// NREL SPA ephemeris with ΔT estimated per month.
///
/// # Example
/// ```
/// # use solar_ephemera::{Ephemeris, Observer, Spa};
/// # use chrono::{TimeZone, Utc};
/// let observer = Observer::new(45.23154, 11.87498, 7.0, chrono_tz::Europe::Rome).unwrap();
/// let noon = Utc.with_ymd_and_hms(2018, 1, 1, 11, 0, 0).unwrap();
/// let position = Spa::default().position(&observer, noon).unwrap();
/// assert!(position.elevation_angle() > 15.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spa {
    refraction: Option<RefractionCorrection>,
}

impl Spa {
    /// Creates an SPA ephemeris; `None` disables refraction in reported positions.
    ///
    /// Rise and set crossings always include standard refraction through the horizon
    /// definition.
    #[must_use]
    pub const fn new(refraction: Option<RefractionCorrection>) -> Self {
        Self { refraction }
    }

    /// SPA with standard atmospheric refraction (1013.25 hPa, 15 °C).
    #[must_use]
    pub const fn standard() -> Self {
        Self::new(Some(RefractionCorrection::standard()))
    }

    /// Atmospheric refraction applied to positions.
    #[must_use]
    pub const fn refraction(&self) -> Option<RefractionCorrection> {
        self.refraction
    }
}

impl Default for Spa {
    fn default() -> Self {
        Self::standard()
    }
}

/// Estimated ΔT (TT − UT1) in seconds for the month of `instant`.
fn delta_t(instant: DateTime<Utc>) -> Result<f64> {
    DeltaT::estimate_from_date(instant.year(), instant.month()).map_err(Error::from)
}

/// SPA crossings for the UTC calendar day containing `instant`.
///
/// Each crossing lies inside that UTC day, so far from Greenwich the rising or setting
/// may belong to the neighbouring solar day.
fn utc_day_crossings(
    observer: &Observer,
    instant: DateTime<Utc>,
    horizon: Horizon,
) -> Result<Crossings> {
    let crossings = spa::sunrise_sunset_for_horizon(
        instant,
        observer.latitude(),
        observer.longitude(),
        delta_t(instant)?,
        horizon,
    )?;
    Ok(crossings)
}

fn transit_of(crossings: &Crossings) -> DateTime<Utc> {
    match crossings {
        SunriseResult::RegularDay { transit, .. }
        | SunriseResult::AllDay { transit }
        | SunriseResult::AllNight { transit } => *transit,
    }
}

/// Assembles the solar day around the transit nearest to `reference` from the crossings
/// of three consecutive UTC days.
///
/// The rising is the last one before that transit and the setting the first one after
/// it, whichever UTC day reported them. Polar results apply only to the day owning the
/// transit.
fn solar_day(utc_days: &[Crossings; 3], reference: DateTime<Utc>) -> Crossings {
    let distance = |crossings: &Crossings| {
        transit_of(crossings)
            .signed_duration_since(reference)
            .abs()
    };
    let owner = utc_days.iter().fold(&utc_days[1], |best, day| {
        if distance(day) < distance(best) {
            day
        } else {
            best
        }
    });

    let SunriseResult::RegularDay {
        sunrise: own_sunrise,
        transit,
        sunset: own_sunset,
    } = *owner
    else {
        return owner.clone();
    };

    let one_day = TimeDelta::days(1);
    let regular = || {
        utc_days.iter().filter_map(|day| match day {
            SunriseResult::RegularDay {
                sunrise, sunset, ..
            } => Some((*sunrise, *sunset)),
            _ => None,
        })
    };
    // A neighbour may be polar while the owner is not; the owner's own crossing,
    // shifted back into place, is the fallback.
    let sunrise = regular()
        .map(|(sunrise, _)| sunrise)
        .filter(|&sunrise| sunrise < transit && transit - sunrise < one_day)
        .max()
        .unwrap_or(if own_sunrise > transit {
            own_sunrise - one_day
        } else {
            own_sunrise
        });
    let sunset = regular()
        .map(|(_, sunset)| sunset)
        .filter(|&sunset| sunset > transit && sunset - transit < one_day)
        .min()
        .unwrap_or(if own_sunset < transit {
            own_sunset + one_day
        } else {
            own_sunset
        });

    SunriseResult::RegularDay {
        sunrise,
        transit,
        sunset,
    }
}

impl Ephemeris for Spa {
    fn crossings(
        &self,
        observer: &Observer,
        reference: DateTime<Utc>,
        horizon: Horizon,
    ) -> Result<Crossings> {
        let one_day = TimeDelta::days(1);
        let utc_days = [
            utc_day_crossings(observer, reference - one_day, horizon)?,
            utc_day_crossings(observer, reference, horizon)?,
            utc_day_crossings(observer, reference + one_day, horizon)?,
        ];
        Ok(solar_day(&utc_days, reference))
    }

    fn position(&self, observer: &Observer, instant: DateTime<Utc>) -> Result<SolarPosition> {
        let position = spa::solar_position(
            instant,
            observer.latitude(),
            observer.longitude(),
            observer.elevation(),
            delta_t(instant)?,
            self.refraction,
        )?;
        Ok(position)
    }
}
