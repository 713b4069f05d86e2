//! Analemma sampling: the sun's position at one fixed hour on every day of a range.

use crate::calendar::{self, DateRange};
use crate::ephemeris::Ephemeris;
use crate::error::check_hour;
use crate::observer::Observer;
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Value reported by [`Normalizer::normalize`] when every sample is identical.
pub const DEGENERATE_NORMALIZED: f64 = 0.5;

/// Degrees of longitude per hour of mean solar time.
const DEGREES_PER_HOUR: f64 = 15.0;

/// Which clock the sampling hour is read on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Clock {
    /// Local mean solar time: UTC shifted by longitude / 15°. Traces the figure-eight.
    #[default]
    MeanSolar,
    /// The observer's civil wall clock, DST included.
    Civil,
}

/// Sun position sampled on one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalemmaPoint {
    /// Day sampled.
    pub date: NaiveDate,
    /// Sampling instant.
    pub instant: DateTime<Utc>,
    /// Azimuth in degrees, 0° = north, clockwise.
    pub azimuth: f64,
    /// Altitude above the horizon in degrees.
    pub altitude: f64,
}

/// UTC instant at which `hour` is read on `clock` for `date`.
///
/// # Errors
/// Returns `InvalidHour` for hours above 23, or `InvalidDate` when the civil hour does not
/// exist in the observer's zone.
pub fn sampling_instant(
    observer: &Observer,
    date: NaiveDate,
    hour: u32,
    clock: Clock,
) -> Result<DateTime<Utc>> {
    check_hour(hour)?;
    match clock {
        Clock::MeanSolar => {
            let utc_midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
            let shift_ms = (observer.longitude() / DEGREES_PER_HOUR * 3_600_000.0).round();
            Ok(utc_midnight + TimeDelta::hours(i64::from(hour))
                - TimeDelta::milliseconds(shift_ms as i64))
        }
        Clock::Civil => {
            let local = calendar::local_time(&observer.timezone(), date, hour)?;
            Ok(local.with_timezone(&Utc))
        }
    }
}

/// Samples the sun at `hour` on `date`.
///
/// # Errors
/// Returns the errors of [`sampling_instant`] and of the ephemeris.
pub fn sample<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    observer: &Observer,
    date: NaiveDate,
    hour: u32,
    clock: Clock,
) -> Result<AnalemmaPoint> {
    let instant = sampling_instant(observer, date, hour, clock)?;
    let position = ephemeris.position(observer, instant)?;
    Ok(AnalemmaPoint {
        date,
        instant,
        azimuth: position.azimuth(),
        altitude: position.elevation_angle(),
    })
}

/// The sun's position at a fixed hour across a date range, with the range's extremes.
#[derive(Debug, Clone, PartialEq)]
pub struct Analemma {
    hour: u32,
    clock: Clock,
    points: Vec<AnalemmaPoint>,
    azimuth: Normalizer,
    altitude: Normalizer,
}

impl Analemma {
    /// Samples every day of `range` at `hour`.
    ///
    /// # Errors
    /// Returns the first sampling or ephemeris error.
    pub fn compute<E: Ephemeris + ?Sized>(
        ephemeris: &E,
        observer: &Observer,
        range: DateRange,
        hour: u32,
        clock: Clock,
    ) -> Result<Self> {
        let points = range
            .iter()
            .map(|date| sample(ephemeris, observer, date, hour, clock))
            .collect::<Result<Vec<_>>>()?;
        let azimuth = Normalizer::from_values(points.iter().map(|p| p.azimuth))?;
        let altitude = Normalizer::from_values(points.iter().map(|p| p.altitude))?;
        log::debug!(
            "analemma at {hour:02}h: {} points, azimuth {:.3}..{:.3}, altitude {:.3}..{:.3}",
            points.len(),
            azimuth.min(),
            azimuth.max(),
            altitude.min(),
            altitude.max()
        );
        Ok(Self {
            hour,
            clock,
            points,
            azimuth,
            altitude,
        })
    }

    /// Sampling hour.
    #[must_use]
    pub const fn hour(&self) -> u32 {
        self.hour
    }

    /// Clock the hour was read on.
    #[must_use]
    pub const fn clock(&self) -> Clock {
        self.clock
    }

    /// Samples in date order.
    #[must_use]
    pub fn points(&self) -> &[AnalemmaPoint] {
        &self.points
    }

    /// Sample for `date`, if it lies in the sampled range.
    #[must_use]
    pub fn point(&self, date: NaiveDate) -> Option<&AnalemmaPoint> {
        let first = self.points.first()?.date;
        let index = usize::try_from(date.signed_duration_since(first).num_days()).ok()?;
        self.points.get(index)
    }

    /// Azimuth extremes over the range.
    #[must_use]
    pub const fn azimuth(&self) -> &Normalizer {
        &self.azimuth
    }

    /// Altitude extremes over the range.
    #[must_use]
    pub const fn altitude(&self) -> &Normalizer {
        &self.altitude
    }
}

/// Min/max scaling of a sample set onto [0, 1].
///
/// # Example
/// ```
/// # use solar_ephemera::Normalizer;
/// let normalizer = Normalizer::from_values([10.0, 30.0, 20.0]).unwrap();
/// assert_eq!(normalizer.normalize(20.0), 0.5);
///
/// // A flat sample set has no span to divide by
/// let flat = Normalizer::from_values([4.0, 4.0]).unwrap();
/// assert_eq!(flat.normalize(4.0), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    min: f64,
    max: f64,
}

impl Normalizer {
    /// Records the extremes of `values`.
    ///
    /// # Errors
    /// Returns `Normalization` if there are no values or any value is not finite.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Result<Self> {
        let mut extremes: Option<(f64, f64)> = None;
        for value in values {
            if !value.is_finite() {
                return Err(Error::normalization("sample is not finite"));
            }
            extremes = Some(match extremes {
                Some((min, max)) => (min.min(value), max.max(value)),
                None => (value, value),
            });
        }
        let (min, max) = extremes.ok_or_else(|| Error::normalization("no samples"))?;
        Ok(Self { min, max })
    }

    /// Smallest sample.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Largest sample.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Scales `value` so the smallest sample maps to 0 and the largest to 1.
    ///
    /// When every sample is equal the span is zero and [`DEGENERATE_NORMALIZED`] is
    /// returned instead.
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        if self.max > self.min {
            (value - self.min) / (self.max - self.min)
        } else {
            DEGENERATE_NORMALIZED
        }
    }
}
