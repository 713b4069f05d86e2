//! Core data types for day-fraction ephemerides.

use crate::calendar::DaySpan;
use crate::{Error, Result};
use chrono::{DateTime, Datelike, NaiveDate};
use chrono_tz::Tz;
use core::fmt;
use solar_positioning::Horizon;
use std::collections::BTreeMap;

/// Which crossing of a horizon an event corresponds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Sun crosses the threshold going up (morning).
    Rising,
    /// Sun crosses the local meridian.
    Transit,
    /// Sun crosses the threshold going down (evening).
    Setting,
}

/// Solar events that can be expressed as day fractions.
///
/// Variants are declared in their chronological order for a mid-latitude day, so sorted
/// collections of events iterate from astronomical dawn to astronomical dusk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SolarEvent {
    /// Sun centre rises through -18°.
    AstronomicalDawn,
    /// Sun centre rises through -12°.
    NauticalDawn,
    /// Sun centre rises through -6°.
    CivilDawn,
    /// Upper limb appears on the horizon (refraction included).
    Sunrise,
    /// Meridian transit.
    SolarNoon,
    /// Upper limb disappears below the horizon (refraction included).
    Sunset,
    /// Sun centre sets through -6°.
    CivilDusk,
    /// Sun centre sets through -12°.
    NauticalDusk,
    /// Sun centre sets through -18°.
    AstronomicalDusk,
}

impl SolarEvent {
    /// Every event, in chronological order.
    pub const ALL: [Self; 9] = [
        Self::AstronomicalDawn,
        Self::NauticalDawn,
        Self::CivilDawn,
        Self::Sunrise,
        Self::SolarNoon,
        Self::Sunset,
        Self::CivilDusk,
        Self::NauticalDusk,
        Self::AstronomicalDusk,
    ];

    /// Rise, noon and set only.
    pub const DAYLIGHT: [Self; 3] = [Self::Sunrise, Self::SolarNoon, Self::Sunset];

    /// The horizon definition queried for this event.
    ///
    /// Solar noon shares the sunrise/sunset query since every horizon yields the same transit.
    #[must_use]
    pub const fn horizon(self) -> Horizon {
        match self {
            Self::Sunrise | Self::SolarNoon | Self::Sunset => Horizon::SunriseSunset,
            Self::CivilDawn | Self::CivilDusk => Horizon::CivilTwilight,
            Self::NauticalDawn | Self::NauticalDusk => Horizon::NauticalTwilight,
            Self::AstronomicalDawn | Self::AstronomicalDusk => Horizon::AstronomicalTwilight,
        }
    }

    /// Nominal threshold in degrees relative to the horizon, `None` for solar noon.
    ///
    /// Rise and set are nominally 0°: the query uses the upper limb with standard refraction,
    /// which places the sun's centre at about -0.833°.
    #[must_use]
    pub const fn threshold_degrees(self) -> Option<f64> {
        match self {
            Self::SolarNoon => None,
            Self::Sunrise | Self::Sunset => Some(0.0),
            Self::CivilDawn | Self::CivilDusk => Some(-6.0),
            Self::NauticalDawn | Self::NauticalDusk => Some(-12.0),
            Self::AstronomicalDawn | Self::AstronomicalDusk => Some(-18.0),
        }
    }

    /// Whether this is the morning crossing, the transit, or the evening crossing.
    #[must_use]
    pub const fn phase(self) -> Phase {
        match self {
            Self::AstronomicalDawn | Self::NauticalDawn | Self::CivilDawn | Self::Sunrise => {
                Phase::Rising
            }
            Self::SolarNoon => Phase::Transit,
            Self::Sunset | Self::CivilDusk | Self::NauticalDusk | Self::AstronomicalDusk => {
                Phase::Setting
            }
        }
    }

    /// Human readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AstronomicalDawn => "astronomical dawn",
            Self::NauticalDawn => "nautical dawn",
            Self::CivilDawn => "civil dawn",
            Self::Sunrise => "sunrise",
            Self::SolarNoon => "solar noon",
            Self::Sunset => "sunset",
            Self::CivilDusk => "civil dusk",
            Self::NauticalDusk => "nautical dusk",
            Self::AstronomicalDusk => "astronomical dusk",
        }
    }
}

impl fmt::Display for SolarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A solar event localized to the observer's zone, with its position within the day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventTime {
    instant: DateTime<Tz>,
    fraction: f64,
}

impl EventTime {
    pub(crate) const fn new(instant: DateTime<Tz>, fraction: f64) -> Self {
        Self { instant, fraction }
    }

    /// The event instant in the observer's local zone.
    #[must_use]
    pub const fn instant(&self) -> DateTime<Tz> {
        self.instant
    }

    /// Offset from local midnight divided by the length of the local day.
    ///
    /// Not clamped: events that spill into a neighbouring day fall outside [0, 1).
    #[must_use]
    pub const fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Local wall clock time formatted as `HH:MM:SS`.
    #[must_use]
    pub fn clock(&self) -> String {
        self.instant.format("%H:%M:%S").to_string()
    }
}

/// Solar events computed for one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayEphemeris {
    date: NaiveDate,
    span: DaySpan,
    events: BTreeMap<SolarEvent, EventTime>,
    missing: Vec<SolarEvent>,
}

impl DayEphemeris {
    pub(crate) const fn new(
        date: NaiveDate,
        span: DaySpan,
        events: BTreeMap<SolarEvent, EventTime>,
        missing: Vec<SolarEvent>,
    ) -> Self {
        Self {
            date,
            span,
            events,
            missing,
        }
    }

    /// The calendar day.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Ordinal day of the year, starting at 1.
    #[must_use]
    pub fn day_of_year(&self) -> u32 {
        self.date.ordinal()
    }

    /// Local span of the day.
    #[must_use]
    pub const fn span(&self) -> &DaySpan {
        &self.span
    }

    /// The computed event, if it occurs on this day.
    #[must_use]
    pub fn get(&self, event: SolarEvent) -> Option<&EventTime> {
        self.events.get(&event)
    }

    /// Day fraction of the event, if it occurs on this day.
    #[must_use]
    pub fn fraction(&self, event: SolarEvent) -> Option<f64> {
        self.get(event).map(EventTime::fraction)
    }

    /// The computed event.
    ///
    /// # Errors
    /// Returns `NoEvent` if the event was requested but does not occur on this day,
    /// or was never requested.
    pub fn require(&self, event: SolarEvent) -> Result<&EventTime> {
        self.get(event)
            .ok_or_else(|| Error::no_event(event, self.date))
    }

    /// Requested events that do not occur on this day, in chronological order.
    #[must_use]
    pub fn missing(&self) -> &[SolarEvent] {
        &self.missing
    }

    /// Whether every requested event occurs.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Computed events in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (SolarEvent, &EventTime)> {
        self.events.iter().map(|(event, time)| (*event, time))
    }
}
