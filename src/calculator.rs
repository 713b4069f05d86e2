//! Day-fraction calculator.
//!
//! For each requested event the calculator asks the ephemeris for the UTC instant of the
//! crossing, localizes it to the observer's zone and measures it against the local span
//! of the day (local midnight to the next local midnight).

use crate::calendar::{self, DateRange, DaySpan};
use crate::ephemeris::{Crossings, Ephemeris, Spa};
use crate::observer::Observer;
use crate::types::{DayEphemeris, EventTime, Phase, SolarEvent};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use solar_positioning::{Horizon, SunriseResult};
use std::collections::{BTreeMap, BTreeSet};

/// Local wall clock hour whose UTC instant selects the day's crossings.
const REFERENCE_HOUR: u32 = 12;

/// Computes solar events as fractions of the local day.
///
/// The calculator holds no mutable state: identical inputs always produce identical
/// outputs, so callers may cache results externally.
///
/// # Example
/// ```
/// # use solar_ephemera::{DayFractionCalculator, Observer, SolarEvent};
/// # use chrono::NaiveDate;
/// let observer = Observer::new(45.23154, 11.87498, 7.0, chrono_tz::Europe::Rome).unwrap();
/// let calculator = DayFractionCalculator::new(observer);
/// let day = NaiveDate::from_ymd_opt(2018, 6, 21).unwrap();
///
/// let ephemeris = calculator.compute(day, &SolarEvent::DAYLIGHT).unwrap();
/// let sunrise = ephemeris.fraction(SolarEvent::Sunrise).unwrap();
/// let sunset = ephemeris.fraction(SolarEvent::Sunset).unwrap();
/// assert!(0.0 < sunrise && sunrise < 0.5 && sunset < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct DayFractionCalculator<E = Spa> {
    observer: Observer,
    ephemeris: E,
}

impl DayFractionCalculator<Spa> {
    /// Creates a calculator backed by the SPA ephemeris with standard refraction.
    #[must_use]
    pub fn new(observer: Observer) -> Self {
        Self::with_ephemeris(observer, Spa::default())
    }
}

impl<E: Ephemeris> DayFractionCalculator<E> {
    /// Creates a calculator backed by a custom ephemeris.
    #[must_use]
    pub const fn with_ephemeris(observer: Observer, ephemeris: E) -> Self {
        Self {
            observer,
            ephemeris,
        }
    }

    /// The observer.
    #[must_use]
    pub const fn observer(&self) -> &Observer {
        &self.observer
    }

    /// The ephemeris collaborator.
    #[must_use]
    pub const fn ephemeris(&self) -> &E {
        &self.ephemeris
    }

    /// Computes the requested events for `date`.
    ///
    /// Duplicate event kinds are computed once.
    ///
    /// # Errors
    /// Returns `NoEvent` for the first requested event (in chronological order) that does
    /// not occur on this day, `InvalidDate` if the zone cannot represent the day, or the
    /// ephemeris error.
    pub fn compute(&self, date: NaiveDate, events: &[SolarEvent]) -> Result<DayEphemeris> {
        let day = self.compute_partial(date, events)?;
        if let Some(&event) = day.missing().first() {
            return Err(Error::no_event(event, date));
        }
        Ok(day)
    }

    /// Computes the requested events for `date`, recording missing events instead of
    /// failing on them.
    ///
    /// # Errors
    /// Returns `InvalidDate` if the zone cannot represent the day, or the ephemeris error.
    pub fn compute_partial(&self, date: NaiveDate, events: &[SolarEvent]) -> Result<DayEphemeris> {
        let tz = self.observer.timezone();
        let span = calendar::day_span(&tz, date)?;
        let reference = self.reference_instant(date)?;

        let wanted: BTreeSet<SolarEvent> = events.iter().copied().collect();
        let mut queried: Vec<(Horizon, Crossings)> = Vec::with_capacity(4);
        let mut found = BTreeMap::new();
        let mut missing = Vec::new();

        for event in wanted {
            let horizon = event.horizon();
            let crossings = match queried.iter().find(|(h, _)| *h == horizon) {
                Some((_, crossings)) => crossings.clone(),
                None => {
                    let crossings = self
                        .ephemeris
                        .crossings(&self.observer, reference, horizon)?;
                    queried.push((horizon, crossings.clone()));
                    crossings
                }
            };

            match select(&crossings, event.phase()) {
                Some(instant) => {
                    found.insert(event, localize(&span, instant));
                }
                None => missing.push(event),
            }
        }

        log::debug!(
            "{date}: {} events, {} missing, day length {} min",
            found.len(),
            missing.len(),
            span.duration().num_minutes()
        );
        Ok(DayEphemeris::new(date, span, found, missing))
    }

    /// Computes a single event for `date`.
    ///
    /// # Errors
    /// Returns `NoEvent` if the event does not occur on this day, or the errors of
    /// [`DayFractionCalculator::compute`].
    pub fn event_time(&self, date: NaiveDate, event: SolarEvent) -> Result<EventTime> {
        let day = self.compute(date, &[event])?;
        day.require(event).copied()
    }

    /// Lazily computes the requested events for every day of `range`.
    ///
    /// Each day is independent: an error on one day does not affect the others.
    pub fn over<'a>(
        &'a self,
        range: DateRange,
        events: &'a [SolarEvent],
    ) -> impl Iterator<Item = Result<DayEphemeris>> + 'a {
        range.iter().map(move |date| self.compute(date, events))
    }

    /// UTC instant of local noon, used to pick which crossings belong to `date`.
    fn reference_instant(&self, date: NaiveDate) -> Result<DateTime<Utc>> {
        let noon = calendar::local_time(&self.observer.timezone(), date, REFERENCE_HOUR)?;
        Ok(noon.with_timezone(&Utc))
    }
}

/// Picks the crossing for a phase; rising and setting are absent on polar days and nights.
fn select(crossings: &Crossings, phase: Phase) -> Option<DateTime<Utc>> {
    match (crossings, phase) {
        (SunriseResult::RegularDay { sunrise, .. }, Phase::Rising) => Some(*sunrise),
        (SunriseResult::RegularDay { sunset, .. }, Phase::Setting) => Some(*sunset),
        (
            SunriseResult::RegularDay { transit, .. }
            | SunriseResult::AllDay { transit }
            | SunriseResult::AllNight { transit },
            Phase::Transit,
        ) => Some(*transit),
        (SunriseResult::AllDay { .. } | SunriseResult::AllNight { .. }, _) => None,
    }
}

fn localize(span: &DaySpan, instant: DateTime<Utc>) -> EventTime {
    let local = instant.with_timezone(&span.start().timezone());
    EventTime::new(local, span.fraction_of(&local))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use solar_positioning::SolarPosition;
    use std::cell::RefCell;

    /// Fixed offsets from the reference instant, recording every horizon queried.
    struct Scripted {
        polar_night_below: Option<f64>,
        queries: RefCell<Vec<Horizon>>,
    }

    impl Scripted {
        fn new() -> Self {
            Self {
                polar_night_below: None,
                queries: RefCell::new(Vec::new()),
            }
        }
    }

    impl Ephemeris for Scripted {
        fn crossings(
            &self,
            _observer: &Observer,
            reference: DateTime<Utc>,
            horizon: Horizon,
        ) -> Result<Crossings> {
            self.queries.borrow_mut().push(horizon);
            let depth = -horizon.elevation_angle();
            if self
                .polar_night_below
                .is_some_and(|limit| horizon.elevation_angle() >= limit)
            {
                return Ok(SunriseResult::AllNight { transit: reference });
            }
            let spread = TimeDelta::minutes(360 + (depth * 10.0) as i64);
            Ok(SunriseResult::RegularDay {
                sunrise: reference - spread,
                transit: reference,
                sunset: reference + spread,
            })
        }

        fn position(&self, _observer: &Observer, _instant: DateTime<Utc>) -> Result<SolarPosition> {
            Ok(SolarPosition::new(180.0, 45.0)?)
        }
    }

    fn observer() -> Observer {
        Observer::new(45.23154, 11.87498, 7.0, chrono_tz::Europe::Rome).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_noon_is_reference() {
        let calculator = DayFractionCalculator::with_ephemeris(observer(), Scripted::new());
        let noon = calculator
            .event_time(date(2018, 1, 10), SolarEvent::SolarNoon)
            .unwrap();
        assert_eq!(noon.clock(), "12:00:00");
        assert_eq!(noon.fraction(), 0.5);
        assert_eq!(
            noon.instant().with_timezone(&Utc),
            Utc.with_ymd_and_hms(2018, 1, 10, 11, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_one_query_per_horizon() {
        let scripted = Scripted::new();
        let calculator = DayFractionCalculator::with_ephemeris(observer(), &scripted);
        let day = calculator
            .compute(
                date(2018, 1, 10),
                &[
                    SolarEvent::Sunset,
                    SolarEvent::Sunrise,
                    SolarEvent::SolarNoon,
                    SolarEvent::CivilDawn,
                    SolarEvent::CivilDusk,
                    SolarEvent::Sunrise,
                ],
            )
            .unwrap();

        assert_eq!(day.iter().count(), 5);
        assert!(day.is_complete());
        let queries = scripted.queries.borrow();
        assert_eq!(queries.len(), 2);
        assert!(queries.contains(&Horizon::SunriseSunset));
        assert!(queries.contains(&Horizon::CivilTwilight));
    }

    #[test]
    fn test_only_requested_events_are_returned() {
        let calculator = DayFractionCalculator::with_ephemeris(observer(), Scripted::new());
        let day = calculator
            .compute(date(2018, 1, 10), &[SolarEvent::NauticalDusk])
            .unwrap();
        assert!(day.get(SolarEvent::NauticalDusk).is_some());
        assert!(day.get(SolarEvent::Sunrise).is_none());
        assert!(matches!(
            day.require(SolarEvent::Sunrise),
            Err(Error::NoEvent { .. })
        ));
    }

    #[test]
    fn test_missing_event_is_reported() {
        let scripted = Scripted {
            polar_night_below: Some(-6.0),
            queries: RefCell::new(Vec::new()),
        };
        let calculator = DayFractionCalculator::with_ephemeris(observer(), scripted);
        let day = date(2018, 1, 10);

        let err = calculator.compute(day, &SolarEvent::ALL).unwrap_err();
        match err {
            Error::NoEvent { event, date } => {
                assert_eq!(event, SolarEvent::CivilDawn);
                assert_eq!(date, day);
            }
            other => panic!("unexpected error {other}"),
        }

        let partial = calculator.compute_partial(day, &SolarEvent::ALL).unwrap();
        assert_eq!(
            partial.missing(),
            &[
                SolarEvent::CivilDawn,
                SolarEvent::Sunrise,
                SolarEvent::Sunset,
                SolarEvent::CivilDusk
            ]
        );
        assert!(partial.get(SolarEvent::SolarNoon).is_some());
        assert!(partial.get(SolarEvent::NauticalDawn).is_some());
    }

    #[test]
    fn test_range_errors_do_not_leak_between_days() {
        let calculator = DayFractionCalculator::with_ephemeris(observer(), Scripted::new());
        let range = DateRange::new(date(2018, 1, 1), date(2018, 1, 5)).unwrap();
        let results: Vec<_> = calculator.over(range, &SolarEvent::DAYLIGHT).collect();
        assert_eq!(results.len(), 5);
        assert!(results.iter().all(Result::is_ok));
    }
}
