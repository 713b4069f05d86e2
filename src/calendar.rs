//! Calendar helpers: inclusive date ranges and time-zone aware day spans.
//!
//! A local day runs from its local midnight up to the next day's local midnight. On DST
//! transition days that span is 23 or 25 hours long, and day fractions are measured
//! against the actual span rather than a fixed 24 hours.

use crate::{Error, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, TimeZone};
use chrono_tz::Tz;
use core::iter::FusedIterator;

/// Nanoseconds per second
const NANOS_PER_SECOND: f64 = 1e9;

/// Candidate start of a day when midnight itself is skipped, in minutes after midnight.
///
/// DST gaps are at most a few hours long and always shift by whole quarter hours.
const DAY_START_SEARCH_MINUTES: i64 = 6 * 60;
const DAY_START_SEARCH_STEP: usize = 15;

/// Inclusive range of calendar days.
///
/// Iterating is lazy and restartable: every call to [`DateRange::iter`] starts over from
/// the first day.
///
/// # Example
/// ```
/// # use solar_ephemera::DateRange;
/// # use chrono::NaiveDate;
/// let start = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2018, 12, 31).unwrap();
/// let range = DateRange::new(start, end).unwrap();
/// assert_eq!(range.len(), 365);
/// assert_eq!(range.iter().last(), Some(end));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range from `start` to `end`, both included.
    ///
    /// # Errors
    /// Returns `InvalidRange` if `end` precedes `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(Error::invalid_range(start, end));
        }
        Ok(Self { start, end })
    }

    /// A single day.
    #[must_use]
    pub const fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Every day of a calendar year.
    ///
    /// # Errors
    /// Returns `InvalidDate` if the year is outside chrono's supported range.
    pub fn year(year: i32) -> Result<Self> {
        let start = NaiveDate::from_yo_opt(year, 1)
            .ok_or_else(|| Error::invalid_date(NaiveDate::MIN, "year out of range"))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| Error::invalid_date(start, "year out of range"))?;
        Self::new(start, end)
    }

    /// First day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days, `(end - start).days + 1`.
    #[must_use]
    pub fn len(&self) -> usize {
        let days = self.end.signed_duration_since(self.start).num_days();
        usize::try_from(days).map_or(0, |days| days + 1)
    }

    /// Always false: a valid range holds at least one day.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Whether `date` falls inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start..=self.end).contains(&date)
    }

    /// Iterates the days in order.
    #[must_use]
    pub fn iter(&self) -> Days {
        Days {
            front: Some(self.start),
            back: self.end,
        }
    }
}

impl IntoIterator for DateRange {
    type Item = NaiveDate;
    type IntoIter = Days;

    fn into_iter(self) -> Days {
        self.iter()
    }
}

impl IntoIterator for &DateRange {
    type Item = NaiveDate;
    type IntoIter = Days;

    fn into_iter(self) -> Days {
        self.iter()
    }
}

/// Iterator over the days of a [`DateRange`].
#[derive(Debug, Clone)]
pub struct Days {
    front: Option<NaiveDate>,
    back: NaiveDate,
}

impl Iterator for Days {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.front?;
        self.front = if current < self.back {
            current.succ_opt()
        } else {
            None
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.front.map_or(0, |front| {
            let days = self.back.signed_duration_since(front).num_days();
            usize::try_from(days).map_or(0, |days| days + 1)
        });
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Days {
    fn next_back(&mut self) -> Option<NaiveDate> {
        let front = self.front?;
        let current = self.back;
        if current > front {
            // back > front guarantees a predecessor exists
            self.back = current.pred_opt().unwrap_or(front);
        } else {
            self.front = None;
        }
        Some(current)
    }
}

impl ExactSizeIterator for Days {}

impl FusedIterator for Days {}

/// The local extent of one calendar day: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySpan {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl DaySpan {
    /// Local midnight (or the first valid instant) of the day.
    #[must_use]
    pub const fn start(&self) -> DateTime<Tz> {
        self.start
    }

    /// Local midnight of the following day.
    #[must_use]
    pub const fn end(&self) -> DateTime<Tz> {
        self.end
    }

    /// Elapsed length of the day; 24 h except on DST transitions.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end.signed_duration_since(self.start)
    }

    /// Position of `instant` within the day, as a fraction of the day's length.
    ///
    /// Instants before the start give negative values, instants at or after the end give
    /// values of 1 or more.
    #[must_use]
    pub fn fraction_of<Z: TimeZone>(&self, instant: &DateTime<Z>) -> f64 {
        let elapsed = instant.clone().signed_duration_since(self.start);
        seconds(elapsed) / seconds(self.duration())
    }

    /// The instant that lies `fraction` of the way through the day.
    ///
    /// Returns `None` if the result is outside chrono's representable range.
    #[must_use]
    pub fn instant_at(&self, fraction: f64) -> Option<DateTime<Tz>> {
        let nanos = (fraction * seconds(self.duration()) * NANOS_PER_SECOND).round();
        if !nanos.is_finite() {
            return None;
        }
        self.start
            .checked_add_signed(TimeDelta::nanoseconds(nanos as i64))
    }

    /// Whether `instant` falls within `[start, end)`.
    #[must_use]
    pub fn contains<Z: TimeZone>(&self, instant: &DateTime<Z>) -> bool {
        let utc = instant.naive_utc();
        self.start.naive_utc() <= utc && utc < self.end.naive_utc()
    }
}

/// Seconds in a duration, with sub-second precision.
fn seconds(delta: TimeDelta) -> f64 {
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / NANOS_PER_SECOND
}

/// Computes the local span of `date` in zone `tz`.
///
/// # Errors
/// Returns `InvalidDate` if no valid local instant starts the day or the next day.
pub fn day_span(tz: &Tz, date: NaiveDate) -> Result<DaySpan> {
    let next = date
        .succ_opt()
        .ok_or_else(|| Error::invalid_date(date, "no following day"))?;
    Ok(DaySpan {
        start: local_midnight(tz, date)?,
        end: local_midnight(tz, next)?,
    })
}

/// First local instant of `date` in zone `tz`.
///
/// Ambiguous midnights resolve to the earlier instant. Where a DST gap swallows midnight,
/// the first valid quarter hour after it starts the day.
///
/// # Errors
/// Returns `InvalidDate` if no valid instant is found in the first hours of the day.
pub fn local_midnight(tz: &Tz, date: NaiveDate) -> Result<DateTime<Tz>> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..=DAY_START_SEARCH_MINUTES)
        .step_by(DAY_START_SEARCH_STEP)
        .find_map(|minutes| {
            tz.from_local_datetime(&(midnight + TimeDelta::minutes(minutes)))
                .earliest()
        })
        .ok_or_else(|| Error::invalid_date(date, "no valid local midnight"))
}

/// Local wall clock `hour:00` of `date` in zone `tz`.
///
/// Ambiguous times resolve to the earlier instant; a skipped hour moves to the next hour.
///
/// # Errors
/// Returns `InvalidHour` for hours above 23 and `InvalidDate` if the zone cannot represent
/// the requested time.
pub fn local_time(tz: &Tz, date: NaiveDate, hour: u32) -> Result<DateTime<Tz>> {
    crate::error::check_hour(hour)?;
    let start = date.and_time(NaiveTime::MIN) + TimeDelta::hours(i64::from(hour));
    (0..=2)
        .find_map(|shift| {
            tz.from_local_datetime(&(start + TimeDelta::hours(shift)))
                .earliest()
        })
        .ok_or_else(|| Error::invalid_date(date, "wall clock hour does not exist"))
}

/// Day of year, starting at 1.
#[must_use]
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}
