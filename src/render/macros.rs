//! LaTeX macro emitter.
//!
//! Output is a single `\EPH` definition holding one `\eph` call per day, each with the day
//! of year and eight fields:
//!
//! ```text
//! \def\EPH{
//! \eph{1}{0.377}{0.005}{3.098}{0.507}{07:47:53}{0.325}{16:38:15}{0.693}
//! ...
//! }
//! ```
//!
//! Raw altitude and azimuth are written in radians unless [`AngleUnit::Degrees`] is chosen.

use super::GapPolicy;
use crate::Result;
use crate::analemma::{Analemma, Clock};
use crate::calculator::DayFractionCalculator;
use crate::calendar::DateRange;
use crate::ephemeris::Ephemeris;
use crate::types::{DayEphemeris, SolarEvent};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Opening line of the macro block.
pub const OPEN: &str = "\\def\\EPH{";
/// Closing line of the macro block.
pub const CLOSE: &str = "}";

/// Field layout of the `\eph` lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Layout {
    /// Altitude, normalised altitude, azimuth, normalised azimuth, then sunrise and sunset
    /// as `HH:MM:SS` and day fraction. Three decimals.
    #[default]
    Analemma,
    /// Dawn and dusk fractions from astronomical twilight through sunrise and sunset and
    /// back out. Four decimals.
    Twilight,
}

impl Layout {
    /// Events each line needs.
    #[must_use]
    pub const fn events(self) -> &'static [SolarEvent] {
        match self {
            Self::Analemma => &[SolarEvent::Sunrise, SolarEvent::Sunset],
            Self::Twilight => &[
                SolarEvent::AstronomicalDawn,
                SolarEvent::NauticalDawn,
                SolarEvent::CivilDawn,
                SolarEvent::Sunrise,
                SolarEvent::Sunset,
                SolarEvent::CivilDusk,
                SolarEvent::NauticalDusk,
                SolarEvent::AstronomicalDusk,
            ],
        }
    }

    /// Decimal places of numeric fields.
    #[must_use]
    pub const fn decimals(self) -> usize {
        match self {
            Self::Analemma => 3,
            Self::Twilight => 4,
        }
    }
}

/// Unit of the raw altitude and azimuth fields in the analemma layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum AngleUnit {
    /// Radians.
    #[default]
    Radians,
    /// Degrees.
    Degrees,
}

impl AngleUnit {
    /// Converts `degrees` to this unit.
    #[must_use]
    pub fn convert(self, degrees: f64) -> f64 {
        match self {
            Self::Radians => degrees.to_radians(),
            Self::Degrees => degrees,
        }
    }
}

/// Settings for [`write_macros`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MacroOptions {
    /// Field layout.
    pub layout: Layout,
    /// Analemma sampling hour (analemma layout only).
    pub hour: u32,
    /// Clock the sampling hour is read on (analemma layout only).
    pub clock: Clock,
    /// Unit of raw altitude and azimuth (analemma layout only).
    pub angles: AngleUnit,
    /// Handling of days with missing events.
    pub gaps: GapPolicy,
}

impl MacroOptions {
    /// Options for `layout` with the sampling hour at noon.
    #[must_use]
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            hour: 12,
            ..Self::default()
        }
    }
}

enum Field {
    Number(f64),
    Clock(String),
    Empty,
}

/// Writes the complete macro block for `range`, returning the number of `\eph` lines.
///
/// # Errors
/// Returns calculator and ephemeris errors, `NoEvent` under [`GapPolicy::Abort`], or the
/// I/O error from `out`.
pub fn write_macros<W: Write, E: Ephemeris>(
    out: &mut W,
    calculator: &DayFractionCalculator<E>,
    range: DateRange,
    options: &MacroOptions,
) -> Result<usize> {
    match options.layout {
        Layout::Twilight => write_twilight(out, calculator, range, options.gaps),
        Layout::Analemma => {
            let analemma = Analemma::compute(
                calculator.ephemeris(),
                calculator.observer(),
                range,
                options.hour,
                options.clock,
            )?;
            write_analemma(out, calculator, &analemma, options.angles, options.gaps)
        }
    }
}

/// Writes the twilight layout for every day of `range`.
///
/// # Errors
/// See [`write_macros`].
pub fn write_twilight<W: Write, E: Ephemeris>(
    out: &mut W,
    calculator: &DayFractionCalculator<E>,
    range: DateRange,
    gaps: GapPolicy,
) -> Result<usize> {
    let layout = Layout::Twilight;
    writeln!(out, "{OPEN}")?;
    let mut lines = 0;
    for date in range {
        let day = calculator.compute_partial(date, layout.events())?;
        if !gaps.admit(&day)? {
            continue;
        }
        let fields: Vec<Field> = layout
            .events()
            .iter()
            .map(|&event| fraction_field(&day, event))
            .collect();
        write_line(out, day.day_of_year(), &fields, layout.decimals())?;
        lines += 1;
    }
    writeln!(out, "{CLOSE}")?;
    Ok(lines)
}

/// Writes the analemma layout for every day sampled in `analemma`, with raw angles in
/// `angles`. Normalised values do not depend on the unit.
///
/// # Errors
/// See [`write_macros`].
pub fn write_analemma<W: Write, E: Ephemeris>(
    out: &mut W,
    calculator: &DayFractionCalculator<E>,
    analemma: &Analemma,
    angles: AngleUnit,
    gaps: GapPolicy,
) -> Result<usize> {
    let layout = Layout::Analemma;
    let (altitude, azimuth) = (analemma.altitude(), analemma.azimuth());
    writeln!(out, "{OPEN}")?;
    let mut lines = 0;
    for point in analemma.points() {
        let day = calculator.compute_partial(point.date, layout.events())?;
        if !gaps.admit(&day)? {
            continue;
        }
        let mut fields = vec![
            Field::Number(angles.convert(point.altitude)),
            Field::Number(altitude.normalize(point.altitude)),
            Field::Number(angles.convert(point.azimuth)),
            Field::Number(azimuth.normalize(point.azimuth)),
        ];
        for &event in layout.events() {
            fields.push(
                day.get(event)
                    .map_or(Field::Empty, |time| Field::Clock(time.clock())),
            );
            fields.push(fraction_field(&day, event));
        }
        write_line(out, day.day_of_year(), &fields, layout.decimals())?;
        lines += 1;
    }
    writeln!(out, "{CLOSE}")?;
    Ok(lines)
}

fn fraction_field(day: &DayEphemeris, event: SolarEvent) -> Field {
    day.fraction(event).map_or(Field::Empty, Field::Number)
}

fn write_line<W: Write>(
    out: &mut W,
    day_of_year: u32,
    fields: &[Field],
    decimals: usize,
) -> std::io::Result<()> {
    write!(out, "\\eph{{{day_of_year}}}")?;
    for field in fields {
        match field {
            Field::Number(value) => write!(out, "{{{value:.decimals$}}}")?,
            Field::Clock(clock) => write!(out, "{{{clock}}}")?,
            Field::Empty => write!(out, "{{}}")?,
        }
    }
    writeln!(out)
}
