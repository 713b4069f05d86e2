//! Plain-text daylight table: one line per day with sunrise, sunset and a bar chart.
//!
//! ```text
//! 2018-01-01 07:47:53 0.325 16:38:15 0.693 ░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░▓▓▓▓▓▓...
//! ```

use super::GapPolicy;
use crate::Result;
use crate::calculator::DayFractionCalculator;
use crate::calendar::DateRange;
use crate::ephemeris::Ephemeris;
use crate::types::{DayEphemeris, SolarEvent};
use std::io::Write;

/// Default bar width: one cell per quarter hour.
pub const DEFAULT_WIDTH: usize = 24 * 4;

/// Bar cell before sunrise and after sunset.
pub const NIGHT: char = '░';
/// Bar cell between sunrise and sunset.
pub const DAYLIGHT: char = '▓';
/// Bar cell for days whose sunrise or sunset does not occur.
pub const UNKNOWN: char = '▒';

const EVENTS: [SolarEvent; 2] = [SolarEvent::Sunrise, SolarEvent::Sunset];

/// Draws a `width`-cell bar with daylight between the two day fractions.
///
/// Fractions outside [0, 1] are clipped to the bar.
///
/// # Example
/// ```
/// # use solar_ephemera::render::daylight::bar;
/// assert_eq!(bar(0.25, 0.75, 8), "░░▓▓▓▓░░");
/// ```
#[must_use]
pub fn bar(sunrise: f64, sunset: f64, width: usize) -> String {
    let rise = cell(sunrise, width);
    let set = cell(sunset, width).max(rise);
    let mut line = String::with_capacity(width * NIGHT.len_utf8());
    line.extend(std::iter::repeat_n(NIGHT, rise));
    line.extend(std::iter::repeat_n(DAYLIGHT, set - rise));
    line.extend(std::iter::repeat_n(NIGHT, width - set));
    line
}

#[allow(clippy::cast_sign_loss)]
fn cell(fraction: f64, width: usize) -> usize {
    let width_f = width as f64;
    (fraction * width_f).round().clamp(0.0, width_f) as usize
}

/// Writes one table line per day of `range`, returning the number of lines.
///
/// Under [`GapPolicy::Placeholder`] missing times print as `--:--:--`, missing fractions
/// as `-----`, and the bar is drawn with [`UNKNOWN`] cells.
///
/// # Errors
/// Returns calculator and ephemeris errors, `NoEvent` under [`GapPolicy::Abort`], or the
/// I/O error from `out`.
pub fn write_table<W: Write, E: Ephemeris>(
    out: &mut W,
    calculator: &DayFractionCalculator<E>,
    range: DateRange,
    width: usize,
    gaps: GapPolicy,
) -> Result<usize> {
    let mut lines = 0;
    for date in range {
        let day = calculator.compute_partial(date, &EVENTS)?;
        if !gaps.admit(&day)? {
            continue;
        }
        writeln!(out, "{}", table_line(&day, width))?;
        lines += 1;
    }
    Ok(lines)
}

fn table_line(day: &DayEphemeris, width: usize) -> String {
    let mut line = day.date().format("%Y-%m-%d").to_string();
    for event in EVENTS {
        match day.get(event) {
            Some(time) => {
                line.push_str(&format!(" {} {:.3}", time.clock(), time.fraction()));
            }
            None => line.push_str(" --:--:-- -----"),
        }
    }
    line.push(' ');
    match (
        day.fraction(SolarEvent::Sunrise),
        day.fraction(SolarEvent::Sunset),
    ) {
        (Some(sunrise), Some(sunset)) => line.push_str(&bar(sunrise, sunset, width)),
        _ => line.extend(std::iter::repeat_n(UNKNOWN, width)),
    }
    line
}
