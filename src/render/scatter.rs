//! Scatter series of analemma samples as CSV, one series per observation hour.

use crate::Result;
use crate::analemma::{Analemma, Clock};
use crate::calendar::DateRange;
use crate::ephemeris::Ephemeris;
use crate::observer::Observer;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

/// One CSV record.
#[derive(Debug, Serialize)]
struct Row {
    hour: u32,
    date: NaiveDate,
    azimuth: f64,
    altitude: f64,
    azimuth_norm: f64,
    altitude_norm: f64,
}

/// Samples each hour over `range` and writes every sample as a CSV row, returning the
/// number of rows written.
///
/// The header is `hour,date,azimuth,altitude,azimuth_norm,altitude_norm`; normalised
/// columns are scaled within each hour's series.
///
/// # Errors
/// Returns sampling, ephemeris or CSV errors.
pub fn write_scatter<W: Write, E: Ephemeris + ?Sized>(
    out: W,
    ephemeris: &E,
    observer: &Observer,
    range: DateRange,
    hours: &[u32],
    clock: Clock,
) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(out);
    let mut rows = 0;
    for &hour in hours {
        let analemma = Analemma::compute(ephemeris, observer, range, hour, clock)?;
        rows += write_series(&mut writer, &analemma)?;
    }
    writer.flush()?;
    Ok(rows)
}

/// Writes one hour's series to an open CSV writer.
///
/// # Errors
/// Returns the CSV error from `writer`.
pub fn write_series<W: Write>(writer: &mut csv::Writer<W>, analemma: &Analemma) -> Result<usize> {
    let (azimuth, altitude) = (analemma.azimuth(), analemma.altitude());
    for point in analemma.points() {
        writer.serialize(Row {
            hour: analemma.hour(),
            date: point.date,
            azimuth: point.azimuth,
            altitude: point.altitude,
            azimuth_norm: azimuth.normalize(point.azimuth),
            altitude_norm: altitude.normalize(point.altitude),
        })?;
    }
    Ok(analemma.points().len())
}
