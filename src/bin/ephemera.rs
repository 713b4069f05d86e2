//! `ephemera`: print solar ephemerides for a date range.
//!
//! Settings come from an optional TOML file (see [`solar_ephemera::config`]) and are
//! overridden by command-line options. Output goes to stdout, logs to stderr
//! (`RUST_LOG=debug` for per-day detail).

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use solar_ephemera::render::daylight::write_table;
use solar_ephemera::render::macros::write_macros;
use solar_ephemera::render::scatter::write_scatter;
use solar_ephemera::{
    AngleUnit, Clock, Config, DayFractionCalculator, GapPolicy, Layout, TzfResolver,
};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ephemera", version, about = "Solar ephemerides as fractions of the local day")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// First day (YYYY-MM-DD)
    #[arg(long, global = true)]
    start: Option<NaiveDate>,
    /// Last day, inclusive (YYYY-MM-DD)
    #[arg(long, global = true)]
    end: Option<NaiveDate>,
    /// Latitude in degrees, north positive
    #[arg(long, global = true, allow_negative_numbers = true)]
    latitude: Option<f64>,
    /// Longitude in degrees, east positive
    #[arg(long, global = true, allow_negative_numbers = true)]
    longitude: Option<f64>,
    /// Elevation in metres
    #[arg(long, global = true, allow_negative_numbers = true)]
    elevation: Option<f64>,
    /// IANA time zone; looked up from the coordinates when omitted
    #[arg(long, global = true)]
    timezone: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// LaTeX `\EPH` macro definition, one `\eph` line per day
    Macros {
        /// Field layout
        #[arg(long, value_enum)]
        layout: Option<Layout>,
        /// Analemma observation hour (analemma layout)
        #[arg(long)]
        hour: Option<u32>,
        /// Clock the observation hour is read on
        #[arg(long, value_enum)]
        clock: Option<Clock>,
        /// Unit of raw altitude and azimuth (analemma layout)
        #[arg(long, value_enum)]
        angles: Option<AngleUnit>,
        /// Handling of days without sunrise, sunset or twilight
        #[arg(long, value_enum)]
        gaps: Option<GapPolicy>,
    },
    /// CSV scatter series of sun azimuth/altitude, one series per hour
    Scatter {
        /// Observation hours, comma separated (default 11,12,13)
        #[arg(long, value_delimiter = ',')]
        hours: Vec<u32>,
        /// Clock the observation hours are read on (default civil)
        #[arg(long, value_enum)]
        clock: Option<Clock>,
    },
    /// Daylight table with sunrise, sunset and a bar per day
    Table {
        /// Bar width in cells
        #[arg(long)]
        width: Option<usize>,
        /// Handling of days without sunrise or sunset
        #[arg(long, value_enum)]
        gaps: Option<GapPolicy>,
    },
}

impl Cli {
    /// Configuration file (or defaults) with command-line overrides applied.
    fn settings(&self) -> solar_ephemera::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(start) = self.start {
            config.start = start;
        }
        if let Some(end) = self.end {
            config.end = end;
        }
        if let Some(latitude) = self.latitude {
            config.latitude = latitude;
        }
        if let Some(longitude) = self.longitude {
            config.longitude = longitude;
        }
        if let Some(elevation) = self.elevation {
            config.elevation = elevation;
        }
        if let Some(timezone) = &self.timezone {
            config.timezone = Some(timezone.clone());
        }

        match &self.command {
            Command::Macros {
                layout,
                hour,
                clock,
                angles,
                gaps,
            } => {
                config.layout = layout.unwrap_or(config.layout);
                config.hour = hour.unwrap_or(config.hour);
                config.clock = clock.unwrap_or(config.clock);
                config.angles = angles.unwrap_or(config.angles);
                config.gaps = gaps.unwrap_or(config.gaps);
            }
            Command::Scatter { hours, clock } => {
                if !hours.is_empty() {
                    config.scatter.hours.clone_from(hours);
                }
                config.scatter.clock = clock.unwrap_or(config.scatter.clock);
            }
            Command::Table { width, gaps } => {
                config.bar_width = width.unwrap_or(config.bar_width);
                config.gaps = gaps.unwrap_or(config.gaps);
            }
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.settings()?;

    let observer = if config.timezone.is_some() {
        config.observer(&chrono_tz::UTC)?
    } else {
        config.observer(&TzfResolver::new())?
    };
    log::info!(
        "observer {:.5}, {:.5} at {} m in {}",
        observer.latitude(),
        observer.longitude(),
        observer.elevation(),
        observer.timezone()
    );

    let calculator = DayFractionCalculator::with_ephemeris(observer, config.ephemeris()?);
    let range = config.range()?;
    let mut out = BufWriter::new(io::stdout().lock());

    let lines = match cli.command {
        Command::Macros { .. } => {
            write_macros(&mut out, &calculator, range, &config.macro_options())?
        }
        Command::Scatter { .. } => write_scatter(
            &mut out,
            calculator.ephemeris(),
            calculator.observer(),
            range,
            &config.scatter.hours,
            config.scatter.clock,
        )?,
        Command::Table { .. } => {
            write_table(&mut out, &calculator, range, config.bar_width, config.gaps)?
        }
    };
    out.flush()?;
    log::info!("{lines} records written for {} days", range.len());
    Ok(())
}
