//! # Solar Ephemera
//!
//! Solar ephemerides for a fixed observer, expressed as fractions of the local day.
//!
//! For every day of a date range this library computes sunrise, solar noon, sunset and the
//! civil, nautical and astronomical twilights, converts them to the observer's IANA time zone
//! and divides their offset from local midnight by the actual length of that local day. Days
//! with a DST transition are 23 or 25 hours long, and their fractions are measured against
//! that length.
//!
//! The astronomy is delegated to the [`solar_positioning`] crate (NREL SPA). This crate
//! chooses query instants, handles the time zones and formats results as:
//!
//! - LaTeX macro definitions (`\def\EPH{ \eph{...}... }`) in an analemma or a twilight layout
//! - CSV scatter series of the sun's azimuth and altitude at fixed hours (analemmas)
//! - a plain-text daylight table with a bar chart per day
//!
//! ## Feature Flags
//!
//! - `tz-lookup` (default): resolve the time zone from coordinates with `tzf-rs`
//! - `cli` (default): the `ephemera` command-line tool
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use solar_ephemera::{DateRange, DayFractionCalculator, Observer, SolarEvent};
//!
//! let observer = Observer::new(45.23154, 11.87498, 7.0, chrono_tz::Europe::Rome).unwrap();
//! let calculator = DayFractionCalculator::new(observer);
//!
//! let march = DateRange::new(
//!     NaiveDate::from_ymd_opt(2018, 3, 24).unwrap(),
//!     NaiveDate::from_ymd_opt(2018, 3, 26).unwrap(),
//! )
//! .unwrap();
//!
//! for day in calculator.over(march, &SolarEvent::DAYLIGHT) {
//!     let day = day.unwrap();
//!     let sunrise = day.require(SolarEvent::Sunrise).unwrap();
//!     println!("{} sunrise {} ({:.3})", day.date(), sunrise.clock(), sunrise.fraction());
//! }
//! ```
//!
//! ### Analemma
//!
//! ```rust
//! use solar_ephemera::{Analemma, Clock, DateRange, Observer, Spa};
//!
//! let observer = Observer::new(45.23154, 11.87498, 7.0, chrono_tz::Europe::Rome).unwrap();
//! let year = DateRange::year(2018).unwrap();
//! let analemma = Analemma::compute(&Spa::default(), &observer, year, 12, Clock::MeanSolar).unwrap();
//!
//! let first = &analemma.points()[0];
//! println!("{:.3}° {:.3}", first.altitude, analemma.altitude().normalize(first.altitude));
//! ```
//!
//! ## Conventions
//!
//! - **Day fraction**: (event − local midnight) / (next local midnight − local midnight), never clamped
//! - **Azimuth**: degrees, 0° = North, measured clockwise
//! - **Altitude**: degrees above the horizon, refraction applied unless disabled
//! - **Macro angles**: the analemma layout writes raw altitude and azimuth in radians
//!   unless [`AngleUnit::Degrees`] is chosen

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo, clippy::all)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cargo_common_metadata,
    clippy::multiple_crate_versions, // Acceptable for dev-dependencies
    clippy::float_cmp, // Exact comparisons of computed fractions in tests
)]

// Public API exports
pub use crate::analemma::{Analemma, AnalemmaPoint, Clock, Normalizer};
pub use crate::calculator::DayFractionCalculator;
pub use crate::calendar::{DateRange, DaySpan, Days};
pub use crate::config::Config;
pub use crate::ephemeris::{Crossings, Ephemeris, Spa};
pub use crate::error::{Error, Result};
#[cfg(feature = "tz-lookup")]
pub use crate::observer::TzfResolver;
pub use crate::observer::{Observer, ZoneResolver};
pub use crate::render::GapPolicy;
pub use crate::render::macros::{AngleUnit, Layout, MacroOptions};
pub use crate::types::{DayEphemeris, EventTime, Phase, SolarEvent};

// Core modules
pub mod error;
pub mod types;

// Computation
pub mod analemma;
pub mod calculator;
pub mod calendar;
pub mod ephemeris;
pub mod observer;

// Output and settings
pub mod config;
pub mod render;
