//! Output renderers: LaTeX macro definitions, scatter series and the daylight table.
//!
//! Renderers write to any [`std::io::Write`]. Lines are written as soon as each day is
//! computed, so an aborted run leaves the lines for earlier days in place.

use crate::types::{DayEphemeris, SolarEvent};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

pub mod daylight;
pub mod macros;
pub mod scatter;

/// What a renderer does with a day on which a required event does not occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum GapPolicy {
    /// Omit the day and log a warning.
    Skip,
    /// Emit the day with empty fields for the missing events.
    Placeholder,
    /// Stop with `NoEvent` for the first missing event.
    #[default]
    Abort,
}

impl GapPolicy {
    /// Decides whether `day` is rendered.
    ///
    /// Returns `Ok(true)` to render (possibly with placeholders), `Ok(false)` to skip.
    ///
    /// # Errors
    /// Returns `NoEvent` under [`GapPolicy::Abort`] when any event is missing.
    pub fn admit(self, day: &DayEphemeris) -> Result<bool> {
        let Some(&first) = day.missing().first() else {
            return Ok(true);
        };
        match self {
            Self::Abort => Err(Error::no_event(first, day.date())),
            Self::Skip => {
                log::warn!(
                    "skipping {}: {} does not occur",
                    day.date(),
                    join_events(day.missing())
                );
                Ok(false)
            }
            Self::Placeholder => Ok(true),
        }
    }
}

fn join_events(events: &[SolarEvent]) -> String {
    events
        .iter()
        .map(|event| event.name())
        .collect::<Vec<_>>()
        .join(", ")
}
