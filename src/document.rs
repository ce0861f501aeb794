//! Parsed dump contents.

use crate::dump::Timescale;
use crate::timeline::{Change, Signal, Time, Value};

/// Signals declared in a dump and their change timelines.
///
/// Produced once by [`crate::dump::parse`] and never mutated afterwards.
/// Signal order is declaration order and is the default display order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    timescale: Timescale,
    signals: Vec<Signal>,
    duration: Time,
    date: Option<String>,
    version: Option<String>,
}

impl Document {
    pub(crate) fn new(
        timescale: Timescale,
        signals: Vec<Signal>,
        duration: Time,
        date: Option<String>,
        version: Option<String>,
    ) -> Self {
        Self {
            timescale,
            signals,
            duration,
            date,
            version,
        }
    }

    /// Tick unit of the dump body.
    #[must_use]
    pub const fn timescale(&self) -> Timescale {
        self.timescale
    }

    /// All signals in declaration order.
    #[must_use]
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Signal at declaration index `index`.
    #[must_use]
    pub fn signal(&self, index: usize) -> Option<&Signal> {
        self.signals.get(index)
    }

    /// Number of declared signals.
    #[must_use]
    pub fn signal_count(&self) -> usize {
        self.signals.len()
    }

    /// Largest time marker seen; 0 when the body has none.
    #[must_use]
    pub const fn duration(&self) -> Time {
        self.duration
    }

    /// `$date` section text, if present.
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// `$version` section text, if present.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// First signal whose display name equals `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<(usize, &Signal)> {
        self.signals.iter().enumerate().find(|(_, s)| s.name() == name)
    }

    /// Total number of recorded changes across all signals.
    #[must_use]
    pub fn change_count(&self) -> usize {
        self.signals.iter().map(|s| s.changes().len()).sum()
    }

    /// [`Signal::value_at`] for the signal at `index`.
    #[must_use]
    pub fn value_at(&self, index: usize, t: Time) -> Option<Value> {
        self.signal(index).map(|s| s.value_at(t))
    }

    /// [`Signal::changes_in_range`] for the signal at `index`.
    #[must_use]
    pub fn changes_in_range(&self, index: usize, start: Time, end: Time) -> Option<&[Change]> {
        self.signal(index).map(|s| s.changes_in_range(start, end))
    }
}
