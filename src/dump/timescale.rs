//! Dump timescale: how much real time one tick represents.

use std::fmt;
use std::str::FromStr;

/// Real-world unit of a timescale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeUnit {
    /// Femtoseconds.
    Fs,
    /// Picoseconds.
    Ps,
    /// Nanoseconds.
    #[default]
    Ns,
    /// Microseconds.
    Us,
    /// Milliseconds.
    Ms,
    /// Seconds.
    S,
}

impl TimeUnit {
    /// Unit suffix as written in dumps.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Fs => "fs",
            Self::Ps => "ps",
            Self::Ns => "ns",
            Self::Us => "us",
            Self::Ms => "ms",
            Self::S => "s",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fs" => Ok(Self::Fs),
            "ps" => Ok(Self::Ps),
            "ns" => Ok(Self::Ns),
            "us" => Ok(Self::Us),
            "ms" => Ok(Self::Ms),
            "s" => Ok(Self::S),
            _ => Err(()),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Positive magnitude paired with a unit, e.g. `10ps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timescale {
    /// Ticks-to-unit multiplier (always > 0).
    pub magnitude: u32,
    /// Unit of one magnitude step.
    pub unit: TimeUnit,
}

impl Default for Timescale {
    fn default() -> Self {
        Self {
            magnitude: 1,
            unit: TimeUnit::Ns,
        }
    }
}

impl Timescale {
    /// Create a timescale; returns `None` for a zero magnitude.
    #[must_use]
    pub const fn new(magnitude: u32, unit: TimeUnit) -> Option<Self> {
        if magnitude == 0 {
            None
        } else {
            Some(Self { magnitude, unit })
        }
    }

    /// Parse the body of a `$timescale` section: `1ns`, `1 ns`, `100PS`.
    ///
    /// ```
    /// use trueno_wave::dump::{TimeUnit, Timescale};
    ///
    /// let ts = Timescale::parse(" 10 ps ").unwrap();
    /// assert_eq!(ts.magnitude, 10);
    /// assert_eq!(ts.unit, TimeUnit::Ps);
    /// assert!(Timescale::parse("fast").is_none());
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let compact: String = text.split_whitespace().collect();
        let split = compact.find(|c: char| !c.is_ascii_digit())?;
        let (digits, unit) = compact.split_at(split);
        let magnitude = digits.parse::<u32>().ok()?;
        Self::new(magnitude, unit.parse().ok()?)
    }

    /// Format a tick count in this timescale, e.g. `20ns` for 2 ticks at `10ns`.
    #[must_use]
    pub fn format_ticks(&self, ticks: f64) -> String {
        let value = ticks * f64::from(self.magnitude);
        if (value - value.round()).abs() < 1e-9 {
            format!("{}{}", value.round() as i64, self.unit)
        } else {
            format!("{value:.1}{}", self.unit)
        }
    }
}

impl fmt::Display for Timescale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit)
    }
}
