//! Per-signal change storage and time queries.
//!
//! A [`Signal`] owns an append-only list of [`Change`]s whose times are
//! non-decreasing. Queries never rescan the list: both [`Signal::value_at`]
//! and [`Signal::changes_in_range`] are binary searches, so a redraw costs
//! `O(log n + k)` for `k` visible changes.

use std::fmt;

/// Simulation time in dump ticks (multiples of the document timescale).
pub type Time = u64;

/// Four-state scalar logic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Value {
    /// Logic low.
    Zero,
    /// Logic high.
    One,
    /// Unknown.
    #[default]
    X,
    /// High impedance.
    Z,
}

impl Value {
    /// Parse a scalar value character (`0`, `1`, `x`, `X`, `z`, `Z`).
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Self::Zero),
            '1' => Some(Self::One),
            'x' | 'X' => Some(Self::X),
            'z' | 'Z' => Some(Self::Z),
            _ => None,
        }
    }

    /// Canonical single-character form.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Zero => '0',
            Self::One => '1',
            Self::X => 'X',
            Self::Z => 'Z',
        }
    }

    /// True for `X` and `Z`.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::X | Self::Z)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A single value change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    /// Time of the change, in ticks.
    pub time: Time,
    /// Value from this time onward.
    pub value: Value,
}

impl Change {
    /// Create a change event.
    #[must_use]
    pub const fn new(time: Time, value: Value) -> Self {
        Self { time, value }
    }
}

/// A declared signal and its recorded changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    identifier: String,
    name: String,
    bit_width: u32,
    changes: Vec<Change>,
}

impl Signal {
    /// Declare a signal with no changes yet.
    #[must_use]
    pub fn new(identifier: impl Into<String>, name: impl Into<String>, bit_width: u32) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            bit_width: bit_width.max(1),
            changes: Vec::new(),
        }
    }

    /// Dump-body identifier token.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Display name as declared.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width in bits.
    #[must_use]
    pub const fn bit_width(&self) -> u32 {
        self.bit_width
    }

    /// True for 1-bit signals.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        self.bit_width == 1
    }

    /// All changes in time order.
    #[must_use]
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// Append a change. Changes at the same time keep arrival order.
    ///
    /// Returns `false` (and records nothing) if `time` precedes the last
    /// recorded change.
    pub(crate) fn push(&mut self, time: Time, value: Value) -> bool {
        if self.changes.last().is_some_and(|last| time < last.time) {
            return false;
        }
        self.changes.push(Change::new(time, value));
        true
    }

    /// Value of the last change at or before `t`, or `X` before the first change.
    ///
    /// ```
    /// use trueno_wave::dump::parse;
    /// use trueno_wave::timeline::Value;
    ///
    /// let (doc, _) = parse("$var wire 1 ! clk $end\n#0\n0!\n#5\n1!\n").unwrap();
    /// let clk = &doc.signals()[0];
    /// assert_eq!(clk.value_at(4), Value::Zero);
    /// assert_eq!(clk.value_at(5), Value::One);
    /// ```
    #[must_use]
    pub fn value_at(&self, t: Time) -> Value {
        let after = self.changes.partition_point(|c| c.time <= t);
        after
            .checked_sub(1)
            .map_or(Value::X, |i| self.changes[i].value)
    }

    /// Contiguous slice of changes with `start <= time <= end`.
    ///
    /// Empty when `start > end`.
    #[must_use]
    pub fn changes_in_range(&self, start: Time, end: Time) -> &[Change] {
        if start > end {
            return &[];
        }
        let lo = self.changes.partition_point(|c| c.time < start);
        let hi = self.changes.partition_point(|c| c.time <= end);
        &self.changes[lo..hi]
    }

    /// Time of the last change, if any.
    #[must_use]
    pub fn last_time(&self) -> Option<Time> {
        self.changes.last().map(|c| c.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> Signal {
        let mut s = Signal::new("!", "clk", 1);
        for (t, v) in [(0, Value::Zero), (5, Value::One), (10, Value::Zero), (15, Value::One)] {
            assert!(s.push(t, v));
        }
        s
    }

    #[test]
    fn test_value_from_char() {
        assert_eq!(Value::from_char('0'), Some(Value::Zero));
        assert_eq!(Value::from_char('1'), Some(Value::One));
        assert_eq!(Value::from_char('x'), Some(Value::X));
        assert_eq!(Value::from_char('Z'), Some(Value::Z));
        assert_eq!(Value::from_char('b'), None);
        assert!(Value::Z.is_unknown());
        assert!(!Value::One.is_unknown());
        assert_eq!(Value::X.to_string(), "X");
    }

    #[test]
    fn test_value_at_before_first_change_is_x() {
        let mut s = Signal::new("!", "late", 1);
        s.push(10, Value::One);
        assert_eq!(s.value_at(0), Value::X);
        assert_eq!(s.value_at(9), Value::X);
        assert_eq!(s.value_at(10), Value::One);
    }

    #[test]
    fn test_value_at_between_changes() {
        let s = clock();
        assert_eq!(s.value_at(0), Value::Zero);
        assert_eq!(s.value_at(4), Value::Zero);
        assert_eq!(s.value_at(5), Value::One);
        assert_eq!(s.value_at(12), Value::Zero);
        assert_eq!(s.value_at(1_000), Value::One);
    }

    #[test]
    fn test_value_at_empty_signal() {
        assert_eq!(Signal::new("!", "idle", 1).value_at(42), Value::X);
    }

    #[test]
    fn test_duplicate_times_keep_arrival_order() {
        let mut s = Signal::new("!", "glitch", 1);
        s.push(3, Value::Zero);
        s.push(3, Value::One);
        s.push(3, Value::Z);
        assert_eq!(s.changes().len(), 3);
        assert_eq!(s.value_at(3), Value::Z);
        let range: Vec<Value> = s.changes_in_range(3, 3).iter().map(|c| c.value).collect();
        assert_eq!(range, vec![Value::Zero, Value::One, Value::Z]);
    }

    #[test]
    fn test_push_rejects_time_going_backwards() {
        let mut s = clock();
        assert!(!s.push(7, Value::X));
        assert_eq!(s.changes().len(), 4);
    }

    #[test]
    fn test_changes_in_range_bounds_inclusive() {
        let s = clock();
        let times: Vec<Time> = s.changes_in_range(5, 10).iter().map(|c| c.time).collect();
        assert_eq!(times, vec![5, 10]);

        let times: Vec<Time> = s.changes_in_range(6, 9).iter().map(|c| c.time).collect();
        assert!(times.is_empty());

        assert_eq!(s.changes_in_range(0, Time::MAX).len(), 4);
        assert!(s.changes_in_range(10, 5).is_empty());
    }

    #[test]
    fn test_bit_width_floor() {
        let s = Signal::new("#", "bus", 0);
        assert_eq!(s.bit_width(), 1);
        assert!(Signal::new("#", "bus", 8).bit_width() == 8);
        assert!(!Signal::new("#", "bus", 8).is_scalar());
    }
}
