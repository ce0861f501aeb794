//! Value-change dump parsing.
//!
//! Turns the textual dump written by a hardware simulator into a
//! [`Document`](crate::document::Document) plus a list of non-fatal
//! [`ParseWarning`]s.
//!
//! # Grammar
//!
//! - `$timescale <int><unit> $end` sets the tick unit (default `1ns`)
//! - `$var <kind> <width> <identifier> <name> [...] $end` declares a signal
//! - `$scope`, `$upscope`, `$enddefinitions`, `$comment`, `$date`,
//!   `$version` and the `$dump*` markers carry no signal data
//! - `#<time>` moves the time cursor
//! - `<value><identifier>` records a scalar change (`0`, `1`, `x`, `z`)
//!
//! Structural keywords are case-insensitive. Scopes are flattened: names are
//! kept exactly as declared.

mod diagnostics;
mod parser;
mod timescale;

pub use diagnostics::{ParseWarning, WarningKind};
pub use parser::{parse, parse_reader, DumpParser, ParseOutput};
pub use timescale::{TimeUnit, Timescale};
