//! Line-oriented value-change dump scanner.
//!
//! The scanner is best-effort: every malformed line becomes a
//! [`ParseWarning`] and scanning continues. Only input with no declaration
//! and no time marker at all is rejected with a [`ParseError`].

use std::collections::HashMap;
use std::io::BufRead;

use super::diagnostics::{ParseWarning, WarningKind};
use super::timescale::Timescale;
use crate::document::Document;
use crate::error::{ParseError, Result};
use crate::timeline::{Signal, Time, Value};

/// A parsed document and every warning raised while building it.
pub type ParseOutput = (Document, Vec<ParseWarning>);

/// `$keyword` sections whose body may continue on following lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Timescale,
    Date,
    Version,
    Var,
    /// Body carries no data (`$comment`, `$scope`, unknown keywords, ...).
    Skip,
}

#[derive(Debug)]
struct OpenSection {
    kind: SectionKind,
    keyword: String,
    body: String,
    line: usize,
}

/// Incremental dump parser.
///
/// Feed lines in order with [`DumpParser::feed_line`], then call
/// [`DumpParser::finish`]. Memory held is the document being built plus at
/// most one open header section, so arbitrarily large dumps can be streamed.
///
/// ```
/// use trueno_wave::dump::DumpParser;
///
/// let mut parser = DumpParser::new();
/// for line in ["$var wire 1 ! clk $end", "#3", "1!"] {
///     parser.feed_line(line);
/// }
/// let (doc, warnings) = parser.finish().unwrap();
/// assert_eq!(doc.duration(), 3);
/// assert_eq!(warnings.len(), 1); // no $timescale
/// ```
#[derive(Debug, Default)]
pub struct DumpParser {
    line_no: usize,
    non_blank: usize,
    structural: bool,
    timescale: Option<Timescale>,
    timescale_seen: bool,
    date: Option<String>,
    version: Option<String>,
    signals: Vec<Signal>,
    by_identifier: HashMap<String, usize>,
    current_time: Time,
    duration: Time,
    section: Option<OpenSection>,
    warnings: Vec<ParseWarning>,
}

impl DumpParser {
    /// Create a parser with no input consumed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines consumed so far.
    #[must_use]
    pub const fn lines_read(&self) -> usize {
        self.line_no
    }

    /// Consume one line of dump text (without its terminator).
    pub fn feed_line(&mut self, line: &str) {
        self.line_no += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }
        self.non_blank += 1;

        if let Some(mut section) = self.section.take() {
            let (body, closed) = split_at_end(trimmed);
            if !body.is_empty() {
                if !section.body.is_empty() {
                    section.body.push(' ');
                }
                section.body.push_str(&body);
            }
            if closed {
                self.close_section(section);
            } else {
                self.section = Some(section);
            }
            return;
        }

        if trimmed.starts_with('$') {
            self.keyword_line(trimmed);
        } else if let Some(time) = trimmed.strip_prefix('#') {
            self.time_marker(trimmed, time);
        } else {
            self.value_change(trimmed);
        }
    }

    /// Finish parsing and produce the document.
    ///
    /// # Errors
    ///
    /// [`ParseError::Empty`] for blank input, [`ParseError::Unrecognized`]
    /// when no declaration or time marker was found.
    pub fn finish(mut self) -> std::result::Result<ParseOutput, ParseError> {
        if self.non_blank == 0 {
            return Err(ParseError::Empty);
        }
        if !self.structural {
            return Err(ParseError::Unrecognized {
                lines: self.non_blank,
            });
        }

        if let Some(section) = self.section.take() {
            self.warn_at(
                section.line,
                WarningKind::UnterminatedSection(section.keyword.clone()),
            );
            self.close_section(section);
        }

        if !self.timescale_seen {
            self.warn_at(0, WarningKind::MissingTimescale);
        }

        let document = Document::new(
            self.timescale.unwrap_or_default(),
            self.signals,
            self.duration,
            self.date,
            self.version,
        );
        Ok((document, self.warnings))
    }

    fn warn(&mut self, kind: WarningKind) {
        self.warn_at(self.line_no, kind);
    }

    fn warn_at(&mut self, line: usize, kind: WarningKind) {
        self.warnings.push(ParseWarning::new(line, kind));
    }

    fn keyword_line(&mut self, line: &str) {
        let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let keyword = keyword.to_ascii_lowercase();
        let (body, closed) = split_at_end(rest);

        let kind = match keyword.as_str() {
            "$timescale" => SectionKind::Timescale,
            "$date" => SectionKind::Date,
            "$version" => SectionKind::Version,
            "$var" => SectionKind::Var,
            "$comment" | "$scope" | "$upscope" | "$enddefinitions" => SectionKind::Skip,
            "$dumpvars" | "$dumpall" | "$dumpon" | "$dumpoff" => {
                self.structural = true;
                let mut tokens = body.split_whitespace();
                while let Some(token) = tokens.next() {
                    if is_vector_change(token) {
                        // `b1010 #`: the identifier is the next token.
                        let change = tokens
                            .next()
                            .map_or_else(|| token.to_string(), |id| format!("{token} {id}"));
                        self.warn(WarningKind::UnsupportedVectorChange(change));
                    } else {
                        self.value_change(token);
                    }
                }
                return;
            }
            "$end" => {
                self.structural = true;
                return;
            }
            _ => {
                self.warn(WarningKind::UnrecognizedLine(line.to_string()));
                if !closed {
                    self.section = Some(OpenSection {
                        kind: SectionKind::Skip,
                        keyword,
                        body,
                        line: self.line_no,
                    });
                }
                return;
            }
        };

        self.structural = true;
        let section = OpenSection {
            kind,
            keyword,
            body,
            line: self.line_no,
        };
        if closed {
            self.close_section(section);
        } else {
            self.section = Some(section);
        }
    }

    fn close_section(&mut self, section: OpenSection) {
        let body = section.body.trim();
        match section.kind {
            SectionKind::Timescale => {
                self.timescale_seen = true;
                match Timescale::parse(body) {
                    Some(ts) => self.timescale = Some(ts),
                    None => self.warn_at(
                        section.line,
                        WarningKind::MalformedTimescale(body.to_string()),
                    ),
                }
            }
            SectionKind::Date => self.date = non_empty(body),
            SectionKind::Version => self.version = non_empty(body),
            SectionKind::Var => self.declare(body, section.line),
            SectionKind::Skip => {}
        }
    }

    /// `<kind> <width> <identifier> <name> [bit-select...]`
    fn declare(&mut self, body: &str, line: usize) {
        let fields: Vec<&str> = body.split_whitespace().collect();
        let width = fields.get(1).and_then(|w| w.parse::<u32>().ok()).filter(|w| *w > 0);

        let (Some(width), Some(identifier), Some(name)) = (width, fields.get(2), fields.get(3))
        else {
            self.warn_at(line, WarningKind::MalformedVar(body.to_string()));
            return;
        };

        if let Some(&existing) = self.by_identifier.get(*identifier) {
            let existing = self.signals[existing].name().to_string();
            self.warn_at(
                line,
                WarningKind::DuplicateIdentifier {
                    identifier: (*identifier).to_string(),
                    existing,
                    name: (*name).to_string(),
                },
            );
            return;
        }

        self.by_identifier.insert((*identifier).to_string(), self.signals.len());
        self.signals.push(Signal::new(*identifier, *name, width));
    }

    fn time_marker(&mut self, line: &str, digits: &str) {
        let parsed = (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .then(|| digits.parse::<Time>().ok())
            .flatten();
        let Some(time) = parsed else {
            self.warn(WarningKind::MalformedTime(line.to_string()));
            return;
        };
        self.structural = true;

        if time < self.current_time {
            self.warn(WarningKind::TimeWentBackwards {
                time,
                current: self.current_time,
            });
            return;
        }
        self.current_time = time;
        self.duration = self.duration.max(time);
    }

    fn value_change(&mut self, token: &str) {
        let mut chars = token.chars();
        let Some(first) = chars.next() else {
            return;
        };
        let identifier = chars.as_str();

        if is_vector_change(token) {
            self.warn(WarningKind::UnsupportedVectorChange(token.to_string()));
            return;
        }

        let value = match Value::from_char(first) {
            Some(value) if !identifier.is_empty() && !identifier.contains(char::is_whitespace) => {
                value
            }
            _ => {
                self.warn(WarningKind::UnrecognizedLine(token.to_string()));
                return;
            }
        };

        let Some(&index) = self.by_identifier.get(identifier) else {
            self.warn(WarningKind::UnknownIdentifier(identifier.to_string()));
            return;
        };

        let time = self.current_time;
        let signal = &mut self.signals[index];
        if !signal.is_scalar() {
            let kind = WarningKind::ScalarChangeOnVector {
                name: signal.name().to_string(),
                width: signal.bit_width(),
            };
            self.warn(kind);
            return;
        }
        // The time cursor never moves backwards, so appends stay ordered.
        signal.push(time, value);
    }
}

/// Vector (`b`) and real (`r`) changes, which carry a separate identifier.
fn is_vector_change(token: &str) -> bool {
    token.starts_with(['b', 'B', 'r', 'R'])
}

/// Split a section body at its `$end` token.
///
/// Returns the text before `$end` (whitespace-normalized) and whether the
/// terminator was present.
fn split_at_end(text: &str) -> (String, bool) {
    let mut body = Vec::new();
    for token in text.split_whitespace() {
        if token.eq_ignore_ascii_case("$end") {
            return (body.join(" "), true);
        }
        body.push(token);
    }
    (body.join(" "), false)
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

/// Parse a complete dump held in memory.
///
/// # Errors
///
/// Returns a [`ParseError`] only when the text is not a dump at all.
///
/// # Example
///
/// ```
/// use trueno_wave::dump::parse;
///
/// let text = "$timescale 1ns $end\n$var wire 1 ! clk $end\n$enddefinitions $end\n#0\n0!\n#5\n1!\n";
/// let (doc, warnings) = parse(text).unwrap();
/// assert!(warnings.is_empty());
/// assert_eq!(doc.signals()[0].name(), "clk");
/// assert_eq!(doc.duration(), 5);
/// ```
pub fn parse(text: &str) -> std::result::Result<ParseOutput, ParseError> {
    let mut parser = DumpParser::new();
    for line in text.lines() {
        parser.feed_line(line);
    }
    parser.finish()
}

/// Parse a dump from any buffered reader, one line at a time.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] on read failure (including invalid UTF-8) and
/// [`crate::Error::Parse`] when the input is not a dump.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<ParseOutput> {
    let mut parser = DumpParser::new();
    for line in reader.lines() {
        parser.feed_line(&line?);
    }
    Ok(parser.finish()?)
}
