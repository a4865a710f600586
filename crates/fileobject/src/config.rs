//! Rotation config parsing
//!
//! One directive per line:
//!
//! ```text
//! # keyword<sep>value[<sep>value]
//! path:/var/backups/*.tar.gz
//! range:6h:0
//! range:3days:4h
//! ```
//!
//! `#` starts a comment. Keywords are case-insensitive. Durations are bare
//! integers (seconds) or humantime strings such as `72h` or `1h 30m`.

use crate::file::Files;
use rotate_core::Range;
use std::fmt;
use std::fs;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const COMMENT_CHAR: char = '#';
pub const PATH_DIRECTIVE: &str = "path";
pub const PATH_DIRECTIVE_ALIAS: &str = "pathglob";
pub const RANGE_DIRECTIVE: &str = "range";
pub const DEFAULT_FIELD_SEP: &str = ":";

/// A parsed rotation config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path pattern selecting the files to rotate
    pub pattern: String,
    /// Ranges, strictly ascending by age
    pub ranges: Vec<Range>,
}

impl Config {
    /// Object source for the configured pattern
    pub fn files(&self) -> Files {
        Files::new(self.pattern.clone())
    }
}

/// Which value of a range line was at fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Age,
    Interval,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Age => f.write_str("age"),
            Field::Interval => f.write_str("interval"),
        }
    }
}

/// Config errors; line numbers are 1-based
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("line {line}: missing values in {text:?}")]
    MissingValues { line: usize, text: String },

    #[error("line {line}: unknown directive {directive:?}")]
    UnknownDirective { line: usize, directive: String },

    #[error("line {line}: duplicate path directive")]
    DuplicatePath { line: usize },

    #[error("line {line}: path takes exactly one value, got {count}")]
    MultiplePaths { line: usize, count: usize },

    #[error("line {line}: path must not be empty")]
    EmptyPath { line: usize },

    #[error("line {line}: range takes exactly two values (age and interval), got {count}")]
    RangeArity { line: usize, count: usize },

    #[error("line {line}: invalid {field} {value:?}: {reason}")]
    InvalidDuration {
        line: usize,
        field: Field,
        value: String,
        reason: String,
    },

    #[error("line {line}: {field} must not be negative, got {value:?}")]
    Negative {
        line: usize,
        field: Field,
        value: String,
    },

    #[error("line {line}: age {age} must be larger than previous age {previous}")]
    NotAscending {
        line: usize,
        age: String,
        previous: String,
    },

    #[error("no path directive found")]
    NoPath,

    #[error("no range directives found")]
    NoRanges,

    #[error("field separator must not be empty")]
    EmptySeparator,

    #[error("failed to read config")]
    Io(#[from] io::Error),
}

/// Parse a config from a reader
pub fn parse<R: Read>(input: R, field_sep: &str) -> Result<Config, ConfigError> {
    let mut parser = Parser::new(field_sep)?;
    for line in BufReader::new(input).lines() {
        parser.parse_line(&line?)?;
    }
    parser.finish()
}

/// Read and parse a config file
pub fn load(path: &Path, field_sep: &str) -> Result<Config, ConfigError> {
    parse(fs::File::open(path)?, field_sep)
}

/// Incremental, line-at-a-time parser
struct Parser<'a> {
    field_sep: &'a str,
    line_no: usize,
    pattern: Option<String>,
    ranges: Vec<Range>,
}

impl<'a> Parser<'a> {
    fn new(field_sep: &'a str) -> Result<Self, ConfigError> {
        if field_sep.is_empty() {
            return Err(ConfigError::EmptySeparator);
        }
        Ok(Self {
            field_sep,
            line_no: 0,
            pattern: None,
            ranges: Vec::new(),
        })
    }

    fn parse_line(&mut self, raw: &str) -> Result<(), ConfigError> {
        self.line_no += 1;
        let line = clean(raw);
        if line.is_empty() {
            return Ok(());
        }

        let fields: Vec<&str> = line.split(self.field_sep).map(str::trim).collect();
        if fields.len() < 2 {
            return Err(ConfigError::MissingValues {
                line: self.line_no,
                text: line.to_string(),
            });
        }

        let directive = fields[0].to_lowercase();
        match directive.as_str() {
            PATH_DIRECTIVE | PATH_DIRECTIVE_ALIAS => self.set_path(&fields[1..]),
            RANGE_DIRECTIVE => self.add_range(&fields[1..]),
            _ => Err(ConfigError::UnknownDirective {
                line: self.line_no,
                directive,
            }),
        }
    }

    fn set_path(&mut self, values: &[&str]) -> Result<(), ConfigError> {
        let line = self.line_no;
        if self.pattern.is_some() {
            return Err(ConfigError::DuplicatePath { line });
        }
        if values.len() != 1 {
            return Err(ConfigError::MultiplePaths {
                line,
                count: values.len(),
            });
        }
        if values[0].is_empty() {
            return Err(ConfigError::EmptyPath { line });
        }

        self.pattern = Some(values[0].to_string());
        Ok(())
    }

    fn add_range(&mut self, values: &[&str]) -> Result<(), ConfigError> {
        let line = self.line_no;
        let [age, interval] = values else {
            return Err(ConfigError::RangeArity {
                line,
                count: values.len(),
            });
        };

        let age = parse_duration(line, Field::Age, age)?;
        let interval = parse_duration(line, Field::Interval, interval)?;

        if let Some(previous) = self.ranges.last() {
            if previous.age >= age {
                return Err(ConfigError::NotAscending {
                    line,
                    age: humantime::format_duration(age).to_string(),
                    previous: humantime::format_duration(previous.age).to_string(),
                });
            }
        }

        self.ranges.push(Range::new(age, interval));
        Ok(())
    }

    fn finish(self) -> Result<Config, ConfigError> {
        let pattern = self.pattern.ok_or(ConfigError::NoPath)?;
        if self.ranges.is_empty() {
            return Err(ConfigError::NoRanges);
        }
        Ok(Config {
            pattern,
            ranges: self.ranges,
        })
    }
}

/// Drop any comment and surrounding whitespace
fn clean(line: &str) -> &str {
    let line = match line.find(COMMENT_CHAR) {
        Some(idx) => &line[..idx],
        None => line,
    };
    line.trim()
}

/// Parse a duration value
///
/// A bare integer is a number of seconds; anything else goes through
/// humantime.
fn parse_duration(line: usize, field: Field, value: &str) -> Result<Duration, ConfigError> {
    if value.starts_with('-') {
        return Err(ConfigError::Negative {
            line,
            field,
            value: value.to_string(),
        });
    }
    if let Ok(secs) = value.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }
    humantime::parse_duration(value).map_err(|e| ConfigError::InvalidDuration {
        line,
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Human-readable description of the config format
pub fn format_help(field_sep: &str) -> String {
    format!(
        "\
A rotation config holds one directive per line. Text after {comment} is
ignored, as is leading and trailing whitespace. Blank lines are skipped.

Each directive is a keyword followed by its values, separated by \"{sep}\".
Keywords are case-insensitive.

  path{sep}<pattern>
      Files to rotate. Required, exactly once, anywhere in the file.
      * and ? match within one directory, ** matches across directories.

  range{sep}<age>{sep}<interval>
      Files younger than <age>, and at least as old as the previous range's
      age, belong to this range. Within it, a file is kept only if it is at
      least <interval> older than the last file kept; the youngest file in
      a range is always kept. An interval of 0 keeps every file.
      Ages must increase from one range line to the next.

Files older than the last range are deleted. Only regular files are
rotated: symbolic links and directories matching the pattern are left alone.

Durations are whole seconds (\"3600\") or unit strings (\"6h\", \"3days\",
\"1h 30m\").

Example:
  path{sep}/var/backups/*.tar.gz
  range{sep}6h{sep}0          # keep everything from the last six hours
  range{sep}72h{sep}4h        # then one every four hours up to three days
  range{sep}30days{sep}1day   # then one a day up to a month
  range{sep}180days{sep}3days # then one every three days up to six months
",
        comment = COMMENT_CHAR,
        sep = field_sep,
    )
}
