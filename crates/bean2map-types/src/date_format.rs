//! Date format markers
//!
//! Patterns use the `SimpleDateFormat` letter vocabulary (`yyyy-MM-dd HH:mm:ss`)
//! and are compiled once into a chrono format string. All formatting happens in UTC.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Date pattern errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("empty date pattern")]
    Empty,

    #[error("unsupported pattern letter run '{run}' in date pattern '{pattern}'")]
    UnsupportedLetter { pattern: String, run: String },

    #[error("unterminated quote in date pattern '{pattern}'")]
    UnterminatedQuote { pattern: String },
}

/// A compiled date pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DatePattern {
    source: String,
    strftime: String,
}

impl DatePattern {
    /// Compile a pattern
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }

        let mut out = String::new();
        let chars: Vec<char> = pattern.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            if c == '\'' {
                // '' is a literal quote, otherwise quoted text runs to the next quote
                if chars.get(i + 1) == Some(&'\'') {
                    out.push('\'');
                    i += 2;
                    continue;
                }
                i += 1;
                loop {
                    match (chars.get(i), chars.get(i + 1)) {
                        (Some('\''), Some('\'')) => {
                            out.push('\'');
                            i += 2;
                        }
                        (Some('\''), _) => {
                            i += 1;
                            break;
                        }
                        (Some(&ch), _) => {
                            push_literal(&mut out, ch);
                            i += 1;
                        }
                        (None, _) => {
                            return Err(PatternError::UnterminatedQuote {
                                pattern: pattern.to_string(),
                            });
                        }
                    }
                }
            } else if c.is_ascii_alphabetic() {
                let run = chars[i..].iter().take_while(|&&ch| ch == c).count();
                let spec = letter_spec(c, run).ok_or_else(|| PatternError::UnsupportedLetter {
                    pattern: pattern.to_string(),
                    run: std::iter::repeat_n(c, run).collect(),
                })?;
                out.push_str(spec);
                i += run;
            } else {
                push_literal(&mut out, c);
                i += 1;
            }
        }

        if StrftimeItems::new(&out).any(|item| matches!(item, Item::Error)) {
            return Err(PatternError::UnsupportedLetter {
                pattern: pattern.to_string(),
                run: pattern.to_string(),
            });
        }

        Ok(Self {
            source: pattern.to_string(),
            strftime: out,
        })
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The equivalent chrono format string
    pub fn strftime(&self) -> &str {
        &self.strftime
    }

    /// Format an instant in UTC
    pub fn format(&self, instant: &DateTime<Utc>) -> String {
        instant.format(&self.strftime).to_string()
    }
}

fn push_literal(out: &mut String, ch: char) {
    if ch == '%' {
        out.push_str("%%");
    } else {
        out.push(ch);
    }
}

fn letter_spec(letter: char, run: usize) -> Option<&'static str> {
    Some(match (letter, run) {
        ('y', 2) => "%y",
        ('y', _) => "%Y",
        ('M', 1) => "%-m",
        ('M', 2) => "%m",
        ('M', 3) => "%b",
        ('M', _) => "%B",
        ('d', 1) => "%-d",
        ('d', 2) => "%d",
        ('H', 1) => "%-H",
        ('H', 2) => "%H",
        ('h', 1) => "%-I",
        ('h', 2) => "%I",
        ('m', 1) => "%-M",
        ('m', 2) => "%M",
        ('s', 1) => "%-S",
        ('s', 2) => "%S",
        ('S', 3) => "%3f",
        ('a', 1) => "%p",
        ('E', 1..=3) => "%a",
        ('E', _) => "%A",
        ('Z', 1) => "%z",
        ('X', 3) => "%:z",
        _ => return None,
    })
}

impl TryFrom<String> for DatePattern {
    type Error = PatternError;

    fn try_from(pattern: String) -> Result<Self, Self::Error> {
        Self::compile(&pattern)
    }
}

impl From<DatePattern> for String {
    fn from(pattern: DatePattern) -> Self {
        pattern.source
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Per-property date format marker
///
/// Absence of the marker means [`DateFormat::DATETIME`] and `as_epoch_millis = false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateFormat {
    #[serde(default = "default_pattern")]
    pub pattern: DatePattern,
    /// Write the instant as epoch milliseconds instead of formatting it
    #[serde(default, alias = "timestamp")]
    pub as_epoch_millis: bool,
}

fn default_pattern() -> DatePattern {
    DateFormat::default().pattern
}

impl DateFormat {
    pub const DATE: &'static str = "yyyy-MM-dd";
    pub const DATETIME: &'static str = "yyyy-MM-dd HH:mm:ss";

    /// A formatting marker with the given pattern
    pub fn pattern(pattern: &str) -> Result<Self, PatternError> {
        Ok(Self {
            pattern: DatePattern::compile(pattern)?,
            as_epoch_millis: false,
        })
    }

    /// A marker writing epoch milliseconds
    pub fn epoch_millis() -> Self {
        Self {
            as_epoch_millis: true,
            ..Self::default()
        }
    }

    /// Render an instant per this marker: epoch millis or formatted text
    pub fn render(&self, instant: &DateTime<Utc>) -> crate::Value {
        if self.as_epoch_millis {
            crate::Value::Long(instant.timestamp_millis())
        } else {
            crate::Value::String(self.pattern.format(instant))
        }
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        // The strftime translation of DATETIME is fixed.
        Self {
            pattern: DatePattern {
                source: Self::DATETIME.to_string(),
                strftime: "%Y-%m-%d %H:%M:%S".to_string(),
            },
            as_epoch_millis: false,
        }
    }
}
