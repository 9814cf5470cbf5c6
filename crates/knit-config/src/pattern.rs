//! Regular expressions used by module rules, cache groups and proxy rewrites.
//!
//! Configuration files cannot carry regex literals, so patterns are strings.
//! Both plain patterns (`"\\.tsx?$"`) and JavaScript-style literals
//! (`"/\\.css$/i"`) are accepted.

use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,

    #[error("unsupported regex flag '{0}'")]
    UnsupportedFlag(char),

    #[error("{0}")]
    Syntax(String),
}

/// A compiled pattern that remembers the text it was written as.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn parse(source: &str) -> Result<Self, PatternError> {
        if source.is_empty() {
            return Err(PatternError::Empty);
        }

        let (body, flags) = split_literal(source).unwrap_or((source, ""));
        if body.is_empty() {
            return Err(PatternError::Empty);
        }

        let mut builder = RegexBuilder::new(body);
        for flag in flags.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                // no meaning for a match-only pattern
                'g' | 'u' => &mut builder,
                other => return Err(PatternError::UnsupportedFlag(other)),
            };
        }

        let regex = builder
            .build()
            .map_err(|e| PatternError::Syntax(e.to_string()))?;

        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Splits `/body/flags` into its parts when `source` is written as a literal.
fn split_literal(source: &str) -> Option<(&str, &str)> {
    let rest = source.strip_prefix('/')?;
    let end = rest.rfind('/')?;
    let flags = &rest[end + 1..];
    flags
        .chars()
        .all(|c| c.is_ascii_alphabetic())
        .then(|| (&rest[..end], flags))
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl TryFrom<String> for Pattern {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Pattern> for String {
    fn from(value: Pattern) -> Self {
        value.source
    }
}
