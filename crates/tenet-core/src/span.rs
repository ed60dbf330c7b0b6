//! Source positions

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 1-based line/column position in a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Start of file
    pub const fn start() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Start and end position of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

impl Span {
    pub const fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// Zero-width span at a single position
    pub const fn at(line: u32, column: u32) -> Self {
        let loc = Location::new(line, column);
        Self { start: loc, end: loc }
    }

    /// Whether `other` lies entirely inside this span
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}
