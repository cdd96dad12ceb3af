//! # Range Geometry
//!
//! Line/column positions and ranges as the code editor reports them, plus the
//! pure comparisons the sync listeners need.
//!
//! Positions are 1-based. A range's end column is exclusive on the column
//! axis (editor convention), but overlap is decided with inclusive
//! comparisons so that a caret sitting exactly on an element boundary still
//! resolves to that element.

use crate::error::CommonError;
use crate::result::CommonResult;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A single line/column position (both 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_position(*self, *other)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.line, self.column)
    }
}

/// A span of source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRange {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl SourceRange {
    /// Build a range without validation.
    pub const fn new(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// Build a range, rejecting 0-based coordinates and reversed ends.
    pub fn try_new(
        start_line: u32,
        start_column: u32,
        end_line: u32,
        end_column: u32,
    ) -> CommonResult<Self> {
        let range = Self::new(start_line, start_column, end_line, end_column);

        for position in [range.start(), range.end()] {
            if position.line == 0 || position.column == 0 {
                return Err(CommonError::InvalidPosition {
                    line: position.line,
                    column: position.column,
                });
            }
        }

        if range.start() > range.end() {
            return Err(CommonError::InvalidRange(range.to_string()));
        }

        Ok(range)
    }

    pub fn from_positions(start: Position, end: Position) -> Self {
        Self::new(start.line, start.column, end.line, end.column)
    }

    /// Zero-width range at a caret position
    pub fn caret(position: Position) -> Self {
        Self::from_positions(position, position)
    }

    pub fn start(&self) -> Position {
        Position::new(self.start_line, self.start_column)
    }

    pub fn end(&self) -> Position {
        Position::new(self.end_line, self.end_column)
    }

    pub fn is_empty(&self) -> bool {
        self.start() == self.end()
    }

    /// Swap the ends of a backwards selection (anchor after active end).
    pub fn normalized(self) -> Self {
        if self.start() > self.end() {
            Self::from_positions(self.end(), self.start())
        } else {
            self
        }
    }

    pub fn overlaps(&self, other: &SourceRange) -> bool {
        overlaps(self, other)
    }

    pub fn contains(&self, inner: &SourceRange) -> bool {
        contains(self, inner)
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start(), self.end())
    }
}

/// Lexicographic `(line, column)` order.
pub fn compare_position(a: Position, b: Position) -> Ordering {
    a.line.cmp(&b.line).then(a.column.cmp(&b.column))
}

/// True iff the ranges share at least one position: `a` does not end
/// strictly before `b` starts and does not start strictly after `b` ends.
pub fn overlaps(a: &SourceRange, b: &SourceRange) -> bool {
    let ends_before = compare_position(a.end(), b.start()) == Ordering::Less;
    let starts_after = compare_position(a.start(), b.end()) == Ordering::Greater;
    !ends_before && !starts_after
}

/// True iff `inner` lies entirely within `outer` (boundaries inclusive).
pub fn contains(outer: &SourceRange, inner: &SourceRange) -> bool {
    compare_position(outer.start(), inner.start()) != Ordering::Greater
        && compare_position(inner.end(), outer.end()) != Ordering::Greater
}
