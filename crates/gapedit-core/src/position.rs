//! Screen-space positions and the caret type.
//!
//! Two coordinate systems meet here:
//!
//! - **Offsets** index the logical content of the gap buffer, one per code
//!   point.
//! - **Positions** are `(line, col)` pairs where `col` counts display cells,
//!   not code points. A tab occupies several cells and a wide glyph two, so
//!   the two systems only agree on plain ASCII.
//!
//! All coordinates are 0-indexed. Converting to 1-indexed numbers for people
//! happens in [`Display`](fmt::Display) and nowhere else.

use std::fmt;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A display position: line number and cell column, both 0-indexed.
/// Ordered line first, then column.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    #[inline]
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.line, self.col)
    }
}

/// `line:col`, 1-indexed, the way a status line shows it.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

// ---------------------------------------------------------------------------
// Caret
// ---------------------------------------------------------------------------

/// Where the caret sits relative to the content of its line.
///
/// A caret is either on a real code point, or just past the last code point
/// of the line with nothing to its right. Both carry the buffer offset an
/// insertion would use.
///
/// ```text
///   line:  a b c ⏎
///          ^       On(0)
///                ^ EndOfLine(3)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Caret {
    /// On the code point at this offset, which lies in the line's content.
    On(usize),
    /// One past the line's last content code point: the offset of its
    /// terminator, or the buffer length on the last line.
    EndOfLine(usize),
}

impl Caret {
    /// Buffer offset of the caret.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> usize {
        match self {
            Self::On(offset) | Self::EndOfLine(offset) => offset,
        }
    }

    /// True when the caret sits on a code point.
    #[inline]
    #[must_use]
    pub const fn is_on_char(self) -> bool {
        matches!(self, Self::On(_))
    }

    /// True when the caret sits past the end of its line.
    #[inline]
    #[must_use]
    pub const fn is_end_of_line(self) -> bool {
        matches!(self, Self::EndOfLine(_))
    }
}

impl Default for Caret {
    fn default() -> Self {
        Self::EndOfLine(0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
