//! Line index — offsets to lines, lines to offsets, lines to cell widths.
//!
//! The index is derived data. It is rebuilt from scratch, in one O(n) pass,
//! after every buffer mutation. There is no incremental patching: for
//! interactive buffer sizes a full rescan is well below perceptible latency
//! and it can never drift out of sync with the content.
//!
//! # Coordinates
//!
//! A position `p` is a *line start* when `p == 0` or the code point before it
//! is `'\n'`. Line `y` spans `[start(y), start(y + 1))`, terminator included;
//! the last line runs to the buffer end. The *content range* drops the
//! terminator. Offset `len` (one past the last code point) belongs to the last
//! line, so every offset in `[0, len]` maps to exactly one line.
//!
//! ```text
//!   "ab\n\tc"     starts = [0, 3]
//!    0 1 2 3 4    used   = [2, 5]   (tab = 4 cells)
//! ```

use std::ops::Range;

use tracing::trace;
use unicode_width::UnicodeWidthChar;

use crate::error::{Error, Result};
use crate::gap_buffer::GapBuffer;

/// The only code point that ends a line.
pub const LINE_TERMINATOR: char = '\n';

/// Cells occupied by a tab unless configured otherwise.
pub const DEFAULT_TAB_WIDTH: usize = 4;

// ---------------------------------------------------------------------------
// Cell widths
// ---------------------------------------------------------------------------

/// Display width of a code point with the default tab width.
///
/// ```
/// use gapedit_core::line_index::cell_width;
///
/// assert_eq!(cell_width('a'), 1);
/// assert_eq!(cell_width('中'), 2);
/// assert_eq!(cell_width('\t'), 4);
/// assert_eq!(cell_width('\n'), 0);
/// ```
#[inline]
#[must_use]
pub fn cell_width(ch: char) -> usize {
    cell_width_with(ch, DEFAULT_TAB_WIDTH)
}

/// Display width of a code point: `tab_width` for a tab, 0 for the line
/// terminator and other controls, otherwise the East-Asian-aware width
/// (0 for combining marks, 2 for wide glyphs).
///
/// Tabs are [`DEFAULT_TAB_WIDTH`] (4) cells wide; any other `tab_width` is a
/// host override set through the `tabstop` option.
#[inline]
#[must_use]
pub fn cell_width_with(ch: char, tab_width: usize) -> usize {
    match ch {
        '\t' => tab_width,
        LINE_TERMINATOR => 0,
        _ => ch.width().unwrap_or(0),
    }
}

// ---------------------------------------------------------------------------
// LineIndex
// ---------------------------------------------------------------------------

/// Line starts and per-line used cells for one buffer snapshot.
///
/// `starts` is strictly increasing and `starts[0] == 0`. `used[y]` is the sum
/// of cell widths over line `y`'s content range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<usize>,
    used: Vec<usize>,
    len: usize,
    tab_width: usize,
}

impl LineIndex {
    /// Index of an empty buffer: one empty line.
    #[must_use]
    pub fn new(tab_width: usize) -> Self {
        Self {
            starts: vec![0],
            used: vec![0],
            len: 0,
            tab_width,
        }
    }

    /// Scan `buf` once and record every line start and line width.
    #[must_use]
    pub fn build(buf: &GapBuffer, tab_width: usize) -> Self {
        let mut starts = vec![0];
        let mut used = Vec::new();
        let mut cells = 0;

        for (offset, ch) in buf.chars().enumerate() {
            if ch == LINE_TERMINATOR {
                starts.push(offset + 1);
                used.push(cells);
                cells = 0;
            } else {
                cells += cell_width_with(ch, tab_width);
            }
        }
        used.push(cells);

        trace!(lines = starts.len(), len = buf.len(), "rebuilt line index");
        Self {
            starts,
            used,
            len: buf.len(),
            tab_width,
        }
    }

    // -- Accessors ----------------------------------------------------------

    /// Number of lines. Never zero; a trailing terminator opens an empty
    /// last line.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Buffer length the index was built from.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True when built from an empty buffer.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Tab width used for the width table.
    #[inline]
    #[must_use]
    pub const fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// All line starts, in order.
    #[inline]
    #[must_use]
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    /// Index of the last line.
    #[inline]
    #[must_use]
    pub fn last_line(&self) -> usize {
        self.starts.len() - 1
    }

    // -- Lookups ------------------------------------------------------------

    /// Width of a code point under this index's tab width.
    #[inline]
    #[must_use]
    pub fn cell_width(&self, ch: char) -> usize {
        cell_width_with(ch, self.tab_width)
    }

    /// Offset of the first code point of `line`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] for a line past the end.
    pub fn line_start(&self, line: usize) -> Result<usize> {
        self.starts
            .get(line)
            .copied()
            .ok_or_else(|| Error::out_of_range(line, self.line_count()))
    }

    /// The line containing `offset`: the greatest `y` with
    /// `start(y) <= offset`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] when `offset > len`.
    pub fn line_of(&self, offset: usize) -> Result<usize> {
        if offset > self.len {
            return Err(Error::out_of_range(offset, self.len + 1));
        }
        // starts[0] == 0, so at least one start is <= offset.
        Ok(self.starts.partition_point(|&start| start <= offset) - 1)
    }

    /// Extent of `line`, terminator included.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] for a line past the end.
    pub fn line_extent(&self, line: usize) -> Result<Range<usize>> {
        let start = self.line_start(line)?;
        let end = self.starts.get(line + 1).copied().unwrap_or(self.len);
        Ok(start..end)
    }

    /// Extent of `line` without its terminator.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] for a line past the end.
    pub fn content_range(&self, line: usize) -> Result<Range<usize>> {
        let extent = self.line_extent(line)?;
        if line < self.last_line() {
            Ok(extent.start..extent.end - 1)
        } else {
            Ok(extent)
        }
    }

    /// Cells used by the content of `line`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] for a line past the end.
    pub fn used_cells(&self, line: usize) -> Result<usize> {
        self.used
            .get(line)
            .copied()
            .ok_or_else(|| Error::out_of_range(line, self.line_count()))
    }

    /// Display column of `offset` within its line: the widths of every
    /// content code point of the line before it.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] when `offset > len`.
    pub fn column_of(&self, buf: &GapBuffer, offset: usize) -> Result<usize> {
        let line = self.line_of(offset)?;
        let content = self.content_range(line)?;
        let end = offset.min(content.end);
        Ok(buf
            .chars_in(content.start..end)?
            .map(|ch| self.cell_width(ch))
            .sum())
    }

    /// `(code point, cell width)` pairs of `line`, left to right, terminator
    /// excluded. This is what a renderer draws.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] for a line past the end, or when `buf` is not
    /// the buffer this index was built from.
    pub fn cells<'a>(
        &self,
        buf: &'a GapBuffer,
        line: usize,
    ) -> Result<impl Iterator<Item = (char, usize)> + use<'a>> {
        let tab_width = self.tab_width;
        let chars = buf.chars_in(self.content_range(line)?)?;
        Ok(chars.map(move |ch| (ch, cell_width_with(ch, tab_width))))
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_WIDTH)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
