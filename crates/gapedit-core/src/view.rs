//! Viewport — the bridge from buffer coordinates to screen rows.
//!
//! A `Viewport` holds only scroll state: the first visible line (the window
//! offset) and the number of visible rows. It does not own the buffer, index
//! or cursor; those are passed in. It hands the renderer plain data:
//!
//! - which lines are visible and on which screen row each one starts,
//! - the `(code point, cell width)` pairs of each visible line,
//! - where to put the hardware cursor.
//!
//! ```text
//!   buffer lines      viewport (top = 2, height = 3)
//!   0 ┆ fn main() {
//!   1 ┆     let a
//!   2 ┆     let b      row 0
//!   3 ┆     a + b      row 1   ← cursor line
//!   4 ┆ }              row 2
//!   5 ┆
//! ```

use std::ops::Range;

use crate::cursor::Cursor;
use crate::error::Result;
use crate::gap_buffer::GapBuffer;
use crate::line_index::LineIndex;
use crate::position::Position;

// ---------------------------------------------------------------------------
// RenderLine
// ---------------------------------------------------------------------------

/// One visible line, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderLine {
    /// Buffer line number.
    pub line: usize,
    /// Screen row the line is drawn on, relative to the viewport.
    pub row: usize,
    /// Code points left to right with their cell widths. Terminator excluded.
    pub cells: Vec<(char, usize)>,
}

impl RenderLine {
    /// Total cells the line occupies.
    #[must_use]
    pub fn width(&self) -> usize {
        self.cells.iter().map(|&(_, w)| w).sum()
    }
}

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// Vertical scroll state over a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// First visible buffer line (the window offset).
    top: usize,

    /// Number of visible rows (at least 1).
    height: usize,
}

impl Viewport {
    /// A viewport showing `height` rows from the top of the buffer.
    #[must_use]
    pub const fn new(height: usize) -> Self {
        Self {
            top: 0,
            height: if height == 0 { 1 } else { height },
        }
    }

    // -- Accessors ----------------------------------------------------------

    /// First visible buffer line.
    #[inline]
    #[must_use]
    pub const fn top(&self) -> usize {
        self.top
    }

    /// Number of visible rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Set the vertical scroll position directly.
    pub const fn set_top(&mut self, line: usize) {
        self.top = line;
    }

    /// Change the number of visible rows (minimum 1).
    pub fn set_height(&mut self, rows: usize) {
        self.height = rows.max(1);
    }

    // -- Scrolling ----------------------------------------------------------

    /// Adjust the window offset so that `line` is visible, scrolling as
    /// little as possible.
    pub const fn scroll_to(&mut self, line: usize) {
        if line < self.top {
            self.top = line;
        }
        if line >= self.bottom() {
            self.top = line - (self.height - 1);
        }
    }

    /// One past the last visible line. Saturates, so any `top` is safe.
    #[inline]
    const fn bottom(&self) -> usize {
        self.top.saturating_add(self.height)
    }

    /// Buffer lines currently on screen.
    #[must_use]
    pub fn visible_lines(&self, line_count: usize) -> Range<usize> {
        let start = self.top.min(line_count);
        let end = self.bottom().min(line_count);
        start..end
    }

    // -- Projection ---------------------------------------------------------

    /// Screen cell of the cursor: `(min(col, used cells), line - top)`, or
    /// `None` when the cursor line is scrolled out of view.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`](crate::Error::OutOfRange) when the cursor line
    /// does not exist in `index`.
    pub fn screen_position(&self, cursor: &Cursor, index: &LineIndex) -> Result<Option<Position>> {
        let used = index.used_cells(cursor.line())?;
        let line = cursor.line();
        if line < self.top || line >= self.bottom() {
            return Ok(None);
        }
        Ok(Some(Position::new(line - self.top, cursor.col().min(used))))
    }

    /// The visible lines with their cells, top to bottom.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`](crate::Error::OutOfRange) when `index` was not
    /// built from `buf`.
    pub fn render_lines(&self, buf: &GapBuffer, index: &LineIndex) -> Result<Vec<RenderLine>> {
        self.visible_lines(index.line_count())
            .map(|line| {
                Ok(RenderLine {
                    line,
                    row: line - self.top,
                    cells: index.cells(buf, line)?.collect(),
                })
            })
            .collect()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(crate::options::DEFAULT_VIEW_HEIGHT)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
