//! Cursor — directional navigation with a sticky target column.
//!
//! The cursor is a small value type: a line number, a [`Caret`] (on a code
//! point or at end of line), the caret's display column, and the *target
//! column* that vertical movement tries to hold. It owns neither the buffer
//! nor the line index; both are passed to every movement method.
//!
//! # Horizontal movement
//!
//! Left and right step one code point and never leave the current line.
//! Right stops on the end-of-line position; left stops at the line start.
//! Both set the target column to the new actual column.
//!
//! # Vertical movement
//!
//! Up and down keep the target column untouched and land on the code point
//! that covers it on the destination line, or at end of line when the line
//! is too short:
//!
//! ```text
//!   hello      target 4 ─┐
//!   hi⏎                  ├─ lands at end of "hi" (col 2)
//!   world                └─ back on 'o' of "world" (col 4)
//! ```
//!
//! Moves against a boundary (left at line start, right at end of line, up on
//! the first line, down on the last) are no-ops and report `false`.

use crate::error::Result;
use crate::gap_buffer::GapBuffer;
use crate::line_index::LineIndex;
use crate::position::{Caret, Position};

/// A caret in a buffer plus its navigation memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Line the caret is on.
    line: usize,

    /// Offset and kind of the caret.
    caret: Caret,

    /// Display column of the caret: widths of the line's code points before
    /// it. At end of line this equals the line's used cells.
    col: usize,

    /// Column vertical movement aims for. Horizontal movement resets it to
    /// `col`; vertical movement never changes it.
    target_col: usize,
}

impl Cursor {
    /// Cursor at offset 0: on the first code point if line 0 has content,
    /// otherwise at its end.
    #[must_use]
    pub fn new(index: &LineIndex) -> Self {
        let has_content = index.content_range(0).is_ok_and(|range| !range.is_empty());
        let caret = if has_content {
            Caret::On(0)
        } else {
            Caret::EndOfLine(0)
        };
        Self {
            line: 0,
            caret,
            col: 0,
            target_col: 0,
        }
    }

    /// Derive the cursor for an arbitrary offset in `[0, len]`.
    ///
    /// The target column starts out equal to the actual column.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`](crate::Error::OutOfRange) when `offset > len`.
    pub fn at_offset(offset: usize, buf: &GapBuffer, index: &LineIndex) -> Result<Self> {
        let line = index.line_of(offset)?;
        let content = index.content_range(line)?;
        let col = index.column_of(buf, offset)?;
        let caret = if offset < content.end {
            Caret::On(offset)
        } else {
            Caret::EndOfLine(content.end)
        };
        Ok(Self {
            line,
            caret,
            col,
            target_col: col,
        })
    }

    // -- Accessors ----------------------------------------------------------

    /// Current line (0-indexed).
    #[inline]
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Actual display column of the caret.
    #[inline]
    #[must_use]
    pub const fn col(&self) -> usize {
        self.col
    }

    /// Remembered column for vertical movement.
    #[inline]
    #[must_use]
    pub const fn target_col(&self) -> usize {
        self.target_col
    }

    /// The caret.
    #[inline]
    #[must_use]
    pub const fn caret(&self) -> Caret {
        self.caret
    }

    /// Buffer offset of the caret; where an insertion goes.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.caret.offset()
    }

    /// Line and actual column.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.line, self.col)
    }

    // -- Horizontal movement ------------------------------------------------

    /// Step onto the next code point, or onto the end-of-line position after
    /// the last one. No-op at end of line.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`](crate::Error::OutOfRange) when the cursor does
    /// not belong to `buf`/`index`.
    pub fn move_right(&mut self, buf: &GapBuffer, index: &LineIndex) -> Result<bool> {
        let Caret::On(offset) = self.caret else {
            return Ok(false);
        };
        let width = index.cell_width(buf.get(offset)?);
        let content_end = index.content_range(self.line)?.end;
        let next = offset + 1;
        self.caret = if next >= content_end {
            Caret::EndOfLine(content_end)
        } else {
            Caret::On(next)
        };
        self.col += width;
        self.target_col = self.col;
        Ok(true)
    }

    /// Step back onto the previous code point of the line. From end of line
    /// that is the line's last code point. No-op at the line start.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`](crate::Error::OutOfRange) when the cursor does
    /// not belong to `buf`/`index`.
    pub fn move_left(&mut self, buf: &GapBuffer, index: &LineIndex) -> Result<bool> {
        let offset = self.caret.offset();
        if offset <= index.line_start(self.line)? {
            return Ok(false);
        }
        let prev = offset - 1;
        let width = index.cell_width(buf.get(prev)?);
        self.caret = Caret::On(prev);
        self.col = self.col.saturating_sub(width);
        self.target_col = self.col;
        Ok(true)
    }

    // -- Vertical movement --------------------------------------------------

    /// Move to the previous line, aiming for the target column.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`](crate::Error::OutOfRange) when the cursor does
    /// not belong to `buf`/`index`.
    pub fn move_up(&mut self, buf: &GapBuffer, index: &LineIndex) -> Result<bool> {
        if self.line == 0 {
            return Ok(false);
        }
        self.land_on(self.line - 1, buf, index)?;
        Ok(true)
    }

    /// Move to the next line, aiming for the target column.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`](crate::Error::OutOfRange) when the cursor does
    /// not belong to `buf`/`index`.
    pub fn move_down(&mut self, buf: &GapBuffer, index: &LineIndex) -> Result<bool> {
        if self.line >= index.last_line() {
            return Ok(false);
        }
        self.land_on(self.line + 1, buf, index)?;
        Ok(true)
    }

    /// Place the caret on `line` at the code point covering `target_col`.
    ///
    /// Lines no wider than the target (empty lines included) put the caret at
    /// end of line. Otherwise the caret lands on the first code point whose
    /// right edge passes the target, so a wide glyph straddling the target
    /// column is selected by its left cell.
    fn land_on(&mut self, line: usize, buf: &GapBuffer, index: &LineIndex) -> Result<()> {
        let used = index.used_cells(line)?;
        let content = index.content_range(line)?;
        self.line = line;

        if self.target_col >= used {
            self.caret = Caret::EndOfLine(content.end);
            self.col = used;
            return Ok(());
        }

        let mut acc = 0;
        for (offset, ch) in (content.start..).zip(buf.chars_in(content.clone())?) {
            let width = index.cell_width(ch);
            if acc + width > self.target_col {
                self.caret = Caret::On(offset);
                self.col = acc;
                return Ok(());
            }
            acc += width;
        }

        // Only reachable if `used` disagrees with the content.
        self.caret = Caret::EndOfLine(content.end);
        self.col = acc;
        Ok(())
    }
}

impl Default for Cursor {
    /// The cursor of an empty buffer.
    fn default() -> Self {
        Self {
            line: 0,
            caret: Caret::EndOfLine(0),
            col: 0,
            target_col: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_index::DEFAULT_TAB_WIDTH;
    use pretty_assertions::assert_eq;

    fn fixture(text: &str) -> (GapBuffer, LineIndex) {
        let buf: GapBuffer = text.chars().collect();
        let index = LineIndex::build(&buf, DEFAULT_TAB_WIDTH);
        (buf, index)
    }

    /// Snapshot of the observable state: (line, col, caret, target).
    fn state(c: &Cursor) -> (usize, usize, Caret, usize) {
        (c.line(), c.col(), c.caret(), c.target_col())
    }

    // -- Construction -------------------------------------------------------

    #[test]
    fn new_on_content() {
        let (_, index) = fixture("ab\ncd");
        let c = Cursor::new(&index);
        assert_eq!(state(&c), (0, 0, Caret::On(0), 0));
    }

    #[test]
    fn new_on_empty_first_line() {
        let (_, index) = fixture("\nab");
        assert_eq!(Cursor::new(&index).caret(), Caret::EndOfLine(0));
        let (_, index) = fixture("");
        assert_eq!(Cursor::new(&index), Cursor::default());
    }

    #[test]
    fn at_offset_derives_line_and_column() {
        let (buf, index) = fixture("a\tb\ncd");
        let c = Cursor::at_offset(2, &buf, &index).unwrap();
        assert_eq!(state(&c), (0, 5, Caret::On(2), 5));

        let c = Cursor::at_offset(3, &buf, &index).unwrap();
        assert_eq!(state(&c), (0, 6, Caret::EndOfLine(3), 6));

        let c = Cursor::at_offset(6, &buf, &index).unwrap();
        assert_eq!(state(&c), (1, 2, Caret::EndOfLine(6), 2));

        assert!(Cursor::at_offset(7, &buf, &index).is_err());
    }

    // -- The navigation scenario --------------------------------------------

    #[test]
    fn right_to_end_then_down_and_up_keep_target() {
        let (buf, index) = fixture("ab\ncd");
        let mut c = Cursor::new(&index);

        assert!(c.move_right(&buf, &index).unwrap());
        assert!(c.move_right(&buf, &index).unwrap());
        assert!(!c.move_right(&buf, &index).unwrap());
        assert_eq!(state(&c), (0, 2, Caret::EndOfLine(2), 2));

        assert!(c.move_down(&buf, &index).unwrap());
        assert_eq!(state(&c), (1, 2, Caret::EndOfLine(5), 2));

        assert!(c.move_up(&buf, &index).unwrap());
        assert_eq!(state(&c), (0, 2, Caret::EndOfLine(2), 2));
    }

    // -- Boundaries ---------------------------------------------------------

    #[test]
    fn boundary_moves_are_noops() {
        let (buf, index) = fixture("ab\ncd");
        let mut c = Cursor::new(&index);
        let before = c;
        assert!(!c.move_left(&buf, &index).unwrap());
        assert!(!c.move_up(&buf, &index).unwrap());
        assert_eq!(c, before);

        let mut c = Cursor::at_offset(5, &buf, &index).unwrap();
        let before = c;
        assert!(!c.move_down(&buf, &index).unwrap());
        assert!(!c.move_right(&buf, &index).unwrap());
        assert_eq!(c, before);
    }

    #[test]
    fn right_never_crosses_a_line() {
        let (buf, index) = fixture("a\nb");
        let mut c = Cursor::new(&index);
        for _ in 0..5 {
            c.move_right(&buf, &index).unwrap();
        }
        assert_eq!(c.line(), 0);
        assert_eq!(c.caret(), Caret::EndOfLine(1));
    }

    #[test]
    fn left_never_crosses_a_line() {
        let (buf, index) = fixture("a\nb");
        let mut c = Cursor::at_offset(2, &buf, &index).unwrap();
        assert!(!c.move_left(&buf, &index).unwrap());
        assert_eq!(c.line(), 1);
    }

    // -- Horizontal ---------------------------------------------------------

    #[test]
    fn left_from_end_of_line_lands_on_last_char() {
        let (buf, index) = fixture("ab");
        let mut c = Cursor::at_offset(2, &buf, &index).unwrap();
        assert!(c.move_left(&buf, &index).unwrap());
        assert_eq!(state(&c), (0, 1, Caret::On(1), 1));
    }

    #[test]
    fn horizontal_moves_count_cells() {
        let (buf, index) = fixture("\t中x");
        let mut c = Cursor::new(&index);
        c.move_right(&buf, &index).unwrap();
        assert_eq!(c.col(), 4);
        c.move_right(&buf, &index).unwrap();
        assert_eq!(c.col(), 6);
        c.move_right(&buf, &index).unwrap();
        assert_eq!(state(&c), (0, 7, Caret::EndOfLine(3), 7));
        c.move_left(&buf, &index).unwrap();
        c.move_left(&buf, &index).unwrap();
        assert_eq!(state(&c), (0, 4, Caret::On(1), 4));
    }

    #[test]
    fn left_walks_over_zero_width_marks() {
        // 'e' + combining acute: two code points, one cell.
        let (buf, index) = fixture("e\u{0301}x");
        let mut c = Cursor::at_offset(2, &buf, &index).unwrap();
        assert_eq!(c.col(), 1);
        c.move_left(&buf, &index).unwrap();
        assert_eq!(state(&c), (0, 1, Caret::On(1), 1));
        c.move_left(&buf, &index).unwrap();
        assert_eq!(state(&c), (0, 0, Caret::On(0), 0));
    }

    // -- Vertical -----------------------------------------------------------

    #[test]
    fn target_column_survives_short_line() {
        let (buf, index) = fixture("hello\nhi\nworld");
        let mut c = Cursor::new(&index);
        for _ in 0..4 {
            c.move_right(&buf, &index).unwrap();
        }
        c.move_down(&buf, &index).unwrap();
        assert_eq!(state(&c), (1, 2, Caret::EndOfLine(8), 4));
        c.move_down(&buf, &index).unwrap();
        assert_eq!(state(&c), (2, 4, Caret::On(13), 4));
    }

    #[test]
    fn empty_line_lands_at_its_start() {
        let (buf, index) = fixture("abc\n\nxyz");
        let mut c = Cursor::at_offset(2, &buf, &index).unwrap();
        c.move_down(&buf, &index).unwrap();
        assert_eq!(state(&c), (1, 0, Caret::EndOfLine(4), 2));
        c.move_down(&buf, &index).unwrap();
        assert_eq!(state(&c), (2, 2, Caret::On(7), 2));
    }

    #[test]
    fn wide_glyph_straddling_target_is_selected() {
        let (buf, index) = fixture("a中b\nxyz");
        let mut c = Cursor::at_offset(6, &buf, &index).unwrap();
        assert_eq!(c.col(), 2);
        c.move_up(&buf, &index).unwrap();
        assert_eq!(state(&c), (0, 1, Caret::On(1), 2));
        c.move_down(&buf, &index).unwrap();
        assert_eq!(state(&c), (1, 2, Caret::On(6), 2));
    }

    #[test]
    fn tab_covers_its_cells() {
        let (buf, index) = fixture("\tx\nabcdef");
        let mut c = Cursor::at_offset(5, &buf, &index).unwrap();
        c.move_up(&buf, &index).unwrap();
        assert_eq!(state(&c), (0, 0, Caret::On(0), 2));
        c.move_down(&buf, &index).unwrap();
        assert_eq!(state(&c), (1, 2, Caret::On(5), 2));
    }

    #[test]
    fn horizontal_move_after_vertical_resets_target() {
        let (buf, index) = fixture("hello\nhi");
        let mut c = Cursor::at_offset(4, &buf, &index).unwrap();
        c.move_down(&buf, &index).unwrap();
        assert_eq!(state(&c), (1, 2, Caret::EndOfLine(8), 4));
        c.move_left(&buf, &index).unwrap();
        assert_eq!(state(&c), (1, 1, Caret::On(7), 1));
        c.move_up(&buf, &index).unwrap();
        assert_eq!(state(&c), (0, 1, Caret::On(1), 1));
    }

    #[test]
    fn down_onto_trailing_empty_line() {
        let (buf, index) = fixture("ab\n");
        let mut c = Cursor::new(&index);
        c.move_down(&buf, &index).unwrap();
        assert_eq!(state(&c), (1, 0, Caret::EndOfLine(3), 0));
        assert!(!c.move_down(&buf, &index).unwrap());
    }
}
