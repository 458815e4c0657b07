//! Session — one buffer, its line index, cursor and viewport.
//!
//! The session is a plain owned value. The host's event loop holds it and
//! passes it around explicitly; there is no global editor state. Every input
//! event is handled to completion before the next one:
//!
//! ```text
//!   command ──▶ edit?  ──▶ gap buffer ──▶ full line-index rebuild ──▶ cursor re-derived
//!           └─▶ motion ──▶ cursor ───────────────────────────────────▶ viewport scrolled
//! ```
//!
//! # Cursor after edits
//!
//! Edits can invalidate the cursor's offset, so after every edit the cursor
//! is re-derived from scratch with [`Cursor::at_offset`]:
//!
//! - an insertion at or before the cursor offset pushes it right by one,
//! - a removal strictly before the cursor offset pulls it left by one,
//! - anything after the cursor leaves its offset alone.
//!
//! The target column is reset to the re-derived column.

use std::io::{Read, Write};

use tracing::{debug, trace};

use crate::command::{Action, Command};
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::gap_buffer::GapBuffer;
use crate::line_index::LineIndex;
use crate::options::Options;
use crate::position::Position;
use crate::view::{RenderLine, Viewport};

/// An editing session over one in-memory buffer.
pub struct Session {
    buffer: GapBuffer,
    index: LineIndex,
    cursor: Cursor,
    view: Viewport,
    options: Options,
    /// True when the content changed since the last successful write.
    modified: bool,
}

impl Session {
    // -- Construction -------------------------------------------------------

    /// An empty session.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self::from_text("", options)
    }

    /// A session over `text`. The buffer is filled by pushing every code
    /// point, then indexed once.
    #[must_use]
    pub fn from_text(text: &str, options: Options) -> Self {
        let mut buffer = GapBuffer::with_grow_block(options.grow_block());
        buffer.extend(text.chars());
        let index = LineIndex::build(&buffer, options.tab_width());
        let cursor = Cursor::new(&index);
        debug!(
            chars = buffer.len(),
            lines = index.line_count(),
            "session loaded"
        );
        Self {
            buffer,
            index,
            cursor,
            view: Viewport::new(options.view_height()),
            options,
            modified: false,
        }
    }

    /// A session over everything `reader` yields, decoded as UTF-8.
    ///
    /// # Errors
    ///
    /// [`Error::Read`] when the reader fails or the bytes are not UTF-8. No
    /// partial session is produced.
    pub fn from_reader<R: Read>(mut reader: R, options: Options) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text).map_err(Error::Read)?;
        Ok(Self::from_text(&text, options))
    }

    // -- Accessors ----------------------------------------------------------

    /// The code-point storage.
    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> &GapBuffer {
        &self.buffer
    }

    /// The line index for the current content.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> &LineIndex {
        &self.index
    }

    /// The cursor.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// The viewport.
    #[inline]
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.view
    }

    /// Current options.
    #[inline]
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// True when the content changed since it was loaded or last written.
    #[inline]
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    /// Number of code points.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True when the buffer is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of lines (at least 1).
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.index.line_count()
    }

    // -- Persistence --------------------------------------------------------

    /// The full logical content.
    #[must_use]
    pub fn contents(&self) -> String {
        self.buffer.to_string()
    }

    /// Write the content as UTF-8 to `writer` and clear the modified flag.
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// [`Error::Write`] when the writer fails; the modified flag is kept.
    pub fn write_to<W: Write>(&mut self, mut writer: W) -> Result<usize> {
        let text = self.contents();
        writer
            .write_all(text.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(Error::Write)?;
        self.modified = false;
        debug!(bytes = text.len(), "session persisted");
        Ok(text.len())
    }

    // -- Commands -----------------------------------------------------------

    /// Apply one command from the host.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::OutOfRange`] from the buffer or index; with a
    /// consistent session this does not happen.
    pub fn apply(&mut self, command: Command) -> Result<Action> {
        trace!(%command, "apply");
        match command {
            Command::Insert(ch) => self.insert_code_point(ch)?,
            Command::DeleteBefore => {
                self.delete_before()?;
            }
            Command::MoveLeft => {
                self.move_left()?;
            }
            Command::MoveRight => {
                self.move_right()?;
            }
            Command::MoveUp => {
                self.move_up()?;
            }
            Command::MoveDown => {
                self.move_down()?;
            }
            Command::Persist => return Ok(Action::Persist),
            Command::Quit => return Ok(Action::Quit),
        }
        Ok(Action::Continue)
    }

    // -- Editing ------------------------------------------------------------

    /// Insert `ch` at the cursor; the cursor ends up just after it.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if the cursor is stale.
    pub fn insert_code_point(&mut self, ch: char) -> Result<()> {
        self.insert_at(self.cursor.offset(), ch)
    }

    /// Delete the code point before the cursor and return it. `None` at the
    /// start of the buffer. Deleting a terminator joins two lines.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if the cursor is stale.
    pub fn delete_before(&mut self) -> Result<Option<char>> {
        match self.cursor.offset() {
            0 => Ok(None),
            offset => self.remove_at(offset - 1).map(Some),
        }
    }

    /// Insert `ch` at an arbitrary offset in `[0, len]`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] when `offset > len`.
    pub fn insert_at(&mut self, offset: usize, ch: char) -> Result<()> {
        self.buffer.insert(offset, ch)?;
        let cursor = self.cursor.offset();
        let cursor = if offset <= cursor { cursor + 1 } else { cursor };
        self.after_edit(cursor)
    }

    /// Remove and return the code point at an arbitrary offset in
    /// `[0, len)`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] when `offset >= len`.
    pub fn remove_at(&mut self, offset: usize) -> Result<char> {
        let ch = self.buffer.remove(offset)?;
        let cursor = self.cursor.offset();
        let cursor = if offset < cursor { cursor - 1 } else { cursor };
        self.after_edit(cursor)?;
        Ok(ch)
    }

    /// Rebuild the index in full and re-derive the cursor at `cursor`.
    fn after_edit(&mut self, cursor: usize) -> Result<()> {
        self.modified = true;
        self.index = LineIndex::build(&self.buffer, self.options.tab_width());
        self.cursor = Cursor::at_offset(cursor, &self.buffer, &self.index)?;
        self.view.scroll_to(self.cursor.line());
        Ok(())
    }

    // -- Navigation ---------------------------------------------------------

    /// Cursor one code point left. Returns whether it moved.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if the cursor is stale.
    pub fn move_left(&mut self) -> Result<bool> {
        let moved = self.cursor.move_left(&self.buffer, &self.index)?;
        self.view.scroll_to(self.cursor.line());
        Ok(moved)
    }

    /// Cursor one code point right. Returns whether it moved.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if the cursor is stale.
    pub fn move_right(&mut self) -> Result<bool> {
        let moved = self.cursor.move_right(&self.buffer, &self.index)?;
        self.view.scroll_to(self.cursor.line());
        Ok(moved)
    }

    /// Cursor one line up. Returns whether it moved.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if the cursor is stale.
    pub fn move_up(&mut self) -> Result<bool> {
        let moved = self.cursor.move_up(&self.buffer, &self.index)?;
        self.view.scroll_to(self.cursor.line());
        Ok(moved)
    }

    /// Cursor one line down. Returns whether it moved.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if the cursor is stale.
    pub fn move_down(&mut self) -> Result<bool> {
        let moved = self.cursor.move_down(&self.buffer, &self.index)?;
        self.view.scroll_to(self.cursor.line());
        Ok(moved)
    }

    /// Put the cursor at an arbitrary offset in `[0, len]`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] when `offset > len`.
    pub fn set_cursor(&mut self, offset: usize) -> Result<()> {
        self.cursor = Cursor::at_offset(offset, &self.buffer, &self.index)?;
        self.view.scroll_to(self.cursor.line());
        Ok(())
    }

    // -- Rendering handoff --------------------------------------------------

    /// Where the host should place the hardware cursor, relative to the
    /// viewport. `None` only if the host scrolled the cursor out of view.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if the cursor is stale.
    pub fn screen_position(&self) -> Result<Option<Position>> {
        self.view.screen_position(&self.cursor, &self.index)
    }

    /// The visible lines with their cells.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if the index is stale.
    pub fn render_lines(&self) -> Result<Vec<RenderLine>> {
        self.view.render_lines(&self.buffer, &self.index)
    }

    /// Scroll so the first visible line is `line`. The cursor is not moved.
    pub const fn scroll_to_top(&mut self, line: usize) {
        self.view.set_top(line);
    }

    /// Change the number of visible rows, keeping the cursor in view.
    pub fn resize(&mut self, rows: usize) {
        self.options = self.options.with_view_height(rows);
        self.view.set_height(rows);
        self.view.scroll_to(self.cursor.line());
    }

    // -- Options ------------------------------------------------------------

    /// Apply option directives (see [`options`](crate::options)) and return
    /// whatever queries produced. A tab width change rebuilds the index and
    /// re-derives the cursor; a height change rescrolls.
    ///
    /// # Errors
    ///
    /// [`Error::Option`] for a bad directive. Directives before the failing
    /// one stay applied.
    pub fn set_options(&mut self, directives: &str) -> Result<Vec<String>> {
        let mut options = self.options;
        let result = options.apply_str(directives);
        self.reconfigure(options)?;
        result
    }

    fn reconfigure(&mut self, options: Options) -> Result<()> {
        let old = std::mem::replace(&mut self.options, options);
        if old.tab_width() != options.tab_width() {
            self.index = LineIndex::build(&self.buffer, options.tab_width());
            self.cursor = Cursor::at_offset(self.cursor.offset(), &self.buffer, &self.index)?;
        }
        if old.grow_block() != options.grow_block() {
            self.buffer.set_grow_block(options.grow_block());
        }
        self.view.set_height(options.view_height());
        self.view.scroll_to(self.cursor.line());
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("chars", &self.buffer.len())
            .field("lines", &self.index.line_count())
            .field("cursor", &self.cursor)
            .field("view", &self.view)
            .field("modified", &self.modified)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
