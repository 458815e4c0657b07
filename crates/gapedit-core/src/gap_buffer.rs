//! Gap buffer — the code-point storage engine.
//!
//! The content lives in one `Vec<char>` with a single relocatable hole (the
//! *gap*) somewhere inside it:
//!
//! ```text
//!   logical:   h e l l o
//!   physical:  h e _ _ _ l l o
//!                  ^gap_start, gap_len = 3
//! ```
//!
//! Inserting or deleting next to the gap is O(1). Editing somewhere else
//! first walks the gap over, one cell per step, so a jump costs O(distance)
//! and a run of nearby edits (the usual typing pattern) stays amortized O(1).
//!
//! # Growth
//!
//! When an insertion finds the gap exhausted, a fixed block of placeholder
//! cells is appended to the array and becomes the new gap. Capacity only ever
//! grows; nothing shrinks the array.

use std::fmt::{self, Write as _};
use std::ops::Range;

use tracing::trace;

use crate::error::{Error, Result};

/// Cells appended to the array each time the gap runs out.
pub const DEFAULT_GROW_BLOCK: usize = 10;

/// Filler for gap cells. Never observable through the logical view.
const PLACEHOLDER: char = '\0';

// ---------------------------------------------------------------------------
// GapBuffer
// ---------------------------------------------------------------------------

/// A mutable sequence of code points with O(1) amortized local edits.
///
/// Logical index `i` maps to physical index `i` before the gap and to
/// `i + gap_len` from the gap onwards. All public indices are logical.
#[derive(Clone)]
pub struct GapBuffer {
    /// Backing store: `[before gap | gap | after gap]`.
    cells: Vec<char>,
    /// First physical index of the gap.
    gap_start: usize,
    /// Number of unused cells in the gap.
    gap_len: usize,
    /// How many cells to append when the gap is exhausted.
    grow_block: usize,
}

impl GapBuffer {
    // -- Construction -------------------------------------------------------

    /// Create an empty buffer. Allocates nothing until the first insert.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_grow_block(DEFAULT_GROW_BLOCK)
    }

    /// Create an empty buffer that grows by `grow_block` cells at a time
    /// (minimum 1).
    #[must_use]
    pub const fn with_grow_block(grow_block: usize) -> Self {
        Self {
            cells: Vec::new(),
            gap_start: 0,
            gap_len: 0,
            grow_block: if grow_block == 0 { 1 } else { grow_block },
        }
    }

    // -- Accessors ----------------------------------------------------------

    /// Logical length (number of code points, gap excluded).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len() - self.gap_len
    }

    /// True when the buffer holds no code points.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Physical array length (content plus gap).
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// The gap as a physical half-open range.
    #[inline]
    #[must_use]
    pub const fn gap(&self) -> Range<usize> {
        self.gap_start..self.gap_start + self.gap_len
    }

    /// Cells appended per growth step.
    #[inline]
    #[must_use]
    pub const fn grow_block(&self) -> usize {
        self.grow_block
    }

    /// Change the growth step for future growth (minimum 1). Existing
    /// storage is untouched.
    pub const fn set_grow_block(&mut self, grow_block: usize) {
        self.grow_block = if grow_block == 0 { 1 } else { grow_block };
    }

    /// Code point at logical index `i`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] when `i >= len()`.
    pub fn get(&self, i: usize) -> Result<char> {
        self.check_index(i)?;
        Ok(self.cells[self.physical(i)])
    }

    /// Iterate the logical content in order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        let after = self.gap_start + self.gap_len;
        self.cells[..self.gap_start]
            .iter()
            .chain(&self.cells[after..])
            .copied()
    }

    /// Iterate the code points in a logical range.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] when the range ends past `len()` or is reversed.
    pub fn chars_in(&self, range: Range<usize>) -> Result<impl Iterator<Item = char> + '_> {
        let len = self.len();
        if range.end > len {
            return Err(Error::out_of_range(range.end, len));
        }
        if range.start > range.end {
            return Err(Error::out_of_range(range.start, range.end));
        }
        Ok(range.map(move |i| self.cells[self.physical(i)]))
    }

    // -- Mutation -----------------------------------------------------------

    /// Overwrite the code point at logical index `i`. Never resizes.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] when `i >= len()`.
    pub fn set(&mut self, i: usize, ch: char) -> Result<()> {
        self.check_index(i)?;
        let p = self.physical(i);
        self.cells[p] = ch;
        Ok(())
    }

    /// Append at the logical end. Used for bulk loading; needs no gap
    /// because whatever sits after the gap is already the logical tail.
    pub fn push(&mut self, ch: char) {
        self.cells.push(ch);
    }

    /// Insert `ch` so that it becomes logical index `i`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] when `i > len()`.
    pub fn insert(&mut self, i: usize, ch: char) -> Result<()> {
        let len = self.len();
        if i > len {
            return Err(Error::out_of_range(i, len + 1));
        }
        if self.gap_len == 0 {
            self.grow();
        }
        self.move_gap(i);
        self.cells[self.gap_start] = ch;
        self.gap_start += 1;
        self.gap_len -= 1;
        Ok(())
    }

    /// Delete and return the code point at logical index `i`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] when `i >= len()`.
    pub fn remove(&mut self, i: usize) -> Result<char> {
        self.check_index(i)?;
        let ch = self.cells[self.physical(i)];
        // Park the gap right after the victim, then swallow it.
        self.move_gap(i + 1);
        self.gap_start -= 1;
        self.gap_len += 1;
        Ok(ch)
    }

    // -- Internals ----------------------------------------------------------

    #[inline]
    const fn physical(&self, i: usize) -> usize {
        if i < self.gap_start {
            i
        } else {
            i + self.gap_len
        }
    }

    fn check_index(&self, i: usize) -> Result<()> {
        let len = self.len();
        if i >= len {
            return Err(Error::out_of_range(i, len));
        }
        Ok(())
    }

    /// Append a fresh block of placeholder cells and make it the gap.
    ///
    /// Only called with an empty gap, so the whole array is content and the
    /// new gap sits at the logical end.
    fn grow(&mut self) {
        debug_assert_eq!(self.gap_len, 0);
        let block = self.grow_block;
        self.cells.resize(self.cells.len() + block, PLACEHOLDER);
        self.gap_start = self.cells.len() - block;
        self.gap_len = block;
        trace!(capacity = self.cells.len(), "gap buffer grew");
    }

    /// Walk the gap until its left edge sits at logical index `target`.
    ///
    /// Steps are bounded by the array start and the logical end, so a
    /// freshly grown (or empty) gap can never be dragged past content that
    /// does not exist.
    fn move_gap(&mut self, target: usize) {
        let from = self.gap_start;
        while self.gap_start > target {
            self.shift_left();
        }
        let len = self.len();
        while self.gap_start < target && self.gap_start < len {
            self.shift_right();
        }
        if from != self.gap_start {
            trace!(from, to = self.gap_start, "moved gap");
        }
    }

    /// Move the element just left of the gap to the gap's right edge.
    fn shift_left(&mut self) {
        self.gap_start -= 1;
        self.cells[self.gap_start + self.gap_len] = self.cells[self.gap_start];
    }

    /// Move the element just right of the gap to the gap's left edge.
    fn shift_right(&mut self) {
        self.cells[self.gap_start] = self.cells[self.gap_start + self.gap_len];
        self.gap_start += 1;
    }
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<char> for GapBuffer {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut buf = Self::new();
        buf.extend(iter);
        buf
    }
}

impl Extend<char> for GapBuffer {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        for ch in iter {
            self.push(ch);
        }
    }
}

/// Equality is logical: two buffers are equal when their content is, no
/// matter where their gaps sit.
impl PartialEq for GapBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.chars().eq(other.chars())
    }
}

impl Eq for GapBuffer {}

/// Writes the logical content only.
impl fmt::Display for GapBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars().try_for_each(|ch| f.write_char(ch))
    }
}

impl fmt::Debug for GapBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GapBuffer({:?}, gap {:?})", self.to_string(), self.gap())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Build a buffer with an explicit physical layout. `_` marks gap cells.
    fn raw(layout: &str, gap_start: usize, gap_len: usize) -> GapBuffer {
        GapBuffer {
            cells: layout.chars().collect(),
            gap_start,
            gap_len,
            grow_block: DEFAULT_GROW_BLOCK,
        }
    }

    /// Physical layout with gap cells rendered as `_`.
    fn layout(buf: &GapBuffer) -> String {
        let gap = buf.gap();
        buf.cells
            .iter()
            .enumerate()
            .map(|(i, &ch)| if gap.contains(&i) { '_' } else { ch })
            .collect()
    }

    /// The classic fixture: "hello" with a three-cell gap after "he".
    fn hello() -> GapBuffer {
        raw("he___llo", 2, 3)
    }

    // -- Construction -------------------------------------------------------

    #[test]
    fn new_is_empty_and_unallocated() {
        let buf = GapBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 0);
        assert_eq!(buf.gap(), 0..0);
        assert_eq!(buf.grow_block(), DEFAULT_GROW_BLOCK);
    }

    #[test]
    fn zero_grow_block_is_raised_to_one() {
        assert_eq!(GapBuffer::with_grow_block(0).grow_block(), 1);
    }

    #[test]
    fn from_iter_has_no_gap() {
        let buf: GapBuffer = "hello".chars().collect();
        assert_eq!(layout(&buf), "hello");
        assert_eq!(buf.gap(), 0..0);
        assert_eq!(buf.to_string(), "hello");
    }

    #[test]
    fn push_then_get() {
        let mut buf = GapBuffer::new();
        for (i, ch) in ['1', '2', '3', '4'].into_iter().enumerate() {
            buf.push(ch);
            assert_eq!(buf.get(i).unwrap(), ch);
        }
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn push_after_gap_lands_at_logical_end() {
        let mut buf = hello();
        buf.push('!');
        assert_eq!(buf.to_string(), "hello!");
    }

    // -- Access -------------------------------------------------------------

    #[test]
    fn get_maps_across_gap() {
        let buf = hello();
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.get(0).unwrap(), 'h');
        assert_eq!(buf.get(2).unwrap(), 'l');
        assert_eq!(buf.get(4).unwrap(), 'o');
    }

    #[test]
    fn get_out_of_range() {
        let buf = hello();
        let err = buf.get(5).unwrap_err();
        assert!(matches!(err, Error::OutOfRange { index: 5, len: 5 }));
    }

    #[test]
    fn set_overwrites_without_resizing() {
        let mut buf = hello();
        buf.set(4, 'X').unwrap();
        assert_eq!(buf.get(4).unwrap(), 'X');
        assert_eq!(buf.capacity(), 8);
        assert!(buf.set(5, 'Y').is_err());
    }

    #[test]
    fn chars_in_range() {
        let buf = hello();
        let mid: String = buf.chars_in(1..4).unwrap().collect();
        assert_eq!(mid, "ell");
        assert!(buf.chars_in(3..6).is_err());
        let empty: String = buf.chars_in(5..5).unwrap().collect();
        assert_eq!(empty, "");
    }

    // -- Insert -------------------------------------------------------------

    #[test]
    fn insert_sequence_moves_and_grows_gap() {
        let mut buf = hello();
        let steps = [
            (2, '1', "he1__llo"),
            (1, '2', "h2_e1llo"),
            (0, '3', "3h2e1llo"),
            (0, '4', "4_________3h2e1llo"),
            (9, '5', "43h2e1llo5________"),
            (4, '6', "43h26_______e1llo5"),
        ];
        for (idx, ch, expected) in steps {
            buf.insert(idx, ch).unwrap();
            assert_eq!(layout(&buf), expected, "insert({idx}, {ch:?})");
        }
        assert_eq!(buf.to_string(), "43h26e1llo5");
    }

    #[test]
    fn insert_scenario_on_three_cell_gap() {
        let mut buf = raw("he___", 2, 3);
        buf.insert(2, '1').unwrap();
        assert_eq!(buf.to_string(), "he1");
        buf.insert(1, '2').unwrap();
        assert_eq!(buf.to_string(), "h2e1");
        assert_eq!(buf.remove(0).unwrap(), 'h');
        assert_eq!(buf.to_string(), "2e1");
    }

    #[test]
    fn insert_at_len_appends() {
        let mut buf: GapBuffer = "ab".chars().collect();
        buf.insert(2, 'c').unwrap();
        assert_eq!(buf.to_string(), "abc");
    }

    #[test]
    fn insert_past_len_fails() {
        let mut buf: GapBuffer = "ab".chars().collect();
        assert!(buf.insert(3, 'c').unwrap_err().is_out_of_range());
        assert_eq!(buf.to_string(), "ab");
    }

    #[test]
    fn insert_into_empty_grows_by_block() {
        let mut buf = GapBuffer::with_grow_block(4);
        buf.insert(0, 'x').unwrap();
        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf.gap(), 1..4);
    }

    // -- Remove -------------------------------------------------------------

    #[test]
    fn remove_leaves_gap_at_removal_point() {
        let mut buf = hello();
        assert_eq!(buf.remove(1).unwrap(), 'e');
        assert_eq!(buf.gap(), 1..5);

        buf.insert(1, 'e').unwrap();
        assert_eq!(buf.remove(4).unwrap(), 'o');
        assert_eq!(buf.gap().start, 4);
        assert_eq!(buf.to_string(), "hell");
    }

    #[test]
    fn remove_last_with_empty_gap() {
        let mut buf = raw("test", 0, 0);
        assert_eq!(buf.remove(3).unwrap(), 't');
        assert_eq!(buf.gap(), 3..4);
        assert_eq!(buf.to_string(), "tes");
    }

    #[test]
    fn remove_last_right_after_growth() {
        let mut buf: GapBuffer = "ab".chars().collect();
        buf.insert(2, 'c').unwrap();
        // Gap now trails the content: "abc" + 9 unused cells.
        assert_eq!(buf.remove(2).unwrap(), 'c');
        assert_eq!(buf.gap(), 2..12);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.remove(1).unwrap(), 'b');
        assert_eq!(buf.to_string(), "a");
    }

    #[test]
    fn remove_out_of_range() {
        let mut buf = hello();
        assert!(buf.remove(5).is_err());
        assert!(GapBuffer::new().remove(0).is_err());
    }

    #[test]
    fn remove_undoes_insert() {
        let mut buf = hello();
        for i in 0..=buf.len() {
            buf.insert(i, '#').unwrap();
            assert_eq!(buf.remove(i).unwrap(), '#');
            assert_eq!(buf.to_string(), "hello");
        }
    }

    // -- Gap movement -------------------------------------------------------

    #[test]
    fn move_zero_gap() {
        let mut buf = raw("test", 2, 0);
        buf.move_gap(0);
        assert_eq!(buf.gap_start, 0);
        buf.move_gap(3);
        assert_eq!(buf.gap_start, 3);
        assert_eq!(buf.to_string(), "test");
    }

    #[test]
    fn move_gap_stops_at_logical_end() {
        let mut buf = hello();
        buf.move_gap(99);
        assert_eq!(buf.gap(), 5..8);
        assert_eq!(buf.to_string(), "hello");
    }

    // -- Traits -------------------------------------------------------------

    #[test]
    fn equality_ignores_gap_position() {
        let a = hello();
        let b: GapBuffer = "hello".chars().collect();
        assert_eq!(a, b);
        assert_ne!(a, "help".chars().collect::<GapBuffer>());
    }

    #[test]
    fn debug_shows_content_and_gap() {
        assert_eq!(format!("{:?}", hello()), "GapBuffer(\"hello\", gap 2..5)");
    }
}
