//! Error type shared by every module of the editing core.
//!
//! Index errors are contract violations by the caller. They are reported
//! immediately and never clamped, so arithmetic bugs in the host surface in
//! tests instead of silently moving the cursor somewhere plausible.

use std::io;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong inside the editing core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An index argument fell outside the legal range for the operation.
    ///
    /// `len` is the exclusive upper bound that was in effect: the logical
    /// buffer length for offsets, the line count for line numbers.
    #[error("index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },

    /// The initial content stream failed or was not valid UTF-8.
    #[error("cannot read initial content")]
    Read(#[source] io::Error),

    /// The persistence sink rejected the content.
    #[error("cannot write content")]
    Write(#[source] io::Error),

    /// An options directive named an unknown option or carried a bad value.
    #[error("option `{name}`: {reason}")]
    Option { name: String, reason: String },
}

impl Error {
    /// Shorthand for [`Error::OutOfRange`].
    #[inline]
    #[must_use]
    pub const fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }

    /// True for contract violations (as opposed to I/O or config failures).
    #[inline]
    #[must_use]
    pub const fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}
