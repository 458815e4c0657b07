//! # gapedit-core — Editing core for gapedit
//!
//! The in-memory half of a terminal text editor. Terminal I/O, key mapping
//! and file handling stay with the host; this crate owns the text and the
//! cursor:
//!
//! - **[`gap_buffer`]** — `GapBuffer`, code-point storage with a movable gap
//! - **[`line_index`]** — `LineIndex`, line starts and per-line cell widths
//! - **[`position`]** — `Position` (line, col) and the `Caret` placement
//! - **[`cursor`]** — Cursor with horizontal/vertical motion and sticky column
//! - **[`view`]** — `Viewport` scrolling and the per-line rendering handoff
//! - **[`options`]** — Tunables and the `:set`-style directive parser
//! - **[`command`]** — The `Command`/`Action` surface a host loop drives
//! - **[`session`]** — `Session`, everything above wired together
//!
//! ```
//! use gapedit_core::{Command, Options, Position, Session};
//!
//! let mut session = Session::from_text("ab\ncd", Options::default());
//! for command in [Command::MoveRight, Command::MoveRight, Command::MoveDown] {
//!     session.apply(command)?;
//! }
//! assert_eq!(session.screen_position()?, Some(Position::new(1, 2)));
//! # Ok::<(), gapedit_core::Error>(())
//! ```

pub mod command;
pub mod cursor;
pub mod error;
pub mod gap_buffer;
pub mod line_index;
pub mod options;
pub mod position;
pub mod session;
pub mod view;

pub use command::{Action, Command};
pub use cursor::Cursor;
pub use error::{Error, Result};
pub use gap_buffer::GapBuffer;
pub use line_index::LineIndex;
pub use options::Options;
pub use position::{Caret, Position};
pub use session::Session;
pub use view::{RenderLine, Viewport};
