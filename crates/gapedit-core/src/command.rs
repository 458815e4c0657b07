//! The command surface a host drives a session with.
//!
//! Mapping keys to commands is the host's business; the session only sees
//! these values. Each command yields an [`Action`] telling the host what to
//! do next.
//!
//! | Command        | Effect                                         |
//! |----------------|------------------------------------------------|
//! | `Insert(c)`    | Insert `c` at the cursor, cursor moves past it |
//! | `DeleteBefore` | Delete the code point before the cursor        |
//! | `MoveLeft`     | Cursor one code point left, same line          |
//! | `MoveRight`    | Cursor one code point right, same line         |
//! | `MoveUp`       | Cursor one line up, sticky column              |
//! | `MoveDown`     | Cursor one line down, sticky column            |
//! | `Persist`      | Ask the host to write the content out          |
//! | `Quit`         | Ask the host to end the session                |

use std::fmt;

/// An editing or navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Insert(char),
    DeleteBefore,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Persist,
    Quit,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert(ch) => write!(f, "insert {ch:?}"),
            Self::DeleteBefore => f.write_str("delete-before"),
            Self::MoveLeft => f.write_str("left"),
            Self::MoveRight => f.write_str("right"),
            Self::MoveUp => f.write_str("up"),
            Self::MoveDown => f.write_str("down"),
            Self::Persist => f.write_str("persist"),
            Self::Quit => f.write_str("quit"),
        }
    }
}

/// What the host should do after a command was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Redraw if needed and wait for the next command.
    Continue,
    /// Write [`Session::contents`](crate::Session::contents) to storage.
    Persist,
    /// End the session.
    Quit,
}
