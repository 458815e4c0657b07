//! Session options and the `:set`-style directive parser.
//!
//! Every option is a positive integer. Values live on [`Options`]; this
//! module also parses textual directives so a host can expose them on a
//! command line or read them from a startup file.
//!
//! # Supported syntax
//!
//! | Syntax          | Effect                 |
//! |-----------------|------------------------|
//! | `option=N`      | Assign a value         |
//! | `option?`       | Query current value    |
//! | `option`        | Query current value    |
//! | *(empty)* / `all` | Show every option    |
//!
//! # Option names
//!
//! | Full name    | Abbrev | Default | Meaning                               |
//! |--------------|--------|---------|---------------------------------------|
//! | `tabstop`    | `ts`   | 4       | Cells occupied by a tab               |
//! | `growblock`  | `gb`   | 10      | Cells added when the gap runs out     |
//! | `viewheight` | `vh`   | 24      | Visible text rows for scrolling       |

use tracing::debug;

use crate::error::{Error, Result};
use crate::gap_buffer::DEFAULT_GROW_BLOCK;
use crate::line_index::DEFAULT_TAB_WIDTH;

/// Rows shown until the host reports a real terminal size.
pub const DEFAULT_VIEW_HEIGHT: usize = 24;

/// Canonical option names, in display order.
pub const OPTION_NAMES: [&str; 3] = ["tabstop", "growblock", "viewheight"];

// ---------------------------------------------------------------------------
// Directives
// ---------------------------------------------------------------------------

/// A parsed directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `option=value` — assign a value.
    Assign(String, String),

    /// `option?` or bare `option` — query the current value.
    Query(String),

    /// Empty input or `all` — show every option.
    ShowAll,
}

/// Resolve a full name or abbreviation to the canonical option name.
#[must_use]
pub fn canonical_name(name: &str) -> Option<&'static str> {
    match name {
        "tabstop" | "ts" => Some("tabstop"),
        "growblock" | "gb" => Some("growblock"),
        "viewheight" | "vh" => Some("viewheight"),
        _ => None,
    }
}

/// Parse a whitespace-separated list of directives. Empty input produces
/// [`Directive::ShowAll`].
#[must_use]
pub fn parse_directives(args: &str) -> Vec<Directive> {
    let trimmed = args.trim();
    if trimmed.is_empty() {
        return vec![Directive::ShowAll];
    }
    trimmed.split_whitespace().map(parse_directive).collect()
}

/// Parse a single directive.
#[must_use]
pub fn parse_directive(arg: &str) -> Directive {
    if arg == "all" {
        return Directive::ShowAll;
    }
    if let Some((name, value)) = arg.split_once('=') {
        return Directive::Assign(name.to_string(), value.to_string());
    }
    let name = arg.strip_suffix('?').unwrap_or(arg);
    Directive::Query(name.to_string())
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Tunables of an editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    tab_width: usize,
    grow_block: usize,
    view_height: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

impl Options {
    /// Default options: 4-cell tabs, 10-cell growth, 24 visible rows.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            grow_block: DEFAULT_GROW_BLOCK,
            view_height: DEFAULT_VIEW_HEIGHT,
        }
    }

    // -- Accessors ----------------------------------------------------------

    /// Cells occupied by a tab.
    #[inline]
    #[must_use]
    pub const fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Cells appended to the gap buffer when its gap runs out.
    #[inline]
    #[must_use]
    pub const fn grow_block(&self) -> usize {
        self.grow_block
    }

    /// Number of visible text rows.
    #[inline]
    #[must_use]
    pub const fn view_height(&self) -> usize {
        self.view_height
    }

    // -- Builders -----------------------------------------------------------

    /// Same options with a different tab width (minimum 1).
    #[must_use]
    pub fn with_tab_width(mut self, width: usize) -> Self {
        self.tab_width = width.max(1);
        self
    }

    /// Same options with a different growth block (minimum 1).
    #[must_use]
    pub fn with_grow_block(mut self, block: usize) -> Self {
        self.grow_block = block.max(1);
        self
    }

    /// Same options with a different view height (minimum 1).
    #[must_use]
    pub fn with_view_height(mut self, rows: usize) -> Self {
        self.view_height = rows.max(1);
        self
    }

    // -- Named access -------------------------------------------------------

    /// Value of an option by full name or abbreviation.
    ///
    /// # Errors
    ///
    /// [`Error::Option`] for an unknown name.
    pub fn get(&self, name: &str) -> Result<usize> {
        match canonical_name(name) {
            Some("tabstop") => Ok(self.tab_width),
            Some("growblock") => Ok(self.grow_block),
            Some("viewheight") => Ok(self.view_height),
            _ => Err(unknown(name)),
        }
    }

    /// Set an option by full name or abbreviation.
    ///
    /// # Errors
    ///
    /// [`Error::Option`] for an unknown name or a zero value.
    pub fn set(&mut self, name: &str, value: usize) -> Result<()> {
        let canonical = canonical_name(name).ok_or_else(|| unknown(name))?;
        if value == 0 {
            return Err(Error::Option {
                name: canonical.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        match canonical {
            "tabstop" => self.tab_width = value,
            "growblock" => self.grow_block = value,
            _ => self.view_height = value,
        }
        debug!(option = canonical, value, "option set");
        Ok(())
    }

    /// Apply one directive. Queries and `ShowAll` return the lines a host
    /// should display; assignments return nothing.
    ///
    /// # Errors
    ///
    /// [`Error::Option`] for an unknown name or a value that is not a
    /// positive integer.
    pub fn apply(&mut self, directive: &Directive) -> Result<Vec<String>> {
        match directive {
            Directive::Assign(name, raw) => {
                let value = raw.parse::<usize>().map_err(|_| Error::Option {
                    name: name.clone(),
                    reason: format!("expected a number, got `{raw}`"),
                })?;
                self.set(name, value)?;
                Ok(Vec::new())
            }
            Directive::Query(name) => {
                let value = self.get(name)?;
                Ok(vec![format_option(canonical_name(name).unwrap_or(name), value)])
            }
            Directive::ShowAll => Ok(OPTION_NAMES
                .iter()
                .filter_map(|name| self.get(name).ok().map(|v| format_option(name, v)))
                .collect()),
        }
    }

    /// Parse and apply a directive string. Stops at the first failing
    /// directive; earlier directives stay applied.
    ///
    /// # Errors
    ///
    /// See [`apply`](Self::apply).
    pub fn apply_str(&mut self, args: &str) -> Result<Vec<String>> {
        let mut shown = Vec::new();
        for directive in parse_directives(args) {
            shown.extend(self.apply(&directive)?);
        }
        Ok(shown)
    }
}

/// `name=value`, the form queries are answered in.
#[must_use]
pub fn format_option(name: &str, value: usize) -> String {
    format!("{name}={value}")
}

fn unknown(name: &str) -> Error {
    Error::Option {
        name: name.to_string(),
        reason: "unknown option".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
