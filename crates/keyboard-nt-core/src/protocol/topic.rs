//! Table paths and topic names.
//!
//! NT4 has a flat topic namespace; "tables" are just `/`-separated prefixes.
//! A table named `Keyboard/Keys` owns every topic under `/Keyboard/Keys/`.

use std::fmt;

/// Path separator in topic names.
pub const PATH_SEPARATOR: char = '/';

/// A normalised table path: leading `/`, no trailing `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TablePath(String);

impl TablePath {
    /// Normalises `name` into a table path.
    ///
    /// `"Keyboard/Keys"`, `"/Keyboard/Keys"` and `"Keyboard/Keys/"` all
    /// yield `/Keyboard/Keys`.  Empty or all-slash input is the root table `/`.
    pub fn new(name: &str) -> Self {
        let trimmed = name.trim_matches(PATH_SEPARATOR);
        if trimmed.is_empty() {
            Self(PATH_SEPARATOR.to_string())
        } else {
            Self(format!("{PATH_SEPARATOR}{trimmed}"))
        }
    }

    /// The path as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full topic name for the entry `key` in this table.
    pub fn topic(&self, key: &str) -> String {
        if self.0.len() == 1 {
            format!("{PATH_SEPARATOR}{key}")
        } else {
            format!("{}{PATH_SEPARATOR}{key}", self.0)
        }
    }
}

impl fmt::Display for TablePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
