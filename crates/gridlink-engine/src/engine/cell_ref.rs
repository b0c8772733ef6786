//! Cell coordinates and label conversion.
//!
//! Converts between spreadsheet-style labels (e.g., "A1", "C3") and zero-indexed
//! column/row coordinates.
//!
//! The column rule is deliberately not positional base-26: a label's index is
//! the alphabet position of its first letter plus 26 for every extra letter.
//! It agrees with conventional numbering for `A`..`Z` and `AA`..`AZ` only, so
//! `"AZ"` is 51 but `"BA"` is 27.
//!
//! # Examples
//!
//! ```ignore
//! let cell = CellRef::from_label("B3").unwrap();
//! assert_eq!(cell.col, 1);  // 0-indexed
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Number of letters usable in a column label.
pub const ALPHABET_LEN: usize = 26;

/// A reference to a cell by column and row indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a cell label such as "A1" or "AA10".
    /// Returns None if the label is malformed or the row is 0.
    pub fn from_label(label: &str) -> Option<CellRef> {
        let (letters, digits) = split_label(label)?;
        let col = column_index_from_label(letters)?;
        let row = row_index_from_label(digits)?;
        Some(CellRef::new(col, row))
    }

    /// Move this cell by a column/row offset, failing on overflow.
    pub fn offset(&self, dx: usize, dy: usize) -> Option<CellRef> {
        Some(CellRef::new(
            self.col.checked_add(dx)?,
            self.row.checked_add(dy)?,
        ))
    }
}

/// Split a cell label into its column letters and row digits.
pub fn split_label(label: &str) -> Option<(&str, &str)> {
    let caps = label_re().captures(label)?;
    let letters = caps.name("letters")?.as_str();
    let digits = caps.name("digits")?.as_str();
    Some((letters, digits))
}

fn label_re() -> &'static Regex {
    static LABEL_RE: OnceLock<Regex> = OnceLock::new();
    LABEL_RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Z]+)(?<digits>[0-9]+)$")
            .expect("cell label regex must compile")
    })
}

/// Column index for an uppercase label: first letter's alphabet position
/// plus 26 per additional letter.
pub fn column_index_from_label(label: &str) -> Option<usize> {
    let first = *label.as_bytes().first()?;
    if !label.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }
    let extra = label.len() - 1;
    ALPHABET_LEN
        .checked_mul(extra)?
        .checked_add((first - b'A') as usize)
}

/// Zero-based row index for a 1-based decimal row number.
pub fn row_index_from_label(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<usize>().ok()?.checked_sub(1)
}

/// Canonical label for a column index under the column rule:
/// the letter for `index % 26` followed by `index / 26` letters `A`.
pub fn column_label(index: usize) -> String {
    let first = (b'A' + (index % ALPHABET_LEN) as u8) as char;
    let mut label = String::with_capacity(1 + index / ALPHABET_LEN);
    label.push(first);
    for _ in 0..index / ALPHABET_LEN {
        label.push('A');
    }
    label
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_label(self.col), self.row + 1)
    }
}
