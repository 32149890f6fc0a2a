//! Cell identifiers
//!
//! A [`CellKey`] can be built from an A1-style reference or from a zero-based
//! coordinate pair. Both paths produce the same `(column, row)` representation,
//! so `"A1"` and `(0, 0)` are the same key for any map or set.

use crate::error::{CellKeyError, Result};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

static REFERENCE_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Identifier of a single spreadsheet cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    column: u32,
    row: u32,
}

impl CellKey {
    /// Parse an A1-style reference such as `"A1"`, `"ab5"` or `"CZ55"`
    ///
    /// Letters are a bijective base-26 column number (A=1 .. Z=26, AA=27) and
    /// the digits a 1-based row number; both are stored zero-based.
    ///
    /// # Examples
    /// ```
    /// use sheetio_core::CellKey;
    ///
    /// let key = CellKey::from_reference("CZ55").unwrap();
    /// assert_eq!(key.column(), 103);
    /// assert_eq!(key.row(), 54);
    /// ```
    pub fn from_reference(text: &str) -> Result<Self> {
        let invalid = || CellKeyError::InvalidReference(text.to_string());

        let pattern = REFERENCE_PATTERN
            .get_or_init(|| Regex::new(r"^([A-Za-z]+)([0-9]+)$").unwrap());
        let captures = pattern.captures(text).ok_or_else(invalid)?;

        let column = letters_to_column(&captures[1]).ok_or_else(invalid)?;
        let row: u32 = captures[2].parse().map_err(|_| invalid())?;
        if row == 0 {
            return Err(invalid());
        }

        Ok(Self {
            column,
            row: row - 1,
        })
    }

    /// Build a key from an already zero-based `(column, row)` pair
    pub fn from_coordinate(column: i64, row: i64) -> Result<Self> {
        match (u32::try_from(column), u32::try_from(row)) {
            (Ok(column), Ok(row)) => Ok(Self { column, row }),
            _ => Err(CellKeyError::InvalidCoordinate { column, row }),
        }
    }

    /// Zero-based column index (A = 0)
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Canonical upper-case reference (e.g. `"CZ55"`)
    pub fn to_reference(&self) -> String {
        format!("{}{}", column_to_letters(self.column), self.row as u64 + 1)
    }
}

/// Decode a letter run as a bijective base-26 numeral, returning the
/// zero-based column, or `None` on overflow.
fn letters_to_column(letters: &str) -> Option<u32> {
    let mut col: u32 = 0;
    for c in letters.bytes() {
        let digit = (c.to_ascii_uppercase() - b'A') as u32 + 1;
        col = col.checked_mul(26)?.checked_add(digit)?;
    }
    col.checked_sub(1)
}

/// Convert column index to letters (0 -> A, 25 -> Z, 26 -> AA)
fn column_to_letters(col: u32) -> String {
    let mut result = String::new();
    let mut n = col as u64 + 1;

    while n > 0 {
        n -= 1;
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        n /= 26;
    }

    result
}

impl FromStr for CellKey {
    type Err = CellKeyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_reference(s)
    }
}

impl TryFrom<(i64, i64)> for CellKey {
    type Error = CellKeyError;

    fn try_from((column, row): (i64, i64)) -> Result<Self> {
        Self::from_coordinate(column, row)
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_reference())
    }
}

impl PartialOrd for CellKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Row-major order, matching how a sheet is read top to bottom
impl Ord for CellKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row
            .cmp(&other.row)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl Serialize for CellKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_reference())
    }
}

impl<'de> Deserialize<'de> for CellKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_reference(&text).map_err(serde::de::Error::custom)
    }
}
