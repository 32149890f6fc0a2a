//! Error types for cell key construction

use thiserror::Error;

/// Result type alias using [`CellKeyError`]
pub type Result<T> = std::result::Result<T, CellKeyError>;

/// Validation failures raised while building a [`CellKey`](crate::CellKey)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellKeyError {
    /// Text that is not a letters-then-digits reference, has row 0, or overflows
    #[error("Invalid cell reference: '{0}'")]
    InvalidReference(String),

    /// Negative or out-of-range column/row pair
    #[error("Invalid cell coordinate: column {column}, row {row}")]
    InvalidCoordinate { column: i64, row: i64 },
}
