//! Error types for duke-sheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in duke-sheets-core
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u32, u16),

    /// Sheet not found by name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// Invalid default font family
    #[error("Invalid font family: {0:?}")]
    InvalidFontFamily(String),
}

impl Error {
    /// Whether this error describes a malformed cell reference
    pub fn is_reference_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidAddress(_) | Error::RowOutOfBounds(..) | Error::ColumnOutOfBounds(..)
        )
    }
}
