//! Drawing error types

use thiserror::Error;

/// Result type for drawing operations
pub type DrawingResult<T> = std::result::Result<T, DrawingError>;

/// Errors that can occur while attaching shapes to a drawing part
#[derive(Debug, Error)]
pub enum DrawingError {
    /// Missing or out-of-range shape description
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed cell reference
    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),

    /// Unknown sheet
    #[error("Sheet not found: {0}")]
    NotFound(String),

    /// Malformed pre-existing drawing part
    #[error("Drawing part parse error: {0}")]
    Parse(String),

    /// XML error while reading a drawing part
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Failure reported by a collaborator (font, geometry, relationships)
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl DrawingError {
    /// Whether the failure came from malformed drawing-part bytes
    pub fn is_parse_error(&self) -> bool {
        matches!(self, DrawingError::Parse(_) | DrawingError::Xml(_))
    }
}

impl From<duke_sheets_core::Error> for DrawingError {
    fn from(err: duke_sheets_core::Error) -> Self {
        match err {
            duke_sheets_core::Error::SheetNotFound(name) => DrawingError::NotFound(name),
            err if err.is_reference_error() => DrawingError::InvalidReference(err.to_string()),
            err => DrawingError::Upstream(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let err: DrawingError = duke_sheets_core::Error::SheetNotFound("Data".into()).into();
        assert!(matches!(err, DrawingError::NotFound(ref name) if name == "Data"));

        let err: DrawingError = duke_sheets_core::Error::InvalidAddress("A0".into()).into();
        assert!(matches!(err, DrawingError::InvalidReference(_)));

        let err: DrawingError = duke_sheets_core::Error::RowOutOfBounds(5, 4).into();
        assert!(matches!(err, DrawingError::InvalidReference(_)));

        let err: DrawingError = duke_sheets_core::Error::InvalidFontFamily(String::new()).into();
        assert!(matches!(err, DrawingError::Upstream(_)));
    }
}
