//! Prelude module - common imports for duke-sheets users
//!
//! ```rust
//! use duke_sheets::prelude::*;
//! ```

pub use crate::{
    CellAddress,
    // Drawing types
    DrawingComposer,
    DrawingDocumentStore,
    // Error types
    DrawingError,
    DrawingResult,
    Error,
    Positioning,
    Result,

    // Shape description types
    RichTextRun,
    RunFont,
    ShapeDescription,
    ShapeFill,
    ShapeFormat,
    ShapeLine,
    UnderlineStyle,

    // Main types
    Workbook,
    Worksheet,
};
