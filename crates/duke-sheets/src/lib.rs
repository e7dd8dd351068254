//! # duke-sheets
//!
//! Add DrawingML text-box shapes to spreadsheet worksheets.
//!
//! ## Features
//!
//! - Preset-geometry shapes (`rect`, `ellipse`, callouts, ...) anchored to a cell
//! - Rich-text paragraphs with per-run font, size, color and underline
//! - Outline and fill colors resolved against the theme style matrix
//! - Existing drawing parts (pictures, charts) are extended, never rewritten
//! - Relationship and content-type bookkeeping for new drawing parts
//!
//! ## Example
//!
//! ```rust
//! use duke_sheets::prelude::*;
//!
//! let mut workbook = Workbook::new();
//! let mut composer = DrawingComposer::new();
//!
//! let shape = ShapeDescription::new("rect")
//!     .with_size(180, 40)
//!     .with_format(ShapeFormat::default().with_positioning(Positioning::OneCell))
//!     .with_line(ShapeLine::new("4286F4").with_width(1.2))
//!     .with_fill(ShapeFill::solid("8EB9FF"))
//!     .with_paragraph(
//!         RichTextRun::new("Rectangle Shape").with_font(
//!             RunFont::new("Times New Roman", 18.0)
//!                 .with_bold(true)
//!                 .with_color("777777")
//!                 .with_underline("sng"),
//!         ),
//!     );
//! composer.add_shape(&mut workbook, "Sheet1", "G6", &shape).unwrap();
//!
//! let sheet = workbook.worksheet_by_name("Sheet1").unwrap();
//! assert_eq!(sheet.drawing_rel_id(), Some("rId1"));
//! ```

pub mod prelude;

// Re-export core types
pub use duke_sheets_core::{
    CellAddress,
    // Error types
    Error,
    Result,
    // Main types
    Workbook,
    Worksheet,

    // Constants
    DEFAULT_COLUMN_WIDTH_PX,
    DEFAULT_FONT_FAMILY,
    DEFAULT_ROW_HEIGHT_PX,
    MAX_COLS,
    MAX_ROWS,
    MAX_SHEET_NAME_LEN,
};

// Re-export drawing types
pub use duke_sheets_drawing::{
    // Package bookkeeping
    ContentTypes,
    DefaultFontProvider,
    DrawingAnchor,
    DrawingComposer,
    DrawingDocument,
    DrawingDocumentStore,
    // Error types
    DrawingError,
    DrawingHost,
    DrawingResult,
    Drawings,
    PartKind,
    PixelGeometry,
    // Shape description types
    Positioning,
    Relationship,
    Relationships,
    RichTextRun,
    RunFont,
    ShapeDescription,
    ShapeFill,
    ShapeFormat,
    ShapeLine,
    UnderlineStyle,
    WorksheetAccessor,
    DRAWING_CONTENT_TYPE,
    REL_TYPE_DRAWING,
};

/// Low-level drawing modules (anchors, units, path helpers)
pub use duke_sheets_drawing as drawing;
