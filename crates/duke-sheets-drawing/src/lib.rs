//! # duke-sheets-drawing
//!
//! DrawingML text-box shapes for duke-sheets worksheets.
//!
//! This crate provides:
//! - [`ShapeDescription`] - caller-facing shape, line, fill and rich-text options
//! - [`DrawingComposer`] - attaches shapes to sheets, creating drawing parts as needed
//! - [`DrawingDocument`] - a drawing part that keeps pre-existing anchors verbatim
//! - [`Drawings`] - thread-safe cache of drawing parts keyed by package path
//! - [`Relationships`] / [`ContentTypes`] - the package bookkeeping a new part needs
//!
//! Cell geometry, sheet lookup and the default font come from the workbook
//! through the traits in [`host`].
//!
//! ## Example
//!
//! ```rust
//! use duke_sheets_core::Workbook;
//! use duke_sheets_drawing::{DrawingComposer, RichTextRun, RunFont, ShapeDescription};
//!
//! let mut workbook = Workbook::new();
//! let mut composer = DrawingComposer::new();
//!
//! let shape = ShapeDescription::new("rect")
//!     .with_size(180, 40)
//!     .with_paragraph(
//!         RichTextRun::new("Rectangle Shape")
//!             .with_font(RunFont::new("Times New Roman", 18.0).with_bold(true)),
//!     );
//! let id = composer.add_shape(&mut workbook, "Sheet1", "G6", &shape).unwrap();
//! assert_eq!(id, 1);
//!
//! let xml = composer.drawings().to_bytes("xl/drawings/drawing1.xml").unwrap();
//! assert!(String::from_utf8(xml).unwrap().contains("Rectangle Shape"));
//! ```

pub mod anchor;
pub mod builder;
pub mod composer;
pub mod content_types;
pub mod document;
pub mod error;
pub mod host;
pub mod options;
pub mod relationships;
pub mod shape;
pub mod store;
pub mod style_ref;
pub mod units;

pub use anchor::{AnchorPoint, ClientData, ShapeNode, TextRun, TwoCellAnchor};
pub use builder::{add_anchor, build_anchor};
pub use composer::DrawingComposer;
pub use content_types::{ContentTypes, PartKind, DRAWING_CONTENT_TYPE};
pub use document::{DrawingAnchor, DrawingDocument, PreservedAnchor};
pub use error::{DrawingError, DrawingResult};
pub use host::{
    DefaultFontProvider, DrawingHost, PixelGeometry, PixelRequest, PixelSpan, WorksheetAccessor,
};
pub use options::{resolve_options, ResolvedShape};
pub use relationships::{Relationship, Relationships, REL_TYPE_DRAWING};
pub use shape::{
    Positioning, RichTextRun, RunFont, ShapeDescription, ShapeFill, ShapeFormat, ShapeLine,
    UnderlineStyle,
};
pub use store::{DrawingDocumentStore, Drawings};
pub use style_ref::StyleReference;
