//! # duke-sheets-core
//!
//! Workbook model used by the duke-sheets drawing layer.
//!
//! This crate provides the types the drawing code reads and mutates:
//! - [`CellAddress`] - A1-style cell reference parsing
//! - [`Worksheet`] - column widths, row heights and the sheet's drawing reference
//! - [`Workbook`] - the ordered sheet collection and the workbook default font
//!
//! ## Example
//!
//! ```rust
//! use duke_sheets_core::{CellAddress, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_by_name_mut("Sheet1").unwrap();
//! sheet.set_column_width(6, 20.0);
//!
//! let addr = CellAddress::parse("G6").unwrap();
//! assert_eq!((addr.col, addr.row), (6, 5));
//! assert_eq!(sheet.column_width_px(addr.col), 146);
//! ```

pub mod cell;
pub mod error;
pub mod workbook;
pub mod worksheet;

pub use cell::CellAddress;
pub use error::{Error, Result};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Width in pixels of a column without a custom width
pub const DEFAULT_COLUMN_WIDTH_PX: u32 = 64;

/// Height in pixels of a row without a custom height
pub const DEFAULT_ROW_HEIGHT_PX: u32 = 20;

/// Font family used for synthesized text when nothing else is configured
pub const DEFAULT_FONT_FAMILY: &str = "Calibri";
