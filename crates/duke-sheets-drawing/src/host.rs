//! Collaborators the drawing layer needs from the workbook
//!
//! The traits are implemented for [`Workbook`]; alternative models only need
//! to provide the same narrow surface.

use duke_sheets_core::{Workbook, MAX_COLS, MAX_ROWS};

use crate::error::DrawingResult;

/// Sheet-level bookkeeping needed to attach a drawing part
pub trait WorksheetAccessor {
    /// Package part path of the sheet XML (e.g. `xl/worksheets/sheet1.xml`)
    fn sheet_part(&self, sheet: &str) -> DrawingResult<String>;

    /// Relationship id of the sheet's drawing part, if it already has one
    fn drawing_rel_id(&self, sheet: &str) -> DrawingResult<Option<String>>;

    /// Record the relationship id of the sheet's drawing part
    fn set_drawing_rel_id(&mut self, sheet: &str, rel_id: &str) -> DrawingResult<()>;

    /// Make sure the sheet root declares `prefix` for `uri`
    fn declare_namespace(&mut self, sheet: &str, prefix: &str, uri: &str) -> DrawingResult<()>;
}

/// Source of the font family used for synthesized text
pub trait DefaultFontProvider {
    fn default_font_family(&self) -> DrawingResult<String>;
}

/// Placement request in sheet pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRequest {
    /// Anchor cell column (0-based)
    pub col: u32,
    /// Anchor cell row (0-based)
    pub row: u32,
    /// Offset from the anchor cell's left edge
    pub offset_x: u32,
    /// Offset from the anchor cell's top edge
    pub offset_y: u32,
    /// Object width
    pub width: u32,
    /// Object height
    pub height: u32,
}

/// Cells and in-cell pixel offsets covered by an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSpan {
    pub start_col: u32,
    pub start_row: u32,
    pub start_x: u32,
    pub start_y: u32,
    pub end_col: u32,
    pub end_row: u32,
    pub end_x: u32,
    pub end_y: u32,
}

/// Maps pixel extents onto a sheet's column widths and row heights
pub trait PixelGeometry {
    fn resolve_span(&self, sheet: &str, request: PixelRequest) -> DrawingResult<PixelSpan>;
}

/// Everything [`DrawingComposer`](crate::DrawingComposer) needs from a workbook
pub trait DrawingHost: WorksheetAccessor + PixelGeometry + DefaultFontProvider {}

impl<T: WorksheetAccessor + PixelGeometry + DefaultFontProvider + ?Sized> DrawingHost for T {}

/// Walk a span over cells of varying size.
///
/// Starting at `request`, the start corner moves forward while its offset
/// covers a whole cell, then the end corner advances while the remaining
/// extent covers the next cell. Zero-sized (hidden) cells are stepped over.
pub fn span_from_metrics(
    request: PixelRequest,
    col_width: impl Fn(u32) -> u32,
    row_height: impl Fn(u32) -> u32,
) -> PixelSpan {
    let max_col = MAX_COLS as u32 - 1;
    let max_row = MAX_ROWS - 1;

    let (start_col, start_x) = advance(request.col, request.offset_x, max_col, &col_width);
    let (start_row, start_y) = advance(request.row, request.offset_y, max_row, &row_height);
    let (end_col, end_x) = advance(
        start_col,
        start_x.saturating_add(request.width),
        max_col,
        &col_width,
    );
    let (end_row, end_y) = advance(
        start_row,
        start_y.saturating_add(request.height),
        max_row,
        &row_height,
    );

    PixelSpan {
        start_col,
        start_row,
        start_x,
        start_y,
        end_col,
        end_row,
        end_x,
        end_y,
    }
}

fn advance(mut index: u32, mut remaining: u32, limit: u32, size: &impl Fn(u32) -> u32) -> (u32, u32) {
    while index < limit {
        let cell = size(index);
        if remaining < cell {
            break;
        }
        remaining -= cell;
        index += 1;
    }
    (index, remaining)
}

impl WorksheetAccessor for Workbook {
    fn sheet_part(&self, sheet: &str) -> DrawingResult<String> {
        Ok(self.sheet(sheet)?.part_path().to_string())
    }

    fn drawing_rel_id(&self, sheet: &str) -> DrawingResult<Option<String>> {
        Ok(self.sheet(sheet)?.drawing_rel_id().map(str::to_string))
    }

    fn set_drawing_rel_id(&mut self, sheet: &str, rel_id: &str) -> DrawingResult<()> {
        self.sheet_mut(sheet)?.set_drawing_rel_id(rel_id);
        Ok(())
    }

    fn declare_namespace(&mut self, sheet: &str, prefix: &str, uri: &str) -> DrawingResult<()> {
        self.sheet_mut(sheet)?.declare_namespace(prefix, uri);
        Ok(())
    }
}

impl DefaultFontProvider for Workbook {
    fn default_font_family(&self) -> DrawingResult<String> {
        Ok(self.default_font().to_string())
    }
}

impl PixelGeometry for Workbook {
    fn resolve_span(&self, sheet: &str, request: PixelRequest) -> DrawingResult<PixelSpan> {
        let ws = self.sheet(sheet)?;
        Ok(span_from_metrics(
            request,
            |col| u16::try_from(col).map_or(0, |col| ws.column_width_px(col)),
            |row| ws.row_height_px(row),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DrawingError;
    use pretty_assertions::assert_eq;

    fn request(col: u32, row: u32, width: u32, height: u32) -> PixelRequest {
        PixelRequest {
            col,
            row,
            offset_x: 0,
            offset_y: 0,
            width,
            height,
        }
    }

    #[test]
    fn test_uniform_grid() {
        let span = span_from_metrics(request(6, 5, 180, 40), |_| 64, |_| 20);
        assert_eq!(
            span,
            PixelSpan {
                start_col: 6,
                start_row: 5,
                start_x: 0,
                start_y: 0,
                end_col: 8,
                end_row: 7,
                end_x: 52,
                end_y: 0,
            }
        );
    }

    #[test]
    fn test_offset_inside_cell() {
        let mut req = request(0, 0, 100, 10);
        req.offset_x = 10;
        req.offset_y = 5;
        let span = span_from_metrics(req, |_| 64, |_| 20);
        assert_eq!((span.start_col, span.start_x), (0, 10));
        assert_eq!((span.start_row, span.start_y), (0, 5));
        assert_eq!((span.end_col, span.end_x), (1, 46));
        assert_eq!((span.end_row, span.end_y), (0, 15));
    }

    #[test]
    fn test_offset_past_cell_moves_start() {
        let mut req = request(0, 0, 10, 10);
        req.offset_x = 70;
        // anchors take only start_col from this; the offset stays 70 px
        let span = span_from_metrics(req, |_| 64, |_| 20);
        assert_eq!((span.start_col, span.start_x), (1, 6));
        assert_eq!((span.end_col, span.end_x), (1, 16));
    }

    #[test]
    fn test_hidden_cells_are_skipped() {
        let span = span_from_metrics(request(0, 0, 100, 1), |c| if c == 1 { 0 } else { 64 }, |_| 20);
        assert_eq!((span.end_col, span.end_x), (2, 36));
    }

    #[test]
    fn test_span_stops_at_sheet_edge() {
        let span = span_from_metrics(request(16_380, 0, 1_000, 1), |_| 64, |_| 20);
        assert_eq!(span.end_col, 16_383);
        assert_eq!(span.end_x, 1_000 - 3 * 64);
    }

    #[test]
    fn test_workbook_geometry_uses_sheet_metrics() {
        let mut wb = Workbook::new();
        wb.sheet_mut("Sheet1").unwrap().set_column_width(6, 20.0);

        let span = wb.resolve_span("Sheet1", request(6, 5, 180, 40)).unwrap();
        assert_eq!((span.end_col, span.end_x), (7, 34));
        assert_eq!((span.end_row, span.end_y), (7, 0));

        assert!(matches!(
            wb.resolve_span("Missing", request(0, 0, 1, 1)),
            Err(DrawingError::NotFound(_))
        ));
    }

    #[test]
    fn test_workbook_accessor() {
        let mut wb = Workbook::new();
        assert_eq!(wb.drawing_rel_id("Sheet1").unwrap(), None);
        wb.set_drawing_rel_id("Sheet1", "rId3").unwrap();
        assert_eq!(wb.drawing_rel_id("Sheet1").unwrap().as_deref(), Some("rId3"));
        assert_eq!(wb.sheet_part("Sheet1").unwrap(), "xl/worksheets/sheet1.xml");
        assert_eq!(wb.default_font_family().unwrap(), "Calibri");
        assert!(matches!(
            wb.set_drawing_rel_id("Missing", "rId1"),
            Err(DrawingError::NotFound(_))
        ));
    }
}
