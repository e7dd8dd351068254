//! Turn a resolved shape into a two-cell anchor and append it to a drawing part

use duke_sheets_core::CellAddress;
use log::{debug, trace};

use crate::anchor::{AnchorPoint, ClientData, ShapeNode, TextRun, TwoCellAnchor};
use crate::error::{DrawingError, DrawingResult};
use crate::host::{DefaultFontProvider, PixelGeometry, PixelRequest, PixelSpan};
use crate::options::ResolvedShape;
use crate::shape::{RichTextRun, UnderlineStyle};
use crate::store::DrawingDocumentStore;
use crate::style_ref::{
    six_digit_hex, StyleReference, EFFECT_REF_INDEX, FILL_REF_INDEX, LINE_REF_INDEX,
};
use crate::units::{pt_to_emu, px_to_emu, DEFAULT_FONT_SIZE, DEFAULT_LINE_WIDTH};

/// Text used for runs without any text, so the text body is never empty
const PLACEHOLDER_TEXT: &str = " ";

/// Color of the synthesized placeholder run
const PLACEHOLDER_COLOR: &str = "000000";

/// Append `shape`, anchored at `cell` of `sheet`, to the drawing part at `part_path`.
///
/// Returns the `cNvPr` id given to the new shape. The store is written only
/// once everything else has succeeded.
pub fn add_anchor<S, H>(
    store: &S,
    host: &H,
    sheet: &str,
    part_path: &str,
    cell: &str,
    shape: &ResolvedShape,
) -> DrawingResult<u32>
where
    S: DrawingDocumentStore + ?Sized,
    H: PixelGeometry + DefaultFontProvider + ?Sized,
{
    let addr = CellAddress::parse(cell)?;
    let (width, height) = shape.scaled_size();
    let request = PixelRequest {
        col: u32::from(addr.col),
        row: addr.row,
        offset_x: shape.offset_x,
        offset_y: shape.offset_y,
        width,
        height,
    };
    let span = host.resolve_span(sheet, request)?;
    trace!("{}!{} {}x{}px spans {:?}", sheet, cell, width, height, span);
    check_span(&span)?;

    let default_font = host.default_font_family()?;

    let mut document = store.load(part_path)?;
    let id = document.next_shape_id();
    document.push_anchor(build_anchor(id, &span, shape, Some(default_font.as_str())));
    store.store(part_path, document);

    debug!("added shape {} to {} at {}!{}", id, part_path, sheet, cell);
    Ok(id)
}

fn check_span(span: &PixelSpan) -> DrawingResult<()> {
    if (span.end_col, span.end_x) < (span.start_col, span.start_x)
        || (span.end_row, span.end_y) < (span.start_row, span.start_y)
    {
        return Err(DrawingError::Upstream(format!(
            "geometry ends before it starts: {:?}",
            span
        )));
    }
    Ok(())
}

/// Build the anchor for a shape with the given id and cell span.
///
/// The start corner takes its cell from `span` and its offset from the
/// shape's own offset, even when that offset is wider than the cell.
/// `default_font` is only used when the shape has no paragraphs.
pub fn build_anchor(
    id: u32,
    span: &PixelSpan,
    shape: &ResolvedShape,
    default_font: Option<&str>,
) -> TwoCellAnchor {
    let runs = if shape.paragraphs.is_empty() {
        vec![placeholder_run(default_font.unwrap_or_default())]
    } else {
        shape.paragraphs.iter().map(text_run).collect()
    };

    let line_width = (shape.line_width != DEFAULT_LINE_WIDTH).then(|| pt_to_emu(shape.line_width));

    TwoCellAnchor {
        edit_as: shape.positioning,
        from: AnchorPoint {
            col: span.start_col,
            col_off: px_to_emu(shape.offset_x),
            row: span.start_row,
            row_off: px_to_emu(shape.offset_y),
        },
        to: AnchorPoint {
            col: span.end_col,
            col_off: px_to_emu(span.end_x),
            row: span.end_row,
            row_off: px_to_emu(span.end_y),
        },
        shape: ShapeNode {
            id,
            name: format!("Shape {}", id),
            macro_name: shape.macro_name.clone(),
            preset: shape.preset.clone(),
            line_width,
            line_ref: StyleReference::new(&shape.line_color, LINE_REF_INDEX),
            fill_ref: StyleReference::new(shape.solid_fill_color(), FILL_REF_INDEX),
            effect_ref: StyleReference::new("", EFFECT_REF_INDEX),
            runs,
        },
        client_data: ClientData {
            locks_with_sheet: shape.locked,
            prints_with_sheet: shape.print_object,
        },
    }
}

fn text_run(paragraph: &RichTextRun) -> TextRun {
    let text = if paragraph.text.is_empty() {
        PLACEHOLDER_TEXT.to_string()
    } else {
        paragraph.text.clone()
    };
    let font = paragraph.font.clone().unwrap_or_default();

    TextRun {
        text,
        bold: font.bold,
        italic: font.italic,
        underline: UnderlineStyle::from_name(&font.underline),
        size: font_size(font.size),
        typeface: font.family,
        solid_fill: six_digit_hex(&font.color),
    }
}

fn placeholder_run(family: &str) -> TextRun {
    TextRun {
        text: PLACEHOLDER_TEXT.to_string(),
        bold: false,
        italic: false,
        underline: UnderlineStyle::None,
        size: font_size(DEFAULT_FONT_SIZE),
        typeface: family.to_string(),
        solid_fill: Some(PLACEHOLDER_COLOR.to_string()),
    }
}

/// Points to hundredths of a point; non-positive sizes are left to the theme
fn font_size(points: f64) -> Option<u32> {
    (points.is_finite() && points > 0.0).then(|| (points * 100.0).round() as u32)
}
