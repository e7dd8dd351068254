//! Drawing units and shape defaults

/// English Metric Units per screen pixel (96 dpi)
pub const EMU_PER_PIXEL: i64 = 9525;

/// English Metric Units per typographic point
pub const EMU_PER_POINT: i64 = 12700;

/// Width and height, in pixels, of a shape that does not set one
pub const DEFAULT_SHAPE_SIZE: u32 = 160;

/// Scale factor applied when a shape does not set one
pub const DEFAULT_SCALE: f64 = 1.0;

/// Outline width, in points, when a shape does not set one
pub const DEFAULT_LINE_WIDTH: f64 = 1.0;

/// Point size of the placeholder run synthesized for shapes without text
pub const DEFAULT_FONT_SIZE: f64 = 11.0;

/// Convert pixels to EMUs
pub fn px_to_emu(px: u32) -> i64 {
    px as i64 * EMU_PER_PIXEL
}

/// Convert points to EMUs, rounding to the nearest unit
pub fn pt_to_emu(pt: f64) -> i64 {
    (pt * EMU_PER_POINT as f64).round() as i64
}
