//! Shape option defaulting

use crate::error::{DrawingError, DrawingResult};
use crate::shape::{Positioning, RichTextRun, ShapeDescription, ShapeFill};
use crate::units::{DEFAULT_LINE_WIDTH, DEFAULT_SCALE, DEFAULT_SHAPE_SIZE};

/// A shape description with every optional field filled in
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedShape {
    pub preset: String,
    pub width: u32,
    pub height: u32,
    pub scale_x: f64,
    pub scale_y: f64,
    pub offset_x: u32,
    pub offset_y: u32,
    pub positioning: Option<Positioning>,
    pub print_object: bool,
    pub locked: bool,
    pub line_color: String,
    pub line_width: f64,
    pub fill: ShapeFill,
    pub paragraphs: Vec<RichTextRun>,
    pub macro_name: String,
}

impl ResolvedShape {
    /// Width and height after scaling, truncated to whole pixels
    pub fn scaled_size(&self) -> (u32, u32) {
        (
            (self.width as f64 * self.scale_x) as u32,
            (self.height as f64 * self.scale_y) as u32,
        )
    }

    /// The single explicit fill color, if exactly one was given
    pub fn solid_fill_color(&self) -> &str {
        match self.fill.color.as_slice() {
            [color] => color,
            _ => "",
        }
    }
}

/// Fill unset fields of a shape description with defaults.
///
/// Fails with [`DrawingError::InvalidArgument`] when no description is given
/// or a scale factor is negative or not finite.
pub fn resolve_options(shape: Option<&ShapeDescription>) -> DrawingResult<ResolvedShape> {
    let shape = shape.ok_or_else(|| {
        DrawingError::InvalidArgument("shape description is required".into())
    })?;
    let format = &shape.format;

    Ok(ResolvedShape {
        preset: shape.preset.clone(),
        width: non_zero_or(shape.width, DEFAULT_SHAPE_SIZE),
        height: non_zero_or(shape.height, DEFAULT_SHAPE_SIZE),
        scale_x: resolve_scale("scale_x", format.scale_x)?,
        scale_y: resolve_scale("scale_y", format.scale_y)?,
        offset_x: format.offset_x,
        offset_y: format.offset_y,
        positioning: format.positioning,
        print_object: format.print_object.unwrap_or(true),
        locked: format.locked.unwrap_or(false),
        line_color: shape.line.color.clone(),
        line_width: shape.line.width.unwrap_or(DEFAULT_LINE_WIDTH),
        fill: shape.fill.clone(),
        paragraphs: shape.paragraphs.clone(),
        macro_name: shape.macro_name.clone(),
    })
}

fn non_zero_or(value: Option<u32>, default: u32) -> u32 {
    match value {
        Some(v) if v > 0 => v,
        _ => default,
    }
}

fn resolve_scale(field: &str, scale: Option<f64>) -> DrawingResult<f64> {
    match scale {
        None => Ok(DEFAULT_SCALE),
        Some(s) if s == 0.0 => Ok(DEFAULT_SCALE),
        Some(s) if s.is_finite() && s > 0.0 => Ok(s),
        Some(s) => Err(DrawingError::InvalidArgument(format!(
            "{} must be a positive number, got {}",
            field, s
        ))),
    }
}
