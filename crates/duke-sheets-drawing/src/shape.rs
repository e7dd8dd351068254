//! Shape descriptions supplied by callers

use std::fmt;
use std::str::FromStr;

use crate::error::DrawingError;

/// A preset-geometry text-box shape to place on a worksheet
///
/// Unset numeric fields are filled in by [`resolve_options`](crate::resolve_options);
/// `Some(0)` sizes and scales are treated the same as unset.
///
/// # Example
///
/// ```rust
/// use duke_sheets_drawing::{RichTextRun, RunFont, ShapeDescription, ShapeFill, ShapeLine};
///
/// let shape = ShapeDescription::new("rect")
///     .with_size(180, 40)
///     .with_line(ShapeLine::new("4286F4").with_width(1.2))
///     .with_fill(ShapeFill::solid("8EB9FF"))
///     .with_paragraph(RichTextRun::new("Rectangle Shape").with_font(
///         RunFont::new("Times New Roman", 18.0)
///             .with_bold(true)
///             .with_color("777777")
///             .with_underline("sng"),
///     ));
/// assert_eq!(shape.preset, "rect");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeDescription {
    /// Preset geometry name (`rect`, `ellipse`, `wedgeRectCallout`, ...), forwarded verbatim
    pub preset: String,
    /// Width in pixels
    pub width: Option<u32>,
    /// Height in pixels
    pub height: Option<u32>,
    /// Placement and scaling
    pub format: ShapeFormat,
    /// Outline
    pub line: ShapeLine,
    /// Fill
    pub fill: ShapeFill,
    /// Text runs, one paragraph each
    pub paragraphs: Vec<RichTextRun>,
    /// Macro assigned to the shape
    pub macro_name: String,
}

impl ShapeDescription {
    /// Create a description for the given preset geometry
    pub fn new<S: Into<String>>(preset: S) -> Self {
        Self {
            preset: preset.into(),
            ..Self::default()
        }
    }

    /// Set width and height in pixels
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set placement and scaling
    pub fn with_format(mut self, format: ShapeFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the outline
    pub fn with_line(mut self, line: ShapeLine) -> Self {
        self.line = line;
        self
    }

    /// Set the fill
    pub fn with_fill(mut self, fill: ShapeFill) -> Self {
        self.fill = fill;
        self
    }

    /// Append a text run
    pub fn with_paragraph(mut self, run: RichTextRun) -> Self {
        self.paragraphs.push(run);
        self
    }

    /// Assign a macro
    pub fn with_macro<S: Into<String>>(mut self, macro_name: S) -> Self {
        self.macro_name = macro_name.into();
        self
    }
}

/// Placement of a shape relative to its anchor cell
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeFormat {
    /// Horizontal scale factor
    pub scale_x: Option<f64>,
    /// Vertical scale factor
    pub scale_y: Option<f64>,
    /// Horizontal offset from the anchor cell's top-left corner, in pixels
    pub offset_x: u32,
    /// Vertical offset from the anchor cell's top-left corner, in pixels
    pub offset_y: u32,
    /// How the shape follows cell moves and resizes (`None` = format default)
    pub positioning: Option<Positioning>,
    /// Print the shape with the sheet
    pub print_object: Option<bool>,
    /// Lock the shape when the sheet is protected
    pub locked: Option<bool>,
}

impl ShapeFormat {
    /// Set both scale factors
    pub fn with_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.scale_x = Some(scale_x);
        self.scale_y = Some(scale_y);
        self
    }

    /// Set the offset from the anchor cell
    pub fn with_offset(mut self, offset_x: u32, offset_y: u32) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    /// Set the positioning mode
    pub fn with_positioning(mut self, positioning: Positioning) -> Self {
        self.positioning = Some(positioning);
        self
    }

    /// Set whether the shape is printed
    pub fn with_print_object(mut self, print: bool) -> Self {
        self.print_object = Some(print);
        self
    }

    /// Set whether the shape is locked
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }
}

/// Shape outline
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeLine {
    /// Hex color (`"4286F4"` or `"#4286F4"`); empty = theme color
    pub color: String,
    /// Width in points
    pub width: Option<f64>,
}

impl ShapeLine {
    /// Create an outline with the given color
    pub fn new<S: Into<String>>(color: S) -> Self {
        Self {
            color: color.into(),
            width: None,
        }
    }

    /// Set the outline width in points
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }
}

/// Shape fill
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeFill {
    /// Fill colors; only a single color produces an explicit fill reference
    pub color: Vec<String>,
    /// Pattern id
    pub pattern: u8,
}

impl ShapeFill {
    /// A solid single-color fill
    pub fn solid<S: Into<String>>(color: S) -> Self {
        Self {
            color: vec![color.into()],
            pattern: 1,
        }
    }
}

/// One run of text inside a shape
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RichTextRun {
    /// Run text
    pub text: String,
    /// Font override
    pub font: Option<RunFont>,
}

impl RichTextRun {
    /// Create a run with the given text and no font override
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            font: None,
        }
    }

    /// Set the font override
    pub fn with_font(mut self, font: RunFont) -> Self {
        self.font = Some(font);
        self
    }
}

/// Font settings for a text run
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunFont {
    /// Bold
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Underline style name (see [`UnderlineStyle`]); unsupported names render as `none`
    pub underline: String,
    /// Font family name
    pub family: String,
    /// Size in points
    pub size: f64,
    /// Hex color; anything but six hex digits leaves the run color inherited
    pub color: String,
}

impl RunFont {
    /// Create a font with a family and point size
    pub fn new<S: Into<String>>(family: S, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            ..Self::default()
        }
    }

    /// Set bold
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set italic
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Set the underline style name
    pub fn with_underline<S: Into<String>>(mut self, underline: S) -> Self {
        self.underline = underline.into();
        self
    }

    /// Set the font color
    pub fn with_color<S: Into<String>>(mut self, color: S) -> Self {
        self.color = color.into();
        self
    }
}

/// How an anchored object follows the cells beneath it (`editAs`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Positioning {
    /// Move and size with cells
    TwoCell,
    /// Move with cells but keep size
    OneCell,
    /// Neither move nor size with cells
    Absolute,
}

impl Positioning {
    /// The `editAs` attribute value
    pub fn as_str(&self) -> &'static str {
        match self {
            Positioning::TwoCell => "twoCell",
            Positioning::OneCell => "oneCell",
            Positioning::Absolute => "absolute",
        }
    }
}

impl fmt::Display for Positioning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Positioning {
    type Err = DrawingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "twoCell" => Ok(Positioning::TwoCell),
            "oneCell" => Ok(Positioning::OneCell),
            "absolute" => Ok(Positioning::Absolute),
            other => Err(DrawingError::InvalidArgument(format!(
                "unknown positioning mode '{}'",
                other
            ))),
        }
    }
}

/// Text underline styles supported in shape runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnderlineStyle {
    #[default]
    None,
    Words,
    Single,
    Double,
    Heavy,
    Dotted,
    DottedHeavy,
    Dash,
    DashHeavy,
    DashLong,
    DashLongHeavy,
    DotDash,
    DotDashHeavy,
    DotDotDash,
    DotDotDashHeavy,
    Wavy,
    WavyHeavy,
    WavyDouble,
}

impl UnderlineStyle {
    /// Every supported style, in attribute-value order
    pub const ALL: [UnderlineStyle; 18] = [
        UnderlineStyle::None,
        UnderlineStyle::Words,
        UnderlineStyle::Single,
        UnderlineStyle::Double,
        UnderlineStyle::Heavy,
        UnderlineStyle::Dotted,
        UnderlineStyle::DottedHeavy,
        UnderlineStyle::Dash,
        UnderlineStyle::DashHeavy,
        UnderlineStyle::DashLong,
        UnderlineStyle::DashLongHeavy,
        UnderlineStyle::DotDash,
        UnderlineStyle::DotDashHeavy,
        UnderlineStyle::DotDotDash,
        UnderlineStyle::DotDotDashHeavy,
        UnderlineStyle::Wavy,
        UnderlineStyle::WavyHeavy,
        UnderlineStyle::WavyDouble,
    ];

    /// Look up a style by its attribute value; unknown names map to [`UnderlineStyle::None`]
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == name)
            .unwrap_or_default()
    }

    /// The `u` attribute value
    pub fn as_str(&self) -> &'static str {
        match self {
            UnderlineStyle::None => "none",
            UnderlineStyle::Words => "words",
            UnderlineStyle::Single => "sng",
            UnderlineStyle::Double => "dbl",
            UnderlineStyle::Heavy => "heavy",
            UnderlineStyle::Dotted => "dotted",
            UnderlineStyle::DottedHeavy => "dottedHeavy",
            UnderlineStyle::Dash => "dash",
            UnderlineStyle::DashHeavy => "dashHeavy",
            UnderlineStyle::DashLong => "dashLong",
            UnderlineStyle::DashLongHeavy => "dashLongHeavy",
            UnderlineStyle::DotDash => "dotDash",
            UnderlineStyle::DotDashHeavy => "dotDashHeavy",
            UnderlineStyle::DotDotDash => "dotDotDash",
            UnderlineStyle::DotDotDashHeavy => "dotDotDashHeavy",
            UnderlineStyle::Wavy => "wavy",
            UnderlineStyle::WavyHeavy => "wavyHeavy",
            UnderlineStyle::WavyDouble => "wavyDbl",
        }
    }
}
