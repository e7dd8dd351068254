//! Two-cell anchors and the text-box shapes they carry

use quick_xml::escape::escape;

use crate::shape::{Positioning, UnderlineStyle};
use crate::style_ref::StyleReference;

/// One corner of an anchor: a cell plus an offset inside it, in EMUs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnchorPoint {
    pub col: u32,
    pub col_off: i64,
    pub row: u32,
    pub row_off: i64,
}

impl AnchorPoint {
    fn write_xml(&self, out: &mut String, tag: &str) {
        out.push_str(&format!(
            "<xdr:{tag}><xdr:col>{}</xdr:col><xdr:colOff>{}</xdr:colOff><xdr:row>{}</xdr:row><xdr:rowOff>{}</xdr:rowOff></xdr:{tag}>",
            self.col, self.col_off, self.row, self.row_off
        ));
    }
}

/// `xdr:clientData` flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientData {
    pub locks_with_sheet: bool,
    pub prints_with_sheet: bool,
}

/// A single `a:r` run inside the shape's text body
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: UnderlineStyle,
    /// Size in hundredths of a point
    pub size: Option<u32>,
    pub typeface: String,
    /// Normalized six-digit sRGB color
    pub solid_fill: Option<String>,
}

/// The `xdr:sp` payload of an anchor
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeNode {
    pub id: u32,
    pub name: String,
    pub macro_name: String,
    pub preset: String,
    /// Explicit outline width in EMUs, omitted for the 1pt default
    pub line_width: Option<i64>,
    pub line_ref: StyleReference,
    pub fill_ref: StyleReference,
    pub effect_ref: StyleReference,
    pub runs: Vec<TextRun>,
}

/// A `xdr:twoCellAnchor` holding one shape
#[derive(Debug, Clone, PartialEq)]
pub struct TwoCellAnchor {
    pub edit_as: Option<Positioning>,
    pub from: AnchorPoint,
    pub to: AnchorPoint,
    pub shape: ShapeNode,
    pub client_data: ClientData,
}

impl TwoCellAnchor {
    /// Serialize the anchor as a child of `xdr:wsDr`
    pub fn write_xml(&self, out: &mut String) {
        out.push_str("<xdr:twoCellAnchor");
        if let Some(edit_as) = self.edit_as {
            out.push_str(&format!(r#" editAs="{}""#, edit_as.as_str()));
        }
        out.push('>');
        self.from.write_xml(out, "from");
        self.to.write_xml(out, "to");
        self.shape.write_xml(out);
        out.push_str(&format!(
            r#"<xdr:clientData fLocksWithSheet="{}" fPrintsWithSheet="{}"/>"#,
            xml_bool(self.client_data.locks_with_sheet),
            xml_bool(self.client_data.prints_with_sheet)
        ));
        out.push_str("</xdr:twoCellAnchor>");
    }

    /// Serialize the anchor into a new string
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_xml(&mut out);
        out
    }
}

impl ShapeNode {
    fn write_xml(&self, out: &mut String) {
        out.push_str(&format!(
            r#"<xdr:sp macro="{}" textlink=""><xdr:nvSpPr><xdr:cNvPr id="{}" name="{}"/><xdr:cNvSpPr txBox="1"/></xdr:nvSpPr>"#,
            escape(self.macro_name.as_str()),
            self.id,
            escape(self.name.as_str())
        ));

        out.push_str(&format!(
            r#"<xdr:spPr><a:prstGeom prst="{}"><a:avLst/></a:prstGeom>"#,
            escape(self.preset.as_str())
        ));
        if let Some(w) = self.line_width {
            out.push_str(&format!(r#"<a:ln w="{}"/>"#, w));
        }
        out.push_str("</xdr:spPr>");

        out.push_str("<xdr:style>");
        self.line_ref.write_xml(out, "lnRef");
        self.fill_ref.write_xml(out, "fillRef");
        self.effect_ref.write_xml(out, "effectRef");
        out.push_str(r#"<a:fontRef idx="minor"><a:schemeClr val="tx1"/></a:fontRef>"#);
        out.push_str("</xdr:style>");

        out.push_str(
            r#"<xdr:txBody><a:bodyPr vertOverflow="clip" horzOverflow="clip" wrap="none" rtlCol="0" anchor="t"/><a:lstStyle/>"#,
        );
        for run in &self.runs {
            run.write_xml(out);
        }
        out.push_str("</xdr:txBody></xdr:sp>");
    }
}

impl TextRun {
    fn write_xml(&self, out: &mut String) {
        out.push_str(r#"<a:p><a:r><a:rPr lang="en-US" altLang="en-US""#);
        if let Some(size) = self.size {
            out.push_str(&format!(r#" sz="{}""#, size));
        }
        out.push_str(&format!(
            r#" b="{}" i="{}" u="{}">"#,
            xml_bool(self.bold),
            xml_bool(self.italic),
            self.underline.as_str()
        ));
        if let Some(rgb) = &self.solid_fill {
            out.push_str(&format!(
                r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
                rgb
            ));
        }
        if !self.typeface.is_empty() {
            out.push_str(&format!(
                r#"<a:latin typeface="{}"/>"#,
                escape(self.typeface.as_str())
            ));
        }
        out.push_str(&format!(
            r#"</a:rPr><a:t>{}</a:t></a:r><a:endParaRPr lang="en-US"/></a:p>"#,
            escape(self.text.as_str())
        ));
    }
}

fn xml_bool(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}
