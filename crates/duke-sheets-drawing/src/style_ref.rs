//! Theme style references (`lnRef`, `fillRef`, `effectRef`)

use quick_xml::escape::escape;

/// Palette index used for outline references
pub const LINE_REF_INDEX: u8 = 2;

/// Palette index used for fill references
pub const FILL_REF_INDEX: u8 = 1;

/// Palette index used for effect references
pub const EFFECT_REF_INDEX: u8 = 0;

/// A pointer into the theme's style matrix, optionally carrying a literal color
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleReference {
    /// No explicit color: theme entry 0 with a black scRGB rendering hint
    Scheme,
    /// Indexed reference carrying a literal sRGB color
    Srgb {
        /// Palette index
        index: u8,
        /// Normalized hex color (upper-case, no `#`)
        rgb: String,
    },
}

impl StyleReference {
    /// Build a reference for `color` at `index`; an empty color yields [`StyleReference::Scheme`].
    ///
    /// The color is normalized but not validated.
    pub fn new(color: &str, index: u8) -> Self {
        if color.is_empty() {
            return StyleReference::Scheme;
        }
        StyleReference::Srgb {
            index,
            rgb: normalize_hex(color),
        }
    }

    /// The `idx` attribute value
    pub fn index(&self) -> u8 {
        match self {
            StyleReference::Scheme => 0,
            StyleReference::Srgb { index, .. } => *index,
        }
    }

    /// Render as `<a:{tag} idx="..">..</a:{tag}>`
    pub fn write_xml(&self, out: &mut String, tag: &str) {
        out.push_str(&format!(r#"<a:{} idx="{}">"#, tag, self.index()));
        match self {
            StyleReference::Scheme => {
                out.push_str(r#"<a:scrgbClr r="0" g="0" b="0"/>"#);
            }
            StyleReference::Srgb { rgb, .. } => {
                out.push_str(&format!(r#"<a:srgbClr val="{}"/>"#, escape(rgb.as_str())));
            }
        }
        out.push_str(&format!("</a:{}>", tag));
    }
}

/// Strip every `#` and upper-case a hex color string
pub fn normalize_hex(color: &str) -> String {
    color.to_uppercase().replace('#', "")
}

/// Normalize `color` and return it only if it is exactly six hex digits
pub fn six_digit_hex(color: &str) -> Option<String> {
    let rgb = normalize_hex(color);
    (rgb.len() == 6 && rgb.bytes().all(|b| b.is_ascii_hexdigit())).then_some(rgb)
}
