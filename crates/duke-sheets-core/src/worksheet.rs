//! Worksheet type

use std::collections::{BTreeMap, BTreeSet};

use crate::{DEFAULT_COLUMN_WIDTH_PX, DEFAULT_ROW_HEIGHT_PX};

/// Namespace URI for officeDocument relationships (`r:` prefix)
pub const RELATIONSHIP_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// A worksheet (single sheet in a workbook)
///
/// Only the parts of a sheet that drawing placement depends on are modelled:
/// column and row metrics, the package part the sheet is stored in, the
/// relationship id of its drawing part and the namespaces declared on its root.
#[derive(Debug, Clone)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Package part path (e.g. `xl/worksheets/sheet1.xml`)
    part_path: String,
    /// Custom column widths in characters
    column_widths: BTreeMap<u16, f64>,
    /// Custom row heights in points
    row_heights: BTreeMap<u32, f64>,
    hidden_columns: BTreeSet<u16>,
    hidden_rows: BTreeSet<u32>,
    /// Relationship id of the `<drawing r:id="..."/>` element, if any
    drawing_rel_id: Option<String>,
    /// Namespace declarations on the `<worksheet>` root (prefix -> URI)
    namespaces: BTreeMap<String, String>,
}

impl Worksheet {
    /// Create a new worksheet stored at the given part path
    pub fn new<S: Into<String>, P: Into<String>>(name: S, part_path: P) -> Self {
        Self {
            name: name.into(),
            part_path: part_path.into(),
            column_widths: BTreeMap::new(),
            row_heights: BTreeMap::new(),
            hidden_columns: BTreeSet::new(),
            hidden_rows: BTreeSet::new(),
            drawing_rel_id: None,
            namespaces: BTreeMap::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the package part path of the sheet XML
    pub fn part_path(&self) -> &str {
        &self.part_path
    }

    // === Column / Row Metrics ===

    /// Custom width of a column in characters, if one was set
    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    /// Set a column width in characters
    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.column_widths.insert(col, width.max(0.0));
    }

    /// Custom height of a row in points, if one was set
    pub fn row_height(&self, row: u32) -> Option<f64> {
        self.row_heights.get(&row).copied()
    }

    /// Set a row height in points
    pub fn set_row_height(&mut self, row: u32, height: f64) {
        self.row_heights.insert(row, height.max(0.0));
    }

    /// Hide or unhide a column
    pub fn set_column_hidden(&mut self, col: u16, hidden: bool) {
        if hidden {
            self.hidden_columns.insert(col);
        } else {
            self.hidden_columns.remove(&col);
        }
    }

    /// Hide or unhide a row
    pub fn set_row_hidden(&mut self, row: u32, hidden: bool) {
        if hidden {
            self.hidden_rows.insert(row);
        } else {
            self.hidden_rows.remove(&row);
        }
    }

    /// Rendered width of a column in pixels
    ///
    /// Hidden columns are 0 px wide. Custom widths are converted from
    /// characters using the 7 px maximum digit width of the default font
    /// plus 5 px of cell padding.
    pub fn column_width_px(&self, col: u16) -> u32 {
        if self.hidden_columns.contains(&col) {
            return 0;
        }
        match self.column_widths.get(&col) {
            Some(&width) => column_chars_to_px(width),
            None => DEFAULT_COLUMN_WIDTH_PX,
        }
    }

    /// Rendered height of a row in pixels
    pub fn row_height_px(&self, row: u32) -> u32 {
        if self.hidden_rows.contains(&row) {
            return 0;
        }
        match self.row_heights.get(&row) {
            Some(&height) => (height * 4.0 / 3.0).ceil() as u32,
            None => DEFAULT_ROW_HEIGHT_PX,
        }
    }

    // === Drawing Reference ===

    /// Relationship id of the sheet's drawing part
    pub fn drawing_rel_id(&self) -> Option<&str> {
        self.drawing_rel_id.as_deref()
    }

    /// Point the sheet at a drawing part through a relationship id
    pub fn set_drawing_rel_id<S: Into<String>>(&mut self, rel_id: S) {
        self.drawing_rel_id = Some(rel_id.into());
    }

    /// Namespaces declared on the worksheet root
    pub fn namespaces(&self) -> &BTreeMap<String, String> {
        &self.namespaces
    }

    /// Declare a namespace on the worksheet root.
    ///
    /// Returns `false` if the prefix was already bound (the existing binding is kept).
    pub fn declare_namespace<P: Into<String>, U: Into<String>>(&mut self, prefix: P, uri: U) -> bool {
        let prefix = prefix.into();
        if self.namespaces.contains_key(&prefix) {
            return false;
        }
        self.namespaces.insert(prefix, uri.into());
        true
    }
}

fn column_chars_to_px(width: f64) -> u32 {
    const MAX_DIGIT_WIDTH: f64 = 7.0;
    const PADDING: f64 = 5.0;

    if width <= 0.0 {
        0
    } else if width < 1.0 {
        (width * 12.0 + 0.5).ceil() as u32
    } else {
        (width * MAX_DIGIT_WIDTH + 0.5 + PADDING).ceil() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_metrics() {
        let sheet = Worksheet::new("Sheet1", "xl/worksheets/sheet1.xml");
        assert_eq!(sheet.column_width_px(0), 64);
        assert_eq!(sheet.column_width_px(16383), 64);
        assert_eq!(sheet.row_height_px(0), 20);
    }

    #[test]
    fn test_custom_metrics() {
        let mut sheet = Worksheet::new("Sheet1", "xl/worksheets/sheet1.xml");
        sheet.set_column_width(2, 20.0);
        sheet.set_column_width(3, 0.5);
        sheet.set_row_height(4, 30.0);

        assert_eq!(sheet.column_width(2), Some(20.0));
        assert_eq!(sheet.column_width_px(2), 146);
        assert_eq!(sheet.column_width_px(3), 7);
        assert_eq!(sheet.row_height_px(4), 40);
        assert_eq!(sheet.row_height(5), None);
    }

    #[test]
    fn test_hidden_metrics() {
        let mut sheet = Worksheet::new("Sheet1", "xl/worksheets/sheet1.xml");
        sheet.set_column_hidden(1, true);
        sheet.set_row_hidden(1, true);
        assert_eq!(sheet.column_width_px(1), 0);
        assert_eq!(sheet.row_height_px(1), 0);

        sheet.set_column_hidden(1, false);
        assert_eq!(sheet.column_width_px(1), 64);
    }

    #[test]
    fn test_declare_namespace_once() {
        let mut sheet = Worksheet::new("Sheet1", "xl/worksheets/sheet1.xml");
        assert!(sheet.declare_namespace("r", RELATIONSHIP_NS));
        assert!(!sheet.declare_namespace("r", "urn:other"));
        assert_eq!(sheet.namespaces().get("r").map(String::as_str), Some(RELATIONSHIP_NS));
    }
}
