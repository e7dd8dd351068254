//! Workbook type - the main document structure

use crate::error::{Error, Result};
use crate::worksheet::Worksheet;
use crate::{DEFAULT_FONT_FAMILY, MAX_SHEET_NAME_LEN};

/// A workbook (spreadsheet document)
///
/// A workbook contains one or more worksheets and the default font used
/// for text that does not name its own family.
#[derive(Debug, Clone)]
pub struct Workbook {
    /// Worksheets in the workbook
    worksheets: Vec<Worksheet>,
    /// Default font family
    default_font: String,
}

impl Workbook {
    /// Create a new empty workbook with one worksheet
    pub fn new() -> Self {
        let mut wb = Self::empty();
        wb.worksheets
            .push(Worksheet::new("Sheet1", "xl/worksheets/sheet1.xml"));
        wb
    }

    /// Create an empty workbook with no worksheets
    pub fn empty() -> Self {
        Self {
            worksheets: Vec::new(),
            default_font: DEFAULT_FONT_FAMILY.to_string(),
        }
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a worksheet by name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name() == name)
    }

    /// Get a mutable worksheet by name
    pub fn worksheet_by_name_mut(&mut self, name: &str) -> Option<&mut Worksheet> {
        self.worksheets.iter_mut().find(|ws| ws.name() == name)
    }

    /// Get a worksheet by name, failing with [`Error::SheetNotFound`]
    pub fn sheet(&self, name: &str) -> Result<&Worksheet> {
        self.worksheet_by_name(name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    /// Get a mutable worksheet by name, failing with [`Error::SheetNotFound`]
    pub fn sheet_mut(&mut self, name: &str) -> Result<&mut Worksheet> {
        self.worksheet_by_name_mut(name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Add a new worksheet with specified name
    ///
    /// The sheet is stored at `xl/worksheets/sheet{N}.xml` where `N` is one
    /// past the highest sheet part number already in use.
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.validate_sheet_name(name)?;

        let part_number = self
            .worksheets
            .iter()
            .filter_map(|ws| sheet_part_number(ws.part_path()))
            .max()
            .unwrap_or(0)
            + 1;

        let index = self.worksheets.len();
        self.worksheets.push(Worksheet::new(
            name,
            format!("xl/worksheets/sheet{}.xml", part_number),
        ));

        Ok(index)
    }

    /// Add an existing worksheet to the workbook
    pub fn add_existing_worksheet(&mut self, worksheet: Worksheet) -> Result<usize> {
        self.validate_sheet_name(worksheet.name())?;
        let index = self.worksheets.len();
        self.worksheets.push(worksheet);
        Ok(index)
    }

    /// Font family used when a text run does not specify one
    pub fn default_font(&self) -> &str {
        &self.default_font
    }

    /// Change the workbook default font family
    pub fn set_default_font(&mut self, family: &str) -> Result<()> {
        let family = family.trim();
        if family.is_empty() {
            return Err(Error::InvalidFontFamily(family.to_string()));
        }
        self.default_font = family.to_string();
        Ok(())
    }

    /// Validate a sheet name
    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name cannot contain '{}'",
                c
            )));
        }

        // Sheet names are case-insensitive
        let name_lower = name.to_lowercase();
        if self
            .worksheets
            .iter()
            .any(|ws| ws.name().to_lowercase() == name_lower)
        {
            return Err(Error::DuplicateSheetName(name.into()));
        }

        Ok(())
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

fn sheet_part_number(path: &str) -> Option<u32> {
    path.strip_prefix("xl/worksheets/sheet")?
        .strip_suffix(".xml")?
        .parse()
        .ok()
}
