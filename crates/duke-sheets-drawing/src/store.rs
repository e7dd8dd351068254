//! Shared, path-keyed cache of drawing parts

use ahash::AHashMap;
use log::trace;
use parking_lot::RwLock;

use crate::document::DrawingDocument;
use crate::error::DrawingResult;

/// Load and store drawing documents by package path
pub trait DrawingDocumentStore {
    /// The document at `path`; a path with no part yields an empty document.
    ///
    /// Loading never changes what the store holds.
    fn load(&self, path: &str) -> DrawingResult<DrawingDocument>;

    /// Replace the document at `path`
    fn store(&self, path: &str, document: DrawingDocument);

    /// Smallest drawing part number greater than every number in use
    fn next_part_index(&self) -> u32;
}

/// Package path of drawing part `index`
pub fn drawing_part_path(index: u32) -> String {
    format!("xl/drawings/drawing{}.xml", index)
}

/// Part number of a `.../drawingN.xml` path
pub fn drawing_part_index(path: &str) -> Option<u32> {
    let file = path.rsplit('/').next()?;
    file.strip_prefix("drawing")?
        .strip_suffix(".xml")?
        .parse()
        .ok()
}

#[derive(Debug, Clone)]
enum DrawingPart {
    /// Bytes from the package, parsed on first use
    Raw(Vec<u8>),
    Parsed(DrawingDocument),
}

/// Drawing parts of one workbook.
///
/// Safe to share between threads; readers of different parts never block
/// each other for longer than a map lookup.
#[derive(Debug, Default)]
pub struct Drawings {
    parts: RwLock<AHashMap<String, DrawingPart>>,
}

impl Drawings {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the raw bytes of an existing drawing part
    pub fn insert_raw<P: Into<String>>(&self, path: P, bytes: Vec<u8>) {
        self.parts.write().insert(path.into(), DrawingPart::Raw(bytes));
    }

    /// Whether a part exists at `path`
    pub fn contains(&self, path: &str) -> bool {
        self.parts.read().contains_key(path)
    }

    /// Paths of all parts, sorted
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.parts.read().keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Number of parts
    pub fn len(&self) -> usize {
        self.parts.read().len()
    }

    /// Whether the cache holds no parts
    pub fn is_empty(&self) -> bool {
        self.parts.read().is_empty()
    }

    /// Serialized bytes of the part at `path`.
    ///
    /// Parts that were never touched are returned exactly as registered.
    pub fn to_bytes(&self, path: &str) -> Option<Vec<u8>> {
        self.parts.read().get(path).map(|part| match part {
            DrawingPart::Raw(bytes) => bytes.clone(),
            DrawingPart::Parsed(doc) => doc.to_xml().into_bytes(),
        })
    }
}

impl DrawingDocumentStore for Drawings {
    fn load(&self, path: &str) -> DrawingResult<DrawingDocument> {
        match self.parts.read().get(path) {
            Some(DrawingPart::Parsed(doc)) => Ok(doc.clone()),
            Some(DrawingPart::Raw(bytes)) => {
                trace!("parsing drawing part {}", path);
                DrawingDocument::parse(bytes)
            }
            None => Ok(DrawingDocument::new()),
        }
    }

    fn store(&self, path: &str, document: DrawingDocument) {
        self.parts
            .write()
            .insert(path.to_string(), DrawingPart::Parsed(document));
    }

    fn next_part_index(&self) -> u32 {
        self.parts
            .read()
            .keys()
            .filter_map(|path| drawing_part_index(path))
            .max()
            .unwrap_or(0)
            + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DrawingError;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    const EMPTY_PART: &[u8] =
        br#"<xdr:wsDr xmlns:xdr="http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing"></xdr:wsDr>"#;

    #[test]
    fn test_part_paths() {
        assert_eq!(drawing_part_path(3), "xl/drawings/drawing3.xml");
        assert_eq!(drawing_part_index("xl/drawings/drawing12.xml"), Some(12));
        assert_eq!(drawing_part_index("../drawings/drawing2.xml"), Some(2));
        assert_eq!(drawing_part_index("xl/drawings/vmlDrawing1.vml"), None);
        assert_eq!(drawing_part_index("xl/drawings/chart.xml"), None);
    }

    #[test]
    fn test_load_missing_is_empty() {
        let drawings = Drawings::new();
        let doc = drawings.load("xl/drawings/drawing1.xml").unwrap();
        assert!(doc.is_empty());
        assert!(!drawings.contains("xl/drawings/drawing1.xml"));
        assert_eq!(drawings.next_part_index(), 1);
    }

    #[test]
    fn test_raw_parts_are_untouched_until_stored() {
        let drawings = Drawings::new();
        drawings.insert_raw("xl/drawings/drawing2.xml", EMPTY_PART.to_vec());
        assert_eq!(drawings.next_part_index(), 3);

        let doc = drawings.load("xl/drawings/drawing2.xml").unwrap();
        assert!(doc.is_empty());
        assert_eq!(
            drawings.to_bytes("xl/drawings/drawing2.xml").unwrap(),
            EMPTY_PART.to_vec()
        );

        drawings.store("xl/drawings/drawing2.xml", doc);
        let bytes = drawings.to_bytes("xl/drawings/drawing2.xml").unwrap();
        assert!(String::from_utf8(bytes).unwrap().starts_with("<?xml"));
        assert_eq!(drawings.paths(), vec!["xl/drawings/drawing2.xml".to_string()]);
    }

    #[test]
    fn test_malformed_raw_part() {
        let drawings = Drawings::new();
        drawings.insert_raw("xl/drawings/drawing1.xml", b"<chartSpace/>".to_vec());
        assert!(matches!(
            drawings.load("xl/drawings/drawing1.xml"),
            Err(DrawingError::Parse(_))
        ));
    }

    #[test]
    fn test_concurrent_access() {
        let drawings = Arc::new(Drawings::new());
        let handles: Vec<_> = (1..=8)
            .map(|i| {
                let drawings = Arc::clone(&drawings);
                std::thread::spawn(move || {
                    let path = drawing_part_path(i);
                    let doc = drawings.load(&path).unwrap();
                    drawings.store(&path, doc);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(drawings.len(), 8);
        assert_eq!(drawings.next_part_index(), 9);
    }
}
