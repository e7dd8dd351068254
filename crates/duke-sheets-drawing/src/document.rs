//! In-memory model of a drawing part (`xl/drawings/drawingN.xml`)

use std::collections::BTreeMap;

use log::warn;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::anchor::TwoCellAnchor;
use crate::error::{DrawingError, DrawingResult};

/// SpreadsheetDrawing namespace (`xdr:` prefix)
pub const XDR_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing";

/// DrawingML main namespace (`a:` prefix)
pub const A_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

/// An anchored child of `xdr:wsDr`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingAnchor {
    /// A shape anchor added through this crate
    Shape(TwoCellAnchor),
    /// Any anchor read from an existing part, kept byte-for-byte
    Preserved(PreservedAnchor),
}

impl DrawingAnchor {
    /// Highest `cNvPr` id carried by this anchor
    pub fn object_id(&self) -> Option<u32> {
        match self {
            DrawingAnchor::Shape(anchor) => Some(anchor.shape.id),
            DrawingAnchor::Preserved(anchor) => anchor.object_id,
        }
    }
}

/// Raw XML of a pre-existing anchor (picture, chart frame, shape...)
#[derive(Debug, Clone, PartialEq)]
pub struct PreservedAnchor {
    /// Local element name, e.g. `twoCellAnchor` or `AlternateContent`
    pub element: String,
    /// The element's XML as found in the source part
    pub xml: String,
    /// Highest `cNvPr` id found inside the element
    pub object_id: Option<u32>,
}

/// A drawing part: the `xdr:wsDr` root and its anchors in document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawingDocument {
    /// Namespace declarations found on the source root (prefix -> URI, "" for default)
    root_namespaces: BTreeMap<String, String>,
    anchors: Vec<DrawingAnchor>,
}

impl DrawingDocument {
    /// Create an empty drawing
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an existing drawing part.
    ///
    /// Children of the root are kept verbatim so they serialize back unchanged.
    pub fn parse(bytes: &[u8]) -> DrawingResult<Self> {
        let mut reader = Reader::from_reader(bytes);
        reader.trim_text(true);

        let mut doc = DrawingDocument::new();
        let mut buf = Vec::new();
        let mut depth = 0usize;
        let mut saw_root = false;
        // (start offset, local name, max cNvPr id) of the root child being read
        let mut current: Option<(usize, String, Option<u32>)> = None;

        loop {
            let event_start = reader.buffer_position();
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    match depth {
                        0 => {
                            doc.read_root(e)?;
                            saw_root = true;
                        }
                        1 => {
                            let name = local_name(e);
                            current = Some((event_start, name, None));
                        }
                        _ => {
                            if let Some((_, _, id)) = current.as_mut() {
                                record_object_id(e, id);
                            }
                        }
                    }
                    depth += 1;
                }
                Ok(Event::Empty(ref e)) => match depth {
                    0 => {
                        doc.read_root(e)?;
                        saw_root = true;
                    }
                    1 => {
                        let mut id = None;
                        record_object_id(e, &mut id);
                        let end = reader.buffer_position();
                        doc.push_preserved(bytes, event_start, end, local_name(e), id)?;
                    }
                    _ => {
                        if let Some((_, _, id)) = current.as_mut() {
                            record_object_id(e, id);
                        }
                    }
                },
                Ok(Event::End(_)) => {
                    depth = depth.saturating_sub(1);
                    if depth == 1 {
                        if let Some((start, name, id)) = current.take() {
                            let end = reader.buffer_position();
                            doc.push_preserved(bytes, start, end, name, id)?;
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(DrawingError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        if !saw_root {
            return Err(DrawingError::Parse("missing xdr:wsDr root element".into()));
        }
        Ok(doc)
    }

    fn read_root(&mut self, e: &BytesStart) -> DrawingResult<()> {
        if e.local_name().as_ref() != b"wsDr" {
            return Err(DrawingError::Parse(format!(
                "expected wsDr root element, found {}",
                local_name(e)
            )));
        }
        for attr in e.attributes().flatten() {
            let key = attr.key.as_ref();
            let prefix = if key == b"xmlns" {
                String::new()
            } else if let Some(prefix) = key.strip_prefix(b"xmlns:") {
                String::from_utf8_lossy(prefix).into_owned()
            } else {
                continue;
            };
            let uri = attr.unescape_value()?;
            self.root_namespaces.insert(prefix, uri.into_owned());
        }
        Ok(())
    }

    fn push_preserved(
        &mut self,
        bytes: &[u8],
        start: usize,
        end: usize,
        element: String,
        object_id: Option<u32>,
    ) -> DrawingResult<()> {
        let raw = bytes
            .get(start..end)
            .ok_or_else(|| DrawingError::Parse(format!("{} element out of bounds", element)))?;
        let xml = std::str::from_utf8(raw)
            .map_err(|e| DrawingError::Parse(format!("{} element is not UTF-8: {}", element, e)))?;
        self.anchors.push(DrawingAnchor::Preserved(PreservedAnchor {
            element,
            xml: xml.trim().to_string(),
            object_id,
        }));
        Ok(())
    }

    /// Anchors in document order
    pub fn anchors(&self) -> &[DrawingAnchor] {
        &self.anchors
    }

    /// Number of anchors
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Whether the drawing has no anchors
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// The `cNvPr` id for the next object.
    ///
    /// One past the anchor count, bumped past any id already in use. For a
    /// part whose ids run 1..=n this is n + 1; sparse ids never collide, so a
    /// single picture with id 4 gives 5 rather than 2.
    pub fn next_shape_id(&self) -> u32 {
        let count = u32::try_from(self.anchors.len()).unwrap_or(u32::MAX - 1);
        let highest = self
            .anchors
            .iter()
            .filter_map(DrawingAnchor::object_id)
            .max()
            .unwrap_or(0);
        highest.max(count).saturating_add(1)
    }

    /// Append a shape anchor
    pub fn push_anchor(&mut self, anchor: TwoCellAnchor) {
        self.anchors.push(DrawingAnchor::Shape(anchor));
    }

    /// Serialize the full part
    pub fn to_xml(&self) -> String {
        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&self.root_start_tag());
        for anchor in &self.anchors {
            match anchor {
                DrawingAnchor::Shape(shape) => shape.write_xml(&mut xml),
                DrawingAnchor::Preserved(raw) => xml.push_str(&raw.xml),
            }
        }
        xml.push_str("</xdr:wsDr>");
        xml
    }

    fn root_start_tag(&self) -> String {
        let mut namespaces = self.root_namespaces.clone();
        namespaces.insert("xdr".into(), XDR_NS.into());
        namespaces.insert("a".into(), A_NS.into());
        namespaces
            .entry("r".into())
            .or_insert_with(|| duke_sheets_core::worksheet::RELATIONSHIP_NS.into());

        let mut tag = String::from("<xdr:wsDr");
        for (prefix, uri) in &namespaces {
            let uri = quick_xml::escape::escape(uri.as_str());
            if prefix.is_empty() {
                tag.push_str(&format!(r#" xmlns="{}""#, uri));
            } else {
                tag.push_str(&format!(r#" xmlns:{}="{}""#, prefix, uri));
            }
        }
        tag.push('>');
        tag
    }
}

fn local_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn record_object_id(e: &BytesStart, highest: &mut Option<u32>) {
    if e.local_name().as_ref() != b"cNvPr" {
        return;
    }
    let Some(attr) = e
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"id")
    else {
        return;
    };
    match attr
        .unescape_value()
        .ok()
        .and_then(|value| value.trim().parse::<u32>().ok())
    {
        Some(id) => *highest = Some(highest.map_or(id, |h| h.max(id))),
        None => warn!(
            "ignoring non-numeric cNvPr id {:?}",
            String::from_utf8_lossy(&attr.value)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PICTURE_PART: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<xdr:wsDr xmlns:xdr="http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">
  <xdr:oneCellAnchor>
    <xdr:from><xdr:col>1</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>1</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:from>
    <xdr:ext cx="952500" cy="952500"/>
    <xdr:pic>
      <xdr:nvPicPr><xdr:cNvPr id="4" name="Picture 4"/><xdr:cNvPicPr/></xdr:nvPicPr>
      <xdr:blipFill><a:blip xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" r:embed="rId1"/></xdr:blipFill>
      <xdr:spPr/>
    </xdr:pic>
    <xdr:clientData/>
  </xdr:oneCellAnchor>
  <xdr:absoluteAnchor>
    <xdr:pos x="0" y="0"/><xdr:ext cx="10" cy="10"/>
    <xdr:sp><xdr:nvSpPr><xdr:cNvPr id="bogus" name="x"/></xdr:nvSpPr></xdr:sp>
    <xdr:clientData/>
  </xdr:absoluteAnchor>
</xdr:wsDr>"#;

    #[test]
    fn test_parse_preserves_anchors() {
        let doc = DrawingDocument::parse(PICTURE_PART.as_bytes()).unwrap();
        assert_eq!(doc.len(), 2);

        match &doc.anchors()[0] {
            DrawingAnchor::Preserved(anchor) => {
                assert_eq!(anchor.element, "oneCellAnchor");
                assert_eq!(anchor.object_id, Some(4));
                assert!(anchor.xml.starts_with("<xdr:oneCellAnchor>"));
                assert!(anchor.xml.ends_with("</xdr:oneCellAnchor>"));
                assert!(anchor.xml.contains(r#"r:embed="rId1""#));
            }
            other => panic!("unexpected anchor {:?}", other),
        }
        match &doc.anchors()[1] {
            DrawingAnchor::Preserved(anchor) => {
                assert_eq!(anchor.element, "absoluteAnchor");
                assert_eq!(anchor.object_id, None);
            }
            other => panic!("unexpected anchor {:?}", other),
        }
    }

    #[test]
    fn test_next_shape_id() {
        assert_eq!(DrawingDocument::new().next_shape_id(), 1);

        // max(id 4, count 2) + 1
        let doc = DrawingDocument::parse(PICTURE_PART.as_bytes()).unwrap();
        assert_eq!(doc.next_shape_id(), 5);
    }

    #[test]
    fn test_next_shape_id_skips_sparse_id() {
        let part = r#"<xdr:wsDr xmlns:xdr="http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing"><xdr:oneCellAnchor><xdr:pic><xdr:nvPicPr><xdr:cNvPr id="4" name="Picture 4"/></xdr:nvPicPr></xdr:pic><xdr:clientData/></xdr:oneCellAnchor></xdr:wsDr>"#;
        let doc = DrawingDocument::parse(part.as_bytes()).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.next_shape_id(), 5);
    }

    #[test]
    fn test_round_trip_keeps_preserved_xml() {
        let doc = DrawingDocument::parse(PICTURE_PART.as_bytes()).unwrap();
        let xml = doc.to_xml();
        assert!(xml.contains(r#"<xdr:cNvPr id="4" name="Picture 4"/>"#));
        assert!(xml.contains("<xdr:absoluteAnchor>"));

        let reparsed = DrawingDocument::parse(xml.as_bytes()).unwrap();
        assert_eq!(reparsed.anchors(), doc.anchors());
    }

    #[test]
    fn test_root_namespaces_merge() {
        let part = r#"<wsDr xmlns="http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing" xmlns:c="urn:custom"/>"#;
        let doc = DrawingDocument::parse(part.as_bytes()).unwrap();
        assert!(doc.is_empty());

        let xml = doc.to_xml();
        assert!(xml.contains(&format!(r#" xmlns="{}""#, XDR_NS)));
        assert!(xml.contains(r#" xmlns:c="urn:custom""#));
        assert!(xml.contains(&format!(r#" xmlns:xdr="{}""#, XDR_NS)));
        assert!(xml.contains(&format!(r#" xmlns:a="{}""#, A_NS)));
        assert!(xml.contains(r#" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships""#));
        assert!(xml.ends_with("</xdr:wsDr>"));
    }

    #[test]
    fn test_parse_errors() {
        let err = DrawingDocument::parse(b"<worksheet/>").unwrap_err();
        assert!(matches!(err, DrawingError::Parse(_)));

        let err = DrawingDocument::parse(b"").unwrap_err();
        assert!(matches!(err, DrawingError::Parse(_)));

        let err = DrawingDocument::parse(b"<xdr:wsDr><xdr:twoCellAnchor></xdr:wsDr>").unwrap_err();
        assert!(err.is_parse_error());
    }
}
