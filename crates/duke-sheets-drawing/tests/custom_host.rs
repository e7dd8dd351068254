//! Drive the composer through a host that is not a `Workbook`

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use duke_sheets_core::Workbook;
use duke_sheets_drawing::host::span_from_metrics;
use duke_sheets_drawing::{
    add_anchor, resolve_options, DefaultFontProvider, DrawingComposer, DrawingDocumentStore,
    DrawingError, DrawingResult, Drawings, PixelGeometry, PixelRequest, PixelSpan,
    ShapeDescription, WorksheetAccessor,
};
use pretty_assertions::assert_eq;

/// Minimal sheet model with a fixed 100x25 px grid
#[derive(Default)]
struct GridHost {
    parts: HashMap<String, String>,
    drawing_rels: HashMap<String, String>,
    namespaces: Vec<(String, String, String)>,
    font: Option<String>,
}

impl GridHost {
    fn with_sheet(name: &str, part: &str) -> Self {
        let mut host = GridHost {
            font: Some("Georgia".into()),
            ..GridHost::default()
        };
        host.parts.insert(name.into(), part.into());
        host
    }

    fn part(&self, sheet: &str) -> DrawingResult<&String> {
        self.parts
            .get(sheet)
            .ok_or_else(|| DrawingError::NotFound(sheet.to_string()))
    }
}

impl WorksheetAccessor for GridHost {
    fn sheet_part(&self, sheet: &str) -> DrawingResult<String> {
        self.part(sheet).cloned()
    }

    fn drawing_rel_id(&self, sheet: &str) -> DrawingResult<Option<String>> {
        self.part(sheet)?;
        Ok(self.drawing_rels.get(sheet).cloned())
    }

    fn set_drawing_rel_id(&mut self, sheet: &str, rel_id: &str) -> DrawingResult<()> {
        self.part(sheet)?;
        self.drawing_rels.insert(sheet.into(), rel_id.into());
        Ok(())
    }

    fn declare_namespace(&mut self, sheet: &str, prefix: &str, uri: &str) -> DrawingResult<()> {
        self.namespaces
            .push((sheet.into(), prefix.into(), uri.into()));
        Ok(())
    }
}

impl PixelGeometry for GridHost {
    fn resolve_span(&self, sheet: &str, request: PixelRequest) -> DrawingResult<PixelSpan> {
        self.part(sheet)?;
        Ok(span_from_metrics(request, |_| 100, |_| 25))
    }
}

impl DefaultFontProvider for GridHost {
    fn default_font_family(&self) -> DrawingResult<String> {
        self.font
            .clone()
            .ok_or_else(|| DrawingError::Upstream("no default font".into()))
    }
}

#[test]
fn test_custom_host_geometry_and_links() {
    let mut host = GridHost::with_sheet("Report", "xl/worksheets/report.xml");
    let mut composer = DrawingComposer::new();

    let id = composer
        .add_shape(&mut host, "Report", "B2", &ShapeDescription::new("rect").with_size(250, 30))
        .unwrap();
    assert_eq!(id, 1);

    assert_eq!(host.drawing_rels.get("Report").map(String::as_str), Some("rId1"));
    assert_eq!(
        host.namespaces,
        vec![(
            "Report".to_string(),
            "r".to_string(),
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships".to_string()
        )]
    );
    assert_eq!(
        composer
            .relationships()
            .target("xl/worksheets/report.xml", "rId1"),
        Some("../drawings/drawing1.xml")
    );

    let xml = String::from_utf8(
        composer
            .drawings()
            .to_bytes("xl/drawings/drawing1.xml")
            .unwrap(),
    )
    .unwrap();
    // 250 px from column B = 2 columns + 50 px, 30 px from row 2 = 1 row + 5 px
    assert!(xml.contains(&format!(
        "<xdr:to><xdr:col>3</xdr:col><xdr:colOff>{}</xdr:colOff><xdr:row>2</xdr:row><xdr:rowOff>{}</xdr:rowOff></xdr:to>",
        50 * 9525,
        5 * 9525
    )));
    assert!(xml.contains(r#"<a:latin typeface="Georgia"/>"#));
}

#[test]
fn test_font_failure_leaves_no_trace() {
    let mut host = GridHost::with_sheet("Report", "xl/worksheets/report.xml");
    host.font = None;
    let mut composer = DrawingComposer::new();

    let err = composer
        .add_shape(&mut host, "Report", "A1", &ShapeDescription::new("rect"))
        .unwrap_err();
    assert!(matches!(err, DrawingError::Upstream(_)));

    assert!(composer.drawings().is_empty());
    assert!(host.drawing_rels.is_empty());
    assert!(host.namespaces.is_empty());
    assert!(composer.content_types().is_empty());
}

#[test]
fn test_shared_store_across_threads() {
    let drawings = Arc::new(Drawings::new());
    let shape = resolve_options(Some(&ShapeDescription::new("rect"))).unwrap();

    let handles: Vec<_> = (1..=4u32)
        .map(|n| {
            let drawings = Arc::clone(&drawings);
            let shape = shape.clone();
            thread::spawn(move || {
                let wb = Workbook::new();
                // one part per thread
                let path = format!("xl/drawings/drawing{}.xml", n);
                for expected in 1..=5 {
                    let id = add_anchor(&*drawings, &wb, "Sheet1", &path, "A1", &shape).unwrap();
                    assert_eq!(id, expected);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(drawings.len(), 4);
    assert_eq!(drawings.next_part_index(), 5);
    for n in 1..=4u32 {
        let doc = drawings
            .load(&format!("xl/drawings/drawing{}.xml", n))
            .unwrap();
        assert_eq!(doc.len(), 5);
        assert_eq!(doc.next_shape_id(), 6);
    }
}
