//! Attach shapes to worksheets

use std::sync::Arc;

use duke_sheets_core::worksheet::RELATIONSHIP_NS;
use log::{debug, warn};

use crate::builder::add_anchor;
use crate::content_types::{ContentTypes, PartKind};
use crate::error::{DrawingError, DrawingResult};
use crate::host::DrawingHost;
use crate::options::resolve_options;
use crate::relationships::{relative_target, resolve_target, Relationships, REL_TYPE_DRAWING};
use crate::shape::ShapeDescription;
use crate::store::{drawing_part_index, drawing_part_path, DrawingDocumentStore, Drawings};

/// Package-level state for adding drawings to a workbook.
///
/// Holds the drawing parts, the relationship registry and the content-type
/// overrides. The workbook itself is passed to each call.
///
/// ```rust
/// use duke_sheets_core::Workbook;
/// use duke_sheets_drawing::{DrawingComposer, ShapeDescription};
///
/// let mut workbook = Workbook::new();
/// let mut composer = DrawingComposer::new();
///
/// let shape = ShapeDescription::new("rect").with_size(180, 40);
/// composer.add_shape(&mut workbook, "Sheet1", "G6", &shape).unwrap();
///
/// assert!(composer.drawings().contains("xl/drawings/drawing1.xml"));
/// ```
#[derive(Debug)]
pub struct DrawingComposer<S: DrawingDocumentStore = Drawings> {
    drawings: Arc<S>,
    relationships: Relationships,
    content_types: ContentTypes,
}

impl DrawingComposer<Drawings> {
    /// Create a composer with an empty drawing cache
    pub fn new() -> Self {
        Self::with_store(Arc::new(Drawings::new()))
    }
}

impl Default for DrawingComposer<Drawings> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DrawingDocumentStore> DrawingComposer<S> {
    /// Create a composer over an existing drawing store
    pub fn with_store(drawings: Arc<S>) -> Self {
        Self {
            drawings,
            relationships: Relationships::new(),
            content_types: ContentTypes::new(),
        }
    }

    /// The drawing store
    pub fn drawings(&self) -> &Arc<S> {
        &self.drawings
    }

    /// Relationship registry
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    /// Relationship registry, for seeding relationships of an opened package
    pub fn relationships_mut(&mut self) -> &mut Relationships {
        &mut self.relationships
    }

    /// Content-type overrides
    pub fn content_types(&self) -> &ContentTypes {
        &self.content_types
    }

    /// Content-type overrides, for seeding the overrides of an opened package
    pub fn content_types_mut(&mut self) -> &mut ContentTypes {
        &mut self.content_types
    }

    /// Smallest drawing part number above every number in use by the store,
    /// a relationship or a content-type override
    fn next_part_index(&self) -> u32 {
        let linked = self.relationships.drawing_part_indexes().max().unwrap_or(0);
        let typed = self
            .content_types
            .part_indexes(PartKind::Drawing)
            .max()
            .unwrap_or(0);
        self.drawings.next_part_index().max(linked.max(typed) + 1)
    }

    /// Add a text-box shape to `sheet`, anchored at `cell`.
    ///
    /// The sheet's drawing part is reused if it has one; otherwise a new part
    /// is created and linked from the sheet. Returns the new shape's id.
    ///
    /// Nothing is changed when an error is returned.
    pub fn add_shape<'a, H>(
        &mut self,
        host: &mut H,
        sheet: &str,
        cell: &str,
        shape: impl Into<Option<&'a ShapeDescription>>,
    ) -> DrawingResult<u32>
    where
        H: DrawingHost + ?Sized,
    {
        let shape = resolve_options(shape.into())?;
        let sheet_part = host.sheet_part(sheet)?;

        let existing = host.drawing_rel_id(sheet)?;
        let part_path = match &existing {
            Some(rel_id) => {
                let target = self
                    .relationships
                    .target(&sheet_part, rel_id)
                    .ok_or_else(|| {
                        DrawingError::Upstream(format!(
                            "{} has no relationship {}",
                            sheet_part, rel_id
                        ))
                    })?;
                resolve_target(&sheet_part, target)
            }
            None => drawing_part_path(self.next_part_index()),
        };

        let id = add_anchor(&*self.drawings, &*host, sheet, &part_path, cell, &shape)?;

        if existing.is_none() {
            let target = relative_target(&sheet_part, &part_path);
            let rel_id = self
                .relationships
                .add(&sheet_part, REL_TYPE_DRAWING, &target, None);
            host.set_drawing_rel_id(sheet, &rel_id)?;
            host.declare_namespace(sheet, "r", RELATIONSHIP_NS)?;
            debug!("linked {} to {} as {}", sheet_part, part_path, rel_id);
        }

        match drawing_part_index(&part_path) {
            Some(index) => {
                self.content_types.ensure(index, PartKind::Drawing);
            }
            None => warn!("no content type registered for drawing part {}", part_path),
        }

        Ok(id)
    }
}
