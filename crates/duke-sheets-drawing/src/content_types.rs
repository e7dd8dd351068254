//! `[Content_Types].xml` overrides for drawing-related parts

use std::collections::BTreeMap;

use quick_xml::escape::escape;

use crate::store::{drawing_part_index, drawing_part_path};

/// Content type of a drawing part
pub const DRAWING_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.drawing+xml";

/// Kinds of numbered parts whose content types are tracked here
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    /// `xl/drawings/drawingN.xml`
    Drawing,
}

impl PartKind {
    /// Package path of part `index` of this kind
    pub fn part_path(&self, index: u32) -> String {
        match self {
            PartKind::Drawing => drawing_part_path(index),
        }
    }

    /// Part number of a path of this kind, with or without the leading `/`
    pub fn part_index(&self, path: &str) -> Option<u32> {
        match self {
            PartKind::Drawing => drawing_part_index(path),
        }
    }

    /// MIME type written in the `<Override>` entry
    pub fn content_type(&self) -> &'static str {
        match self {
            PartKind::Drawing => DRAWING_CONTENT_TYPE,
        }
    }
}

/// Override entries keyed by part name (`/xl/...`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTypes {
    overrides: BTreeMap<String, String>,
}

impl ContentTypes {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register part `index` of `kind`; returns false if it was already registered
    pub fn ensure(&mut self, index: u32, kind: PartKind) -> bool {
        let name = format!("/{}", kind.part_path(index));
        if self.overrides.contains_key(&name) {
            return false;
        }
        self.overrides.insert(name, kind.content_type().to_string());
        true
    }

    /// Content type registered for a part name
    pub fn get(&self, part_name: &str) -> Option<&str> {
        self.overrides.get(part_name).map(String::as_str)
    }

    /// Override entries sorted by part name
    pub fn overrides(&self) -> impl Iterator<Item = (&str, &str)> {
        self.overrides
            .iter()
            .map(|(name, ty)| (name.as_str(), ty.as_str()))
    }

    /// Number of overrides
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    /// Whether no overrides are registered
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Part numbers of every registered part of `kind`
    pub fn part_indexes(&self, kind: PartKind) -> impl Iterator<Item = u32> + '_ {
        self.overrides
            .iter()
            .filter(move |(_, ty)| ty.as_str() == kind.content_type())
            .filter_map(move |(name, _)| kind.part_index(name))
    }

    /// Serialize as a `[Content_Types].xml` part with the standard defaults
    pub fn to_xml(&self) -> String {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>"#,
        );
        for (name, ty) in &self.overrides {
            content.push_str(&format!(
                r#"
    <Override PartName="{}" ContentType="{}"/>"#,
                escape(name.as_str()),
                escape(ty.as_str())
            ));
        }
        content.push_str("\n</Types>");
        content
    }
}
