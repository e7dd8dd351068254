//! Package relationship registry (`_rels/*.rels`)

use ahash::AHashMap;
use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{DrawingError, DrawingResult};
use crate::store::drawing_part_index;

/// Relationship type of a sheet's drawing part
pub const REL_TYPE_DRAWING: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/drawing";

const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// A single `<Relationship>` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    /// Target, relative to the owner part's directory unless external
    pub target: String,
    /// `TargetMode`, e.g. `External`
    pub target_mode: Option<String>,
}

/// Relationships of every part in a package, keyed by owner part path
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    by_owner: AHashMap<String, Vec<Relationship>>,
}

impl Relationships {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relationship from `owner` and return its new id (`rId{max + 1}`)
    pub fn add(
        &mut self,
        owner: &str,
        rel_type: &str,
        target: &str,
        target_mode: Option<&str>,
    ) -> String {
        let rels = self.by_owner.entry(owner.to_string()).or_default();
        let next = rels
            .iter()
            .filter_map(|rel| rel.id.strip_prefix("rId")?.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        let id = format!("rId{}", next);
        rels.push(Relationship {
            id: id.clone(),
            rel_type: rel_type.to_string(),
            target: target.to_string(),
            target_mode: target_mode.map(str::to_string),
        });
        id
    }

    /// Part numbers of every drawing part some owner links to
    pub fn drawing_part_indexes(&self) -> impl Iterator<Item = u32> + '_ {
        self.by_owner.iter().flat_map(|(owner, rels)| {
            rels.iter()
                .filter(|rel| rel.rel_type == REL_TYPE_DRAWING && rel.target_mode.is_none())
                .filter_map(move |rel| drawing_part_index(&resolve_target(owner, &rel.target)))
        })
    }

    /// Register an existing relationship, replacing any entry with the same id
    pub fn insert(&mut self, owner: &str, relationship: Relationship) {
        let rels = self.by_owner.entry(owner.to_string()).or_default();
        rels.retain(|rel| rel.id != relationship.id);
        rels.push(relationship);
    }

    /// Load the `.rels` part of `owner`
    pub fn load(&mut self, owner: &str, bytes: &[u8]) -> DrawingResult<()> {
        let mut reader = Reader::from_reader(bytes);
        reader.trim_text(true);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut id = None;
                    let mut target = None;
                    let mut rel_type = None;
                    let mut target_mode = None;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => id = Some(attr.unescape_value()?.into_owned()),
                            b"Target" => target = Some(attr.unescape_value()?.into_owned()),
                            b"Type" => rel_type = Some(attr.unescape_value()?.into_owned()),
                            b"TargetMode" => {
                                target_mode = Some(attr.unescape_value()?.into_owned())
                            }
                            _ => {}
                        }
                    }

                    match (id, target, rel_type) {
                        (Some(id), Some(target), Some(rel_type)) => self.insert(
                            owner,
                            Relationship {
                                id,
                                rel_type,
                                target,
                                target_mode,
                            },
                        ),
                        _ => {
                            return Err(DrawingError::Parse(format!(
                                "incomplete relationship in rels of {}",
                                owner
                            )))
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(DrawingError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }
        Ok(())
    }

    /// Look up a relationship by id
    pub fn get(&self, owner: &str, id: &str) -> Option<&Relationship> {
        self.by_owner.get(owner)?.iter().find(|rel| rel.id == id)
    }

    /// Target of relationship `id`
    pub fn target(&self, owner: &str, id: &str) -> Option<&str> {
        self.get(owner, id).map(|rel| rel.target.as_str())
    }

    /// All relationships of `owner`, in insertion order
    pub fn for_owner(&self, owner: &str) -> &[Relationship] {
        self.by_owner.get(owner).map_or(&[], Vec::as_slice)
    }

    /// Serialize the `.rels` part of `owner`, if it has any relationships
    pub fn to_xml(&self, owner: &str) -> Option<String> {
        let rels = self.by_owner.get(owner).filter(|rels| !rels.is_empty())?;

        let mut content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">"#,
            RELATIONSHIPS_NS
        );
        for rel in rels {
            content.push_str(&format!(
                r#"
    <Relationship Id="{}" Type="{}" Target="{}""#,
                escape(rel.id.as_str()),
                escape(rel.rel_type.as_str()),
                escape(rel.target.as_str())
            ));
            if let Some(mode) = &rel.target_mode {
                content.push_str(&format!(r#" TargetMode="{}""#, escape(mode.as_str())));
            }
            content.push_str("/>");
        }
        content.push_str("\n</Relationships>");
        Some(content)
    }
}

/// Path of the `.rels` part describing `part`
pub fn rels_path_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

/// Resolve `target` against the directory of `owner` into a package path
pub fn resolve_target(owner: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }
    let mut segments: Vec<&str> = match owner.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

/// Target of `part` as written in the rels of `owner`
pub fn relative_target(owner: &str, part: &str) -> String {
    let owner_dir: Vec<&str> = match owner.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };
    let part_segments: Vec<&str> = part.split('/').collect();
    let common = owner_dir
        .iter()
        .zip(&part_segments)
        .take_while(|(a, b)| a == b)
        .count()
        .min(part_segments.len().saturating_sub(1));

    let mut target: Vec<&str> = vec![".."; owner_dir.len() - common];
    target.extend(&part_segments[common..]);
    target.join("/")
}
