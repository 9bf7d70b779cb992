//! `.rels` parts: the relationships from one source part to its targets.

use crate::error::PackageError;
use crate::xml::{XmlDocument, XmlElement};

pub const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

pub const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
pub const REL_STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
pub const REL_HEADER: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/header";
pub const REL_FOOTER: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer";
pub const REL_IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
    /// `External` for hyperlinks and similar; `None` for internal parts.
    pub target_mode: Option<String>,
}

impl Relationship {
    pub fn is_external(&self) -> bool {
        self.target_mode.as_deref() == Some("External")
    }
}

/// The ordered relationships of one source part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relationships {
    items: Vec<Relationship>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(bytes: &[u8]) -> Result<Self, PackageError> {
        let doc = XmlDocument::parse(bytes)?;
        let items = doc
            .child_elements(doc.root(), "Relationship")
            .filter_map(|id| {
                let rel_id = doc.attribute(id, "Id")?;
                let target = doc.attribute(id, "Target")?;
                Some(Relationship {
                    id: rel_id.to_string(),
                    rel_type: doc.attribute(id, "Type").unwrap_or_default().to_string(),
                    target: target.to_string(),
                    target_mode: doc.attribute(id, "TargetMode").map(str::to_string),
                })
            })
            .collect();
        Ok(Self { items })
    }

    pub fn to_document(&self) -> XmlDocument {
        let root = XmlElement::new("Relationships")
            .attr("xmlns", RELATIONSHIPS_NS)
            .children(self.items.iter().map(|rel| {
                let el = XmlElement::new("Relationship")
                    .attr("Id", rel.id.as_str())
                    .attr("Type", rel.rel_type.as_str())
                    .attr("Target", rel.target.as_str());
                match &rel.target_mode {
                    Some(mode) => el.attr("TargetMode", mode.as_str()),
                    None => el,
                }
            }));
        XmlDocument::from_element(&root)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.items.iter().find(|r| r.id == id)
    }

    pub fn by_type<'a>(&'a self, rel_type: &'a str) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.items.iter().filter(move |r| r.rel_type == rel_type)
    }

    /// `rId{n}` with `n` one past the largest numeric suffix in use.
    pub fn next_id(&self) -> String {
        let max = self
            .items
            .iter()
            .filter_map(|r| r.id.strip_prefix("rId"))
            .filter_map(|n| n.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("rId{}", max + 1)
    }

    /// Adds an internal relationship and returns its new id.
    pub fn add(&mut self, rel_type: &str, target: &str) -> String {
        let id = self.next_id();
        self.items.push(Relationship {
            id: id.clone(),
            rel_type: rel_type.to_string(),
            target: target.to_string(),
            target_mode: None,
        });
        id
    }
}

/// Resolves a relationship target against the directory of its source part.
///
/// `word/document.xml` + `media/a.png` → `word/media/a.png`; absolute targets
/// are taken from the package root.
pub fn resolve_target(source_part: &str, target: &str) -> String {
    if let Some(abs) = target.strip_prefix('/') {
        return normalize(abs.split('/').collect());
    }
    let mut segments: Vec<&str> = source_part
        .rsplit_once('/')
        .map(|(dir, _)| dir.split('/').collect())
        .unwrap_or_default();
    segments.extend(target.split('/'));
    normalize(segments)
}

fn normalize(segments: Vec<&str>) -> String {
    let mut out: Vec<&str> = Vec::new();
    for seg in segments {
        match seg {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            s => out.push(s),
        }
    }
    out.join("/")
}

/// The `.rels` part that holds the relationships of `part`.
pub fn rels_part_name(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None if part.is_empty() => "_rels/.rels".to_string(),
        None => format!("_rels/{}.rels", part),
    }
}
