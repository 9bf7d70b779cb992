use crate::content_types::{ContentTypes, CONTENT_TYPES_PART};
use crate::error::PackageError;
use crate::rels::{
    rels_part_name, resolve_target, Relationships, REL_CORE_PROPERTIES, REL_FOOTER, REL_HEADER, REL_IMAGE,
    REL_OFFICE_DOCUMENT,
};
use crate::xml::XmlDocument;
use indexmap::IndexMap;
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Contents of one package part.
#[derive(Debug, Clone)]
pub enum PartData {
    Xml(XmlDocument),
    Binary(Vec<u8>),
}

/// A zipped OOXML package held fully in memory.
///
/// Relationship parts and the content-types part are kept in typed form and
/// regenerated on save; every other `.xml` part is parsed into an
/// [`XmlDocument`], and all remaining parts are carried as raw bytes.
#[derive(Debug, Clone)]
pub struct Package {
    parts: IndexMap<String, PartData>,
    relationships: IndexMap<String, Relationships>,
    content_types: ContentTypes,
}

impl Default for Package {
    fn default() -> Self {
        Self::new()
    }
}

/// `word/_rels/document.xml.rels` → `word/document.xml`, `_rels/.rels` → ``.
fn rels_source(name: &str) -> Option<String> {
    let file = name.strip_suffix(".rels")?;
    let (dir, file) = match file.rsplit_once('/') {
        Some((dir, file)) => (dir, file),
        None => ("", file),
    };
    let base = dir.strip_suffix("_rels")?.trim_end_matches('/');
    Some(if base.is_empty() {
        file.to_string()
    } else {
        format!("{}/{}", base, file)
    })
}

fn is_xml_part(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("xml"))
}

fn directory_of(part: &str) -> &str {
    part.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

impl Package {
    pub fn new() -> Self {
        Self {
            parts: IndexMap::new(),
            relationships: IndexMap::new(),
            content_types: ContentTypes::new(),
        }
    }

    /// Reads a package from zip bytes.
    pub fn open(bytes: &[u8]) -> Result<Self, PackageError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut package = Self::new();
        let mut content_types = None;

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut data = Vec::with_capacity(usize::try_from(file.size()).unwrap_or_default());
            file.read_to_end(&mut data)?;

            if name == CONTENT_TYPES_PART {
                content_types = Some(ContentTypes::parse(&data)?);
            } else if let Some(source) = rels_source(&name) {
                package.relationships.insert(source, Relationships::parse(&data)?);
            } else if is_xml_part(&name) {
                let doc = XmlDocument::parse(&data).map_err(|e| {
                    log::debug!("Failed to parse XML part '{}': {}", name, e);
                    e
                })?;
                package.parts.insert(name, PartData::Xml(doc));
            } else {
                package.parts.insert(name, PartData::Binary(data));
            }
        }

        package.content_types =
            content_types.ok_or_else(|| PackageError::MissingPart(CONTENT_TYPES_PART.to_string()))?;
        log::debug!(
            "Opened package with {} parts and {} relationship sets",
            package.parts.len(),
            package.relationships.len()
        );
        Ok(package)
    }

    /// Writes the package as deflated zip bytes, content types first.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PackageError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        zip.start_file(CONTENT_TYPES_PART, options)?;
        zip.write_all(&self.content_types.to_document().to_bytes()?)?;

        for (source, rels) in &self.relationships {
            zip.start_file(rels_part_name(source), options)?;
            zip.write_all(&rels.to_document().to_bytes()?)?;
        }

        for (name, data) in &self.parts {
            zip.start_file(name.as_str(), options)?;
            match data {
                PartData::Xml(doc) => zip.write_all(&doc.to_bytes()?)?,
                PartData::Binary(bytes) => zip.write_all(bytes)?,
            }
        }

        Ok(zip.finish()?.into_inner())
    }

    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(String::as_str)
    }

    pub fn contains_part(&self, name: &str) -> bool {
        self.parts.contains_key(name)
    }

    pub fn part(&self, name: &str) -> Option<&PartData> {
        self.parts.get(name)
    }

    pub fn xml_part(&self, name: &str) -> Result<&XmlDocument, PackageError> {
        match self.parts.get(name) {
            Some(PartData::Xml(doc)) => Ok(doc),
            Some(PartData::Binary(_)) => Err(PackageError::NotXml(name.to_string())),
            None => Err(PackageError::MissingPart(name.to_string())),
        }
    }

    pub fn xml_part_mut(&mut self, name: &str) -> Result<&mut XmlDocument, PackageError> {
        match self.parts.get_mut(name) {
            Some(PartData::Xml(doc)) => Ok(doc),
            Some(PartData::Binary(_)) => Err(PackageError::NotXml(name.to_string())),
            None => Err(PackageError::MissingPart(name.to_string())),
        }
    }

    pub fn binary_part(&self, name: &str) -> Option<&[u8]> {
        match self.parts.get(name) {
            Some(PartData::Binary(data)) => Some(data),
            _ => None,
        }
    }

    /// Adds or replaces an XML part, registering `content_type` as an override.
    pub fn insert_xml_part(&mut self, name: &str, doc: XmlDocument, content_type: Option<&str>) {
        if let Some(ct) = content_type {
            self.content_types.set_override(name, ct);
        }
        self.parts.insert(name.to_string(), PartData::Xml(doc));
    }

    pub fn insert_binary_part(&mut self, name: &str, data: Vec<u8>) {
        self.parts.insert(name.to_string(), PartData::Binary(data));
    }

    pub fn content_types(&self) -> &ContentTypes {
        &self.content_types
    }

    pub fn content_types_mut(&mut self) -> &mut ContentTypes {
        &mut self.content_types
    }

    /// Relationships of `source` (`""` for the package itself).
    pub fn relationships(&self, source: &str) -> Option<&Relationships> {
        self.relationships.get(source)
    }

    pub fn relationships_mut(&mut self, source: &str) -> &mut Relationships {
        self.relationships.entry(source.to_string()).or_default()
    }

    /// Parts targeted from `source` by relationships of `rel_type`, in
    /// relationship order. Targets that are not in the package are skipped.
    pub fn related_parts(&self, source: &str, rel_type: &str) -> Vec<String> {
        self.relationships(source)
            .map(|rels| {
                rels.by_type(rel_type)
                    .filter(|r| !r.is_external())
                    .map(|r| resolve_target(source, &r.target))
                    .filter(|name| self.parts.contains_key(name))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The main document part named by the package's officeDocument relationship.
    pub fn main_document_part(&self) -> Result<String, PackageError> {
        self.related_parts("", REL_OFFICE_DOCUMENT)
            .into_iter()
            .next()
            .ok_or_else(|| PackageError::MissingPart("officeDocument relationship".to_string()))
    }

    pub fn core_properties_part(&self) -> Option<String> {
        self.related_parts("", REL_CORE_PROPERTIES).into_iter().next()
    }

    pub fn header_parts(&self, main: &str) -> Vec<String> {
        self.related_parts(main, REL_HEADER)
    }

    pub fn footer_parts(&self, main: &str) -> Vec<String> {
        self.related_parts(main, REL_FOOTER)
    }

    /// Stores an image next to `source` under `media/`, registers the
    /// extension's content type and returns the new relationship id.
    pub fn add_image(
        &mut self,
        source: &str,
        data: Vec<u8>,
        extension: &str,
        content_type: &str,
    ) -> String {
        if !self.content_types.has_default(extension) {
            self.content_types.set_default(extension, content_type);
        }

        let dir = directory_of(source);
        let prefix = |n: usize| {
            let stem = format!("media/evidence_{}.", n);
            if dir.is_empty() { stem } else { format!("{}/{}", dir, stem) }
        };
        // Numbering ignores the extension so names follow insertion order.
        let mut n = 1;
        while self.parts.keys().any(|name| name.starts_with(&prefix(n))) {
            n += 1;
        }
        let target = format!("media/evidence_{}.{}", n, extension);
        let name = format!("{}{}", prefix(n), extension);

        self.parts.insert(name.clone(), PartData::Binary(data));
        let id = self.relationships_mut(source).add(REL_IMAGE, &target);
        log::debug!("Added image part '{}' as {}", name, id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_types::CT_MAIN_DOCUMENT;
    use crate::xml::XmlElement;

    fn minimal() -> Package {
        let mut package = Package::new();
        let body = XmlElement::new("w:document").child(XmlElement::new("w:body"));
        package.insert_xml_part("word/document.xml", XmlDocument::from_element(&body), Some(CT_MAIN_DOCUMENT));
        package
            .relationships_mut("")
            .add(REL_OFFICE_DOCUMENT, "word/document.xml");
        package
    }

    #[test]
    fn rels_source_names() {
        assert_eq!(rels_source("_rels/.rels").as_deref(), Some(""));
        assert_eq!(rels_source("word/_rels/document.xml.rels").as_deref(), Some("word/document.xml"));
        assert_eq!(rels_source("word/document.xml"), None);
        assert_eq!(rels_source("word/custom.rels"), None);
    }

    #[test]
    fn save_and_reopen_round_trip() {
        let package = minimal();
        let bytes = package.to_bytes().unwrap();
        let reopened = Package::open(&bytes).unwrap();
        assert_eq!(reopened.main_document_part().unwrap(), "word/document.xml");
        let doc = reopened.xml_part("word/document.xml").unwrap();
        assert_eq!(doc.name(doc.root()), Some("w:document"));
        assert_eq!(
            reopened.content_types().content_type_of("word/document.xml"),
            Some(CT_MAIN_DOCUMENT)
        );
    }

    #[test]
    fn add_image_creates_unique_parts_and_ids() {
        let mut package = minimal();
        let first = package.add_image("word/document.xml", vec![1, 2, 3], "png", "image/png");
        let second = package.add_image("word/document.xml", vec![4], "png", "image/png");
        assert_ne!(first, second);
        assert_eq!(package.binary_part("word/media/evidence_1.png"), Some(&[1u8, 2, 3][..]));
        assert_eq!(package.binary_part("word/media/evidence_2.png"), Some(&[4u8][..]));
        let rels = package.relationships("word/document.xml").unwrap();
        assert_eq!(rels.get(&second).unwrap().target, "media/evidence_2.png");
        assert_eq!(package.content_types().content_type_of("word/media/evidence_1.png"), Some("image/png"));
    }

    #[test]
    fn image_numbers_ignore_the_extension() {
        let mut package = minimal();
        package.add_image("word/document.xml", vec![1], "png", "image/png");
        package.add_image("word/document.xml", vec![2], "jpeg", "image/jpeg");
        package.add_image("word/document.xml", vec![3], "png", "image/png");
        assert_eq!(package.binary_part("word/media/evidence_1.png"), Some(&[1u8][..]));
        assert_eq!(package.binary_part("word/media/evidence_2.jpeg"), Some(&[2u8][..]));
        assert_eq!(package.binary_part("word/media/evidence_3.png"), Some(&[3u8][..]));
        assert_eq!(package.binary_part("word/media/evidence_1.jpeg"), None);
    }

    #[test]
    fn missing_parts_are_reported() {
        let package = minimal();
        assert!(matches!(package.xml_part("word/styles.xml"), Err(PackageError::MissingPart(_))));
        assert!(Package::open(b"not a zip").is_err());
    }
}
