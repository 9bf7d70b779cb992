//! The `[Content_Types].xml` part.

use crate::error::PackageError;
use crate::xml::{XmlDocument, XmlElement};
use indexmap::IndexMap;

pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
pub const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

pub const CT_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
pub const CT_XML: &str = "application/xml";
pub const CT_MAIN_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
pub const CT_STYLES: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
pub const CT_HEADER: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml";
pub const CT_FOOTER: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml";
pub const CT_CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";

/// Extension defaults plus per-part overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTypes {
    defaults: IndexMap<String, String>,
    overrides: IndexMap<String, String>,
}

impl ContentTypes {
    /// The defaults every package needs: relationships and plain XML.
    pub fn new() -> Self {
        let mut ct = Self::default();
        ct.set_default("rels", CT_RELATIONSHIPS);
        ct.set_default("xml", CT_XML);
        ct
    }

    pub fn parse(bytes: &[u8]) -> Result<Self, PackageError> {
        let doc = XmlDocument::parse(bytes)?;
        let mut ct = Self::default();
        for id in doc.children(doc.root()).to_vec() {
            match doc.name(id) {
                Some("Default") => {
                    if let (Some(ext), Some(value)) = (doc.attribute(id, "Extension"), doc.attribute(id, "ContentType")) {
                        ct.set_default(ext, value);
                    }
                }
                Some("Override") => {
                    if let (Some(part), Some(value)) = (doc.attribute(id, "PartName"), doc.attribute(id, "ContentType")) {
                        ct.set_override(part, value);
                    }
                }
                _ => {}
            }
        }
        Ok(ct)
    }

    pub fn to_document(&self) -> XmlDocument {
        let defaults = self.defaults.iter().map(|(ext, value)| {
            XmlElement::new("Default")
                .attr("Extension", ext.as_str())
                .attr("ContentType", value.as_str())
        });
        let overrides = self.overrides.iter().map(|(part, value)| {
            XmlElement::new("Override")
                .attr("PartName", format!("/{}", part))
                .attr("ContentType", value.as_str())
        });
        let root = XmlElement::new("Types")
            .attr("xmlns", CONTENT_TYPES_NS)
            .children(defaults)
            .children(overrides);
        XmlDocument::from_element(&root)
    }

    /// Extensions are matched case-insensitively.
    pub fn set_default(&mut self, extension: &str, content_type: &str) {
        self.defaults
            .insert(extension.to_ascii_lowercase(), content_type.to_string());
    }

    pub fn has_default(&self, extension: &str) -> bool {
        self.defaults.contains_key(&extension.to_ascii_lowercase())
    }

    /// Part names are stored without the leading `/`.
    pub fn set_override(&mut self, part: &str, content_type: &str) {
        self.overrides
            .insert(part.trim_start_matches('/').to_string(), content_type.to_string());
    }

    pub fn content_type_of(&self, part: &str) -> Option<&str> {
        let part = part.trim_start_matches('/');
        if let Some(ct) = self.overrides.get(part) {
            return Some(ct);
        }
        let ext = part.rsplit_once('.').map(|(_, e)| e.to_ascii_lowercase())?;
        self.defaults.get(&ext).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_win_over_defaults() {
        let mut ct = ContentTypes::new();
        ct.set_override("/word/document.xml", CT_MAIN_DOCUMENT);
        assert_eq!(ct.content_type_of("word/document.xml"), Some(CT_MAIN_DOCUMENT));
        assert_eq!(ct.content_type_of("word/styles.xml"), Some(CT_XML));
        assert_eq!(ct.content_type_of("word/media/a.PNG"), None);
    }

    #[test]
    fn round_trips_through_xml() {
        let mut ct = ContentTypes::new();
        ct.set_default("PNG", "image/png");
        ct.set_override("word/header1.xml", CT_HEADER);
        let bytes = ct.to_document().to_bytes().unwrap();
        let parsed = ContentTypes::parse(&bytes).unwrap();
        assert_eq!(parsed, ct);
        assert!(parsed.has_default("png"));
        assert!(String::from_utf8(bytes).unwrap().contains("PartName=\"/word/header1.xml\""));
    }
}
