//! In-memory OOXML packages: the zip container, its relationship and
//! content-type parts, and an arena-backed XML tree for every XML part.

mod content_types;
mod error;
mod package;
mod rels;
pub mod wordml;
pub mod xml;

pub use content_types::{
    ContentTypes, CONTENT_TYPES_NS, CONTENT_TYPES_PART, CT_CORE_PROPERTIES, CT_FOOTER, CT_HEADER,
    CT_MAIN_DOCUMENT, CT_RELATIONSHIPS, CT_STYLES, CT_XML,
};
pub use error::PackageError;
pub use package::{Package, PartData};
pub use rels::{
    rels_part_name, resolve_target, Relationship, Relationships, RELATIONSHIPS_NS, REL_CORE_PROPERTIES,
    REL_FOOTER, REL_HEADER, REL_IMAGE, REL_OFFICE_DOCUMENT, REL_STYLES,
};
pub use xml::{NodeData, NodeId, XmlDocument, XmlElement, XmlNode};
