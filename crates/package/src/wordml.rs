//! WordprocessingML vocabulary and read-only queries over part trees.

use crate::xml::{NodeId, XmlDocument};

pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const WP_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
pub const A_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub const PIC_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
pub const CP_NS: &str = "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
pub const DC_NS: &str = "http://purl.org/dc/elements/1.1/";
pub const DCTERMS_NS: &str = "http://purl.org/dc/terms/";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

pub const W_DOCUMENT: &str = "w:document";
pub const W_BODY: &str = "w:body";
pub const W_HDR: &str = "w:hdr";
pub const W_FTR: &str = "w:ftr";
pub const W_P: &str = "w:p";
pub const W_PPR: &str = "w:pPr";
pub const W_R: &str = "w:r";
pub const W_RPR: &str = "w:rPr";
pub const W_T: &str = "w:t";
pub const W_BR: &str = "w:br";
pub const W_CR: &str = "w:cr";
pub const W_TAB: &str = "w:tab";
pub const W_SECT_PR: &str = "w:sectPr";
pub const W_TBL: &str = "w:tbl";
pub const W_DRAWING: &str = "w:drawing";

/// Inline containers that may wrap runs inside a paragraph.
const RUN_CONTAINERS: &[&str] = &[
    "w:hyperlink",
    "w:smartTag",
    "w:ins",
    "w:customXml",
    "w:fldSimple",
    "w:sdt",
    "w:sdtContent",
];

/// The `w:body` of a main document part.
pub fn body(doc: &XmlDocument) -> Option<NodeId> {
    doc.first_child_element(doc.root(), W_BODY)
}

/// Every paragraph under `scope` in document order, including paragraphs in
/// table cells.
pub fn paragraphs(doc: &XmlDocument, scope: NodeId) -> Vec<NodeId> {
    doc.descendants_named(scope, W_P)
}

/// The runs belonging to paragraph `p`, in order. Runs wrapped in hyperlinks
/// and similar inline containers are included; runs of nested paragraphs
/// (text boxes) are not.
pub fn paragraph_runs(doc: &XmlDocument, p: NodeId) -> Vec<NodeId> {
    let mut runs = Vec::new();
    collect_runs(doc, p, &mut runs);
    runs
}

fn collect_runs(doc: &XmlDocument, parent: NodeId, out: &mut Vec<NodeId>) {
    for &child in doc.children(parent) {
        match doc.name(child) {
            Some(W_R) => out.push(child),
            Some(name) if RUN_CONTAINERS.contains(&name) => collect_runs(doc, child, out),
            _ => {}
        }
    }
}

/// Visible text of a run: `w:t` content, tabs as `\t`, breaks as `\n`.
pub fn run_text(doc: &XmlDocument, r: NodeId) -> String {
    let mut text = String::new();
    for &child in doc.children(r) {
        match doc.name(child) {
            Some(W_T) => text.push_str(&doc.text_content(child)),
            Some(W_TAB) => text.push('\t'),
            Some(W_BR) | Some(W_CR) => text.push('\n'),
            _ => {}
        }
    }
    text
}

/// Concatenated text of a paragraph's runs.
pub fn paragraph_text(doc: &XmlDocument, p: NodeId) -> String {
    paragraph_runs(doc, p)
        .into_iter()
        .map(|r| run_text(doc, r))
        .collect()
}

/// Text of every paragraph in the part, one line per paragraph.
pub fn part_text(doc: &XmlDocument) -> String {
    paragraphs(doc, doc.root())
        .into_iter()
        .map(|p| paragraph_text(doc, p))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The run properties of a run, when they carry at least one property.
pub fn run_properties(doc: &XmlDocument, r: NodeId) -> Option<NodeId> {
    doc.first_child_element(r, W_RPR)
        .filter(|rpr| doc.children(*rpr).iter().any(|c| doc.name(*c).is_some()))
}

/// The body's section properties when they are its last element child.
pub fn trailing_section_properties(doc: &XmlDocument, body: NodeId) -> Option<NodeId> {
    doc.children(body)
        .iter()
        .rev()
        .copied()
        .find(|c| doc.name(*c).is_some())
        .filter(|c| doc.is_element(*c, W_SECT_PR))
}
