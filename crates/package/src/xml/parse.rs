use super::document::{NodeData, NodeId, XmlDocument};
use crate::error::PackageError;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event as XmlEvent};
use quick_xml::Reader;

fn owned_name(e: &BytesStart) -> Result<String, PackageError> {
    Ok(std::str::from_utf8(e.name().as_ref())?.to_string())
}

fn owned_attributes(e: &BytesStart) -> Result<Vec<(String, String)>, PackageError> {
    let mut out = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let raw = std::str::from_utf8(&attr.value)?;
        out.push((key, unescape(raw)?.into_owned()));
    }
    Ok(out)
}

/// Appends text to `parent`, merging with a trailing text node so that text
/// split around entity references stays one node.
fn push_text(doc: &mut XmlDocument, parent: NodeId, text: &str) {
    if text.is_empty() {
        return;
    }
    if parent == doc.document_node() && text.trim().is_empty() {
        return;
    }
    if let Some(&last) = doc.children(parent).last() {
        if let NodeData::Text(existing) = doc.data(last) {
            let merged = format!("{}{}", existing, text);
            let id = doc.create_text(merged);
            doc.insert_before(last, id);
            doc.detach(last);
            return;
        }
    }
    let id = doc.create_text(text);
    doc.append_child(parent, id);
}

impl XmlDocument {
    /// Parses an XML part. Whitespace-only text is preserved inside elements.
    pub fn parse(bytes: &[u8]) -> Result<XmlDocument, PackageError> {
        let mut reader = Reader::from_reader(bytes);
        reader.config_mut().trim_text(false);

        let mut doc = XmlDocument::empty();
        doc.has_declaration = false;
        let mut stack = vec![doc.document_node()];
        let mut root = None;
        let mut buf = Vec::new();

        loop {
            let top = *stack.last().ok_or_else(|| PackageError::Malformed("unbalanced end tag".into()))?;
            match reader.read_event_into(&mut buf)? {
                XmlEvent::Start(e) => {
                    let id = doc.create_node(NodeData::Element {
                        name: owned_name(&e)?,
                        attributes: owned_attributes(&e)?,
                    });
                    doc.append_child(top, id);
                    if top == doc.document_node() {
                        root.get_or_insert(id);
                    }
                    stack.push(id);
                }
                XmlEvent::Empty(e) => {
                    let id = doc.create_node(NodeData::Element {
                        name: owned_name(&e)?,
                        attributes: owned_attributes(&e)?,
                    });
                    doc.append_child(top, id);
                    if top == doc.document_node() {
                        root.get_or_insert(id);
                    }
                }
                XmlEvent::End(_) => {
                    stack.pop();
                    if stack.is_empty() {
                        return Err(PackageError::Malformed("unbalanced end tag".into()));
                    }
                }
                XmlEvent::Text(e) => {
                    let raw_text = std::str::from_utf8(e.as_ref())?;
                    let text = unescape(raw_text)?;
                    push_text(&mut doc, top, &text);
                }
                XmlEvent::GeneralRef(e) => {
                    let name = std::str::from_utf8(e.as_ref())?;
                    if let Some(ch) = e.resolve_char_ref()? {
                        push_text(&mut doc, top, ch.encode_utf8(&mut [0u8; 4]));
                    } else if let Some(value) = resolve_predefined_entity(name) {
                        push_text(&mut doc, top, value);
                    } else {
                        log::debug!("Keeping unknown entity reference &{};", name);
                        push_text(&mut doc, top, &format!("&{};", name));
                    }
                }
                XmlEvent::CData(e) => {
                    let text = std::str::from_utf8(e.as_ref())?.to_string();
                    let id = doc.create_node(NodeData::CData(text));
                    doc.append_child(top, id);
                }
                XmlEvent::Comment(e) => {
                    let text = std::str::from_utf8(e.as_ref())?.to_string();
                    let id = doc.create_node(NodeData::Comment(text));
                    doc.append_child(top, id);
                }
                XmlEvent::PI(e) => {
                    let text = std::str::from_utf8(e.as_ref())?.to_string();
                    let id = doc.create_node(NodeData::ProcessingInstruction(text));
                    doc.append_child(top, id);
                }
                XmlEvent::Decl(_) => doc.has_declaration = true,
                XmlEvent::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if stack.len() != 1 {
            return Err(PackageError::Malformed("unclosed element at end of input".into()));
        }
        let root = root.ok_or_else(|| PackageError::Malformed("document has no root element".into()))?;
        doc.set_root(root);
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_elements_attributes_and_text() {
        let doc = XmlDocument::parse(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="urn:w"><w:body><w:p w:rsidR="00AB"><w:r><w:t xml:space="preserve"> a </w:t></w:r></w:p></w:body></w:document>"#,
        )
        .unwrap();
        assert_eq!(doc.name(doc.root()), Some("w:document"));
        assert_eq!(doc.attribute(doc.root(), "xmlns:w"), Some("urn:w"));
        let p = doc.descendants_named(doc.root(), "w:p")[0];
        assert_eq!(doc.attribute(p, "w:rsidR"), Some("00AB"));
        assert_eq!(doc.text_content(p), " a ");
        assert!(doc.has_declaration);
    }

    #[test]
    fn resolves_entities_into_one_text_node() {
        let doc = XmlDocument::parse(b"<t a=\"x &amp; y\">Tom &amp; Jerry &#169; &lt;3</t>").unwrap();
        let root = doc.root();
        assert_eq!(doc.children(root).len(), 1);
        assert_eq!(doc.text_content(root), "Tom & Jerry \u{a9} <3");
        assert_eq!(doc.attribute(root, "a"), Some("x & y"));
    }

    #[test]
    fn rejects_unclosed_and_mismatched_documents() {
        assert!(XmlDocument::parse(b"<a><b></a>").is_err());
        assert!(XmlDocument::parse(b"<a><b>").is_err());
        assert!(XmlDocument::parse(b"   ").is_err());
    }
}
