use super::document::{NodeData, NodeId, XmlDocument};
use crate::error::PackageError;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event as XmlEvent};
use quick_xml::Writer;

impl XmlDocument {
    /// Serializes the document. Text and attribute values are escaped; a
    /// UTF-8 standalone declaration is emitted when the source had one.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PackageError> {
        let mut writer = Writer::new(Vec::new());
        if self.has_declaration {
            writer.write_event(XmlEvent::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
            writer.get_mut().extend_from_slice(b"\r\n");
        }
        for child in self.children(self.document_node()) {
            self.write_node(&mut writer, *child)?;
        }
        Ok(writer.into_inner())
    }

    pub fn to_xml_string(&self) -> Result<String, PackageError> {
        Ok(String::from_utf8(self.to_bytes()?)?)
    }

    fn write_node(&self, writer: &mut Writer<Vec<u8>>, id: NodeId) -> Result<(), PackageError> {
        match self.data(id) {
            NodeData::Document => {
                for child in self.children(id) {
                    self.write_node(writer, *child)?;
                }
            }
            NodeData::Element { name, attributes } => {
                let mut start = BytesStart::new(name.as_str());
                for (key, value) in attributes {
                    start.push_attribute((key.as_str(), value.as_str()));
                }
                let children = self.children(id);
                if children.is_empty() {
                    writer.write_event(XmlEvent::Empty(start))?;
                } else {
                    writer.write_event(XmlEvent::Start(start))?;
                    for child in children {
                        self.write_node(writer, *child)?;
                    }
                    writer.write_event(XmlEvent::End(BytesEnd::new(name.as_str())))?;
                }
            }
            NodeData::Text(text) => writer.write_event(XmlEvent::Text(BytesText::new(text)))?,
            NodeData::CData(text) => writer.write_event(XmlEvent::CData(BytesCData::new(text.as_str())))?,
            NodeData::Comment(text) => {
                writer.write_event(XmlEvent::Comment(BytesText::from_escaped(text.as_str())))?
            }
            NodeData::ProcessingInstruction(text) => {
                writer.write_event(XmlEvent::PI(BytesPI::new(text.as_str())))?
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::XmlElement;

    #[test]
    fn escapes_text_and_attributes() {
        let root = XmlElement::new("w:t")
            .attr("note", "a \"quoted\" <value>")
            .text("R&D <draft>");
        let xml = XmlDocument::from_element(&root).to_xml_string().unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>"));
        assert!(xml.contains("R&amp;D &lt;draft&gt;"));
        assert!(xml.contains("note=\"a &quot;quoted&quot; &lt;value&gt;\""));
    }

    #[test]
    fn reparsing_serialized_output_preserves_structure() {
        let source = "<root xmlns:w=\"urn:w\"><!--c--><w:p><w:r><w:t xml:space=\"preserve\">  x &amp; y  </w:t></w:r><w:br/></w:p></root>";
        let doc = XmlDocument::parse(source.as_bytes()).unwrap();
        let out = doc.to_xml_string().unwrap();
        assert_eq!(out, source);
        let again = XmlDocument::parse(out.as_bytes()).unwrap();
        assert_eq!(again.text_content(again.root()), "  x & y  ");
    }

    #[test]
    fn childless_elements_are_self_closing() {
        let xml = XmlDocument::from_element(&XmlElement::new("w:br")).to_xml_string().unwrap();
        assert!(xml.ends_with("<w:br/>"));
    }
}
