use super::WordBuilder;
use dossier_image::DisplaySize;
use dossier_package::wordml::{A_NS, PIC_NS, R_NS, WP_NS};
use dossier_package::XmlElement;

/// Builder for a run holding an inline picture (`w:drawing/wp:inline`).
///
/// The DrawingML namespaces are declared on the elements that use them so
/// the fragment stays valid whatever the host part declares.
#[derive(Debug, Clone)]
pub struct Drawing {
    rel_id: String,
    doc_pr_id: u64,
    name: String,
    size: DisplaySize,
}

impl Drawing {
    /// `rel_id` is the image relationship id; `doc_pr_id` must be unique in the part.
    pub fn new(rel_id: impl Into<String>, doc_pr_id: u64, name: impl Into<String>, size: DisplaySize) -> Self {
        Self {
            rel_id: rel_id.into(),
            doc_pr_id,
            name: name.into(),
            size,
        }
    }
}

impl WordBuilder for Drawing {
    fn build(self: Box<Self>) -> XmlElement {
        let cx = self.size.width_emu.to_string();
        let cy = self.size.height_emu.to_string();

        let picture = XmlElement::new("pic:pic")
            .attr("xmlns:pic", PIC_NS)
            .child(
                XmlElement::new("pic:nvPicPr")
                    .child(
                        XmlElement::new("pic:cNvPr")
                            .attr("id", "0")
                            .attr("name", self.name.as_str()),
                    )
                    .child(XmlElement::new("pic:cNvPicPr")),
            )
            .child(
                XmlElement::new("pic:blipFill")
                    .child(
                        XmlElement::new("a:blip")
                            .attr("xmlns:r", R_NS)
                            .attr("r:embed", self.rel_id.as_str()),
                    )
                    .child(XmlElement::new("a:stretch").child(XmlElement::new("a:fillRect"))),
            )
            .child(
                XmlElement::new("pic:spPr")
                    .child(
                        XmlElement::new("a:xfrm")
                            .child(XmlElement::new("a:off").attr("x", "0").attr("y", "0"))
                            .child(XmlElement::new("a:ext").attr("cx", cx.as_str()).attr("cy", cy.as_str())),
                    )
                    .child(
                        XmlElement::new("a:prstGeom")
                            .attr("prst", "rect")
                            .child(XmlElement::new("a:avLst")),
                    ),
            );

        let inline = XmlElement::new("wp:inline")
            .attr("xmlns:wp", WP_NS)
            .attr("distT", "0")
            .attr("distB", "0")
            .attr("distL", "0")
            .attr("distR", "0")
            .child(XmlElement::new("wp:extent").attr("cx", cx.as_str()).attr("cy", cy.as_str()))
            .child(
                XmlElement::new("wp:effectExtent")
                    .attr("l", "0")
                    .attr("t", "0")
                    .attr("r", "0")
                    .attr("b", "0"),
            )
            .child(
                XmlElement::new("wp:docPr")
                    .attr("id", self.doc_pr_id.to_string())
                    .attr("name", self.name.as_str()),
            )
            .child(
                XmlElement::new("wp:cNvGraphicFramePr").child(
                    XmlElement::new("a:graphicFrameLocks")
                        .attr("xmlns:a", A_NS)
                        .attr("noChangeAspect", "1"),
                ),
            )
            .child(
                XmlElement::new("a:graphic").attr("xmlns:a", A_NS).child(
                    XmlElement::new("a:graphicData")
                        .attr("uri", PIC_NS)
                        .child(picture),
                ),
            );

        XmlElement::new("w:r").child(XmlElement::new("w:drawing").child(inline))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_and_embed_reference() {
        let run = Box::new(Drawing::new("rId9", 4, "evidence_1.png", DisplaySize::new(76200, 38100))).build();
        let inline = run
            .find_children("w:drawing")
            .next()
            .and_then(|d| d.find_children("wp:inline").next())
            .unwrap();
        let extent = inline.find_children("wp:extent").next().unwrap();
        assert_eq!(extent.get_attr("cx"), Some("76200"));
        assert_eq!(extent.get_attr("cy"), Some("38100"));
        assert_eq!(inline.find_children("wp:docPr").next().unwrap().get_attr("id"), Some("4"));

        let blip = inline
            .find_children("a:graphic")
            .flat_map(|g| g.find_children("a:graphicData"))
            .flat_map(|g| g.find_children("pic:pic"))
            .flat_map(|p| p.find_children("pic:blipFill"))
            .flat_map(|b| b.find_children("a:blip"))
            .next()
            .unwrap();
        assert_eq!(blip.get_attr("r:embed"), Some("rId9"));
    }
}
