//! The evidence section: a page break, a heading, then caption, picture and
//! spacer paragraphs for every image, placed before the body's final section
//! properties.

use crate::builders::{Alignment, Drawing, Paragraph, Run, WordBuilder};
use crate::error::DocxError;
use crate::expand::BODY_FONT;
use dossier_image::{DisplaySize, ImageNormalizer};
use dossier_package::wordml;
use dossier_package::{NodeId, Package, XmlDocument, XmlElement};
use dossier_types::{figure_caption, palette, EvidenceImage, EVIDENCE_HEADING};

struct EmbeddedImage {
    rel_id: String,
    size: DisplaySize,
    caption: String,
}

fn heading() -> Paragraph {
    Paragraph::new()
        .spacing(240, 120)
        .keep_next()
        .run(Run::new(EVIDENCE_HEADING).bold().size_pt(14.0).font(BODY_FONT))
}

fn caption(text: &str) -> Paragraph {
    Paragraph::new().spacing(120, 60).keep_next().run(
        Run::new(text)
            .italic()
            .color(palette::MUTED_GRAY)
            .size_pt(10.0)
            .font(BODY_FONT),
    )
}

fn section_elements(images: &[EmbeddedImage], first_doc_pr_id: u64) -> Vec<XmlElement> {
    let mut elements = vec![
        Box::new(Paragraph::new().run(Run::page_break())).build(),
        Box::new(heading()).build(),
    ];
    for (i, image) in images.iter().enumerate() {
        let n = i + 1;
        let drawing = Drawing::new(
            image.rel_id.as_str(),
            first_doc_pr_id + i as u64,
            format!("Evidence {}", n),
            image.size,
        );
        elements.push(Box::new(caption(&image.caption)).build());
        elements.push(Box::new(Paragraph::new().align(Alignment::Center).child(drawing)).build());
        elements.push(Box::new(Paragraph::new()).build());
    }
    elements
}

/// Inserts `id` before `anchor`, or at the end of `body` when there is no
/// anchor or the anchor has been detached.
fn place_in_body(doc: &mut XmlDocument, body: NodeId, anchor: Option<NodeId>, id: NodeId) {
    if let Some(sect) = anchor {
        if doc.insert_before(sect, id) {
            return;
        }
        log::warn!("Section properties are detached; appending evidence at the end of the body");
    }
    doc.append_child(body, id);
}

/// Embeds `images` in caller order into the main document part.
///
/// Each image becomes a new media part with its own relationship id. Nothing
/// is inserted when `images` is empty. Returns the number of embedded images.
pub fn append_evidence(
    package: &mut Package,
    images: &[EvidenceImage],
    normalizer: &ImageNormalizer,
) -> Result<usize, DocxError> {
    if images.is_empty() {
        return Ok(0);
    }
    let main = package.main_document_part()?;

    let mut embedded = Vec::with_capacity(images.len());
    for (i, image) in images.iter().enumerate() {
        let normalized = normalizer.normalize(&image.data);
        if normalized.transcoded {
            log::debug!("Evidence '{}' re-encoded as PNG", image.display_name);
        }
        let (extension, content_type) = (normalized.extension(), normalized.content_type());
        let size = normalized.size;
        let rel_id = package.add_image(&main, normalized.data, extension, content_type);
        embedded.push(EmbeddedImage {
            rel_id,
            size,
            caption: figure_caption(i + 1, &image.display_name),
        });
    }

    let doc = package.xml_part_mut(&main)?;
    let body = wordml::body(doc).ok_or_else(|| DocxError::MissingBody(main.clone()))?;
    let anchor = wordml::trailing_section_properties(doc, body);
    let first_id = doc.max_numeric_attribute("wp:docPr", "id").unwrap_or(0) + 1;

    for element in section_elements(&embedded, first_id) {
        let id = doc.import(&element);
        place_in_body(doc, body, anchor, id);
    }

    log::debug!("Appended {} evidence image(s) to '{}'", embedded.len(), main);
    Ok(embedded.len())
}
