//! Expansion of the recommended-actions placeholder into bullet paragraphs.

use crate::builders::{Paragraph, Run, WordBuilder};
use dossier_package::wordml;
use dossier_package::{NodeId, XmlDocument, XmlElement};
use dossier_types::{BulletEntry, BulletLevel, NOT_AVAILABLE};

pub(crate) const BODY_FONT: &str = "Calibri";
pub(crate) const BODY_SIZE_PT: f32 = 11.0;

/// Left indent and hanging indent, in twips, for a bullet level.
pub fn bullet_indent(level: BulletLevel) -> (u32, u32) {
    match level {
        BulletLevel::One => (360, 240),
        BulletLevel::Two => (720, 240),
    }
}

/// A `glyph  text` paragraph indented for the entry's level.
pub fn bullet_paragraph(entry: &BulletEntry) -> XmlElement {
    let (left, hanging) = bullet_indent(entry.level);
    Box::new(
        Paragraph::new()
            .spacing(0, 60)
            .indent(left, hanging)
            .run(Run::new(entry.display_text()).font(BODY_FONT).size_pt(BODY_SIZE_PT)),
    )
    .build()
}

fn fallback_paragraph() -> XmlElement {
    Box::new(Paragraph::new().run(Run::new(NOT_AVAILABLE).font(BODY_FONT).size_pt(BODY_SIZE_PT))).build()
}

/// First paragraph under `scope` whose run text contains `token`.
pub fn find_placeholder(doc: &XmlDocument, scope: NodeId, token: &str) -> Option<NodeId> {
    wordml::paragraphs(doc, scope)
        .into_iter()
        .find(|p| wordml::paragraph_text(doc, *p).contains(token))
}

/// Replaces the paragraph holding `token` with one paragraph per entry, or a
/// single "N/A" paragraph when there are no entries.
///
/// The new paragraphs take the placeholder's place among its siblings and the
/// placeholder is removed. Returns `false` when no paragraph holds the token.
pub fn expand_bullets(doc: &mut XmlDocument, scope: NodeId, token: &str, entries: &[BulletEntry]) -> bool {
    let Some(placeholder) = find_placeholder(doc, scope, token) else {
        log::debug!("No paragraph holds {}; skipping list expansion", token);
        return false;
    };

    let paragraphs: Vec<XmlElement> = if entries.is_empty() {
        vec![fallback_paragraph()]
    } else {
        entries.iter().map(bullet_paragraph).collect()
    };

    for paragraph in &paragraphs {
        let id = doc.import(paragraph);
        if !doc.insert_before(placeholder, id) {
            log::warn!("Placeholder paragraph for {} is detached; list not expanded", token);
            return false;
        }
    }
    doc.detach(placeholder);
    log::debug!("Expanded {} into {} paragraph(s)", token, paragraphs.len());
    true
}
