//! The report's sections expressed as layout blocks.

use crate::fonts::PdfFont;
use crate::images::PdfImage;
use crate::layout::{Block, TableBlock, TextAlign, TextBlock, TextStyle};
use dossier_image::ImageNormalizer;
use dossier_types::{
    figure_caption, palette, BulletEntry, BulletLevel, EvidenceImage, RenderedFields, Size, EVIDENCE_HEADING,
    FINAL_OBSERVATION_LABEL, NOT_AVAILABLE, RECOMMENDED_ACTIONS_LABEL, REPORT_TITLE, SECTION_ALERT_INFORMATION,
    SECTION_ASSESSMENT, SECTION_EVENT_SUMMARY, SECTION_EXECUTIVE_SUMMARY, SECTION_REFERENCES,
    SECTION_TECHNICAL_DETAILS,
};

pub const BODY_SIZE: f32 = 10.5;
pub const LOGO_HEIGHT: f32 = 40.0;
pub const FOOTER_SIZE: f32 = 8.0;

/// Left indent of a bullet line in points.
pub fn bullet_indent(level: BulletLevel) -> f32 {
    match level {
        BulletLevel::One => 6.0,
        BulletLevel::Two => 18.0,
    }
}

pub fn footer_text(organization: &str, page: usize, total: usize) -> String {
    format!("CONFIDENTIAL — {} | Page {} of {}", organization, page, total)
}

fn body_style() -> TextStyle {
    TextStyle::new(PdfFont::Regular, BODY_SIZE)
}

fn section_title(title: &str) -> Block {
    Block::Text(
        TextBlock::new(title, TextStyle::new(PdfFont::Bold, 12.0).color(palette::BRAND_BLUE))
            .space_before(12.0)
            .keep_with_next(),
    )
}

fn field_label(label: &str) -> Block {
    Block::Text(
        TextBlock::new(label, TextStyle::new(PdfFont::Bold, BODY_SIZE))
            .space_before(8.0)
            .keep_with_next(),
    )
}

fn body_text(text: &str, space_before: f32) -> Block {
    Block::Text(TextBlock::new(text, body_style()).space_before(space_before))
}

fn table(rows: Vec<(&'static str, &str)>) -> Block {
    Block::Table(TableBlock {
        rows: rows
            .into_iter()
            .map(|(label, value)| (label.to_string(), value.to_string()))
            .collect(),
        space_before: 6.0,
    })
}

fn bullet(entry: &BulletEntry, space_before: f32) -> Block {
    let style = body_style();
    let marker = format!("{}  ", entry.level.glyph());
    Block::Text(
        TextBlock::new(entry.display_text(), style)
            .indent(bullet_indent(entry.level), style.width_of(&marker))
            .space_before(space_before),
    )
}

/// The title block repeated at the top of every page. `logo` is the image
/// index and decoded logo, when one is available.
pub fn header_blocks(organization: &str, generated_date: &str, logo: Option<(usize, &PdfImage)>) -> Vec<Block> {
    let mut blocks = Vec::new();
    if let Some((index, image)) = logo {
        if image.height > 0 {
            let width = LOGO_HEIGHT * image.width as f32 / image.height as f32;
            blocks.push(Block::Image {
                image: index,
                size: Size::new(width, LOGO_HEIGHT),
                align: TextAlign::Center,
                space_before: 0.0,
            });
        }
    }
    let centered = |text: String, style: TextStyle| Block::Text(TextBlock::new(text, style).align(TextAlign::Center));
    blocks.push(centered(
        REPORT_TITLE.to_string(),
        TextStyle::new(PdfFont::Bold, 17.0).color(palette::BRAND_BLUE),
    ));
    blocks.push(centered(
        organization.to_string(),
        TextStyle::new(PdfFont::Regular, 10.0).color(palette::MUTED_GRAY),
    ));
    blocks.push(centered(
        format!("Generated: {}", generated_date),
        TextStyle::new(PdfFont::Regular, 9.0).color(palette::MUTED_GRAY),
    ));
    blocks.push(Block::Rule {
        thickness: 1.5,
        color: palette::BRAND_BLUE,
        space_before: 6.0,
        space_after: 0.0,
    });
    blocks
}

/// Body sections in report order, without the evidence section.
pub fn body_blocks(fields: &RenderedFields) -> Vec<Block> {
    let mut blocks = vec![
        section_title(SECTION_EXECUTIVE_SUMMARY),
        body_text(&fields.executive_summary, 2.0),
        Block::Rule {
            thickness: 0.75,
            color: palette::BRAND_BLUE,
            space_before: 6.0,
            space_after: 6.0,
        },
        section_title(SECTION_ALERT_INFORMATION),
        table(fields.alert_rows()),
        section_title(SECTION_EVENT_SUMMARY),
        body_text(&fields.event_summary, 2.0),
        section_title(SECTION_TECHNICAL_DETAILS),
        table(fields.technical_rows()),
        section_title(SECTION_ASSESSMENT),
    ];

    for soc in &fields.soc_blocks {
        blocks.push(field_label(&soc.label));
        blocks.push(body_text(&soc.text, 2.0));
    }

    blocks.push(field_label(RECOMMENDED_ACTIONS_LABEL));
    if fields.recommended_actions.is_empty() {
        blocks.push(body_text(NOT_AVAILABLE, 2.0));
    } else {
        for (i, entry) in fields.recommended_actions.iter().enumerate() {
            blocks.push(bullet(entry, if i == 0 { 2.0 } else { 0.0 }));
        }
    }

    blocks.push(field_label(FINAL_OBSERVATION_LABEL));
    blocks.push(body_text(&fields.final_observation, 2.0));

    blocks.push(section_title(SECTION_REFERENCES));
    blocks.push(body_text(&fields.references, 2.0));
    blocks
}

/// The evidence section: a page break, the heading, then caption and image
/// per evidence entry. Decoded images are appended to `images` and referenced
/// by index. An image that cannot be decoded keeps its caption only.
pub fn evidence_blocks(
    evidence: &[EvidenceImage],
    normalizer: &ImageNormalizer,
    images: &mut Vec<PdfImage>,
) -> Vec<Block> {
    if evidence.is_empty() {
        return Vec::new();
    }
    let caption_style = TextStyle::new(PdfFont::Oblique, 9.0).color(palette::MUTED_GRAY);
    let mut blocks = vec![Block::PageBreak, section_title(EVIDENCE_HEADING)];

    for (i, item) in evidence.iter().enumerate() {
        let caption = TextBlock::new(figure_caption(i + 1, &item.display_name), caption_style).space_before(8.0);
        match PdfImage::decode(&item.data) {
            Ok(image) => {
                let (width, height) = normalizer.display_size(&item.data).to_points();
                blocks.push(Block::Text(caption.keep_with_next()));
                blocks.push(Block::Image {
                    image: images.len(),
                    size: Size::new(width, height),
                    align: TextAlign::Center,
                    space_before: 4.0,
                });
                images.push(image);
            }
            Err(e) => {
                log::warn!("Evidence image '{}' could not be decoded: {}", item.display_name, e);
                blocks.push(Block::Text(caption));
            }
        }
        blocks.push(Block::Spacer(12.0));
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use dossier_types::{ReportFields, SocAction};

    fn fields(action: SocAction, actions: Option<&str>) -> RenderedFields {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let mut fields = ReportFields::new("ALT-7", "Credential stuffing", at);
        fields.soc_action = action;
        fields.soc_assessment = "Blocked".into();
        fields.soc_actions_taken = Some("Disabled account".into());
        fields.recommended_actions = actions.map(str::to_string);
        RenderedFields::new(&fields, at)
    }

    fn texts(blocks: &[Block]) -> Vec<&str> {
        blocks
            .iter()
            .filter_map(|b| match b {
                Block::Text(t) => Some(t.content.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn sections_follow_report_order() {
        let blocks = body_blocks(&fields(SocAction::AssessmentOnly, None));
        let texts = texts(&blocks);
        let position = |s: &str| texts.iter().position(|t| *t == s).unwrap();
        assert!(position(SECTION_EXECUTIVE_SUMMARY) < position(SECTION_ALERT_INFORMATION));
        assert!(position(SECTION_ALERT_INFORMATION) < position(SECTION_EVENT_SUMMARY));
        assert!(position(SECTION_EVENT_SUMMARY) < position(SECTION_TECHNICAL_DETAILS));
        assert!(position(SECTION_TECHNICAL_DETAILS) < position(SECTION_ASSESSMENT));
        assert!(position(RECOMMENDED_ACTIONS_LABEL) < position(FINAL_OBSERVATION_LABEL));
        assert!(position(FINAL_OBSERVATION_LABEL) < position(SECTION_REFERENCES));
    }

    #[test]
    fn both_action_prints_taken_then_assessment() {
        let blocks = body_blocks(&fields(SocAction::Both, None));
        let texts = texts(&blocks);
        let taken = texts.iter().position(|t| *t == "Actions Taken by SOC:").unwrap();
        let assessment = texts.iter().position(|t| *t == "SOC Assessment:").unwrap();
        assert!(taken < assessment);
        assert!(texts.contains(&"Disabled account"));
    }

    #[test]
    fn bullets_carry_glyph_and_level_indent() {
        let blocks = body_blocks(&fields(
            SocAction::AssessmentOnly,
            Some("- Reset password\n  - Notify user\n- Rotate key"),
        ));
        let bullets: Vec<(&str, f32)> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Text(t) if t.indent > 0.0 => Some((t.content.as_str(), t.indent)),
                _ => None,
            })
            .collect();
        assert_eq!(
            bullets,
            vec![("•  Reset password", 6.0), ("◦  Notify user", 18.0), ("•  Rotate key", 6.0)]
        );
    }

    #[test]
    fn empty_recommendations_print_not_available() {
        let blocks = body_blocks(&fields(SocAction::AssessmentOnly, Some("\n  \n")));
        let texts = texts(&blocks);
        let label = texts.iter().position(|t| *t == RECOMMENDED_ACTIONS_LABEL).unwrap();
        assert_eq!(texts[label + 1], NOT_AVAILABLE);
    }

    #[test]
    fn no_evidence_means_no_page_break() {
        let mut images = Vec::new();
        assert!(evidence_blocks(&[], &ImageNormalizer::new(), &mut images).is_empty());
        assert!(images.is_empty());
    }

    #[test]
    fn undecodable_evidence_keeps_caption_only() {
        let mut images = Vec::new();
        let evidence = [EvidenceImage::new("broken.png", b"not an image".to_vec())];
        let blocks = evidence_blocks(&evidence, &ImageNormalizer::new(), &mut images);
        assert!(matches!(blocks[0], Block::PageBreak));
        assert!(texts(&blocks).contains(&"Figure 1 — broken.png"));
        assert!(!blocks.iter().any(|b| matches!(b, Block::Image { .. })));
        assert!(images.is_empty());
    }

    #[test]
    fn footer_counts_pages() {
        assert_eq!(footer_text("Acme SOC", 2, 3), "CONFIDENTIAL — Acme SOC | Page 2 of 3");
    }
}
