//! The built-in incident report template.
//!
//! Every well-known token is pre-placed in a paragraph or table cell formatted
//! the way the filled report should look. The token-bearing runs carry their
//! formatting so substitution can reapply it.

use crate::builders::{Alignment, Cell, Paragraph, Row, Run, Table, WordBuilder};
use crate::expand::{BODY_FONT, BODY_SIZE_PT};
use chrono::{DateTime, Utc};
use dossier_package::wordml::{CP_NS, DCTERMS_NS, DC_NS, R_NS, W_NS, XSI_NS};
use dossier_package::{
    Package, XmlDocument, XmlElement, CT_CORE_PROPERTIES, CT_FOOTER, CT_HEADER, CT_MAIN_DOCUMENT, CT_STYLES,
    REL_CORE_PROPERTIES, REL_FOOTER, REL_HEADER, REL_OFFICE_DOCUMENT, REL_STYLES,
};
use dossier_types::{
    palette, Token, ALERT_TABLE, FINAL_OBSERVATION_LABEL, RECOMMENDED_ACTIONS_LABEL, REPORT_TITLE,
    SECTION_ALERT_INFORMATION, SECTION_ASSESSMENT, SECTION_EVENT_SUMMARY, SECTION_EXECUTIVE_SUMMARY,
    SECTION_REFERENCES, SECTION_TECHNICAL_DETAILS, TECHNICAL_TABLE,
};

/// Written to `cp:version` in the template's core properties.
pub const TEMPLATE_SCHEMA_VERSION: &str = "2";

pub const DOCUMENT_PART: &str = "word/document.xml";
pub const STYLES_PART: &str = "word/styles.xml";
pub const HEADER_PART: &str = "word/header1.xml";
pub const FOOTER_PART: &str = "word/footer1.xml";
pub const CORE_PROPERTIES_PART: &str = "docProps/core.xml";

/// A4 in twips.
const PAGE_WIDTH: u32 = 11906;
const PAGE_HEIGHT: u32 = 16838;
/// 2 cm.
const PAGE_MARGIN: u32 = 1134;
const HEADER_DISTANCE: u32 = 567;

const LABEL_COLUMNS: [u32; 2] = [2000, 3000];

fn body_run(text: &str) -> Run {
    Run::new(text).font(BODY_FONT).size_pt(BODY_SIZE_PT)
}

fn section_heading(title: &str) -> Paragraph {
    Paragraph::new().spacing(240, 120).keep_next().run(
        Run::new(title)
            .bold()
            .size_pt(13.0)
            .color(palette::BRAND_BLUE)
            .font(BODY_FONT),
    )
}

fn sub_heading(title: &str) -> Paragraph {
    Paragraph::new().spacing(200, 80).keep_next().run(
        Run::new(title)
            .bold()
            .size_pt(11.5)
            .color(palette::BRAND_BLUE)
            .font(BODY_FONT),
    )
}

fn field_label(text: &str) -> Paragraph {
    Paragraph::new()
        .spacing(120, 40)
        .keep_next()
        .run(body_run(text).bold())
}

fn token_paragraph(token: Token) -> Paragraph {
    Paragraph::new().spacing(0, 120).run(body_run(token.as_str()))
}

fn info_table(rows: &[(&str, Token)]) -> Table {
    rows.iter().fold(
        Table::new().columns(&LABEL_COLUMNS).border(palette::CELL_BORDER),
        |table, (label, token)| {
            table.row(
                Row::new()
                    .cell(
                        Cell::new()
                            .shading(palette::CELL_BACKGROUND)
                            .child(Paragraph::new().spacing(40, 40).run(
                                Run::new(*label).bold().font(BODY_FONT).size_pt(10.0),
                            )),
                    )
                    .cell(Cell::new().child(Paragraph::new().spacing(40, 40).run(
                        Run::new(token.as_str()).font(BODY_FONT).size_pt(10.0),
                    ))),
            )
        },
    )
}

/// Body content of the template, top to bottom.
fn body_blocks(organization: &str) -> Vec<Box<dyn WordBuilder>> {
    vec![
        Box::new(
            Paragraph::new().align(Alignment::Center).spacing(0, 60).run(
                Run::new(REPORT_TITLE)
                    .bold()
                    .size_pt(20.0)
                    .color(palette::BRAND_BLUE)
                    .font(BODY_FONT),
            ),
        ),
        Box::new(
            Paragraph::new().align(Alignment::Center).spacing(0, 60).run(
                Run::new(Token::Title.as_str())
                    .size_pt(13.0)
                    .color(palette::MUTED_GRAY)
                    .font(BODY_FONT),
            ),
        ),
        Box::new(
            Paragraph::new().align(Alignment::Center).spacing(0, 240).run(
                Run::new(format!("Generated: {}", Token::GeneratedDate.as_str()))
                    .size_pt(9.0)
                    .color(palette::MUTED_GRAY)
                    .font(BODY_FONT),
            ),
        ),
        Box::new(section_heading(SECTION_EXECUTIVE_SUMMARY)),
        Box::new(token_paragraph(Token::ExecutiveSummary)),
        Box::new(section_heading(SECTION_ALERT_INFORMATION)),
        Box::new(info_table(&ALERT_TABLE)),
        Box::new(section_heading(SECTION_EVENT_SUMMARY)),
        Box::new(token_paragraph(Token::EventSummary)),
        Box::new(sub_heading(SECTION_TECHNICAL_DETAILS)),
        Box::new(info_table(&TECHNICAL_TABLE)),
        Box::new(section_heading(SECTION_ASSESSMENT)),
        Box::new(field_label(Token::SocActionsTakenLabel.as_str())),
        Box::new(token_paragraph(Token::SocActionsTaken)),
        Box::new(field_label(Token::SocActionLabel.as_str())),
        Box::new(token_paragraph(Token::SocAssessment)),
        Box::new(field_label(RECOMMENDED_ACTIONS_LABEL)),
        Box::new(token_paragraph(Token::RecommendedActions)),
        Box::new(field_label(FINAL_OBSERVATION_LABEL)),
        Box::new(token_paragraph(Token::FinalObservation)),
        Box::new(section_heading(SECTION_REFERENCES)),
        Box::new(token_paragraph(Token::References)),
        Box::new(
            Paragraph::new().spacing(360, 0).run(
                Run::new(format!(
                    "This report was generated automatically by {}. Handle according to its classification.",
                    organization
                ))
                .italic()
                .size_pt(8.0)
                .color(palette::MUTED_GRAY)
                .font(BODY_FONT),
            ),
        ),
    ]
}

fn section_properties(header_id: &str, footer_id: &str) -> XmlElement {
    XmlElement::new("w:sectPr")
        .child(
            XmlElement::new("w:headerReference")
                .attr("w:type", "default")
                .attr("r:id", header_id),
        )
        .child(
            XmlElement::new("w:footerReference")
                .attr("w:type", "default")
                .attr("r:id", footer_id),
        )
        .child(
            XmlElement::new("w:pgSz")
                .attr("w:w", PAGE_WIDTH.to_string())
                .attr("w:h", PAGE_HEIGHT.to_string()),
        )
        .child(
            XmlElement::new("w:pgMar")
                .attr("w:top", PAGE_MARGIN.to_string())
                .attr("w:right", PAGE_MARGIN.to_string())
                .attr("w:bottom", PAGE_MARGIN.to_string())
                .attr("w:left", PAGE_MARGIN.to_string())
                .attr("w:header", HEADER_DISTANCE.to_string())
                .attr("w:footer", HEADER_DISTANCE.to_string())
                .attr("w:gutter", "0"),
        )
}

fn document(organization: &str, header_id: &str, footer_id: &str) -> XmlElement {
    let body = XmlElement::new("w:body")
        .children(body_blocks(organization).into_iter().map(|b| b.build()))
        .child(section_properties(header_id, footer_id));
    XmlElement::new("w:document")
        .attr("xmlns:w", W_NS)
        .attr("xmlns:r", R_NS)
        .child(body)
}

fn styles() -> XmlElement {
    let run_defaults = XmlElement::new("w:rPrDefault").child(
        XmlElement::new("w:rPr")
            .child(
                XmlElement::new("w:rFonts")
                    .attr("w:ascii", BODY_FONT)
                    .attr("w:hAnsi", BODY_FONT)
                    .attr("w:cs", BODY_FONT),
            )
            .child(XmlElement::new("w:sz").attr("w:val", "22"))
            .child(XmlElement::new("w:szCs").attr("w:val", "22"))
            .child(XmlElement::new("w:lang").attr("w:val", "en-US")),
    );
    let paragraph_defaults = XmlElement::new("w:pPrDefault").child(
        XmlElement::new("w:pPr").child(
            XmlElement::new("w:spacing")
                .attr("w:after", "120")
                .attr("w:line", "264")
                .attr("w:lineRule", "auto"),
        ),
    );
    XmlElement::new("w:styles")
        .attr("xmlns:w", W_NS)
        .child(
            XmlElement::new("w:docDefaults")
                .child(run_defaults)
                .child(paragraph_defaults),
        )
        .child(
            XmlElement::new("w:style")
                .attr("w:type", "paragraph")
                .attr("w:default", "1")
                .attr("w:styleId", "Normal")
                .child(XmlElement::new("w:name").attr("w:val", "Normal"))
                .child(XmlElement::new("w:qFormat")),
        )
}

fn header(organization: &str) -> XmlElement {
    let p = Paragraph::new().align(Alignment::Right).spacing(0, 0).run(
        Run::new(format!("{} | Incident {}", organization, Token::AlertId.as_str()))
            .size_pt(8.0)
            .color(palette::MUTED_GRAY)
            .font(BODY_FONT),
    );
    XmlElement::new("w:hdr")
        .attr("xmlns:w", W_NS)
        .attr("xmlns:r", R_NS)
        .child(Box::new(p).build())
}

fn footer(organization: &str) -> XmlElement {
    let p = Paragraph::new().align(Alignment::Center).spacing(0, 0).run(
        Run::new(format!("CONFIDENTIAL — {}", organization))
            .size_pt(8.0)
            .color(palette::MUTED_GRAY)
            .font(BODY_FONT),
    );
    XmlElement::new("w:ftr")
        .attr("xmlns:w", W_NS)
        .attr("xmlns:r", R_NS)
        .child(Box::new(p).build())
}

fn core_properties(organization: &str, created: DateTime<Utc>) -> XmlElement {
    let timestamp = created.format("%Y-%m-%dT%H:%M:%SZ").to_string();
    XmlElement::new("cp:coreProperties")
        .attr("xmlns:cp", CP_NS)
        .attr("xmlns:dc", DC_NS)
        .attr("xmlns:dcterms", DCTERMS_NS)
        .attr("xmlns:xsi", XSI_NS)
        .child(XmlElement::new("dc:title").text(format!("{} Template", REPORT_TITLE)))
        .child(XmlElement::new("dc:creator").text(organization))
        .child(XmlElement::new("cp:lastModifiedBy").text(organization))
        .child(XmlElement::new("cp:version").text(TEMPLATE_SCHEMA_VERSION))
        .child(
            XmlElement::new("dcterms:created")
                .attr("xsi:type", "dcterms:W3CDTF")
                .text(timestamp.as_str()),
        )
        .child(
            XmlElement::new("dcterms:modified")
                .attr("xsi:type", "dcterms:W3CDTF")
                .text(timestamp),
        )
}

/// Builds the complete template package in memory.
pub fn template_package(organization: &str, created: DateTime<Utc>) -> Package {
    let mut package = Package::new();

    let root_rels = package.relationships_mut("");
    root_rels.add(REL_OFFICE_DOCUMENT, DOCUMENT_PART);
    root_rels.add(REL_CORE_PROPERTIES, CORE_PROPERTIES_PART);

    let doc_rels = package.relationships_mut(DOCUMENT_PART);
    doc_rels.add(REL_STYLES, "styles.xml");
    let header_id = doc_rels.add(REL_HEADER, "header1.xml");
    let footer_id = doc_rels.add(REL_FOOTER, "footer1.xml");

    package.insert_xml_part(
        DOCUMENT_PART,
        XmlDocument::from_element(&document(organization, &header_id, &footer_id)),
        Some(CT_MAIN_DOCUMENT),
    );
    package.insert_xml_part(STYLES_PART, XmlDocument::from_element(&styles()), Some(CT_STYLES));
    package.insert_xml_part(HEADER_PART, XmlDocument::from_element(&header(organization)), Some(CT_HEADER));
    package.insert_xml_part(FOOTER_PART, XmlDocument::from_element(&footer(organization)), Some(CT_FOOTER));
    package.insert_xml_part(
        CORE_PROPERTIES_PART,
        XmlDocument::from_element(&core_properties(organization, created)),
        Some(CT_CORE_PROPERTIES),
    );
    package
}
