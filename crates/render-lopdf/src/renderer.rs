use crate::error::RenderError;
use crate::fonts::PdfFont;
use crate::images::PdfImage;
use crate::layout::{LaidOutDocument, LayoutEngine, TextStyle};
use crate::painter::{paint, DocumentInfo};
use crate::report::{body_blocks, evidence_blocks, footer_text, header_blocks, FOOTER_SIZE};
use chrono::Utc;
use dossier_image::ImageNormalizer;
use dossier_types::{palette, EvidenceImage, PageGeometry, RenderedFields, REPORT_TITLE};

/// A laid-out report together with the images its pages reference.
#[derive(Debug, Clone)]
pub struct ReportLayout {
    pub document: LaidOutDocument,
    pub images: Vec<PdfImage>,
}

/// Renders a report straight to PDF without a template.
///
/// The renderer holds no per-report state and can be shared between threads.
#[derive(Debug)]
pub struct PdfReportRenderer {
    geometry: PageGeometry,
    normalizer: ImageNormalizer,
    organization: String,
}

impl PdfReportRenderer {
    pub fn new(organization: impl Into<String>) -> Self {
        Self {
            geometry: PageGeometry::default(),
            normalizer: ImageNormalizer::new(),
            organization: organization.into(),
        }
    }

    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_normalizer(mut self, normalizer: ImageNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Lays out every page, footers included, without producing PDF bytes.
    pub fn layout(&self, fields: &RenderedFields, evidence: &[EvidenceImage], logo: Option<&[u8]>) -> ReportLayout {
        let mut images = Vec::new();
        let logo = logo.and_then(|bytes| match PdfImage::decode(bytes) {
            Ok(image) => Some(image),
            Err(e) => {
                log::warn!("Logo could not be decoded, rendering without it: {}", e);
                None
            }
        });
        let logo_ref = logo.as_ref().map(|image| (0, image));
        let header = header_blocks(&self.organization, &fields.generated_date, logo_ref);
        if let Some(image) = logo {
            images.push(image);
        }

        let mut blocks = body_blocks(fields);
        blocks.extend(evidence_blocks(evidence, &self.normalizer, &mut images));

        let engine = LayoutEngine::new(self.geometry).with_header(&header);
        let mut document = engine.layout(&blocks);
        let footer_style = TextStyle::new(PdfFont::Regular, FOOTER_SIZE).color(palette::MUTED_GRAY);
        document.add_footers(&self.geometry, footer_style, |page, total| {
            footer_text(&self.organization, page, total)
        });
        ReportLayout { document, images }
    }

    pub fn render(
        &self,
        fields: &RenderedFields,
        evidence: &[EvidenceImage],
        logo: Option<&[u8]>,
    ) -> Result<Vec<u8>, RenderError> {
        let layout = self.layout(fields, evidence, logo);
        let info = DocumentInfo {
            title: format!("{} — {}", REPORT_TITLE, fields.alert_id),
            author: self.organization.clone(),
            created: Utc::now(),
        };
        let bytes = paint(&layout.document, &layout.images, self.geometry.size, &info)?;
        log::info!(
            "Rendered PDF report for alert {} ({} page(s), {} bytes)",
            fields.alert_id,
            layout.document.page_count(),
            bytes.len()
        );
        Ok(bytes)
    }
}
