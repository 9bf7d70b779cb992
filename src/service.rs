//! The two report backends behind one trait.

use crate::config::ReportConfig;
use crate::error::ReportError;
use chrono::{DateTime, Utc};
use dossier_docx::{ensure_template, DocxComposer, EnsureOutcome};
use dossier_render_lopdf::PdfReportRenderer;
use dossier_types::{report_file_name, EvidenceImage, RenderedFields, ReportFields};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    Docx,
    Pdf,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Docx => "docx",
            ReportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ReportFormat::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            ReportFormat::Pdf => "application/pdf",
        }
    }
}

/// A finished report, ready to be sent or stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReport {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl GeneratedReport {
    fn new(format: ReportFormat, alert_id: &str, at: DateTime<Utc>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: report_file_name(alert_id, at, format.extension()),
            content_type: format.content_type(),
            bytes,
        }
    }

    /// Writes the report into `dir` under its file name.
    pub fn write_to(&self, dir: &Path) -> io::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Produces one report per call. Implementations keep no per-call state, so
/// a single instance can serve concurrent calls.
pub trait ReportRenderer: Send + Sync {
    fn format(&self) -> ReportFormat;

    /// Renders with `generated_at` as the generation timestamp.
    fn render_at(
        &self,
        fields: &ReportFields,
        images: &[EvidenceImage],
        generated_at: DateTime<Utc>,
    ) -> Result<GeneratedReport, ReportError>;

    fn render(&self, fields: &ReportFields, images: &[EvidenceImage]) -> Result<GeneratedReport, ReportError> {
        self.render_at(fields, images, Utc::now())
    }
}

/// Fills the on-disk DOCX template.
#[derive(Debug)]
pub struct DocxReportService {
    template_path: PathBuf,
    composer: DocxComposer,
}

impl DocxReportService {
    /// Runs the template startup gate and returns the service. The template
    /// is complete on disk before any call can read it.
    pub fn new(config: &ReportConfig) -> Result<Self, ReportError> {
        let outcome =
            ensure_template(&config.template_path, &config.organization).map_err(ReportError::Bootstrap)?;
        match outcome {
            EnsureOutcome::AlreadyCurrent => {
                log::debug!("Using template {}", config.template_path.display())
            }
            EnsureOutcome::Created | EnsureOutcome::Regenerated => {
                log::info!("Template {} {:?}", config.template_path.display(), outcome)
            }
        }
        Ok(Self {
            template_path: config.template_path.clone(),
            composer: DocxComposer::default(),
        })
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    fn read_template(&self) -> Result<Vec<u8>, ReportError> {
        fs::read(&self.template_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                log::error!("Report template {} disappeared", self.template_path.display());
                ReportError::MissingTemplate {
                    path: self.template_path.clone(),
                }
            }
            _ => ReportError::internal(e),
        })
    }
}

impl ReportRenderer for DocxReportService {
    fn format(&self) -> ReportFormat {
        ReportFormat::Docx
    }

    fn render_at(
        &self,
        fields: &ReportFields,
        images: &[EvidenceImage],
        generated_at: DateTime<Utc>,
    ) -> Result<GeneratedReport, ReportError> {
        let template = self.read_template()?;
        let rendered = RenderedFields::new(fields, generated_at);
        let bytes = self.composer.compose(&template, &rendered, images)?;
        log::info!(
            "Generated DOCX report for alert {} ({} image(s), {} bytes)",
            fields.alert_id,
            images.len(),
            bytes.len()
        );
        Ok(GeneratedReport::new(ReportFormat::Docx, &fields.alert_id, generated_at, bytes))
    }
}

/// Lays the report out directly as PDF.
#[derive(Debug)]
pub struct PdfReportService {
    renderer: PdfReportRenderer,
    logo: Option<Vec<u8>>,
}

impl PdfReportService {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            renderer: PdfReportRenderer::new(config.organization.clone()),
            logo: config.load_logo(),
        }
    }

    pub fn with_logo(mut self, logo: Option<Vec<u8>>) -> Self {
        self.logo = logo;
        self
    }
}

impl ReportRenderer for PdfReportService {
    fn format(&self) -> ReportFormat {
        ReportFormat::Pdf
    }

    fn render_at(
        &self,
        fields: &ReportFields,
        images: &[EvidenceImage],
        generated_at: DateTime<Utc>,
    ) -> Result<GeneratedReport, ReportError> {
        let rendered = RenderedFields::new(fields, generated_at);
        let bytes = self.renderer.render(&rendered, images, self.logo.as_deref())?;
        Ok(GeneratedReport::new(ReportFormat::Pdf, &fields.alert_id, generated_at, bytes))
    }
}
