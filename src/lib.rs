//! Security incident reports from one field model, rendered two ways.
//!
//! [`DocxReportService`] fills an editable DOCX template that is created (or
//! regenerated when stale) by its constructor. [`PdfReportService`] lays the
//! same content out directly as PDF. Both implement [`ReportRenderer`] and
//! share field formatting, bullet parsing and image ordering.
//!
//! ```no_run
//! use dossier::{DocxReportService, ReportConfig, ReportRenderer};
//! use dossier::types::ReportFields;
//!
//! # fn main() -> Result<(), dossier::ReportError> {
//! let config = ReportConfig::default().with_organization("Acme SOC");
//! let service = DocxReportService::new(&config)?;
//! let fields = ReportFields::new("ALT-1", "Phishing", chrono::Utc::now());
//! let report = service.render(&fields, &[])?;
//! println!("{} ({} bytes)", report.file_name, report.bytes.len());
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod service;

pub use config::{ReportConfig, DEFAULT_ORGANIZATION, DEFAULT_TEMPLATE_PATH};
pub use error::{ConfigError, ReportError};
pub use service::{DocxReportService, GeneratedReport, PdfReportService, ReportFormat, ReportRenderer};

pub use dossier_docx as docx;
pub use dossier_image as image;
pub use dossier_package as package;
pub use dossier_render_lopdf as pdf;
pub use dossier_types as types;
