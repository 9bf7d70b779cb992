use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TEMPLATE_PATH: &str = "templates/incident_report_template.docx";
pub const DEFAULT_ORGANIZATION: &str = "Security Operations Center";

/// Settings shared by both report services.
///
/// Every field may be omitted from the JSON file:
///
/// ```json
/// { "templatePath": "templates/report.docx", "organization": "Acme SOC" }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportConfig {
    pub template_path: PathBuf,
    /// Logo drawn in the PDF title block.
    pub logo_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    /// Printed in the title block, the page header and the footers.
    pub organization: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            logo_path: None,
            output_dir: PathBuf::from("."),
            organization: DEFAULT_ORGANIZATION.to_string(),
        }
    }
}

impl ReportConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_template_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_path = path.into();
        self
    }

    pub fn with_logo_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.logo_path = Some(path.into());
        self
    }

    pub fn with_output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = path.into();
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = organization.into();
        self
    }

    /// Reads the configured logo. A missing or unreadable file is logged and
    /// treated as no logo.
    pub fn load_logo(&self) -> Option<Vec<u8>> {
        let path = self.logo_path.as_ref()?;
        match fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                log::warn!("Logo {} could not be read, continuing without it: {}", path.display(), e);
                None
            }
        }
    }
}
