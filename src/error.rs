use dossier_docx::DocxError;
use dossier_render_lopdf::RenderError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of one generate call or of the startup gate.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The template file is absent even after the bootstrap ran.
    #[error("report template not found at {}", path.display())]
    MissingTemplate { path: PathBuf },

    #[error("could not prepare the report template: {0}")]
    Bootstrap(#[source] DocxError),

    /// Anything else. The message stays generic; the cause is kept as the
    /// error source for logging.
    #[error("internal error while generating the report")]
    Internal {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ReportError {
    pub(crate) fn internal(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        log::error!("Report generation failed: {}", source);
        ReportError::Internal {
            source: Box::new(source),
        }
    }
}

impl From<DocxError> for ReportError {
    fn from(e: DocxError) -> Self {
        ReportError::internal(e)
    }
}

impl From<RenderError> for ReportError {
    fn from(e: RenderError) -> Self {
        ReportError::internal(e)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn internal_error_hides_its_cause() {
        let err = ReportError::from(RenderError::Other("xref table exploded".into()));
        assert_eq!(err.to_string(), "internal error while generating the report");
        let source = err.source().unwrap();
        assert!(source.to_string().contains("xref table exploded"));
    }

    #[test]
    fn missing_template_names_the_path() {
        let err = ReportError::MissingTemplate {
            path: PathBuf::from("templates/x.docx"),
        };
        assert!(err.to_string().contains("templates/x.docx"));
    }
}
