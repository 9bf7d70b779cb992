use dossier_package::PackageError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocxError {
    #[error("Package error: {0}")]
    Package(#[from] PackageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not replace template at {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },

    #[error("Part '{0}' has no w:body")]
    MissingBody(String),
}
