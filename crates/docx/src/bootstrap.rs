//! Creating the on-disk template and deciding whether an existing one is current.

use crate::error::DocxError;
use crate::template::{template_package, TEMPLATE_SCHEMA_VERSION};
use chrono::Utc;
use dossier_package::{wordml, Package, PackageError};
use dossier_types::Token;
use std::fmt;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Classification of a template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateStatus {
    Current,
    Missing,
    /// The package opened but its layout or version is outdated.
    Stale(String),
    /// The file could not be read or is not a valid package.
    Unreadable(String),
}

impl TemplateStatus {
    pub fn is_current(&self) -> bool {
        matches!(self, TemplateStatus::Current)
    }
}

impl fmt::Display for TemplateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateStatus::Current => write!(f, "current"),
            TemplateStatus::Missing => write!(f, "missing"),
            TemplateStatus::Stale(reason) => write!(f, "stale ({})", reason),
            TemplateStatus::Unreadable(reason) => write!(f, "unreadable ({})", reason),
        }
    }
}

/// What [`ensure_template`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    AlreadyCurrent,
    Created,
    Regenerated,
}

fn schema_version(package: &Package) -> Result<Option<String>, PackageError> {
    let Some(part) = package.core_properties_part() else {
        return Ok(None);
    };
    let core = package.xml_part(&part)?;
    Ok(core
        .first_child_element(core.root(), "cp:version")
        .map(|v| core.text_content(v).trim().to_string()))
}

fn classify_package(package: &Package) -> Result<TemplateStatus, PackageError> {
    let main = package.main_document_part()?;
    let text = wordml::part_text(package.xml_part(&main)?);

    let taken = text.find(Token::SocActionsTakenLabel.as_str());
    let action = text.find(Token::SocActionLabel.as_str());
    let status = match (taken, action) {
        (None, _) | (_, None) => TemplateStatus::Stale("SOC label tokens missing".into()),
        (Some(t), Some(a)) if t >= a => TemplateStatus::Stale("SOC label tokens out of order".into()),
        _ if !text.contains(Token::References.as_str()) => {
            TemplateStatus::Stale("references token missing".into())
        }
        _ => match schema_version(package)? {
            Some(v) if v != TEMPLATE_SCHEMA_VERSION => {
                TemplateStatus::Stale(format!("schema version {} != {}", v, TEMPLATE_SCHEMA_VERSION))
            }
            _ => TemplateStatus::Current,
        },
    };
    Ok(status)
}

/// Classifies template bytes. Any failure to open or inspect the package
/// classifies it as unreadable rather than returning an error.
pub fn classify_template(bytes: &[u8]) -> TemplateStatus {
    match Package::open(bytes).and_then(|p| classify_package(&p)) {
        Ok(status) => status,
        Err(e) => TemplateStatus::Unreadable(e.to_string()),
    }
}

/// Classifies the template file at `path`.
pub fn template_status(path: &Path) -> TemplateStatus {
    match fs::read(path) {
        Ok(bytes) => classify_template(&bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => TemplateStatus::Missing,
        Err(e) => TemplateStatus::Unreadable(e.to_string()),
    }
}

/// Serialized bytes of the built-in template.
pub fn template_bytes(organization: &str) -> Result<Vec<u8>, DocxError> {
    Ok(template_package(organization, Utc::now()).to_bytes()?)
}

/// Writes the built-in template to `path`.
///
/// The bytes go to a temporary file in the destination directory which is then
/// renamed over `path`, so readers never observe a partially written template.
pub fn write_template(path: &Path, organization: &str) -> Result<(), DocxError> {
    let bytes = template_bytes(organization)?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| DocxError::Persist {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

/// Leaves a current template alone and (re)creates anything else.
pub fn ensure_template(path: &Path, organization: &str) -> Result<EnsureOutcome, DocxError> {
    let outcome = match template_status(path) {
        TemplateStatus::Current => {
            log::debug!("Template at {} is current", path.display());
            return Ok(EnsureOutcome::AlreadyCurrent);
        }
        TemplateStatus::Missing => EnsureOutcome::Created,
        status => {
            log::info!("Template at {} is {}; regenerating", path.display(), status);
            EnsureOutcome::Regenerated
        }
    };
    write_template(path, organization)?;
    log::info!("Wrote report template to {}", path.display());
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{CORE_PROPERTIES_PART, DOCUMENT_PART};
    use dossier_package::{wordml::W_T, XmlDocument};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// The built-in template with its text transformed by `edit`.
    fn edited_template(edit: impl Fn(&str) -> String) -> Vec<u8> {
        let mut package = template_package("Acme SOC", Utc::now());
        let doc = package.xml_part_mut(DOCUMENT_PART).unwrap();
        for t in doc.descendants_named(doc.root(), W_T) {
            let text = doc.text_content(t);
            doc.set_text(t, edit(&text));
        }
        package.to_bytes().unwrap()
    }

    #[test]
    fn built_in_template_is_current() {
        let bytes = template_bytes("Acme SOC").unwrap();
        assert_eq!(classify_template(&bytes), TemplateStatus::Current);
    }

    #[test]
    fn swapped_soc_labels_are_stale() {
        let bytes = edited_template(|t| match t {
            "{{SOC_ACTIONS_TAKEN_LABEL}}" => "{{SOC_ACTION_LABEL}}".to_string(),
            "{{SOC_ACTION_LABEL}}" => "{{SOC_ACTIONS_TAKEN_LABEL}}".to_string(),
            other => other.to_string(),
        });
        assert!(matches!(classify_template(&bytes), TemplateStatus::Stale(_)));
    }

    #[test]
    fn missing_references_is_stale() {
        let bytes = edited_template(|t| t.replace("{{REFERENCES}}", ""));
        assert!(matches!(classify_template(&bytes), TemplateStatus::Stale(_)));
    }

    #[test]
    fn version_mismatch_is_stale() {
        let mut package = template_package("Acme SOC", Utc::now());
        let core = package.xml_part_mut(CORE_PROPERTIES_PART).unwrap();
        let version = core.first_child_element(core.root(), "cp:version").unwrap();
        core.set_text(version, "1");
        let bytes = package.to_bytes().unwrap();
        assert!(matches!(classify_template(&bytes), TemplateStatus::Stale(_)));
    }

    #[test]
    fn template_without_version_is_judged_by_tokens() {
        let mut package = template_package("Acme SOC", Utc::now());
        let core = package.xml_part_mut(CORE_PROPERTIES_PART).unwrap();
        let version = core.first_child_element(core.root(), "cp:version").unwrap();
        core.detach(version);
        let bytes = package.to_bytes().unwrap();
        assert_eq!(classify_template(&bytes), TemplateStatus::Current);
    }

    #[test]
    fn garbage_is_unreadable() {
        assert!(matches!(classify_template(b"PK\x03\x04garbage"), TemplateStatus::Unreadable(_)));
        let not_docx = XmlDocument::parse(b"<a/>").unwrap().to_bytes().unwrap();
        assert!(matches!(classify_template(&not_docx), TemplateStatus::Unreadable(_)));
    }

    #[test]
    fn ensure_creates_then_keeps_then_regenerates() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("templates").join("incident_report_template.docx");

        assert_eq!(template_status(&path), TemplateStatus::Missing);
        assert_eq!(ensure_template(&path, "Acme SOC").unwrap(), EnsureOutcome::Created);
        assert!(template_status(&path).is_current());

        assert_eq!(ensure_template(&path, "Acme SOC").unwrap(), EnsureOutcome::AlreadyCurrent);

        fs::write(&path, b"corrupt").unwrap();
        assert_eq!(ensure_template(&path, "Acme SOC").unwrap(), EnsureOutcome::Regenerated);
        assert!(template_status(&path).is_current());
    }
}
