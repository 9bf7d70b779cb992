mod common;

use common::docx_assertions::{body_text, header_footer_text};
use common::fixtures::{config_in, generated_at, sample_fields};
use common::{init_logger, TestResult};
use dossier::docx::{template_status, TemplateStatus};
use dossier::types::Token;
use dossier::{DocxReportService, ReportError, ReportRenderer};
use std::fs;

#[test]
fn startup_creates_a_complete_template() -> TestResult {
    init_logger();
    let dir = tempfile::tempdir()?;
    let config = config_in(dir.path());
    assert_eq!(template_status(&config.template_path), TemplateStatus::Missing);

    DocxReportService::new(&config)?;
    assert_eq!(template_status(&config.template_path), TemplateStatus::Current);

    let bytes = fs::read(&config.template_path)?;
    let text = format!("{}\n{}", body_text(&bytes), header_footer_text(&bytes));
    for token in Token::ALL {
        assert!(text.contains(token.as_str()), "template lacks {}", token);
    }
    Ok(())
}

#[test]
fn current_template_is_left_untouched() -> TestResult {
    let dir = tempfile::tempdir()?;
    let config = config_in(dir.path());
    DocxReportService::new(&config)?;
    let first = fs::read(&config.template_path)?;

    DocxReportService::new(&config.clone().with_organization("Someone Else"))?;
    assert_eq!(fs::read(&config.template_path)?, first);
    Ok(())
}

#[test]
fn corrupt_template_is_regenerated() -> TestResult {
    init_logger();
    let dir = tempfile::tempdir()?;
    let config = config_in(dir.path());
    fs::create_dir_all(config.template_path.parent().ok_or("no parent")?)?;
    fs::write(&config.template_path, b"this is not a zip archive")?;
    assert!(matches!(template_status(&config.template_path), TemplateStatus::Unreadable(_)));

    let service = DocxReportService::new(&config)?;
    assert!(template_status(&config.template_path).is_current());
    let report = service.render_at(&sample_fields(), &[], generated_at())?;
    assert!(body_text(&report.bytes).contains("Impossible travel sign-in"));
    Ok(())
}

#[test]
fn template_without_soc_tokens_is_regenerated() -> TestResult {
    let dir = tempfile::tempdir()?;
    let config = config_in(dir.path());
    DocxReportService::new(&config)?;

    // A valid package whose body no longer carries the SOC label tokens.
    let mut package = dossier::package::Package::open(&fs::read(&config.template_path)?)?;
    let main = package.main_document_part()?;
    let doc = package.xml_part_mut(&main)?;
    for t in doc.descendants_named(doc.root(), dossier::package::wordml::W_T) {
        let text = doc.text_content(t);
        if text.contains(Token::SocActionsTakenLabel.as_str()) {
            doc.set_text(t, "Actions Taken by SOC:");
        }
    }
    fs::write(&config.template_path, package.to_bytes()?)?;
    assert!(matches!(template_status(&config.template_path), TemplateStatus::Stale(_)));

    DocxReportService::new(&config)?;
    assert!(template_status(&config.template_path).is_current());
    Ok(())
}

#[test]
fn template_deleted_after_startup_is_reported() -> TestResult {
    let dir = tempfile::tempdir()?;
    let config = config_in(dir.path());
    let service = DocxReportService::new(&config)?;
    fs::remove_file(&config.template_path)?;

    let err = service
        .render_at(&sample_fields(), &[], generated_at())
        .expect_err("rendering without a template must fail");
    match err {
        ReportError::MissingTemplate { path } => assert_eq!(path, config.template_path),
        other => panic!("unexpected error: {}", other),
    }
    Ok(())
}
