use chrono::{DateTime, TimeZone, Utc};
use dossier::types::{EvidenceImage, ReportFields, Severity, SocAction};
use dossier::ReportConfig;
use image::{ImageBuffer, Rgb, Rgba};
use std::io::Cursor;
use std::path::Path;

pub const RECOMMENDED_ACTIONS: &str = "- Reset password\n  - Notify user\n- Rotate key";

pub fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 2, 3, 4, 5, 6).unwrap()
}

/// A fully populated report.
pub fn sample_fields() -> ReportFields {
    let at = Utc.with_ymd_and_hms(2025, 2, 1, 22, 15, 0).unwrap();
    let mut fields = ReportFields::new("ALT/2025#42", "Impossible travel sign-in", at);
    fields.executive_summary = "A privileged account signed in from two countries within ten minutes.".into();
    fields.severity = Severity::High;
    fields.itsm_ticket = Some("INC0012345".into());
    fields.mitre_tactics = vec!["TA0001 — Initial Access".into(), "TA0006 — Credential Access".into()];
    fields.event_summary = "Sign-in from Lisbon followed by Singapore.\nMFA was satisfied both times.".into();
    fields.affected_user = Some("j.doe@example.com".into());
    fields.host = Some("WS-0042".into());
    fields.ip_address = Some("203.0.113.7".into());
    fields.soc_action = SocAction::Both;
    fields.soc_assessment = "Likely token theft.".into();
    fields.soc_actions_taken = Some("Sessions revoked.".into());
    fields.recommended_actions = Some(RECOMMENDED_ACTIONS.into());
    fields.final_observation = Some("No further activity observed.".into());
    fields.references = vec!["https://attack.mitre.org/tactics/TA0006/".into()];
    fields
}

/// The minimum a caller must provide.
pub fn minimal_fields() -> ReportFields {
    let at = Utc.with_ymd_and_hms(2025, 2, 1, 22, 15, 0).unwrap();
    ReportFields::new("ALT-1", "Test alert", at)
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_pixel(width, height, Rgba([30u8, 90, 160, 255]));
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_pixel(width, height, Rgb([200u8, 40, 40]));
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut out, image::ImageFormat::Jpeg)
        .unwrap();
    out.into_inner()
}

pub fn evidence() -> Vec<EvidenceImage> {
    vec![
        EvidenceImage::new("signin-map.png", png(64, 32)),
        EvidenceImage::new("audit-log.jpg", jpeg(48, 48)),
    ]
}

/// A configuration whose template lives under `dir`.
pub fn config_in(dir: &Path) -> ReportConfig {
    ReportConfig::default()
        .with_template_path(dir.join("templates").join("incident_report_template.docx"))
        .with_output_dir(dir.join("out"))
        .with_organization("Acme SOC")
}
