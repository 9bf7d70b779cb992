pub mod bullets;
pub mod color;
pub mod fields;
pub mod geometry;
pub mod naming;
pub mod rendered;
pub mod tokens;

pub use bullets::{parse_bullets, render_bullets, BulletEntry, BulletLevel};
pub use color::{palette, Color};
pub use fields::{mitre_tactic_display, EvidenceImage, FieldError, ReportFields, Severity, SocAction, MITRE_TACTICS};
pub use geometry::{Margins, PageGeometry, Rect, Size};
pub use naming::{report_file_name, sanitize_alert_id};
pub use rendered::{
    figure_caption, LabeledText, RenderedFields, ACTIONS_TAKEN_LABEL, ALERT_TABLE, ASSESSMENT_LABEL,
    EVIDENCE_HEADING, FINAL_OBSERVATION_LABEL, GENERATED_DATE_FORMAT, INCIDENT_TIME_FORMAT, NOT_AVAILABLE,
    RECOMMENDED_ACTIONS_LABEL, REPORT_TITLE, SECTION_ALERT_INFORMATION, SECTION_ASSESSMENT,
    SECTION_EVENT_SUMMARY, SECTION_EXECUTIVE_SUMMARY, SECTION_REFERENCES, SECTION_TECHNICAL_DETAILS,
    TECHNICAL_TABLE,
};
pub use tokens::{Token, TokenMap};
