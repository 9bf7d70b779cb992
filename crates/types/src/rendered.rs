//! Field-to-text rules shared by both render backends.
//!
//! Every string either backend prints for a field comes from [`RenderedFields`],
//! so missing-value placeholders, date formats and the SOC gating cannot differ
//! between the package output and the page output.

use crate::bullets::{parse_bullets, BulletEntry};
use crate::fields::{ReportFields, SocAction};
use crate::tokens::{Token, TokenMap};
use chrono::{DateTime, Utc};

/// Printed in place of an absent optional value.
pub const NOT_AVAILABLE: &str = "N/A";

pub const INCIDENT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";
pub const GENERATED_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S UTC";

pub const ACTIONS_TAKEN_LABEL: &str = "Actions Taken by SOC:";
pub const ASSESSMENT_LABEL: &str = "SOC Assessment:";

pub const REPORT_TITLE: &str = "Security Incident Report";
pub const SECTION_EXECUTIVE_SUMMARY: &str = "1. Executive Summary";
pub const SECTION_ALERT_INFORMATION: &str = "2. Alert Information";
pub const SECTION_EVENT_SUMMARY: &str = "3. Event Summary";
pub const SECTION_TECHNICAL_DETAILS: &str = "Technical Details";
pub const SECTION_ASSESSMENT: &str = "4. SOC Assessment and Recommendations";
pub const SECTION_REFERENCES: &str = "5. References";
pub const RECOMMENDED_ACTIONS_LABEL: &str = "Recommended Actions:";
pub const FINAL_OBSERVATION_LABEL: &str = "Final Observation:";

/// Label and field of every row of the alert information table.
pub const ALERT_TABLE: [(&str, Token); 6] = [
    ("Alert ID", Token::AlertId),
    ("Title", Token::Title),
    ("Severity", Token::Severity),
    ("Date / Time (UTC)", Token::DatetimeUtc),
    ("ITSM Ticket", Token::ItsmTicket),
    ("MITRE Tactic", Token::MitreTactic),
];

/// Label and field of every row of the technical details table.
pub const TECHNICAL_TABLE: [(&str, Token); 7] = [
    ("User", Token::User),
    ("IP Address", Token::IpAddress),
    ("Hostname", Token::Host),
    ("File Name", Token::FileName),
    ("Hash (SHA1)", Token::Sha1Hash),
    ("File Path", Token::FilePath),
    ("File Signature", Token::FileSignature),
];

/// Heading of the evidence section that follows the report body.
pub const EVIDENCE_HEADING: &str = "Event Evidence";

/// Caption of the `index`-th (1-based) evidence image.
pub fn figure_caption(index: usize, display_name: &str) -> String {
    format!("Figure {} — {}", index, display_name)
}

/// A bold label followed by a block of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledText {
    pub label: String,
    pub text: String,
}

impl LabeledText {
    fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// The display strings of one report.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFields {
    pub executive_summary: String,
    pub alert_id: String,
    pub title: String,
    pub severity: String,
    pub incident_time: String,
    pub itsm_ticket: String,
    pub mitre_tactics: String,
    pub event_summary: String,
    pub affected_user: String,
    pub host: String,
    pub ip_address: String,
    pub file_name: String,
    pub sha1_hash: String,
    pub file_path: String,
    pub file_signature: String,
    /// The SOC blocks in print order, already gated by the SOC action selector.
    pub soc_blocks: Vec<LabeledText>,
    pub soc_action: SocAction,
    pub recommended_actions: Vec<BulletEntry>,
    pub final_observation: String,
    pub references: String,
    pub generated_date: String,
}

fn optional(value: Option<&String>) -> String {
    match value.map(|v| v.trim()) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn joined(values: &[String], separator: &str) -> String {
    let kept: Vec<&str> = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();
    if kept.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        kept.join(separator)
    }
}

impl RenderedFields {
    pub fn new(fields: &ReportFields, generated_at: DateTime<Utc>) -> Self {
        let soc_blocks = match fields.soc_action {
            SocAction::Both => vec![
                LabeledText::new(ACTIONS_TAKEN_LABEL, optional(fields.soc_actions_taken.as_ref())),
                LabeledText::new(ASSESSMENT_LABEL, fields.soc_assessment.clone()),
            ],
            action => vec![LabeledText::new(
                format!("{}:", action.display_name()),
                fields.soc_assessment.clone(),
            )],
        };

        Self {
            executive_summary: fields.executive_summary.clone(),
            alert_id: fields.alert_id.clone(),
            title: fields.title.clone(),
            severity: fields.severity.label().to_string(),
            incident_time: fields.incident_time.format(INCIDENT_TIME_FORMAT).to_string(),
            itsm_ticket: optional(fields.itsm_ticket.as_ref()),
            mitre_tactics: joined(&fields.mitre_tactics, " | "),
            event_summary: fields.event_summary.clone(),
            affected_user: optional(fields.affected_user.as_ref()),
            host: optional(fields.host.as_ref()),
            ip_address: optional(fields.ip_address.as_ref()),
            file_name: optional(fields.file_name.as_ref()),
            sha1_hash: optional(fields.sha1_hash.as_ref()),
            file_path: optional(fields.file_path.as_ref()),
            file_signature: optional(fields.file_signature.as_ref()),
            soc_blocks,
            soc_action: fields.soc_action,
            recommended_actions: parse_bullets(fields.recommended_actions.as_deref().unwrap_or_default()),
            final_observation: optional(fields.final_observation.as_ref()),
            references: joined(&fields.references, "\n"),
            generated_date: generated_at.format(GENERATED_DATE_FORMAT).to_string(),
        }
    }

    /// Display string of a single-value field token. SOC tokens, the
    /// bullet list and the generated date have no single field and return `None`.
    pub fn value(&self, token: Token) -> Option<&str> {
        let value = match token {
            Token::ExecutiveSummary => &self.executive_summary,
            Token::AlertId => &self.alert_id,
            Token::Title => &self.title,
            Token::Severity => &self.severity,
            Token::DatetimeUtc => &self.incident_time,
            Token::ItsmTicket => &self.itsm_ticket,
            Token::MitreTactic => &self.mitre_tactics,
            Token::EventSummary => &self.event_summary,
            Token::User => &self.affected_user,
            Token::IpAddress => &self.ip_address,
            Token::Host => &self.host,
            Token::FileName => &self.file_name,
            Token::Sha1Hash => &self.sha1_hash,
            Token::FilePath => &self.file_path,
            Token::FileSignature => &self.file_signature,
            Token::FinalObservation => &self.final_observation,
            Token::References => &self.references,
            _ => return None,
        };
        Some(value)
    }

    /// Rows of the alert information table.
    pub fn alert_rows(&self) -> Vec<(&'static str, &str)> {
        self.rows(&ALERT_TABLE)
    }

    /// Rows of the technical details table.
    pub fn technical_rows(&self) -> Vec<(&'static str, &str)> {
        self.rows(&TECHNICAL_TABLE)
    }

    fn rows(&self, table: &[(&'static str, Token)]) -> Vec<(&'static str, &str)> {
        table
            .iter()
            .map(|(label, token)| (*label, self.value(*token).unwrap_or_default()))
            .collect()
    }

    /// The token map used by the template backend.
    ///
    /// `{{RECOMMENDED_ACTIONS}}` is deliberately absent: that token marks the
    /// paragraph the list expansion pass replaces.
    pub fn token_map(&self) -> TokenMap {
        let (taken_label, taken, action_label, assessment) = match self.soc_blocks.as_slice() {
            [taken, assessment] => (
                taken.label.clone(),
                taken.text.clone(),
                assessment.label.clone(),
                assessment.text.clone(),
            ),
            [single] => (String::new(), String::new(), single.label.clone(), single.text.clone()),
            _ => Default::default(),
        };

        [
            (Token::ExecutiveSummary, self.executive_summary.clone()),
            (Token::AlertId, self.alert_id.clone()),
            (Token::Title, self.title.clone()),
            (Token::Severity, self.severity.clone()),
            (Token::DatetimeUtc, self.incident_time.clone()),
            (Token::ItsmTicket, self.itsm_ticket.clone()),
            (Token::MitreTactic, self.mitre_tactics.clone()),
            (Token::EventSummary, self.event_summary.clone()),
            (Token::User, self.affected_user.clone()),
            (Token::IpAddress, self.ip_address.clone()),
            (Token::Host, self.host.clone()),
            (Token::FileName, self.file_name.clone()),
            (Token::Sha1Hash, self.sha1_hash.clone()),
            (Token::FilePath, self.file_path.clone()),
            (Token::FileSignature, self.file_signature.clone()),
            (Token::SocActionsTakenLabel, taken_label),
            (Token::SocActionsTaken, taken),
            (Token::SocActionLabel, action_label),
            (Token::SocAssessment, assessment),
            (Token::FinalObservation, self.final_observation.clone()),
            (Token::References, self.references.clone()),
            (Token::GeneratedDate, self.generated_date.clone()),
        ]
        .into_iter()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bullets::BulletLevel;
    use crate::fields::Severity;
    use chrono::TimeZone;

    fn sample() -> ReportFields {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 10, 15, 0).unwrap();
        let mut fields = ReportFields::new("ALT-1", "Suspicious login", at);
        fields.severity = Severity::High;
        fields.soc_assessment = "True positive".into();
        fields
    }

    fn generated() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 2, 8, 5, 9).unwrap()
    }

    #[test]
    fn optional_fields_fall_back_to_na() {
        let mut fields = sample();
        fields.host = Some("   ".into());
        fields.affected_user = Some(" alice ".into());
        let r = RenderedFields::new(&fields, generated());
        assert_eq!(r.itsm_ticket, NOT_AVAILABLE);
        assert_eq!(r.host, NOT_AVAILABLE);
        assert_eq!(r.affected_user, "alice");
        assert_eq!(r.mitre_tactics, NOT_AVAILABLE);
        assert_eq!(r.references, NOT_AVAILABLE);
        assert_eq!(r.executive_summary, "");
    }

    #[test]
    fn formats_dates_and_lists() {
        let mut fields = sample();
        fields.mitre_tactics = vec!["TA0001 — Initial Access".into(), "TA0002 — Execution".into()];
        fields.references = vec!["https://a.example".into(), "https://b.example".into()];
        let r = RenderedFields::new(&fields, generated());
        assert_eq!(r.incident_time, "2025-03-01 10:15:00 UTC");
        assert_eq!(r.generated_date, "02/03/2025 08:05:09 UTC");
        assert_eq!(r.mitre_tactics, "TA0001 — Initial Access | TA0002 — Execution");
        assert_eq!(r.references, "https://a.example\nhttps://b.example");
        assert_eq!(r.severity, "High");
    }

    #[test]
    fn single_soc_block_for_assessment_only() {
        let r = RenderedFields::new(&sample(), generated());
        assert_eq!(r.soc_blocks, vec![LabeledText::new("SOC Assessment:", "True positive")]);
        let map = r.token_map();
        assert_eq!(map.get(Token::SocActionLabel), Some("SOC Assessment:"));
        assert_eq!(map.get(Token::SocActionsTakenLabel), Some(""));
        assert_eq!(map.get(Token::SocActionsTaken), Some(""));
    }

    #[test]
    fn action_taken_only_uses_its_display_name() {
        let mut fields = sample();
        fields.soc_action = SocAction::ActionTakenOnly;
        fields.soc_actions_taken = Some("Host isolated".into());
        let r = RenderedFields::new(&fields, generated());
        assert_eq!(r.soc_blocks.len(), 1);
        assert_eq!(r.soc_blocks[0].label, "Action Taken by SOC:");
        assert_eq!(r.soc_blocks[0].text, "True positive");
    }

    #[test]
    fn both_renders_taken_then_assessment() {
        let mut fields = sample();
        fields.soc_action = SocAction::Both;
        let r = RenderedFields::new(&fields, generated());
        assert_eq!(
            r.soc_blocks,
            vec![
                LabeledText::new(ACTIONS_TAKEN_LABEL, NOT_AVAILABLE),
                LabeledText::new(ASSESSMENT_LABEL, "True positive"),
            ]
        );
        let map = r.token_map();
        assert_eq!(map.get(Token::SocActionsTakenLabel), Some(ACTIONS_TAKEN_LABEL));
        assert_eq!(map.get(Token::SocActionsTaken), Some(NOT_AVAILABLE));
        assert_eq!(map.get(Token::SocAssessment), Some("True positive"));
    }

    #[test]
    fn token_map_covers_everything_but_recommended_actions() {
        let map = RenderedFields::new(&sample(), generated()).token_map();
        assert_eq!(map.len(), Token::ALL.len() - 1);
        assert_eq!(map.get(Token::RecommendedActions), None);
    }

    #[test]
    fn recommended_actions_are_parsed_once() {
        let mut fields = sample();
        fields.recommended_actions = Some("- Reset password\n  - Notify user\n- Rotate key".into());
        let r = RenderedFields::new(&fields, generated());
        let levels: Vec<BulletLevel> = r.recommended_actions.iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![BulletLevel::One, BulletLevel::Two, BulletLevel::One]);
    }

    #[test]
    fn figure_captions_are_one_based() {
        assert_eq!(figure_caption(1, "login.png"), "Figure 1 — login.png");
    }

    #[test]
    fn table_rows_follow_label_order() {
        let r = RenderedFields::new(&sample(), generated());
        let rows = r.alert_rows();
        assert_eq!(rows.len(), ALERT_TABLE.len());
        assert_eq!(rows[0], ("Alert ID", r.alert_id.as_str()));
        let technical = r.technical_rows();
        assert_eq!(technical[2], ("Hostname", r.host.as_str()));
        assert_eq!(r.value(Token::SocAssessment), None);
    }
}
