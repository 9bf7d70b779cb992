//! The report field model shared by every render backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error raised when an ordinal does not map to a known enum variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Unknown severity ordinal: {0} (expected 0..=4)")]
    UnknownSeverity(i64),
    #[error("Unknown SOC action ordinal: {0} (expected 0..=2)")]
    UnknownSocAction(i64),
}

/// Five-level incident severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Informational,
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Informational,
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    /// The human-readable label printed in both the package and page outputs.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Informational => "Informational",
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl TryFrom<i64> for Severity {
    type Error = FieldError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|idx| Severity::ALL.get(idx).copied())
            .ok_or(FieldError::UnknownSeverity(value))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Selects which of the two SOC free-text blocks a report shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SocAction {
    #[default]
    AssessmentOnly,
    ActionTakenOnly,
    Both,
}

impl SocAction {
    pub fn display_name(self) -> &'static str {
        match self {
            SocAction::AssessmentOnly => "SOC Assessment",
            SocAction::ActionTakenOnly => "Action Taken by SOC",
            SocAction::Both => "SOC Assessment and Actions Taken",
        }
    }
}

impl TryFrom<i64> for SocAction {
    type Error = FieldError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SocAction::AssessmentOnly),
            1 => Ok(SocAction::ActionTakenOnly),
            2 => Ok(SocAction::Both),
            other => Err(FieldError::UnknownSocAction(other)),
        }
    }
}

/// All values collected for one incident report.
///
/// Values arrive already validated and length-capped by the caller; this type
/// carries no validation logic of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFields {
    pub executive_summary: String,
    pub alert_id: String,
    pub title: String,
    #[serde(default)]
    pub severity: Severity,
    pub incident_time: DateTime<Utc>,
    #[serde(default)]
    pub itsm_ticket: Option<String>,
    #[serde(default)]
    pub mitre_tactics: Vec<String>,
    pub event_summary: String,
    #[serde(default)]
    pub affected_user: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub sha1_hash: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub file_signature: Option<String>,
    #[serde(default)]
    pub soc_action: SocAction,
    pub soc_assessment: String,
    #[serde(default)]
    pub soc_actions_taken: Option<String>,
    #[serde(default)]
    pub recommended_actions: Option<String>,
    #[serde(default)]
    pub final_observation: Option<String>,
    #[serde(default)]
    pub references: Vec<String>,
}

impl ReportFields {
    /// Creates a report with the required fields set and every optional field empty.
    pub fn new(alert_id: impl Into<String>, title: impl Into<String>, incident_time: DateTime<Utc>) -> Self {
        Self {
            executive_summary: String::new(),
            alert_id: alert_id.into(),
            title: title.into(),
            severity: Severity::default(),
            incident_time,
            itsm_ticket: None,
            mitre_tactics: Vec::new(),
            event_summary: String::new(),
            affected_user: None,
            host: None,
            ip_address: None,
            file_name: None,
            sha1_hash: None,
            file_path: None,
            file_signature: None,
            soc_action: SocAction::default(),
            soc_assessment: String::new(),
            soc_actions_taken: None,
            recommended_actions: None,
            final_observation: None,
            references: Vec::new(),
        }
    }
}

/// One evidence image as supplied by the caller.
///
/// The position of an image in the caller's sequence is its figure number
/// (1-based), so collections of these must never be reordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceImage {
    pub display_name: String,
    pub data: Vec<u8>,
}

impl EvidenceImage {
    pub fn new(display_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            display_name: display_name.into(),
            data,
        }
    }
}

/// The MITRE ATT&CK enterprise tactics offered to report authors.
pub const MITRE_TACTICS: [(&str, &str); 12] = [
    ("TA0001", "Initial Access"),
    ("TA0002", "Execution"),
    ("TA0003", "Persistence"),
    ("TA0004", "Privilege Escalation"),
    ("TA0005", "Defense Evasion"),
    ("TA0006", "Credential Access"),
    ("TA0007", "Discovery"),
    ("TA0008", "Lateral Movement"),
    ("TA0009", "Collection"),
    ("TA0011", "Command and Control"),
    ("TA0010", "Exfiltration"),
    ("TA0040", "Impact"),
];

/// Formats a catalog entry the way tactic selections are stored, e.g. `TA0002 — Execution`.
pub fn mitre_tactic_display(id: &str) -> Option<String> {
    MITRE_TACTICS
        .iter()
        .find(|(tactic_id, _)| *tactic_id == id)
        .map(|(tactic_id, name)| format!("{} — {}", tactic_id, name))
}
