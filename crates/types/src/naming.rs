use chrono::{DateTime, Utc};

/// Keeps only alphanumerics (Unicode), `-` and `_`.
pub fn sanitize_alert_id(alert_id: &str) -> String {
    alert_id
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// `Incident_{sanitized alert id}_{YYYYmmddHHMMSS}.{extension}`
pub fn report_file_name(alert_id: &str, at: DateTime<Utc>, extension: &str) -> String {
    format!(
        "Incident_{}_{}.{}",
        sanitize_alert_id(alert_id),
        at.format("%Y%m%d%H%M%S"),
        extension.trim_start_matches('.')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn strips_separators_and_symbols() {
        assert_eq!(sanitize_alert_id("ALT/2025#42"), "ALT202542");
        assert_eq!(sanitize_alert_id("a-b_c d.e"), "a-b_cde");
        assert_eq!(sanitize_alert_id("../../etc"), "etc");
    }

    #[test]
    fn keeps_unicode_letters() {
        assert_eq!(sanitize_alert_id("Ålesund/Ünït 7"), "ÅlesundÜnït7");
    }

    #[test]
    fn file_name_has_timestamp_suffix() {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            report_file_name("ALT/2025#42", at, "docx"),
            "Incident_ALT202542_20250102030405.docx"
        );
        assert_eq!(report_file_name("x", at, ".pdf"), "Incident_x_20250102030405.pdf");
    }
}
