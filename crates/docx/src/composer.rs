use crate::error::DocxError;
use crate::evidence::append_evidence;
use crate::expand::expand_bullets;
use crate::substitute::substitute_package;
use dossier_image::ImageNormalizer;
use dossier_package::Package;
use dossier_types::{EvidenceImage, RenderedFields, Token};

/// Fills a template package with one report's content.
///
/// The passes run in a fixed order on a private copy of the template:
/// token substitution (main part, headers, footers), expansion of the
/// recommended-actions placeholder, then the evidence section.
#[derive(Debug)]
pub struct DocxComposer {
    normalizer: ImageNormalizer,
}

impl Default for DocxComposer {
    fn default() -> Self {
        Self::new(ImageNormalizer::new())
    }
}

impl DocxComposer {
    pub fn new(normalizer: ImageNormalizer) -> Self {
        Self { normalizer }
    }

    /// Applies every pass to an already opened package.
    pub fn fill(
        &self,
        package: &mut Package,
        fields: &RenderedFields,
        images: &[EvidenceImage],
    ) -> Result<(), DocxError> {
        let substituted = substitute_package(package, &fields.token_map())?;

        let main = package.main_document_part()?;
        let doc = package.xml_part_mut(&main)?;
        let root = doc.root();
        let expanded = expand_bullets(
            doc,
            root,
            Token::RecommendedActions.as_str(),
            &fields.recommended_actions,
        );

        let embedded = append_evidence(package, images, &self.normalizer)?;
        log::debug!(
            "Filled template: {} paragraph(s) substituted, list expanded: {}, {} image(s)",
            substituted,
            expanded,
            embedded
        );
        Ok(())
    }

    /// Opens `template`, fills it and returns the serialized document.
    pub fn compose(
        &self,
        template: &[u8],
        fields: &RenderedFields,
        images: &[EvidenceImage],
    ) -> Result<Vec<u8>, DocxError> {
        let mut package = Package::open(template)?;
        self.fill(&mut package, fields, images)?;
        Ok(package.to_bytes()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::template_bytes;
    use chrono::{TimeZone, Utc};
    use dossier_package::wordml;
    use dossier_types::{ReportFields, SocAction};

    fn fields() -> RenderedFields {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let mut fields = ReportFields::new("ALT-7", "Credential stuffing", at);
        fields.soc_action = SocAction::Both;
        fields.soc_assessment = "Blocked at the proxy".into();
        fields.recommended_actions = Some("- Reset password\n  - Notify user\n- Rotate key".into());
        RenderedFields::new(&fields, at)
    }

    #[test]
    fn filled_template_has_no_known_tokens_left() {
        let template = template_bytes("Acme SOC").unwrap();
        let bytes = DocxComposer::default().compose(&template, &fields(), &[]).unwrap();

        let package = Package::open(&bytes).unwrap();
        let main = package.main_document_part().unwrap();
        let text = wordml::part_text(package.xml_part(&main).unwrap());
        for token in Token::ALL {
            assert!(!text.contains(token.as_str()), "{} left in output", token);
        }
        assert!(text.contains("•  Reset password\n◦  Notify user\n•  Rotate key"));
        assert!(text.contains("Actions Taken by SOC:"));
        assert!(text.contains("2025-01-02 03:04:05 UTC"));

        let header = &package.header_parts(&main)[0];
        assert!(wordml::part_text(package.xml_part(header).unwrap()).contains("Incident ALT-7"));
    }

    #[test]
    fn template_itself_is_not_modified() {
        let template = template_bytes("Acme SOC").unwrap();
        let copy = template.clone();
        DocxComposer::default().compose(&template, &fields(), &[]).unwrap();
        assert_eq!(template, copy);
    }
}
