//! Token substitution across the runs of a paragraph.
//!
//! Word splits text into runs wherever formatting, spell-check state or edit
//! history changes, so a token such as `{{ALERT_ID}}` can be spread over
//! several runs. Matching therefore happens on the concatenated paragraph text
//! and a matching paragraph is rewritten as one run.

use crate::builders::text_elements;
use crate::error::DocxError;
use dossier_package::wordml::{self, W_R};
use dossier_package::{NodeId, Package, XmlDocument};
use dossier_types::TokenMap;

/// Replaces tokens in every paragraph under `scope`.
///
/// Paragraphs without a known token are left untouched. A rewritten paragraph
/// keeps its paragraph properties and receives a single run that carries the
/// first non-empty run properties of the original runs. Returns the number of
/// rewritten paragraphs.
pub fn substitute_tokens(doc: &mut XmlDocument, scope: NodeId, tokens: &TokenMap) -> usize {
    let mut rewritten = 0;
    for p in wordml::paragraphs(doc, scope) {
        let text = wordml::paragraph_text(doc, p);
        let Some(replaced) = tokens.replace_all(&text) else {
            continue;
        };
        rewrite_paragraph(doc, p, &replaced);
        rewritten += 1;
    }
    rewritten
}

fn rewrite_paragraph(doc: &mut XmlDocument, p: NodeId, text: &str) {
    let runs = wordml::paragraph_runs(doc, p);
    let format = runs.iter().find_map(|r| wordml::run_properties(doc, *r));

    let run = doc.create_element(W_R);
    if let Some(rpr) = format {
        let copy = doc.deep_clone(rpr);
        doc.append_child(run, copy);
    }
    for element in text_elements(text) {
        let child = doc.import(&element);
        doc.append_child(run, child);
    }

    match runs.iter().copied().find(|r| doc.parent(*r) == Some(p)) {
        Some(anchor) => {
            doc.insert_before(anchor, run);
        }
        None => doc.append_child(p, run),
    }
    for r in runs {
        doc.detach(r);
    }
}

/// Substitutes tokens in the main document part and in every header and
/// footer part it references.
pub fn substitute_package(package: &mut Package, tokens: &TokenMap) -> Result<usize, DocxError> {
    let main = package.main_document_part()?;
    let mut parts = vec![main.clone()];
    parts.extend(package.header_parts(&main));
    parts.extend(package.footer_parts(&main));

    let mut total = 0;
    for part in parts {
        let doc = package.xml_part_mut(&part)?;
        let root = doc.root();
        let count = substitute_tokens(doc, root, tokens);
        log::debug!("Substituted tokens in {} paragraph(s) of '{}'", count, part);
        total += count;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_package::wordml::paragraph_text;
    use dossier_types::Token;

    fn parse(body: &str) -> XmlDocument {
        let xml = format!(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        );
        XmlDocument::parse(xml.as_bytes()).unwrap()
    }

    fn tokens() -> TokenMap {
        let mut map = TokenMap::new();
        map.insert(Token::AlertId, "ALT-42");
        map.insert(Token::Title, "Suspicious login");
        map.insert(Token::EventSummary, "line one\nline two");
        map
    }

    fn first_paragraph(doc: &XmlDocument) -> NodeId {
        wordml::paragraphs(doc, doc.root())[0]
    }

    #[test]
    fn token_split_across_runs_is_replaced() {
        let mut doc = parse(
            r#"<w:p><w:r><w:t>ID: {{ALE</w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>RT_ID}} (open)</w:t></w:r></w:p>"#,
        );
        let root = doc.root();
        assert_eq!(substitute_tokens(&mut doc, root, &tokens()), 1);

        let p = first_paragraph(&doc);
        assert_eq!(paragraph_text(&doc, p), "ID: ALT-42 (open)");
        let runs = wordml::paragraph_runs(&doc, p);
        assert_eq!(runs.len(), 1);
        let rpr = wordml::run_properties(&doc, runs[0]).unwrap();
        assert_eq!(doc.name(doc.children(rpr)[0]), Some("w:b"));
    }

    #[test]
    fn paragraph_without_tokens_is_untouched() {
        let mut doc = parse(r#"<w:p><w:r><w:t>Hello</w:t></w:r><w:r><w:t> {{UNKNOWN}}</w:t></w:r></w:p>"#);
        let before = doc.to_xml_string().unwrap();
        let root = doc.root();
        assert_eq!(substitute_tokens(&mut doc, root, &tokens()), 0);
        assert_eq!(doc.to_xml_string().unwrap(), before);
    }

    #[test]
    fn multi_line_values_become_breaks_in_one_run() {
        let mut doc = parse(r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t>{{EVENT_SUMMARY}}</w:t></w:r></w:p>"#);
        let root = doc.root();
        substitute_tokens(&mut doc, root, &tokens());

        let p = first_paragraph(&doc);
        assert_eq!(doc.name(doc.children(p)[0]), Some("w:pPr"));
        let runs = wordml::paragraph_runs(&doc, p);
        assert_eq!(runs.len(), 1);
        assert_eq!(doc.child_elements(runs[0], "w:br").count(), 1);
        assert_eq!(paragraph_text(&doc, p), "line one\nline two");
        assert_eq!(wordml::paragraphs(&doc, doc.root()).len(), 1);
    }

    #[test]
    fn tokens_in_table_cells_and_hyperlinks_are_replaced() {
        let mut doc = parse(concat!(
            r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>{{TITLE}}</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
            r#"<w:p><w:hyperlink><w:r><w:t>{{ALERT_ID}}</w:t></w:r></w:hyperlink></w:p>"#
        ));
        let root = doc.root();
        assert_eq!(substitute_tokens(&mut doc, root, &tokens()), 2);
        let text = wordml::part_text(&doc);
        assert_eq!(text, "Suspicious login\nALT-42");
    }

    #[test]
    fn value_text_is_not_rescanned() {
        let mut map = TokenMap::new();
        map.insert(Token::Title, "{{ALERT_ID}}");
        map.insert(Token::AlertId, "X");
        let mut doc = parse(r#"<w:p><w:r><w:t>{{TITLE}}</w:t></w:r></w:p>"#);
        let root = doc.root();
        substitute_tokens(&mut doc, root, &map);
        assert_eq!(paragraph_text(&doc, first_paragraph(&doc)), "{{ALERT_ID}}");
    }
}
