use dossier::package::{wordml, Package};
use std::io::{Cursor, Read};

/// Names of every zip entry, in archive order.
pub fn entry_names(bytes: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    archive.file_names().map(str::to_string).collect()
}

/// Raw contents of one zip entry.
pub fn entry(bytes: &[u8], name: &str) -> Vec<u8> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut out = Vec::new();
    file.read_to_end(&mut out).unwrap();
    out
}

/// Paragraph text of the main document part, one paragraph per line.
pub fn body_text(bytes: &[u8]) -> String {
    let package = Package::open(bytes).unwrap();
    let main = package.main_document_part().unwrap();
    wordml::part_text(package.xml_part(&main).unwrap())
}

/// Paragraph text of every header and footer part.
pub fn header_footer_text(bytes: &[u8]) -> String {
    let package = Package::open(bytes).unwrap();
    let main = package.main_document_part().unwrap();
    let mut parts = package.header_parts(&main);
    parts.extend(package.footer_parts(&main));
    parts
        .iter()
        .map(|part| wordml::part_text(package.xml_part(part).unwrap()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Media parts in name order.
pub fn media_parts(bytes: &[u8]) -> Vec<String> {
    let mut names: Vec<String> = entry_names(bytes)
        .into_iter()
        .filter(|n| n.starts_with("word/media/"))
        .collect();
    names.sort();
    names
}
