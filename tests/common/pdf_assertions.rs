use lopdf::content::Content;
use lopdf::Document as LopdfDocument;
use std::collections::BTreeSet;

/// Decodes a WinAnsi string operand back to text.
fn from_win_ansi(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x80 => '€',
            0x91 => '‘',
            0x92 => '’',
            0x93 => '“',
            0x94 => '”',
            0x95 => '•',
            0x96 => '–',
            0x97 => '—',
            b => char::from(b),
        })
        .collect()
}

/// Every `Tj` string of one page, in paint order.
pub fn page_lines(doc: &LopdfDocument, page: u32) -> Vec<String> {
    let pages = doc.get_pages();
    let Some(page_id) = pages.get(&page) else {
        return Vec::new();
    };
    let Ok(raw) = doc.get_page_content(*page_id) else {
        return Vec::new();
    };
    let Ok(content) = Content::decode(&raw) else {
        return Vec::new();
    };
    content
        .operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| op.operands.first())
        .filter_map(|operand| operand.as_str().ok())
        .map(from_win_ansi)
        .collect()
}

/// `x` offset of the `Td` that positions the line starting with `prefix`.
pub fn line_x(doc: &LopdfDocument, page: u32, prefix: &str) -> Option<f32> {
    let pages = doc.get_pages();
    let raw = doc.get_page_content(*pages.get(&page)?).ok()?;
    let content = Content::decode(&raw).ok()?;
    let mut last_x = None;
    for op in &content.operations {
        match op.operator.as_str() {
            "Td" => last_x = op.operands.first().and_then(|x| x.as_float().ok()),
            "Tj" => {
                let text = op.operands.first().and_then(|s| s.as_str().ok()).map(from_win_ansi);
                if text.is_some_and(|t| t.starts_with(prefix)) {
                    return last_x;
                }
            }
            _ => {}
        }
    }
    None
}

/// Base font names of every font object in the document.
pub fn font_names(doc: &LopdfDocument) -> BTreeSet<String> {
    doc.objects
        .values()
        .filter_map(|object| object.as_dict().ok())
        .filter(|dict| dict.get(b"Type").and_then(|t| t.as_name()).ok() == Some(&b"Font"[..]))
        .filter_map(|dict| dict.get(b"BaseFont").and_then(|f| f.as_name()).ok())
        .map(|name| String::from_utf8_lossy(name).into_owned())
        .collect()
}

/// Number of image XObjects in the document, soft masks excluded.
pub fn image_count(doc: &LopdfDocument) -> usize {
    doc.objects
        .values()
        .filter_map(|object| object.as_stream().ok())
        .filter(|stream| {
            stream.dict.get(b"Subtype").and_then(|s| s.as_name()).ok() == Some(&b"Image"[..])
                && stream.dict.get(b"ColorSpace").and_then(|c| c.as_name()).ok() != Some(&b"DeviceGray"[..])
        })
        .count()
}
