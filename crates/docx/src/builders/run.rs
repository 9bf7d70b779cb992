use super::WordBuilder;
use dossier_package::XmlElement;
use dossier_types::Color;

/// Character formatting for a run. Sizes are in half-points, as WordprocessingML stores them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunFormat {
    pub font: Option<String>,
    pub bold: bool,
    pub italic: bool,
    pub color: Option<Color>,
    pub size_half_points: Option<u32>,
}

impl RunFormat {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// `w:rPr` in schema order, or `None` when no property is set.
    pub fn to_xml(&self) -> Option<XmlElement> {
        if self.is_empty() {
            return None;
        }
        let mut rpr = XmlElement::new("w:rPr");
        if let Some(font) = &self.font {
            rpr.push(
                XmlElement::new("w:rFonts")
                    .attr("w:ascii", font.as_str())
                    .attr("w:hAnsi", font.as_str())
                    .attr("w:cs", font.as_str()),
            );
        }
        if self.bold {
            rpr.push(XmlElement::new("w:b"));
        }
        if self.italic {
            rpr.push(XmlElement::new("w:i"));
        }
        if let Some(color) = self.color {
            rpr.push(XmlElement::new("w:color").attr("w:val", color.to_hex()));
        }
        if let Some(size) = self.size_half_points {
            rpr.push(XmlElement::new("w:sz").attr("w:val", size.to_string()));
            rpr.push(XmlElement::new("w:szCs").attr("w:val", size.to_string()));
        }
        Some(rpr)
    }
}

/// Run content for `text`: one `w:t` per line segment, `w:br` between lines
/// and `w:tab` for tab characters.
pub fn text_elements(text: &str) -> Vec<XmlElement> {
    let mut out = Vec::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push(XmlElement::new("w:br"));
        }
        let line = line.strip_suffix('\r').unwrap_or(line);
        for (j, segment) in line.split('\t').enumerate() {
            if j > 0 {
                out.push(XmlElement::new("w:tab"));
            }
            if !segment.is_empty() || (i == 0 && j == 0 && out.is_empty()) {
                out.push(
                    XmlElement::new("w:t")
                        .attr("xml:space", "preserve")
                        .text(segment),
                );
            }
        }
    }
    out
}

/// Builder for a `w:r` text run.
#[derive(Debug, Clone, Default)]
pub struct Run {
    text: String,
    format: RunFormat,
    page_break: bool,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// A run holding only a page break.
    pub fn page_break() -> Self {
        Self {
            page_break: true,
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.format.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.format.italic = true;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.format.color = Some(color);
        self
    }

    pub fn size_pt(mut self, points: f32) -> Self {
        self.format.size_half_points = Some((points * 2.0).round() as u32);
        self
    }

    pub fn font(mut self, name: &str) -> Self {
        self.format.font = Some(name.to_string());
        self
    }

    pub fn format(mut self, format: RunFormat) -> Self {
        self.format = format;
        self
    }
}

impl WordBuilder for Run {
    fn build(self: Box<Self>) -> XmlElement {
        let run = XmlElement::new("w:r").maybe_child(self.format.to_xml());
        if self.page_break {
            return run.child(XmlElement::new("w:br").attr("w:type", "page"));
        }
        run.children(text_elements(&self.text))
    }
}
