use super::{Run, WordBuilder};
use dossier_package::XmlElement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    fn as_val(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
        }
    }
}

/// Builder for a `w:p` paragraph. Spacing and indents are in twentieths of a point.
#[derive(Default)]
pub struct Paragraph {
    style: Option<String>,
    keep_next: bool,
    spacing: Option<(u32, u32)>,
    indent: Option<(u32, u32)>,
    alignment: Option<Alignment>,
    children: Vec<Box<dyn WordBuilder>>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A paragraph with a single unformatted run.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new().run(Run::new(text))
    }

    pub fn child(mut self, child: impl WordBuilder + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    pub fn run(self, run: Run) -> Self {
        self.child(run)
    }

    pub fn style(mut self, style_id: &str) -> Self {
        self.style = Some(style_id.to_string());
        self
    }

    pub fn keep_next(mut self) -> Self {
        self.keep_next = true;
        self
    }

    pub fn spacing(mut self, before: u32, after: u32) -> Self {
        self.spacing = Some((before, after));
        self
    }

    /// Left indent plus a hanging indent for the first line.
    pub fn indent(mut self, left: u32, hanging: u32) -> Self {
        self.indent = Some((left, hanging));
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    fn properties(&self) -> Option<XmlElement> {
        let mut ppr = XmlElement::new("w:pPr");
        if let Some(style) = &self.style {
            ppr.push(XmlElement::new("w:pStyle").attr("w:val", style.as_str()));
        }
        if self.keep_next {
            ppr.push(XmlElement::new("w:keepNext"));
        }
        if let Some((before, after)) = self.spacing {
            ppr.push(
                XmlElement::new("w:spacing")
                    .attr("w:before", before.to_string())
                    .attr("w:after", after.to_string()),
            );
        }
        if let Some((left, hanging)) = self.indent {
            ppr.push(
                XmlElement::new("w:ind")
                    .attr("w:left", left.to_string())
                    .attr("w:hanging", hanging.to_string()),
            );
        }
        if let Some(alignment) = self.alignment {
            ppr.push(XmlElement::new("w:jc").attr("w:val", alignment.as_val()));
        }
        (!ppr.children.is_empty()).then_some(ppr)
    }
}

impl WordBuilder for Paragraph {
    fn build(self: Box<Self>) -> XmlElement {
        let ppr = self.properties();
        XmlElement::new("w:p")
            .maybe_child(ppr)
            .children(self.children.into_iter().map(|c| c.build()))
    }
}
