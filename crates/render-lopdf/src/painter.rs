//! Paints laid-out pages into a lopdf document.

use crate::error::RenderError;
use crate::fonts::{to_win_ansi, PdfFont};
use crate::images::{flate_compress, PdfImage};
use crate::layout::{LaidOutDocument, LayoutElement, LineElement, PositionedElement, RectElement, TextElement, TextStyle};
use chrono::{DateTime, Utc};
use dossier_types::{Color, Size};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, StringFormat, Stream};

/// Entries of the document information dictionary.
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
    pub created: DateTime<Utc>,
}

fn image_name(index: usize) -> String {
    format!("Im{}", index + 1)
}

fn info_string(text: &str) -> Object {
    Object::String(to_win_ansi(text), StringFormat::Literal)
}

/// Writes every page of `document` and returns the serialized PDF.
pub fn paint(
    document: &LaidOutDocument,
    images: &[PdfImage],
    page_size: Size,
    info: &DocumentInfo,
) -> Result<Vec<u8>, RenderError> {
    let mut pdf = Document::with_version("1.7");
    let pages_id = pdf.new_object_id();

    let mut fonts = Dictionary::new();
    for font in PdfFont::ALL {
        let font_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), font_id);
    }

    let mut xobjects = Dictionary::new();
    for (i, image) in images.iter().enumerate() {
        let mask_id = image.soft_mask_stream().map(|mask| pdf.add_object(mask));
        let image_id = pdf.add_object(image.image_stream(mask_id));
        xobjects.set(image_name(i), image_id);
    }

    let mut resources = dictionary! { "Font" => fonts };
    if !images.is_empty() {
        resources.set("XObject", xobjects);
    }
    let resources_id = pdf.add_object(resources);

    let mut page_ids = Vec::with_capacity(document.pages.len());
    for page in &document.pages {
        let mut ctx = PageContext::new(page_size.height);
        for element in &page.elements {
            ctx.draw_element(element);
        }
        let encoded = ctx.finish().encode()?;
        let content_id = pdf.add_object(Stream::new(
            dictionary! { "Filter" => "FlateDecode" },
            flate_compress(&encoded)?,
        ));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page_size.width.into(), page_size.height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id);
    }

    let count = page_ids.len() as i64;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.into_iter().map(Object::Reference).collect::<Vec<_>>(),
            "Count" => count,
        }),
    );
    let catalog_id = pdf.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    pdf.trailer.set("Root", catalog_id);

    let date = info.created.format("D:%Y%m%d%H%M%SZ").to_string();
    let info_id = pdf.add_object(dictionary! {
        "Title" => info_string(&info.title),
        "Author" => info_string(&info.author),
        "Creator" => info_string("dossier"),
        "Producer" => info_string("lopdf"),
        "CreationDate" => info_string(&date),
    });
    pdf.trailer.set("Info", info_id);

    let mut out = Vec::new();
    pdf.save_to(&mut out)?;
    log::debug!("Painted {} page(s), {} image(s), {} bytes", count, images.len(), out.len());
    Ok(out)
}

struct PageContext {
    page_height: f32,
    content: Content,
    state: PageRenderState,
}

#[derive(Default, Clone)]
struct PageRenderState {
    font: Option<PdfFont>,
    font_size: f32,
    fill_color: Option<Color>,
}

impl PageContext {
    fn new(page_height: f32) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
            state: PageRenderState::default(),
        }
    }

    fn finish(self) -> Content {
        self.content
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn draw_element(&mut self, el: &PositionedElement) {
        match &el.element {
            LayoutElement::Text(text) => self.draw_text(text, el),
            LayoutElement::Rectangle(rect) => self.draw_rectangle(rect, el),
            LayoutElement::Line(line) => self.draw_line(line, el),
            LayoutElement::Image(image) => self.draw_image(image.image, el),
        }
    }

    fn set_font(&mut self, style: &TextStyle) {
        if self.state.font != Some(style.font) || self.state.font_size != style.size {
            self.op(
                "Tf",
                vec![Object::Name(style.font.resource_name().as_bytes().to_vec()), style.size.into()],
            );
            self.state.font = Some(style.font);
            self.state.font_size = style.size;
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            let (r, g, b) = color.to_unit_rgb();
            self.op("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill_color = Some(color);
        }
    }

    fn draw_text(&mut self, text: &TextElement, el: &PositionedElement) {
        if text.content.trim().is_empty() {
            return;
        }
        self.op("BT", vec![]);
        self.set_font(&text.style);
        self.set_fill_color(text.style.color);
        let leading = (el.height - text.style.size) / 2.0;
        let baseline_y = el.y + leading + text.style.size * 0.8;
        let pdf_y = self.page_height - baseline_y;
        self.op("Td", vec![el.x.into(), pdf_y.into()]);
        self.op(
            "Tj",
            vec![Object::String(to_win_ansi(&text.content), StringFormat::Literal)],
        );
        self.op("ET", vec![]);
    }

    fn draw_rectangle(&mut self, rect: &RectElement, el: &PositionedElement) {
        self.set_fill_color(rect.fill);
        let y = self.page_height - (el.y + el.height);
        self.op("re", vec![el.x.into(), y.into(), el.width.into(), el.height.into()]);
        self.op("f", vec![]);
    }

    fn draw_line(&mut self, line: &LineElement, el: &PositionedElement) {
        let (r, g, b) = line.color.to_unit_rgb();
        let y = self.page_height - el.y;
        self.op("w", vec![line.thickness.into()]);
        self.op("RG", vec![r.into(), g.into(), b.into()]);
        self.op("m", vec![el.x.into(), y.into()]);
        self.op("l", vec![(el.x + el.width).into(), y.into()]);
        self.op("S", vec![]);
    }

    fn draw_image(&mut self, index: usize, el: &PositionedElement) {
        let y = self.page_height - (el.y + el.height);
        self.op("q", vec![]);
        self.op(
            "cm",
            vec![el.width.into(), 0.into(), 0.into(), el.height.into(), el.x.into(), y.into()],
        );
        self.op("Do", vec![Object::Name(image_name(index).into_bytes())]);
        self.op("Q", vec![]);
    }
}
