//! Turns a flat list of report blocks into pages of positioned elements.
//!
//! Coordinates are in points with the origin at the top-left corner of the
//! page; the painter flips them into PDF user space. Layout never fails:
//! text is wrapped greedily on spaces (breaking overlong words by character),
//! table rows and images move to the next page as a whole when they do not
//! fit, and a repeated header is stamped at the top of every page.

use crate::fonts::PdfFont;
use dossier_types::{palette, Color, PageGeometry, Size};

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;
/// Gap between the repeated header and the first body block.
pub const HEADER_GAP: f32 = 10.0;

const CELL_PADDING_X: f32 = 6.0;
const CELL_PADDING_Y: f32 = 4.0;
const TABLE_FONT_SIZE: f32 = 10.0;
const TABLE_BORDER_WIDTH: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: PdfFont,
    pub size: f32,
    pub color: Color,
}

impl TextStyle {
    pub fn new(font: PdfFont, size: f32) -> Self {
        Self {
            font,
            size,
            color: Color::BLACK,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn line_height(&self) -> f32 {
        self.size * LINE_HEIGHT_FACTOR
    }

    pub fn width_of(&self, text: &str) -> f32 {
        self.font.text_width(text, self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// A paragraph of wrapped text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub content: String,
    pub style: TextStyle,
    pub align: TextAlign,
    /// Left indent of every line.
    pub indent: f32,
    /// Extra indent of continuation lines.
    pub hanging: f32,
    pub space_before: f32,
    /// Moves the block to the next page unless the start of the following
    /// block fits on the same page.
    pub keep_with_next: bool,
}

impl TextBlock {
    pub fn new(content: impl Into<String>, style: TextStyle) -> Self {
        Self {
            content: content.into(),
            style,
            align: TextAlign::Left,
            indent: 0.0,
            hanging: 0.0,
            space_before: 0.0,
            keep_with_next: false,
        }
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn indent(mut self, indent: f32, hanging: f32) -> Self {
        self.indent = indent;
        self.hanging = hanging;
        self
    }

    pub fn space_before(mut self, space: f32) -> Self {
        self.space_before = space;
        self
    }

    pub fn keep_with_next(mut self) -> Self {
        self.keep_with_next = true;
        self
    }
}

/// A two-column label/value table; the label column takes 2/5 of the width.
#[derive(Debug, Clone, PartialEq)]
pub struct TableBlock {
    pub rows: Vec<(String, String)>,
    pub space_before: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Text(TextBlock),
    Table(TableBlock),
    Rule {
        thickness: f32,
        color: Color,
        space_before: f32,
        space_after: f32,
    },
    /// `image` indexes the document's image list; `size` is the natural size
    /// in points before fitting.
    Image {
        image: usize,
        size: Size,
        align: TextAlign,
        space_before: f32,
    },
    Spacer(f32),
    PageBreak,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub content: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectElement {
    pub fill: Color,
}

/// A horizontal line along the top edge of its box.
#[derive(Debug, Clone, PartialEq)]
pub struct LineElement {
    pub color: Color,
    pub thickness: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    pub image: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutElement {
    Text(TextElement),
    Rectangle(RectElement),
    Line(LineElement),
    Image(ImageElement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub element: LayoutElement,
}

impl PositionedElement {
    pub fn text(&self) -> Option<&str> {
        match &self.element {
            LayoutElement::Text(t) => Some(&t.content),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaidOutPage {
    pub elements: Vec<PositionedElement>,
}

impl LaidOutPage {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(PositionedElement::text)
    }

    pub fn images(&self) -> impl Iterator<Item = &PositionedElement> {
        self.elements
            .iter()
            .filter(|el| matches!(el.element, LayoutElement::Image(_)))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaidOutDocument {
    pub pages: Vec<LaidOutPage>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every text line of every page in paint order.
    pub fn texts(&self) -> Vec<&str> {
        self.pages.iter().flat_map(|p| p.texts()).collect()
    }

    /// Stamps one centered footer line in the bottom margin of every page.
    /// `text` receives the 1-based page number and the page count.
    pub fn add_footers(&mut self, geometry: &PageGeometry, style: TextStyle, text: impl Fn(usize, usize) -> String) {
        let total = self.pages.len();
        let content = geometry.content_rect();
        let line_height = style.line_height();
        let y = geometry.size.height - geometry.margins.bottom + (geometry.margins.bottom - line_height) / 2.0;
        for (i, page) in self.pages.iter_mut().enumerate() {
            let content_text = text(i + 1, total);
            let width = style.width_of(&content_text);
            page.elements.push(PositionedElement {
                x: content.x + (content.width - width) / 2.0,
                y,
                width,
                height: line_height,
                element: LayoutElement::Text(TextElement {
                    content: content_text,
                    style,
                }),
            });
        }
    }
}

/// Wraps `text` to lines no wider than `max_width`. Explicit newlines always
/// start a new line; an empty input yields one empty line.
pub fn wrap_text(text: &str, font: PdfFont, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let mut line = String::new();
        for word in paragraph.split(' ') {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", line, word)
            };
            if line.is_empty() || font.text_width(&candidate, size) <= max_width {
                line = candidate;
            } else {
                lines.push(std::mem::replace(&mut line, word.to_string()));
            }
            while line.chars().count() > 1 && font.text_width(&line, size) > max_width {
                let rest = line.split_off(split_point(&line, font, size, max_width));
                lines.push(std::mem::replace(&mut line, rest));
            }
        }
        lines.push(line);
    }
    lines
}

/// Byte offset of the longest prefix that fits, at least one character.
fn split_point(line: &str, font: PdfFont, size: f32, max_width: f32) -> usize {
    let mut width = 0.0;
    for (i, c) in line.char_indices() {
        width += f32::from(font.char_width(c)) * size / 1000.0;
        if width > max_width {
            return if i == 0 { c.len_utf8() } else { i };
        }
    }
    line.len()
}

/// Lays out blocks on pages of one geometry.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    geometry: PageGeometry,
    header: Vec<PositionedElement>,
    header_height: f32,
}

impl LayoutEngine {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            header: Vec::new(),
            header_height: 0.0,
        }
    }

    /// Lays out `blocks` once and repeats the result at the top of every page.
    pub fn with_header(mut self, blocks: &[Block]) -> Self {
        let bare = LayoutEngine::new(self.geometry);
        let mut cursor = PageCursor::new(&bare);
        for (i, block) in blocks.iter().enumerate() {
            cursor.place(block, blocks.get(i + 1));
        }
        self.header_height = cursor.y - self.geometry.content_rect().y + HEADER_GAP;
        self.header = cursor.current;
        self
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    fn body_top(&self) -> f32 {
        self.geometry.content_rect().y + self.header_height
    }

    fn body_bottom(&self) -> f32 {
        self.geometry.content_rect().bottom()
    }

    /// The largest box an image can occupy on one page.
    pub fn image_bounds(&self) -> Size {
        Size::new(
            self.geometry.content_rect().width,
            self.body_bottom() - self.body_top(),
        )
    }

    pub fn layout(&self, blocks: &[Block]) -> LaidOutDocument {
        let mut cursor = PageCursor::new(self);
        for (i, block) in blocks.iter().enumerate() {
            cursor.place(block, blocks.get(i + 1));
        }
        cursor.finish()
    }

    /// Height the start of `block` needs on the page, for keep-with-next.
    fn leading_height(&self, block: &Block) -> f32 {
        match block {
            Block::Text(text) => text.space_before + text.style.line_height(),
            Block::Table(table) => {
                table.space_before + TABLE_FONT_SIZE * LINE_HEIGHT_FACTOR + 2.0 * CELL_PADDING_Y
            }
            Block::Image {
                size, space_before, ..
            } => space_before + size.fit_within(self.image_bounds()).height,
            Block::Rule {
                thickness,
                space_before,
                ..
            } => space_before + thickness,
            Block::Spacer(_) | Block::PageBreak => 0.0,
        }
    }
}

struct PageCursor<'a> {
    engine: &'a LayoutEngine,
    pages: Vec<LaidOutPage>,
    current: Vec<PositionedElement>,
    y: f32,
    /// True once any body element is on the current page.
    has_body: bool,
}

impl<'a> PageCursor<'a> {
    fn new(engine: &'a LayoutEngine) -> Self {
        Self {
            engine,
            pages: Vec::new(),
            current: engine.header.clone(),
            y: engine.body_top(),
            has_body: false,
        }
    }

    fn new_page(&mut self) {
        let finished = std::mem::replace(&mut self.current, self.engine.header.clone());
        self.pages.push(LaidOutPage { elements: finished });
        self.y = self.engine.body_top();
        self.has_body = false;
    }

    /// Starts a new page unless `height` fits below the cursor. An empty page
    /// always accepts the content, even when it overflows.
    fn ensure(&mut self, height: f32) {
        if self.has_body && self.y + height > self.engine.body_bottom() {
            self.new_page();
        }
    }

    fn skip(&mut self, space: f32) {
        if self.has_body {
            self.y += space;
        }
    }

    fn push(&mut self, x: f32, y: f32, width: f32, height: f32, element: LayoutElement) {
        self.current.push(PositionedElement {
            x,
            y,
            width,
            height,
            element,
        });
        self.has_body = true;
    }

    fn place(&mut self, block: &Block, next: Option<&Block>) {
        match block {
            Block::Text(text) => self.place_text(text, next),
            Block::Table(table) => self.place_table(table),
            Block::Rule {
                thickness,
                color,
                space_before,
                space_after,
            } => {
                self.skip(*space_before);
                self.ensure(*thickness);
                let content = self.engine.geometry.content_rect();
                let y = self.y;
                self.push(
                    content.x,
                    y,
                    content.width,
                    *thickness,
                    LayoutElement::Line(LineElement {
                        color: *color,
                        thickness: *thickness,
                    }),
                );
                self.y += thickness + space_after;
            }
            Block::Image {
                image,
                size,
                align,
                space_before,
            } => {
                let fitted = size.fit_within(self.engine.image_bounds());
                self.ensure(space_before + fitted.height);
                self.skip(*space_before);
                let content = self.engine.geometry.content_rect();
                let x = match align {
                    TextAlign::Left => content.x,
                    TextAlign::Center => content.x + (content.width - fitted.width) / 2.0,
                };
                let y = self.y;
                self.push(
                    x,
                    y,
                    fitted.width,
                    fitted.height,
                    LayoutElement::Image(ImageElement { image: *image }),
                );
                self.y += fitted.height;
            }
            Block::Spacer(height) => {
                if self.has_body {
                    self.y = (self.y + height).min(self.engine.body_bottom());
                }
            }
            Block::PageBreak => {
                if self.has_body {
                    self.new_page();
                }
            }
        }
    }

    fn place_text(&mut self, block: &TextBlock, next: Option<&Block>) {
        let content = self.engine.geometry.content_rect();
        let line_height = block.style.line_height();
        let max_width = (content.width - block.indent - block.hanging).max(1.0);
        let lines = wrap_text(&block.content, block.style.font, block.style.size, max_width);

        if block.keep_with_next {
            let next_height = next.map(|n| self.engine.leading_height(n)).unwrap_or(0.0);
            let needed = block.space_before + lines.len() as f32 * line_height + next_height;
            self.ensure(needed);
        }
        self.skip(block.space_before);

        for (i, line) in lines.into_iter().enumerate() {
            self.ensure(line_height);
            let width = block.style.width_of(&line);
            let x = match block.align {
                TextAlign::Left if i > 0 => content.x + block.indent + block.hanging,
                TextAlign::Left => content.x + block.indent,
                TextAlign::Center => content.x + (content.width - width) / 2.0,
            };
            let y = self.y;
            self.push(
                x,
                y,
                width,
                line_height,
                LayoutElement::Text(TextElement {
                    content: line,
                    style: block.style,
                }),
            );
            self.y += line_height;
        }
    }

    fn place_table(&mut self, table: &TableBlock) {
        let content = self.engine.geometry.content_rect();
        let label_width = content.width * 2.0 / 5.0;
        let value_width = content.width - label_width;
        let label_style = TextStyle::new(PdfFont::Bold, TABLE_FONT_SIZE);
        let value_style = TextStyle::new(PdfFont::Regular, TABLE_FONT_SIZE);
        let line_height = value_style.line_height();

        self.skip(table.space_before);
        for (label, value) in &table.rows {
            let label_lines = wrap_text(
                label,
                label_style.font,
                label_style.size,
                label_width - 2.0 * CELL_PADDING_X,
            );
            let value_lines = wrap_text(
                value,
                value_style.font,
                value_style.size,
                value_width - 2.0 * CELL_PADDING_X,
            );
            let row_height =
                label_lines.len().max(value_lines.len()) as f32 * line_height + 2.0 * CELL_PADDING_Y;
            self.ensure(row_height);

            let top = self.y;
            self.push(
                content.x,
                top,
                label_width,
                row_height,
                LayoutElement::Rectangle(RectElement {
                    fill: palette::CELL_BACKGROUND,
                }),
            );
            for (column_x, style, lines) in [
                (content.x, label_style, label_lines),
                (content.x + label_width, value_style, value_lines),
            ] {
                for (i, line) in lines.into_iter().enumerate() {
                    let width = style.width_of(&line);
                    self.push(
                        column_x + CELL_PADDING_X,
                        top + CELL_PADDING_Y + i as f32 * line_height,
                        width,
                        line_height,
                        LayoutElement::Text(TextElement { content: line, style }),
                    );
                }
            }
            self.push(
                content.x,
                top + row_height,
                content.width,
                TABLE_BORDER_WIDTH,
                LayoutElement::Line(LineElement {
                    color: palette::CELL_BORDER,
                    thickness: TABLE_BORDER_WIDTH,
                }),
            );
            self.y = top + row_height;
        }
    }

    fn finish(mut self) -> LaidOutDocument {
        if self.has_body || self.pages.is_empty() {
            let last = std::mem::take(&mut self.current);
            self.pages.push(LaidOutPage { elements: last });
        }
        LaidOutDocument { pages: self.pages }
    }
}
