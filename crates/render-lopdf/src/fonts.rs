//! The three standard Helvetica faces used for every page of the report.
//!
//! Widths are the Adobe AFM advance widths in thousandths of an em. Text is
//! written with `WinAnsiEncoding`, so [`to_win_ansi`] maps the handful of
//! non-Latin-1 characters the report prints (bullets, dashes, curly quotes)
//! onto their code page 1252 slots.

/// One of the fonts registered in the page resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PdfFont {
    Regular,
    Bold,
    Oblique,
}

impl PdfFont {
    pub const ALL: [PdfFont; 3] = [PdfFont::Regular, PdfFont::Bold, PdfFont::Oblique];

    /// Name under `/Font` in the page resources.
    pub fn resource_name(self) -> &'static str {
        match self {
            PdfFont::Regular => "F1",
            PdfFont::Bold => "F2",
            PdfFont::Oblique => "F3",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            PdfFont::Regular => "Helvetica",
            PdfFont::Bold => "Helvetica-Bold",
            PdfFont::Oblique => "Helvetica-Oblique",
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            PdfFont::Bold => &HELVETICA_BOLD_WIDTHS,
            // The oblique face shares the upright metrics.
            PdfFont::Regular | PdfFont::Oblique => &HELVETICA_WIDTHS,
        }
    }

    /// Advance width of `c` in thousandths of an em.
    pub fn char_width(self, c: char) -> u16 {
        match c {
            ' '..='~' => self.widths()[c as usize - 32],
            '•' => 350,
            '—' => 1000,
            '–' => 556,
            '‘' | '’' => if self == PdfFont::Bold { 278 } else { 222 },
            '“' | '”' => if self == PdfFont::Bold { 500 } else { 333 },
            _ => DEFAULT_WIDTH,
        }
    }

    /// Width of `text` at `size` points.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(self.char_width(c))).sum();
        units as f32 * size / 1000.0
    }
}

const DEFAULT_WIDTH: u16 = 556;

const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Encodes `text` for a `WinAnsiEncoding` font. Characters without a slot
/// in code page 1252 become `?`.
pub fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '€' => 0x80,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '◦' => b'o',
            '\t' => b' ',
            c if (c as u32) < 0x80 => c as u8,
            c if (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}
