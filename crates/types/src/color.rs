use std::fmt;

/// An opaque RGB color shared by the package and page backends.
///
/// WordprocessingML wants bare `RRGGBB` hex strings while PDF content streams
/// want unit floats, so the palette is defined once here and converted at the
/// edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Upper-case `RRGGBB` without a leading `#`, as used by `w:color` and `w:shd`.
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Channels scaled to `0.0..=1.0` for PDF color operators.
    pub fn to_unit_rgb(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

/// The report palette. Both backends draw headings, captions and table cells
/// from these values so the two outputs look alike.
pub mod palette {
    use super::Color;

    /// Headings and the title block.
    pub const BRAND_BLUE: Color = Color::rgb(0x1F, 0x49, 0x7D);
    /// Captions, subtitles and footers.
    pub const MUTED_GRAY: Color = Color::rgb(0x59, 0x59, 0x59);
    /// Label cells of the info tables.
    pub const CELL_BACKGROUND: Color = Color::rgb(0xEE, 0xF3, 0xF9);
    /// Table borders and horizontal rules.
    pub const CELL_BORDER: Color = Color::rgb(0xD0, 0xD0, 0xD0);
}
