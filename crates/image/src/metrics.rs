//! Physical resolution metadata read straight from container headers.
//!
//! The `image` crate decodes pixels but does not surface DPI. PNG density
//! comes from the `png` decoder's `pHYs` info; the JFIF `APP0` density and
//! the BMP pixels-per-metre fields are read from their fixed header offsets.

use crate::format::ImageFormat;
use std::io::Cursor;

const INCHES_PER_METRE: f64 = 39.370_078_740_157_48;
const CM_PER_INCH: f64 = 2.54;

/// Horizontal and vertical resolution in dots per inch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub dpi_x: f64,
    pub dpi_y: f64,
}

impl Resolution {
    pub fn new(dpi_x: f64, dpi_y: f64) -> Self {
        Self { dpi_x, dpi_y }
    }

    fn per_metre(x: u32, y: u32) -> Option<Self> {
        if x == 0 || y == 0 {
            return None;
        }
        Some(Self::new(f64::from(x) / INCHES_PER_METRE, f64::from(y) / INCHES_PER_METRE))
    }
}

/// Reads the resolution recorded in the image header, if the container has one.
pub fn read_resolution(data: &[u8]) -> Option<Resolution> {
    match ImageFormat::detect(data)? {
        ImageFormat::Png => png_resolution(data),
        ImageFormat::Jpeg => jfif_resolution(data),
        ImageFormat::Bmp => bmp_resolution(data),
        ImageFormat::Gif => None,
    }
}

fn be_u16(data: &[u8], at: usize) -> Option<u16> {
    data.get(at..at + 2).map(|b| u16::from_be_bytes([b[0], b[1]]))
}

fn le_i32(data: &[u8], at: usize) -> Option<i32> {
    data.get(at..at + 4).map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

fn png_resolution(data: &[u8]) -> Option<Resolution> {
    let reader = match png::Decoder::new(Cursor::new(data)).read_info() {
        Ok(reader) => reader,
        Err(e) => {
            log::debug!("PNG header unreadable, no resolution: {}", e);
            return None;
        }
    };
    let dims = reader.info().pixel_dims?;
    // `Unspecified` only records an aspect ratio.
    match dims.unit {
        png::Unit::Meter => Resolution::per_metre(dims.xppu, dims.yppu),
        png::Unit::Unspecified => None,
    }
}

fn jfif_resolution(data: &[u8]) -> Option<Resolution> {
    let mut pos = 2;
    loop {
        if *data.get(pos)? != 0xFF {
            return None;
        }
        let marker = *data.get(pos + 1)?;
        match marker {
            0xFF => {
                pos += 1;
                continue;
            }
            // Start of scan or end of image: the header is over.
            0xDA | 0xD9 => return None,
            _ => {}
        }
        let len = usize::from(be_u16(data, pos + 2)?);
        if marker == 0xE0 && data.get(pos + 4..pos + 9) == Some(b"JFIF\0") {
            let units = *data.get(pos + 11)?;
            let x = f64::from(be_u16(data, pos + 12)?);
            let y = f64::from(be_u16(data, pos + 14)?);
            if x <= 0.0 || y <= 0.0 {
                return None;
            }
            return match units {
                1 => Some(Resolution::new(x, y)),
                2 => Some(Resolution::new(x * CM_PER_INCH, y * CM_PER_INCH)),
                _ => None,
            };
        }
        pos += 2 + len;
    }
}

fn bmp_resolution(data: &[u8]) -> Option<Resolution> {
    let header_size = le_i32(data, 14)?;
    if header_size < 40 {
        return None;
    }
    let x = u32::try_from(le_i32(data, 38)?).ok()?;
    let y = u32::try_from(le_i32(data, 42)?).ok()?;
    Resolution::per_metre(x, y)
}
