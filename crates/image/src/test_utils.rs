use image::{ImageBuffer, Rgb, RgbImage};
use std::io::Cursor;

fn encode(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
    let img: RgbImage = ImageBuffer::from_fn(width, height, |x, y| Rgb([(x * 7) as u8, (y * 13) as u8, 128]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).unwrap();
    out.into_inner()
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, image::ImageFormat::Png)
}

pub fn webp_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, image::ImageFormat::WebP)
}

/// An RGB PNG whose `pHYs` chunk records `ppu` pixels per `unit`.
pub fn png_bytes_with_pixel_dims(width: u32, height: u32, ppu: u32, unit: png::Unit) -> Vec<u8> {
    let pixels: Vec<u8> = (0..width * height).flat_map(|i| [(i * 7) as u8, 64, 128]).collect();
    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppu,
        yppu: ppu,
        unit,
    }));
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(&pixels).unwrap();
    writer.finish().unwrap();
    out
}

pub fn png_bytes_with_dpi(width: u32, height: u32, dpi: f64) -> Vec<u8> {
    let ppm = (dpi * 39.370_078_740_157_48).round() as u32;
    png_bytes_with_pixel_dims(width, height, ppm, png::Unit::Meter)
}
