//! Decoding evidence and logo images into PDF image XObjects.

use crate::error::RenderError;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::GenericImageView;
use lopdf::{dictionary, Stream};
use std::io::Write;

/// Alpha channel stored as a separate `/SMask` image.
#[derive(Debug, Clone)]
pub struct SoftMask {
    pub data: Vec<u8>,
}

/// A decoded image in the form it is written to the document.
#[derive(Debug, Clone)]
pub struct PdfImage {
    pub width: u32,
    pub height: u32,
    pub color_space: &'static str,
    pub filter: &'static str,
    pub data: Vec<u8>,
    pub alpha: Option<SoftMask>,
}

pub(crate) fn flate_compress(data: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

impl PdfImage {
    /// JPEG payloads are passed through under `DCTDecode`. Every other format
    /// is decoded to RGB and Flate-compressed, with an alpha soft mask when
    /// any pixel is not fully opaque.
    pub fn decode(data: &[u8]) -> Result<PdfImage, RenderError> {
        let format = image::guess_format(data).ok();
        let decoded = image::load_from_memory(data)?;
        let (width, height) = decoded.dimensions();

        if matches!(format, Some(image::ImageFormat::Jpeg)) {
            let color_space = match decoded.color() {
                image::ColorType::L8 | image::ColorType::La8 => "DeviceGray",
                _ => "DeviceRGB",
            };
            return Ok(PdfImage {
                width,
                height,
                color_space,
                filter: "DCTDecode",
                data: data.to_vec(),
                alpha: None,
            });
        }

        let rgba = decoded.to_rgba8();
        let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
        let mut alpha = Vec::with_capacity(width as usize * height as usize);
        let mut translucent = false;
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            translucent |= a != 255;
            rgb.extend_from_slice(&[r, g, b]);
            alpha.push(a);
        }

        let alpha = if translucent {
            Some(SoftMask {
                data: flate_compress(&alpha)?,
            })
        } else {
            None
        };
        Ok(PdfImage {
            width,
            height,
            color_space: "DeviceRGB",
            filter: "FlateDecode",
            data: flate_compress(&rgb)?,
            alpha,
        })
    }

    /// The `/SMask` stream, if the image has one.
    pub fn soft_mask_stream(&self) -> Option<Stream> {
        self.alpha.as_ref().map(|mask| {
            Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => i64::from(self.width),
                    "Height" => i64::from(self.height),
                    "ColorSpace" => "DeviceGray",
                    "BitsPerComponent" => 8,
                    "Filter" => "FlateDecode",
                },
                mask.data.clone(),
            )
        })
    }

    /// The image XObject stream. `soft_mask` is the id of the already
    /// written mask stream.
    pub fn image_stream(&self, soft_mask: Option<lopdf::ObjectId>) -> Stream {
        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(self.width),
            "Height" => i64::from(self.height),
            "ColorSpace" => self.color_space,
            "BitsPerComponent" => 8,
            "Filter" => self.filter,
        };
        if let Some(id) = soft_mask {
            dict.set("SMask", id);
        }
        let mut stream = Stream::new(dict, self.data.clone());
        stream.allows_compression = false;
        stream
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, Rgba};
    use std::io::Cursor;

    fn encode(img: image::DynamicImage, format: image::ImageFormat) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    #[test]
    fn jpeg_passes_through_as_dct() {
        let img = ImageBuffer::from_pixel(4, 3, Rgb([200u8, 10, 10]));
        let bytes = encode(image::DynamicImage::ImageRgb8(img), image::ImageFormat::Jpeg);
        let decoded = PdfImage::decode(&bytes).unwrap();
        assert_eq!(decoded.filter, "DCTDecode");
        assert_eq!(decoded.data, bytes);
        assert_eq!((decoded.width, decoded.height), (4, 3));
        assert!(decoded.alpha.is_none());
    }

    #[test]
    fn opaque_png_has_no_soft_mask() {
        let img = ImageBuffer::from_pixel(2, 2, Rgba([1u8, 2, 3, 255]));
        let bytes = encode(image::DynamicImage::ImageRgba8(img), image::ImageFormat::Png);
        let decoded = PdfImage::decode(&bytes).unwrap();
        assert_eq!(decoded.filter, "FlateDecode");
        assert!(decoded.alpha.is_none());
        assert!(decoded.soft_mask_stream().is_none());
    }

    #[test]
    fn translucent_png_gets_soft_mask() {
        let img = ImageBuffer::from_pixel(2, 2, Rgba([1u8, 2, 3, 128]));
        let bytes = encode(image::DynamicImage::ImageRgba8(img), image::ImageFormat::Png);
        let decoded = PdfImage::decode(&bytes).unwrap();
        assert!(decoded.alpha.is_some());
        assert!(decoded.soft_mask_stream().is_some());
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(PdfImage::decode(b"definitely not an image").is_err());
    }
}
