use crate::format::ImageFormat;
use crate::introspect::{FallbackIntrospector, ImageInfo, ImageIntrospector, NativeIntrospector};
use std::io::Cursor;

/// English Metric Units per inch.
pub const EMU_PER_INCH: f64 = 914_400.0;
/// English Metric Units per PDF point.
pub const EMU_PER_POINT: f64 = 12_700.0;
/// Widest an embedded image may be drawn, about 15.5 cm.
pub const MAX_WIDTH_EMU: i64 = 5_600_000;
/// Height paired with the width cap when an image cannot be measured.
pub const FALLBACK_HEIGHT_EMU: i64 = 3_600_000;

/// On-page size of an embedded image in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySize {
    pub width_emu: i64,
    pub height_emu: i64,
}

impl DisplaySize {
    pub fn new(width_emu: i64, height_emu: i64) -> Self {
        Self {
            width_emu,
            height_emu,
        }
    }

    /// Width and height in PDF points.
    pub fn to_points(self) -> (f32, f32) {
        (
            (self.width_emu as f64 / EMU_PER_POINT) as f32,
            (self.height_emu as f64 / EMU_PER_POINT) as f32,
        )
    }
}

/// Scales `width × height` down so that the width equals `max_width`,
/// keeping the aspect ratio. Sizes already within the cap are unchanged.
pub fn cap_width(width: i64, height: i64, max_width: i64) -> DisplaySize {
    if width <= max_width {
        return DisplaySize::new(width, height);
    }
    let scale = max_width as f64 / width as f64;
    DisplaySize::new(max_width, (height as f64 * scale) as i64)
}

/// An image ready for embedding: final bytes, container format and size.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage {
    pub format: ImageFormat,
    pub data: Vec<u8>,
    pub size: DisplaySize,
    /// True when the payload was re-encoded as PNG.
    pub transcoded: bool,
}

impl NormalizedImage {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }
}

/// Computes display sizes for evidence images.
///
/// Introspectors are tried in order; the first success wins. When all of them
/// fail the image still gets a size: the width cap paired with a fixed height.
#[derive(Debug)]
pub struct ImageNormalizer {
    introspectors: Vec<Box<dyn ImageIntrospector>>,
    max_width_emu: i64,
    fallback_height_emu: i64,
}

impl Default for ImageNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageNormalizer {
    /// Native introspection first, then the fallback.
    pub fn new() -> Self {
        Self::with_introspectors(vec![Box::new(NativeIntrospector), Box::new(FallbackIntrospector)])
    }

    pub fn with_introspectors(introspectors: Vec<Box<dyn ImageIntrospector>>) -> Self {
        Self {
            introspectors,
            max_width_emu: MAX_WIDTH_EMU,
            fallback_height_emu: FALLBACK_HEIGHT_EMU,
        }
    }

    pub fn with_max_width(mut self, max_width_emu: i64) -> Self {
        self.max_width_emu = max_width_emu;
        self
    }

    pub fn max_width_emu(&self) -> i64 {
        self.max_width_emu
    }

    pub fn fallback_size(&self) -> DisplaySize {
        DisplaySize::new(self.max_width_emu, self.fallback_height_emu)
    }

    fn introspect(&self, data: &[u8]) -> Option<ImageInfo> {
        for introspector in &self.introspectors {
            match introspector.introspect(data) {
                Ok(info) => return Some(info),
                Err(e) => log::debug!("Introspector '{}' could not read image: {}", introspector.name(), e),
            }
        }
        None
    }

    /// Target on-page size: `pixels / dpi * EMU_PER_INCH`, then capped.
    pub fn display_size(&self, data: &[u8]) -> DisplaySize {
        match self.introspect(data) {
            Some(info) => {
                let raw_w = (f64::from(info.width_px) / info.resolution.dpi_x * EMU_PER_INCH) as i64;
                let raw_h = (f64::from(info.height_px) / info.resolution.dpi_y * EMU_PER_INCH) as i64;
                cap_width(raw_w, raw_h, self.max_width_emu)
            }
            None => {
                log::warn!(
                    "Image metadata unavailable ({} bytes); using fallback display size",
                    data.len()
                );
                self.fallback_size()
            }
        }
    }

    /// Sniffs, sizes and, when the payload matches no known signature,
    /// re-encodes it as PNG so the declared content type is truthful.
    pub fn normalize(&self, data: &[u8]) -> NormalizedImage {
        let size = self.display_size(data);

        if let Some(format) = ImageFormat::detect(data) {
            return NormalizedImage {
                format,
                data: data.to_vec(),
                size,
                transcoded: false,
            };
        }

        match transcode_to_png(data) {
            Ok(png) => {
                log::debug!("Transcoded unrecognized image payload to PNG ({} -> {} bytes)", data.len(), png.len());
                NormalizedImage {
                    format: ImageFormat::Png,
                    data: png,
                    size,
                    transcoded: true,
                }
            }
            Err(e) => {
                log::warn!("Could not transcode image payload, embedding as-is: {}", e);
                NormalizedImage {
                    format: ImageFormat::Png,
                    data: data.to_vec(),
                    size,
                    transcoded: false,
                }
            }
        }
    }
}

fn transcode_to_png(data: &[u8]) -> Result<Vec<u8>, image::ImageError> {
    let decoded = image::load_from_memory(data)?;
    let mut out = Cursor::new(Vec::new());
    decoded.write_to(&mut out, image::ImageFormat::Png)?;
    Ok(out.into_inner())
}
