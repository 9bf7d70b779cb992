//! ImageIntrospector trait for abstracting pixel and resolution discovery.
//!
//! Reading image metadata depends on which codecs are compiled in, so the
//! normalizer talks to it only through this trait and treats every failure as
//! a reason to fall back, never as a generation error.

use crate::error::IntrospectionError;
use crate::metrics::{read_resolution, Resolution};
use std::fmt::Debug;
use std::io::Cursor;

/// Resolution assumed when an image decodes but carries no density metadata.
pub const DEFAULT_DPI: f64 = 96.0;

/// Pixel dimensions plus physical resolution of one image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageInfo {
    pub width_px: u32,
    pub height_px: u32,
    pub resolution: Resolution,
}

/// A source of image metadata.
///
/// # Implementations
///
/// - `NativeIntrospector`: decodes headers with the `image` crate codecs.
/// - `FallbackIntrospector`: always reports that introspection is unavailable.
pub trait ImageIntrospector: Send + Sync + Debug {
    /// Reads pixel dimensions and resolution from raw image bytes.
    fn introspect(&self, data: &[u8]) -> Result<ImageInfo, IntrospectionError>;

    /// Returns a human-readable name for this introspector (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Reads headers through the codecs compiled into the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeIntrospector;

impl ImageIntrospector for NativeIntrospector {
    fn introspect(&self, data: &[u8]) -> Result<ImageInfo, IntrospectionError> {
        let (width_px, height_px) = image::ImageReader::new(Cursor::new(data))
            .with_guessed_format()?
            .into_dimensions()?;

        if width_px == 0 || height_px == 0 {
            return Err(IntrospectionError::EmptyImage {
                width: width_px,
                height: height_px,
            });
        }

        let resolution = read_resolution(data)
            .filter(|r| r.dpi_x > 0.0 && r.dpi_y > 0.0)
            .unwrap_or(Resolution::new(DEFAULT_DPI, DEFAULT_DPI));

        Ok(ImageInfo {
            width_px,
            height_px,
            resolution,
        })
    }

    fn name(&self) -> &'static str {
        "native"
    }
}

/// Stands in where no codec is available.
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackIntrospector;

impl ImageIntrospector for FallbackIntrospector {
    fn introspect(&self, _data: &[u8]) -> Result<ImageInfo, IntrospectionError> {
        Err(IntrospectionError::Unsupported(self.name()))
    }

    fn name(&self) -> &'static str {
        "fallback"
    }
}
