//! Evidence image handling for dossier.
//!
//! This crate sniffs container formats from magic bytes, reads pixel
//! dimensions and resolution through a pluggable [`ImageIntrospector`], and
//! turns them into an on-page display size with a capped width. Failing to
//! read metadata is never an error: the normalizer degrades to a fixed size.

mod error;
mod format;
mod introspect;
mod metrics;
mod normalize;

#[cfg(test)]
mod test_utils;

pub use error::IntrospectionError;
pub use format::ImageFormat;
pub use introspect::{FallbackIntrospector, ImageInfo, ImageIntrospector, NativeIntrospector, DEFAULT_DPI};
pub use metrics::{read_resolution, Resolution};
pub use normalize::{
    cap_width, DisplaySize, ImageNormalizer, NormalizedImage, EMU_PER_INCH, EMU_PER_POINT, FALLBACK_HEIGHT_EMU,
    MAX_WIDTH_EMU,
};
