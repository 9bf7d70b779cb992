use thiserror::Error;

/// Why an introspector could not report pixel dimensions.
///
/// Never surfaced past the normalizer: every variant degrades to the fixed
/// fallback display size.
#[derive(Error, Debug)]
pub enum IntrospectionError {
    #[error("Image introspection is not available in '{0}'")]
    Unsupported(&'static str),

    #[error("Failed to read image header: {0}")]
    Decode(#[from] image::ImageError),

    #[error("I/O error while sniffing image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image reports zero-sized dimensions {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
}
