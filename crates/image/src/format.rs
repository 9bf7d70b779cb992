/// The image container formats a package may embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
}

impl ImageFormat {
    /// Detection order matters: the first matching signature wins.
    const SIGNATURES: [(ImageFormat, &'static [u8]); 4] = [
        (ImageFormat::Jpeg, &[0xFF, 0xD8, 0xFF]),
        (ImageFormat::Png, &[0x89, 0x50, 0x4E, 0x47]),
        (ImageFormat::Gif, &[0x47, 0x49, 0x46]),
        (ImageFormat::Bmp, &[0x42, 0x4D]),
    ];

    /// Returns the format whose magic bytes prefix `data`, if any.
    pub fn detect(data: &[u8]) -> Option<ImageFormat> {
        Self::SIGNATURES
            .iter()
            .find(|(_, magic)| data.starts_with(magic))
            .map(|(format, _)| *format)
    }

    /// Like [`ImageFormat::detect`] but never fails: unknown payloads are
    /// treated as PNG.
    pub fn sniff(data: &[u8]) -> ImageFormat {
        Self::detect(data).unwrap_or(ImageFormat::Png)
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Bmp => "image/bmp",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
        }
    }
}
