use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP container error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("XML escape error: {0}")]
    XmlEscape(#[from] quick_xml::escape::EscapeError),

    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("UTF-8 encoding error: {0}")]
    FromUtf8(#[from] std::string::FromUtf8Error),

    #[error("Malformed XML: {0}")]
    Malformed(String),

    #[error("Part '{0}' not found in package")]
    MissingPart(String),

    #[error("Part '{0}' is not an XML part")]
    NotXml(String),
}
