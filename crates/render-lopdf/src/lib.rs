//! PDF rendering of incident reports with lopdf.
//!
//! Rendering runs in two stages. [`PdfReportRenderer::layout`] turns the
//! report into pages of positioned elements, which tests can inspect, and
//! [`paint`] writes those pages into a PDF using the standard Helvetica faces.

mod error;
pub mod fonts;
pub mod images;
pub mod layout;
mod painter;
pub mod report;
mod renderer;

pub use error::RenderError;
pub use images::PdfImage;
pub use layout::{Block, LaidOutDocument, LaidOutPage, LayoutElement, LayoutEngine, PositionedElement};
pub use painter::{paint, DocumentInfo};
pub use renderer::{PdfReportRenderer, ReportLayout};
