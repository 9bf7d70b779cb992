pub mod docx_assertions;
pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text lines of one page (1-based), in paint order.
    pub fn page_lines(&self, page: u32) -> Vec<String> {
        pdf_assertions::page_lines(&self.doc, page)
    }

    /// Text lines of every page.
    pub fn lines(&self) -> Vec<String> {
        (1..=self.page_count() as u32).flat_map(|p| self.page_lines(p)).collect()
    }
}
