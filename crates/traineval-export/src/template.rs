use lopdf::Document;
use tracing::{debug, warn};

use crate::error::ExportError;

/// Per-page text of a template PDF, used as the faint background layer of
/// the generated report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateText {
    pages: Vec<String>,
}

impl TemplateText {
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// Extract the text of every page of a PDF held in memory.
    ///
    /// A page whose text cannot be extracted contributes an empty string so
    /// that later pages keep their index.
    pub fn from_pdf_bytes(bytes: &[u8]) -> Result<Self, ExportError> {
        let doc = Document::load_mem(bytes).map_err(|e| ExportError::Template(e.to_string()))?;

        let pages: Vec<String> = doc
            .get_pages()
            .keys()
            .map(|&number| match doc.extract_text(&[number]) {
                Ok(text) => text,
                Err(e) => {
                    warn!(page = number, error = %e, "could not extract template page text");
                    String::new()
                }
            })
            .collect();

        debug!(pages = pages.len(), "loaded template text");
        Ok(Self { pages })
    }

    /// Text of the template page at `index` (0-based), if the template has
    /// that many pages.
    pub fn page(&self, index: usize) -> Option<&str> {
        self.pages.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
