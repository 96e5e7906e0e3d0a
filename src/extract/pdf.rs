use super::{strip_invisible, ExtractError, ExtractedText, TextExtractor};
use lopdf::Document;
use std::path::Path;
use tracing::{debug, warn};

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<ExtractedText, ExtractError> {
        let doc = Document::load(path).map_err(|e| ExtractError::Open(e.to_string()))?;
        extract_document(&doc, path)
    }
}

/// Reject encrypted documents, then extract every page.
pub(crate) fn extract_document(doc: &Document, origin: &Path) -> Result<ExtractedText, ExtractError> {
    if doc.is_encrypted() {
        return Err(ExtractError::Encrypted(origin.to_string_lossy().to_string()));
    }
    Ok(extract_pages(doc))
}

/// Concatenate page text in page order. A page that fails to decode
/// contributes empty text.
pub(crate) fn extract_pages(doc: &Document) -> ExtractedText {
    let pages = doc.get_pages();
    let mut page_texts = Vec::with_capacity(pages.len());

    for page_num in pages.keys() {
        let text = match doc.extract_text(&[*page_num]) {
            Ok(text) => text,
            Err(e) => {
                warn!("Page {} unreadable, treating as empty: {}", page_num, e);
                String::new()
            }
        };
        page_texts.push(text);
    }

    debug!("Extracted {} pages", page_texts.len());

    ExtractedText {
        full_text: strip_invisible(page_texts.join("\n").trim()),
        unit_count: page_texts.len(),
    }
}
