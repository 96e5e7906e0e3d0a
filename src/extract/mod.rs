//! Document text extraction.
//!
//! A backend turns one file into a flat string in reading order. The
//! backend is chosen from the file extension; PDF is the only one.

mod pdf;

pub use self::pdf::PdfExtractor;

use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Failed to open document: {0}")]
    Open(String),
    #[error("Document is encrypted: {0}")]
    Encrypted(String),
    #[error("Unsupported document type: {0}")]
    Unsupported(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub full_text: String,
    /// Pages read, including ones that yielded no text
    pub unit_count: usize,
}

impl ExtractedText {
    pub fn char_count(&self) -> usize {
        self.full_text.chars().count()
    }

    pub fn word_count(&self) -> usize {
        self.full_text.unicode_words().count()
    }
}

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<ExtractedText, ExtractError>;
}

/// Pick a backend by extension and extract.
pub fn extract_text(path: &Path) -> Result<ExtractedText, ExtractError> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => PdfExtractor.extract(path),
        _ => Err(ExtractError::Unsupported(path.to_string_lossy().to_string())),
    }
}

const INVISIBLE: &[char] = &['\u{200b}', '\u{200c}', '\u{200d}', '\u{2060}', '\u{feff}'];

/// Remove zero-width and byte-order-mark characters left behind by extractors.
pub fn strip_invisible(text: &str) -> String {
    text.chars().filter(|c| !INVISIBLE.contains(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_zero_width_characters() {
        assert_eq!(strip_invisible("\u{feff}The\u{200b} cat"), "The cat");
        assert_eq!(strip_invisible("plain"), "plain");
    }

    #[test]
    fn rejects_unknown_extensions() {
        let err = extract_text(Path::new("book.epub")).unwrap_err();
        assert!(matches!(err, ExtractError::Unsupported(_)));
    }

    #[test]
    fn counts_words_and_chars() {
        let text = ExtractedText {
            full_text: "The cat runs. The dog runs fast.".to_string(),
            unit_count: 1,
        };
        assert_eq!(text.word_count(), 7);
        assert_eq!(text.char_count(), 32);
    }
}
