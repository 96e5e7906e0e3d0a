pub mod analysis;
pub mod chart;
pub mod config;
pub mod export;
pub mod extract;
pub mod nlp;
pub mod resources;

use nlp::{AnnotatedToken, Annotator};
use serde::Serialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Extract(#[from] extract::ExtractError),
}

/// Summary of a loaded document, without its tokens.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub name: String,
    pub char_count: usize,
    pub word_count: usize,
    pub unit_count: usize,
    pub token_count: usize,
}

/// One document after extraction and annotation.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub name: String,
    pub text: extract::ExtractedText,
    pub tokens: Vec<AnnotatedToken>,
}

impl LoadedDocument {
    /// Annotate already-extracted text.
    pub fn from_text(name: impl Into<String>, text: extract::ExtractedText, annotator: &dyn Annotator) -> Self {
        let tokens = annotator.annotate(&text.full_text);
        Self {
            name: name.into(),
            text,
            tokens,
        }
    }

    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            name: self.name.clone(),
            char_count: self.text.char_count(),
            word_count: self.text.word_count(),
            unit_count: self.text.unit_count,
            token_count: self.tokens.len(),
        }
    }
}

/// Extract a document's text and annotate it.
pub fn load_document(path: &Path, annotator: &dyn Annotator) -> Result<LoadedDocument, AnalysisError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());

    info!("Extracting text from {}", name);
    let text = extract::extract_text(path)?;
    info!("Annotating {} chars", text.char_count());
    let doc = LoadedDocument::from_text(name, text, annotator);
    info!("Document ready: {} tokens", doc.tokens.len());
    Ok(doc)
}
