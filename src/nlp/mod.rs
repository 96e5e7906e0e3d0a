mod pos;
mod stopwords;

pub use pos::{Pos, UnknownPos};
pub use stopwords::is_stop_word;

use crate::resources;
use nlprule::Tokenizer;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct AnnotatedToken {
    pub text: String,
    pub lemma: String,
    pub pos: Pos,
    pub is_alpha: bool,
    pub is_stop: bool,
}

impl AnnotatedToken {
    /// Build a token, deriving the alphabetic and stop-word flags from `text`.
    pub fn new(text: impl Into<String>, lemma: impl Into<String>, pos: Pos) -> Self {
        let text = text.into();
        let is_alpha = !text.is_empty() && text.chars().all(char::is_alphabetic);
        let is_stop = is_stop_word(&text);
        Self {
            text,
            lemma: lemma.into(),
            pos,
            is_alpha,
            is_stop,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NlpError {
    #[error("Failed to load tokenizer model from {path}: {reason}")]
    Load { path: String, reason: String },
    #[error(transparent)]
    Resource(#[from] resources::ResourceError),
}

/// Turns raw text into annotated tokens in source order.
pub trait Annotator {
    fn annotate(&self, text: &str) -> Vec<AnnotatedToken>;
}

/// Annotator backed by an nlprule tokenizer model.
///
/// The model is loaded once by the caller and the pipeline is passed by
/// reference to whatever needs it.
pub struct NlpPipeline {
    tokenizer: Tokenizer,
}

impl NlpPipeline {
    pub fn load(model_path: &Path) -> Result<Self, NlpError> {
        info!("Loading tokenizer model from {:?}", model_path);
        let tokenizer = Tokenizer::new(model_path).map_err(|e| NlpError::Load {
            path: model_path.to_string_lossy().to_string(),
            reason: e.to_string(),
        })?;
        info!("Tokenizer model loaded");
        Ok(Self { tokenizer })
    }

    /// Load the model from the resource directory, downloading it first if needed.
    pub fn load_or_fetch() -> Result<Self, NlpError> {
        let path = resources::ensure_tokenizer_model(|status| {
            debug!("tokenizer model: {:?}", status);
        })?;
        Self::load(&path)
    }

    pub fn is_model_available() -> bool {
        resources::is_tokenizer_available()
    }
}

impl Annotator for NlpPipeline {
    fn annotate(&self, text: &str) -> Vec<AnnotatedToken> {
        let mut tokens = Vec::new();

        for sentence in self.tokenizer.pipe(text) {
            for token in sentence.tokens() {
                let word = token.word();
                let surface = word.text().as_str();
                if surface.trim().is_empty() {
                    continue;
                }

                let readings: Vec<(&str, &str)> = word
                    .tags()
                    .iter()
                    .map(|data| (data.pos().as_str(), data.lemma().as_str()))
                    .collect();
                let (lemma, pos) = select_reading(&readings, surface);

                tokens.push(AnnotatedToken::new(surface, lemma, pos));
            }
        }

        debug!("Annotated {} tokens", tokens.len());
        tokens
    }
}

/// Pick the lemma and coarse tag for a word from its `(penn tag, lemma)` readings.
///
/// Readings come in lexicon order, not by likelihood. Sentence markers and
/// empty tags are skipped, and a verb reading wins over the others so that
/// "runs" is not counted as a plural noun. Without a usable reading the word
/// is its own lemma and tagged X.
pub(crate) fn select_reading(readings: &[(&str, &str)], surface: &str) -> (String, Pos) {
    let tagged = || {
        readings
            .iter()
            .filter(|(tag, _)| !tag.is_empty() && !tag.starts_with("SENT_"))
    };
    let reading = tagged()
        .find(|(tag, _)| tag.starts_with("VB"))
        .or_else(|| tagged().next());

    match reading {
        Some(&(tag, lemma)) => {
            let lemma = if lemma.is_empty() { surface } else { lemma };
            (lemma.to_string(), Pos::from_penn(tag, lemma))
        }
        None => (surface.to_string(), Pos::X),
    }
}
