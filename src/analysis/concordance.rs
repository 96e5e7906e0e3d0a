use crate::nlp::{AnnotatedToken, Pos};
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub struct KwicOptions {
    /// Tokens of context on each side
    pub window: usize,
    pub max_rows: usize,
}

impl Default for KwicOptions {
    fn default() -> Self {
        Self {
            window: 5,
            max_rows: 50,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ConcordanceRow {
    pub left: String,
    pub keyword: String,
    pub right: String,
}

fn join_surface(tokens: &[AnnotatedToken]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect::<Vec<_>>().join(" ")
}

/// Keyword-in-context rows for every token matching `lemma` (case-insensitive)
/// and `pos`, in document order. Windows clip at the document edges.
pub fn kwic(tokens: &[AnnotatedToken], lemma: &str, pos: Pos, options: KwicOptions) -> Vec<ConcordanceRow> {
    let target = lemma.to_lowercase();

    tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.pos == pos && t.lemma.to_lowercase() == target)
        .take(options.max_rows)
        .map(|(i, t)| {
            let start = i.saturating_sub(options.window);
            let end = i.saturating_add(1).saturating_add(options.window).min(tokens.len());
            ConcordanceRow {
                left: join_surface(&tokens[start..i]),
                keyword: t.text.clone(),
                right: join_surface(&tokens[i + 1..end]),
            }
        })
        .collect()
}
