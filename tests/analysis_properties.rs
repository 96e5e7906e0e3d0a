//! Integration tests for the frequency, concordance and classification layer.
//!
//! These run against a small lexicon annotator so they need no tokenizer model.
//!
//! Run with: cargo test --test analysis_properties

use sflizer::analysis::{
    analyze_pos, kwic, process_report, FrequencyOptions, KwicOptions, ProcessTable, ProcessType,
};
use sflizer::extract::ExtractedText;
use sflizer::nlp::{AnnotatedToken, Annotator, Pos};
use sflizer::LoadedDocument;
use std::collections::HashMap;

/// Splits on whitespace, peels trailing punctuation, and looks words up in a
/// fixed lexicon. Unknown words become nouns lemmatized to themselves.
struct LexiconAnnotator {
    lexicon: HashMap<&'static str, (&'static str, Pos)>,
}

impl LexiconAnnotator {
    fn new() -> Self {
        let lexicon = HashMap::from([
            ("the", ("the", Pos::Det)),
            ("a", ("a", Pos::Det)),
            ("runs", ("run", Pos::Verb)),
            ("ran", ("run", Pos::Verb)),
            ("run", ("run", Pos::Verb)),
            ("knows", ("know", Pos::Verb)),
            ("knew", ("know", Pos::Verb)),
            ("said", ("say", Pos::Verb)),
            ("is", ("be", Pos::Aux)),
            ("was", ("be", Pos::Aux)),
            ("fast", ("fast", Pos::Adv)),
            ("quickly", ("quickly", Pos::Adv)),
            ("emerged", ("emerge", Pos::Verb)),
            ("zorbed", ("zorb", Pos::Verb)),
        ]);
        Self { lexicon }
    }
}

impl Annotator for LexiconAnnotator {
    fn annotate(&self, text: &str) -> Vec<AnnotatedToken> {
        let mut tokens = Vec::new();
        for raw in text.split_whitespace() {
            let word = raw.trim_end_matches(|c: char| c.is_ascii_punctuation());
            if !word.is_empty() {
                let (lemma, pos) = self
                    .lexicon
                    .get(word.to_lowercase().as_str())
                    .map(|(lemma, pos)| (lemma.to_string(), *pos))
                    .unwrap_or_else(|| (word.to_string(), Pos::Noun));
                tokens.push(AnnotatedToken::new(word, lemma, pos));
            }
            let punct = &raw[word.len()..];
            for p in punct.chars() {
                tokens.push(AnnotatedToken::new(p.to_string(), p.to_string(), Pos::Punct));
            }
        }
        tokens
    }
}

fn document(text: &str) -> LoadedDocument {
    let extracted = ExtractedText {
        full_text: text.to_string(),
        unit_count: 1,
    };
    LoadedDocument::from_text("sample.pdf", extracted, &LexiconAnnotator::new())
}

const SAMPLE: &str = "The cat runs. The dog runs fast. A bird knew the cat. \
    The dog said nothing and ran quickly. The fox is fast. Something emerged. \
    The cat zorbed the dog. The cat knows.";

#[test]
fn verb_frequency_counts_lemmas() {
    let doc = document("The cat runs. The dog runs fast.");
    let table = analyze_pos(&doc.tokens, Pos::Verb, FrequencyOptions::default());
    let pairs: Vec<_> = table.rows.iter().map(|r| (r.lemma.as_str(), r.frequency)).collect();
    assert_eq!(pairs, vec![("run", 2)]);
}

#[test]
fn counts_sum_to_qualifying_tokens() {
    let doc = document(SAMPLE);
    for pos in [Pos::Verb, Pos::Noun, Pos::Adv, Pos::Det] {
        for options in [
            FrequencyOptions::default(),
            FrequencyOptions {
                min_len: 1,
                remove_stopwords: false,
            },
            FrequencyOptions {
                min_len: 4,
                remove_stopwords: true,
            },
        ] {
            let table = analyze_pos(&doc.tokens, pos, options);
            let qualifying = doc
                .tokens
                .iter()
                .filter(|t| t.pos == pos && t.is_alpha)
                .filter(|t| !(options.remove_stopwords && t.is_stop))
                .filter(|t| t.lemma.chars().count() >= options.min_len)
                .count();
            assert_eq!(table.total(), qualifying, "pos {:?}", pos);
        }
    }
}

#[test]
fn ordering_is_non_increasing() {
    let doc = document(SAMPLE);
    let table = analyze_pos(&doc.tokens, Pos::Noun, FrequencyOptions::default());
    assert!(!table.is_empty());
    assert!(table.rows.windows(2).all(|w| w[0].frequency >= w[1].frequency));
    assert_eq!(table.rows[0].lemma, "cat");
}

#[test]
fn kwic_rows_bounded_by_cap_and_matches() {
    let doc = document(SAMPLE);
    let matches = doc
        .tokens
        .iter()
        .filter(|t| t.pos == Pos::Verb && t.lemma == "run")
        .count();
    assert_eq!(matches, 3);

    for max_rows in [1, 2, 3, 10] {
        let rows = kwic(&doc.tokens, "run", Pos::Verb, KwicOptions { window: 4, max_rows });
        assert!(rows.len() <= max_rows);
        assert!(rows.len() <= matches);
        assert_eq!(rows.len(), max_rows.min(matches));
    }
}

#[test]
fn kwic_windows_are_symmetric_and_clipped() {
    let doc = document("The cat runs fast now");
    let rows = kwic(&doc.tokens, "RUN", Pos::Verb, KwicOptions { window: 2, max_rows: 50 });
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].left, "The cat");
    assert_eq!(rows[0].keyword, "runs");
    assert_eq!(rows[0].right, "fast now");
}

#[test]
fn classification_is_total_and_case_insensitive() {
    let table = ProcessTable::standard();
    for lemma in ["know", "KNOW", "xyz123", "", "Emerge", "say", "run"] {
        let first = table.classify(lemma);
        assert!(ProcessType::ALL.contains(&first));
        assert_eq!(first, table.classify(lemma));
        assert_eq!(first, table.classify(&lemma.to_uppercase()));
    }
    assert_eq!(table.classify("know"), ProcessType::Mental);
    assert_eq!(table.classify("xyz123"), ProcessType::Material);
}

#[test]
fn process_report_over_document() {
    let doc = document(SAMPLE);
    let report = process_report(&doc.tokens, &ProcessTable::standard());

    assert_eq!(report.rows[0].verb, "run");
    assert_eq!(report.rows[0].frequency, 3);

    let know = report.rows.iter().find(|r| r.verb == "know").unwrap();
    assert_eq!(know.frequency, 2);
    assert_eq!(know.process, ProcessType::Mental);

    let zorb = report.rows.iter().find(|r| r.verb == "zorb").unwrap();
    assert_eq!(zorb.process, ProcessType::Material);

    let total: usize = report.distribution().iter().map(|(_, n)| n).sum();
    assert_eq!(total, report.rows.len());
}

#[test]
fn summary_reports_sizes() {
    let doc = document("The cat runs. The dog runs fast.");
    let summary = doc.summary();
    assert_eq!(summary.name, "sample.pdf");
    assert_eq!(summary.word_count, 7);
    assert_eq!(summary.token_count, 9);
}
