use crate::nlp::{AnnotatedToken, Pos};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy)]
pub struct FrequencyOptions {
    pub min_len: usize,
    pub remove_stopwords: bool,
}

impl Default for FrequencyOptions {
    fn default() -> Self {
        Self {
            min_len: 2,
            remove_stopwords: true,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct FrequencyRow {
    pub lemma: String,
    pub frequency: usize,
}

/// Lemma counts for one part of speech, most frequent first.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    pub pos: Pos,
    pub rows: Vec<FrequencyRow>,
}

impl FrequencyTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn total(&self) -> usize {
        self.rows.iter().map(|r| r.frequency).sum()
    }

    pub fn top(&self, n: usize) -> FrequencyTable {
        FrequencyTable {
            pos: self.pos,
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    pub fn lemmas(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.lemma.clone()).collect()
    }

    pub fn get(&self, lemma: &str) -> Option<usize> {
        self.rows.iter().find(|r| r.lemma == lemma).map(|r| r.frequency)
    }
}

/// Count lemmas in first-seen order, then stable-sort by descending count so
/// ties keep that order.
pub(crate) fn count_ranked<I>(lemmas: I) -> Vec<FrequencyRow>
where
    I: IntoIterator<Item = String>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<FrequencyRow> = Vec::new();

    for lemma in lemmas {
        match index.get(&lemma) {
            Some(&i) => rows[i].frequency += 1,
            None => {
                index.insert(lemma.clone(), rows.len());
                rows.push(FrequencyRow { lemma, frequency: 1 });
            }
        }
    }

    rows.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    rows
}

pub fn analyze_pos(tokens: &[AnnotatedToken], pos: Pos, options: FrequencyOptions) -> FrequencyTable {
    let lemmas = tokens
        .iter()
        .filter(|t| t.pos == pos && t.is_alpha)
        .filter(|t| !(options.remove_stopwords && t.is_stop))
        .map(|t| t.lemma.to_lowercase())
        .filter(|lemma| lemma.chars().count() >= options.min_len);

    FrequencyTable {
        pos,
        rows: count_ranked(lemmas),
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct WordFormRow {
    pub lemma: String,
    pub form: String,
    pub frequency: usize,
}

/// Surface forms observed for each requested lemma.
///
/// Rows are grouped by lemma in first-seen order; forms keep first-seen order
/// within their lemma.
pub fn lemma_forms(tokens: &[AnnotatedToken], lemmas: &[String], pos: Pos) -> Vec<WordFormRow> {
    let wanted: HashSet<String> = lemmas.iter().map(|l| l.to_lowercase()).collect();
    let mut groups: Vec<(String, Vec<WordFormRow>)> = Vec::new();

    for token in tokens.iter().filter(|t| t.pos == pos) {
        let lemma = token.lemma.to_lowercase();
        if !wanted.contains(&lemma) {
            continue;
        }

        let slot = match groups.iter().position(|(l, _)| *l == lemma) {
            Some(i) => i,
            None => {
                groups.push((lemma.clone(), Vec::new()));
                groups.len() - 1
            }
        };
        let group = &mut groups[slot].1;

        match group.iter_mut().find(|row| row.form == token.text) {
            Some(row) => row.frequency += 1,
            None => group.push(WordFormRow {
                lemma,
                form: token.text.clone(),
                frequency: 1,
            }),
        }
    }

    groups.into_iter().flat_map(|(_, rows)| rows).collect()
}
