//! Systemic Functional Linguistics process classification of verbs.

use super::frequency::count_ranked;
use crate::nlp::{AnnotatedToken, Pos};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ProcessType {
    Material,
    Mental,
    Relational,
    Verbal,
    Behavioral,
    Existential,
}

impl ProcessType {
    pub const ALL: [ProcessType; 6] = [
        ProcessType::Material,
        ProcessType::Mental,
        ProcessType::Relational,
        ProcessType::Verbal,
        ProcessType::Behavioral,
        ProcessType::Existential,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ProcessType::Material => "Material",
            ProcessType::Mental => "Mental",
            ProcessType::Relational => "Relational",
            ProcessType::Verbal => "Verbal",
            ProcessType::Behavioral => "Behavioral",
            ProcessType::Existential => "Existential",
        }
    }
}

impl fmt::Display for ProcessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown process type: {0}")]
pub struct UnknownProcess(pub String);

impl FromStr for ProcessType {
    type Err = UnknownProcess;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProcessType::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownProcess(s.to_string()))
    }
}

impl TryFrom<String> for ProcessType {
    type Error = UnknownProcess;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

const STANDARD_ENTRIES: &[(ProcessType, &[&str])] = &[
    (
        ProcessType::Material,
        &[
            "do", "make", "build", "create", "use", "support", "develop", "increase", "reduce",
            "reach", "grow", "provide", "help", "deliver", "implement", "manage", "improve",
            "enhance", "construct", "invest",
        ],
    ),
    (
        ProcessType::Mental,
        &[
            "know", "see", "think", "expect", "believe", "feel", "understand", "assume",
            "consider", "perceive", "realize",
        ],
    ),
    (
        ProcessType::Relational,
        &["be", "have", "include", "remain", "consist", "represent", "mean", "equal"],
    ),
    (
        ProcessType::Verbal,
        &[
            "say", "report", "suggest", "claim", "explain", "mention", "highlight", "state",
            "assert", "communicate",
        ],
    ),
    (
        ProcessType::Behavioral,
        &[
            "watch", "listen", "smile", "cry", "breathe", "stare", "look", "laugh", "observe",
            "shrug",
        ],
    ),
    (
        ProcessType::Existential,
        &["exist", "arise", "appear", "emerge", "occur", "happen", "prevail"],
    ),
];

/// Immutable lemma to process lookup. Unlisted lemmas map to the default.
#[derive(Debug, Clone)]
pub struct ProcessTable {
    entries: HashMap<String, ProcessType>,
    default: ProcessType,
}

impl ProcessTable {
    pub fn standard() -> Self {
        let entries = STANDARD_ENTRIES
            .iter()
            .flat_map(|(process, lemmas)| lemmas.iter().map(move |l| (l.to_string(), *process)))
            .collect();
        Self {
            entries,
            default: ProcessType::Material,
        }
    }

    /// Copy of this table with extra or replacement entries.
    pub fn with_overrides<I, S>(&self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (S, ProcessType)>,
        S: AsRef<str>,
    {
        let mut entries = self.entries.clone();
        for (lemma, process) in overrides {
            entries.insert(lemma.as_ref().trim().to_lowercase(), process);
        }
        Self {
            entries,
            default: self.default,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn classify(&self, lemma: &str) -> ProcessType {
        self.entries
            .get(&lemma.to_lowercase())
            .copied()
            .unwrap_or(self.default)
    }
}

impl Default for ProcessTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ProcessReportRow {
    pub verb: String,
    pub frequency: usize,
    pub process: ProcessType,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ProcessReport {
    pub rows: Vec<ProcessReportRow>,
}

impl ProcessReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct verbs per process, largest first, ties in category order.
    pub fn distribution(&self) -> Vec<(ProcessType, usize)> {
        let mut counts: Vec<(ProcessType, usize)> = ProcessType::ALL
            .into_iter()
            .map(|p| (p, self.rows.iter().filter(|r| r.process == p).count()))
            .filter(|(_, n)| *n > 0)
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    pub fn top(&self, n: usize) -> ProcessReport {
        ProcessReport {
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

/// Verb and auxiliary lemma frequencies, each tagged with its process.
pub fn process_report(tokens: &[AnnotatedToken], table: &ProcessTable) -> ProcessReport {
    let lemmas = tokens
        .iter()
        .filter(|t| matches!(t.pos, Pos::Verb | Pos::Aux) && t.is_alpha)
        .map(|t| t.lemma.to_lowercase());

    let rows = count_ranked(lemmas)
        .into_iter()
        .map(|row| ProcessReportRow {
            process: table.classify(&row.lemma),
            verb: row.lemma,
            frequency: row.frequency,
        })
        .collect();

    ProcessReport { rows }
}
