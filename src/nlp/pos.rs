use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse universal part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Pos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown part-of-speech tag: {0}")]
pub struct UnknownPos(pub String);

impl Pos {
    pub fn tag(&self) -> &'static str {
        match self {
            Pos::Adj => "ADJ",
            Pos::Adp => "ADP",
            Pos::Adv => "ADV",
            Pos::Aux => "AUX",
            Pos::Cconj => "CCONJ",
            Pos::Det => "DET",
            Pos::Intj => "INTJ",
            Pos::Noun => "NOUN",
            Pos::Num => "NUM",
            Pos::Part => "PART",
            Pos::Pron => "PRON",
            Pos::Propn => "PROPN",
            Pos::Punct => "PUNCT",
            Pos::Sconj => "SCONJ",
            Pos::Sym => "SYM",
            Pos::Verb => "VERB",
            Pos::X => "X",
        }
    }

    /// Column label used in frequency tables
    pub fn label(&self) -> &'static str {
        match self {
            Pos::Adj => "Adjective",
            Pos::Adp => "Adposition",
            Pos::Adv => "Adverb",
            Pos::Aux => "Auxiliary",
            Pos::Cconj => "Conjunction",
            Pos::Det => "Determiner",
            Pos::Intj => "Interjection",
            Pos::Noun => "Noun",
            Pos::Num => "Numeral",
            Pos::Part => "Particle",
            Pos::Pron => "Pronoun",
            Pos::Propn => "Proper noun",
            Pos::Punct => "Punctuation",
            Pos::Sconj => "Subordinator",
            Pos::Sym => "Symbol",
            Pos::Verb => "Verb",
            Pos::X => "Other",
        }
    }

    /// Map a Penn Treebank tag (as emitted by the tokenizer) to a coarse tag.
    ///
    /// Penn tags do not separate auxiliary from main uses, so this is an
    /// approximation: modals and every form of `be` become AUX, while `have`
    /// and `do` stay VERB whether or not they head the clause. Both end up in
    /// the process report, and with stop-word removal on they rarely reach a
    /// VERB frequency table.
    pub fn from_penn(tag: &str, lemma: &str) -> Pos {
        match tag {
            "MD" => Pos::Aux,
            t if t.starts_with("VB") => {
                if lemma.eq_ignore_ascii_case("be") {
                    Pos::Aux
                } else {
                    Pos::Verb
                }
            }
            "NN" | "NNS" => Pos::Noun,
            "NNP" | "NNPS" => Pos::Propn,
            t if t.starts_with("JJ") => Pos::Adj,
            t if t.starts_with("RB") || t == "WRB" => Pos::Adv,
            "RP" | "TO" | "POS" => Pos::Part,
            "DT" | "PDT" | "WDT" => Pos::Det,
            "IN" => Pos::Adp,
            "CC" => Pos::Cconj,
            "CD" => Pos::Num,
            "PRP" | "PRP$" | "WP" | "WP$" | "EX" => Pos::Pron,
            "UH" => Pos::Intj,
            "SYM" | "$" | "#" => Pos::Sym,
            "." | "," | ":" | "``" | "''" | "-LRB-" | "-RRB-" | "(" | ")" | "PCT" => Pos::Punct,
            _ => Pos::X,
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Pos {
    type Err = UnknownPos;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pos = match s.trim().to_ascii_uppercase().as_str() {
            "ADJ" | "ADJECTIVE" => Pos::Adj,
            "ADP" | "ADPOSITION" => Pos::Adp,
            "ADV" | "ADVERB" => Pos::Adv,
            "AUX" | "AUXILIARY" => Pos::Aux,
            "CCONJ" | "CONJ" => Pos::Cconj,
            "DET" | "DETERMINER" => Pos::Det,
            "INTJ" => Pos::Intj,
            "NOUN" => Pos::Noun,
            "NUM" => Pos::Num,
            "PART" => Pos::Part,
            "PRON" | "PRONOUN" => Pos::Pron,
            "PROPN" => Pos::Propn,
            "PUNCT" => Pos::Punct,
            "SCONJ" => Pos::Sconj,
            "SYM" => Pos::Sym,
            "VERB" => Pos::Verb,
            "X" => Pos::X,
            _ => return Err(UnknownPos(s.to_string())),
        };
        Ok(pos)
    }
}

impl TryFrom<String> for Pos {
    type Error = UnknownPos;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
