pub mod concordance;
pub mod frequency;
pub mod process;

pub use concordance::{kwic, ConcordanceRow, KwicOptions};
pub use frequency::{analyze_pos, lemma_forms, FrequencyOptions, FrequencyRow, FrequencyTable, WordFormRow};
pub use process::{process_report, ProcessReport, ProcessReportRow, ProcessTable, ProcessType};
