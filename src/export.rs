//! Table rendering and CSV / JSON / plain-text export.

use crate::analysis::{ConcordanceRow, FrequencyTable, ProcessReport, WordFormRow};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported export format: {0}")]
    UnknownFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Txt,
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "txt" | "text" => Ok(ExportFormat::Txt),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();
        ext.parse()
    }
}

/// Anything that can be shown as a header row plus string cells.
pub trait Tabular {
    type Row: Serialize;

    fn headers(&self) -> Vec<String>;
    fn rows(&self) -> &[Self::Row];
    fn cells(row: &Self::Row) -> Vec<String>;
}

impl Tabular for FrequencyTable {
    type Row = crate::analysis::FrequencyRow;

    fn headers(&self) -> Vec<String> {
        vec![self.pos.label().to_string(), "Frequency".to_string()]
    }

    fn rows(&self) -> &[Self::Row] {
        &self.rows
    }

    fn cells(row: &Self::Row) -> Vec<String> {
        vec![row.lemma.clone(), row.frequency.to_string()]
    }
}

impl Tabular for ProcessReport {
    type Row = crate::analysis::ProcessReportRow;

    fn headers(&self) -> Vec<String> {
        vec!["Verb".to_string(), "Frequency".to_string(), "SFL Process".to_string()]
    }

    fn rows(&self) -> &[Self::Row] {
        &self.rows
    }

    fn cells(row: &Self::Row) -> Vec<String> {
        vec![row.verb.clone(), row.frequency.to_string(), row.process.to_string()]
    }
}

/// Word-form rows wrapped for export
pub struct WordForms<'a>(pub &'a [WordFormRow]);

impl Tabular for WordForms<'_> {
    type Row = WordFormRow;

    fn headers(&self) -> Vec<String> {
        vec!["Lemma".to_string(), "Form".to_string(), "Frequency".to_string()]
    }

    fn rows(&self) -> &[Self::Row] {
        self.0
    }

    fn cells(row: &Self::Row) -> Vec<String> {
        vec![row.lemma.clone(), row.form.clone(), row.frequency.to_string()]
    }
}

/// Concordance rows wrapped for export
pub struct Concordance<'a>(pub &'a [ConcordanceRow]);

impl Tabular for Concordance<'_> {
    type Row = ConcordanceRow;

    fn headers(&self) -> Vec<String> {
        vec!["Left".to_string(), "Keyword".to_string(), "Right".to_string()]
    }

    fn rows(&self) -> &[Self::Row] {
        self.0
    }

    fn cells(row: &Self::Row) -> Vec<String> {
        vec![row.left.clone(), row.keyword.clone(), row.right.clone()]
    }
}

/// Right-aligned text table with a header row.
pub fn render_table<T: Tabular>(table: &T) -> String {
    let headers = table.headers();
    let body: Vec<Vec<String>> = table.rows().iter().map(T::cells).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let format_line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:>width$}", cell, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut out = format_line(&headers);
    for row in &body {
        out.push('\n');
        out.push_str(&format_line(row));
    }
    out
}

pub fn write_csv<T: Tabular, W: Write>(table: &T, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(table.headers())?;
    for row in table.rows() {
        csv_writer.write_record(T::cells(row))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_json<T: Tabular, W: Write>(table: &T, writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, table.rows())?;
    Ok(())
}

pub fn write_txt<T: Tabular, W: Write>(table: &T, mut writer: W) -> Result<(), ExportError> {
    writeln!(writer, "{}", render_table(table))?;
    Ok(())
}

pub fn write_table<T: Tabular, W: Write>(table: &T, format: ExportFormat, writer: W) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => write_csv(table, writer),
        ExportFormat::Json => write_json(table, writer),
        ExportFormat::Txt => write_txt(table, writer),
    }
}

/// Export to `path`, with the format taken from its extension.
pub fn export_to_path<T: Tabular>(table: &T, path: &Path) -> Result<ExportFormat, ExportError> {
    let format = ExportFormat::from_path(path)?;
    let file = fs::File::create(path)?;
    write_table(table, format, io::BufWriter::new(file))?;
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{FrequencyRow, ProcessReportRow, ProcessType};
    use crate::nlp::Pos;

    fn verbs() -> FrequencyTable {
        FrequencyTable {
            pos: Pos::Verb,
            rows: vec![
                FrequencyRow {
                    lemma: "run".to_string(),
                    frequency: 12,
                },
                FrequencyRow {
                    lemma: "say".to_string(),
                    frequency: 3,
                },
            ],
        }
    }

    #[test]
    fn text_table_is_right_aligned() {
        let rendered = render_table(&verbs());
        assert_eq!(rendered, "Verb  Frequency\n run         12\n say          3");
    }

    #[test]
    fn csv_has_header_and_quotes_commas() {
        let rows = vec![ConcordanceRow {
            left: "well ,".to_string(),
            keyword: "ran".to_string(),
            right: "home, then".to_string(),
        }];
        let mut out = Vec::new();
        write_csv(&Concordance(&rows), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Left,Keyword,Right\n\"well ,\",ran,\"home, then\"\n");
    }

    #[test]
    fn json_is_array_of_records() {
        let report = ProcessReport {
            rows: vec![ProcessReportRow {
                verb: "know".to_string(),
                frequency: 2,
                process: ProcessType::Mental,
            }],
        };
        let mut out = Vec::new();
        write_json(&report, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["verb"], "know");
        assert_eq!(value[0]["frequency"], 2);
        assert_eq!(value[0]["process"], "Mental");
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("out/verbs.CSV")).unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("verbs.txt")).unwrap(), ExportFormat::Txt);
        assert!(ExportFormat::from_path(Path::new("verbs.xlsx")).is_err());
        assert!(ExportFormat::from_path(Path::new("verbs")).is_err());
    }

    #[test]
    fn empty_table_exports_header_only() {
        let empty = FrequencyTable {
            pos: Pos::Noun,
            rows: Vec::new(),
        };
        let mut out = Vec::new();
        write_csv(&empty, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Noun,Frequency\n");
    }
}
