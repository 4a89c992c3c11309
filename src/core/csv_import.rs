// src/core/csv_import.rs

//! Reads flashcard rows from CSV. The header must contain `question` and
//! `answer` columns (any case, any order); other columns are ignored.

use serde::Serialize;
use std::io::Read;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvImportError {
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("The CSV header must contain 'question' and 'answer' columns (found: {found}).")]
    MissingColumns { found: String },
}

/// A data row with both columns present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub line: u64,
    pub question: String,
    pub answer: String,
}

/// A row that was not turned into a flashcard, and why.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct ParsedCsv {
    pub rows: Vec<CsvRow>,
    pub skipped: Vec<SkippedRow>,
}

fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_lowercase()
}

pub fn parse_flashcards_csv<R: Read>(reader: R) -> Result<ParsedCsv, CsvImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(normalize_header).collect();
    let question_col = headers.iter().position(|h| h == "question");
    let answer_col = headers.iter().position(|h| h == "answer");

    let (Some(question_col), Some(answer_col)) = (question_col, answer_col) else {
        return Err(CsvImportError::MissingColumns {
            found: headers.join(", "),
        });
    };

    let mut parsed = ParsedCsv::default();
    for result in csv_reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                parsed.skipped.push(SkippedRow {
                    line,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        if record.iter().all(|field| field.trim().is_empty()) {
            log::trace!("Skipping blank CSV line {}", line);
            continue;
        }

        match (record.get(question_col), record.get(answer_col)) {
            (Some(question), Some(answer)) => parsed.rows.push(CsvRow {
                line,
                question: question.to_string(),
                answer: answer.to_string(),
            }),
            _ => parsed.skipped.push(SkippedRow {
                line,
                reason: "Row is missing the question or answer column.".to_string(),
            }),
        }
    }

    Ok(parsed)
}
