use crate::domain::grade::Mark;
use crate::error::{KioskError, Result};
use serde::Deserialize;
use std::io::Read;

/// One row of a marks file: `subject,mark`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct MarkRecord {
    pub subject: String,
    pub mark: f64,
}

impl MarkRecord {
    pub fn to_mark(&self) -> Result<Mark> {
        Mark::new(self.mark).map_err(|_| {
            KioskError::ValidationError(format!(
                "mark {} for '{}' is outside 0-100",
                self.mark, self.subject
            ))
        })
    }
}

/// Reads subject marks from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over `Result<MarkRecord>`.
/// It handles whitespace trimming and flexible record lengths automatically.
pub struct MarksReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> MarksReader<R> {
    /// Creates a new `MarksReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes rows.
    pub fn records(self) -> impl Iterator<Item = Result<MarkRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(KioskError::from))
    }

    /// Reads every row, returning the valid marks and the per-row errors.
    pub fn marks(self) -> (Vec<Mark>, Vec<KioskError>) {
        let mut marks = Vec::new();
        let mut errors = Vec::new();
        for record in self.records() {
            match record.and_then(|r| r.to_mark()) {
                Ok(mark) => marks.push(mark),
                Err(e) => errors.push(e),
            }
        }
        (marks, errors)
    }
}
