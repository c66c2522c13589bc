use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::vectorizer::corpus::CorpusRecord;

/// Source of the ordered record set.
///
/// The whole set is loaded before the build starts. Failing to load is
/// `Error::DataUnavailable`, which is fatal for the build.
pub trait CorpusProvider {
    /// Human readable source name for logs and errors
    fn name(&self) -> String;

    /// Load all records in corpus order
    fn load(&self) -> Result<Vec<CorpusRecord>>;
}

/// Records held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpusProvider {
    records: Vec<CorpusRecord>,
}

impl MemoryCorpusProvider {
    pub fn new(records: Vec<CorpusRecord>) -> Self {
        Self { records }
    }

    /// Records given as `(raw_text, normalized_text)` pairs
    pub fn from_pairs<I, R, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (R, T)>,
        R: Into<String>,
        T: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(raw, text)| CorpusRecord::new(raw, Some(text.into())))
                .collect(),
        )
    }
}

impl CorpusProvider for MemoryCorpusProvider {
    fn name(&self) -> String {
        "memory".to_string()
    }

    fn load(&self) -> Result<Vec<CorpusRecord>> {
        Ok(self.records.clone())
    }
}

/// Headered CSV file.
///
/// `raw_column` holds the display text and must exist.
/// `text_column`, when set, holds pre-cleaned text; a missing or empty cell
/// counts as empty text. When unset the raw text is normalized instead.
#[derive(Debug, Clone)]
pub struct CsvCorpusProvider {
    path: PathBuf,
    raw_column: String,
    text_column: Option<String>,
}

impl CsvCorpusProvider {
    pub const DEFAULT_RAW_COLUMN: &'static str = "full_text";
    pub const DEFAULT_TEXT_COLUMN: &'static str = "clean_text";

    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            raw_column: Self::DEFAULT_RAW_COLUMN.to_string(),
            text_column: Some(Self::DEFAULT_TEXT_COLUMN.to_string()),
        }
    }

    pub fn with_raw_column(mut self, column: impl Into<String>) -> Self {
        self.raw_column = column.into();
        self
    }

    pub fn with_text_column(mut self, column: Option<String>) -> Self {
        self.text_column = column;
        self
    }

    fn column_position(&self, headers: &csv::StringRecord, column: &str) -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| {
                Error::data_unavailable(self.name(), format!("missing column '{column}'"))
            })
    }
}

impl CorpusProvider for CsvCorpusProvider {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Vec<CorpusRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| Error::data_unavailable(self.name(), e))?;

        let headers = reader
            .headers()
            .map_err(|e| Error::data_unavailable(self.name(), e))?
            .clone();
        let raw_pos = self.column_position(&headers, &self.raw_column)?;
        let text_pos = match &self.text_column {
            Some(column) => Some(self.column_position(&headers, column)?),
            None => None,
        };

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| Error::data_unavailable(self.name(), e))?;
            let raw_text = row.get(raw_pos).unwrap_or_default().to_string();
            let text = text_pos.map(|pos| row.get(pos).unwrap_or_default().to_string());
            records.push(CorpusRecord { raw_text, text });
        }
        debug!(source = %self.name(), rows = records.len(), "csv corpus read");
        Ok(records)
    }
}
