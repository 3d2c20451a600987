//! CSV export of generated test cases
//!
//! There is one artifact per process. Every write replaces the whole file and
//! nothing coordinates concurrent writers: two uploads finishing together will
//! overwrite each other's rows.

pub mod parser;

pub use parser::{parse_test_cases, TestCaseRow};

use std::fs::File;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_ARTIFACT_PATH: &str = "test_cases.csv";
pub const DOWNLOAD_NAME: &str = "test_cases.csv";

const HEADER: [&str; 4] = [
    "Test Case ID",
    "Test Case Description",
    "Test Steps",
    "Expected Result",
];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("No test cases have been generated yet")]
    NotGenerated,
}

/// The single CSV file behind `/download`.
#[derive(Debug, Clone)]
pub struct CsvArtifact {
    path: PathBuf,
}

impl CsvArtifact {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse `test_cases` and overwrite the artifact with the resulting rows.
    ///
    /// `review` is accepted alongside the test cases but does not contribute
    /// any rows.
    pub fn write(&self, test_cases: &str, _review: &str) -> Result<Vec<TestCaseRow>, ExportError> {
        let rows = parse_test_cases(test_cases);

        let file = File::create(&self.path).map_err(|source| ExportError::Io {
            path: self.path.clone(),
            source,
        })?;
        write_rows(file, &rows)?;

        tracing::info!(path = %self.path.display(), rows = rows.len(), "wrote test case CSV");
        Ok(rows)
    }

    /// Current artifact contents.
    pub fn read(&self) -> Result<Vec<u8>, ExportError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ExportError::NotGenerated),
            Err(source) => Err(ExportError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Write the header and `rows` as CRLF-terminated CSV.
pub fn write_rows<W: io::Write>(writer: W, rows: &[TestCaseRow]) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    writer.write_record(HEADER)?;
    for row in rows {
        writer.write_record([
            row.id.as_str(),
            row.description.as_str(),
            row.steps.as_str(),
            row.expected_result.as_str(),
        ])?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
