//! CSV rendering of [ParsedRow]s.
//!
//! # Example
//!
//! ```
//! use pharmapapers::ParsedRow;
//! use pharmapapers::csv::CsvWriter;
//!
//! let rows = vec![ParsedRow {
//!     pmid: "1".to_string(),
//!     title: "Example".to_string(),
//!     ..Default::default()
//! }];
//! let text = CsvWriter::new().to_string(&rows).unwrap();
//! assert!(text.starts_with("PubmedID,Title,Publication Date"));
//! ```

use csv::WriterBuilder;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{info, warn};

use crate::{ParsedRow, Result};

/// Output columns, in order.
pub const HEADERS: [&str; 6] = [
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academic Author(s)",
    "Company Affiliation(s)",
    "Corresponding Author Email",
];

/// Writer for [ParsedRow]s as comma-delimited CSV with a header line.
#[derive(Debug, Clone, Default)]
pub struct CsvWriter;

impl CsvWriter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Renders `rows` into an in-memory CSV document.
    ///
    /// # Errors
    ///
    /// Returns `PaperError::Csv` if a row cannot be serialized.
    pub fn to_bytes(&self, rows: &[ParsedRow]) -> Result<Vec<u8>> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(HEADERS)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer
            .into_inner()
            .map_err(|e| crate::PaperError::Io(e.into_error()))
    }

    /// Renders `rows` as a CSV string.
    ///
    /// # Errors
    ///
    /// Returns `PaperError::Csv` if a row cannot be serialized.
    pub fn to_string(&self, rows: &[ParsedRow]) -> Result<String> {
        let bytes = self.to_bytes(rows)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Writes `rows` to `writer`.
    ///
    /// The document is rendered completely before anything is written.
    pub fn write<W: Write>(&self, rows: &[ParsedRow], mut writer: W) -> Result<()> {
        let bytes = self.to_bytes(rows)?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }
}

/// Save rows to `path`, or print them to standard output when no path is given.
///
/// Nothing is written when `rows` is empty.
///
/// # Errors
///
/// Returns `PaperError` if rendering or writing fails.
pub fn save_rows(rows: &[ParsedRow], path: Option<&Path>) -> Result<()> {
    if rows.is_empty() {
        warn!("No papers to save");
        return Ok(());
    }

    let writer = CsvWriter::new();
    match path {
        Some(path) => {
            fs::write(path, writer.to_bytes(rows)?)?;
            info!("Results saved to {}", path.display());
        }
        None => writer.write(rows, io::stdout().lock())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_row() -> ParsedRow {
        ParsedRow {
            pmid: "38000001".to_string(),
            title: "Effects of dosing, clearance".to_string(),
            publication_date: "2023-12-05".to_string(),
            non_academic_authors: "Doe, Jane; Roe, Rick".to_string(),
            company_affiliations: "Novartis Pharma AG".to_string(),
            corresponding_email: "jane.doe@novartis.com".to_string(),
        }
    }

    #[test]
    fn test_header_and_quoting() {
        let text = CsvWriter::new().to_string(&[sample_row()]).unwrap();
        assert_eq!(
            text,
            "PubmedID,Title,Publication Date,Non-academic Author(s),Company Affiliation(s),Corresponding Author Email\n\
             38000001,\"Effects of dosing, clearance\",2023-12-05,\"Doe, Jane; Roe, Rick\",Novartis Pharma AG,jane.doe@novartis.com\n"
        );
    }

    #[test]
    fn test_empty_fields() {
        let text = CsvWriter::new().to_string(&[ParsedRow::default()]).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap().split(',').count(), 6);
        assert_eq!(lines.next(), Some(",,,,,"));
    }

    #[test]
    fn test_round_trip_through_reader() {
        let rows = vec![sample_row(), ParsedRow::default()];
        let bytes = CsvWriter::new().to_bytes(&rows).unwrap();
        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let parsed: Vec<ParsedRow> = reader.deserialize().collect::<std::result::Result<_, _>>().unwrap();
        assert_eq!(parsed, rows);
    }

    #[test]
    fn test_save_rows_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        save_rows(&[sample_row()], Some(&path)).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("PubmedID,Title"));
        assert!(contents.contains("jane.doe@novartis.com"));
    }

    #[test]
    fn test_save_empty_rows_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        save_rows(&[], Some(&path)).unwrap();
        assert!(!path.exists());
    }
}
