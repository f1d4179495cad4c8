//! Find PubMed papers that have at least one author affiliated with a
//! pharmaceutical or biotech company.
//!
//! `pharmapapers` searches PubMed through the NCBI E-utilities, decodes the
//! returned records, classifies every author's affiliations as academic or
//! industry and reduces each paper to a flat, CSV-ready [`ParsedRow`].
//!
//! # Key Features
//!
//! - **Search and batch fetch** against `esearch` / `efetch`
//! - **Loose record decoding**: every field of a [`PubmedRecord`] is optional,
//!   missing elements never fail a run
//! - **Affiliation heuristics**: layered academic/company pattern rules
//! - **CSV output** to a file or standard output
//!
//! # Basic Usage
//!
//! ```rust
//! use pharmapapers::classify::{is_academic_email, is_company_affiliation};
//!
//! assert!(is_company_affiliation("Pfizer Inc., New York, NY, USA"));
//! assert!(!is_company_affiliation("Harvard Medical School, Boston, MA"));
//! assert!(is_academic_email("jdoe@stanford.edu"));
//! ```
//!
//! # Parsing Records
//!
//! ```rust
//! use pharmapapers::{PubmedXmlParser, extract::parse_record};
//!
//! let xml = r#"<PubmedArticleSet><PubmedArticle><MedlineCitation>
//! <PMID>123</PMID>
//! <Article><ArticleTitle>Example</ArticleTitle>
//! <AuthorList><Author><LastName>Doe</LastName><ForeName>Jane</ForeName>
//! <AffiliationInfo><Affiliation>Novartis Pharma AG, Basel</Affiliation></AffiliationInfo>
//! </Author></AuthorList></Article>
//! </MedlineCitation></PubmedArticle></PubmedArticleSet>"#;
//!
//! let records = PubmedXmlParser::new().parse(xml).unwrap();
//! let row = parse_record(&records[0]);
//! assert_eq!(row.non_academic_authors, "Doe, Jane");
//! ```
//!
//! # Error Handling
//!
//! The library uses a custom [`Result`] type that wraps [`PaperError`].
//! Field extraction never fails; only network, decoding and output do.

use serde::{Deserialize, Serialize};
use thiserror::Error;

extern crate csv as csv_crate;

pub mod classify;
pub mod client;
pub mod config;
pub mod csv;
pub mod extract;
pub mod pipeline;
pub mod pubmed;
mod utils;

// Reexports
pub use client::{EntrezClient, LiteratureSource};
pub use config::EntrezConfig;
pub use pubmed::{Author, Article, DateParts, JournalPubDate, PubmedRecord, PubmedXmlParser};

/// A specialized Result type for paper operations.
pub type Result<T> = std::result::Result<T, PaperError>;

/// Represents errors that can occur while searching, fetching or writing papers.
#[derive(Error, Debug)]
pub enum PaperError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Invalid configuration: {field} - {message}")]
    InvalidConfig { field: String, message: String },
}

impl From<csv_crate::Error> for PaperError {
    fn from(err: csv_crate::Error) -> Self {
        PaperError::Csv(err.to_string())
    }
}

impl From<quick_xml::Error> for PaperError {
    fn from(err: quick_xml::Error) -> Self {
        PaperError::InvalidResponse(err.to_string())
    }
}

impl From<serde_json::Error> for PaperError {
    fn from(err: serde_json::Error) -> Self {
        PaperError::InvalidResponse(err.to_string())
    }
}

/// The flat, CSV-ready summary of one [`PubmedRecord`].
///
/// Column names and order match the CSV output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRow {
    #[serde(rename = "PubmedID")]
    pub pmid: String,
    #[serde(rename = "Title")]
    pub title: String,
    /// `YYYY-MM-DD`, or `"Unknown"`
    #[serde(rename = "Publication Date")]
    pub publication_date: String,
    /// Names of industry-affiliated authors, joined with `"; "`
    #[serde(rename = "Non-academic Author(s)")]
    pub non_academic_authors: String,
    /// Distinct company affiliations, joined with `"; "`
    #[serde(rename = "Company Affiliation(s)")]
    pub company_affiliations: String,
    #[serde(rename = "Corresponding Author Email")]
    pub corresponding_email: String,
}

impl ParsedRow {
    /// Whether at least one author of the paper was classified as industry.
    #[must_use]
    pub fn has_non_academic_authors(&self) -> bool {
        !self.non_academic_authors.is_empty()
    }
}
