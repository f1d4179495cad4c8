//! PubMed `efetch` XML decoder.
//!
//! Provides functionality to decode the `PubmedArticleSet` documents returned by
//! the NCBI `efetch` endpoint into loosely-populated [PubmedRecord]s.
//!
//! # Example
//!
//! ```
//! use pharmapapers::PubmedXmlParser;
//!
//! let input = r#"<PubmedArticleSet><PubmedArticle><MedlineCitation>
//! <PMID Version="1">12345678</PMID>
//! <Article><ArticleTitle>Example Title</ArticleTitle></Article>
//! </MedlineCitation></PubmedArticle></PubmedArticleSet>"#;
//!
//! let parser = PubmedXmlParser::new();
//!
//! let records = parser.parse(input).unwrap();
//! assert_eq!(records[0].pmid.as_deref(), Some("12345678"));
//! ```

mod parse;
mod structure;

pub use structure::{Article, Author, DateParts, JournalPubDate, PubmedRecord};

use crate::Result;
use crate::pubmed::parse::parse_pubmed_xml;

/// Parser for PubMed `efetch` XML responses.
///
/// Only `PubmedArticle` entries are decoded; `PubmedBookArticle` entries are skipped.
#[derive(Debug, Clone, Default)]
pub struct PubmedXmlParser {}

impl PubmedXmlParser {
    /// Creates a new PubMed XML parser instance.
    ///
    /// # Examples
    ///
    /// ```
    /// use pharmapapers::PubmedXmlParser;
    /// let parser = PubmedXmlParser::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `PubmedArticleSet` document into records, in document order.
    ///
    /// # Errors
    ///
    /// Returns `PaperError::InvalidResponse` if the XML is malformed or is an
    /// NCBI error document.
    pub fn parse(&self, input: &str) -> Result<Vec<PubmedRecord>> {
        parse_pubmed_xml(input)
    }
}
