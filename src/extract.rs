//! Reduces a [PubmedRecord] to a flat [ParsedRow].
//!
//! Each extractor looks up one field and returns an [Option]; defaults such as
//! `"Unknown"` are applied once, in [parse_record]. Extraction never fails.

use itertools::Itertools;
use tracing::debug;

use crate::classify::{is_company_affiliation, is_industry_contact};
use crate::pubmed::{Article, Author, PubmedRecord};
use crate::utils::{format_date_parts, format_journal_date};
use crate::ParsedRow;

/// Placeholder for identifiers, titles and dates that cannot be found.
pub const UNKNOWN: &str = "Unknown";

/// Separator used to join names and affiliations in a [ParsedRow].
pub const LIST_SEPARATOR: &str = "; ";

/// Industry-related findings across a paper's author list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorSummary {
    /// `"Last, First"` names of authors flagged as non-academic, in author order.
    pub non_academic_authors: Vec<String>,
    /// Distinct company affiliations, in first-seen order.
    pub company_affiliations: Vec<String>,
    /// The last non-academic contact email found, if any.
    pub corresponding_email: Option<String>,
}

fn article(record: &PubmedRecord) -> Option<&Article> {
    record.article.as_ref()
}

/// The record's PubMed identifier.
pub fn extract_pmid(record: &PubmedRecord) -> Option<&str> {
    record.pmid.as_deref()
}

/// The article title.
pub fn extract_title(record: &PubmedRecord) -> Option<&str> {
    article(record)?.title.as_deref()
}

/// The publication date as `YYYY-MM-DD`.
///
/// Sources are tried in order: the first `ArticleDate`, the journal issue
/// `PubDate`, then `DateCreated`. The first one carrying a year wins.
pub fn extract_publication_date(record: &PubmedRecord) -> Option<String> {
    let article = article(record);
    article
        .and_then(|a| a.article_dates.first())
        .and_then(format_date_parts)
        .or_else(|| {
            debug!("No usable ArticleDate, trying journal PubDate");
            article
                .and_then(|a| a.journal_pub_date.as_ref())
                .and_then(format_journal_date)
        })
        .or_else(|| {
            debug!("No usable PubDate, trying DateCreated");
            record.date_created.as_ref().and_then(format_date_parts)
        })
}

/// Classifies every named author and collects the industry findings.
///
/// Authors without any name part are skipped. An author is non-academic when
/// any affiliation is company-classified or an identifier holds a non-academic
/// email address.
pub fn extract_authors_info(record: &PubmedRecord) -> AuthorSummary {
    let mut summary = AuthorSummary::default();
    let Some(authors) = article(record).and_then(|a| a.authors.as_ref()) else {
        debug!(pmid = ?record.pmid, "Record has no author list");
        return summary;
    };

    for author in authors {
        if !author.has_name_parts() {
            continue;
        }
        let mut is_company_author = false;

        for affiliation in company_affiliations(author) {
            is_company_author = true;
            if !summary.company_affiliations.contains(affiliation) {
                summary.company_affiliations.push(affiliation.clone());
            }
        }

        for identifier in author.identifiers.iter().filter(|i| is_industry_contact(i)) {
            summary.corresponding_email = Some(identifier.clone());
            is_company_author = true;
        }

        if !is_company_author {
            continue;
        }
        // A name made only of separators renders as nothing, but its
        // affiliations and email still count.
        if let Some(name) = author.display_name() {
            debug!(author = %name, "Found non-academic author");
            summary.non_academic_authors.push(name);
        }
    }

    summary
}

fn company_affiliations(author: &Author) -> impl Iterator<Item = &String> {
    author
        .affiliations
        .iter()
        .filter(|a| is_company_affiliation(a))
}

/// Every affiliation string in the record, in author order.
pub fn all_affiliations(record: &PubmedRecord) -> impl Iterator<Item = &str> {
    article(record)
        .and_then(|a| a.authors.as_deref())
        .unwrap_or_default()
        .iter()
        .flat_map(|author| author.affiliations.iter().map(String::as_str))
}

/// Parse a PubMed record into its flat summary row.
///
/// # Examples
///
/// ```
/// use pharmapapers::PubmedRecord;
/// use pharmapapers::extract::parse_record;
///
/// let row = parse_record(&PubmedRecord::default());
/// assert_eq!(row.pmid, "Unknown");
/// assert_eq!(row.publication_date, "Unknown");
/// ```
pub fn parse_record(record: &PubmedRecord) -> ParsedRow {
    let authors = extract_authors_info(record);
    ParsedRow {
        pmid: extract_pmid(record).unwrap_or(UNKNOWN).to_string(),
        title: extract_title(record).unwrap_or(UNKNOWN).to_string(),
        publication_date: extract_publication_date(record).unwrap_or_else(|| UNKNOWN.to_string()),
        non_academic_authors: authors.non_academic_authors.iter().join(LIST_SEPARATOR),
        company_affiliations: authors.company_affiliations.iter().join(LIST_SEPARATOR),
        corresponding_email: authors.corresponding_email.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pubmed::{DateParts, JournalPubDate};
    use pretty_assertions::assert_eq;

    fn author(last: &str, fore: &str, affiliations: &[&str], identifiers: &[&str]) -> Author {
        Author {
            last_name: Some(last.to_string()).filter(|s| !s.is_empty()),
            fore_name: Some(fore.to_string()).filter(|s| !s.is_empty()),
            affiliations: affiliations.iter().map(|s| s.to_string()).collect(),
            identifiers: identifiers.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn record_with_authors(authors: Vec<Author>) -> PubmedRecord {
        PubmedRecord {
            pmid: Some("12345".to_string()),
            article: Some(Article {
                title: Some("A Title".to_string()),
                authors: Some(authors),
                ..Default::default()
            }),
            date_created: None,
        }
    }

    fn date(year: &str, month: Option<&str>, day: Option<&str>) -> DateParts {
        DateParts {
            year: Some(year.to_string()),
            month: month.map(String::from),
            day: day.map(String::from),
        }
    }

    #[test]
    fn test_novartis_and_harvard() {
        let record = record_with_authors(vec![
            author("Muller", "Anna", &["Novartis Pharma AG"], &[]),
            author("Smith", "John", &["Harvard Medical School"], &[]),
        ]);
        let summary = extract_authors_info(&record);
        assert_eq!(summary.non_academic_authors, vec!["Muller, Anna"]);
        assert_eq!(summary.company_affiliations, vec!["Novartis Pharma AG"]);
        assert_eq!(summary.corresponding_email, None);
    }

    #[test]
    fn test_no_author_list() {
        let record = PubmedRecord {
            pmid: Some("999".to_string()),
            article: Some(Article::default()),
            date_created: None,
        };
        let row = parse_record(&record);
        assert_eq!(row.pmid, "999");
        assert_eq!(row.title, UNKNOWN);
        assert_eq!(row.publication_date, UNKNOWN);
        assert_eq!(row.non_academic_authors, "");
        assert_eq!(row.company_affiliations, "");
        assert_eq!(row.corresponding_email, "");
    }

    #[test]
    fn test_duplicate_affiliations_are_collapsed() {
        let record = record_with_authors(vec![
            author("A", "One", &["Pfizer Inc., New York"], &[]),
            author("B", "Two", &["Pfizer Inc., New York", "Amgen, Thousand Oaks"], &[]),
        ]);
        let row = parse_record(&record);
        assert_eq!(row.non_academic_authors, "A, One; B, Two");
        assert_eq!(
            row.company_affiliations,
            "Pfizer Inc., New York; Amgen, Thousand Oaks"
        );
    }

    #[test]
    fn test_email_flags_author() {
        let record = record_with_authors(vec![
            author("Lee", "Kim", &["Department of Medicine, Some Clinic"], &["kim.lee@acme.com"]),
            author("Park", "Jo", &[], &["jo.park@stanford.edu"]),
        ]);
        let row = parse_record(&record);
        assert_eq!(row.non_academic_authors, "Lee, Kim");
        assert_eq!(row.company_affiliations, "");
        assert_eq!(row.corresponding_email, "kim.lee@acme.com");
    }

    #[test]
    fn test_last_email_wins() {
        let record = record_with_authors(vec![
            author("Lee", "Kim", &[], &["first@acme.com"]),
            author("Ray", "Al", &[], &["second@biocorp.com"]),
        ]);
        let row = parse_record(&record);
        assert_eq!(row.corresponding_email, "second@biocorp.com");
        assert_eq!(row.non_academic_authors, "Lee, Kim; Ray, Al");
    }

    #[test]
    fn test_unnamed_authors_are_skipped() {
        let record = record_with_authors(vec![
            author("", "", &["Pfizer Inc."], &["x@pfizer.com"]),
            author("Solo", "", &["Roche Diagnostics GmbH"], &[]),
        ]);
        let row = parse_record(&record);
        assert_eq!(row.non_academic_authors, "Solo");
        assert_eq!(row.company_affiliations, "Roche Diagnostics GmbH");
        assert_eq!(row.corresponding_email, "");
    }

    #[test]
    fn test_separator_only_name_keeps_affiliation() {
        let record = record_with_authors(vec![
            author(",", "", &["Genentech, South San Francisco"], &["lab@gene.com"]),
            author("Doe", "Jane", &["Harvard Medical School"], &[]),
        ]);
        let row = parse_record(&record);
        assert_eq!(row.non_academic_authors, "");
        assert_eq!(row.company_affiliations, "Genentech, South San Francisco");
        assert_eq!(row.corresponding_email, "lab@gene.com");
    }

    #[test]
    fn test_article_date_precedence() {
        let record = PubmedRecord {
            pmid: Some("1".to_string()),
            article: Some(Article {
                article_dates: vec![date("2023", Some("7"), Some("4"))],
                journal_pub_date: Some(JournalPubDate {
                    year: Some("2024".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            date_created: Some(date("2022", None, None)),
        };
        assert_eq!(extract_publication_date(&record).as_deref(), Some("2023-07-04"));
    }

    #[test]
    fn test_journal_date_fallback() {
        let record = PubmedRecord {
            article: Some(Article {
                article_dates: vec![DateParts::default()],
                journal_pub_date: Some(JournalPubDate {
                    medline_date: Some("2000-03".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(extract_publication_date(&record).as_deref(), Some("2000-03-01"));
    }

    #[test]
    fn test_date_created_fallback() {
        let record = PubmedRecord {
            article: Some(Article::default()),
            date_created: Some(date("2019", Some("11"), None)),
            ..Default::default()
        };
        assert_eq!(extract_publication_date(&record).as_deref(), Some("2019-11-01"));
    }

    #[test]
    fn test_all_affiliations() {
        let record = record_with_authors(vec![
            author("A", "One", &["X Corp", "Y University"], &[]),
            author("B", "Two", &["Z Institute"], &[]),
        ]);
        let affiliations: Vec<_> = all_affiliations(&record).collect();
        assert_eq!(affiliations, vec!["X Corp", "Y University", "Z Institute"]);
        assert_eq!(all_affiliations(&PubmedRecord::default()).count(), 0);
    }
}
