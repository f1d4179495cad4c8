use serde::{Deserialize, Serialize};

/// One `PubmedArticle` from an `efetch` response.
///
/// Every field is optional: PubMed records are loosely populated and the
/// extractors in [crate::extract] decide what a missing value means.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubmedRecord {
    /// `MedlineCitation/PMID`
    pub pmid: Option<String>,
    /// `MedlineCitation/Article`
    pub article: Option<Article>,
    /// `MedlineCitation/DateCreated`
    pub date_created: Option<DateParts>,
}

/// Article-level metadata of a [PubmedRecord].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// `ArticleTitle`, with inline markup flattened to text.
    pub title: Option<String>,
    /// `ArticleDate` elements in document order.
    pub article_dates: Vec<DateParts>,
    /// `Journal/JournalIssue/PubDate`
    pub journal_pub_date: Option<JournalPubDate>,
    /// `AuthorList`, `None` when the element is absent.
    pub authors: Option<Vec<Author>>,
}

/// A structured `Year`/`Month`/`Day` date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateParts {
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
}

/// A journal issue publication date, which may carry a free-text `MedlineDate`
/// (e.g. `1998 Dec-1999 Jan`) instead of structured parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalPubDate {
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
    pub medline_date: Option<String>,
}

/// An entry of the `AuthorList`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub last_name: Option<String>,
    pub fore_name: Option<String>,
    /// `AffiliationInfo/Affiliation` texts.
    pub affiliations: Vec<String>,
    /// `Identifier` texts, which may hold contact emails.
    pub identifiers: Vec<String>,
}

impl Author {
    /// Whether a last or fore name is present and non-empty.
    #[must_use]
    pub fn has_name_parts(&self) -> bool {
        [&self.last_name, &self.fore_name]
            .into_iter()
            .any(|part| part.as_deref().is_some_and(|p| !p.is_empty()))
    }

    /// Renders the name as `"Last, First"`, dropping the separator when one
    /// part is missing. Returns `None` when both parts are missing or blank.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        let last = self.last_name.as_deref().unwrap_or("");
        let fore = self.fore_name.as_deref().unwrap_or("");
        if last.is_empty() && fore.is_empty() {
            return None;
        }
        let name = format!("{last}, {fore}")
            .trim_matches(|c| c == ',' || c == ' ')
            .to_string();
        if name.is_empty() { None } else { Some(name) }
    }
}
