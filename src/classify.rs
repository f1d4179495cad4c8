//! Academic/industry classification of affiliations and contact emails.
//!
//! Both classifiers are pure functions over a single string: no state is kept
//! between calls and the same input always yields the same answer.
//!
//! # Affiliation rules
//!
//! Rules are applied in order and the first match wins:
//!
//! 1. Empty text is not a company.
//! 2. A strong academic term (`university`, `college`, `school`, `institute`,
//!    `academy`, `hospital`) as a whole word marks the affiliation academic.
//! 3. A strong company term (`inc`, `corp`, `llc`, `ltd`, `limited`, `gmbh`,
//!    `co`, `company`, `pharma`, `biotech`) as a whole word marks it a company.
//! 4. The name of a known pharmaceutical/biotech company anywhere in the text
//!    marks it a company.
//! 5. A weaker company indicator (`therapeutics`, `diagnostics`, `r&d`, ...)
//!    anywhere in the text marks it a company.
//!
//! Academic terms are checked first, so `"Pharma Dept, University of X"` is academic.
//!
//! # Example
//!
//! ```
//! use pharmapapers::classify::is_company_affiliation;
//!
//! assert!(is_company_affiliation("Genentech, South San Francisco, CA"));
//! assert!(!is_company_affiliation("Department of Pharmacology, University of Oxford"));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// Whole-word academic terms that override any company signal.
pub const STRONG_ACADEMIC_TERMS: &[&str] = &[
    "university",
    "college",
    "school",
    "institute",
    "academy",
    "hospital",
];

/// Whole-word legal-entity and industry terms.
pub const STRONG_COMPANY_TERMS: &[&str] = &[
    "inc", "corp", "llc", "ltd", "limited", "gmbh", "co", "company", "pharma", "biotech",
];

/// Pharmaceutical and biotech companies matched anywhere in the text.
pub const COMPANY_NAMES: &[&str] = &[
    "novartis",
    "pfizer",
    "merck",
    "roche",
    "sanofi",
    "astrazeneca",
    "johnson & johnson",
    "abbvie",
    "gilead",
    "amgen",
    "gsk",
    "bayer",
    "bristol-myers",
    "lilly",
    "boehringer",
    "takeda",
    "novo nordisk",
    "biogen",
    "celgene",
    "regeneron",
    "vertex",
    "alexion",
    "incyte",
    "janssen",
    "moderna",
    "biontech",
    "curevac",
    "genentech",
];

/// Weaker hints of an industry affiliation, matched anywhere in the text.
pub const WEAK_COMPANY_TERMS: &[&str] = &[
    "therapeutics",
    "biosciences",
    "pharmaceuticals",
    "biopharma",
    "laboratories",
    "diagnostics",
    "technologies",
    "research center",
    "r&d",
    "research and development",
];

/// Markers of an academic or government mail domain.
pub const ACADEMIC_EMAIL_MARKERS: &[&str] = &[
    ".edu",
    ".ac.",
    "university",
    "college",
    "institute",
    "school",
    "gov",
];

static STRONG_ACADEMIC_REGEX: Lazy<Regex> = Lazy::new(|| whole_word_regex(STRONG_ACADEMIC_TERMS));

static STRONG_COMPANY_REGEX: Lazy<Regex> = Lazy::new(|| whole_word_regex(STRONG_COMPANY_TERMS));

/// Builds a case-insensitive alternation matching any of `terms` as a whole word.
fn whole_word_regex(terms: &[&str]) -> Regex {
    let alternation = terms
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).unwrap()
}

/// Which rule decided an affiliation's classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffiliationSignal {
    /// No text to classify
    Empty,
    /// Matched a strong academic term
    Academic,
    /// Matched a strong company term
    StrongCompany,
    /// Matched a known company name
    CompanyName,
    /// Matched a weak company indicator
    WeakCompany,
    /// Nothing matched
    NoMatch,
}

impl AffiliationSignal {
    /// Whether this signal classifies the affiliation as industry.
    #[must_use]
    pub fn is_company(self) -> bool {
        matches!(
            self,
            AffiliationSignal::StrongCompany
                | AffiliationSignal::CompanyName
                | AffiliationSignal::WeakCompany
        )
    }
}

/// Runs the affiliation rules in order and reports the first one that matched.
#[must_use]
pub fn affiliation_signal(affiliation: &str) -> AffiliationSignal {
    if affiliation.is_empty() {
        return AffiliationSignal::Empty;
    }
    if STRONG_ACADEMIC_REGEX.is_match(affiliation) {
        return AffiliationSignal::Academic;
    }
    if STRONG_COMPANY_REGEX.is_match(affiliation) {
        return AffiliationSignal::StrongCompany;
    }

    let lower = affiliation.to_lowercase();
    if COMPANY_NAMES.iter().any(|name| lower.contains(name)) {
        AffiliationSignal::CompanyName
    } else if WEAK_COMPANY_TERMS.iter().any(|term| lower.contains(term)) {
        AffiliationSignal::WeakCompany
    } else {
        AffiliationSignal::NoMatch
    }
}

/// Determine if an affiliation is from a pharmaceutical/biotech company.
#[must_use]
pub fn is_company_affiliation(affiliation: &str) -> bool {
    affiliation_signal(affiliation).is_company()
}

/// Determine if an email address belongs to an academic or government institution.
#[must_use]
pub fn is_academic_email(email: &str) -> bool {
    let lower = email.to_lowercase();
    ACADEMIC_EMAIL_MARKERS
        .iter()
        .any(|marker| lower.contains(marker))
}

/// Whether `value` looks like a corresponding-author contact outside academia.
#[must_use]
pub fn is_industry_contact(value: &str) -> bool {
    value.contains('@') && !is_academic_email(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_empty_affiliation() {
        assert!(!is_company_affiliation(""));
        assert_eq!(affiliation_signal(""), AffiliationSignal::Empty);
    }

    #[rstest]
    #[case("Pfizer Inc., Groton, CT, USA", true)]
    #[case("Novartis Pharma AG, Basel, Switzerland", true)]
    #[case("Harvard Medical School, Boston, MA", false)]
    #[case("Genentech, South San Francisco, CA", true)]
    #[case("Acme Therapeutics, Cambridge, MA", true)]
    #[case("Global R&D, Somewhere", true)]
    #[case("Department of Chemistry, ETH Zurich", false)]
    #[case("Max Planck Institute for Biology", false)]
    #[case("Takeda Development Center Americas", true)]
    #[case("Foo Ltd, London", true)]
    #[case("Bar GmbH, Berlin", true)]
    fn test_is_company_affiliation(#[case] affiliation: &str, #[case] expected: bool) {
        assert_eq!(is_company_affiliation(affiliation), expected);
    }

    #[rstest]
    #[case("Pharma Dept, University of X")]
    #[case("UNIVERSITY of Somewhere, Pfizer collaboration")]
    #[case("College of Pharmacy, Biosciences Building")]
    #[case("Children's Hospital, Diagnostics Unit")]
    fn test_academic_precedence(#[case] affiliation: &str) {
        assert_eq!(affiliation_signal(affiliation), AffiliationSignal::Academic);
        assert!(!is_company_affiliation(affiliation));
    }

    #[rstest]
    #[case("Schoolhouse Diagnostics", AffiliationSignal::WeakCompany)]
    #[case("Pharmacology Unit", AffiliationSignal::NoMatch)]
    #[case("Biotech Park, Shanghai", AffiliationSignal::StrongCompany)]
    #[case("AbbVie, North Chicago", AffiliationSignal::CompanyName)]
    #[case("Moderna, Cambridge", AffiliationSignal::CompanyName)]
    fn test_rule_boundaries(#[case] affiliation: &str, #[case] expected: AffiliationSignal) {
        assert_eq!(affiliation_signal(affiliation), expected);
    }

    #[rstest]
    #[case("jdoe@stanford.edu", true)]
    #[case("jdoe@pfizer.com", false)]
    #[case("a.smith@ox.ac.uk", true)]
    #[case("someone@nih.gov", true)]
    #[case("JDOE@STANFORD.EDU", true)]
    fn test_is_academic_email(#[case] email: &str, #[case] expected: bool) {
        assert_eq!(is_academic_email(email), expected);
    }

    #[rstest]
    #[case("jdoe@pfizer.com", true)]
    #[case("jdoe@stanford.edu", false)]
    #[case("0000-0001-2345-6789", false)]
    fn test_is_industry_contact(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_industry_contact(value), expected);
    }
}
