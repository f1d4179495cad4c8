//! Search → fetch → parse → filter, as one run.

use tracing::{Level, debug, info, warn};

use crate::client::LiteratureSource;
use crate::extract::{all_affiliations, parse_record};
use crate::pubmed::PubmedRecord;
use crate::{ParsedRow, Result};

/// How many affiliation strings to log when no company author was found.
const AFFILIATION_SAMPLE_SIZE: usize = 10;

/// Outcome of a [find_papers] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Rows to write, in search relevance order.
    pub rows: Vec<ParsedRow>,
    /// Number of records the fetch returned.
    pub fetched: usize,
    /// Number of records with at least one non-academic author.
    pub matched: usize,
    /// Whether `rows` holds every parsed record because none matched.
    pub fallback: bool,
}

/// Search `source` for `query` and reduce the results to rows with
/// industry-affiliated authors.
///
/// When records were fetched but none has a non-academic author, every parsed
/// row is returned instead, so a run with data never comes back empty.
///
/// # Errors
///
/// Returns `PaperError` if the search or the batch fetch fails.
pub fn find_papers<S>(source: &S, query: &str, max_results: usize) -> Result<RunReport>
where
    S: LiteratureSource + ?Sized,
{
    info!("Searching PubMed for: {query}");
    let pmids = source.search(query, max_results)?;
    if pmids.is_empty() {
        info!("No papers found matching the query");
        return Ok(RunReport::default());
    }
    info!("Found {} papers matching the query", pmids.len());

    let records = source.fetch_batch(&pmids)?;
    let report = select_rows(&records);
    info!(
        "Found {} papers with pharmaceutical/biotech affiliations",
        report.matched
    );
    Ok(report)
}

/// Parse `records` and keep those with a non-academic author, falling back to
/// all rows when none qualifies.
pub fn select_rows(records: &[PubmedRecord]) -> RunReport {
    let parsed: Vec<ParsedRow> = records
        .iter()
        .inspect(|record| {
            debug!(
                title = record
                    .article
                    .as_ref()
                    .and_then(|a| a.title.as_deref())
                    .unwrap_or("Unknown"),
                "Processing paper"
            )
        })
        .map(parse_record)
        .collect();

    let matched: Vec<ParsedRow> = parsed
        .iter()
        .filter(|row| row.has_non_academic_authors())
        .cloned()
        .collect();

    if !matched.is_empty() || records.is_empty() {
        return RunReport {
            fetched: records.len(),
            matched: matched.len(),
            rows: matched,
            fallback: false,
        };
    }

    warn!(
        "No papers with pharmaceutical/biotech affiliations found. Including all papers as fallback."
    );
    if tracing::enabled!(Level::DEBUG) {
        log_affiliation_sample(records);
    }
    RunReport {
        fetched: records.len(),
        matched: 0,
        rows: parsed,
        fallback: true,
    }
}

fn log_affiliation_sample(records: &[PubmedRecord]) {
    debug!("Sample of affiliations seen:");
    records
        .iter()
        .flat_map(all_affiliations)
        .take(AFFILIATION_SAMPLE_SIZE)
        .enumerate()
        .for_each(|(i, affiliation)| debug!("  {}. {affiliation}", i + 1));
}
