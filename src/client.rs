//! Blocking client for the NCBI E-utilities search and fetch endpoints.
//!
//! Endpoints used:
//!   esearch: `{base}/esearch.fcgi` (JSON) for relevance-ordered PMIDs
//!   efetch:  `{base}/efetch.fcgi` (XML) for full records, one request per batch,
//!            sent as a POST form above 200 ids

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::config::EntrezConfig;
use crate::pubmed::{PubmedRecord, PubmedXmlParser};
use crate::{PaperError, Result};

/// A literature database that can be searched and fetched from.
///
/// [EntrezClient] is the production implementation; tests substitute their own.
pub trait LiteratureSource {
    /// Search for papers matching `query`, returning at most `max_results`
    /// PubMed IDs ordered by relevance.
    ///
    /// # Errors
    ///
    /// Returns `PaperError` if the request fails or the response cannot be decoded.
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>>;

    /// Fetch the full records for `pmids` in a single request.
    ///
    /// # Errors
    ///
    /// Returns `PaperError` if the request fails or the response cannot be decoded.
    fn fetch_batch(&self, pmids: &[String]) -> Result<Vec<PubmedRecord>>;
}

#[derive(Debug, Deserialize)]
struct ESearchResponse {
    esearchresult: Option<ESearchResult>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ESearchResult {
    #[serde(default)]
    idlist: Vec<String>,
    #[serde(rename = "ERROR")]
    error: Option<String>,
}

/// Decode an `esearch` JSON body into its ID list.
fn parse_esearch_json(body: &str) -> Result<Vec<String>> {
    let response: ESearchResponse = serde_json::from_str(body)?;
    match response.esearchresult {
        Some(ESearchResult {
            error: Some(message),
            ..
        }) => Err(PaperError::InvalidResponse(format!(
            "esearch returned an error: {message}"
        ))),
        Some(result) => Ok(result.idlist),
        None => Err(PaperError::InvalidResponse(
            response
                .error
                .map(|message| format!("esearch returned an error: {message}"))
                .unwrap_or_else(|| "esearch response has no esearchresult".to_string()),
        )),
    }
}

/// Batches larger than this are sent as a POST form, since NCBI rejects
/// overlong GET URLs.
const POST_THRESHOLD: usize = 200;

/// Client for the PubMed database through NCBI E-utilities.
#[derive(Debug, Clone)]
pub struct EntrezClient {
    http: Client,
    config: EntrezConfig,
    parser: PubmedXmlParser,
}

impl EntrezClient {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns `PaperError::InvalidConfig` for unusable settings, or
    /// `PaperError::Http` if the HTTP client cannot be constructed.
    pub fn new(config: EntrezConfig) -> Result<Self> {
        config.validate()?;
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        if config.api_key().is_some() {
            debug!("Using PubMed API key");
        }
        Ok(Self {
            http,
            config,
            parser: PubmedXmlParser::new(),
        })
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}.fcgi", self.config.base_url(), name)
    }

    fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<String> {
        let body = self
            .http
            .get(self.endpoint(endpoint))
            .query(params)
            .query(&self.config.identity_params())
            .send()?
            .error_for_status()?
            .text()?;
        Ok(body)
    }

    fn post(&self, endpoint: &str, params: &[(&str, String)]) -> Result<String> {
        let mut form = params.to_vec();
        form.extend(self.config.identity_params());
        let body = self
            .http
            .post(self.endpoint(endpoint))
            .form(&form)
            .send()?
            .error_for_status()?
            .text()?;
        Ok(body)
    }

    fn esearch(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
        let params = [
            ("db", "pubmed".to_string()),
            ("term", query.to_string()),
            ("retmax", max_results.to_string()),
            ("sort", "relevance".to_string()),
            ("retmode", "json".to_string()),
        ];
        let body = self.get("esearch", &params)?;
        parse_esearch_json(&body)
    }

    fn efetch(&self, pmids: &[String]) -> Result<Vec<PubmedRecord>> {
        let params = [
            ("db", "pubmed".to_string()),
            ("id", pmids.join(",")),
            ("retmode", "xml".to_string()),
        ];
        let body = if pmids.len() > POST_THRESHOLD {
            self.post("efetch", &params)?
        } else {
            self.get("efetch", &params)?
        };
        self.parser.parse(&body)
    }

    /// Fetch a single paper by its PubMed ID.
    ///
    /// Returns `Ok(None)` when PubMed has no article for the ID.
    ///
    /// # Errors
    ///
    /// Returns `PaperError` if the request fails or the response cannot be decoded.
    pub fn fetch_one(&self, pmid: &str) -> Result<Option<PubmedRecord>> {
        debug!(pmid, "Fetching details for paper");
        let record = self
            .efetch(&[pmid.to_string()])
            .inspect_err(|e| error!("Error fetching paper details: {e}"))?
            .into_iter()
            .next();
        if record.is_none() {
            warn!(pmid, "No details found for paper");
        }
        Ok(record)
    }
}

impl LiteratureSource for EntrezClient {
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
        debug!(query, max_results, "Searching PubMed");
        let ids = self
            .esearch(query, max_results)
            .inspect_err(|e| error!("Error searching PubMed: {e}"))?;
        debug!("Found {} papers matching the query", ids.len());
        Ok(ids)
    }

    fn fetch_batch(&self, pmids: &[String]) -> Result<Vec<PubmedRecord>> {
        debug!("Fetching details for {} papers in batch", pmids.len());
        if pmids.is_empty() {
            return Ok(Vec::new());
        }
        let records = self
            .efetch(pmids)
            .inspect_err(|e| error!("Error fetching papers in batch: {e}"))?;
        debug!("Successfully fetched details for {} papers", records.len());
        Ok(records)
    }
}
