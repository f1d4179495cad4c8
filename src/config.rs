//! Configuration for the NCBI E-utilities client.
//!
//! # Examples
//!
//! ```
//! use pharmapapers::EntrezConfig;
//!
//! let config = EntrezConfig::new()
//!     .with_api_key(Some("abc123".to_string()))
//!     .with_email("someone@example.org");
//! assert_eq!(config.tool(), "pharmapapers");
//! ```

use std::time::Duration;

use crate::{PaperError, Result};

/// Default E-utilities base URL.
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Default cap on the number of search results.
pub const DEFAULT_MAX_RESULTS: usize = 100;

/// Environment variable read for the API key when none is given explicitly.
pub const API_KEY_ENV: &str = "PUBMED_API_KEY";

const DEFAULT_TOOL: &str = "pharmapapers";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection and identification settings for [crate::EntrezClient].
///
/// NCBI asks clients to identify themselves with `tool` and `email`; an API
/// key raises the request rate limit.
#[derive(Debug, Clone)]
pub struct EntrezConfig {
    base_url: String,
    tool: String,
    email: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
}

impl Default for EntrezConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EntrezConfig {
    /// Creates a configuration pointing at the public NCBI endpoints.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            tool: DEFAULT_TOOL.to_string(),
            email: None,
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the base URL, e.g. for a mirror or a local test server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_tool(mut self, tool: &str) -> Self {
        self.tool = tool.to_string();
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    /// Sets the API key. Blank keys are treated as absent.
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Checks that the settings can be used to build a client.
    ///
    /// # Errors
    ///
    /// Returns `PaperError::InvalidConfig` for an empty base URL or tool name.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(PaperError::InvalidConfig {
                field: "base_url".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.tool.trim().is_empty() {
            return Err(PaperError::InvalidConfig {
                field: "tool".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Identification parameters sent with every request.
    pub(crate) fn identity_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("tool", self.tool.clone())];
        if let Some(email) = &self.email {
            params.push(("email", email.clone()));
        }
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = EntrezConfig::new();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.tool(), "pharmapapers");
        assert_eq!(config.email(), None);
        assert_eq!(config.api_key(), None);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let config = EntrezConfig::new().with_api_key(Some("  ".to_string()));
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = EntrezConfig::new().with_base_url("http://localhost:8080/eutils/");
        assert_eq!(config.base_url(), "http://localhost:8080/eutils");
    }

    #[test]
    fn test_identity_params() {
        let config = EntrezConfig::new()
            .with_email("me@example.org")
            .with_api_key(Some("k".to_string()));
        assert_eq!(
            config.identity_params(),
            vec![
                ("tool", "pharmapapers".to_string()),
                ("email", "me@example.org".to_string()),
                ("api_key", "k".to_string()),
            ]
        );
    }

    #[test]
    fn test_validate_rejects_empty_values() {
        assert!(EntrezConfig::new().with_base_url("").validate().is_err());
        assert!(EntrezConfig::new().with_tool(" ").validate().is_err());
    }
}
