//! Client configuration shared by the PubChem and RCSB clients

use std::time::Duration;

use crate::rate_limit::{PUBCHEM_RATE_LIMIT, RateLimiter};

/// Default PubChem PUG REST base URL
pub const PUBCHEM_BASE_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug";
/// Default RCSB Data API base URL
pub const RCSB_DATA_URL: &str = "https://data.rcsb.org/rest/v1/core";
/// Default RCSB Search API base URL
pub const RCSB_SEARCH_URL: &str = "https://search.rcsb.org/rcsbsearch/v2";
/// Default RCSB file download base URL
pub const RCSB_FILES_URL: &str = "https://files.rcsb.org";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`PubChemClient`](crate::PubChemClient) and
/// [`RcsbClient`](crate::RcsbClient)
///
/// # Example
///
/// ```
/// use affinity_data_client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new()
///     .with_timeout(Duration::from_secs(10))
///     .with_rate_limit(5.0)
///     .with_user_agent("binding-explorer/1.0");
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub pubchem_base_url: Option<String>,
    pub rcsb_data_url: Option<String>,
    pub rcsb_search_url: Option<String>,
    pub rcsb_files_url: Option<String>,
    pub timeout: Duration,
    pub user_agent: Option<String>,
    /// Requests per second; `None` disables pacing
    pub rate_limit: Option<f64>,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            pubchem_base_url: None,
            rcsb_data_url: None,
            rcsb_search_url: None,
            rcsb_files_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
            rate_limit: None,
        }
    }

    /// Point every service at the same host
    ///
    /// Mostly useful for tests against a local mock server.
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        let base_url = base_url.into();
        self.pubchem_base_url = Some(base_url.clone());
        self.rcsb_data_url = Some(base_url.clone());
        self.rcsb_search_url = Some(base_url.clone());
        self.rcsb_files_url = Some(base_url);
        self
    }

    pub fn with_pubchem_base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.pubchem_base_url = Some(url.into());
        self
    }

    pub fn with_rcsb_data_url<S: Into<String>>(mut self, url: S) -> Self {
        self.rcsb_data_url = Some(url.into());
        self
    }

    pub fn with_rcsb_search_url<S: Into<String>>(mut self, url: S) -> Self {
        self.rcsb_search_url = Some(url.into());
        self
    }

    pub fn with_rcsb_files_url<S: Into<String>>(mut self, url: S) -> Self {
        self.rcsb_files_url = Some(url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Pace requests to at most `requests_per_second`
    pub fn with_rate_limit(mut self, requests_per_second: f64) -> Self {
        self.rate_limit = Some(requests_per_second);
        self
    }

    /// Pace requests to PubChem's published limit of 5 per second
    pub fn with_pubchem_rate_limit(self) -> Self {
        self.with_rate_limit(PUBCHEM_RATE_LIMIT)
    }

    pub fn effective_pubchem_base_url(&self) -> &str {
        trim_base(self.pubchem_base_url.as_deref().unwrap_or(PUBCHEM_BASE_URL))
    }

    pub fn effective_rcsb_data_url(&self) -> &str {
        trim_base(self.rcsb_data_url.as_deref().unwrap_or(RCSB_DATA_URL))
    }

    pub fn effective_rcsb_search_url(&self) -> &str {
        trim_base(self.rcsb_search_url.as_deref().unwrap_or(RCSB_SEARCH_URL))
    }

    pub fn effective_rcsb_files_url(&self) -> &str {
        trim_base(self.rcsb_files_url.as_deref().unwrap_or(RCSB_FILES_URL))
    }

    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("affinity-data-client/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn create_rate_limiter(&self) -> Option<RateLimiter> {
        self.rate_limit.map(RateLimiter::new)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn trim_base(url: &str) -> &str {
    url.trim_end_matches('/')
}
