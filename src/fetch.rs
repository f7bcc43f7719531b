//! HTTP access to bulletin summaries and PDFs.
//!
//! A thin byte-fetching service keyed by URL. Every request is made once;
//! failures are reported, never retried.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::header::ACCEPT;
use reqwest::Client;

use crate::error::{Error, Result};
use crate::extract::ExtractOptions;
use crate::reconstruct::ReconstructOptions;
use crate::render::EntryReport;
use crate::sumario::Sumario;

/// Open-data API root for the bulletin.
pub const DEFAULT_API_BASE: &str = "https://www.boe.es/datosabiertos/api/borme";

/// Host prefix of published PDF links.
pub const OFFICIAL_PDF_HOST: &str = "https://www.boe.es/";

const USER_AGENT: &str = concat!("borme/", env!("CARGO_PKG_VERSION"));

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root; summaries live under `{api_base}/sumario/YYYYMMDD`
    pub api_base: String,

    /// Replacement for [`OFFICIAL_PDF_HOST`] in PDF links (proxy or mirror)
    pub pdf_base: Option<String>,

    /// User-Agent header
    pub user_agent: String,

    /// Whole-request timeout (None = wait indefinitely)
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API root.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Route PDF downloads through another base URL.
    pub fn with_pdf_base(mut self, base: impl Into<String>) -> Self {
        self.pdf_base = Some(base.into());
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set or clear the request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// URL of the summary for a given day.
    pub fn sumario_url(&self, date: NaiveDate) -> String {
        format!(
            "{}/sumario/{}",
            self.api_base.trim_end_matches('/'),
            date.format("%Y%m%d")
        )
    }

    /// Rewrite an official PDF link onto `pdf_base`, if configured.
    pub fn resolve_pdf_url(&self, url: &str) -> String {
        match (&self.pdf_base, url.strip_prefix(OFFICIAL_PDF_HOST)) {
            (Some(base), Some(path)) => format!("{}/{}", base.trim_end_matches('/'), path),
            _ => url.to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            pdf_base: None,
            user_agent: USER_AGENT.to_string(),
            timeout: Some(Duration::from_secs(60)),
        }
    }
}

/// Asynchronous client for summaries and bulletin PDFs.
pub struct BormeClient {
    client: Client,
    config: ClientConfig,
}

impl BormeClient {
    /// Build a client from a configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(5));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Http(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Configuration in use.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Download a URL's body.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http(format!("{}: HTTP {}", url, status)));
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Download and map the summary of a day.
    ///
    /// Days without an issue come back as a summary error from the API.
    pub async fn fetch_sumario(&self, date: NaiveDate) -> Result<Sumario> {
        let url = self.config.sumario_url(date);
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        match Sumario::from_json(&body) {
            Err(Error::Summary(msg)) if !status.is_success() => {
                Err(Error::Http(format!("{}: HTTP {} ({})", url, status, msg)))
            }
            other => other,
        }
    }

    /// Download a bulletin PDF and rebuild its entries.
    pub async fn fetch_entries(
        &self,
        url: &str,
        extract: &ExtractOptions,
        reconstruct: &ReconstructOptions,
    ) -> Result<EntryReport> {
        let url = self.config.resolve_pdf_url(url);
        let data = self.fetch_bytes(&url).await?;
        crate::Borme::new()
            .with_extract_options(extract.clone())
            .with_reconstruct_options(reconstruct.clone())
            .parse_bytes(&data)
    }
}
