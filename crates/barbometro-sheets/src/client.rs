//! HTTP client for the two spreadsheet endpoints and the key endpoints.

use std::time::Duration;

use barbometro_core::Restaurant;
use reqwest::{Client, Url};

use crate::error::SourceError;
use crate::parse::{parse_csv, parse_values};
use crate::types::{KeyResponse, ValuesResponse};

const DEFAULT_API_BASE_URL: &str = "https://sheets.googleapis.com/";
const DEFAULT_EXPORT_BASE_URL: &str = "https://docs.google.com/";

/// Client for the spreadsheet values API and the public CSV export.
///
/// Use [`SheetsClient::new`] for production or [`SheetsClient::with_base_urls`]
/// to point both endpoints at a mock server in tests.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    client: Client,
    api_base_url: Url,
    export_base_url: Url,
}

impl SheetsClient {
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, SourceError> {
        Self::with_base_urls(
            timeout_secs,
            user_agent,
            DEFAULT_API_BASE_URL,
            DEFAULT_EXPORT_BASE_URL,
        )
    }

    /// Creates a client with custom base URLs (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`SourceError::InvalidUrl`] if either base URL does not parse.
    pub fn with_base_urls(
        timeout_secs: u64,
        user_agent: &str,
        api_base_url: &str,
        export_base_url: &str,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_base_url: normalise_base(api_base_url)?,
            export_base_url: normalise_base(export_base_url)?,
        })
    }

    /// The underlying HTTP client, shared with the credential lookup.
    #[must_use]
    pub fn http(&self) -> &Client {
        &self.client
    }

    /// Fetch and map `range` of `sheet_id` through the values API.
    ///
    /// # Errors
    ///
    /// - [`SourceError::SourceUnavailable`] on a non-2xx status.
    /// - [`SourceError::MalformedSource`] if the body is not a values payload
    ///   or holds fewer than two rows.
    /// - [`SourceError::Http`] on network failure.
    pub async fn fetch_values(
        &self,
        sheet_id: &str,
        range: &str,
        api_key: &str,
    ) -> Result<Vec<Restaurant>, SourceError> {
        let url = self.values_url(sheet_id, range, api_key)?;
        let body = self.get_text("structured-api", url).await?;
        let payload: ValuesResponse =
            serde_json::from_str(&body).map_err(|e| SourceError::MalformedSource {
                source_name: "structured-api",
                reason: e.to_string(),
            })?;
        parse_values(&payload.values)
    }

    /// Fetch and map the public CSV export of tab `gid` of `sheet_id`.
    ///
    /// # Errors
    ///
    /// - [`SourceError::SourceUnavailable`] on a non-2xx status.
    /// - [`SourceError::MalformedSource`] on empty or short content.
    /// - [`SourceError::Http`] on network failure.
    pub async fn fetch_csv(&self, sheet_id: &str, gid: u32) -> Result<Vec<Restaurant>, SourceError> {
        let url = self.csv_url(sheet_id, gid)?;
        let body = self.get_text("public-csv", url).await?;
        parse_csv(&body)
    }

    /// `{api}/v4/spreadsheets/{sheet_id}/values/{range}?key={api_key}`
    fn values_url(&self, sheet_id: &str, range: &str, api_key: &str) -> Result<Url, SourceError> {
        let mut url = self.api_base_url.clone();
        url.path_segments_mut()
            .map_err(|()| SourceError::InvalidUrl {
                url: self.api_base_url.to_string(),
                reason: "base URL cannot have path segments".to_string(),
            })?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", sheet_id, "values", range]);
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }

    /// `{export}/spreadsheets/d/e/{sheet_id}/pub?output=csv&gid={gid}`
    fn csv_url(&self, sheet_id: &str, gid: u32) -> Result<Url, SourceError> {
        let mut url = self.export_base_url.clone();
        url.path_segments_mut()
            .map_err(|()| SourceError::InvalidUrl {
                url: self.export_base_url.to_string(),
                reason: "base URL cannot have path segments".to_string(),
            })?
            .pop_if_empty()
            .extend(["spreadsheets", "d", "e", sheet_id, "pub"]);
        url.query_pairs_mut()
            .append_pair("output", "csv")
            .append_pair("gid", &gid.to_string());
        Ok(url)
    }

    async fn get_text(&self, source_name: &'static str, url: Url) -> Result<String, SourceError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::SourceUnavailable {
                source_name,
                reason: format!("HTTP {status}"),
            });
        }
        Ok(response.text().await?)
    }
}

/// Ask a trusted endpoint for the spreadsheet API key.
///
/// # Errors
///
/// Returns [`SourceError::SourceUnavailable`] on a non-2xx status,
/// [`SourceError::MalformedSource`] if the body has no `apiKey`, or
/// [`SourceError::Http`] on network failure.
pub async fn fetch_api_key(client: &Client, endpoint: &str) -> Result<String, SourceError> {
    let url = Url::parse(endpoint).map_err(|e| SourceError::InvalidUrl {
        url: endpoint.to_string(),
        reason: e.to_string(),
    })?;
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::SourceUnavailable {
            source_name: "key-endpoint",
            reason: format!("HTTP {status}"),
        });
    }
    let body = response.text().await?;
    let key: KeyResponse =
        serde_json::from_str(&body).map_err(|e| SourceError::MalformedSource {
            source_name: "key-endpoint",
            reason: e.to_string(),
        })?;
    Ok(key.api_key)
}

fn normalise_base(base_url: &str) -> Result<Url, SourceError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| SourceError::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}
