use async_trait::async_trait;
use fund_core::{
    ExternalFields, FundError, FundResult, MetricsRecord, SchemeDetail, SchemeSource, SchemeSummary,
};
use fund_metrics::MetricsAssembler;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.mfapi.in/mf";

/// Number of catalog entries kept from a listing.
pub const DEFAULT_SCHEME_LIMIT: usize = 50;

/// Configuration for the catalog client
#[derive(Debug, Clone)]
pub struct MfApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for MfApiConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("MFAPI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(
                std::env::var("MFAPI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }
}

/// HTTP client for the mutual fund NAV catalog.
///
/// No retries: a failed request is reported once and the caller decides.
#[derive(Clone)]
pub struct MfApiClient {
    client: Client,
    base_url: String,
}

impl MfApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &MfApiConfig) -> Self {
        Self::new(config.base_url.clone(), config.timeout)
    }

    pub fn with_defaults() -> Self {
        Self::from_config(&MfApiConfig::default())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, url: &str) -> FundResult<reqwest::Response> {
        tracing::debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FundError::Api(e.to_string()))?;

        match response.status() {
            s if s.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(FundError::NotFound(url.to_string())),
            s => Err(FundError::Api(format!(
                "HTTP {}: {}",
                s,
                response.text().await.unwrap_or_default()
            ))),
        }
    }

    /// List available schemes, keeping the first `limit` entries.
    pub async fn list_schemes(&self, limit: usize) -> FundResult<Vec<SchemeSummary>> {
        let response = self.get(&self.base_url).await?;
        let mut schemes: Vec<SchemeSummary> = response
            .json()
            .await
            .map_err(|e| FundError::Api(e.to_string()))?;

        schemes.truncate(limit);
        Ok(schemes)
    }

    /// Scheme metadata plus its full most-recent-first NAV history.
    pub async fn get_scheme_detail(&self, scheme_code: u64) -> FundResult<SchemeDetail> {
        let url = format!("{}/{}", self.base_url, scheme_code);
        let detail: SchemeDetail = self
            .get(&url)
            .await?
            .json()
            .await
            .map_err(|e| FundError::Api(e.to_string()))?;

        if detail.status.eq_ignore_ascii_case("error")
            || (detail.data.is_empty() && detail.meta.scheme_name.is_empty())
        {
            return Err(FundError::NotFound(format!("scheme {}", scheme_code)));
        }

        Ok(detail)
    }
}

#[async_trait]
impl SchemeSource for MfApiClient {
    async fn list_schemes(&self, limit: usize) -> FundResult<Vec<SchemeSummary>> {
        MfApiClient::list_schemes(self, limit).await
    }

    async fn scheme_detail(&self, scheme_code: u64) -> FundResult<SchemeDetail> {
        self.get_scheme_detail(scheme_code).await
    }
}

/// Catalog listing that degrades to an empty list when the source fails.
pub async fn list_schemes_or_empty(source: &dyn SchemeSource, limit: usize) -> Vec<SchemeSummary> {
    match source.list_schemes(limit).await {
        Ok(schemes) => schemes,
        Err(e) => {
            tracing::warn!("Error fetching schemes: {}", e);
            Vec::new()
        }
    }
}

/// Fetch a scheme and assemble its metrics. Any source failure or an empty
/// history is logged and reported as `None` ("no data available").
pub async fn fetch_metrics(
    source: &dyn SchemeSource,
    scheme_code: u64,
    assembler: &MetricsAssembler,
    external: &ExternalFields,
) -> Option<MetricsRecord> {
    match source.scheme_detail(scheme_code).await {
        Ok(detail) => assembler.assemble(scheme_code, &detail, external),
        Err(e) => {
            tracing::warn!(scheme_code, "Error fetching scheme details: {}", e);
            None
        }
    }
}
