use reqwest::Client;
use tracing::{info, warn};

use crate::domain::TokenReport;
use crate::error::FetchError;

#[derive(Clone)]
pub struct RugcheckClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl RugcheckClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            http: Client::new(),
        }
    }

    pub fn report_url(&self, address: &str) -> String {
        format!("{}/{}/report", self.base_url, address)
    }

    /// One authenticated GET; no retries.
    pub async fn report(&self, address: &str) -> Result<TokenReport, FetchError> {
        let url = self.report_url(address);
        info!(%address, "fetch.start");

        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .inspect_err(|e| warn!(%address, error = %e, "fetch.failed"))?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            warn!(%address, status = status.as_u16(), "fetch.failed");
            return Err(FetchError::Status { status: status.as_u16(), body });
        }

        let report: TokenReport = serde_json::from_str(&body)?;
        info!(%address, symbol = %report.token_meta.symbol, "fetch.ok");
        Ok(report)
    }
}

/// Trims operator input and rejects anything that cannot be a mint address.
pub fn normalize_address(raw: &str) -> anyhow::Result<String> {
    let addr = raw.trim();
    if addr.is_empty() {
        anyhow::bail!("token address is empty");
    }
    if addr.chars().any(char::is_whitespace) {
        anyhow::bail!("token address must not contain whitespace: {addr:?}");
    }
    Ok(addr.to_string())
}
