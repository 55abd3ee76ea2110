// src/edgar/client.rs
use crate::utils::error::EdgarError;
use reqwest::header;
use std::time::Duration;

/// SEC rejects requests without a contact User-Agent. Override with `--user-agent`.
pub const DEFAULT_USER_AGENT: &str = "sec-revenue-extractor admin@example.com";
// SEC asks for 10 requests/second max. Be conservative. >100ms delay.
const EDGAR_REQUEST_DELAY_MS: u64 = 150;

/// Creates a reqwest client configured for EDGAR interaction.
fn build_edgar_client(user_agent: &str) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(60))
        .build()
}

/// Downloads a filing document (HTML body) from its URL.
/// Includes mandatory User-Agent and basic rate limiting.
pub async fn download_filing_doc(url: &str, user_agent: &str) -> Result<String, EdgarError> {
    let client = build_edgar_client(user_agent)?;

    tracing::info!("Downloading document from: {}", url);
    tracing::debug!("Using User-Agent: {}", user_agent);

    tokio::time::sleep(Duration::from_millis(EDGAR_REQUEST_DELAY_MS)).await;

    let response = client
        .get(url)
        .header(header::ACCEPT, "application/xml,text/html,text/plain,*/*")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        if status == reqwest::StatusCode::FORBIDDEN {
            tracing::warn!("Received 403 Forbidden - check User-Agent and rate limits.");
            return Err(EdgarError::RateLimited);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(EdgarError::FilingDocNotFound(url.to_string()));
        }
        return Err(EdgarError::Http(status));
    }

    let body = response.text().await?;
    tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);

    Ok(body)
}
