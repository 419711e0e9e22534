use std::time::Duration;

use anyhow::{Context, Result};

/// Some upstreams serve bot-looking clients an empty shell, so requests go
/// out with a browser User-Agent.
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko)";

/// Thin wrapper over a shared HTTP client. One GET per call, no retries, no
/// backoff; the only policy beyond client defaults is the overall request
/// timeout supplied at startup.
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }

    /// Fetch a page and return its body as text. Network errors, timeouts and
    /// non-2xx statuses are all terminal for the request.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?;

        let response = response
            .error_for_status()
            .with_context(|| format!("GET {} returned error status", url))?;

        response
            .text()
            .await
            .with_context(|| format!("Failed to read body from {}", url))
    }
}
