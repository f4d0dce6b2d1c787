use std::time::Duration;

use crate::error::FetchError;

/// A single blocking page fetch. One attempt per call, no retries; a
/// failure is reported upward immediately and classified by the caller.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// `Fetch` over a blocking reqwest client.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent(concat!("aurlist/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError(e.to_string()))?;
        Ok(HttpFetcher { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError(e.to_string()))?;
        let resp = resp
            .error_for_status()
            .map_err(|e| FetchError(e.to_string()))?;
        resp.text().map_err(|e| FetchError(e.to_string()))
    }
}
