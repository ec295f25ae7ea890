use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::error::FetchError;
use crate::core::quote::{QuoteProvider, SOURCE};
use crate::providers::util::{fetch_body, http_client, log_rate_limit};

const QUOTES_PATH: &str = "/api/v1/markets/stock/quotes";

/// Batched quotes from the Yahoo Finance API published on RapidAPI.
pub struct YahooQuoteProvider {
    base_url: String,
    api_key: String,
    api_host: String,
    client: reqwest::Client,
}

impl YahooQuoteProvider {
    pub fn new(
        base_url: &str,
        api_key: &str,
        api_host: &str,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        Ok(YahooQuoteProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            api_host: api_host.to_string(),
            client: http_client(SOURCE, timeout)?,
        })
    }

    fn quotes_url(&self, symbols: &[String]) -> Result<Url, FetchError> {
        let url = format!("{}{}", self.base_url, QUOTES_PATH);
        Url::parse_with_params(&url, &[("ticker", symbols.join(","))]).map_err(|e| {
            FetchError::InvalidUrl {
                source_name: SOURCE,
                url: url.clone(),
                reason: e.to_string(),
            }
        })
    }
}

#[async_trait]
impl QuoteProvider for YahooQuoteProvider {
    #[instrument(name = "YahooQuoteFetch", skip(self), fields(count = symbols.len()))]
    async fn fetch_payload(&self, symbols: &[String]) -> Result<Vec<u8>, FetchError> {
        let url = self.quotes_url(symbols)?;
        debug!("Requesting quotes from {}", url);

        let request = self
            .client
            .get(url)
            .header("X-RapidAPI-Key", self.api_key.as_str())
            .header("X-RapidAPI-Host", self.api_host.as_str());
        let (headers, body) = fetch_body(SOURCE, request).await?;
        log_rate_limit(SOURCE, &headers);
        Ok(body)
    }
}
