use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::error::FetchError;
use crate::core::rates::{RateProvider, SOURCE};
use crate::providers::util::{fetch_body, http_client};

const LATEST_PATH: &str = "/v1/latest";

/// Latest exchange rates from freecurrencyapi.com, based on the reporting currency.
pub struct FreeCurrencyRateProvider {
    base_url: String,
    api_key: String,
    base_currency: String,
    client: reqwest::Client,
}

impl FreeCurrencyRateProvider {
    pub fn new(
        base_url: &str,
        api_key: &str,
        base_currency: &str,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        Ok(FreeCurrencyRateProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            base_currency: base_currency.to_string(),
            client: http_client(SOURCE, timeout)?,
        })
    }

    fn latest_url(&self) -> Result<Url, FetchError> {
        let url = format!("{}{}", self.base_url, LATEST_PATH);
        Url::parse_with_params(
            &url,
            &[
                ("apikey", self.api_key.as_str()),
                ("base_currency", self.base_currency.as_str()),
            ],
        )
        .map_err(|e| FetchError::InvalidUrl {
            source_name: SOURCE,
            url: url.clone(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl RateProvider for FreeCurrencyRateProvider {
    #[instrument(name = "FreeCurrencyRatesFetch", skip(self), fields(base = %self.base_currency))]
    async fn fetch_payload(&self) -> Result<Vec<u8>, FetchError> {
        let url = self.latest_url()?;
        // The URL carries the API key
        debug!("Requesting rates from {}{}", self.base_url, LATEST_PATH);

        let (_, body) = fetch_body(SOURCE, self.client.get(url)).await?;
        Ok(body)
    }
}
