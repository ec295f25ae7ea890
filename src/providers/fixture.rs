//! Embedded snapshots used instead of the remote providers when running offline.

use async_trait::async_trait;
use tracing::debug;

use crate::core::error::FetchError;
use crate::core::quote::QuoteProvider;
use crate::core::rates::RateProvider;

const QUOTES_FIXTURE: &str = include_str!("fixtures/quotes.json");
const RATES_FIXTURE: &str = include_str!("fixtures/rates.json");

/// Serves a fixed quote snapshot regardless of the requested symbols.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureQuoteProvider;

#[async_trait]
impl QuoteProvider for FixtureQuoteProvider {
    async fn fetch_payload(&self, symbols: &[String]) -> Result<Vec<u8>, FetchError> {
        debug!(requested = symbols.len(), "Serving quotes from fixture");
        Ok(QUOTES_FIXTURE.as_bytes().to_vec())
    }
}

/// Serves a fixed EUR-based rate snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRateProvider;

#[async_trait]
impl RateProvider for FixtureRateProvider {
    async fn fetch_payload(&self) -> Result<Vec<u8>, FetchError> {
        debug!("Serving rates from fixture");
        Ok(RATES_FIXTURE.as_bytes().to_vec())
    }
}
