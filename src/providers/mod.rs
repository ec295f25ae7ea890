pub mod caching;
pub mod fixture;
pub mod freecurrency;
pub mod util;
pub mod yahoo_finance;

use crate::core::config::PortfolioConfig;
use crate::core::error::FetchError;
use crate::core::quote::QuoteProvider;
use crate::core::rates::RateProvider;
use crate::store::DiskCache;
use caching::{CachedProvider, OFFLINE_SUFFIX};
use fixture::{FixtureQuoteProvider, FixtureRateProvider};
use freecurrency::FreeCurrencyRateProvider;
use std::sync::Arc;
use std::time::Duration;
use yahoo_finance::YahooQuoteProvider;

/// Where market data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceMode {
    #[default]
    Remote,
    Fixture,
}

/// The quote and rate providers for one run.
#[derive(Clone)]
pub struct Providers {
    pub quotes: Arc<dyn QuoteProvider>,
    pub rates: Arc<dyn RateProvider>,
}

impl Providers {
    /// Builds both providers for `mode`, wrapped in the disk cache when one is given.
    pub fn build(
        config: &PortfolioConfig,
        mode: SourceMode,
        cache: Option<Arc<DiskCache>>,
    ) -> Result<Self, FetchError> {
        let (quotes, rates): (Arc<dyn QuoteProvider>, Arc<dyn RateProvider>) = match mode {
            SourceMode::Remote => {
                let quotes_cfg = &config.providers.quotes;
                let rates_cfg = &config.providers.rates;
                let quotes = YahooQuoteProvider::new(
                    &quotes_cfg.base_url,
                    &config.secrets.yahoo_key,
                    &config.secrets.yahoo_host,
                    Duration::from_secs(quotes_cfg.timeout_secs),
                )?;
                let rates = FreeCurrencyRateProvider::new(
                    &rates_cfg.base_url,
                    &config.secrets.freecurrency_api_key,
                    &config.currency,
                    Duration::from_secs(rates_cfg.timeout_secs),
                )?;
                wrap(quotes, rates, cache, "")
            }
            SourceMode::Fixture => {
                wrap(FixtureQuoteProvider, FixtureRateProvider, cache, OFFLINE_SUFFIX)
            }
        };
        Ok(Providers { quotes, rates })
    }
}

fn wrap<Q, R>(
    quotes: Q,
    rates: R,
    cache: Option<Arc<DiskCache>>,
    entry_suffix: &'static str,
) -> (Arc<dyn QuoteProvider>, Arc<dyn RateProvider>)
where
    Q: QuoteProvider + 'static,
    R: RateProvider + 'static,
{
    match cache {
        Some(cache) => (
            Arc::new(CachedProvider::new(quotes, Arc::clone(&cache)).with_entry_suffix(entry_suffix)),
            Arc::new(CachedProvider::new(rates, cache).with_entry_suffix(entry_suffix)),
        ),
        None => (Arc::new(quotes), Arc::new(rates)),
    }
}
