use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::core::error::FetchError;
use crate::core::quote::QuoteProvider;
use crate::core::rates::RateProvider;
use crate::store::DiskCache;

pub const QUOTES_ENTRY: &str = "quotes";
pub const RATES_ENTRY: &str = "rates";
pub const MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);
/// Appended to the entry names of offline providers so fixture snapshots
/// never stand in for live data, nor the other way round.
pub const OFFLINE_SUFFIX: &str = "-offline";

/// Serves payloads from the disk cache while they are fresh and stores the
/// inner provider's payload after a miss.
pub struct CachedProvider<T> {
    inner: T,
    cache: Arc<DiskCache>,
    max_age: Duration,
    entry_suffix: &'static str,
}

impl<T> CachedProvider<T> {
    pub fn new(inner: T, cache: Arc<DiskCache>) -> Self {
        Self::with_max_age(inner, cache, MAX_AGE)
    }

    pub fn with_max_age(inner: T, cache: Arc<DiskCache>, max_age: Duration) -> Self {
        Self {
            inner,
            cache,
            max_age,
            entry_suffix: "",
        }
    }

    /// Stores entries as `<entry><suffix>` instead of the plain entry name.
    pub fn with_entry_suffix(mut self, suffix: &'static str) -> Self {
        self.entry_suffix = suffix;
        self
    }

    pub fn entry_name(&self, entry: &str) -> String {
        format!("{entry}{}", self.entry_suffix)
    }

    async fn cached_or_else<F>(&self, entry: &str, fetch: F) -> Result<Vec<u8>, FetchError>
    where
        F: Future<Output = Result<Vec<u8>, FetchError>> + Send,
    {
        let entry = self.entry_name(entry);
        if let Some(payload) = self.cache.load(&entry, self.max_age).await? {
            debug!("Cache hit for {}", entry);
            return Ok(payload);
        }
        debug!("Cache miss for {}", entry);
        let payload = fetch.await?;
        self.cache.save(&entry, &payload).await?;
        Ok(payload)
    }
}

#[async_trait]
impl<T: QuoteProvider> QuoteProvider for CachedProvider<T> {
    async fn fetch_payload(&self, symbols: &[String]) -> Result<Vec<u8>, FetchError> {
        self.cached_or_else(QUOTES_ENTRY, self.inner.fetch_payload(symbols))
            .await
    }
}

#[async_trait]
impl<T: RateProvider> RateProvider for CachedProvider<T> {
    async fn fetch_payload(&self) -> Result<Vec<u8>, FetchError> {
        self.cached_or_else(RATES_ENTRY, self.inner.fetch_payload())
            .await
    }
}
