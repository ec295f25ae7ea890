//! Market quotes and the quote data-source capability.

use crate::core::error::FetchError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use tracing::info;

pub const SOURCE: &str = "quotes";

/// Latest market snapshot of one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: String,
    /// Zero when the provider omits it, e.g. for a delisted instrument.
    #[serde(default, deserialize_with = "null_as_default")]
    pub regular_market_price: f64,
    #[serde(default)]
    pub bid: Option<f64>,

    // Informational, not used by valuation
    #[serde(default)]
    pub ask: Option<f64>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub market_state: Option<String>,
    #[serde(default)]
    pub quote_type: Option<String>,
    #[serde(default)]
    pub regular_market_change_percent: Option<f64>,
    #[serde(default)]
    pub regular_market_previous_close: Option<f64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Which price the detail view shows for a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceKind {
    Bid,
    Regular,
}

impl Quote {
    /// The bid when the provider reports a non-zero one, the regular market price otherwise.
    pub fn display_price(&self) -> (f64, PriceKind) {
        match self.bid {
            Some(bid) if bid != 0.0 => (bid, PriceKind::Bid),
            _ => (self.regular_market_price, PriceKind::Regular),
        }
    }
}

/// Quotes keyed by symbol.
pub type Quotes = HashMap<String, Quote>;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteMeta {
    processed_time: Option<DateTime<Utc>>,
    status: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct QuoteEnvelope {
    body: Vec<Quote>,
    #[serde(default)]
    meta: QuoteMeta,
}

/// Decodes a quote provider response and folds it into a symbol-keyed map.
/// A later record for the same symbol replaces an earlier one.
pub fn decode_quotes(payload: &[u8]) -> Result<Quotes, FetchError> {
    let envelope: QuoteEnvelope =
        serde_json::from_slice(payload).map_err(|e| FetchError::decode(SOURCE, e))?;

    info!(
        processed_time = ?envelope.meta.processed_time,
        status = ?envelope.meta.status,
        records = envelope.body.len(),
        "Decoded quotes"
    );

    Ok(envelope
        .body
        .into_iter()
        .map(|quote| (quote.symbol.clone(), quote))
        .collect())
}

/// A source of market quotes.
///
/// Implementations only produce the raw payload so that it can be cached as-is;
/// decoding is shared.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch_payload(&self, symbols: &[String]) -> Result<Vec<u8>, FetchError>;

    async fn fetch_quotes(&self, symbols: &[String]) -> Result<Quotes, FetchError> {
        let payload = self.fetch_payload(symbols).await?;
        decode_quotes(&payload)
    }
}
