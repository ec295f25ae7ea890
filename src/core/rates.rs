//! Exchange rates relative to the reporting currency.

use crate::core::error::FetchError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const SOURCE: &str = "rates";

/// Currency code to the number of foreign units one unit of the reporting
/// currency buys. Converting an amount into the reporting currency multiplies
/// by the inverse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub data: HashMap<String, f64>,
}

impl RateTable {
    pub fn get(&self, currency: &str) -> Option<f64> {
        self.data.get(currency).copied()
    }

    /// Factor converting an amount in `currency` into `reporting_currency`.
    ///
    /// Falls back to 1.0 when the currency is the reporting currency or has no
    /// entry in the table.
    pub fn conversion_factor(&self, currency: &str, reporting_currency: &str) -> f64 {
        if currency == reporting_currency {
            return 1.0;
        }
        self.get(currency).map_or(1.0, |rate| 1.0 / rate)
    }
}

impl FromIterator<(String, f64)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        RateTable {
            data: iter.into_iter().collect(),
        }
    }
}

/// Decodes a `{"data": {"<CCY>": rate, ...}}` document.
pub fn decode_rates(payload: &[u8]) -> Result<RateTable, FetchError> {
    serde_json::from_slice(payload).map_err(|e| FetchError::decode(SOURCE, e))
}

/// A source of exchange rates relative to the reporting currency.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_payload(&self) -> Result<Vec<u8>, FetchError>;

    async fn fetch_rates(&self) -> Result<RateTable, FetchError> {
        let payload = self.fetch_payload().await?;
        decode_rates(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RateTable {
        [("USD".to_string(), 1.25), ("EUR".to_string(), 1.0)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_conversion_factor_inverts_rate() {
        assert_eq!(table().conversion_factor("USD", "EUR"), 0.8);
    }

    #[test]
    fn test_conversion_factor_missing_currency() {
        assert_eq!(table().conversion_factor("CHF", "EUR"), 1.0);
    }

    #[test]
    fn test_conversion_factor_reporting_currency() {
        let mut rates = table();
        rates.data.insert("EUR".to_string(), 1.0001);
        assert_eq!(rates.conversion_factor("EUR", "EUR"), 1.0);
    }

    #[test]
    fn test_decode_rates() {
        let rates = decode_rates(br#"{"data": {"USD": 1.0843, "JPY": 161.2}}"#).unwrap();
        assert_eq!(rates.get("USD"), Some(1.0843));
        assert_eq!(rates.get("JPY"), Some(161.2));
        assert_eq!(rates.get("GBP"), None);
    }

    #[test]
    fn test_decode_rates_malformed() {
        let result = decode_rates(b"{\"data\": [1, 2, 3]}");
        assert!(matches!(
            result,
            Err(FetchError::Decode {
                source_name: "rates",
                ..
            })
        ));
    }
}
