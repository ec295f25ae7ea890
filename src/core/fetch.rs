//! Concurrent acquisition of quotes and exchange rates.

use crate::core::error::FetchError;
use crate::core::quote::{QuoteProvider, Quotes};
use crate::core::rates::{RateProvider, RateTable};
use futures::future::join;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error};

/// Everything valuation needs from the outside world.
#[derive(Debug, Clone)]
pub struct MarketData {
    pub quotes: Quotes,
    pub rates: RateTable,
}

/// Runs both futures as separate tasks and waits for both to finish.
///
/// Neither task is cancelled when the other fails. If both fail, the error of
/// `first` is returned and the other one is logged.
pub async fn join_both<A, B, FA, FB>(first: FA, second: FB) -> Result<(A, B), FetchError>
where
    A: Send + 'static,
    B: Send + 'static,
    FA: Future<Output = Result<A, FetchError>> + Send + 'static,
    FB: Future<Output = Result<B, FetchError>> + Send + 'static,
{
    let (first, second) = join(tokio::spawn(first), tokio::spawn(second)).await;
    match (first?, second?) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
        (Err(e), Err(other)) => {
            error!(error = %other, "Second fetch failed as well");
            Err(e)
        }
    }
}

/// Fetches quotes for `symbols` and the rate table concurrently.
pub async fn fetch_market_data(
    quote_provider: Arc<dyn QuoteProvider>,
    rate_provider: Arc<dyn RateProvider>,
    symbols: Vec<String>,
) -> Result<MarketData, FetchError> {
    debug!(symbols = symbols.len(), "Fetching quotes and rates");
    let (quotes, rates) = join_both(
        async move { quote_provider.fetch_quotes(&symbols).await },
        async move { rate_provider.fetch_rates().await },
    )
    .await?;
    debug!(quotes = quotes.len(), rates = rates.data.len(), "Fetched market data");
    Ok(MarketData { quotes, rates })
}
