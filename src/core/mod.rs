//! Core business logic: data model, data-source capabilities and valuation.

pub mod config;
pub mod error;
pub mod fetch;
pub mod log;
pub mod quote;
pub mod rates;
pub mod valuation;

// Re-export main types for cleaner imports
pub use error::FetchError;
pub use fetch::{MarketData, fetch_market_data};
pub use quote::{Quote, QuoteProvider, Quotes};
pub use rates::{RateProvider, RateTable};
pub use valuation::{HoldingValuation, PortfolioTotals, PortfolioValuation, value_portfolio};
