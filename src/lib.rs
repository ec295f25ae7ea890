pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::PortfolioConfig;
use crate::core::fetch::{MarketData, fetch_market_data};
use crate::core::valuation::{PortfolioValuation, value_portfolio};
use crate::providers::{Providers, SourceMode};
use crate::store::DiskCache;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Summary,
    Show(String),
}

/// Options shared by all commands.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub portfolio_path: Option<PathBuf>,
    pub mode: SourceMode,
    pub use_cache: bool,
}

pub async fn run_command(command: AppCommand, options: &RunOptions) -> Result<()> {
    let valuation = value(options).await?;
    match command {
        AppCommand::Summary => {
            cli::summary::run(&valuation);
            Ok(())
        }
        AppCommand::Show(symbol) => cli::show::run(&valuation, &symbol),
    }
}

/// Loads the portfolio, fetches market data and values every holding.
pub async fn value(options: &RunOptions) -> Result<PortfolioValuation> {
    info!("Kurse starting...");

    let config = match &options.portfolio_path {
        Some(path) => PortfolioConfig::load_from_path(path)?,
        None => PortfolioConfig::load()?,
    };
    debug!(
        holdings = config.stocks.len(),
        currency = %config.currency,
        "Loaded portfolio"
    );

    let cache = if options.use_cache {
        let cache = match config.cache_base_dir() {
            Some(dir) => DiskCache::new(dir, store::NAMESPACE),
            None => DiskCache::in_user_cache_dir(store::NAMESPACE)?,
        };
        debug!(dir = %cache.dir().display(), "Using disk cache");
        Some(Arc::new(cache))
    } else {
        None
    };

    let providers = Providers::build(&config, options.mode, cache)
        .context("Failed to set up data providers")?;

    let spinner = cli::ui::new_spinner("Fetching quotes and exchange rates...");
    let market_data = fetch_market_data(providers.quotes, providers.rates, config.symbols()).await;
    spinner.finish_and_clear();
    let MarketData { quotes, rates } =
        market_data.context("Failed to fetch market data")?;

    Ok(value_portfolio(
        &config.stocks,
        &quotes,
        &rates,
        &config.currency,
    ))
}
