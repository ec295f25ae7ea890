use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::{env, fs};
use tracing::debug;

pub const FILE_NAME: &str = "portfolio.yml";

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Order {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub count: f64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub provision: f64,
    #[serde(default)]
    pub fee: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Dividend {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub count: f64,
    #[serde(default)]
    pub amount: f64,
    #[serde(default, alias = "quellensteuer")]
    pub withholding_tax: f64,
    #[serde(default, alias = "kapitalertragsteuer")]
    pub capital_gains_tax: f64,
    #[serde(default, alias = "solidaritaetszuschlag")]
    pub solidarity_surcharge: f64,
    #[serde(default, alias = "kirchensteuer")]
    pub church_tax: f64,
}

impl Dividend {
    pub fn tax(&self) -> f64 {
        self.withholding_tax + self.capital_gains_tax + self.solidarity_surcharge + self.church_tax
    }
}

/// A position in one instrument.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Holding {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub wkn: Option<String>,
    #[serde(default)]
    pub isin: Option<String>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub dividends: Vec<Dividend>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Secrets {
    #[serde(default)]
    pub yahoo_key: String,
    #[serde(default)]
    pub yahoo_host: String,
    #[serde(default)]
    pub freecurrency_api_key: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProviderConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    #[serde(default = "default_quotes_provider")]
    pub quotes: ProviderConfig,
    #[serde(default = "default_rates_provider")]
    pub rates: ProviderConfig,
}

fn default_quotes_provider() -> ProviderConfig {
    ProviderConfig {
        base_url: "https://yahoo-finance15.p.rapidapi.com".to_string(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_rates_provider() -> ProviderConfig {
    ProviderConfig {
        base_url: "https://api.freecurrencyapi.com".to_string(),
        timeout_secs: default_timeout_secs(),
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            quotes: default_quotes_provider(),
            rates: default_rates_provider(),
        }
    }
}

fn default_currency() -> String {
    "EUR".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PortfolioConfig {
    #[serde(default)]
    pub stocks: Vec<Holding>,
    #[serde(default)]
    pub secrets: Secrets,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub providers: ProvidersConfig,
    pub cache_dir: Option<String>,
}

impl PortfolioConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default portfolio");
        let path = Self::locate()?;
        Self::load_from_path(&path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "kurse")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join(FILE_NAME))
    }

    /// Finds the portfolio file in the user config directory, falling back to
    /// the working directory.
    pub fn locate() -> Result<PathBuf> {
        if let Ok(path) = Self::default_config_path() {
            if path.is_file() {
                return Ok(path);
            }
        }
        let path = env::current_dir()
            .context("Could not determine the working directory")?
            .join(FILE_NAME);
        if !path.is_file() {
            bail!(
                "No {} found in the user config directory or {}",
                FILE_NAME,
                path.display()
            );
        }
        Ok(path)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read portfolio file: {}", path.display()))?;

        let config: Self = serde_yaml::from_str(&yaml)
            .with_context(|| format!("Failed to parse portfolio file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid portfolio file: {}", path.display()))?;
        debug!(holdings = config.stocks.len(), "Successfully loaded portfolio");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for holding in &self.stocks {
            if holding.symbol.trim().is_empty() {
                bail!("Holding without a symbol");
            }
            if !seen.insert(holding.symbol.as_str()) {
                bail!("Duplicate symbol: {}", holding.symbol);
            }
            for order in &holding.orders {
                if order.count < 0.0 || order.price < 0.0 || order.provision < 0.0 || order.fee < 0.0
                {
                    bail!("Negative order value for {}", holding.symbol);
                }
            }
        }
        Ok(())
    }

    pub fn symbols(&self) -> Vec<String> {
        self.stocks.iter().map(|h| h.symbol.clone()).collect()
    }

    pub fn cache_base_dir(&self) -> Option<PathBuf> {
        self.cache_dir.as_ref().map(PathBuf::from)
    }
}
