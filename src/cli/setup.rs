use crate::core::config::PortfolioConfig;
use anyhow::{Context, Result};
use std::path::Path;

const EXAMPLE_PORTFOLIO: &str = include_str!("../../docs/example_portfolio.yml");

/// Writes the example portfolio file to the default location
pub fn setup() -> Result<()> {
    let path = PortfolioConfig::default_config_path()?;
    setup_at_path(&path)
}

/// Writes the example portfolio file to `path`, refusing to overwrite an existing file
pub fn setup_at_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if path.exists() {
        anyhow::bail!("Portfolio file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, EXAMPLE_PORTFOLIO)
        .with_context(|| format!("Failed to write portfolio file to {}", path.display()))?;

    tracing::info!("Created example portfolio at {}", path.display());
    println!("Created example portfolio at {}", path.display());
    Ok(())
}
