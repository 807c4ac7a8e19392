//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting azerank defaults.

use crate::config::Config;
use anyhow::{bail, Result};

/// Settings passed on the `configure` command line
#[derive(Debug, Default)]
pub struct Updates {
    pub base_url: Option<String>,
    pub fight_style: Option<String>,
    pub timeout: Option<u64>,
}

impl Updates {
    fn is_empty(&self) -> bool {
        self.base_url.is_none() && self.fight_style.is_none() && self.timeout.is_none()
    }
}

/// Handle the configure command
pub fn handle(updates: Updates, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if updates.is_empty() {
        show_usage();
        return Ok(());
    }

    apply(&mut config, updates)?;
    config.save()?;

    println!("Configuration updated");
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Merge updates into `config`, leaving unset fields untouched
fn apply(config: &mut Config, updates: Updates) -> Result<()> {
    if let Some(url) = updates.base_url {
        let url = url.trim_end_matches('/').to_string();
        if url.is_empty() {
            bail!("Base URL must not be empty");
        }
        config.base_url = Some(url);
    }
    if let Some(style) = updates.fight_style {
        if style.is_empty() {
            bail!("Fight style must not be empty");
        }
        config.fight_style = Some(style);
    }
    if let Some(secs) = updates.timeout {
        if secs == 0 {
            bail!("Timeout must be at least one second");
        }
        config.timeout_secs = Some(secs);
    }
    Ok(())
}

/// Display current configuration
fn show_config(config: &Config) {
    println!("Base URL:    {}", config.base_url());
    println!("Fight style: {}", config.fight_style());
    println!("Timeout:     {}s", config.timeout().as_secs());

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: azerank configure [--base-url URL] [--fight-style STYLE] [--timeout SECS]");
    println!("   or: azerank configure --show");
}
