//! Settings from the environment.

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use url::Url;

use bingwall_core::settings::{Settings, DEFAULT_ORIGIN};

pub const ORIGIN_ENV: &str = "BINGWALL_ORIGIN";
pub const MARKET_ENV: &str = "BINGWALL_MARKET";
pub const CACHE_DIR_ENV: &str = "BINGWALL_CACHE_DIR";

/// Directory name under the user data dir, shared with earlier script installs.
const CACHE_DIR_NAME: &str = "xfce-bing-wallpaper";

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn default_cache_dir() -> anyhow::Result<PathBuf> {
    if let Some(dir) = dirs::data_dir() {
        return Ok(dir.join(CACHE_DIR_NAME));
    }
    let home = dirs::home_dir().ok_or_else(|| anyhow!("HOME not set"))?;
    Ok(home.join(".local/share").join(CACHE_DIR_NAME))
}

pub fn from_env() -> anyhow::Result<Settings> {
    let origin = env_nonempty(ORIGIN_ENV).unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
    let origin = Url::parse(&origin).with_context(|| format!("{ORIGIN_ENV}={origin:?}"))?;
    if origin.cannot_be_a_base() {
        return Err(anyhow!("origin cannot be a base URL")).with_context(|| origin.to_string());
    }

    let cache_dir = match env_nonempty(CACHE_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => default_cache_dir().context("cache dir")?,
    };

    let mut settings = Settings::new(origin, cache_dir);
    if let Some(market) = env_nonempty(MARKET_ENV) {
        settings.market = market;
    }
    Ok(settings)
}
