use crate::environment::EnvironmentMap;
use anyhow::{anyhow, Result};
use std::env;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_OFFERS_BASE_URL: &str = "https://www.adobe.com";
pub const DEFAULT_RUST_LOG: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub offers_base_url: String,
    pub env_tier: Option<String>,
    pub commerce_host: Option<String>,
    pub spark_host: Option<String>,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            offers_base_url: DEFAULT_OFFERS_BASE_URL.to_string(),
            env_tier: None,
            commerce_host: None,
            spark_host: None,
            rust_log: DEFAULT_RUST_LOG.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let mut ret = Self::default();
        if let Some(port) = Self::var("PRICING_PORT") {
            ret.port = port
                .parse()
                .map_err(|_| anyhow!("PRICING_PORT is not a port number: '{port}'"))?;
        }
        if let Some(url) = Self::var("PRICING_OFFERS_BASE_URL") {
            ret.offers_base_url = url;
        }
        ret.env_tier = Self::var("PRICING_ENV");
        ret.commerce_host = Self::var("PRICING_ENV_COMMERCE");
        ret.spark_host = Self::var("PRICING_ENV_SPARK");
        if let Some(rust_log) = Self::var("RUST_LOG") {
            ret.rust_log = rust_log;
        }
        Ok(ret)
    }

    pub fn environment(&self) -> EnvironmentMap {
        EnvironmentMap::for_tier(self.env_tier.as_deref())
            .with_overrides(self.commerce_host.to_owned(), self.spark_host.to_owned())
    }

    fn var(key: &str) -> Option<String> {
        env::var(key).ok().filter(|v| !v.trim().is_empty())
    }
}
