use std::env;
use std::path::PathBuf;

use anyhow::Context;

const DEFAULT_PAGE_LIMIT: u32 = 20;
const MAX_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    /// Indexer export loaded into the store at startup.
    pub snapshot_path: Option<PathBuf>,

    /// Bearer token required on `/api` routes; `None` disables auth.
    pub api_token: Option<String>,

    // Listing
    pub default_page_limit: u32,
    pub max_page_limit: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            snapshot_path: None,
            api_token: None,
            default_page_limit: DEFAULT_PAGE_LIMIT,
            max_page_limit: MAX_PAGE_LIMIT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let config = Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: match var("PORT") {
                Some(v) => v.parse().with_context(|| format!("PORT must be a port number, got '{v}'"))?,
                None => defaults.port,
            },
            snapshot_path: var("SNAPSHOT_PATH").map(PathBuf::from),
            api_token: var("API_TOKEN"),
            default_page_limit: match var("DEFAULT_PAGE_LIMIT") {
                Some(v) => v
                    .parse()
                    .with_context(|| format!("DEFAULT_PAGE_LIMIT must be an integer, got '{v}'"))?,
                None => defaults.default_page_limit,
            },
            max_page_limit: match var("MAX_PAGE_LIMIT") {
                Some(v) => v
                    .parse()
                    .with_context(|| format!("MAX_PAGE_LIMIT must be an integer, got '{v}'"))?,
                None => defaults.max_page_limit,
            },
        };

        if config.max_page_limit == 0 {
            anyhow::bail!("MAX_PAGE_LIMIT must be > 0");
        }
        if config.default_page_limit == 0 || config.default_page_limit > config.max_page_limit {
            anyhow::bail!(
                "DEFAULT_PAGE_LIMIT must be in 1..={} (got {})",
                config.max_page_limit,
                config.default_page_limit
            );
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
