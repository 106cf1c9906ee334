use std::env;
use std::path::PathBuf;

use crate::error::{CrisisError, Result};

const DEFAULT_WEB_HOST: &str = "0.0.0.0";
const DEFAULT_WEB_PORT: u16 = 5001;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Web server
    pub web_host: String,
    pub web_port: u16,

    /// JSON city catalog. The built-in catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let web_port = match non_empty(lookup("WEB_PORT")) {
            Some(raw) => raw
                .parse()
                .map_err(|_| CrisisError::Config(format!("WEB_PORT must be a number, got {raw:?}")))?,
            None => DEFAULT_WEB_PORT,
        };

        Ok(Self {
            web_host: non_empty(lookup("WEB_HOST")).unwrap_or_else(|| DEFAULT_WEB_HOST.to_string()),
            web_port,
            catalog_path: non_empty(lookup("CITY_CATALOG_PATH")).map(PathBuf::from),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.web_host, self.web_port)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
