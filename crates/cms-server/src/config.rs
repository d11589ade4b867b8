use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    Firestore,
}

impl FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "firestore" => Ok(Self::Firestore),
            other => anyhow::bail!("Unknown CMS_STORE '{}' (expected memory or firestore)", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub store: StoreKind,
    pub seed_file: Option<PathBuf>,
    pub firestore_project_id: Option<String>,
    pub firestore_database: String,
    pub firestore_api_key: Option<String>,
    pub firestore_base_url: String,
    pub store_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the config from any variable source; empty values count as unset.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            port: var("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .context("PORT must be a port number")?,
            store: var("CMS_STORE")
                .unwrap_or_else(|| "memory".to_string())
                .parse()?,
            seed_file: var("CMS_SEED_FILE").map(PathBuf::from),
            firestore_project_id: var("FIRESTORE_PROJECT_ID"),
            firestore_database: var("FIRESTORE_DATABASE")
                .unwrap_or_else(|| "(default)".to_string()),
            firestore_api_key: var("FIRESTORE_API_KEY"),
            firestore_base_url: var("FIRESTORE_BASE_URL")
                .unwrap_or_else(|| "https://firestore.googleapis.com/v1".to_string()),
            store_timeout_secs: var("CMS_STORE_TIMEOUT_SECS")
                .unwrap_or_else(|| "10".to_string())
                .parse()
                .context("CMS_STORE_TIMEOUT_SECS must be a number of seconds")?,
        })
    }
}
