//! Runtime configuration read from `BILLING_*` environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DATA_DIR_VAR: &str = "BILLING_DATA_DIR";
pub const BIND_ADDR_VAR: &str = "BILLING_BIND_ADDR";
pub const CATALOG_FILE_VAR: &str = "BILLING_CATALOG_FILE";
pub const ALLOWED_ORIGIN_VAR: &str = "BILLING_ALLOWED_ORIGIN";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";
const DATA_FOLDER_NAME: &str = "Client Billing";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Root of the client/agreement/payment record store
    pub data_directory: PathBuf,
    pub bind_address: SocketAddr,
    /// YAML catalog replacing the built-in service list
    pub catalog_file: Option<PathBuf>,
    /// Origin allowed by CORS, usually the frontend dev server
    pub allowed_origin: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_directory(),
            bind_address: SocketAddr::from(([127, 0, 0, 1], 3000)),
            catalog_file: None,
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_text = value(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_address = bind_text
            .parse::<SocketAddr>()
            .with_context(|| format!("{} is not a socket address: {}", BIND_ADDR_VAR, bind_text))?;

        Ok(Self {
            data_directory: value(DATA_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(default_data_directory),
            bind_address,
            catalog_file: value(CATALOG_FILE_VAR).map(PathBuf::from),
            allowed_origin: value(ALLOWED_ORIGIN_VAR).unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string()),
        })
    }
}

/// `~/Documents/Client Billing`, falling back to the working directory
/// when the platform has no documents folder
fn default_data_directory() -> PathBuf {
    dirs::document_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_FOLDER_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_address.to_string(), "127.0.0.1:3000");
        assert_eq!(config.allowed_origin, "http://localhost:8080");
        assert_eq!(config.catalog_file, None);
        assert!(config.data_directory.ends_with("Client Billing"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (DATA_DIR_VAR, "/srv/billing"),
            (BIND_ADDR_VAR, "0.0.0.0:8000"),
            (CATALOG_FILE_VAR, "/etc/billing/catalog.yaml"),
            (ALLOWED_ORIGIN_VAR, "https://billing.example.com"),
        ]))
        .unwrap();

        assert_eq!(config.data_directory, PathBuf::from("/srv/billing"));
        assert_eq!(config.bind_address.port(), 8000);
        assert_eq!(config.catalog_file, Some(PathBuf::from("/etc/billing/catalog.yaml")));
        assert_eq!(config.allowed_origin, "https://billing.example.com");
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = AppConfig::from_lookup(lookup(&[(CATALOG_FILE_VAR, "  "), (BIND_ADDR_VAR, "")])).unwrap();
        assert_eq!(config.catalog_file, None);
        assert_eq!(config.bind_address.port(), 3000);
    }

    #[test]
    fn test_bad_bind_address() {
        assert!(AppConfig::from_lookup(lookup(&[(BIND_ADDR_VAR, "not-an-address")])).is_err());
    }
}
