//! Service catalog: the fixed price list every agreement is billed from.
//!
//! The catalog is built once at startup (either the built-in price list or a
//! YAML file named in configuration) and shared read-only behind an `Arc`.
//! Nothing mutates it after construction.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::ServiceCatalogEntry;

use super::errors::DomainError;

/// Built-in price list: code, label, monthly cents, yearly cents, colour
const DEFAULT_SERVICES: &[(&str, &str, i64, i64, &str)] = &[
    ("SITE-10", "10 Page Website ($500.00)", 50000, 600000, "#e4f8ba"),
    ("SITE-5", "5 Page Website ($250.00)", 25000, 300000, "#b7f5da"),
    ("PAGES", "Additional Pages ($200.00)", 20000, 240000, "#d3d3ff"),
    ("BROADLY", "Broadly ($300.00)", 30000, 360000, "#d1e7dd"),
    ("CITYPAGES", "City Pages ($125.00)", 12500, 150000, "#e9d8fd"),
    ("EMAIL", "Domain Emails ($30.00)", 3000, 36000, "#a2a7f5"),
    ("E-HOST", "E-Commerce Hosting ($300.00)", 30000, 360000, "#f1bcf7"),
    ("E-SITE", "E-Commerce Website ($500.00)", 50000, 600000, "#f5f5dc"),
    ("GOOGLEADS", "Google Ads ($0.00)", 0, 0, "#f8efd4"),
    ("GBP", "Google Business Profile ($125.00)", 12500, 150000, "#d1c4e9"),
    ("HOST", "Hosting w/ SSL ($100.00)", 10000, 120000, "#e0f7fa"),
    ("LLM", "Local Listing Management ($125.00)", 12500, 150000, "#ffecb3"),
    ("LSA", "Local Service Ads ($0.00)", 0, 0, "#ffcdd2"),
    ("ONLINEORDER", "Online Ordering ($125.00)", 12500, 150000, "#dcedc8"),
    ("GRM", "Online Reputation Management ($125.00)", 12500, 150000, "#fec464"),
    ("PREMPACK", "Premium Package ($600.00)", 60000, 720000, "#ede7f6"),
    ("BOOST", "SEO Power Booster ($250.00)", 25000, 300000, "#daf4f2"),
    ("SMMADS", "Social Ads ($0.00)", 0, 0, "#fbe9e7"),
    ("SMM", "Social Media Management ($275.00)", 27500, 330000, "#ffecb3"),
    ("STARTLLM", "Starter + SEO ($550.00)", 55000, 660000, "#e6ee9c"),
    ("STARTPACK", "Starter Package ($450.00)", 45000, 540000, "#dcedc8"),
    ("STARTLLMBOO", "Starter Package w/ LLM & Boost ($750.00)", 75000, 900000, "#f8bbd0"),
    ("PREMLLM", "Premium Package w/ LLM ($700.00)", 70000, 840000, "#c8e6c9"),
    ("PREMLLMBOO", "Premium Package w/ LLM & Boost ($900.00)", 90000, 1080000, "#ffccbc"),
    ("ECOMPACK", "E-Commerce Package ($750.00)", 75000, 900000, "#ffcc80"),
    ("SITE-1", "Website One ($50.00)", 5000, 60000, "#ffe082"),
    ("BLOG", "Blogs ($250.00)", 25000, 300000, "#fff59d"),
    ("LOGO", "Logo ($16.66)", 1666, 20000, "#e1bee7"),
    ("BC", "Business Cards ($5.00)", 500, 6000, "#c5cae9"),
    ("GRR", "Google Review Removal ($208.33)", 20833, 250000, "#bbdefb"),
    ("CUSTOMSERVICE", "Custom Service ($0.00)", 0, 0, "#a4ebe8"),
];

/// On-disk shape of a catalog file
#[derive(Debug, Deserialize)]
struct CatalogFile {
    services: Vec<ServiceCatalogEntry>,
}

/// Read-only lookup table of billable services
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    entries: Vec<ServiceCatalogEntry>,
    index: HashMap<String, usize>,
}

impl ServiceCatalog {
    /// Build a catalog from entries, rejecting duplicate codes
    pub fn from_entries(entries: Vec<ServiceCatalogEntry>) -> Result<Self, DomainError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.code.clone(), position).is_some() {
                return Err(DomainError::Validation(format!(
                    "Duplicate service code in catalog: {}",
                    entry.code
                )));
            }
        }
        Ok(Self { entries, index })
    }

    /// The built-in price list
    pub fn builtin() -> Self {
        let entries: Vec<ServiceCatalogEntry> = DEFAULT_SERVICES
            .iter()
            .map(|(code, label, monthly, yearly, hex)| ServiceCatalogEntry {
                code: code.to_string(),
                label: label.to_string(),
                monthly_price: Decimal::new(*monthly, 2),
                yearly_price: Decimal::new(*yearly, 2),
                hex: Some(hex.to_string()),
            })
            .collect();

        // Codes in DEFAULT_SERVICES are unique
        let index = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.code.clone(), position))
            .collect();
        Self { entries, index }
    }

    /// Load a catalog from a YAML file with a top-level `services` list
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read service catalog {}", path.display()))?;
        let catalog = Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid service catalog {}", path.display()))?;
        info!("Loaded {} services from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        Ok(Self::from_entries(file.services)?)
    }

    /// Look up a service by code
    pub fn lookup(&self, code: &str) -> Result<&ServiceCatalogEntry, DomainError> {
        self.get(code)
            .ok_or_else(|| DomainError::NotFound(format!("Service code not found: {}", code)))
    }

    pub fn get(&self, code: &str) -> Option<&ServiceCatalogEntry> {
        self.index.get(code).map(|&position| &self.entries[position])
    }

    /// All entries sorted by label, ignoring case
    pub fn all(&self) -> Vec<&ServiceCatalogEntry> {
        let mut sorted: Vec<&ServiceCatalogEntry> = self.entries.iter().collect();
        sorted.sort_by_cached_key(|entry| entry.label.to_lowercase());
        sorted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
