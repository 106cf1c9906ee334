//! City reference data.
//!
//! The catalog is loaded once and only ever read; callers share it behind an
//! `Arc` with no locking.

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crisis_common::{City, CitySummary, CrisisError};

const BUILTIN_CITIES: &str = include_str!("../data/cities.json");

/// Read-only city lookup.
pub trait CityCatalog: Send + Sync {
    fn lookup(&self, key: &str) -> Result<&City, CrisisError>;

    /// Listing of every city, in catalog order.
    fn summaries(&self) -> Vec<CitySummary>;
}

/// Ordered in-memory catalog.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    cities: Vec<City>,
}

impl StaticCatalog {
    /// Build a catalog, rejecting blank or duplicate keys.
    pub fn new(cities: Vec<City>) -> Result<Self, CrisisError> {
        let mut seen = HashSet::new();
        for city in &cities {
            if city.key.trim().is_empty() {
                return Err(CrisisError::Catalog(format!(
                    "city {:?} has an empty key",
                    city.name
                )));
            }
            if !seen.insert(city.key.as_str()) {
                return Err(CrisisError::Catalog(format!(
                    "duplicate city key {:?}",
                    city.key
                )));
            }
        }
        Ok(Self { cities })
    }

    /// The five reference cities shipped with the engine.
    pub fn builtin() -> Result<Self, CrisisError> {
        Self::from_json_str(BUILTIN_CITIES)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CrisisError> {
        let cities: Vec<City> = serde_json::from_str(json)
            .map_err(|e| CrisisError::Catalog(format!("invalid catalog JSON: {e}")))?;
        Self::new(cities)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CrisisError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            CrisisError::Catalog(format!("failed to read {}: {e}", path.display()))
        })?;
        let catalog = Self::from_json_str(&json)?;
        info!(path = %path.display(), cities = catalog.len(), "Loaded city catalog");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }
}

impl CityCatalog for StaticCatalog {
    fn lookup(&self, key: &str) -> Result<&City, CrisisError> {
        self.cities
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| CrisisError::NotFound(key.to_string()))
    }

    fn summaries(&self) -> Vec<CitySummary> {
        self.cities.iter().map(CitySummary::from).collect()
    }
}
