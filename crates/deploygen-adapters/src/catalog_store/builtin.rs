//! In-memory catalog store seeded with the built-in templates.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use deploygen_core::{
    application::{ApplicationError, ports::CatalogStore},
    domain::{ConfigFormat, DomainError, TemplateCatalog},
    error::DeployResult,
};
use tracing::debug;

use crate::builtin_catalog;

/// Thread-safe catalog store, one catalog per format.
#[derive(Debug, Clone, Default)]
pub struct BuiltinCatalogStore {
    inner: Arc<RwLock<HashMap<ConfigFormat, TemplateCatalog>>>,
}

impl BuiltinCatalogStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with every built-in format loaded.
    pub fn with_builtin() -> DeployResult<Self> {
        let store = Self::new();
        for format in ConfigFormat::ALL {
            store.insert(TemplateCatalog::new(
                format,
                builtin_catalog::templates(format).to_vec(),
            ))?;
        }
        Ok(store)
    }

    /// Insert or replace the catalog for its format.
    ///
    /// The catalog is validated against the service registry first.
    pub fn insert(&self, catalog: TemplateCatalog) -> DeployResult<()> {
        catalog.validate()?;
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        debug!(format = %catalog.format(), templates = catalog.len(), "Catalog loaded");
        inner.insert(catalog.format(), catalog);
        Ok(())
    }

    /// Formats currently loaded.
    pub fn formats(&self) -> DeployResult<Vec<ConfigFormat>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(ConfigFormat::ALL
            .into_iter()
            .filter(|format| inner.contains_key(format))
            .collect())
    }
}

impl CatalogStore for BuiltinCatalogStore {
    fn catalog(&self, format: ConfigFormat) -> DeployResult<TemplateCatalog> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner
            .get(&format)
            .cloned()
            .ok_or_else(|| DomainError::UnknownTemplate {
                name: "*".into(),
                format: format.to_string(),
            })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deploygen_core::domain::ConfigTemplate;

    #[test]
    fn builtin_store_serves_both_formats() {
        let store = BuiltinCatalogStore::with_builtin().unwrap();
        assert_eq!(store.formats().unwrap(), ConfigFormat::ALL);
        let yaml = store.catalog(ConfigFormat::Yaml).unwrap();
        assert_eq!(yaml.get("migrate").unwrap().filename(), "migrate.yaml");
    }

    #[test]
    fn empty_store_reports_missing_format() {
        let err = BuiltinCatalogStore::new()
            .catalog(ConfigFormat::Ini)
            .unwrap_err();
        assert!(err.to_string().contains("ini"));
    }

    #[test]
    fn incomplete_catalog_is_rejected_on_insert() {
        let partial = TemplateCatalog::new(
            ConfigFormat::Ini,
            vec![ConfigTemplate {
                name: "extra",
                format: ConfigFormat::Ini,
                body: "",
                placeholders: &[],
            }],
        );
        let store = BuiltinCatalogStore::new();
        assert!(store.insert(partial).is_err());
        assert!(store.formats().unwrap().is_empty());
    }
}
