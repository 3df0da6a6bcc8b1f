//! Catalog Service - read-only inspection of the registry and catalog.

use serde::Serialize;

use crate::{
    application::ports::CatalogStore,
    domain::{ConfigFormat, SERVICE_REGISTRY},
    error::DeployResult,
};

/// Information about a template for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub name: String,
    pub file: String,
    pub format: ConfigFormat,
    pub owner: String,
    pub placeholders: Vec<String>,
}

/// Information about a registered service for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    pub name: String,
    pub port: u16,
    pub templates: Vec<String>,
    pub auth_flag: bool,
    pub crypto_flag: bool,
}

/// Service for listing what the generator knows about.
pub struct CatalogService {
    store: Box<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Box<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Templates of one format, or of every format when `format` is `None`.
    pub fn templates(&self, format: Option<ConfigFormat>) -> DeployResult<Vec<TemplateInfo>> {
        let formats = match format {
            Some(format) => vec![format],
            None => ConfigFormat::ALL.to_vec(),
        };

        let mut out = Vec::new();
        for format in formats {
            let catalog = self.store.catalog(format)?;
            out.extend(catalog.templates().iter().map(|t| TemplateInfo {
                name: t.name.to_string(),
                file: t.filename(),
                format: t.format,
                owner: t
                    .owner()
                    .map_or_else(|| "-".to_string(), |svc| svc.name.to_string()),
                placeholders: t.placeholders.iter().map(|p| p.to_string()).collect(),
            }));
        }
        Ok(out)
    }

    /// Every registered service, in name order.
    pub fn services(&self) -> Vec<ServiceInfo> {
        SERVICE_REGISTRY
            .iter()
            .map(|svc| ServiceInfo {
                name: svc.name.to_string(),
                port: svc.default_port,
                templates: svc.templates.iter().map(|t| t.to_string()).collect(),
                auth_flag: svc.flags.auth,
                crypto_flag: svc.flags.crypto,
            })
            .collect()
    }
}
