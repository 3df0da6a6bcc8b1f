//! deploygen core - hexagonal architecture implementation.
//!
//! This crate provides the domain and application layers for the deploygen
//! configuration generator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          deploygen-cli (CLI)            │
//! │   flags + config file + env → Raw       │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ConfigService, StartupScriptPatcher,   │
//! │  CatalogService)                        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, CatalogStore, Renderer)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    deploygen-adapters (Infrastructure)  │
//! │ (LocalFilesystem, BuiltinCatalogStore)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (Validator, DeploymentParameters,       │
//! │  SERVICE_REGISTRY, TemplateCatalog)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use deploygen_core::prelude::*;
//!
//! let raw = RawParameters::new()
//!     .with("discovery", "127.0.0.1:2181")
//!     .with("redis_ip", "127.0.0.1");
//!     // ...
//! let params = Validator::validate(&raw)?;
//!
//! let service = ConfigService::new(store, renderer, filesystem);
//! service.generate(&params)?;
//! ```

pub mod application;
pub mod domain;
pub mod error;

/// Public API - what external crates should use.
pub mod prelude {
    pub use crate::application::{
        CatalogService, ConfigService, PatchReport, StartupScriptPatcher,
        ports::{CatalogStore, Filesystem, TemplateRenderer},
    };
    pub use crate::domain::{
        ArtifactSet, ConfigFormat, ConfigTemplate, DeploymentParameters, GeneratedArtifact,
        RawParameters, RenderContext, TemplateCatalog, Validator,
    };
    pub use crate::error::{DeployError, DeployResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
