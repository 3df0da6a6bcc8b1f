//! Application layer for deploygen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ConfigService, StartupScriptPatcher, CatalogService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    CatalogService, ConfigService, PatchFailure, PatchReport, PatchedService, ServiceInfo,
    StartupScriptPatcher, TemplateInfo,
};

pub use ports::{CatalogStore, Filesystem, TemplateRenderer};

pub use error::ApplicationError;
