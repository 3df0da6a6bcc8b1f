//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the
//! high-level use cases: render the configuration catalog, patch start
//! scripts, inspect what is available.

pub mod catalog_service;
pub mod config_service;
pub mod startup_service;

pub use catalog_service::{CatalogService, ServiceInfo, TemplateInfo};
pub use config_service::ConfigService;
pub use startup_service::{
    PatchFailure, PatchReport, PatchedService, StartupScriptPatcher, render_start_script,
    service_port,
};
