//! Core domain layer for deploygen.
//!
//! Pure business logic: the flag schema, the validator, the typed parameter
//! model, the service registry and the template catalog model. All I/O is
//! handled via ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: No filesystem, network, or environment access
//! - **Static data**: Schema and registry are `'static` tables
//! - **Validated once**: `DeploymentParameters` can only be built by [`Validator`]
pub mod entities;
pub mod error;
pub mod registry;
pub mod schema;
pub mod value_objects;

mod validation;

pub use entities::{
    ArtifactSet, ConfigTemplate, DeploymentParameters, GeneratedArtifact, RenderContext,
    TemplateCatalog, configures_dir, migration_artifact, placeholders_in,
};

pub use error::{DomainError, ErrorCategory};

pub use registry::{
    ADMIN_SERVICE, FALLBACK_PORT, FeatureFlags, PUBLIC_SERVICE, SERVICE_PREFIX, SERVICE_REGISTRY,
    ServiceDescriptor, find_service, is_service_dir,
};

pub use schema::{FLAG_SCHEMA, FlagSpec, RawParameters, find_flag};

pub use value_objects::{AuthScheme, ConfigFormat, Literal, LogLevel, SearchMode, Switch};

pub use validation::{ACCEPTED_SCHEMES, Validator};
