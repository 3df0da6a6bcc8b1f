//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `deploygen-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{ConfigFormat, ConfigTemplate, RenderContext, TemplateCatalog};
use crate::error::DeployResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `deploygen_adapters::filesystem::LocalFilesystem` (production)
/// - `deploygen_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> DeployResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> DeployResult<()>;

    /// Read a whole file as UTF-8.
    fn read_file(&self, path: &Path) -> DeployResult<String>;

    /// Copy a file, replacing the destination if present.
    fn copy_file(&self, from: &Path, to: &Path) -> DeployResult<()>;

    /// Set or clear the executable bit.
    fn set_permissions(&self, path: &Path, executable: bool) -> DeployResult<()>;

    /// Check if path is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Names of the directories directly under `path`, sorted by name.
    fn list_dirs(&self, path: &Path) -> DeployResult<Vec<String>>;
}

/// Port for the versioned template catalog.
///
/// Implemented by:
/// - `deploygen_adapters::catalog_store::BuiltinCatalogStore` (compiled-in data)
#[cfg_attr(test, mockall::automock)]
pub trait CatalogStore: Send + Sync {
    /// The catalog for one document format.
    fn catalog(&self, format: ConfigFormat) -> DeployResult<TemplateCatalog>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `deploygen_adapters::renderer::PlaceholderRenderer` (`{{NAME}}` substitution)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render one template body against the context.
    ///
    /// Must fail with `UnresolvedPlaceholder` rather than emit a file that
    /// still contains a token.
    fn render(&self, template: &ConfigTemplate, context: &RenderContext) -> DeployResult<String>;
}
