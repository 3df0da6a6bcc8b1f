//! Infrastructure adapters for deploygen.
//!
//! This crate implements the ports defined in `deploygen_core::application::ports`.
//! It contains the built-in catalog data and all filesystem I/O.

pub mod builtin_catalog;
pub mod catalog_store;
pub mod filesystem;
pub mod renderer;

// Re-export commonly used adapters
pub use catalog_store::BuiltinCatalogStore;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::PlaceholderRenderer;
