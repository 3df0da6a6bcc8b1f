//! Catalog store adapters.

mod builtin;

pub use builtin::BuiltinCatalogStore;
