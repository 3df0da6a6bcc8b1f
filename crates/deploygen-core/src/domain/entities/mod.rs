pub mod artifact;
pub mod parameters;
pub mod template;

pub use artifact::{ArtifactSet, GeneratedArtifact, configures_dir, migration_artifact};
pub use parameters::DeploymentParameters;
pub use template::{ConfigTemplate, RenderContext, TemplateCatalog, placeholders_in};
