use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::{
    error::DomainError, registry::ADMIN_SERVICE, value_objects::ConfigFormat,
};

/// Directory (relative to the deployment root) holding every rendered
/// configuration artifact.
pub fn configures_dir() -> PathBuf {
    Path::new(ADMIN_SERVICE).join("configures")
}

/// Path of the migration artifact relative to the admin service directory.
///
/// The start-script patcher needs this before anything is written, so it is
/// computed here rather than read back from disk.
pub fn migration_artifact(format: ConfigFormat) -> String {
    format!("configures/migrate.{}", format.extension())
}

/// One rendered file, ready for the artifact writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Relative to the deployment root.
    pub path: PathBuf,
    pub content: String,
}

impl GeneratedArtifact {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Every artifact produced by one expansion, rooted at the deployment root.
///
/// This is the output of the template expander. It contains no business
/// logic, only data.
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    pub(crate) root: PathBuf,
    pub(crate) artifacts: Vec<GeneratedArtifact>,
}

impl ArtifactSet {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            artifacts: Vec::new(),
        }
    }

    pub fn push(&mut self, artifact: GeneratedArtifact) {
        self.artifacts.push(artifact);
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratedArtifact> {
        self.artifacts.iter()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Find an artifact by its relative path.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&GeneratedArtifact> {
        let path = path.as_ref();
        self.artifacts.iter().find(|a| a.path == path)
    }

    /// Paths must be relative and unique.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for artifact in &self.artifacts {
            let path_str = artifact.path.display().to_string();
            if artifact.path.is_absolute() {
                return Err(DomainError::AbsolutePathNotAllowed { path: path_str });
            }
            if !seen.insert(path_str.clone()) {
                return Err(DomainError::DuplicatePath { path: path_str });
            }
        }
        Ok(())
    }
}
