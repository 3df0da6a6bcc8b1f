//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use deploygen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::DeployResult,
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can hand one clone to a service and
/// inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    executables: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories.
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> DeployResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent)?;
        }
        self.write_file(path, content)?;
        Ok(self)
    }

    /// Seed an empty directory.
    pub fn with_dir(self, path: impl AsRef<Path>) -> DeployResult<Self> {
        self.create_dir_all(path.as_ref())?;
        Ok(self)
    }

    /// A file's content, if present.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.read().ok()?.files.get(path.as_ref()).cloned()
    }

    /// Check if a file is marked executable.
    pub fn is_executable(&self, path: impl AsRef<Path>) -> bool {
        self.read()
            .map(|inner| inner.executables.contains(path.as_ref()))
            .unwrap_or(false)
    }

    /// All file paths, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> DeployResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }

    fn write(&self) -> DeployResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }
}

fn not_found(path: &Path) -> ApplicationError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "No such file or directory".into(),
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> DeployResult<()> {
        let mut inner = self.write()?;
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> DeployResult<()> {
        let mut inner = self.write()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> DeployResult<String> {
        Ok(self
            .read()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path))?)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> DeployResult<()> {
        let content = self.read_file(from)?;
        self.write_file(to, &content)
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> DeployResult<()> {
        let mut inner = self.write()?;
        if !inner.files.contains_key(path) {
            return Err(not_found(path).into());
        }
        if executable {
            inner.executables.insert(path.to_path_buf());
        } else {
            inner.executables.remove(path);
        }
        Ok(())
    }

    fn is_file(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.files.contains_key(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn list_dirs(&self, path: &Path) -> DeployResult<Vec<String>> {
        let inner = self.read()?;
        if !inner.directories.contains(path) {
            return Err(not_found(path).into());
        }
        Ok(inner
            .directories
            .iter()
            .filter(|dir| dir.parent() == Some(path))
            .filter_map(|dir| dir.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect())
    }
}
