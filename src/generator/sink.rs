//! Artifact persistence.

use super::templates::Artifact;
use crate::error::GenError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Destination for rendered artifacts.
pub trait ArtifactSink {
    /// Persist one artifact, replacing any previous contents.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Write`] if the artifact cannot be stored.
    fn persist(&mut self, artifact: &Artifact) -> Result<(), GenError>;
}

/// Writes artifacts below a root directory, creating parent folders as needed.
#[derive(Debug, Clone)]
pub struct FileSystemSink {
    root: PathBuf,
}

impl FileSystemSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactSink for FileSystemSink {
    fn persist(&mut self, artifact: &Artifact) -> Result<(), GenError> {
        let path = self.root.join(&artifact.path);
        if let Some(parent) = path.parent() {
            // create_dir_all is a no-op for existing directories
            fs::create_dir_all(parent).map_err(|source| GenError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &artifact.contents).map_err(|source| GenError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(kind = %artifact.kind, path = %path.display(), "wrote artifact");
        Ok(())
    }
}

/// Keeps artifacts in memory; used for dry runs and tests.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    files: BTreeMap<PathBuf, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    pub fn files(&self) -> &BTreeMap<PathBuf, String> {
        &self.files
    }

    pub fn into_files(self) -> BTreeMap<PathBuf, String> {
        self.files
    }
}

impl ArtifactSink for MemorySink {
    fn persist(&mut self, artifact: &Artifact) -> Result<(), GenError> {
        self.files
            .insert(artifact.path.clone(), artifact.contents.clone());
        Ok(())
    }
}
