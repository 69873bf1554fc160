//! Writing an artifact set into a project tree
//!
//! Each file is written to a sibling `.tmp` file and renamed into place.
//! Files outside the set are never touched.

use crate::artifact::{ArtifactSet, GeneratedArtifact};
use crate::error::CodegenError;
use std::path::{Component, Path, PathBuf};

/// Writes artifact sets under a project directory
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactWriter;

impl ArtifactWriter {
    /// Create writer
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Write every artifact, overwriting existing files
    ///
    /// Returns the absolute paths written, in key order.
    ///
    /// # Errors
    /// `CodegenError::Write` on the first I/O failure,
    /// `CodegenError::UnsafePath` for paths leaving the project directory.
    pub async fn write(
        &self,
        project_dir: impl AsRef<Path>,
        set: &ArtifactSet,
    ) -> Result<Vec<PathBuf>, CodegenError> {
        let project_dir = project_dir.as_ref();
        let mut written = Vec::with_capacity(set.len());

        for (key, artifact) in set {
            let target = resolve(project_dir, artifact)?;
            write_atomic(&target, &artifact.content).await?;
            tracing::trace!(%key, path = %target.display(), "artifact written");
            written.push(target);
        }

        tracing::info!(
            project_dir = %project_dir.display(),
            files = written.len(),
            "artifacts written"
        );
        Ok(written)
    }
}

fn resolve(project_dir: &Path, artifact: &GeneratedArtifact) -> Result<PathBuf, CodegenError> {
    let relative = artifact.relative_path();
    let clean = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !clean || relative.as_os_str().is_empty() {
        return Err(CodegenError::UnsafePath(artifact.path.clone()));
    }
    Ok(project_dir.join(relative))
}

async fn write_atomic(target: &Path, content: &str) -> Result<(), CodegenError> {
    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| CodegenError::write(parent, e))?;
    }

    let mut tmp_name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = target.with_file_name(tmp_name);

    tokio::fs::write(&tmp, content)
        .await
        .map_err(|e| CodegenError::write(&tmp, e))?;
    tokio::fs::rename(&tmp, target)
        .await
        .map_err(|e| CodegenError::write(target, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{ArtifactKey, Layer};

    #[tokio::test]
    async fn creates_parents_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let key = ArtifactKey::module("todo", Layer::Entity);

        let mut set = ArtifactSet::new();
        set.insert(key.clone(), GeneratedArtifact::new("a/b/Todo.java", "v1"));
        ArtifactWriter::new().write(dir.path(), &set).await.unwrap();

        set.insert(key, GeneratedArtifact::new("a/b/Todo.java", "v2"));
        let written = ArtifactWriter::new().write(dir.path(), &set).await.unwrap();

        assert_eq!(written, vec![dir.path().join("a").join("b").join("Todo.java")]);
        let content = std::fs::read_to_string(&written[0]).unwrap();
        assert_eq!(content, "v2");
        assert!(!dir.path().join("a/b/Todo.java.tmp").exists());
    }

    #[tokio::test]
    async fn leaves_unrelated_files_alone() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("build.gradle"), "keep").unwrap();

        let mut set = ArtifactSet::new();
        set.insert(
            ArtifactKey::module("todo", Layer::Entity),
            GeneratedArtifact::new("Todo.java", "x"),
        );
        ArtifactWriter::new().write(dir.path(), &set).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("build.gradle")).unwrap(),
            "keep"
        );
    }

    #[tokio::test]
    async fn rejects_parent_components() {
        let dir = tempfile::tempdir().unwrap();
        let mut set = ArtifactSet::new();
        set.insert(
            ArtifactKey::module("todo", Layer::Entity),
            GeneratedArtifact::new("../escape.txt", "x"),
        );
        let err = ArtifactWriter::new().write(dir.path(), &set).await.unwrap_err();
        assert!(matches!(err, CodegenError::UnsafePath(_)));
    }
}
