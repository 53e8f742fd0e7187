//! Writing rendered artifacts into the host project

use crate::error::{GenerateError, Result};
use crate::templates::ArtifactKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// One rendered output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    /// Destination relative to the project root
    pub path: PathBuf,
    pub content: String,
}

/// Write an artifact below `project_dir`, creating parent directories and
/// replacing any existing file. Returns the absolute destination.
pub async fn write_artifact(project_dir: &Path, artifact: &GeneratedArtifact) -> Result<PathBuf> {
    let target = project_dir.join(&artifact.path);
    let write_error = |path: &Path, source: std::io::Error| GenerateError::Write {
        artifact: artifact.kind.key(),
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| write_error(parent, e))?;
    }

    fs::write(&target, &artifact.content)
        .await
        .map_err(|e| write_error(&target, e))?;

    Ok(target)
}
