//! Export artifact persistence.

use std::path::{Path, PathBuf};

use crate::domain::{AppError, ExportArtifact, Result};

/// Destination for assembled export files.
pub trait ArtifactSink: Send + Sync {
    /// Persist one artifact, returning the path it landed at.
    ///
    /// Existing files are never overwritten.
    ///
    /// # Errors
    /// Returns error if the artifact cannot be written.
    fn save(&self, artifact: &ExportArtifact) -> Result<PathBuf>;
}

/// Sink writing artifacts into a downloads-style directory.
pub struct DownloadsSink {
    dir: PathBuf,
}

impl DownloadsSink {
    /// Create a sink rooted at `dir`; the directory is created on first save.
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// The directory exports are written into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for DownloadsSink {
    fn save(&self, artifact: &ExportArtifact) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            AppError::io(
                format!("Failed to create directory {}", self.dir.display()),
                e,
            )
        })?;

        let path = unique_path(self.dir.join(&artifact.filename));
        std::fs::write(&path, &artifact.content)
            .map_err(|e| AppError::io(format!("Failed to write {}", path.display()), e))?;

        tracing::debug!("Saved export to {}", path.display());
        Ok(path)
    }
}

/// Appends ` (n)` before the extension until the name is free, the way
/// browsers de-duplicate downloads.
fn unique_path(path: PathBuf) -> PathBuf {
    if !path.exists() {
        return path;
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("export");
    let ext = path.extension().and_then(|s| s.to_str());
    let parent = path.parent().map_or_else(PathBuf::new, Path::to_path_buf);

    let mut n = 1u32;
    loop {
        let name = match ext {
            Some(ext) => format!("{stem} ({n}).{ext}"),
            None => format!("{stem} ({n})"),
        };
        let candidate = parent.join(name);
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}
