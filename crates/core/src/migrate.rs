//! Single-file migration: source-root resolution and copying with metadata

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::Result;
use filetime::FileTime;
use tracing::debug;

/// Copies files from a source project into a staging subdirectory,
/// preserving their source-relative path structure.
///
/// Destination files land under `<staging root>/<project>/`, where
/// `project` defaults to the source root's directory name.
pub struct Migrator {
    source_root: PathBuf,
    staging_root: PathBuf,
    project: String,
}

impl Migrator {
    /// Create a migrator for the given source and staging roots
    #[must_use]
    pub fn new(source_root: impl Into<PathBuf>, staging_root: impl Into<PathBuf>) -> Self {
        let source_root = source_root.into();
        let project = source_root.file_name().map_or_else(
            || "project".to_string(),
            |name| name.to_string_lossy().into_owned(),
        );

        Self {
            source_root,
            staging_root: staging_root.into(),
            project,
        }
    }

    /// Override the destination subdirectory name
    #[must_use]
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    /// Source project root
    #[must_use]
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Directory receiving copied files (`<staging root>/<project>`)
    #[must_use]
    pub fn staging_dir(&self) -> PathBuf {
        self.staging_root.join(&self.project)
    }

    /// Resolve a path argument against the source root.
    ///
    /// Absolute paths must already lie inside the source root. Containment
    /// is checked segment-wise, so `/proj-old` is not inside `/proj`.
    /// Relative paths are joined to the source root.
    ///
    /// # Errors
    /// Returns an error if an absolute path lies outside the source root.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            if !path.starts_with(&self.source_root) {
                return Err(color_eyre::eyre::eyre!(
                    "not inside source project {}: {}",
                    self.source_root.display(),
                    path.display()
                ));
            }
            Ok(path.to_path_buf())
        } else {
            Ok(self.source_root.join(path))
        }
    }

    /// Copy one file into the staging area, recreating its source-relative
    /// path and preserving permissions and timestamps. An existing
    /// destination file is overwritten silently.
    ///
    /// Returns the destination path written.
    ///
    /// # Errors
    /// Returns an error if the path escapes the source root, does not
    /// exist, is not a regular file, or the copy itself fails.
    pub fn copy_file(&self, file: &Path) -> Result<PathBuf> {
        let source = self.resolve(file)?;

        if !source.exists() {
            return Err(color_eyre::eyre::eyre!(
                "file not found: {}",
                source.display()
            ));
        }
        if !source.is_file() {
            return Err(color_eyre::eyre::eyre!(
                "not a regular file: {}",
                source.display()
            ));
        }

        let relative = source.strip_prefix(&self.source_root)?;
        let dest = self.staging_dir().join(relative);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&source, &dest)?;
        copy_times(&source, &dest)?;

        debug!("copied {} -> {}", relative.display(), dest.display());
        Ok(dest)
    }
}

/// Carry source access/modification times over to the destination.
/// `fs::copy` already preserves permissions.
fn copy_times(source: &Path, dest: &Path) -> std::io::Result<()> {
    let metadata = fs::metadata(source)?;
    let atime = FileTime::from_last_access_time(&metadata);
    let mtime = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_times(dest, atime, mtime)
}
