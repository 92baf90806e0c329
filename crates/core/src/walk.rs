//! Recursive directory migration with name-based directory pruning

use std::path::{Path, PathBuf};

use color_eyre::Result;
use ignore::WalkBuilder;
use tracing::warn;

use crate::migrate::Migrator;

/// Directory names pruned from every directory migration
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[
    ".git",
    ".svn",
    "node_modules",
    "__pycache__",
    ".idea",
    ".vscode",
];

/// File and directory filtering for a directory migration
#[derive(Debug, Clone)]
pub struct WalkFilter {
    /// Extension allow-list with leading dot (e.g. ".py"); `None` keeps
    /// every file. Files without an extension never match an allow-list.
    pub extensions: Option<Vec<String>>,
    /// Directory names pruned before descent. Names starting with `.`
    /// are always pruned regardless of this list.
    pub exclude_dirs: Vec<String>,
}

impl Default for WalkFilter {
    fn default() -> Self {
        Self {
            extensions: None,
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl WalkFilter {
    /// Restrict the migration to files with the given extensions
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = Some(extensions.into_iter().map(Into::into).collect());
        self
    }

    /// Add a directory name to the exclusion set
    #[must_use]
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.exclude_dirs.push(name.into());
        self
    }

    fn skip_dir(&self, name: &str) -> bool {
        name.starts_with('.') || self.exclude_dirs.iter().any(|excluded| excluded == name)
    }

    fn keep_file(&self, path: &Path) -> bool {
        let Some(allowed) = &self.extensions else {
            return true;
        };
        path.extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .is_some_and(|ext| allowed.iter().any(|candidate| *candidate == ext))
    }
}

/// Outcome of one directory migration
#[derive(Debug, Default)]
pub struct WalkReport {
    /// Source-relative paths copied successfully, in walk order
    pub copied: Vec<PathBuf>,
    /// Per-file failures: source path and error text
    pub failed: Vec<(PathBuf, String)>,
}

impl WalkReport {
    /// Number of files copied
    #[must_use]
    pub fn copied_count(&self) -> usize {
        self.copied.len()
    }

    /// Number of files that failed to copy
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}

impl Migrator {
    /// Recursively copy every matching file under `dir` into the staging
    /// area. Individual file failures are recorded in the report and do
    /// not abort the walk.
    ///
    /// # Errors
    /// Returns an error if `dir` escapes the source root, does not exist,
    /// or is not a directory.
    pub fn copy_dir(&self, dir: &Path, filter: &WalkFilter) -> Result<WalkReport> {
        let root = self.resolve(dir)?;

        if !root.exists() {
            return Err(color_eyre::eyre::eyre!(
                "directory not found: {}",
                root.display()
            ));
        }
        if !root.is_dir() {
            return Err(color_eyre::eyre::eyre!(
                "not a directory: {}",
                root.display()
            ));
        }

        // Exclusion is purely name-based, so every ignore-file filter of
        // the walker is disabled, including `.ignore` files in or above
        // the tree.
        let dir_filter = filter.clone();
        let mut builder = WalkBuilder::new(&root);
        builder
            .hidden(false)
            .ignore(false)
            .parents(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .require_git(false)
            .filter_entry(move |entry| {
                if entry.depth() == 0 || !entry.file_type().is_some_and(|t| t.is_dir()) {
                    return true;
                }
                !dir_filter.skip_dir(&entry.file_name().to_string_lossy())
            });

        let mut report = WalkReport::default();
        for result in builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("walk error under {}: {err}", root.display());
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() || !filter.keep_file(path) {
                continue;
            }

            match self.copy_file(path) {
                Ok(_) => {
                    let relative = path.strip_prefix(self.source_root()).unwrap_or(path);
                    report.copied.push(relative.to_path_buf());
                }
                Err(err) => report.failed.push((path.to_path_buf(), err.to_string())),
            }
        }

        Ok(report)
    }
}
