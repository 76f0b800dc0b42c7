//! # Temp File Registry
//!
//! Finds every temp file this layer created, of any kind, by the shared
//! [`TEMP_PREFIX_ALL`] marker, and deletes them by path.
//!
//! ## Example
//!
//! ```rust,no_run
//! use hostkit_core::temp::TempFileRegistry;
//!
//! let registry = TempFileRegistry::new();
//! for path in registry.find_all() {
//!     if let Err(err) = registry.delete(&path) {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::directory::TempDirectory;
use super::kind::TEMP_PREFIX_ALL;
use crate::config::HostConfig;
use crate::error::{HostError, HostResult};

/// Outcome of [`TempFileRegistry::purge`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurgeReport
{
    /// Files that were removed
    pub removed: Vec<PathBuf>,
    /// Files that could not be removed
    pub failed: Vec<PathBuf>,
}

/// Enumerates and deletes temp files in the temp directory.
#[derive(Debug, Clone, Default)]
pub struct TempFileRegistry
{
    directory: TempDirectory,
}

impl TempFileRegistry
{
    /// Registry resolving the directory from the environment on every call.
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Registry scanning `directory`.
    pub fn in_directory(directory: impl Into<PathBuf>) -> Self
    {
        Self {
            directory: TempDirectory::Fixed(directory.into()),
        }
    }

    /// Registry honouring `temp_dir_override` from `config`.
    #[must_use]
    pub fn from_config(config: &HostConfig) -> Self
    {
        match &config.temp_dir_override {
            Some(dir) => Self::in_directory(dir.clone()),
            None => Self::new(),
        }
    }

    /// Every entry in the temp directory whose name starts with the marker.
    ///
    /// Paths are qualified with the directory and sorted. A directory that
    /// cannot be opened yields an empty list: there is nothing to find.
    #[must_use]
    pub fn find_all(&self) -> Vec<PathBuf>
    {
        let directory = self.directory.resolve();
        let entries = match fs::read_dir(&directory) {
            Ok(entries) => entries,
            Err(err) => {
                debug!("Cannot scan {} for temp files: {err}", directory.display());
                return Vec::new();
            }
        };

        let mut found: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(TEMP_PREFIX_ALL))
            .map(|entry| directory.join(entry.file_name()))
            .collect();
        found.sort();
        found
    }

    /// Remove the temp file at `path`.
    ///
    /// ## Errors
    ///
    /// - `Deletion`: the file is already gone, or removal was refused
    pub fn delete(&self, path: &Path) -> HostResult<()>
    {
        fs::remove_file(path).map_err(|source| HostError::Deletion {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Deleted temp file");
        Ok(())
    }

    /// Delete everything [`find_all`](Self::find_all) returns.
    ///
    /// Individual failures are logged and counted, never propagated.
    #[must_use]
    pub fn purge(&self) -> PurgeReport
    {
        let mut report = PurgeReport::default();
        for path in self.find_all() {
            match self.delete(&path) {
                Ok(()) => report.removed.push(path),
                Err(err) => {
                    warn!("{err}");
                    report.failed.push(path);
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_find_all_matches_marker_only()
    {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hostkit-tmp-cache-abc123.bin"), b"").unwrap();
        fs::write(dir.path().join("hostkit-tmp-custom"), b"").unwrap();
        fs::write(dir.path().join("unrelated.txt"), b"").unwrap();
        fs::write(dir.path().join("xhostkit-tmp-cache-abc123.bin"), b"").unwrap();

        let registry = TempFileRegistry::in_directory(dir.path());
        assert_eq!(
            registry.find_all(),
            vec![
                dir.path().join("hostkit-tmp-cache-abc123.bin"),
                dir.path().join("hostkit-tmp-custom"),
            ]
        );
    }

    #[test]
    fn test_unopenable_directory_finds_nothing()
    {
        let dir = tempfile::tempdir().unwrap();
        let registry = TempFileRegistry::in_directory(dir.path().join("missing"));
        assert!(registry.find_all().is_empty());
    }

    #[test]
    fn test_delete_twice_reports_error()
    {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hostkit-tmp-log-zzzzzz.log");
        fs::write(&path, b"x").unwrap();

        let registry = TempFileRegistry::in_directory(dir.path());
        registry.delete(&path).unwrap();
        assert!(!path.exists());

        let err = registry.delete(&path).unwrap_err();
        assert!(matches!(err, HostError::Deletion { .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_purge_counts_results()
    {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hostkit-tmp-cache-aaaaaa.bin"), b"").unwrap();
        fs::write(dir.path().join("hostkit-tmp-render-bbbbbb.png"), b"").unwrap();
        fs::write(dir.path().join("keep.me"), b"").unwrap();

        let registry = TempFileRegistry::in_directory(dir.path());
        let report = registry.purge();
        assert_eq!(report.removed.len(), 2);
        assert!(report.failed.is_empty());
        assert!(registry.find_all().is_empty());
        assert!(dir.path().join("keep.me").exists());
    }
}
